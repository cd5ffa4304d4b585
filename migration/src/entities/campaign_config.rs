//! Per-campaign posting configuration, one row per campaign

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "campaign_configs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub campaign_id: String,
    pub max_images_per_post: i32,
    pub max_posts_per_user: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub reward_message: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub customer_service_qr: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub background_image: Option<String>,
    pub template_type: String,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
