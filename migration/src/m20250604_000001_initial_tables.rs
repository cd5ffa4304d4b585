use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 users 表
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(User::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(User::Name).string().not_null())
                    .col(ColumnDef::new(User::Email).string().not_null())
                    .col(
                        ColumnDef::new(User::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建 campaigns 表
        manager
            .create_table(
                Table::create()
                    .table(Campaign::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Campaign::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Campaign::Name).string().not_null())
                    .col(ColumnDef::new(Campaign::BrandName).string().not_null())
                    .col(ColumnDef::new(Campaign::Description).text().null())
                    .col(
                        ColumnDef::new(Campaign::StartDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Campaign::EndDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Campaign::Platforms).text().not_null())
                    .col(
                        ColumnDef::new(Campaign::Status)
                            .string()
                            .not_null()
                            .default("DRAFT"),
                    )
                    .col(ColumnDef::new(Campaign::QrCodeUrl).text().null())
                    .col(ColumnDef::new(Campaign::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(Campaign::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Campaign::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建 campaign_configs 表（与 campaigns 一对一，级联删除）
        manager
            .create_table(
                Table::create()
                    .table(CampaignConfig::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CampaignConfig::CampaignId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CampaignConfig::MaxImagesPerPost)
                            .integer()
                            .not_null()
                            .default(3),
                    )
                    .col(
                        ColumnDef::new(CampaignConfig::MaxPostsPerUser)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(CampaignConfig::RewardMessage).text().null())
                    .col(
                        ColumnDef::new(CampaignConfig::CustomerServiceQr)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CampaignConfig::BackgroundImage)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CampaignConfig::TemplateType)
                            .string()
                            .not_null()
                            .default("DEFAULT"),
                    )
                    .col(
                        ColumnDef::new(CampaignConfig::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaign_configs_campaign")
                            .from(CampaignConfig::Table, CampaignConfig::CampaignId)
                            .to(Campaign::Table, Campaign::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建创建时间索引（列表按 created_at 倒序分页）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_campaigns_created_at")
                    .table(Campaign::Table)
                    .col(Campaign::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // 创建状态索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_campaigns_status")
                    .table(Campaign::Table)
                    .col(Campaign::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除索引
        manager
            .drop_index(Index::drop().name("idx_campaigns_status").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_campaigns_created_at").to_owned())
            .await?;

        // 删除表（先删子表）
        manager
            .drop_table(Table::drop().table(CampaignConfig::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Campaign::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Name,
    Email,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Campaign {
    #[sea_orm(iden = "campaigns")]
    Table,
    Id,
    Name,
    BrandName,
    Description,
    StartDate,
    EndDate,
    Platforms,
    Status,
    QrCodeUrl,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CampaignConfig {
    #[sea_orm(iden = "campaign_configs")]
    Table,
    CampaignId,
    MaxImagesPerPost,
    MaxPostsPerUser,
    RewardMessage,
    CustomerServiceQr,
    BackgroundImage,
    TemplateType,
    UpdatedAt,
}
