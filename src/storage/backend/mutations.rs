//! Mutation operations for CampaignStore
//!
//! Every state-changing operation appends exactly one audit activity row,
//! inside the same transaction as the primary mutation: both commit or
//! neither does.

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, EntityTrait, TransactionTrait};
use tracing::info;

use super::CampaignStore;
use super::converters::{
    activity_active_model, campaign_to_active_model, config_to_active_model, model_to_campaign,
    model_to_config, platforms_to_json,
};
use crate::errors::{CampaignHubError, Result};
use crate::storage::models::{
    ActivityAction, Campaign, CampaignConfig, CampaignPatch, CampaignStatus, ConfigPatch, QrStatus,
};

use migration::entities::{campaign, campaign_activity, campaign_config};

impl CampaignStore {
    /// 创建活动：campaign + 默认配置 + CREATED 审计，单事务
    pub async fn create_campaign(
        &self,
        new_campaign: &Campaign,
        config: &CampaignConfig,
        details: serde_json::Value,
    ) -> Result<()> {
        let txn = self.db.begin().await?;

        campaign::Entity::insert(campaign_to_active_model(new_campaign))
            .exec(&txn)
            .await
            .map_err(|e| {
                CampaignHubError::database_operation(format!(
                    "创建活动 '{}' 失败: {}",
                    new_campaign.name, e
                ))
            })?;

        campaign_config::Entity::insert(config_to_active_model(config))
            .exec(&txn)
            .await
            .map_err(|e| {
                CampaignHubError::database_operation(format!("创建活动配置失败: {}", e))
            })?;

        campaign_activity::Entity::insert(activity_active_model(
            &new_campaign.id,
            ActivityAction::Created,
            &details,
            new_campaign.created_at,
        ))
        .exec(&txn)
        .await?;

        txn.commit().await?;
        info!("Campaign created: {} ({})", new_campaign.name, new_campaign.id);
        Ok(())
    }

    /// 部分更新活动字段 + UPDATED 审计，单事务
    ///
    /// 状态字段不经此路径，见 `set_status`。
    pub async fn update_campaign(
        &self,
        id: &str,
        patch: &CampaignPatch,
        details: serde_json::Value,
    ) -> Result<Campaign> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let existing = campaign::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| CampaignHubError::not_found(format!("活动不存在: {}", id)))?;

        let mut active: campaign::ActiveModel = existing.into();
        if let Some(ref name) = patch.name {
            active.name = Set(name.clone());
        }
        if let Some(ref brand_name) = patch.brand_name {
            active.brand_name = Set(brand_name.clone());
        }
        if let Some(ref description) = patch.description {
            active.description = Set(Some(description.clone()));
        }
        if let Some(start_date) = patch.start_date {
            active.start_date = Set(start_date);
        }
        if let Some(end_date) = patch.end_date {
            active.end_date = Set(end_date);
        }
        if let Some(ref platforms) = patch.platforms {
            active.platforms = Set(platforms_to_json(platforms));
        }
        active.updated_at = Set(now);

        let updated = active.update(&txn).await?;

        campaign_activity::Entity::insert(activity_active_model(
            id,
            ActivityAction::Updated,
            &details,
            now,
        ))
        .exec(&txn)
        .await?;

        txn.commit().await?;
        info!("Campaign updated: {}", id);
        model_to_campaign(updated)
    }

    /// 状态迁移 + 可选的二维码落库 + 审计，单事务
    pub async fn set_status(
        &self,
        id: &str,
        status: CampaignStatus,
        qr_code_url: Option<String>,
        action: ActivityAction,
        details: serde_json::Value,
    ) -> Result<Campaign> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let existing = campaign::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| CampaignHubError::not_found(format!("活动不存在: {}", id)))?;

        let mut active: campaign::ActiveModel = existing.into();
        active.status = Set(status.as_ref().to_string());
        if let Some(url) = qr_code_url {
            active.qr_code_url = Set(Some(url));
            active.qr_status = Set(QrStatus::Ready.as_ref().to_string());
        }
        active.updated_at = Set(now);

        let updated = active.update(&txn).await?;

        campaign_activity::Entity::insert(activity_active_model(
            id, action, &details, now,
        ))
        .exec(&txn)
        .await?;

        txn.commit().await?;
        info!("Campaign {} status -> {}", id, status);
        model_to_campaign(updated)
    }

    /// 二维码供给第二阶段：落库 data URI 并把子状态翻为 READY
    ///
    /// 不产生审计记录，二维码供给不属于被审计的业务动作。
    pub async fn persist_qr(&self, id: &str, qr_code_url: &str) -> Result<()> {
        let existing = campaign::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| CampaignHubError::not_found(format!("活动不存在: {}", id)))?;

        let mut active: campaign::ActiveModel = existing.into();
        active.qr_code_url = Set(Some(qr_code_url.to_string()));
        active.qr_status = Set(QrStatus::Ready.as_ref().to_string());
        active.updated_at = Set(Utc::now());
        active.update(&self.db).await?;

        info!("Campaign {} QR code provisioned", id);
        Ok(())
    }

    /// 部分更新配置 + CONFIG_UPDATED 审计，单事务
    ///
    /// 配置行在活动创建时物化，这里只更新，从不创建。
    pub async fn update_config(
        &self,
        campaign_id: &str,
        patch: &ConfigPatch,
        details: serde_json::Value,
    ) -> Result<CampaignConfig> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let existing = campaign_config::Entity::find_by_id(campaign_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                CampaignHubError::not_found(format!("活动配置不存在: {}", campaign_id))
            })?;

        let mut active: campaign_config::ActiveModel = existing.into();
        if let Some(max_images) = patch.max_images_per_post {
            active.max_images_per_post = Set(max_images);
        }
        if let Some(max_posts) = patch.max_posts_per_user {
            active.max_posts_per_user = Set(max_posts);
        }
        if let Some(ref reward_message) = patch.reward_message {
            active.reward_message = Set(Some(reward_message.clone()));
        }
        if let Some(ref customer_service_qr) = patch.customer_service_qr {
            active.customer_service_qr = Set(Some(customer_service_qr.clone()));
        }
        if let Some(ref background_image) = patch.background_image {
            active.background_image = Set(Some(background_image.clone()));
        }
        if let Some(template_type) = patch.template_type {
            active.template_type = Set(template_type.as_ref().to_string());
        }
        active.updated_at = Set(now);

        let updated = active.update(&txn).await?;

        campaign_activity::Entity::insert(activity_active_model(
            campaign_id,
            ActivityAction::ConfigUpdated,
            &details,
            now,
        ))
        .exec(&txn)
        .await?;

        txn.commit().await?;
        info!("Campaign {} config updated", campaign_id);
        model_to_config(updated)
    }

    /// 删除活动；配置 / 审计 / 分析行由外键级联删除
    pub async fn delete_campaign(&self, id: &str) -> Result<()> {
        let result = campaign::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(CampaignHubError::not_found(format!("活动不存在: {}", id)));
        }

        info!("Campaign deleted: {}", id);
        Ok(())
    }
}
