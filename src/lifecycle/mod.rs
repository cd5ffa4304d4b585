//! Campaign lifecycle manager
//!
//! Owns the state machine and orchestrates the side effects of each
//! transition: validation, persistence, QR provisioning and the audit
//! trail. The HTTP surface calls into this module for every mutation;
//! plain reads go through the store directly.

pub mod qr;
pub mod transitions;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::errors::{CampaignHubError, Result};
use crate::storage::{
    ActivityAction, Campaign, CampaignConfig, CampaignDetails, CampaignPatch, CampaignStatus,
    CampaignStore, ConfigPatch, Platform, QrStatus,
};

pub use qr::{PngDataUriEncoder, QrEncoder, campaign_payload_url};
pub use transitions::{LifecycleAction, TransitionPolicy, check_transition};

/// 显式注入的调用方身份，所有变更操作都必须携带
///
/// 没有任何默认回退用户；缺失身份在到达这里之前就被拒绝。
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
}

/// 创建活动的输入（HTTP 边界已完成字段级校验）
#[derive(Debug, Clone)]
pub struct CreateCampaignInput {
    pub name: String,
    pub brand_name: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub platforms: Vec<Platform>,
}

pub struct CampaignLifecycle {
    store: Arc<CampaignStore>,
    qr_encoder: Arc<dyn QrEncoder>,
    frontend_base_url: String,
    policy: TransitionPolicy,
}

impl CampaignLifecycle {
    pub fn new(
        store: Arc<CampaignStore>,
        qr_encoder: Arc<dyn QrEncoder>,
        frontend_base_url: String,
        policy: TransitionPolicy,
    ) -> Self {
        CampaignLifecycle {
            store,
            qr_encoder,
            frontend_base_url,
            policy,
        }
    }

    pub fn store(&self) -> &Arc<CampaignStore> {
        &self.store
    }

    /// 创建活动
    ///
    /// 单事务落库 campaign + 默认配置 + CREATED 审计；随后执行二维码供给
    /// 第二阶段。二维码生成失败不回滚创建，活动停留在 qr_status=PENDING，
    /// 供给在后续 publish 或二维码读取时恢复。
    pub async fn create(
        &self,
        identity: &Identity,
        input: CreateCampaignInput,
    ) -> Result<CampaignDetails> {
        validate_dates(input.start_date, input.end_date)?;
        validate_platforms(&input.platforms)?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let campaign = Campaign {
            id: id.clone(),
            name: input.name,
            brand_name: input.brand_name,
            description: input.description,
            start_date: input.start_date,
            end_date: input.end_date,
            platforms: input.platforms.clone(),
            status: CampaignStatus::Draft,
            qr_code_url: None,
            qr_status: QrStatus::Pending,
            created_by: identity.user_id.clone(),
            created_at: now,
            updated_at: now,
        };
        let config = CampaignConfig::defaults(&id, now);

        let details = json!({
            "platforms": input.platforms,
            "createdBy": identity.user_id,
        });
        self.store.create_campaign(&campaign, &config, details).await?;

        // 二维码供给第二阶段：payload 需要生成后的 id，无法提前编码
        match self.provision_qr(&id) {
            Ok(data_uri) => {
                self.store.persist_qr(&id, &data_uri).await?;
            }
            Err(e) => {
                warn!(
                    "QR provisioning failed for campaign {}, left PENDING: {}",
                    id, e
                );
            }
        }

        // 重新读取，带上二维码和配置
        self.store
            .get_campaign_details(&id)
            .await?
            .ok_or_else(|| {
                CampaignHubError::database_operation(format!("创建后读取活动失败: {}", id))
            })
    }

    /// 部分更新活动字段（状态不经此路径）
    pub async fn update(
        &self,
        identity: &Identity,
        id: &str,
        patch: CampaignPatch,
    ) -> Result<Campaign> {
        let existing = self.require_campaign(id).await?;

        // 日期不变量对合并后的值生效
        let start = patch.start_date.unwrap_or(existing.start_date);
        let end = patch.end_date.unwrap_or(existing.end_date);
        validate_dates(start, end)?;

        if let Some(ref platforms) = patch.platforms {
            validate_platforms(platforms)?;
        }

        let details = json!({
            "updatedFields": patch.changed_fields(),
            "actor": identity.user_id,
        });
        self.store.update_campaign(id, &patch, details).await
    }

    /// 发布活动：DRAFT | PENDING | PAUSED -> ACTIVE
    ///
    /// 二维码缺失时在此惰性供给；供给失败则发布中止。
    pub async fn publish(&self, identity: &Identity, id: &str) -> Result<Campaign> {
        let campaign = self.require_campaign(id).await?;
        check_transition(LifecycleAction::Publish, campaign.status, self.policy)?;

        let new_qr = if campaign.qr_status == QrStatus::Ready && campaign.qr_code_url.is_some() {
            None
        } else {
            Some(self.provision_qr(id).inspect_err(|e| {
                error!("QR provisioning failed while publishing {}: {}", id, e);
            })?)
        };

        let details = json!({
            "publishedAt": Utc::now(),
            "actor": identity.user_id,
        });
        self.store
            .set_status(id, CampaignStatus::Active, new_qr, ActivityAction::Published, details)
            .await
    }

    /// 暂停活动
    pub async fn pause(&self, identity: &Identity, id: &str) -> Result<Campaign> {
        let campaign = self.require_campaign(id).await?;
        check_transition(LifecycleAction::Pause, campaign.status, self.policy)?;

        let details = json!({
            "pausedAt": Utc::now(),
            "actor": identity.user_id,
        });
        self.store
            .set_status(id, CampaignStatus::Paused, None, ActivityAction::Paused, details)
            .await
    }

    /// 删除活动，ACTIVE 状态下拒绝
    pub async fn delete(&self, identity: &Identity, id: &str) -> Result<()> {
        let campaign = self.require_campaign(id).await?;

        if campaign.status == CampaignStatus::Active {
            return Err(CampaignHubError::conflict("Cannot delete active campaign"));
        }

        self.store.delete_campaign(id).await?;
        info!("Campaign {} deleted by {}", id, identity.user_id);
        Ok(())
    }

    /// 部分更新活动配置
    ///
    /// 配置行在创建时物化，这里是纯更新，从不创建。
    pub async fn update_config(
        &self,
        identity: &Identity,
        id: &str,
        patch: ConfigPatch,
    ) -> Result<CampaignConfig> {
        self.require_campaign(id).await?;

        let details = json!({
            "updatedConfig": patch.changed_fields(),
            "actor": identity.user_id,
        });
        self.store.update_config(id, &patch, details).await
    }

    /// 二维码读取路径的恢复逻辑：PENDING 时补做供给
    pub async fn ensure_qr(&self, id: &str) -> Result<Campaign> {
        let campaign = self.require_campaign(id).await?;

        if campaign.qr_status == QrStatus::Ready && campaign.qr_code_url.is_some() {
            return Ok(campaign);
        }

        let data_uri = self.provision_qr(id)?;
        self.store.persist_qr(id, &data_uri).await?;
        self.require_campaign(id).await
    }

    /// 二维码供给：构造规范 payload URL 并编码，纯函数
    fn provision_qr(&self, id: &str) -> Result<String> {
        let payload = campaign_payload_url(&self.frontend_base_url, id);
        self.qr_encoder.encode(&payload)
    }

    async fn require_campaign(&self, id: &str) -> Result<Campaign> {
        self.store
            .get_campaign(id)
            .await?
            .ok_or_else(|| CampaignHubError::not_found("Campaign not found"))
    }
}

fn validate_dates(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<()> {
    if start > end {
        return Err(CampaignHubError::validation(
            "Start date must be on or before end date",
        ));
    }
    Ok(())
}

fn validate_platforms(platforms: &[Platform]) -> Result<()> {
    if platforms.is_empty() {
        return Err(CampaignHubError::validation(
            "At least one platform must be selected",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_validate_dates() {
        let now = Utc::now();
        assert!(validate_dates(now, now).is_ok());
        assert!(validate_dates(now, now + Duration::days(30)).is_ok());
        assert!(validate_dates(now + Duration::days(1), now).is_err());
    }

    #[test]
    fn test_validate_platforms() {
        assert!(validate_platforms(&[Platform::Weibo]).is_ok());
        assert!(validate_platforms(&[]).is_err());
    }
}
