//! Entity Model <-> domain struct conversions.
//!
//! Status/platform/template tags and the platform list are stored as plain
//! text columns, so the conversions are fallible: a row written by a newer
//! schema revision must surface as an error instead of a silently mangled
//! campaign.

use std::str::FromStr;

use sea_orm::ActiveValue::{NotSet, Set};

use crate::errors::{CampaignHubError, Result};
use crate::storage::models::{
    ActivityAction, ActivityEntry, AnalyticsEvent, Campaign, CampaignConfig, CampaignStatus,
    Platform, QrStatus, TemplateType, UserRef,
};
use migration::entities::{analytics, campaign, campaign_activity, campaign_config, user};

/// 将 Sea-ORM Model 转换为 Campaign
pub fn model_to_campaign(model: campaign::Model) -> Result<Campaign> {
    let platform_tags: Vec<String> = serde_json::from_str(&model.platforms)?;
    let platforms = platform_tags
        .iter()
        .map(|tag| {
            Platform::from_str(tag).map_err(|_| {
                CampaignHubError::serialization(format!("未知的平台标签: {}", tag))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let status = CampaignStatus::from_str(&model.status)
        .map_err(|_| CampaignHubError::serialization(format!("未知的活动状态: {}", model.status)))?;
    let qr_status = QrStatus::from_str(&model.qr_status).map_err(|_| {
        CampaignHubError::serialization(format!("未知的二维码状态: {}", model.qr_status))
    })?;

    Ok(Campaign {
        id: model.id,
        name: model.name,
        brand_name: model.brand_name,
        description: model.description,
        start_date: model.start_date,
        end_date: model.end_date,
        platforms,
        status,
        qr_code_url: model.qr_code_url,
        qr_status,
        created_by: model.created_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

/// 将平台集合序列化为 JSON 文本列
pub fn platforms_to_json(platforms: &[Platform]) -> String {
    let tags: Vec<&str> = platforms.iter().map(|p| p.as_ref()).collect();
    serde_json::to_string(&tags).unwrap_or_else(|_| "[]".to_string())
}

/// 将 Campaign 转换为 ActiveModel（用于插入）
pub fn campaign_to_active_model(c: &Campaign) -> campaign::ActiveModel {
    campaign::ActiveModel {
        id: Set(c.id.clone()),
        name: Set(c.name.clone()),
        brand_name: Set(c.brand_name.clone()),
        description: Set(c.description.clone()),
        start_date: Set(c.start_date),
        end_date: Set(c.end_date),
        platforms: Set(platforms_to_json(&c.platforms)),
        status: Set(c.status.as_ref().to_string()),
        qr_code_url: Set(c.qr_code_url.clone()),
        qr_status: Set(c.qr_status.as_ref().to_string()),
        created_by: Set(c.created_by.clone()),
        created_at: Set(c.created_at),
        updated_at: Set(c.updated_at),
    }
}

pub fn model_to_config(model: campaign_config::Model) -> Result<CampaignConfig> {
    let template_type = TemplateType::from_str(&model.template_type).map_err(|_| {
        CampaignHubError::serialization(format!("未知的模板类型: {}", model.template_type))
    })?;

    Ok(CampaignConfig {
        campaign_id: model.campaign_id,
        max_images_per_post: model.max_images_per_post,
        max_posts_per_user: model.max_posts_per_user,
        reward_message: model.reward_message,
        customer_service_qr: model.customer_service_qr,
        background_image: model.background_image,
        template_type,
        updated_at: model.updated_at,
    })
}

pub fn config_to_active_model(c: &CampaignConfig) -> campaign_config::ActiveModel {
    campaign_config::ActiveModel {
        campaign_id: Set(c.campaign_id.clone()),
        max_images_per_post: Set(c.max_images_per_post),
        max_posts_per_user: Set(c.max_posts_per_user),
        reward_message: Set(c.reward_message.clone()),
        customer_service_qr: Set(c.customer_service_qr.clone()),
        background_image: Set(c.background_image.clone()),
        template_type: Set(c.template_type.as_ref().to_string()),
        updated_at: Set(c.updated_at),
    }
}

pub fn model_to_activity(model: campaign_activity::Model) -> Result<ActivityEntry> {
    let action = ActivityAction::from_str(&model.action).map_err(|_| {
        CampaignHubError::serialization(format!("未知的审计动作: {}", model.action))
    })?;
    let details = serde_json::from_str(&model.details)?;

    Ok(ActivityEntry {
        id: model.id,
        campaign_id: model.campaign_id,
        action,
        details,
        created_at: model.created_at,
    })
}

/// 构造审计日志 ActiveModel（id 自增，created_at 由调用方统一取时间）
pub fn activity_active_model(
    campaign_id: &str,
    action: ActivityAction,
    details: &serde_json::Value,
    created_at: chrono::DateTime<chrono::Utc>,
) -> campaign_activity::ActiveModel {
    campaign_activity::ActiveModel {
        id: NotSet,
        campaign_id: Set(campaign_id.to_string()),
        action: Set(action.as_ref().to_string()),
        details: Set(details.to_string()),
        created_at: Set(created_at),
    }
}

pub fn model_to_analytics_event(model: analytics::Model) -> Result<AnalyticsEvent> {
    let platform = Platform::from_str(&model.platform).map_err(|_| {
        CampaignHubError::serialization(format!("未知的平台标签: {}", model.platform))
    })?;

    Ok(AnalyticsEvent {
        id: model.id,
        campaign_id: model.campaign_id,
        platform,
        event_type: model.event_type,
        created_at: model.created_at,
    })
}

pub fn model_to_user(model: user::Model) -> UserRef {
    UserRef {
        id: model.id,
        name: model.name,
        email: model.email,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_test_model() -> campaign::Model {
        campaign::Model {
            id: "c-123".to_string(),
            name: "Spring Sale".to_string(),
            brand_name: "Acme".to_string(),
            description: None,
            start_date: Utc::now(),
            end_date: Utc::now(),
            platforms: r#"["WEIBO","XIAOHONGSHU"]"#.to_string(),
            status: "DRAFT".to_string(),
            qr_code_url: None,
            qr_status: "PENDING".to_string(),
            created_by: "u-1".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_model_to_campaign_basic() {
        let campaign = model_to_campaign(create_test_model()).unwrap();
        assert_eq!(campaign.id, "c-123");
        assert_eq!(
            campaign.platforms,
            vec![Platform::Weibo, Platform::Xiaohongshu]
        );
        assert_eq!(campaign.status, CampaignStatus::Draft);
        assert_eq!(campaign.qr_status, QrStatus::Pending);
    }

    #[test]
    fn test_model_to_campaign_rejects_unknown_status() {
        let mut model = create_test_model();
        model.status = "ARCHIVED".to_string();
        assert!(model_to_campaign(model).is_err());
    }

    #[test]
    fn test_model_to_campaign_rejects_bad_platform_json() {
        let mut model = create_test_model();
        model.platforms = "not json".to_string();
        assert!(model_to_campaign(model).is_err());
    }

    #[test]
    fn test_platforms_to_json_round_trip() {
        let platforms = vec![Platform::WechatMoments, Platform::Dianping];
        let json = platforms_to_json(&platforms);
        assert_eq!(json, r#"["WECHAT_MOMENTS","DIANPING"]"#);

        let mut model = create_test_model();
        model.platforms = json;
        let campaign = model_to_campaign(model).unwrap();
        assert_eq!(campaign.platforms, platforms);
    }

    #[test]
    fn test_campaign_round_trip() {
        let model = create_test_model();
        let campaign = model_to_campaign(model.clone()).unwrap();
        let active = campaign_to_active_model(&campaign);

        if let sea_orm::ActiveValue::Set(id) = active.id {
            assert_eq!(id, model.id);
        }
        if let sea_orm::ActiveValue::Set(status) = active.status {
            assert_eq!(status, model.status);
        }
        if let sea_orm::ActiveValue::Set(platforms) = active.platforms {
            assert_eq!(platforms, model.platforms);
        }
    }

    #[test]
    fn test_model_to_activity_parses_details() {
        let model = campaign_activity::Model {
            id: 7,
            campaign_id: "c-123".to_string(),
            action: "CONFIG_UPDATED".to_string(),
            details: r#"{"updatedConfig":["rewardMessage"]}"#.to_string(),
            created_at: Utc::now(),
        };
        let entry = model_to_activity(model).unwrap();
        assert_eq!(entry.action, ActivityAction::ConfigUpdated);
        assert_eq!(entry.details["updatedConfig"][0], "rewardMessage");
    }
}
