//! Domain models shared between the lifecycle manager, the storage
//! backend and the HTTP surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// 活动生命周期状态
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, EnumIter, AsRefStr,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Pending,
    Active,
    Paused,
    /// 终态，当前没有任何操作会产生它
    Ended,
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// 投放平台（固定集合）
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    AsRefStr,
    EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    Xiaohongshu,
    WechatMoments,
    Dianping,
    Weibo,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// 二维码供给子状态
///
/// PENDING 表示尚未生成或上次生成失败，READY 表示 qr_code_url 可用。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, AsRefStr, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum QrStatus {
    #[default]
    Pending,
    Ready,
}

/// 落地页模板类型
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, AsRefStr, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateType {
    #[default]
    Default,
    Custom,
}

/// 审计日志动作标签
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityAction {
    Created,
    Updated,
    Published,
    Paused,
    ConfigUpdated,
}

impl std::fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub brand_name: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub platforms: Vec<Platform>,
    pub status: CampaignStatus,
    pub qr_code_url: Option<String>,
    pub qr_status: QrStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignConfig {
    pub campaign_id: String,
    pub max_images_per_post: i32,
    pub max_posts_per_user: i32,
    pub reward_message: Option<String>,
    pub customer_service_qr: Option<String>,
    pub background_image: Option<String>,
    pub template_type: TemplateType,
    pub updated_at: DateTime<Utc>,
}

impl CampaignConfig {
    /// 活动创建时物化的默认配置
    pub fn defaults(campaign_id: &str, now: DateTime<Utc>) -> Self {
        CampaignConfig {
            campaign_id: campaign_id.to_string(),
            max_images_per_post: 3,
            max_posts_per_user: 1,
            reward_message: None,
            customer_service_qr: None,
            background_image: None,
            template_type: TemplateType::Default,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: i64,
    pub campaign_id: String,
    pub action: ActivityAction,
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub id: i64,
    pub campaign_id: String,
    pub platform: Platform,
    pub event_type: String,
    pub created_at: DateTime<Utc>,
}

/// 最小用户引用，身份本身由外部认证方管理
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRef {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// 读取路径返回的聚合视图：活动 + 配置 + 创建人 + 计数
#[derive(Debug, Clone, Serialize)]
pub struct CampaignDetails {
    pub campaign: Campaign,
    pub config: Option<CampaignConfig>,
    pub user: Option<UserRef>,
    pub activity_count: u64,
    pub analytics_count: u64,
}

/// Campaign 可变字段的部分更新
///
/// `None` 表示保持现值。status 不在其中，状态只经由生命周期操作变更。
#[derive(Debug, Clone, Default)]
pub struct CampaignPatch {
    pub name: Option<String>,
    pub brand_name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub platforms: Option<Vec<Platform>>,
}

impl CampaignPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.brand_name.is_none()
            && self.description.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.platforms.is_none()
    }

    /// 本次修改涉及的字段名（审计日志记录字段名而非值）
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.brand_name.is_some() {
            fields.push("brandName");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.start_date.is_some() {
            fields.push("startDate");
        }
        if self.end_date.is_some() {
            fields.push("endDate");
        }
        if self.platforms.is_some() {
            fields.push("platforms");
        }
        fields
    }
}

/// CampaignConfig 的部分更新
#[derive(Debug, Clone, Default)]
pub struct ConfigPatch {
    pub max_images_per_post: Option<i32>,
    pub max_posts_per_user: Option<i32>,
    pub reward_message: Option<String>,
    pub customer_service_qr: Option<String>,
    pub background_image: Option<String>,
    pub template_type: Option<TemplateType>,
}

impl ConfigPatch {
    pub fn is_empty(&self) -> bool {
        self.max_images_per_post.is_none()
            && self.max_posts_per_user.is_none()
            && self.reward_message.is_none()
            && self.customer_service_qr.is_none()
            && self.background_image.is_none()
            && self.template_type.is_none()
    }

    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.max_images_per_post.is_some() {
            fields.push("maxImagesPerPost");
        }
        if self.max_posts_per_user.is_some() {
            fields.push("maxPostsPerUser");
        }
        if self.reward_message.is_some() {
            fields.push("rewardMessage");
        }
        if self.customer_service_qr.is_some() {
            fields.push("customerServiceQR");
        }
        if self.background_image.is_some() {
            fields.push("backgroundImage");
        }
        if self.template_type.is_some() {
            fields.push("templateType");
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_round_trip() {
        for status in [
            CampaignStatus::Draft,
            CampaignStatus::Pending,
            CampaignStatus::Active,
            CampaignStatus::Paused,
            CampaignStatus::Ended,
        ] {
            let tag = status.as_ref().to_string();
            assert_eq!(CampaignStatus::from_str(&tag).unwrap(), status);
        }
        assert_eq!(CampaignStatus::Active.as_ref(), "ACTIVE");
    }

    #[test]
    fn test_platform_tags_match_wire_format() {
        assert_eq!(Platform::Xiaohongshu.as_ref(), "XIAOHONGSHU");
        assert_eq!(Platform::WechatMoments.as_ref(), "WECHAT_MOMENTS");
        assert_eq!(Platform::Dianping.as_ref(), "DIANPING");
        assert_eq!(Platform::Weibo.as_ref(), "WEIBO");
        assert!(Platform::from_str("DOUYIN").is_err());
    }

    #[test]
    fn test_activity_action_tags() {
        assert_eq!(ActivityAction::ConfigUpdated.as_ref(), "CONFIG_UPDATED");
        assert_eq!(ActivityAction::Created.as_ref(), "CREATED");
    }

    #[test]
    fn test_config_defaults() {
        let now = Utc::now();
        let config = CampaignConfig::defaults("c1", now);
        assert_eq!(config.max_images_per_post, 3);
        assert_eq!(config.max_posts_per_user, 1);
        assert_eq!(config.template_type, TemplateType::Default);
        assert!(config.reward_message.is_none());
    }

    #[test]
    fn test_patch_changed_fields() {
        let patch = CampaignPatch {
            name: Some("new".to_string()),
            end_date: Some(Utc::now()),
            ..Default::default()
        };
        assert_eq!(patch.changed_fields(), vec!["name", "endDate"]);
        assert!(!patch.is_empty());
        assert!(CampaignPatch::default().is_empty());
    }
}
