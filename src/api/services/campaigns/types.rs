//! Campaign API 类型定义
//!
//! Wire format keeps the dashboard's camelCase field names; dates are
//! RFC3339 strings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::storage::{
    ActivityEntry, AnalyticsEvent, Campaign, CampaignConfig, CampaignDetails, UserRef,
};

/// 统一响应信封：`{success, data?, message?}`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// 分页响应信封：`{success, data, pagination}`
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PaginatedResponse<T> {
    pub success: bool,
    pub data: T,
    pub pagination: PaginationInfo,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PaginationInfo {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    /// ceil(total / limit)
    pub pages: u64,
}

// ============ 请求参数 ============

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct GetCampaignsQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampaignRequest {
    pub name: String,
    pub brand_name: String,
    pub description: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub platforms: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCampaignRequest {
    pub name: Option<String>,
    pub brand_name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub platforms: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfigRequest {
    pub max_images_per_post: Option<i32>,
    pub max_posts_per_user: Option<i32>,
    pub reward_message: Option<String>,
    #[serde(rename = "customerServiceQR")]
    pub customer_service_qr: Option<String>,
    pub background_image: Option<String>,
    pub template_type: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub platform: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct GetActivitiesQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

// ============ 响应结构 ============

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<UserRef> for UserResponse {
    fn from(user: UserRef) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub campaign_id: String,
    pub max_images_per_post: i32,
    pub max_posts_per_user: i32,
    pub reward_message: Option<String>,
    #[serde(rename = "customerServiceQR")]
    pub customer_service_qr: Option<String>,
    pub background_image: Option<String>,
    pub template_type: String,
    pub updated_at: String,
}

impl From<CampaignConfig> for ConfigResponse {
    fn from(config: CampaignConfig) -> Self {
        ConfigResponse {
            campaign_id: config.campaign_id,
            max_images_per_post: config.max_images_per_post,
            max_posts_per_user: config.max_posts_per_user,
            reward_message: config.reward_message,
            customer_service_qr: config.customer_service_qr,
            background_image: config.background_image,
            template_type: config.template_type.as_ref().to_string(),
            updated_at: config.updated_at.to_rfc3339(),
        }
    }
}

/// 活动及其关联数据的计数
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CountsResponse {
    pub activities: u64,
    pub analytics: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CampaignResponse {
    pub id: String,
    pub name: String,
    pub brand_name: String,
    pub description: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub platforms: Vec<String>,
    pub status: String,
    pub qr_code_url: Option<String>,
    pub qr_status: String,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<CountsResponse>,
}

impl From<Campaign> for CampaignResponse {
    fn from(c: Campaign) -> Self {
        CampaignResponse {
            id: c.id,
            name: c.name,
            brand_name: c.brand_name,
            description: c.description,
            start_date: c.start_date.to_rfc3339(),
            end_date: c.end_date.to_rfc3339(),
            platforms: c.platforms.iter().map(|p| p.as_ref().to_string()).collect(),
            status: c.status.as_ref().to_string(),
            qr_code_url: c.qr_code_url,
            qr_status: c.qr_status.as_ref().to_string(),
            created_by: c.created_by,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
            config: None,
            user: None,
            counts: None,
        }
    }
}

impl From<CampaignDetails> for CampaignResponse {
    fn from(details: CampaignDetails) -> Self {
        let mut response = CampaignResponse::from(details.campaign);
        response.config = details.config.map(ConfigResponse::from);
        response.user = details.user.map(UserResponse::from);
        response.counts = Some(CountsResponse {
            activities: details.activity_count,
            analytics: details.analytics_count,
        });
        response
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub id: i64,
    pub campaign_id: String,
    pub action: String,
    pub details: serde_json::Value,
    pub created_at: String,
}

impl From<ActivityEntry> for ActivityResponse {
    fn from(entry: ActivityEntry) -> Self {
        ActivityResponse {
            id: entry.id,
            campaign_id: entry.campaign_id,
            action: entry.action.as_ref().to_string(),
            details: entry.details,
            created_at: entry.created_at.to_rfc3339(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEventResponse {
    pub id: i64,
    pub campaign_id: String,
    pub platform: String,
    pub event_type: String,
    pub created_at: String,
}

impl From<AnalyticsEvent> for AnalyticsEventResponse {
    fn from(event: AnalyticsEvent) -> Self {
        AnalyticsEventResponse {
            id: event.id,
            campaign_id: event.campaign_id,
            platform: event.platform.as_ref().to_string(),
            event_type: event.event_type,
            created_at: event.created_at.to_rfc3339(),
        }
    }
}

/// 分析端点的聚合响应
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummaryResponse {
    pub analytics: Vec<AnalyticsEventResponse>,
    pub aggregated_data: HashMap<String, u64>,
    pub total_records: usize,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeResponse {
    pub qr_code_url: String,
    pub status: String,
}
