//! Campaign API 服务模块
//!
//! 该模块包含活动管理 API 的所有端点，包括：
//! - 活动 CRUD 操作
//! - 生命周期操作（发布、暂停）与二维码读取
//! - 配置管理
//! - 审计日志与分析统计

pub mod activities;
pub mod analytics;
pub mod config_ops;
pub mod crud;
mod helpers;
pub mod lifecycle_ops;
pub mod routes;
mod types;

// 重新导出类型
pub use types::*;

// 重新导出帮助函数
pub use helpers::{
    error_from_campaignhub, error_response, paginate, parse_date, success_response,
};

// 重新导出端点
pub use activities::get_campaign_activities;
pub use analytics::get_campaign_analytics;
pub use config_ops::update_campaign_config;
pub use crud::{
    create_campaign, delete_campaign, get_all_campaigns, get_campaign, update_campaign,
};
pub use lifecycle_ops::{get_campaign_qr_code, pause_campaign, publish_campaign};
