//! Campaign API 路由配置

use actix_web::web;

use super::activities::get_campaign_activities;
use super::analytics::get_campaign_analytics;
use super::config_ops::update_campaign_config;
use super::crud::{
    create_campaign, delete_campaign, get_all_campaigns, get_campaign, update_campaign,
};
use super::lifecycle_ops::{get_campaign_qr_code, pause_campaign, publish_campaign};

/// 活动管理路由 `/campaigns`
///
/// 包含：
/// - GET /campaigns - 获取活动列表（分页 / 过滤 / 搜索）
/// - POST /campaigns - 创建活动
/// - GET /campaigns/{id} - 获取单个活动
/// - PUT /campaigns/{id} - 更新活动
/// - DELETE /campaigns/{id} - 删除活动
/// - POST /campaigns/{id}/publish - 发布
/// - POST /campaigns/{id}/pause - 暂停
/// - GET /campaigns/{id}/qr-code - 获取二维码
/// - GET /campaigns/{id}/analytics - 获取分析数据
/// - GET /campaigns/{id}/activities - 获取审计日志
/// - PUT /campaigns/{id}/config - 更新配置
pub fn campaign_routes() -> actix_web::Scope {
    web::scope("/campaigns")
        .route("", web::get().to(get_all_campaigns))
        .route("", web::post().to(create_campaign))
        .route("/{id}/publish", web::post().to(publish_campaign))
        .route("/{id}/pause", web::post().to(pause_campaign))
        .route("/{id}/qr-code", web::get().to(get_campaign_qr_code))
        .route("/{id}/analytics", web::get().to(get_campaign_analytics))
        .route("/{id}/activities", web::get().to(get_campaign_activities))
        .route("/{id}/config", web::put().to(update_campaign_config))
        .route("/{id}", web::get().to(get_campaign))
        .route("/{id}", web::put().to(update_campaign))
        .route("/{id}", web::delete().to(delete_campaign))
}

/// API 根路由 `/api`
pub fn api_routes() -> actix_web::Scope {
    web::scope("/api")
        .service(campaign_routes())
        .route("/health", web::get().to(super::super::health::health_check))
}
