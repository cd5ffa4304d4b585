//! 活动配置更新端点

use std::str::FromStr;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{Responder, Result as ActixResult, web};
use tracing::info;

use crate::lifecycle::{CampaignLifecycle, Identity};
use crate::storage::{ConfigPatch, TemplateType};

use super::helpers::{error_from_campaignhub, error_response, success_with_message};
use super::types::{ConfigResponse, UpdateConfigRequest};

/// 部分更新活动配置
///
/// 配置行在活动创建时物化，这里是纯更新。
pub async fn update_campaign_config(
    identity: Identity,
    id: web::Path<String>,
    body: web::Json<UpdateConfigRequest>,
    lifecycle: web::Data<Arc<CampaignLifecycle>>,
) -> ActixResult<impl Responder> {
    info!("Campaign API: update config request - {}", id);

    if let Some(max_images) = body.max_images_per_post
        && !(1..=10).contains(&max_images)
    {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            "Max images per post must be between 1 and 10",
        ));
    }
    if let Some(max_posts) = body.max_posts_per_user
        && !(1..=10).contains(&max_posts)
    {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            "Max posts per user must be between 1 and 10",
        ));
    }
    if let Some(ref reward_message) = body.reward_message
        && reward_message.len() > 500
    {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            "Reward message must be less than 500 characters",
        ));
    }
    if let Some(ref customer_service_qr) = body.customer_service_qr
        && url::Url::parse(customer_service_qr).is_err()
    {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            "Customer service QR must be a valid URL",
        ));
    }
    if let Some(ref background_image) = body.background_image
        && url::Url::parse(background_image).is_err()
    {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            "Background image must be a valid URL",
        ));
    }

    let template_type = match body.template_type.as_deref() {
        Some(tag) => match TemplateType::from_str(tag) {
            Ok(template_type) => Some(template_type),
            Err(_) => {
                return Ok(error_response(
                    StatusCode::BAD_REQUEST,
                    "Invalid template type",
                ));
            }
        },
        None => None,
    };

    let patch = ConfigPatch {
        max_images_per_post: body.max_images_per_post,
        max_posts_per_user: body.max_posts_per_user,
        reward_message: body.reward_message.clone(),
        customer_service_qr: body.customer_service_qr.clone(),
        background_image: body.background_image.clone(),
        template_type,
    };

    match lifecycle.update_config(&identity, &id, patch).await {
        Ok(config) => Ok(success_with_message(
            ConfigResponse::from(config),
            "Campaign configuration updated successfully",
        )),
        Err(e) => Ok(error_from_campaignhub(&e)),
    }
}
