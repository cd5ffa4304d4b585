//! 生命周期操作端点：发布、暂停、二维码读取

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{Responder, Result as ActixResult, web};
use tracing::{info, warn};

use crate::lifecycle::{CampaignLifecycle, Identity};
use crate::storage::{CampaignStore, QrStatus};

use super::helpers::{
    error_from_campaignhub, error_response, success_response, success_with_message,
};
use super::types::{CampaignResponse, QrCodeResponse};

/// 发布活动：状态变为 ACTIVE，二维码缺失时惰性生成
pub async fn publish_campaign(
    identity: Identity,
    id: web::Path<String>,
    lifecycle: web::Data<Arc<CampaignLifecycle>>,
    store: web::Data<Arc<CampaignStore>>,
) -> ActixResult<impl Responder> {
    info!("Campaign API: publish campaign request - {}", id);

    if let Err(e) = lifecycle.publish(&identity, &id).await {
        warn!("Campaign API: publish failed - {}: {}", id, e);
        return Ok(error_from_campaignhub(&e));
    }

    respond_with_details(&store, &id, "Campaign published successfully").await
}

/// 暂停活动
pub async fn pause_campaign(
    identity: Identity,
    id: web::Path<String>,
    lifecycle: web::Data<Arc<CampaignLifecycle>>,
    store: web::Data<Arc<CampaignStore>>,
) -> ActixResult<impl Responder> {
    info!("Campaign API: pause campaign request - {}", id);

    if let Err(e) = lifecycle.pause(&identity, &id).await {
        warn!("Campaign API: pause failed - {}: {}", id, e);
        return Ok(error_from_campaignhub(&e));
    }

    respond_with_details(&store, &id, "Campaign paused successfully").await
}

/// 获取活动二维码
///
/// qr_status 为 PENDING 时在读取路径上补做供给；仍拿不到二维码则 404。
pub async fn get_campaign_qr_code(
    id: web::Path<String>,
    lifecycle: web::Data<Arc<CampaignLifecycle>>,
) -> ActixResult<impl Responder> {
    match lifecycle.ensure_qr(&id).await {
        Ok(campaign) => match (campaign.qr_code_url, campaign.qr_status) {
            (Some(qr_code_url), QrStatus::Ready) => Ok(success_response(QrCodeResponse {
                qr_code_url,
                status: campaign.status.as_ref().to_string(),
            })),
            _ => Ok(error_response(
                StatusCode::NOT_FOUND,
                "QR code not generated yet",
            )),
        },
        Err(e) => {
            warn!("Campaign API: QR code fetch failed - {}: {}", id, e);
            Ok(error_from_campaignhub(&e))
        }
    }
}

async fn respond_with_details(
    store: &CampaignStore,
    id: &str,
    message: &str,
) -> ActixResult<actix_web::HttpResponse> {
    match store.get_campaign_details(id).await {
        Ok(Some(details)) => Ok(success_with_message(CampaignResponse::from(details), message)),
        Ok(None) => Ok(error_response(StatusCode::NOT_FOUND, "Campaign not found")),
        Err(e) => Ok(error_from_campaignhub(&e)),
    }
}
