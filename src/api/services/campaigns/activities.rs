//! 审计日志查询端点

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use tracing::trace;

use crate::storage::CampaignStore;

use super::helpers::{error_from_campaignhub, error_response, paginate};
use super::types::{ActivityResponse, GetActivitiesQuery, PaginatedResponse};

const DEFAULT_PAGE_SIZE: u64 = 20;

/// 获取活动的审计日志（分页，时间倒序）
pub async fn get_campaign_activities(
    id: web::Path<String>,
    query: web::Query<GetActivitiesQuery>,
    store: web::Data<Arc<CampaignStore>>,
) -> ActixResult<impl Responder> {
    trace!("Campaign API: list activities - {}", id);

    // 先确认活动存在
    match store.get_campaign(&id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(error_response(StatusCode::NOT_FOUND, "Campaign not found"));
        }
        Err(e) => return Ok(error_from_campaignhub(&e)),
    }

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100);

    match store.list_activities(&id, page, limit).await {
        Ok((entries, total)) => {
            let data: Vec<ActivityResponse> =
                entries.into_iter().map(ActivityResponse::from).collect();
            Ok(HttpResponse::Ok()
                .append_header(("Content-Type", "application/json; charset=utf-8"))
                .json(PaginatedResponse {
                    success: true,
                    data,
                    pagination: paginate(Some(page), Some(limit), DEFAULT_PAGE_SIZE, total),
                }))
        }
        Err(e) => Ok(error_from_campaignhub(&e)),
    }
}
