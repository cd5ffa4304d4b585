//! Campaign CRUD 端点
//!
//! 边界校验在这里完成，合法请求才会进入生命周期层。

use std::str::FromStr;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use tracing::{info, trace, warn};

use crate::lifecycle::{CampaignLifecycle, CreateCampaignInput, Identity};
use crate::storage::{CampaignFilter, CampaignPatch, CampaignStatus, CampaignStore, Platform};

use super::helpers::{
    created_response, error_from_campaignhub, error_response, paginate, parse_date,
    success_response, success_with_message,
};
use super::types::{
    CampaignResponse, CreateCampaignRequest, GetCampaignsQuery, PaginatedResponse,
    UpdateCampaignRequest,
};

const DEFAULT_PAGE_SIZE: u64 = 10;

/// 获取活动列表（支持分页、状态过滤和搜索）
pub async fn get_all_campaigns(
    query: web::Query<GetCampaignsQuery>,
    store: web::Data<Arc<CampaignStore>>,
) -> ActixResult<impl Responder> {
    trace!("Campaign API: list campaigns with filters: {:?}", query);

    let status = match query.status.as_deref().filter(|s| !s.is_empty()) {
        Some(tag) => match CampaignStatus::from_str(tag) {
            Ok(status) => Some(status),
            Err(_) => {
                return Ok(error_response(StatusCode::BAD_REQUEST, "Invalid status"));
            }
        },
        None => None,
    };

    let filter = CampaignFilter {
        status,
        search: query.search.clone().filter(|s| !s.is_empty()),
    };

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100);

    match store.list_campaigns(page, limit, filter).await {
        Ok((details, total)) => {
            let data: Vec<CampaignResponse> =
                details.into_iter().map(CampaignResponse::from).collect();
            info!(
                "Campaign API: returning {} campaigns (page {}, total: {})",
                data.len(),
                page,
                total
            );
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

/// 获取单个活动（带配置、创建人和计数）
pub async fn get_campaign(
    id: web::Path<String>,
    store: web::Data<Arc<CampaignStore>>,
) -> ActixResult<impl Responder> {
    trace!("Campaign API: get campaign - {}", id);

    match store.get_campaign_details(&id).await {
        Ok(Some(details)) => Ok(success_response(CampaignResponse::from(details))),
        Ok(None) => Ok(error_response(StatusCode::NOT_FOUND, "Campaign not found")),
        Err(e) => Ok(error_from_campaignhub(&e)),
    }
}

/// 创建活动
pub async fn create_campaign(
    identity: Identity,
    body: web::Json<CreateCampaignRequest>,
    lifecycle: web::Data<Arc<CampaignLifecycle>>,
) -> ActixResult<impl Responder> {
    info!(
        "Campaign API: create campaign request - name: {}, brand: {}",
        body.name, body.brand_name
    );

    if let Err(message) = validate_text(&body.name, "Name", 100)
        .and_then(|_| validate_text(&body.brand_name, "Brand name", 100))
    {
        return Ok(error_response(StatusCode::BAD_REQUEST, &message));
    }

    if let Some(ref description) = body.description
        && description.len() > 500
    {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            "Description must be less than 500 characters",
        ));
    }

    let platforms = match parse_platforms(&body.platforms) {
        Ok(platforms) => platforms,
        Err(message) => return Ok(error_response(StatusCode::BAD_REQUEST, &message)),
    };

    let Some(start_date) = parse_date(&body.start_date) else {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            "Start date must be a valid date",
        ));
    };
    let Some(end_date) = parse_date(&body.end_date) else {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            "End date must be a valid date",
        ));
    };

    let input = CreateCampaignInput {
        name: body.name.trim().to_string(),
        brand_name: body.brand_name.trim().to_string(),
        description: body.description.clone(),
        start_date,
        end_date,
        platforms,
    };

    match lifecycle.create(&identity, input).await {
        Ok(details) => Ok(created_response(
            CampaignResponse::from(details),
            "Campaign created successfully",
        )),
        Err(e) => {
            warn!("Campaign API: create failed - {}", e);
            Ok(error_from_campaignhub(&e))
        }
    }
}

/// 更新活动
pub async fn update_campaign(
    identity: Identity,
    id: web::Path<String>,
    body: web::Json<UpdateCampaignRequest>,
    lifecycle: web::Data<Arc<CampaignLifecycle>>,
    store: web::Data<Arc<CampaignStore>>,
) -> ActixResult<impl Responder> {
    info!("Campaign API: update campaign request - {}", id);

    if let Some(ref name) = body.name
        && let Err(message) = validate_text(name, "Name", 100)
    {
        return Ok(error_response(StatusCode::BAD_REQUEST, &message));
    }
    if let Some(ref brand_name) = body.brand_name
        && let Err(message) = validate_text(brand_name, "Brand name", 100)
    {
        return Ok(error_response(StatusCode::BAD_REQUEST, &message));
    }
    if let Some(ref description) = body.description
        && description.len() > 500
    {
        return Ok(error_response(
            StatusCode::BAD_REQUEST,
            "Description must be less than 500 characters",
        ));
    }

    let platforms = match &body.platforms {
        Some(tags) => match parse_platforms(tags) {
            Ok(platforms) => Some(platforms),
            Err(message) => return Ok(error_response(StatusCode::BAD_REQUEST, &message)),
        },
        None => None,
    };

    let start_date = match &body.start_date {
        Some(s) => match parse_date(s) {
            Some(date) => Some(date),
            None => {
                return Ok(error_response(
                    StatusCode::BAD_REQUEST,
                    "Start date must be a valid date",
                ));
            }
        },
        None => None,
    };
    let end_date = match &body.end_date {
        Some(s) => match parse_date(s) {
            Some(date) => Some(date),
            None => {
                return Ok(error_response(
                    StatusCode::BAD_REQUEST,
                    "End date must be a valid date",
                ));
            }
        },
        None => None,
    };

    let patch = CampaignPatch {
        name: body.name.as_ref().map(|s| s.trim().to_string()),
        brand_name: body.brand_name.as_ref().map(|s| s.trim().to_string()),
        description: body.description.clone(),
        start_date,
        end_date,
        platforms,
    };

    if let Err(e) = lifecycle.update(&identity, &id, patch).await {
        return Ok(error_from_campaignhub(&e));
    }

    // 返回更新后的聚合视图
    match store.get_campaign_details(&id).await {
        Ok(Some(details)) => Ok(success_with_message(
            CampaignResponse::from(details),
            "Campaign updated successfully",
        )),
        Ok(None) => Ok(error_response(StatusCode::NOT_FOUND, "Campaign not found")),
        Err(e) => Ok(error_from_campaignhub(&e)),
    }
}

/// 删除活动（ACTIVE 状态下返回 400）
pub async fn delete_campaign(
    identity: Identity,
    id: web::Path<String>,
    lifecycle: web::Data<Arc<CampaignLifecycle>>,
) -> ActixResult<impl Responder> {
    info!("Campaign API: delete campaign request - {}", id);

    match lifecycle.delete(&identity, &id).await {
        Ok(()) => Ok(super::helpers::json_response::<()>(
            StatusCode::OK,
            true,
            Some("Campaign deleted successfully".to_string()),
            None,
        )),
        Err(e) => Ok(error_from_campaignhub(&e)),
    }
}

/// 文本字段校验：trim 后 1..=max
fn validate_text(value: &str, field: &str, max: usize) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.len() > max {
        return Err(format!(
            "{} is required and must be 1-{} characters",
            field, max
        ));
    }
    Ok(())
}

/// 平台标签解析，至少一个
fn parse_platforms(tags: &[String]) -> Result<Vec<Platform>, String> {
    if tags.is_empty() {
        return Err("At least one platform must be selected".to_string());
    }
    tags.iter()
        .map(|tag| {
            Platform::from_str(tag).map_err(|_| format!("Invalid platform: {}", tag))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_text() {
        assert!(validate_text("Spring Sale", "Name", 100).is_ok());
        assert!(validate_text("", "Name", 100).is_err());
        assert!(validate_text("   ", "Name", 100).is_err());
        assert!(validate_text(&"x".repeat(101), "Name", 100).is_err());
    }

    #[test]
    fn test_parse_platforms() {
        let platforms = parse_platforms(&["WEIBO".to_string(), "DIANPING".to_string()]).unwrap();
        assert_eq!(platforms, vec![Platform::Weibo, Platform::Dianping]);

        assert!(parse_platforms(&[]).is_err());
        assert_eq!(
            parse_platforms(&["TIKTOK".to_string()]).unwrap_err(),
            "Invalid platform: TIKTOK"
        );
    }
}
