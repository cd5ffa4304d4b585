//! 分析统计端点
//!
//! 事件由外部平台集成写入，这里只读：按条件过滤的事件列表加上按
//! 事件类型分组的聚合计数。

use std::str::FromStr;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{Responder, Result as ActixResult, web};
use tracing::trace;

use crate::storage::{AnalyticsFilter, CampaignStore, Platform};

use super::helpers::{error_from_campaignhub, error_response, parse_date, success_response};
use super::types::{AnalyticsEventResponse, AnalyticsQuery, AnalyticsSummaryResponse};

/// 获取活动的分析数据（事件列表 + 按类型聚合）
pub async fn get_campaign_analytics(
    id: web::Path<String>,
    query: web::Query<AnalyticsQuery>,
    store: web::Data<Arc<CampaignStore>>,
) -> ActixResult<impl Responder> {
    trace!("Campaign API: analytics query - {}: {:?}", id, query);

    match store.get_campaign(&id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(error_response(StatusCode::NOT_FOUND, "Campaign not found"));
        }
        Err(e) => return Ok(error_from_campaignhub(&e)),
    }

    let start_date = match query.start_date.as_deref().filter(|s| !s.is_empty()) {
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
    let end_date = match query.end_date.as_deref().filter(|s| !s.is_empty()) {
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
    let platform = match query.platform.as_deref().filter(|s| !s.is_empty()) {
        Some(tag) => match Platform::from_str(tag) {
            Ok(platform) => Some(platform),
            Err(_) => {
                return Ok(error_response(StatusCode::BAD_REQUEST, "Invalid platform"));
            }
        },
        None => None,
    };

    let filter = AnalyticsFilter {
        start_date,
        end_date,
        platform,
    };

    let events = match store.list_analytics(&id, &filter).await {
        Ok(events) => events,
        Err(e) => return Ok(error_from_campaignhub(&e)),
    };
    let aggregated_data = match store.aggregate_analytics(&id, &filter).await {
        Ok(agg) => agg,
        Err(e) => return Ok(error_from_campaignhub(&e)),
    };

    let total_records = events.len();
    Ok(success_response(AnalyticsSummaryResponse {
        analytics: events
            .into_iter()
            .map(AnalyticsEventResponse::from)
            .collect(),
        aggregated_data,
        total_records,
    }))
}
