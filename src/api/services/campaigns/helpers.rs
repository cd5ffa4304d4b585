//! Campaign API 帮助函数

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;

use crate::errors::CampaignHubError;

use super::types::{ApiResponse, PaginationInfo};

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    success: bool,
    message: Option<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            success,
            data,
            message,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, true, None, Some(data))
}

/// 构建带提示消息的成功响应
pub fn success_with_message<T: Serialize>(data: T, message: &str) -> HttpResponse {
    json_response(StatusCode::OK, true, Some(message.to_string()), Some(data))
}

/// 构建 201 创建成功响应
pub fn created_response<T: Serialize>(data: T, message: &str) -> HttpResponse {
    json_response(
        StatusCode::CREATED,
        true,
        Some(message.to_string()),
        Some(data),
    )
}

/// 构建错误响应
pub fn error_response(status: StatusCode, message: &str) -> HttpResponse {
    json_response::<()>(status, false, Some(message.to_string()), None)
}

/// 从 CampaignHubError 构建错误响应（自动映射 HTTP 状态码）
///
/// 5xx 的细节只进日志，客户端拿到固定文案。
pub fn error_from_campaignhub(err: &CampaignHubError) -> HttpResponse {
    let status = err.http_status();
    if status.is_server_error() {
        error!("Campaign API: internal error - {}", err);
    }
    error_response(status, err.client_message())
}

/// 分页参数规整 + pages 计算
///
/// page 至少为 1，limit 限制在 1..=100。
pub fn paginate(page: Option<u64>, limit: Option<u64>, default_limit: u64, total: u64) -> PaginationInfo {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(default_limit).clamp(1, 100);
    PaginationInfo {
        page,
        limit,
        total,
        pages: total.div_ceil(limit),
    }
}

/// 解析日期参数，支持 RFC3339 和 `YYYY-MM-DD`
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_rfc3339() {
        let parsed = parse_date("2024-03-01T08:30:00Z").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-01T08:30:00+00:00");
    }

    #[test]
    fn test_parse_date_date_only() {
        let parsed = parse_date("2024-03-01").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-03-01T00:00:00+00:00");
    }

    #[test]
    fn test_parse_date_invalid() {
        assert!(parse_date("03/01/2024").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_paginate_defaults() {
        let info = paginate(None, None, 10, 15);
        assert_eq!(info.page, 1);
        assert_eq!(info.limit, 10);
        assert_eq!(info.pages, 2);
    }

    #[test]
    fn test_paginate_pages_is_ceil() {
        assert_eq!(paginate(Some(2), Some(10), 10, 15).pages, 2);
        assert_eq!(paginate(Some(1), Some(10), 10, 20).pages, 2);
        assert_eq!(paginate(Some(1), Some(10), 10, 0).pages, 0);
        assert_eq!(paginate(Some(1), Some(10), 10, 1).pages, 1);
    }

    #[test]
    fn test_paginate_clamps_limit() {
        assert_eq!(paginate(Some(1), Some(1000), 10, 15).limit, 100);
        assert_eq!(paginate(Some(0), Some(0), 10, 15).page, 1);
        assert_eq!(paginate(Some(0), Some(0), 10, 15).limit, 1);
    }

    #[test]
    fn test_error_response_status() {
        let response = error_response(StatusCode::NOT_FOUND, "Campaign not found");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_from_campaignhub_maps_conflict() {
        let err = CampaignHubError::conflict("Campaign is already active");
        let response = error_from_campaignhub(&err);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
