//! 健康检查端点

use std::sync::Arc;

use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use serde::{Deserialize, Serialize};

use crate::storage::CampaignStore;

use super::AppStartTime;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthStorageCheck {
    pub status: String,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthChecks {
    pub storage: HealthStorageCheck,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub uptime: u64,
    pub checks: HealthChecks,
}

/// GET /api/health - 存活探针 + 数据库 ping
pub async fn health_check(
    store: web::Data<Arc<CampaignStore>>,
    start_time: web::Data<AppStartTime>,
) -> ActixResult<impl Responder> {
    let now = chrono::Utc::now();
    let uptime = (now - start_time.start_datetime).num_seconds().max(0) as u64;

    let storage_check = match store.ping().await {
        Ok(()) => HealthStorageCheck {
            status: "ok".to_string(),
            backend: store.backend_name().to_string(),
            error: None,
        },
        Err(e) => HealthStorageCheck {
            status: "error".to_string(),
            backend: store.backend_name().to_string(),
            error: Some(e.to_string()),
        },
    };

    let healthy = storage_check.status == "ok";
    let response = HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        timestamp: now.to_rfc3339(),
        uptime,
        checks: HealthChecks {
            storage: storage_check,
        },
    };

    let mut builder = if healthy {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    Ok(builder
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(response))
}
