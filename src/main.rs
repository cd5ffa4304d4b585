use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Compress, web};
use anyhow::{Context, Result};
use tracing::{info, warn};

use campaignhub::api::services::AppStartTime;
use campaignhub::api::services::campaigns::routes::api_routes;
use campaignhub::config::{self, CorsConfig};
use campaignhub::lifecycle::{CampaignLifecycle, PngDataUriEncoder, TransitionPolicy};
use campaignhub::storage::CampaignStore;
use campaignhub::system::init_logging;

/// Build CORS middleware from configuration
///
/// When CORS is disabled, the browser's default same-origin policy applies.
fn build_cors_middleware(cors_config: &CorsConfig) -> Cors {
    if !cors_config.enabled {
        return Cors::default();
    }

    let is_any_origin =
        cors_config.allowed_origins.is_empty() || cors_config.allowed_origins.iter().any(|o| o == "*");

    let mut cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    if is_any_origin {
        cors = cors.allow_any_origin();
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

#[actix_web::main]
async fn main() -> Result<()> {
    // 记录程序启动时间
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    dotenvy::dotenv().ok();
    let app_config = config::init_config();

    // 日志 guard 需要存活到进程结束
    let _log_guard = init_logging(&app_config.logging);

    // 初始化存储后端（含迁移）
    let store = Arc::new(
        CampaignStore::new(&app_config.database.url)
            .await
            .context("Failed to initialize storage backend")?,
    );

    // 生命周期管理器：存储 + QR 编码器 + 迁移策略
    let lifecycle = Arc::new(CampaignLifecycle::new(
        store.clone(),
        Arc::new(PngDataUriEncoder::default()),
        app_config.frontend.base_url.clone(),
        TransitionPolicy {
            allow_pause_from_draft: app_config.lifecycle.allow_pause_from_draft,
        },
    ));

    if app_config.cors.enabled {
        warn!("CORS enabled, allowed origins: {:?}", app_config.cors.allowed_origins);
    }

    let bind_address = format!("{}:{}", app_config.server.host, app_config.server.port);
    info!("Starting server at http://{}", bind_address);
    info!("QR payload base URL: {}", app_config.frontend.base_url);

    let cors_config = app_config.cors.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(build_cors_middleware(&cors_config))
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(lifecycle.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .service(api_routes())
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await?;

    Ok(())
}
