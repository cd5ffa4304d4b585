//! HTTP 服务模块

pub mod campaigns;
pub mod health;

use chrono::{DateTime, Utc};

/// 程序启动时间，健康检查用
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: DateTime<Utc>,
}
