//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod analytics;
mod connection;
mod converters;
mod mutations;
mod query;

use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::errors::{CampaignHubError, Result};
use crate::storage::models::CampaignStatus;

pub use analytics::AnalyticsFilter;
pub use connection::{connect_generic, connect_sqlite, run_migrations};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(CampaignHubError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// 活动列表过滤条件
#[derive(Default, Clone, Debug)]
pub struct CampaignFilter {
    /// 按状态过滤
    pub status: Option<CampaignStatus>,
    /// 模糊搜索 name / brand_name / description
    pub search: Option<String>,
}

/// SeaORM-based campaign storage backend
#[derive(Clone)]
pub struct CampaignStore {
    db: DatabaseConnection,
    backend_name: String,
}

impl CampaignStore {
    pub async fn new(database_url: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(CampaignHubError::database_config(
                "DATABASE_URL 未设置".to_string(),
            ));
        }

        let backend_name = infer_backend_from_url(database_url)?;

        // 根据不同数据库类型配置连接选项
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, &backend_name).await?
        };

        let store = CampaignStore { db, backend_name };

        // 运行迁移
        run_migrations(&store.db).await?;

        warn!("{} Storage initialized.", store.backend_name.to_uppercase());
        Ok(store)
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// 获取数据库连接（健康检查等需要直接访问数据库的场景）
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// 健康检查：对数据库做一次轻量 ping
    pub async fn ping(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| CampaignHubError::database_connection(format!("数据库 ping 失败: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_backend_from_url() {
        assert_eq!(infer_backend_from_url("sqlite://data.db").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url(":memory:").unwrap(), "sqlite");
        assert_eq!(
            infer_backend_from_url("mysql://root@localhost/campaigns").unwrap(),
            "mysql"
        );
        assert_eq!(
            infer_backend_from_url("postgres://localhost/campaigns").unwrap(),
            "postgres"
        );
        assert!(infer_backend_from_url("redis://localhost").is_err());
    }
}
