//! Application configuration
//!
//! Static configuration loaded once at startup from `config.toml` plus
//! environment overrides, held in a process-global.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Get the global configuration instance
pub fn get_config() -> &'static AppConfig {
    CONFIG
        .get()
        .expect("Config not initialized. Call init_config() first.")
}

/// Get the global configuration if it has been initialized
///
/// Paths that can run before startup finishes (or inside tests that build
/// a store directly) use this and fall back to defaults.
pub fn try_get_config() -> Option<&'static AppConfig> {
    CONFIG.get()
}

/// Initialize the global configuration
pub fn init_config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::load)
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub frontend: FrontendConfig,
    pub lifecycle: LifecycleConfig,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CorsConfig {
    pub enabled: bool,
    /// 允许的来源；空列表或包含 "*" 表示任意来源
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            url: "sqlite://campaignhub.db".to_string(),
            pool_size: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// 二维码 payload URL 的前端基址
    pub base_url: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        FrontendConfig {
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// 是否允许暂停 DRAFT 状态的活动
    pub allow_pause_from_draft: bool,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        LifecycleConfig {
            allow_pause_from_draft: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// 日志文件路径，为空则输出到控制台
    pub file: Option<String>,
    /// text | json
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: None,
            format: "text".to_string(),
        }
    }
}

impl AppConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：传统环境变量 > CH__ 前缀环境变量 > config.toml > 默认值
    /// ENV 前缀：CH，分隔符：__
    /// 示例：CH__SERVER__PORT=9999
    pub fn load() -> Self {
        use config::{Config, Environment, File};

        let path = "config.toml";

        let builder = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::with_name(path).required(false))
            // 2. 从环境变量覆盖，前缀 CH，分隔符 __
            .add_source(
                Environment::with_prefix("CH")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config = match builder.build() {
            Ok(settings) => match settings.try_deserialize::<AppConfig>() {
                Ok(config) => {
                    if std::path::Path::new(path).exists() {
                        eprintln!("[INFO] Configuration loaded from: {}", path);
                    }
                    config
                }
                Err(e) => {
                    eprintln!("[ERROR] Failed to deserialize config: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("[ERROR] Failed to build config: {}", e);
                Self::default()
            }
        };

        config.apply_legacy_env();
        config
    }

    /// 兼容原部署的环境变量：DATABASE_URL / PORT / FRONTEND_URL / HOST
    fn apply_legacy_env(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL")
            && !url.is_empty()
        {
            self.database.url = url;
        }
        if let Ok(port) = std::env::var("PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
        }
        if let Ok(host) = std::env::var("HOST")
            && !host.is_empty()
        {
            self.server.host = host;
        }
        if let Ok(frontend_url) = std::env::var("FRONTEND_URL")
            && !frontend_url.is_empty()
        {
            self.frontend.base_url = frontend_url;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.frontend.base_url, "http://localhost:3000");
        assert!(config.lifecycle.allow_pause_from_draft);
        assert_eq!(config.logging.level, "info");
    }
}
