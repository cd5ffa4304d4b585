use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum CampaignHubError {
    Validation(String),
    Authentication(String),
    NotFound(String),
    Conflict(String),
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    QrEncoding(String),
    Serialization(String),
    DateParse(String),
}

impl CampaignHubError {
    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            CampaignHubError::Validation(_) => "Validation Error",
            CampaignHubError::Authentication(_) => "Authentication Error",
            CampaignHubError::NotFound(_) => "Resource Not Found",
            CampaignHubError::Conflict(_) => "State Conflict",
            CampaignHubError::DatabaseConfig(_) => "Database Configuration Error",
            CampaignHubError::DatabaseConnection(_) => "Database Connection Error",
            CampaignHubError::DatabaseOperation(_) => "Database Operation Error",
            CampaignHubError::QrEncoding(_) => "QR Encoding Error",
            CampaignHubError::Serialization(_) => "Serialization Error",
            CampaignHubError::DateParse(_) => "Date Parse Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            CampaignHubError::Validation(msg) => msg,
            CampaignHubError::Authentication(msg) => msg,
            CampaignHubError::NotFound(msg) => msg,
            CampaignHubError::Conflict(msg) => msg,
            CampaignHubError::DatabaseConfig(msg) => msg,
            CampaignHubError::DatabaseConnection(msg) => msg,
            CampaignHubError::DatabaseOperation(msg) => msg,
            CampaignHubError::QrEncoding(msg) => msg,
            CampaignHubError::Serialization(msg) => msg,
            CampaignHubError::DateParse(msg) => msg,
        }
    }

    /// 映射到 HTTP 状态码
    ///
    /// NotFound -> 404, Conflict/Validation -> 400, Authentication -> 401,
    /// 其余一律 500。
    pub fn http_status(&self) -> StatusCode {
        match self {
            CampaignHubError::NotFound(_) => StatusCode::NOT_FOUND,
            CampaignHubError::Conflict(_) | CampaignHubError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            CampaignHubError::Authentication(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 客户端可见的错误消息
    ///
    /// 4xx 返回具体原因，5xx 返回固定文案，上游细节只进服务端日志。
    pub fn client_message(&self) -> &str {
        match self {
            CampaignHubError::NotFound(_)
            | CampaignHubError::Conflict(_)
            | CampaignHubError::Validation(_)
            | CampaignHubError::Authentication(_) => self.message(),
            _ => "Internal server error",
        }
    }
}

impl fmt::Display for CampaignHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for CampaignHubError {}

// 便捷的构造函数
impl CampaignHubError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        CampaignHubError::Validation(msg.into())
    }

    pub fn authentication<T: Into<String>>(msg: T) -> Self {
        CampaignHubError::Authentication(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        CampaignHubError::NotFound(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        CampaignHubError::Conflict(msg.into())
    }

    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        CampaignHubError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        CampaignHubError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        CampaignHubError::DatabaseOperation(msg.into())
    }

    pub fn qr_encoding<T: Into<String>>(msg: T) -> Self {
        CampaignHubError::QrEncoding(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        CampaignHubError::Serialization(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        CampaignHubError::DateParse(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for CampaignHubError {
    fn from(err: sea_orm::DbErr) -> Self {
        CampaignHubError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CampaignHubError {
    fn from(err: serde_json::Error) -> Self {
        CampaignHubError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for CampaignHubError {
    fn from(err: chrono::ParseError) -> Self {
        CampaignHubError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CampaignHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            CampaignHubError::not_found("x").http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CampaignHubError::conflict("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CampaignHubError::validation("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CampaignHubError::authentication("x").http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            CampaignHubError::database_operation("x").http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_message_hides_upstream_details() {
        let err = CampaignHubError::database_operation("connection reset by peer");
        assert_eq!(err.client_message(), "Internal server error");

        let err = CampaignHubError::conflict("Campaign is already active");
        assert_eq!(err.client_message(), "Campaign is already active");
    }

    #[test]
    fn test_from_db_err() {
        let err: CampaignHubError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, CampaignHubError::DatabaseOperation(_)));
    }
}
