//! Identity extraction for mutating endpoints.
//!
//! Authentication itself lives in an external gateway; it forwards the
//! verified caller id in `X-User-Id`. Every mutating handler takes an
//! `Identity` parameter, so a request without the header is rejected with
//! 401 before any lifecycle code runs. There is deliberately no fallback
//! user id.

use std::fmt;
use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError};

use crate::api::services::campaigns::ApiResponse;
use crate::lifecycle::Identity;

/// 网关注入的已验证用户 ID 头
pub const USER_ID_HEADER: &str = "X-User-Id";

#[derive(Debug)]
pub struct AuthenticationRequired;

impl fmt::Display for AuthenticationRequired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Authentication required")
    }
}

impl ResponseError for AuthenticationRequired {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Unauthorized()
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(ApiResponse::<()> {
                success: false,
                data: None,
                message: Some("Authentication required".to_string()),
            })
    }
}

impl FromRequest for Identity {
    type Error = AuthenticationRequired;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user_id = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        ready(match user_id {
            Some(user_id) => Ok(Identity { user_id }),
            None => Err(AuthenticationRequired),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_extracts_user_id_header() {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, "u-42"))
            .to_http_request();
        let identity = Identity::extract(&req).await.unwrap();
        assert_eq!(identity.user_id, "u-42");
    }

    #[actix_web::test]
    async fn test_missing_header_is_rejected() {
        let req = TestRequest::default().to_http_request();
        assert!(Identity::extract(&req).await.is_err());
    }

    #[actix_web::test]
    async fn test_blank_header_is_rejected() {
        let req = TestRequest::default()
            .insert_header((USER_ID_HEADER, "   "))
            .to_http_request();
        assert!(Identity::extract(&req).await.is_err());
    }
}
