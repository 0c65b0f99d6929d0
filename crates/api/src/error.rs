//! API error type that maps [`LinkError`] variants to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hublink_types::LinkError;
use serde_json::json;

/// Wrapper around [`LinkError`] that implements [`IntoResponse`].
pub struct ApiError(pub LinkError);

impl ApiError {
    /// Returns `(status, error_type, error_code)` for the wrapped error.
    fn classify(&self) -> (StatusCode, &'static str, &'static str) {
        match &self.0 {
            LinkError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                "invalid_request_error",
                "validation_failed",
            ),
            LinkError::Auth(_) => (StatusCode::BAD_REQUEST, "oauth_error", "provider_denied"),
            LinkError::UnsupportedProvider(_) => (
                StatusCode::BAD_REQUEST,
                "invalid_request_error",
                "unknown_provider",
            ),
            LinkError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                "not_found_error",
                "credentials_not_ready",
            ),
            LinkError::Exchange { .. } => (
                StatusCode::BAD_GATEWAY,
                "upstream_error",
                "token_exchange_failed",
            ),
            LinkError::Fetch { .. } => (
                StatusCode::BAD_GATEWAY,
                "upstream_error",
                "item_fetch_failed",
            ),
            LinkError::Http(_) => (StatusCode::BAD_GATEWAY, "upstream_error", "transport_error"),
            LinkError::Store(_) | LinkError::Serialization(_) | LinkError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "server_error",
                "internal_error",
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, error_code) = self.classify();
        let msg = self.0.to_string();
        (
            status,
            Json(json!({
                "error": {
                    "message": msg,
                    "type": error_type,
                    "code": error_code,
                }
            })),
        )
            .into_response()
    }
}

impl From<LinkError> for ApiError {
    fn from(e: LinkError) -> Self {
        Self(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt as _;

    async fn extract_error_body(err: ApiError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn test_validation_error() {
        let (status, body) =
            extract_error_body(ApiError(LinkError::Validation("Invalid state.".into()))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["type"], "invalid_request_error");
        assert!(
            body["error"]["message"]
                .as_str()
                .unwrap()
                .contains("Invalid state.")
        );
    }

    #[tokio::test]
    async fn test_not_found_error_is_404() {
        let (status, body) =
            extract_error_body(ApiError(LinkError::NotFound("No credentials found.".into())))
                .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "credentials_not_ready");
        assert_eq!(body["error"]["message"], "No credentials found.");
    }

    #[tokio::test]
    async fn test_exchange_error_is_bad_gateway() {
        let (status, body) = extract_error_body(ApiError(LinkError::Exchange {
            status: 400,
            body: "bad code".into(),
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "token_exchange_failed");
    }

    #[tokio::test]
    async fn test_fetch_error_is_bad_gateway() {
        let (status, body) = extract_error_body(ApiError(LinkError::Fetch {
            status: 401,
            body: "expired".into(),
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "item_fetch_failed");
    }

    #[tokio::test]
    async fn test_unknown_provider_is_400() {
        let (status, body) = extract_error_body(ApiError(LinkError::UnsupportedProvider(
            "salesforce".into(),
        )))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "unknown_provider");
    }

    #[tokio::test]
    async fn test_store_error_is_500() {
        let (status, body) =
            extract_error_body(ApiError(LinkError::Store("unreachable".into()))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["type"], "server_error");
    }
}
