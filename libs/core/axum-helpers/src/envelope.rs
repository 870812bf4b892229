//! Uniform response envelope.
//!
//! Every response body, success or failure, has the same three fields:
//!
//! ```json
//! { "success": true, "data": { "id": "..." }, "error": null }
//! { "success": false, "data": null, "error": "Category not found" }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Envelope wrapping every payload returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when `data` holds the payload, `false` when `error` holds a message
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Pair the envelope with a status code, e.g. `201 Created`.
    pub fn with_status(self, status: StatusCode) -> (StatusCode, Json<Self>) {
        (status, Json(self))
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = if self.success {
            StatusCode::OK
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_envelope_serializes_payload() {
        let body = serde_json::to_value(ApiResponse::ok(json!({"name": "Books"}))).unwrap();
        assert_eq!(
            body,
            json!({"success": true, "data": {"name": "Books"}, "error": null})
        );
    }

    #[test]
    fn fail_envelope_has_null_data() {
        let body = serde_json::to_value(ApiResponse::<String>::fail("boom")).unwrap();
        assert_eq!(body, json!({"success": false, "data": null, "error": "boom"}));
    }

    #[test]
    fn with_status_keeps_status() {
        let (status, Json(envelope)) = ApiResponse::ok(1).with_status(StatusCode::CREATED);
        assert_eq!(status, StatusCode::CREATED);
        assert!(envelope.success);
    }

    #[test]
    fn failed_envelope_defaults_to_500() {
        let response = ApiResponse::<()>::fail("boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
