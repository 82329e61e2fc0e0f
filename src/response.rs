//! The JSON envelope shared by every API response.
//!
//! Successful responses look like
//! `{"statusCode": 200, "message": "...", "data": ..., "success": true}` and
//! errors like `{"statusCode": 400, "message": "...", "success": false}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// A successful response carrying `data`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiResponse<T> {
    #[serde(skip)]
    status: StatusCode,
    status_code: u16,
    message: String,
    data: T,
    success: bool,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a `200 OK` response.
    pub(crate) fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::OK,
            status_code: StatusCode::OK.as_u16(),
            message: message.into(),
            data,
            success: true,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// The body of an error response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorBody {
    #[serde(skip)]
    status: StatusCode,
    status_code: u16,
    message: String,
    success: bool,
}

impl ErrorBody {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            status_code: status.as_u16(),
            message: message.into(),
            success: false,
        }
    }
}

impl IntoResponse for ErrorBody {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use serde_json::{Value, json};

    use super::{ApiResponse, ErrorBody};

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not read response body");

        serde_json::from_slice(&bytes).expect("Response body is not JSON")
    }

    #[tokio::test]
    async fn ok_response_wraps_data() {
        let response = ApiResponse::ok("Fetched", vec![1, 2, 3]).into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"statusCode": 200, "message": "Fetched", "data": [1, 2, 3], "success": true})
        );
    }

    #[tokio::test]
    async fn error_response_status_matches_body() {
        let response = ErrorBody::new(StatusCode::BAD_REQUEST, "Invalid month").into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["statusCode"], 400);
    }

    #[tokio::test]
    async fn error_response_uses_status_code() {
        let response = ErrorBody::new(StatusCode::NOT_FOUND, "No transactions found").into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({"statusCode": 404, "message": "No transactions found", "success": false})
        );
    }
}
