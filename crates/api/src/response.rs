//! Shared response envelope for API handlers.
//!
//! All success responses carry the same shape:
//! `{ "statusCode": ..., "data": ..., "message": ..., "success": true }`.
//! Error responses use the mirror shape produced by
//! [`crate::error::AppError`]'s `IntoResponse` impl.

use axum::http::StatusCode;
use serde::Serialize;

/// Standard success envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub status_code: u16,
    pub data: T,
    pub message: String,
    pub success: bool,
}

impl<T: Serialize> ApiResponse<T> {
    /// Build a success envelope with the given status, payload, and message.
    pub fn new(status: StatusCode, data: T, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            data,
            message: message.into(),
            success: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let envelope = ApiResponse::new(StatusCode::CREATED, serde_json::json!({"id": 1}), "ok");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["statusCode"], 201);
        assert_eq!(json["data"]["id"], 1);
        assert_eq!(json["message"], "ok");
        assert_eq!(json["success"], true);
    }
}
