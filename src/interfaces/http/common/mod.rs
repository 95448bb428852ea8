//! Common API plumbing: response envelope, validated extractor,
//! error-to-status mapping

mod validated_json;

pub use validated_json::{ValidatedJson, ValidatedJsonRejection};

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Standard response envelope.
///
/// Every REST endpoint wraps its payload in this shape.
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload; `null` on failure
    pub data: Option<T>,
    /// Error description; `null` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// HTTP status for each engine error kind.
///
/// Keeps "your input was invalid" (400/422), "the room is taken" (409)
/// and "stale reference" (404) distinguishable for clients.
pub fn error_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::RoomUnavailable { .. } | DomainError::InvalidState { .. } => {
            StatusCode::CONFLICT
        }
        DomainError::GuestLimitExceeded { .. }
        | DomainError::PriceMismatch { .. }
        | DomainError::InvalidDateRange(_) => StatusCode::BAD_REQUEST,
        DomainError::PaymentGatewayUnavailable(_) => StatusCode::BAD_GATEWAY,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Map a `DomainError` to the standard error response pair.
pub fn error_response<T>(err: DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    (error_status(&err), Json(ApiResponse::error(err.to_string())))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldErrors;

    #[test]
    fn statuses_keep_error_kinds_distinguishable() {
        assert_eq!(
            error_status(&DomainError::Validation(FieldErrors::new())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            error_status(&DomainError::NotFound {
                entity: "Room",
                field: "id",
                value: "x".into()
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&DomainError::RoomUnavailable {
                blocked_dates: vec![],
                conflicts: vec![]
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_status(&DomainError::PriceMismatch {
                expected_cents: 1,
                provided_cents: 2
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&DomainError::PaymentGatewayUnavailable("down".into())),
            StatusCode::BAD_GATEWAY
        );
    }
}
