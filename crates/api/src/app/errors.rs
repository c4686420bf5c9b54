use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use thiserror::Error;

use stockroom_core::DomainError;
use stockroom_infra::InventoryStoreError;

pub const NOT_FOUND_MESSAGE: &str = "Inventory not found";
pub const EXPECTED_LIST_MESSAGE: &str = "Expected a list of inventory items";

/// Request-boundary error. Every variant renders as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input.
    #[error("{0}")]
    Validation(String),

    /// The referenced record does not exist.
    #[error("Inventory not found")]
    NotFound,

    /// A batch element could not be turned into a record.
    #[error("{0}")]
    Construction(String),

    /// The record store failed; details are logged, not returned.
    #[error("Internal server error")]
    Store(#[from] InventoryStoreError),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Construction(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MissingRequiredFields => {
                ApiError::validation(DomainError::MissingRequiredFields.to_string())
            }
            DomainError::Validation(msg) => ApiError::Validation(msg),
            DomainError::Construction(msg) => ApiError::Construction(msg),
            DomainError::InvalidId(_) => ApiError::validation("Invalid inventory id"),
            DomainError::NotFound => ApiError::NotFound,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if let ApiError::Store(e) = &self {
            tracing::error!(error = %e, "inventory store failure");
        }
        json_error(self.status_code(), self.to_string())
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
        })),
    )
        .into_response()
}
