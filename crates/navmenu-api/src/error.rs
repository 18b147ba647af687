use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use navmenu_core::{DomainError, FieldErrors};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<FieldErrors>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(err) => match err {
                DomainError::Validation(_)
                | DomainError::IntegrityConstraint { .. }
                | DomainError::ReferentialProtection { .. } => StatusCode::BAD_REQUEST,
                DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::Conflict(_) => StatusCode::CONFLICT,
                DomainError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_type, message, fields) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                ("BadRequest", msg, None)
            }
            ApiError::Domain(DomainError::Validation(fields)) => {
                tracing::warn!("Validation failed: {}", fields);
                ("ValidationError", "Invalid input".to_string(), Some(fields))
            }
            ApiError::Domain(DomainError::IntegrityConstraint { field, message }) => {
                tracing::warn!("Integrity constraint on {}: {}", field, message);
                let fields = FieldErrors::single(&field, message.clone());
                ("IntegrityConstraint", message, Some(fields))
            }
            ApiError::Domain(err @ DomainError::NotFound { .. }) => {
                tracing::warn!("{}", err);
                ("NotFound", err.to_string(), None)
            }
            ApiError::Domain(err @ DomainError::ReferentialProtection { .. }) => {
                tracing::warn!("{}", err);
                ("ProtectedError", err.to_string(), None)
            }
            ApiError::Domain(DomainError::Conflict(msg)) => {
                tracing::warn!("Order conflict: {}", msg);
                ("Conflict", msg, None)
            }
            ApiError::Domain(DomainError::DatabaseError(msg)) => {
                tracing::error!("Database error: {}", msg);
                ("DatabaseError", "Internal server error".to_string(), None)
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            fields,
        });

        (status, body).into_response()
    }
}
