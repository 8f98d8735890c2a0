use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use parkinglot_core::error::CoreError;
use parkinglot_db::store::StoreError;
use serde_json::json;

/// Application-level error type for services and HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// failures. Implements [`IntoResponse`] to produce the API's JSON error
/// bodies: `404 {Message}` for missing records and `400 {Message, Error}`
/// for everything else.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `parkinglot_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure from the store backend.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Input DTO failed its `validator` rules.
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// The request body, path or query string could not be decoded.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for service and handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn not_found(entity: &'static str, id: parkinglot_core::types::DbId) -> Self {
        AppError::Core(CoreError::NotFound { entity, id })
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::BAD_REQUEST, "CONFLICT", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::BAD_REQUEST,
                        "INTERNAL_ERROR",
                        INTERNAL_MESSAGE.to_string(),
                    )
                }
            },

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- Request errors ---
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                errors.to_string(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = if status == StatusCode::NOT_FOUND {
            json!({ "Message": message })
        } else {
            json!({ "Message": message, "Error": code })
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - Unique and foreign-key violations map to a 400 conflict naming the
///   constraint.
/// - Timeouts and everything else map to a sanitized internal error.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    if let Some(constraint) = err.violated_constraint() {
        return (
            StatusCode::BAD_REQUEST,
            "CONFLICT",
            constraint_message(constraint),
        );
    }

    match err {
        StoreError::Timeout(after) => {
            tracing::error!(?after, "Store call timed out");
            (
                StatusCode::BAD_REQUEST,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Store error");
            (
                StatusCode::BAD_REQUEST,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}

fn constraint_message(constraint: &str) -> String {
    match constraint {
        "uq_cars_plate" => "A car with this plate is already registered".to_string(),
        "uq_tickets_pending_vacancy" => "Vacancy already has an open ticket".to_string(),
        name if name.starts_with("fk_") => {
            format!("Operation violates reference constraint: {name}")
        }
        name => format!("Duplicate value violates unique constraint: {name}"),
    }
}
