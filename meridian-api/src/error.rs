use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use meridian_core::gateway::GatewayError;
use meridian_core::intake::IntakeError;
use meridian_core::reconcile::ReconcileError;
use meridian_core::repository::RepoError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Unauthorized(String),
    NotFound(String),
    Conflict(String),
    Gone(String),
    BadGateway(String),
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Gone(msg) => (StatusCode::GONE, msg),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Internal(err) => {
                tracing::error!("Internal Server Error: {err:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::DuplicateKey(field) => {
                AppError::Conflict(format!("duplicate value for unique field: {field}"))
            }
            RepoError::Backend(err) => AppError::Internal(anyhow::anyhow!(err)),
        }
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        AppError::BadGateway(err.to_string())
    }
}

impl From<IntakeError> for AppError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::Invalid(_) | IntakeError::InvalidSegments | IntakeError::NonPositiveTotal => {
                AppError::BadRequest(err.to_string())
            }
            IntakeError::TripNotFound => AppError::NotFound(err.to_string()),
            IntakeError::TripGone => AppError::Gone(err.to_string()),
            IntakeError::PriceMismatch { .. }
            | IntakeError::InsufficientCapacity { .. }
            | IntakeError::SeatTaken => AppError::Conflict(err.to_string()),
            IntakeError::ReferenceExhausted => AppError::Internal(anyhow::anyhow!(err)),
            IntakeError::Gateway(err) => err.into(),
            IntakeError::Store(err) => err.into(),
        }
    }
}

impl From<ReconcileError> for AppError {
    fn from(err: ReconcileError) -> Self {
        match err {
            ReconcileError::BookingNotFound => AppError::NotFound(err.to_string()),
            ReconcileError::AmountMismatch { .. } => AppError::BadRequest(err.to_string()),
            ReconcileError::TerminalState(_) => AppError::Conflict(err.to_string()),
            ReconcileError::Store(err) => err.into(),
        }
    }
}
