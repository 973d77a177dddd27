// [apps/coordinator/src/errors.rs]
/*!
 * APARATO: COORDINATOR ERROR CATALOG
 * RESPONSABILIDAD: UNIFICACIÓN DE ERRORES DE TODOS LOS ESTRATOS EN RESPUESTAS HTTP
 */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use iris_core_crypto_envelope::EnvelopeError;
use iris_infra_store::StoreError;
use serde_json::json;
use thiserror::Error;

/// The canonical error surface listed as the coordinator's external contract.
#[derive(Error, Debug)]
pub enum CoordinatorError {
    #[error("[L4_AUTH_FAULT]: UNAUTHORIZED -> {0}")]
    Unauthorized(String),

    #[error("[L4_FORMAT_FAULT]: INVALID_FORMAT -> {0}")]
    InvalidFormat(String),

    #[error("[L4_LOOKUP_FAULT]: NOT_FOUND -> {0}")]
    NotFound(String),

    #[error("[L4_AUTHZ_FAULT]: FORBIDDEN -> {0}")]
    Forbidden(String),

    #[error("[L4_SWARM_FAULT]: NO_CAPABLE_WORKER -> {0}")]
    NoCapableWorker(String),

    #[error("[L4_WIRE_FAULT]: SEND_FAILED -> {0}")]
    SendFailed(String),

    #[error("[L4_TIMING_FAULT]: TIMEOUT -> {0}")]
    Timeout(String),

    #[error("[L4_WORKER_FAULT]: WORKER_ERROR -> {0}")]
    WorkerError(String),

    #[error("[L4_CRYPTO_FAULT]: DECRYPTION_FAILED -> {0}")]
    DecryptionFailed(#[from] EnvelopeError),

    #[error("[L4_SHAPE_FAULT]: INVALID_RESPONSE -> {0}")]
    InvalidResponse(String),

    #[error("[L4_LOAD_FAULT]: OVERLOADED -> {0}")]
    Overloaded(String),

    #[error("[L3_STORE_FAULT]: INTERNAL -> {0}")]
    Store(#[from] StoreError),

    #[error("[L4_INTERNAL_FAULT]: INTERNAL -> {0}")]
    Internal(String),
}

impl IntoResponse for CoordinatorError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            CoordinatorError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            CoordinatorError::InvalidFormat(_) => (StatusCode::BAD_REQUEST, "invalid_format"),
            CoordinatorError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            CoordinatorError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
            CoordinatorError::NoCapableWorker(_) => (StatusCode::SERVICE_UNAVAILABLE, "no_capable_worker"),
            CoordinatorError::SendFailed(_) => (StatusCode::BAD_GATEWAY, "send_failed"),
            CoordinatorError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "timeout"),
            CoordinatorError::WorkerError(_) => (StatusCode::BAD_GATEWAY, "worker_error"),
            CoordinatorError::DecryptionFailed(_) => (StatusCode::BAD_REQUEST, "decryption_failed"),
            CoordinatorError::InvalidResponse(_) => (StatusCode::BAD_GATEWAY, "invalid_response"),
            CoordinatorError::Overloaded(_) => (StatusCode::TOO_MANY_REQUESTS, "overloaded"),
            CoordinatorError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
            CoordinatorError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        };

        tracing::warn!(error = %self, code, "request rejected");

        (status, Json(json!({ "error": code, "message": self.to_string() }))).into_response()
    }
}
