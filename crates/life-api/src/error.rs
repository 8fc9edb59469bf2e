//! Error types for the board API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.
//!
//! Every error body carries `error`, `status` and a machine-readable
//! `kind`. Simulation failures add `period` or `max_generations`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use life_core::{GridError, RepositoryError, ServiceError, SimulationError};
use life_types::BoardId;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested board does not exist.
    #[error("board not found: {0}")]
    NotFound(BoardId),

    /// The request body or path could not be interpreted.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The engine rejected the request or found no final state.
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// The board store or the engine task failed.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) | Self::Simulation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable tag identifying the failure, exposed as `kind`.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Simulation(SimulationError::InvalidArgument(_)) => "invalid_argument",
            Self::Simulation(SimulationError::Oscillation { .. }) => "oscillation",
            Self::Simulation(SimulationError::NoConvergence { .. }) => "no_convergence",
            Self::Simulation(SimulationError::GridTooLarge { .. }) => "grid_too_large",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Simulation(e) => Self::Simulation(e),
            ServiceError::Repository(RepositoryError::NotFound(id)) => Self::NotFound(id),
            ServiceError::Repository(RepositoryError::Backend { message }) => {
                Self::Internal(message)
            }
            ServiceError::Task(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<GridError> for ApiError {
    fn from(err: GridError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(message) = &self {
            tracing::error!(error = %message, "Internal failure");
        }

        let mut body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
            "kind": self.kind(),
        });

        if let (Self::Simulation(e), Some(fields)) = (&self, body.as_object_mut()) {
            match e {
                SimulationError::Oscillation { period } => {
                    fields.insert(String::from("period"), (*period).into());
                }
                SimulationError::NoConvergence { max_generations } => {
                    fields.insert(String::from("max_generations"), (*max_generations).into());
                }
                SimulationError::GridTooLarge { max_cells, .. } => {
                    fields.insert(String::from("max_cells"), (*max_cells).into());
                }
                SimulationError::InvalidArgument(_) => {}
            }
        }

        (status, axum::Json(body)).into_response()
    }
}
