//! services/frontend/src/error.rs
//!
//! Defines the primary error type for the frontend service and how it is
//! shown to the browser.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use flixr_core::PortError;
use tracing::error;

use crate::config::ConfigError;
use crate::web::view::View;

/// The primary error type for the `frontend` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents a failure building the outbound HTTP client.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Port(PortError::Unavailable(_) | PortError::MalformedResponse(_)) => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::Port(PortError::NotFound(_)) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The text shown on the error view. Internal details stay in the logs.
    fn public_message(&self) -> &'static str {
        match self {
            ApiError::Port(PortError::Unavailable(_)) => {
                "The movie service is unavailable right now. Please try again shortly."
            }
            ApiError::Port(PortError::MalformedResponse(_)) => {
                "The movie service sent a response we could not understand."
            }
            ApiError::Port(PortError::NotFound(_)) => "Nothing was found here.",
            _ => "Something went wrong on our side.",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        View::error(self.status(), self.public_message()).into_response()
    }
}
