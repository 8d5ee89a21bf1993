//! services/frontend/src/web/view.rs
//!
//! The hand-off to the view layer. A view is a template name plus the plain
//! data object the template consumes, serialized as JSON.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct View {
    template: &'static str,
    #[schema(value_type = Object)]
    context: Map<String, Value>,
    #[serde(skip)]
    status: StatusCode,
}

impl View {
    pub fn new(template: &'static str) -> Self {
        Self {
            template,
            context: Map::new(),
            status: StatusCode::OK,
        }
    }

    /// Adds one entry to the template context.
    pub fn with(mut self, key: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or_else(|e| {
            error!("Failed to serialize view field '{}': {}", key, e);
            Value::Null
        });
        self.context.insert(key.to_string(), value);
        self
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// The page shown when a request cannot be completed.
    pub fn error(status: StatusCode, message: &str) -> Self {
        Self::new("error").with("message", message).with_status(status)
    }

    pub fn template(&self) -> &'static str {
        self.template
    }

    pub fn context(&self) -> &Map<String, Value> {
        &self.context
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
