//! Contracts shared by every controller.

use async_trait::async_trait;
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::presentation::errors::HttpError;

/// Request as seen by a controller.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct HttpRequest {
    pub body: Value,
}

impl HttpRequest {
    /// Create a new [`HttpRequest`] carrying `body`.
    pub fn new(body: Value) -> Self {
        Self { body }
    }
}

/// Response produced by a controller.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status_code: StatusCode,
    pub body: HttpBody,
}

/// Either a success payload or an error envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HttpBody {
    Data(Value),
    Error(HttpError),
}

impl HttpBody {
    /// Captured stack when the body is a `ServerError`.
    pub fn stack(&self) -> Option<&str> {
        match self {
            HttpBody::Error(HttpError::Server(err)) => Some(err.stack()),
            _ => None,
        }
    }
}

/// Anything able to turn an [`HttpRequest`] into an [`HttpResponse`].
///
/// Implementations must not fail: every error becomes a response.
#[async_trait]
pub trait Controller: Send + Sync {
    async fn handle(&self, request: HttpRequest) -> HttpResponse;
}

/// Port for email syntax validation.
pub trait EmailValidator: Send + Sync {
    /// Whether `email` is a syntactically valid address.
    fn is_valid(&self, email: &str) -> Result<bool>;
}
