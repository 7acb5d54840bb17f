//! Error value objects returned to HTTP clients.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// A required field is absent from the request body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing param: {param}")]
pub struct MissingParamError {
    param: String,
}

impl MissingParamError {
    pub fn new(param: impl Into<String>) -> Self {
        Self {
            param: param.into(),
        }
    }

    pub fn param(&self) -> &str {
        &self.param
    }
}

/// A field is present but its value is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid param: {param}")]
pub struct InvalidParamError {
    param: String,
}

impl InvalidParamError {
    pub fn new(param: impl Into<String>) -> Self {
        Self {
            param: param.into(),
        }
    }

    pub fn param(&self) -> &str {
        &self.param
    }
}

/// Unexpected failure. The stack never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Internal server error")]
pub struct ServerError {
    stack: String,
}

impl ServerError {
    pub fn new(stack: impl Into<String>) -> Self {
        Self {
            stack: stack.into(),
        }
    }

    pub fn stack(&self) -> &str {
        &self.stack
    }
}

/// Every error envelope a response can carry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpError {
    #[error(transparent)]
    MissingParam(#[from] MissingParamError),
    #[error(transparent)]
    InvalidParam(#[from] InvalidParamError),
    #[error(transparent)]
    Server(#[from] ServerError),
    /// Body could not be read as JSON.
    #[error("{0}")]
    BadRequest(String),
}

impl HttpError {
    /// Name exposed to clients.
    pub fn name(&self) -> &'static str {
        match self {
            HttpError::MissingParam(_) => "MissingParamError",
            HttpError::InvalidParam(_) => "InvalidParamError",
            HttpError::Server(_) => "ServerError",
            HttpError::BadRequest(_) => "BadRequest",
        }
    }
}

impl Serialize for HttpError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("HttpError", 2)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}
