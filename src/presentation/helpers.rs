//! Shortcuts to build controller responses.

use axum::http::StatusCode;
use serde::Serialize;

use crate::presentation::errors::{HttpError, ServerError};
use crate::presentation::protocols::{HttpBody, HttpResponse};

/// `400 Bad Request` with an error envelope.
pub fn bad_request(error: impl Into<HttpError>) -> HttpResponse {
    HttpResponse {
        status_code: StatusCode::BAD_REQUEST,
        body: HttpBody::Error(error.into()),
    }
}

/// `500 Internal Server Error` carrying the captured stack.
pub fn server_error(stack: impl Into<String>) -> HttpResponse {
    HttpResponse {
        status_code: StatusCode::INTERNAL_SERVER_ERROR,
        body: HttpBody::Error(ServerError::new(stack).into()),
    }
}

/// `200 OK` with `data` as body.
pub fn ok(data: &impl Serialize) -> HttpResponse {
    match serde_json::to_value(data) {
        Ok(value) => HttpResponse {
            status_code: StatusCode::OK,
            body: HttpBody::Data(value),
        },
        Err(err) => server_error(crate::error::stack(&err)),
    }
}
