//! HTTP routes mounted under `/api`.

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Response;
use axum::routing::post;
use serde_json::Value;

use crate::AppState;
use crate::server::adapter::adapt;

/// Every `/api` route.
pub fn router() -> Router<AppState> {
    Router::new().route("/signup", post(signup))
}

/// `POST /api/signup`.
async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    adapt(state.signup.as_ref(), payload).await
}
