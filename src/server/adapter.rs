//! Bridge between axum and the framework-free controllers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value};

use crate::presentation::errors::HttpError;
use crate::presentation::helpers::bad_request;
use crate::presentation::protocols::{Controller, HttpRequest, HttpResponse};

impl IntoResponse for HttpResponse {
    fn into_response(self) -> Response {
        (self.status_code, Json(self.body)).into_response()
    }
}

/// Feed a parsed JSON body to `controller`.
///
/// A request that is not declared as JSON is handled with an empty object
/// body. A JSON body that cannot be parsed never reaches the controller.
pub async fn adapt(
    controller: &dyn Controller,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(JsonRejection::MissingJsonContentType(_)) => Value::Object(Map::new()),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected request body");
            return bad_request(HttpError::BadRequest(rejection.body_text()))
                .into_response();
        },
    };

    controller.handle(HttpRequest::new(body)).await.into_response()
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::extract::{FromRequest, Request};
    use axum::http::{StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::json;

    use super::*;
    use crate::presentation::helpers::{ok, server_error};

    struct EchoController;

    #[async_trait]
    impl Controller for EchoController {
        async fn handle(&self, request: HttpRequest) -> HttpResponse {
            ok(&request.body)
        }
    }

    async fn body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_into_response() {
        let response = server_error("any_stack").into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert_eq!(
            body(response).await,
            json!({ "name": "ServerError", "message": "Internal server error" })
        );
    }

    #[tokio::test]
    async fn test_adapt_without_json_content_type() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from("{}"))
            .unwrap();
        let payload = Json::<Value>::from_request(request, &()).await;
        assert!(matches!(
            payload,
            Err(JsonRejection::MissingJsonContentType(_))
        ));

        let response = adapt(&EchoController, payload).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body(response).await, json!({}));
    }

    #[tokio::test]
    async fn test_adapt_rejects_malformed_json() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{ not json"))
            .unwrap();
        let payload = Json::<Value>::from_request(request, &()).await;

        let response = adapt(&EchoController, payload).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body(response).await["name"], "BadRequest");
    }

    #[tokio::test]
    async fn test_adapt_forwards_body() {
        let response =
            adapt(&EchoController, Ok(Json(json!({ "name": "any_name" })))).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body(response).await, json!({ "name": "any_name" }));
    }
}
