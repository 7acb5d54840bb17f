//! Middlewares shared by every route.

use axum::extract::Request;
use axum::http::{HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use tower_http::cors::{Any, CorsLayer};

/// Set `content-type: application/json` unless the route already chose one.
pub async fn content_type(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    response
        .headers_mut()
        .entry(header::CONTENT_TYPE)
        .or_insert(HeaderValue::from_static("application/json"));

    response
}

/// Allow any origin, method and header.
pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum::body::Body;
    use axum::middleware::from_fn;
    use axum::routing::get;
    use tower::util::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/empty", get(|| async { Response::new(Body::empty()) }))
            .route(
                "/xml",
                get(|| async { ([(header::CONTENT_TYPE, "application/xml")], "<a/>") }),
            )
            .layer(from_fn(content_type))
            .layer(cors())
    }

    async fn request(uri: &str) -> Response {
        app()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header(header::ORIGIN, "http://any.origin")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_default_content_type() {
        let response = request("/empty").await;
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    }

    #[tokio::test]
    async fn test_route_content_type_wins() {
        let response = request("/xml").await;
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/xml");
    }

    #[tokio::test]
    async fn test_cors() {
        let response = request("/empty").await;
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
