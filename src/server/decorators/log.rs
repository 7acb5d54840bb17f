//! Controller decorator persisting server errors.

use async_trait::async_trait;
use axum::http::StatusCode;

use crate::data::protocols::LogErrorRepository;
use crate::presentation::protocols::{Controller, HttpRequest, HttpResponse};

/// Wrap any [`Controller`] and record the stack of every `500` it returns.
///
/// The wrapped response is always returned unchanged, even when logging
/// fails.
pub struct LogControllerDecorator<C> {
    controller: C,
    log_repository: Option<Box<dyn LogErrorRepository>>,
}

impl<C: Controller> LogControllerDecorator<C> {
    /// Create a new [`LogControllerDecorator`].
    ///
    /// Without a repository, errors are only traced.
    pub fn new(
        controller: C,
        log_repository: Option<Box<dyn LogErrorRepository>>,
    ) -> Self {
        Self {
            controller,
            log_repository,
        }
    }
}

#[async_trait]
impl<C: Controller> Controller for LogControllerDecorator<C> {
    async fn handle(&self, request: HttpRequest) -> HttpResponse {
        let response = self.controller.handle(request).await;

        if response.status_code != StatusCode::INTERNAL_SERVER_ERROR {
            return response;
        }
        let Some(stack) = response.body.stack() else {
            return response;
        };

        tracing::warn!(%stack, "controller returned a server error");

        if let Some(repository) = &self.log_repository {
            match repository.log_error(stack).await {
                Ok(()) => metrics::counter!("signup_errors_logged_total").increment(1),
                Err(err) => {
                    tracing::error!(error = %err.stack(), "cannot log server error")
                },
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;
    use crate::error::{Error, Result};
    use crate::presentation::helpers::{ok, server_error};

    struct ControllerStub {
        response: HttpResponse,
        calls: Arc<Mutex<Vec<HttpRequest>>>,
    }

    impl ControllerStub {
        fn new(response: HttpResponse) -> Self {
            Self {
                response,
                calls: Arc::default(),
            }
        }
    }

    #[async_trait]
    impl Controller for ControllerStub {
        async fn handle(&self, request: HttpRequest) -> HttpResponse {
            self.calls.lock().unwrap().push(request);
            self.response.clone()
        }
    }

    #[derive(Default, Clone)]
    struct LogErrorRepositoryStub {
        calls: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    #[async_trait]
    impl LogErrorRepository for LogErrorRepositoryStub {
        async fn log_error(&self, stack: &str) -> Result<()> {
            self.calls.lock().unwrap().push(stack.to_owned());
            if self.fail {
                return Err(Error::internal(std::io::Error::other("log failed")));
            }

            Ok(())
        }
    }

    fn fake_request() -> HttpRequest {
        HttpRequest::new(json!({
            "name": "any_name",
            "email": "any_email@mail.com",
            "password": "any_password",
            "passwordConfirmation": "any_password",
        }))
    }

    fn make_sut(
        response: HttpResponse,
        repository: &LogErrorRepositoryStub,
    ) -> LogControllerDecorator<ControllerStub> {
        LogControllerDecorator::new(
            ControllerStub::new(response),
            Some(Box::new(repository.clone())),
        )
    }

    #[tokio::test]
    async fn test_forwards_request() {
        let controller = ControllerStub::new(ok(&json!({ "ok": true })));
        let calls = Arc::clone(&controller.calls);
        let sut = LogControllerDecorator::new(controller, None);

        sut.handle(fake_request()).await;
        assert_eq!(*calls.lock().unwrap(), vec![fake_request()]);
    }

    #[tokio::test]
    async fn test_returns_controller_response() {
        let repository = LogErrorRepositoryStub::default();
        let response = ok(&json!({ "id": "valid_id" }));
        let sut = make_sut(response.clone(), &repository);

        assert_eq!(sut.handle(fake_request()).await, response);
        assert!(repository.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_logs_server_error_stack() {
        let repository = LogErrorRepositoryStub::default();
        let sut = make_sut(server_error("any_stack"), &repository);

        let response = sut.handle(fake_request()).await;
        assert_eq!(response, server_error("any_stack"));
        assert_eq!(*repository.calls.lock().unwrap(), vec!["any_stack"]);
    }

    #[tokio::test]
    async fn test_log_failure_is_swallowed() {
        let repository = LogErrorRepositoryStub {
            fail: true,
            ..Default::default()
        };
        let sut = make_sut(server_error("any_stack"), &repository);

        let response = sut.handle(fake_request()).await;
        assert_eq!(response, server_error("any_stack"));
        assert_eq!(repository.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_without_repository() {
        let sut = LogControllerDecorator::new(
            ControllerStub::new(server_error("any_stack")),
            None,
        );

        assert_eq!(sut.handle(fake_request()).await, server_error("any_stack"));
    }
}
