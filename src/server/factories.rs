//! Build fully wired controllers.

use crate::config::Configuration;
use crate::data::protocols::{AddAccountRepository, LogErrorRepository};
use crate::data::usecases::DbAddAccount;
use crate::error::Result;
use crate::infra::cryptography::Argon2Adapter;
use crate::infra::db::{AccountRepository, Database, LogRepository};
use crate::presentation::controllers::SignUpController;
use crate::server::decorators::LogControllerDecorator;
use crate::utils::EmailValidatorAdapter;

/// Sign-up controller backed by Argon2 and the document store, with server
/// errors persisted to the `errors` collection.
pub fn make_signup_controller(
    db: &Database,
    config: &Configuration,
) -> Result<LogControllerDecorator<SignUpController>> {
    build_signup_controller(
        config,
        Box::new(AccountRepository::new(db.clone())),
        Some(Box::new(LogRepository::new(db.clone()))),
    )
}

/// Sign-up controller on top of the given repositories.
pub fn build_signup_controller(
    config: &Configuration,
    account_repository: Box<dyn AddAccountRepository>,
    log_repository: Option<Box<dyn LogErrorRepository>>,
) -> Result<LogControllerDecorator<SignUpController>> {
    let encrypter =
        Argon2Adapter::new(config.argon2.clone(), config.timeouts.hash())?;
    let add_account = DbAddAccount::new(Box::new(encrypter), account_repository);

    let controller = SignUpController::new(
        Box::new(EmailValidatorAdapter::new()),
        Box::new(add_account),
    );

    Ok(LogControllerDecorator::new(controller, log_repository))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use argon2::Argon2;
    use argon2::password_hash::{PasswordHash, PasswordVerifier};
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::config::Argon2 as ArgonConfig;
    use crate::domain::{AccountModel, AddAccountModel};
    use crate::presentation::protocols::{Controller, HttpBody, HttpRequest};

    #[derive(Default, Clone)]
    struct AccountRepositoryStub {
        calls: Arc<Mutex<Vec<AddAccountModel>>>,
    }

    #[async_trait]
    impl AddAccountRepository for AccountRepositoryStub {
        async fn add(&self, account: AddAccountModel) -> Result<AccountModel> {
            self.calls.lock().unwrap().push(account.clone());

            Ok(AccountModel {
                id: "valid_id".into(),
                name: account.name,
                email: account.email,
                password: account.password,
            })
        }
    }

    fn light_config() -> Configuration {
        Configuration {
            argon2: Some(ArgonConfig {
                memory_cost: 1024,
                iterations: 1,
                parallelism: 1,
                hash_length: 32,
            }),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_signup_chain_stores_hash() {
        let repository = AccountRepositoryStub::default();
        let sut = build_signup_controller(
            &light_config(),
            Box::new(repository.clone()),
            None,
        )
        .unwrap();

        let response = sut
            .handle(HttpRequest::new(json!({
                "name": "any_name",
                "email": "any_email@mail.com",
                "password": "any_password",
                "passwordConfirmation": "any_password",
            })))
            .await;
        assert_eq!(response.status_code, StatusCode::OK);

        let calls = repository.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 1);
        let stored = &calls[0];
        assert_eq!(stored.name, "any_name");
        assert_eq!(stored.email, "any_email@mail.com");
        assert!(stored.password.starts_with("$argon2id$"));
        assert_ne!(stored.password, "any_password");

        let parsed = PasswordHash::new(&stored.password).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"any_password", &parsed)
                .is_ok()
        );

        match response.body {
            HttpBody::Data(body) => {
                assert_eq!(body["id"], "valid_id");
                assert_eq!(body["password"], stored.password.as_str());
            },
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_work_factor() {
        let mut config = light_config();
        if let Some(argon2) = config.argon2.as_mut() {
            argon2.parallelism = 0;
        }

        let res = build_signup_controller(
            &config,
            Box::new(AccountRepositoryStub::default()),
            None,
        );
        assert!(res.is_err());
    }
}
