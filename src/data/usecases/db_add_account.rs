//! Account creation use case implementation.

use async_trait::async_trait;

use crate::data::protocols::{AddAccountRepository, Encrypter};
use crate::domain::{AccountModel, AddAccount, AddAccountModel};
use crate::error::Result;

/// Account creation use case service.
///
/// Failures of either dependency are returned untouched.
pub struct DbAddAccount {
    encrypter: Box<dyn Encrypter>,
    account_repo: Box<dyn AddAccountRepository>,
}

impl DbAddAccount {
    pub fn new(
        encrypter: Box<dyn Encrypter>,
        account_repo: Box<dyn AddAccountRepository>,
    ) -> Self {
        Self {
            encrypter,
            account_repo,
        }
    }
}

#[async_trait]
impl AddAccount for DbAddAccount {
    async fn add(&self, account: AddAccountModel) -> Result<AccountModel> {
        let password = self.encrypter.encrypt(&account.password).await?;

        let account = self
            .account_repo
            .add(AddAccountModel {
                password,
                ..account
            })
            .await?;

        tracing::info!(account_id = %account.id, "account created");

        Ok(account)
    }
}
