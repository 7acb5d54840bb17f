//! Use case contracts.

use async_trait::async_trait;

use crate::domain::{AccountModel, AddAccountModel};
use crate::error::Result;

/// Register a new account.
#[async_trait]
pub trait AddAccount: Send + Sync {
    /// Create the account and return it as stored.
    async fn add(&self, account: AddAccountModel) -> Result<AccountModel>;
}
