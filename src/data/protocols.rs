//! These traits define what the use cases need from the outside world.

use async_trait::async_trait;

use crate::domain::{AccountModel, AddAccountModel};
use crate::error::Result;

/// Port for one-way password hashing.
#[async_trait]
pub trait Encrypter: Send + Sync {
    /// Hash `value` with the work factor configured at construction.
    async fn encrypt(&self, value: &str) -> Result<String>;
}

/// Port for account persistence.
#[async_trait]
pub trait AddAccountRepository: Send + Sync {
    /// Store a new account, returning it with its generated identifier.
    async fn add(&self, account: AddAccountModel) -> Result<AccountModel>;
}

/// Port for error log persistence.
#[async_trait]
pub trait LogErrorRepository: Send + Sync {
    /// Append one error record.
    async fn log_error(&self, stack: &str) -> Result<()>;
}
