//! Account persistence on the `accounts` collection.

use async_trait::async_trait;

use crate::data::protocols::AddAccountRepository;
use crate::domain::{AccountModel, AddAccountModel};
use crate::error::Result;
use crate::infra::db::{ACCOUNTS, Database};

/// Document store account repository.
#[derive(Clone)]
pub struct AccountRepository {
    db: Database,
}

impl AccountRepository {
    /// Create a new [`AccountRepository`].
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AddAccountRepository for AccountRepository {
    async fn add(&self, account: AddAccountModel) -> Result<AccountModel> {
        let accounts = self.db.collection(ACCOUNTS).await?;

        accounts.insert_one(&account).await?.map()
    }
}
