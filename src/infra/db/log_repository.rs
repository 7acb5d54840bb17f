//! Error log persistence on the `errors` collection.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data::protocols::LogErrorRepository;
use crate::error::Result;
use crate::infra::db::{Database, ERRORS};

/// One `errors` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorLog {
    pub error_message: String,
    pub created_at: DateTime<Utc>,
}

/// Document store error log repository.
#[derive(Clone)]
pub struct LogRepository {
    db: Database,
}

impl LogRepository {
    /// Create a new [`LogRepository`].
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LogErrorRepository for LogRepository {
    async fn log_error(&self, stack: &str) -> Result<()> {
        let errors = self.db.collection(ERRORS).await?;

        errors
            .insert_one(&ErrorLog {
                error_message: stack.to_owned(),
                created_at: Utc::now(),
            })
            .await?;

        Ok(())
    }
}
