//! Errors raised below the presentation layer.
//!
//! Use cases and adapters never recover from these: they are propagated with
//! `?` up to the controller, which turns them into a `ServerError` response.

use std::time::Duration;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the data and infrastructure layers.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database request failed")]
    Database(#[from] sqlx::Error),
    #[error("database migration failed")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("document (de)serialization failed")]
    Document(#[from] serde_json::Error),

    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("{0}")]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub fn internal<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Internal(Box::new(err))
    }

    /// Render the error followed by its whole `source()` chain.
    ///
    /// This is what ends up in `ServerError` and in the `errors` collection.
    pub fn stack(&self) -> String {
        stack(self)
    }
}

/// Render any error with its `source()` chain, one cause per line.
pub fn stack(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();

    while let Some(cause) = source {
        out.push_str("\n  caused by: ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }

    out
}

pub trait ToInternal<T> {
    fn catch(self) -> Result<T>;
}

impl<T, E> ToInternal<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn catch(self) -> Result<T> {
        self.map_err(Error::internal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_stack_is_message() {
        let err = Error::internal(std::io::Error::other("any_stack"));
        assert_eq!(err.stack(), "any_stack");
    }

    #[test]
    fn test_stack_follows_sources() {
        let err = Error::from(sqlx::Error::PoolTimedOut);
        let stack = err.stack();

        assert!(stack.starts_with("database request failed"));
        assert!(stack.contains("caused by: pool timed out"));
    }

    #[test]
    fn test_catch() {
        let res: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("boom"));
        let err = res.catch().unwrap_err();

        assert!(matches!(err, Error::Internal(_)));
        assert_eq!(err.to_string(), "boom");
    }
}
