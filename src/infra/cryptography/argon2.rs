//! Argon2id password hasher implementation.

use std::time::Duration;

use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::{Argon2, Params, Version};
use async_trait::async_trait;
use rand::rngs::OsRng;

use crate::config::Argon2 as ArgonConfig;
use crate::data::protocols::Encrypter;
use crate::error::{Error, Result, ToInternal};

/// Argon2id adapter producing PHC strings.
///
/// The work factor is fixed at construction.
pub struct Argon2Adapter {
    params: Params,
    timeout: Duration,
}

impl Argon2Adapter {
    /// Create a new [`Argon2Adapter`].
    pub fn new(config: Option<ArgonConfig>, timeout: Duration) -> Result<Self> {
        let config = config.unwrap_or_default();

        let params = Params::new(
            config.memory_cost,
            config.iterations,
            config.parallelism,
            Some(config.hash_length),
        )
        .map_err(|err| Error::Hash(err.to_string()))?;

        Ok(Self { params, timeout })
    }
}

fn hash_password(params: Params, password: &[u8]) -> Result<String> {
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);
    let salt = SaltString::generate(&mut OsRng);

    let hash = argon2
        .hash_password(password, &salt)
        .map_err(|err| Error::Hash(err.to_string()))?;

    Ok(hash.to_string())
}

#[async_trait]
impl Encrypter for Argon2Adapter {
    async fn encrypt(&self, value: &str) -> Result<String> {
        let params = self.params.clone();
        let password = value.to_owned();

        // Hashing is CPU bound, keep it off the async workers.
        let task = tokio::task::spawn_blocking(move || {
            hash_password(params, password.as_bytes())
        });

        match tokio::time::timeout(self.timeout, task).await {
            Ok(joined) => joined.catch()?,
            Err(_) => Err(Error::Timeout {
                operation: "password hashing",
                after: self.timeout,
            }),
        }
    }
}
