//! Configuration manager for the sign-up service.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";
const DEFAULT_NAME: &str = "signup";
const DEFAULT_PORT: u16 = 5050;
const DEFAULT_ADDRESS: &str = "localhost:5432";
pub const DEFAULT_CREDENTIALS: &str = "postgres";
pub const DEFAULT_DATABASE_NAME: &str = "clean-node-api";

/// Errors raised while reading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid database address: {0}")]
    Url(#[from] url::ParseError),
    #[error("cannot set credentials on `{0}`")]
    Credentials(String),
    #[error("invalid `{name}` environment variable: {value}")]
    Env { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Instance name.
    pub name: String,
    /// HTTP listen port.
    pub port: u16,
    #[serde(skip)]
    pub(crate) path: PathBuf,
    /// Related to PostgreSQL configuration.
    #[serde(skip_serializing)]
    pub postgres: Option<Postgres>,
    /// Related to Argon2 configuration.
    #[serde(skip_serializing)]
    pub argon2: Option<Argon2>,
    pub timeouts: Timeouts,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.into(),
            port: DEFAULT_PORT,
            path: PathBuf::default(),
            postgres: None,
            argon2: None,
            timeouts: Timeouts::default(),
        }
    }
}

/// PostgreSQL configuration.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
pub struct Postgres {
    /// Full connection URL. Takes precedence over every other field.
    pub url: Option<String>,
    /// Hostname:(?port) for PostgreSQL instance.
    #[serde(default)]
    pub address: String,
    /// Database name.
    pub database: Option<String>,
    /// Username credential to connect.
    pub username: Option<String>,
    /// Password credential to connect.
    pub password: Option<String>,
    /// Maximum pool connections.
    pub pool_size: Option<u32>,
}

/// Argon2 configuration.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Argon2 {
    /// Memory used while hashing.
    pub memory_cost: u32,
    /// Iterations of hash.
    pub iterations: u32,
    /// Parallelism degree.
    pub parallelism: u32,
    /// Output hash length.
    pub hash_length: usize,
}

impl Default for Argon2 {
    fn default() -> Self {
        Self {
            memory_cost: 1024 * 64, // 64 MiB.
            iterations: 4,
            parallelism: 2,
            hash_length: 32,
        }
    }
}

/// Upper bounds, in milliseconds.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    pub hash: u64,
    pub database: u64,
    pub request: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            hash: 5_000,
            database: 5_000,
            request: 10_000,
        }
    }
}

impl Timeouts {
    pub fn hash(&self) -> Duration {
        Duration::from_millis(self.hash)
    }

    pub fn database(&self) -> Duration {
        Duration::from_millis(self.database)
    }

    pub fn request(&self) -> Duration {
        Duration::from_millis(self.request)
    }
}

impl Configuration {
    pub fn path(mut self, path: PathBuf) -> Self {
        self.path = path;
        self
    }

    /// Reads the `config.yaml` file from the specified path or the default
    /// location, then applies `DATABASE_URL` and `PORT` overrides.
    pub fn read(self) -> Result<Arc<Self>, ConfigError> {
        let file_path = if self.path.is_file() {
            &self.path
        } else {
            &Path::new(DEFAULT_CONFIG_PATH).to_path_buf()
        };

        let mut config = match File::open(file_path) {
            Ok(file) => match serde_yaml::from_reader(file) {
                Ok(config) => config,
                Err(err) => self.error(err),
            },
            Err(err) => self.error(err),
        };

        config.apply_env(
            std::env::var("DATABASE_URL").ok(),
            std::env::var("PORT").ok(),
        )?;

        Ok(Arc::new(config))
    }

    fn apply_env(
        &mut self,
        database_url: Option<String>,
        port: Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = database_url.filter(|url| !url.is_empty()) {
            self.postgres.get_or_insert_with(Postgres::default).url = Some(url);
        }

        if let Some(port) = port.filter(|port| !port.is_empty()) {
            self.port = port.parse().map_err(|_| ConfigError::Env {
                name: "PORT",
                value: port.clone(),
            })?;
        }

        Ok(())
    }

    /// Connection URL for the document store.
    pub fn database_url(&self) -> Result<String, ConfigError> {
        let postgres = self.postgres.clone().unwrap_or_default();

        if let Some(url) = postgres.url {
            return Ok(Url::parse(&url)?.to_string());
        }

        let address = if postgres.address.is_empty() {
            DEFAULT_ADDRESS
        } else {
            &postgres.address
        };
        let mut url = Url::parse(&format!("postgres://{address}"))?;
        url.set_path(
            postgres
                .database
                .as_deref()
                .unwrap_or(DEFAULT_DATABASE_NAME),
        );
        url.set_username(
            postgres.username.as_deref().unwrap_or(DEFAULT_CREDENTIALS),
        )
        .map_err(|_| ConfigError::Credentials(address.to_owned()))?;
        url.set_password(Some(
            postgres.password.as_deref().unwrap_or(DEFAULT_CREDENTIALS),
        ))
        .map_err(|_| ConfigError::Credentials(address.to_owned()))?;

        Ok(url.to_string())
    }

    /// Return a default configuration as fallback.
    fn error(&self, err: impl std::error::Error) -> Self {
        tracing::error!(error = %err, "`config.yaml` file not found or invalid");
        Self::default()
    }
}
