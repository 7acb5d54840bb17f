//! Pooled connection to the document store.
//!
//! Every collection is a PostgreSQL table `(_id UUID, document JSONB)`.

use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::types::Json;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{Error, Result};

pub const DEFAULT_POOL_SIZE: u32 = 10;

/// Collection holding registered accounts.
pub const ACCOUNTS: &str = "accounts";
/// Collection holding server error logs.
pub const ERRORS: &str = "errors";

/// Database handle shared by repositories.
///
/// Cloning is cheap, all clones share the same pool.
#[derive(Clone)]
pub struct Database {
    options: PgConnectOptions,
    pool_size: u32,
    timeout: Duration,
    pool: Arc<RwLock<PgPool>>,
}

async fn open(options: &PgConnectOptions, pool_size: u32) -> Result<PgPool> {
    Ok(PgPoolOptions::new()
        .max_connections(pool_size)
        .connect_with(options.clone())
        .await?)
}

impl Database {
    /// Open a pool on `url`.
    pub async fn connect(
        url: &str,
        pool_size: u32,
        timeout: Duration,
    ) -> Result<Self> {
        let options = PgConnectOptions::from_str(url)?;
        let pool = open(&options, pool_size).await?;

        tracing::info!(
            host = options.get_host(),
            db = options.get_database().unwrap_or_default(),
            pool_size,
            "postgres connected"
        );

        Ok(Self {
            options,
            pool_size,
            timeout,
            pool: Arc::new(RwLock::new(pool)),
        })
    }

    /// Wrap an already opened pool.
    pub fn from_pool(pool: PgPool, timeout: Duration) -> Self {
        Self {
            options: (*pool.connect_options()).clone(),
            pool_size: pool.options().get_max_connections(),
            timeout,
            pool: Arc::new(RwLock::new(pool)),
        }
    }

    /// Apply pending migrations.
    pub async fn migrate(&self) -> Result<()> {
        let pool = self.pool.read().await.clone();
        sqlx::migrate!().run(&pool).await?;
        Ok(())
    }

    /// Close every connection. A later [`Database::collection`] reconnects.
    pub async fn close(&self) {
        self.pool.read().await.close().await;
        tracing::info!("postgres disconnected");
    }

    /// Whether the pool has been closed.
    pub async fn is_closed(&self) -> bool {
        self.pool.read().await.is_closed()
    }

    /// Get a handle on collection `name`, reconnecting if needed.
    pub async fn collection(&self, name: &'static str) -> Result<Collection> {
        {
            let pool = self.pool.read().await;
            if !pool.is_closed() {
                return Ok(Collection::new(name, pool.clone(), self.timeout));
            }
        }

        let mut pool = self.pool.write().await;
        if pool.is_closed() {
            tracing::warn!(collection = name, "postgres pool closed, reconnecting");
            *pool = open(&self.options, self.pool_size).await?;
        }

        Ok(Collection::new(name, pool.clone(), self.timeout))
    }
}

/// A stored document with its storage identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Stored as `_id`.
    pub id: Uuid,
    pub fields: Value,
}

impl Document {
    /// Convert into `T`, exposing `_id` as an `id` field.
    pub fn map<T: DeserializeOwned>(self) -> Result<T> {
        let mut fields = self.fields;
        if let Value::Object(map) = &mut fields {
            map.remove("_id");
            map.insert("id".into(), Value::String(self.id.to_string()));
        }

        Ok(serde_json::from_value(fields)?)
    }
}

/// Operations on one collection. Each one is bounded by the configured
/// timeout.
#[derive(Debug, Clone)]
pub struct Collection {
    name: &'static str,
    pool: PgPool,
    timeout: Duration,
}

impl Collection {
    fn new(name: &'static str, pool: PgPool, timeout: Duration) -> Self {
        Self {
            name,
            pool,
            timeout,
        }
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        query: impl Future<Output = std::result::Result<T, sqlx::Error>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.timeout, query).await {
            Ok(res) => Ok(res?),
            Err(_) => Err(Error::Timeout {
                operation,
                after: self.timeout,
            }),
        }
    }

    /// Insert one document, returning it as stored.
    pub async fn insert_one<T: Serialize + Sync>(
        &self,
        document: &T,
    ) -> Result<Document> {
        let sql = format!(
            r#"INSERT INTO "{}" (_id, document) VALUES ($1, $2) RETURNING _id, document"#,
            self.name
        );

        let (id, Json(fields)) = self
            .bounded(
                "document insert",
                sqlx::query_as::<_, (Uuid, Json<Value>)>(&sql)
                    .bind(Uuid::new_v4())
                    .bind(Json(document))
                    .fetch_one(&self.pool),
            )
            .await?;

        Ok(Document { id, fields })
    }

    /// Number of documents in the collection.
    pub async fn count_documents(&self) -> Result<i64> {
        let sql = format!(r#"SELECT COUNT(*) FROM "{}""#, self.name);

        self.bounded(
            "document count",
            sqlx::query_scalar::<_, i64>(&sql).fetch_one(&self.pool),
        )
        .await
    }

    /// Remove every document, returning how many were deleted.
    pub async fn delete_many(&self) -> Result<u64> {
        let sql = format!(r#"DELETE FROM "{}""#, self.name);

        let res = self
            .bounded("document delete", sqlx::query(&sql).execute(&self.pool))
            .await?;

        Ok(res.rows_affected())
    }
}
