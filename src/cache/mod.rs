use redis::{Client, RedisError, aio::ConnectionManager};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use std::time::Duration;

/// Thin JSON-serializing wrapper over a shared Redis connection.
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    pub async fn new(redis_url: &str) -> Result<Self, RedisError> {
        let client = Client::open(redis_url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection })
    }

    /// Get a value from cache.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> redis::RedisResult<Option<T>> {
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await?;

        match value {
            Some(v) => {
                let deserialized = serde_json::from_str(&v).map_err(|e| {
                    redis::RedisError::from((
                        redis::ErrorKind::TypeError,
                        "Deserialization error",
                        e.to_string(),
                    ))
                })?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    /// Set a value in cache with optional TTL (in seconds).
    pub async fn set<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: Option<u64>,
    ) -> redis::RedisResult<()> {
        let serialized = serde_json::to_string(value).map_err(|e| {
            redis::RedisError::from((
                redis::ErrorKind::TypeError,
                "Serialization error",
                e.to_string(),
            ))
        })?;

        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(serialized);

        if let Some(ttl) = ttl_seconds {
            cmd.arg("EX").arg(ttl);
        }

        cmd.query_async(&mut self.connection.clone()).await
    }

    /// Delete a key from cache.
    pub async fn delete(&self, key: &str) -> redis::RedisResult<()> {
        redis::cmd("DEL")
            .arg(key)
            .query_async(&mut self.connection.clone())
            .await
    }
}

/// Cache key generators
pub mod keys {
    /// Key for a fully-assembled portfolio aggregate
    pub fn portfolio(id: &str) -> String {
        format!("portfolio:{}", id)
    }

    /// Key for a user profile
    pub fn user(id: &str) -> String {
        format!("user:{}", id)
    }

    /// Key for a single client record
    pub fn client(id: &str) -> String {
        format!("client:{}", id)
    }

    /// Key for a single invoice
    pub fn invoice(id: &str) -> String {
        format!("invoice:{}", id)
    }
}

/// Cache configuration
pub struct CacheConfig {
    pub portfolio_ttl: Duration,
    pub user_ttl: Duration,
    pub client_ttl: Duration,
    pub invoice_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            portfolio_ttl: Duration::from_secs(600), // 10 minutes
            user_ttl: Duration::from_secs(900),      // 15 minutes
            client_ttl: Duration::from_secs(600),    // 10 minutes
            invoice_ttl: Duration::from_secs(300),   // 5 minutes
        }
    }
}

impl CacheConfig {
    pub fn from_env() -> Self {
        Self {
            portfolio_ttl: parse_duration_secs("CACHE_TTL_PORTFOLIO", 600),
            user_ttl: parse_duration_secs("CACHE_TTL_USERS", 900),
            client_ttl: parse_duration_secs("CACHE_TTL_CLIENTS", 600),
            invoice_ttl: parse_duration_secs("CACHE_TTL_INVOICES", 300),
        }
    }
}

fn parse_duration_secs(env_var: &str, default: u64) -> Duration {
    std::env::var(env_var)
        .ok()
        .and_then(|v| v.parse().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default))
}

/// Wrapper type for Actix-web app data
pub type CacheData = Arc<RedisCache>;
