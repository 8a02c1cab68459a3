//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits and a per-call
//! deadline for every store round trip.

use std::future::Future;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::DbError;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default deadline for a single store call or transaction.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Store connection settings
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// PostgreSQL connection string
    pub database_url: String,

    /// Maximum number of pooled connections
    pub max_connections: u32,

    /// Deadline applied to queries, transfers and connection acquisition
    pub timeout: Duration,
}

impl StoreConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the first connection cannot be established within
/// `config.timeout`.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&StoreConfig::new("postgres://localhost/shop")).await?;
/// ```
pub async fn create_pool(config: &StoreConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.timeout)
        .connect(&config.database_url)
        .await
}

/// Run a store call under a deadline.
///
/// On expiry the call's future is dropped, which releases any connection
/// or transaction it held.
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, DbError>
where
    F: Future<Output = Result<T, DbError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(DbError::Timeout {
            millis: limit.as_millis() as u64,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_config_defaults() {
        let config = StoreConfig::new("postgres://localhost/shop");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn with_timeout_passes_result_through() {
        let value = with_timeout(Duration::from_millis(10), async { Ok::<_, DbError>(5) })
            .await
            .unwrap();
        assert_eq!(value, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn with_timeout_expires() {
        let err = with_timeout(Duration::from_millis(250), async {
            std::future::pending::<Result<(), DbError>>().await
        })
        .await
        .unwrap_err();
        assert!(matches!(err, DbError::Timeout { millis: 250 }));
    }

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p shopctl-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_pool_access() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&StoreConfig::new(url))
            .await
            .expect("pool creation failed");

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    let result: (i32,) = sqlx::query_as("SELECT $1::int")
                        .bind(i)
                        .fetch_one(&pool)
                        .await
                        .expect("concurrent query failed");
                    result.0
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.expect("task panicked");
            assert_eq!(result, i as i32);
        }
    }
}
