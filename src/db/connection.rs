//! # Lazy, idempotent connection establishment
//!
//! [`LazyPool`] defers creating a database handle until the first request
//! needs it, and guarantees the factory runs at most once even when many
//! requests race to connect. A failed attempt leaves the cell empty so a
//! later call can try again.
//!
//! # Example
//! ```rust,no_run
//! use session_guard::config::db::DbConfig;
//! use session_guard::db::connection::LazyPool;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let pool = LazyPool::mysql(DbConfig::from_env());
//! let db = pool.get_or_connect().await?; // creates the pool
//! let again = pool.get_or_connect().await?; // reuses it
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::OnceCell;
use tracing::info;

use crate::config::db::{create_pool, DbConfig};
use crate::db::mysql_adapter::MySqlDb;

type Connector<T> = Arc<dyn Fn() -> Result<T> + Send + Sync>;

/// A database handle created on first use.
pub struct LazyPool<T> {
    cell: OnceCell<T>,
    connect: Connector<T>,
}

impl<T> LazyPool<T>
where
    T: Send + Sync + 'static,
{
    /// Wraps a (possibly blocking) factory.
    pub fn new<F>(connect: F) -> Self
    where
        F: Fn() -> Result<T> + Send + Sync + 'static,
    {
        Self {
            cell: OnceCell::new(),
            connect: Arc::new(connect),
        }
    }

    /// Returns the handle, creating it if this is the first call.
    ///
    /// The factory runs on a blocking thread. Concurrent callers wait for
    /// the in-flight attempt instead of starting their own.
    pub async fn get_or_connect(&self) -> Result<&T> {
        self.cell
            .get_or_try_init(|| async {
                let connect = Arc::clone(&self.connect);
                let handle = tokio::task::spawn_blocking(move || connect())
                    .await
                    .context("connection task panicked")??;
                info!("database connection established");
                Ok::<T, anyhow::Error>(handle)
            })
            .await
    }

    pub fn is_connected(&self) -> bool {
        self.cell.initialized()
    }
}

impl LazyPool<MySqlDb> {
    /// Lazily creates a MySQL pool from `cfg`.
    pub fn mysql(cfg: DbConfig) -> Self {
        Self::new(move || Ok(MySqlDb::new(create_pool(&cfg)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn connects_on_first_use_only() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let pool = LazyPool::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(7u32)
        });

        assert!(!pool.is_connected());

        assert_eq!(*pool.get_or_connect().await.unwrap(), 7);
        assert_eq!(*pool.get_or_connect().await.unwrap(), 7);

        assert!(pool.is_connected());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_callers_share_a_single_connection() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let pool = Arc::new(LazyPool::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(20));
            Ok(String::from("pool"))
        }));

        let tasks = (0..8).map(|_| {
            let pool = Arc::clone(&pool);
            tokio::spawn(async move { pool.get_or_connect().await.map(|s| s.clone()) })
        });
        let results = futures::future::join_all(tasks).await;

        for r in results {
            assert_eq!(r.unwrap().unwrap(), "pool");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_attempt_is_retried_on_next_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let pool = LazyPool::new(move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                anyhow::bail!("database unreachable");
            }
            Ok(1u8)
        });

        let err = pool.get_or_connect().await.unwrap_err();
        assert!(err.to_string().contains("unreachable"));
        assert!(!pool.is_connected());

        assert_eq!(*pool.get_or_connect().await.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn mysql_pool_without_url_fails_to_connect() {
        let pool = LazyPool::mysql(DbConfig::default());

        let err = pool.get_or_connect().await.unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }
}
