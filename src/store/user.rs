use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::auth::principal::UserIdentity;
use crate::config::db::DbConfig;
use crate::db::connection::LazyPool;
use crate::db::mysql_adapter::MySqlDb;
use crate::db::port::{Db, Row};
use crate::params;

/// Port for reading user records.
///
/// ## Contract
///
/// - `connect` is idempotent: calling it on an already connected store, or
///   from many tasks at once, is safe and cheap.
/// - `find_by_id` returns `Ok(None)` for an unknown id. `Err` is reserved
///   for infrastructure faults (connectivity, malformed rows) and must not
///   be used to signal "not found".
/// - Implementations are read-only with respect to user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn connect(&self) -> Result<()>;

    async fn find_by_id(&self, id: &str) -> Result<Option<UserIdentity>>;
}

/// [`UserStore`] backed by a [`Db`] port and a lazily created pool.
///
/// Expects a table with `id`, `name` and a nullable `email` column.
pub struct DbUserStore<D> {
    pool: Arc<LazyPool<D>>,
    select_sql: String,
}

impl<D> DbUserStore<D>
where
    D: Db + Clone,
{
    /// `table` must already be a validated identifier
    /// (see [`AuthConfig`](crate::config::auth::AuthConfig)).
    pub fn new(pool: Arc<LazyPool<D>>, table: &str) -> Self {
        Self {
            pool,
            select_sql: format!("SELECT id, name, email FROM {table} WHERE id = ? LIMIT 1"),
        }
    }
}

impl DbUserStore<MySqlDb> {
    pub fn mysql(cfg: DbConfig, table: &str) -> Self {
        Self::new(Arc::new(LazyPool::mysql(cfg)), table)
    }
}

fn user_from_row(row: &Row) -> Result<UserIdentity> {
    Ok(UserIdentity {
        id: row.get_key("id")?,
        name: row.get_string("name")?,
        email: row.get_string_opt("email")?,
    })
}

#[async_trait]
impl<D> UserStore for DbUserStore<D>
where
    D: Db + Clone,
{
    async fn connect(&self) -> Result<()> {
        self.pool.get_or_connect().await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserIdentity>> {
        let db = self.pool.get_or_connect().await?.clone();
        let sql = self.select_sql.clone();
        let id = id.to_string();

        let row = tokio::task::spawn_blocking(move || db.fetch_one(&sql, &params![id.as_str()]))
            .await
            .context("user lookup task panicked")?
            .context("user lookup failed")?;

        row.as_ref()
            .map(user_from_row)
            .transpose()
            .context("user row has an unexpected shape")
    }
}
