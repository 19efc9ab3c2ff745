use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;

use super::user::UserStore;
use crate::auth::principal::UserIdentity;

/// In-process [`UserStore`] for development and tests.
///
/// Counts `connect` and `find_by_id` calls so callers can assert whether
/// the store was contacted at all.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, UserIdentity>>,
    connects: AtomicUsize,
    lookups: AtomicUsize,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, user: UserIdentity) -> Self {
        self.insert(user);
        self
    }

    pub fn insert(&self, user: UserIdentity) {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        users.insert(user.id.clone(), user);
    }

    pub fn remove(&self, id: &str) -> Option<UserIdentity> {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        users.remove(id)
    }

    pub fn connect_calls(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn lookup_calls(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn connect(&self) -> Result<()> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserIdentity>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        Ok(users.get(id).cloned())
    }
}
