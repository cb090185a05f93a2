//! Per-user cache of the computed sidebar hierarchy.
//!
//! The hierarchy is computed once at login and reused across requests.
//! Invalidation triggers are explicit: every rights save for a user must
//! call [`SidebarCache::invalidate`] so the next fetch recomputes against
//! the updated permissions.

use std::collections::HashMap;
use std::sync::RwLock;

use ld_core::types::Id;

pub struct SidebarCache<V> {
    entries: RwLock<HashMap<Id, V>>,
}

impl<V: Clone> SidebarCache<V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, user_id: Id) -> Option<V> {
        let entries = self.entries.read().ok()?;
        entries.get(&user_id).cloned()
    }

    pub fn put(&self, user_id: Id, value: V) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(user_id, value);
        }
    }

    /// Drop a user's cached hierarchy. Called on every rights save.
    pub fn invalidate(&self, user_id: Id) {
        if let Ok(mut entries) = self.entries.write() {
            if entries.remove(&user_id).is_some() {
                tracing::debug!(user_id, "sidebar cache invalidated");
            }
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V: Clone> Default for SidebarCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
