//! User directory: resolves display handles to stored profiles.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    domain::{Principal, UserId},
    Result,
};

/// Profile persistence port.
///
/// The in-memory implementation below is the default; a document store keyed
/// by user id with a secondary handle index fits behind the same trait.
/// `upsert` must be idempotent (replace-or-insert keyed by id).
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_by_id(&self, id: UserId) -> Result<Option<Principal>>;
    async fn get_by_handle(&self, handle: &str) -> Result<Option<Principal>>;
    async fn upsert(&self, principal: Principal) -> Result<()>;
}

#[derive(Default)]
pub struct InMemoryProfileStore {
    inner: RwLock<ProfileTable>,
}

#[derive(Default)]
struct ProfileTable {
    by_id: HashMap<UserId, Principal>,
    /// Handle index, lowercased (Telegram usernames are case-insensitive).
    by_handle: HashMap<String, UserId>,
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get_by_id(&self, id: UserId) -> Result<Option<Principal>> {
        let table = self.inner.read().await;
        Ok(table.by_id.get(&id).cloned())
    }

    async fn get_by_handle(&self, handle: &str) -> Result<Option<Principal>> {
        let table = self.inner.read().await;
        let Some(id) = table.by_handle.get(&handle.to_lowercase()) else {
            return Ok(None);
        };
        Ok(table.by_id.get(id).cloned())
    }

    async fn upsert(&self, principal: Principal) -> Result<()> {
        let mut guard = self.inner.write().await;
        let table = &mut *guard;

        // A changed handle must not leave a stale index entry behind. The
        // old handle may already have been re-registered by another user;
        // only remove the index entry if it still points at this principal.
        if let Some(prev) = table.by_id.get(&principal.id) {
            if let Some(old) = &prev.handle {
                if prev.handle != principal.handle {
                    let key = old.to_lowercase();
                    if table.by_handle.get(&key) == Some(&principal.id) {
                        table.by_handle.remove(&key);
                    }
                }
            }
        }

        if let Some(handle) = &principal.handle {
            table.by_handle.insert(handle.to_lowercase(), principal.id);
        }
        table.by_id.insert(principal.id, principal);
        Ok(())
    }
}

/// Resolves a display handle (numeric id or textual handle) to a profile.
///
/// Numeric-looking input is interpreted as an id; anything else as a handle
/// with an optional leading `@` stripped. Not-found is a normal outcome, not
/// an error.
#[derive(Clone)]
pub struct UserDirectory {
    store: Arc<dyn ProfileStore>,
}

impl UserDirectory {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, handle: &str) -> Result<Option<Principal>> {
        let handle = handle.trim();
        let handle = handle.strip_prefix('@').unwrap_or(handle);
        if handle.is_empty() {
            return Ok(None);
        }

        if handle.chars().all(|c| c.is_ascii_digit()) {
            let Ok(id) = handle.parse::<i64>() else {
                return Ok(None);
            };
            return self.store.get_by_id(UserId(id)).await;
        }

        self.store.get_by_handle(handle).await
    }

    pub async fn upsert(&self, principal: Principal) -> Result<()> {
        self.store.upsert(principal).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn principal(id: i64, handle: Option<&str>, name: &str) -> Principal {
        Principal {
            id: UserId(id),
            handle: handle.map(|s| s.to_string()),
            display_name: name.to_string(),
            last_seen: Utc::now(),
        }
    }

    fn directory() -> UserDirectory {
        UserDirectory::new(Arc::new(InMemoryProfileStore::default()))
    }

    #[tokio::test]
    async fn resolves_by_id_and_handle() {
        let dir = directory();
        dir.upsert(principal(123, Some("alice"), "Alice"))
            .await
            .unwrap();

        for query in ["123", "alice", "@alice"] {
            let found = dir.resolve(query).await.unwrap().expect(query);
            assert_eq!(found.id, UserId(123));
        }
        assert_eq!(dir.resolve("nobody").await.unwrap(), None);
        assert_eq!(dir.resolve("999").await.unwrap(), None);
        assert_eq!(dir.resolve("").await.unwrap(), None);
    }

    #[tokio::test]
    async fn handle_lookup_is_case_insensitive() {
        let dir = directory();
        dir.upsert(principal(1, Some("Alice"), "Alice"))
            .await
            .unwrap();

        let found = dir.resolve("@ALICE").await.unwrap().unwrap();
        assert_eq!(found.id, UserId(1));
    }

    #[tokio::test]
    async fn upsert_replaces_and_drops_stale_handle() {
        let dir = directory();
        dir.upsert(principal(1, Some("old"), "Alice")).await.unwrap();
        dir.upsert(principal(1, Some("new"), "Alice B")).await.unwrap();

        assert_eq!(dir.resolve("old").await.unwrap(), None);
        let found = dir.resolve("new").await.unwrap().unwrap();
        assert_eq!(found.display_name, "Alice B");
    }

    #[tokio::test]
    async fn reassigned_handle_stays_with_its_new_owner() {
        let dir = directory();
        dir.upsert(principal(1, Some("shared"), "Alice"))
            .await
            .unwrap();
        dir.upsert(principal(2, Some("shared"), "Bob")).await.unwrap();
        // Alice moved on to a fresh handle; Bob keeps the old one.
        dir.upsert(principal(1, Some("fresh"), "Alice")).await.unwrap();

        let found = dir.resolve("shared").await.unwrap().unwrap();
        assert_eq!(found.id, UserId(2));
        assert_eq!(dir.resolve("fresh").await.unwrap().unwrap().id, UserId(1));
    }

    #[tokio::test]
    async fn upsert_tolerates_handle_removal() {
        let dir = directory();
        dir.upsert(principal(1, Some("alice"), "Alice"))
            .await
            .unwrap();
        dir.upsert(principal(1, None, "Alice")).await.unwrap();

        assert_eq!(dir.resolve("alice").await.unwrap(), None);
        assert!(dir.resolve("1").await.unwrap().is_some());
    }
}
