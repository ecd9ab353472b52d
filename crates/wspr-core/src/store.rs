//! Access-controlled ephemeral whisper store.
//!
//! The store owns all pending whispers for the lifetime of the process.
//! The entire access-control policy is the two-role check: recipient-only
//! reveal, sender-only delete. All entry state lives behind one async mutex
//! so a reveal observes an entry fully present or fully absent, and the
//! lock is never held across external I/O.

use std::{collections::HashMap, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use rand::Rng;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::{PendingSecret, UserId, WhisperId};

// Same id space as the original bot. Wide enough that collisions are rare,
// but `register` still re-draws until the id is unused.
const ID_MIN: i64 = 10_000_000;
const ID_MAX: i64 = 999_999_999;

/// Outcome of a reveal request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Requester is the recipient; the body is returned unchanged.
    Revealed(String),
    /// Requester is not the recipient.
    Denied,
    /// Unknown id: expired, deleted, or never registered.
    NotFound,
}

/// Outcome of a delete request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Denied,
    NotFound,
}

/// Holds pending whispers keyed by id. Cheap to clone; all clones share the
/// same entry table.
#[derive(Clone, Default)]
pub struct SecretStore {
    entries: Arc<tokio::sync::Mutex<HashMap<WhisperId, PendingSecret>>>,
}

impl SecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a whisper and returns its freshly allocated id.
    pub async fn register(&self, recipient: UserId, sender: UserId, body: &str) -> WhisperId {
        self.register_with(recipient, sender, body.to_string(), || {
            rand::thread_rng().gen_range(ID_MIN..=ID_MAX)
        })
        .await
    }

    /// Registration with a caller-supplied id source; re-draws until the
    /// source yields an id that is not currently pending.
    pub(crate) async fn register_with(
        &self,
        recipient: UserId,
        sender: UserId,
        body: String,
        mut next_id: impl FnMut() -> i64,
    ) -> WhisperId {
        let mut entries = self.entries.lock().await;

        let id = loop {
            let candidate = WhisperId(next_id());
            if !entries.contains_key(&candidate) {
                break candidate;
            }
        };

        entries.insert(
            id,
            PendingSecret {
                id,
                recipient,
                sender,
                body,
                created_at: Utc::now(),
            },
        );
        id
    }

    /// Read-only: a whisper may be revealed any number of times by its
    /// recipient until it is deleted or expired.
    pub async fn reveal(&self, id: WhisperId, requester: UserId) -> RevealOutcome {
        let entries = self.entries.lock().await;
        match entries.get(&id) {
            None => RevealOutcome::NotFound,
            Some(entry) if entry.recipient != requester => RevealOutcome::Denied,
            Some(entry) => RevealOutcome::Revealed(entry.body.clone()),
        }
    }

    /// Removes the entry exactly once; a second delete returns `NotFound`.
    pub async fn delete(&self, id: WhisperId, requester: UserId) -> DeleteOutcome {
        let mut entries = self.entries.lock().await;
        match entries.get(&id) {
            None => DeleteOutcome::NotFound,
            Some(entry) if entry.sender != requester => DeleteOutcome::Denied,
            Some(_) => {
                entries.remove(&id);
                DeleteOutcome::Deleted
            }
        }
    }

    /// Number of currently pending whispers.
    pub async fn pending_count(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Removes entries created before `cutoff`; returns how many were
    /// removed. One short critical section per sweep.
    pub async fn sweep_expired(&self, cutoff: DateTime<Utc>) -> usize {
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.created_at >= cutoff);
        before - entries.len()
    }

    /// Spawns the periodic expiry sweep. The interval wait holds no lock;
    /// each tick locks the table only for the retain pass.
    pub fn spawn_sweeper(&self, every: Duration, retention: Duration) -> JoinHandle<()> {
        let store = self.clone();
        let retention = chrono::Duration::from_std(retention)
            .unwrap_or_else(|_| chrono::Duration::days(7));

        tokio::spawn(async move {
            let mut tick = tokio::time::interval(every);
            tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tick.tick().await;
                let removed = store.sweep_expired(Utc::now() - retention).await;
                if removed > 0 {
                    let pending = store.pending_count().await;
                    tracing::info!(removed, pending, "expired whispers swept");
                }
            }
        })
    }
}
