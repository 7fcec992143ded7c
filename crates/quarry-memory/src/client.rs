//! Fail-silent memory handle.
//!
//! Every error is logged at `warn` and swallowed. Callers never branch on
//! whether memory is enabled; a disabled client wraps [`NoopMemory`].

use std::sync::Arc;

use tracing::{debug, warn};

use crate::store::{MemoryStore, NoopMemory};

/// Shared, fail-silent wrapper around a [`MemoryStore`].
#[derive(Clone)]
pub struct MemoryClient {
    store: Arc<dyn MemoryStore>,
    recall_limit: usize,
}

impl MemoryClient {
    /// Wrap a store.
    pub fn new(store: Arc<dyn MemoryStore>, recall_limit: usize) -> Self {
        Self {
            store,
            recall_limit,
        }
    }

    /// A client that remembers nothing.
    pub fn disabled() -> Self {
        Self::new(Arc::new(NoopMemory), 0)
    }

    /// Remember `content` for `user_id`. Failures are logged and ignored.
    pub async fn remember(&self, content: &str, user_id: &str) {
        match self.store.record(content, user_id).await {
            Ok(()) => debug!(user_id, "memory recorded"),
            Err(e) => warn!(
                error = %e,
                category = e.category(),
                user_id,
                "failed to record memory"
            ),
        }
    }

    /// Recall memory contents related to `query`. Failures yield an empty list.
    pub async fn recall(&self, query: &str, user_id: &str) -> Vec<String> {
        if self.recall_limit == 0 {
            return Vec::new();
        }
        match self.store.recall(query, user_id, self.recall_limit).await {
            Ok(records) => records.into_iter().map(|r| r.content).collect(),
            Err(e) => {
                warn!(
                    error = %e,
                    category = e.category(),
                    user_id,
                    "memory recall failed, continuing without context"
                );
                Vec::new()
            }
        }
    }
}

impl Default for MemoryClient {
    fn default() -> Self {
        Self::disabled()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
