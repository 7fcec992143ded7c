//! Memory capability trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// One remembered interaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryRecord {
    /// Record ID (UUID v7).
    pub id: String,
    /// Owner of the memory.
    pub user_id: String,
    /// Remembered text.
    pub content: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Long-term memory store.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Remember `content` for `user_id`.
    async fn record(&self, content: &str, user_id: &str) -> Result<()>;

    /// Return up to `limit` memories of `user_id` related to `query`, best first.
    async fn recall(&self, query: &str, user_id: &str, limit: usize) -> Result<Vec<MemoryRecord>>;
}

/// Store that remembers nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopMemory;

#[async_trait]
impl MemoryStore for NoopMemory {
    async fn record(&self, _content: &str, _user_id: &str) -> Result<()> {
        Ok(())
    }

    async fn recall(
        &self,
        _query: &str,
        _user_id: &str,
        _limit: usize,
    ) -> Result<Vec<MemoryRecord>> {
        Ok(Vec::new())
    }
}
