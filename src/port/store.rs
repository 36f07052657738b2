//! Post lookup storage port.

use async_trait::async_trait;

use crate::domain::{PostRecord, Source};
use crate::error::Result;

/// Persistent lookup of posts that already have a market.
///
/// The only contract beyond plain reads is idempotence of
/// [`register`](Self::register): registering the same `(source, post_id)`
/// pair twice yields the same stored row both times.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// True iff a record with this `(source, post_id)` pair exists.
    async fn exists(&self, source: Source, post_id: &str) -> Result<bool>;

    /// Insert the pair if absent and return the stored row.
    ///
    /// Idempotent upsert-and-fetch: when the pair already exists the
    /// existing row is returned unchanged — no duplicate, no error.
    async fn register(&self, source: Source, post_id: &str) -> Result<PostRecord>;
}
