use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::Source;

/// A registered post, keyed by `(source, post_id)`.
///
/// One row exists per post that has (or is getting) a market. The surrogate
/// id is assigned by storage; `(source, post_id)` stays unique.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub id: i32,
    pub source: Source,
    pub post_id: String,
    pub created_at: DateTime<Utc>,
}
