//! Core domain types: sources, analysis requests, and market proposals.
//!
//! These types are transport-agnostic. Wire-format concerns (camelCase
//! field names, query parameters) live in the HTTP adapter.

mod analysis;
mod post;
mod source;

pub use analysis::{AnalysisRequest, MarketAnalysis, CATEGORIES, MAX_CONTENT_LENGTH};
pub use post::PostRecord;
pub use source::Source;
