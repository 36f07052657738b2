//! Application services: provider resolution and the post analysis pipeline.

mod analyzer;
mod provider;

pub use analyzer::PostAnalyzer;
pub use provider::ProviderSet;
