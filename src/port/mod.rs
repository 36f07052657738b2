//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams adapters implement to integrate with external
//! systems: LLM provider APIs and the post lookup storage.

mod llm;
mod store;

pub use llm::Llm;
pub use store::PostStore;
