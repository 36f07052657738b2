//! Adapters for external systems: LLM providers, SQLite storage, and the
//! HTTP surface.

pub mod http;
pub mod llm;
pub mod sqlite;
