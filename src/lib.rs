//! POP (Predict on Posts) backend service.
//!
//! Turns free-text social media posts into structured prediction-market
//! proposals using an LLM provider, and answers whether a market already
//! exists for a given post.
//!
//! # Architecture
//!
//! Hexagonal-lite: a small typed domain, ports at the seams, adapters for
//! the outside world.
//!
//! - **`domain`** - `Source`, `AnalysisRequest`, `MarketAnalysis`, `PostRecord`
//! - **`port`** - `Llm` (provider completion) and `PostStore` (lookup) traits
//! - **`service`** - provider resolution and the analysis pipeline
//! - **`adapter::llm`** - Groq (primary) and OpenAI (fallback) clients
//! - **`adapter::sqlite`** - Diesel-backed post store
//! - **`adapter::http`** - axum router and error mapping
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML with env-held credentials
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use pop_server::adapter::http::{build_router, AppState};
//! use pop_server::adapter::sqlite::{create_pool, run_migrations, SqlitePostStore};
//! use pop_server::config::Config;
//! use pop_server::service::{PostAnalyzer, ProviderSet};
//!
//! let config = Config::default();
//! let pool = create_pool(&config.database.url).unwrap();
//! run_migrations(&pool).unwrap();
//!
//! let state = AppState {
//!     analyzer: Arc::new(PostAnalyzer::new(ProviderSet::from_env(&config.llm))),
//!     store: Arc::new(SqlitePostStore::new(pool)),
//! };
//! let router = build_router(state);
//! ```

pub mod adapter;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
pub mod service;
