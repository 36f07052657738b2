//! HTTP surface: axum router, request/response DTOs, and error mapping.

mod dto;
mod error;
mod server;

pub use error::ApiError;
pub use server::{build_router, serve, AppState};
