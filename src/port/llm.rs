//! LLM completion port.
//!
//! Defines a generic interface for large language model completion requests.
//! The analysis pipeline depends on this trait, not on a concrete provider.

use async_trait::async_trait;

use crate::error::Result;

/// Client for large language model text completion.
///
/// Implementations wrap specific providers (Groq, OpenAI) and handle
/// authentication and response decoding.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`) so a single client
/// can serve concurrent analysis requests.
#[async_trait]
pub trait Llm: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Send a completion request and return the generated text.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response cannot
    /// be decoded.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
