//! LLM provider resolution.
//!
//! Which providers are usable is decided exactly once at startup, from the
//! presence of environment credentials. The result is a tagged variant that
//! call sites pattern-match; there are no optional client fields to
//! null-check afterwards.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::llm::{Groq, OpenAi};
use crate::config::LlmConfig;
use crate::port::Llm;

/// The set of configured LLM providers, resolved at startup.
///
/// Selection is static preference, not health-based failover: the primary
/// (Groq) is always chosen when configured; the secondary (OpenAI) only when
/// the primary is not. A degraded call is never retried on the other
/// provider mid-request.
pub enum ProviderSet {
    /// No credential configured; every analysis fails without a network call.
    Unconfigured,
    /// Only the primary provider is configured.
    PrimaryOnly(Arc<dyn Llm>),
    /// Only the secondary provider is configured.
    SecondaryOnly(Arc<dyn Llm>),
    /// Both providers are configured; the primary is always used.
    Both {
        primary: Arc<dyn Llm>,
        secondary: Arc<dyn Llm>,
    },
}

impl ProviderSet {
    /// Resolve providers from environment credentials and configuration.
    ///
    /// Reads `GROQ_API_KEY` and `OPENAI_API_KEY`; a provider is configured
    /// iff its key is present. Model and sampling settings come from
    /// `config`.
    pub fn from_env(config: &LlmConfig) -> Self {
        let primary: Option<Arc<dyn Llm>> = match std::env::var("GROQ_API_KEY") {
            Ok(key) => Some(Arc::new(Groq::new(
                key,
                &config.groq.model,
                config.groq.max_tokens,
                config.groq.temperature,
            ))),
            Err(_) => None,
        };
        let secondary: Option<Arc<dyn Llm>> = match std::env::var("OPENAI_API_KEY") {
            Ok(key) => Some(Arc::new(OpenAi::new(
                key,
                &config.openai.model,
                config.openai.max_tokens,
                config.openai.temperature,
            ))),
            Err(_) => None,
        };

        let set = match (primary, secondary) {
            (Some(primary), Some(secondary)) => Self::Both { primary, secondary },
            (Some(primary), None) => Self::PrimaryOnly(primary),
            (None, Some(secondary)) => Self::SecondaryOnly(secondary),
            (None, None) => Self::Unconfigured,
        };

        match set.active() {
            Some(llm) => info!(provider = llm.name(), "LLM provider resolved"),
            None => {
                warn!("neither GROQ_API_KEY nor OPENAI_API_KEY is set, analysis is unavailable")
            }
        }
        set
    }

    /// The provider every analysis call will use, if any.
    pub fn active(&self) -> Option<&dyn Llm> {
        match self {
            Self::Unconfigured => None,
            Self::PrimaryOnly(primary) | Self::Both { primary, .. } => Some(primary.as_ref()),
            Self::SecondaryOnly(secondary) => Some(secondary.as_ref()),
        }
    }
}
