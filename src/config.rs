//! Configuration loading and logging initialization.
//!
//! Settings come from an optional TOML file; API credentials come only from
//! the environment (`GROQ_API_KEY`, `OPENAI_API_KEY`) so they never end up
//! in a checked-in file.

use serde::Deserialize;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Error, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database path or `:memory:`.
    #[serde(default = "default_database_url")]
    pub url: String,
}

/// LLM provider settings. Which providers are usable is decided by the
/// presence of their environment credentials, not by this config.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Groq-specific settings (primary provider).
    #[serde(default)]
    pub groq: ModelConfig,

    /// OpenAI-specific settings (fallback provider).
    #[serde(default = "ModelConfig::openai_default")]
    pub openai: ModelConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            groq: ModelConfig::default(),
            openai: ModelConfig::openai_default(),
        }
    }
}

/// Per-provider model settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model identifier.
    #[serde(default = "default_groq_model")]
    pub model: String,

    /// Sampling temperature. Lower values produce more deterministic output.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum tokens in the response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: default_groq_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl ModelConfig {
    fn openai_default() -> Self {
        Self {
            model: default_openai_model(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed,
    /// or a value fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = if path.as_ref().exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| Error::Config(ConfigError::ReadFile(e)))?;
            toml::from_str(&content).map_err(|e| Error::Config(ConfigError::Parse(e)))?
        } else {
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.server.bind_addr.is_empty() {
            return Err(Error::Config(ConfigError::MissingField {
                field: "server.bind_addr",
            }));
        }
        if self.database.url.is_empty() {
            return Err(Error::Config(ConfigError::MissingField {
                field: "database.url",
            }));
        }
        for (field, model) in [("llm.groq", &self.llm.groq), ("llm.openai", &self.llm.openai)] {
            if !(0.0..=2.0).contains(&model.temperature) {
                return Err(Error::Config(ConfigError::InvalidValue {
                    field,
                    reason: format!("temperature {} outside 0.0..=2.0", model.temperature),
                }));
            }
            if model.max_tokens == 0 {
                return Err(Error::Config(ConfigError::InvalidValue {
                    field,
                    reason: "max_tokens must be positive".into(),
                }));
            }
        }
        Ok(())
    }

    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:3001".into()
}

fn default_database_url() -> String {
    "pop.sqlite".into()
}

fn default_groq_model() -> String {
    "llama-3.3-70b-versatile".into()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".into()
}

fn default_temperature() -> f64 {
    0.2
}

const fn default_max_tokens() -> usize {
    1024
}
