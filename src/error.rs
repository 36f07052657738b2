use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Caller input rejected before the analysis pipeline runs.
///
/// Always surfaced as HTTP 400 and never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Content is required")]
    EmptyContent,

    #[error("Content must be at most {max} characters")]
    ContentTooLong { length: usize, max: usize },

    #[error("Source must be either \"twitter\" or \"farcaster\"")]
    InvalidSource { value: String },

    #[error("Post ID is required")]
    EmptyPostId,
}

/// Reasons a model reply could not be interpreted as a market proposal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    #[error("no JSON object found in model output")]
    NoJsonObject,

    #[error("invalid JSON in model output: {0}")]
    InvalidJson(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("expected exactly 2 options, got {0}")]
    WrongOptionCount(usize),
}

/// Failures of the post analysis pipeline.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// No provider credential is configured; no network call is attempted.
    #[error("no language model provider is configured")]
    ProviderUnavailable,

    /// The provider call failed in transit or on the provider side.
    #[error("provider request failed: {0}")]
    Upstream(String),

    /// The provider answered but returned no text.
    #[error("model returned an empty response")]
    EmptyResponse,

    /// The model's text did not match the expected proposal shape.
    #[error("malformed model response: {0}")]
    Malformed(#[from] MalformedReason),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),
}

pub type Result<T> = std::result::Result<T, Error>;
