//! Wire-format request/response types and their validation.
//!
//! Raw payloads deserialize with plain string fields so rejections produce
//! the contract's 400 messages instead of generic deserializer errors;
//! `validate` is the bridge into the typed domain.

use serde::Deserialize;

use crate::domain::{AnalysisRequest, Source};
use crate::error::ValidationError;

/// Body of `POST /api/post-analyzer/analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeBody {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub source: String,
    #[serde(default, rename = "postId")]
    pub post_id: String,
}

impl AnalyzeBody {
    /// Validate into a domain request. Source membership is checked first
    /// so an unknown platform never reads as an empty-content error.
    pub fn validate(self) -> Result<AnalysisRequest, ValidationError> {
        let source = parse_source(&self.source)?;
        AnalysisRequest::new(self.content, source, self.post_id)
    }
}

/// Query string of `GET /api/markets/exists`.
#[derive(Debug, Deserialize)]
pub struct ExistsQuery {
    #[serde(rename = "postId")]
    pub post_id: Option<String>,
    pub source: Option<String>,
}

impl ExistsQuery {
    pub fn validate(self) -> Result<(Source, String), ValidationError> {
        let source = parse_source(self.source.as_deref().unwrap_or_default())?;
        let post_id = self.post_id.unwrap_or_default();
        if post_id.trim().is_empty() {
            return Err(ValidationError::EmptyPostId);
        }
        Ok((source, post_id))
    }
}

/// Body of `POST /api/markets/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    #[serde(default)]
    pub source: String,
    #[serde(default, rename = "postId")]
    pub post_id: String,
}

impl RegisterBody {
    pub fn validate(self) -> Result<(Source, String), ValidationError> {
        let source = parse_source(&self.source)?;
        if self.post_id.trim().is_empty() {
            return Err(ValidationError::EmptyPostId);
        }
        Ok((source, self.post_id))
    }
}

fn parse_source(value: &str) -> Result<Source, ValidationError> {
    Source::parse(value).ok_or_else(|| ValidationError::InvalidSource {
        value: value.to_string(),
    })
}
