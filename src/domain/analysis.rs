use serde::{Deserialize, Serialize};

use crate::domain::Source;
use crate::error::ValidationError;

/// Maximum accepted post content length, in characters.
pub const MAX_CONTENT_LENGTH: usize = 1000;

/// Category labels the model is asked to choose from.
pub const CATEGORIES: [&str; 8] = [
    "Politics",
    "Sports",
    "Crypto",
    "Technology",
    "Entertainment",
    "Finance",
    "Science",
    "Other",
];

/// A validated request to analyze one social post.
///
/// Construction is the validation boundary: a value of this type always
/// carries non-empty content within [`MAX_CONTENT_LENGTH`] and a non-empty
/// post id.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub content: String,
    pub source: Source,
    pub post_id: String,
}

impl AnalysisRequest {
    /// Validate raw caller input into a request.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when content is empty or longer than
    /// [`MAX_CONTENT_LENGTH`] characters, or the post id is empty.
    pub fn new(
        content: impl Into<String>,
        source: Source,
        post_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let content = content.into();
        let post_id = post_id.into();

        if content.trim().is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        let length = content.chars().count();
        if length > MAX_CONTENT_LENGTH {
            return Err(ValidationError::ContentTooLong {
                length,
                max: MAX_CONTENT_LENGTH,
            });
        }
        if post_id.trim().is_empty() {
            return Err(ValidationError::EmptyPostId);
        }

        Ok(Self {
            content,
            source,
            post_id,
        })
    }
}

/// A betting-market-shaped proposal produced by the analysis pipeline.
///
/// The two-option invariant is carried in the type: `options` is a fixed
/// two-element array, serialized as a JSON array of two strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub question: String,
    pub options: [String; 2],
    pub category: String,
    pub confidence: f64,
}
