//! Post analysis pipeline.
//!
//! Turns raw post text into a structured market proposal using the active
//! LLM provider: deterministic prompt, one completion call, then defensive
//! parsing of the model's reply.

use serde::Deserialize;
use tracing::{debug, error, info};

use crate::domain::{AnalysisRequest, MarketAnalysis, CATEGORIES};
use crate::error::{AnalysisError, MalformedReason};
use crate::service::ProviderSet;

/// Substituted when the model omits confidence or reports something that is
/// not a number in [0, 1]. The single tolerant branch of the parser.
const DEFAULT_CONFIDENCE: f64 = 0.5;

/// LLM-backed post analyzer.
///
/// Holds the provider set resolved at startup; otherwise stateless. One
/// outbound network call per [`analyze`](Self::analyze) invocation, no
/// retries, no partial results.
pub struct PostAnalyzer {
    providers: ProviderSet,
}

impl PostAnalyzer {
    /// Create an analyzer over the given provider set.
    #[must_use]
    pub fn new(providers: ProviderSet) -> Self {
        Self { providers }
    }

    /// Analyze one post into a market proposal.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::ProviderUnavailable`] when no provider is
    ///   configured (no network call is attempted).
    /// - [`AnalysisError::Upstream`] / [`AnalysisError::EmptyResponse`] when
    ///   the provider call fails or returns no text.
    /// - [`AnalysisError::Malformed`] when the reply cannot be interpreted
    ///   as a valid proposal.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<MarketAnalysis, AnalysisError> {
        let Some(llm) = self.providers.active() else {
            error!(
                source = %request.source,
                post_id = %request.post_id,
                "analysis requested but no LLM provider is configured"
            );
            return Err(AnalysisError::ProviderUnavailable);
        };

        info!(
            provider = llm.name(),
            source = %request.source,
            post_id = %request.post_id,
            "analyzing post"
        );

        let prompt = build_prompt(&request.content);
        let raw = match llm.complete(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(
                    provider = llm.name(),
                    source = %request.source,
                    post_id = %request.post_id,
                    error = %e,
                    "provider call failed"
                );
                return Err(AnalysisError::Upstream(e.to_string()));
            }
        };

        if raw.trim().is_empty() {
            error!(
                provider = llm.name(),
                source = %request.source,
                post_id = %request.post_id,
                "provider returned no text"
            );
            return Err(AnalysisError::EmptyResponse);
        }

        debug!(provider = llm.name(), chars = raw.len(), "completion received");

        parse_analysis(&raw).map_err(|reason| {
            error!(
                source = %request.source,
                post_id = %request.post_id,
                reason = %reason,
                "model response did not match the proposal shape"
            );
            AnalysisError::Malformed(reason)
        })
    }
}

/// Build the analysis prompt embedding the literal post content.
fn build_prompt(content: &str) -> String {
    let categories = CATEGORIES.join(", ");
    format!(
        r#"You are a prediction market designer. Turn the following social media post into a betting market proposal.

## Post
{content}

## Requirements
- Write one specific, verifiable question with a clear resolution criterion, answerable by exactly one of two outcomes.
- Provide exactly two mutually exclusive option labels.
- Classify the market into one of: {categories}.
- Rate how suitable this post is for a prediction market as a confidence score between 0 and 1.

## Output (JSON only)
{{
  "question": "...",
  "options": ["...", "..."],
  "category": "...",
  "confidence": 0.8
}}

Return a single JSON object and nothing else."#
    )
}

/// Intermediate shape deserialized straight from the model's JSON.
///
/// Every field is optional here; the explicit validation pass below decides
/// what is an error and what gets a default.
#[derive(Deserialize)]
struct Draft {
    question: Option<String>,
    options: Option<Vec<String>>,
    category: Option<String>,
    #[serde(default)]
    confidence: Option<serde_json::Value>,
}

/// Parse raw model text into a validated [`MarketAnalysis`].
fn parse_analysis(raw: &str) -> Result<MarketAnalysis, MalformedReason> {
    let json_str = extract_json(raw)?;
    let draft: Draft = serde_json::from_str(json_str)
        .map_err(|e| MalformedReason::InvalidJson(e.to_string()))?;

    let question = draft
        .question
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .ok_or(MalformedReason::MissingField("question"))?;
    let options = draft
        .options
        .ok_or(MalformedReason::MissingField("options"))?;
    let category = draft
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or(MalformedReason::MissingField("category"))?;

    // Exactly two options is a strict invariant, never normalized.
    let [first, second]: [String; 2] = options
        .try_into()
        .map_err(|v: Vec<String>| MalformedReason::WrongOptionCount(v.len()))?;

    let confidence = draft
        .confidence
        .as_ref()
        .and_then(serde_json::Value::as_f64)
        .filter(|c| (0.0..=1.0).contains(c))
        .unwrap_or(DEFAULT_CONFIDENCE);

    Ok(MarketAnalysis {
        question,
        options: [first.trim().to_string(), second.trim().to_string()],
        category,
        confidence,
    })
}

/// Locate the first top-level JSON object in the model's text.
///
/// The model may wrap the object in prose or a fenced code block. Fenced
/// ```json blocks are honored first; otherwise a greedy scan takes
/// everything from the first `{` to the last `}`.
fn extract_json(text: &str) -> Result<&str, MalformedReason> {
    if let Some(start) = text.find("```json") {
        let start = start + 7;
        let end = text[start..]
            .find("```")
            .map(|i| start + i)
            .unwrap_or(text.len());
        return Ok(text[start..end].trim());
    }
    match text.find('{') {
        Some(start) => {
            // The last `}` may sit before the first `{` (stray brace in
            // prose); that is no object, not a slice to attempt.
            let end = match text.rfind('}') {
                Some(i) if i >= start => i + 1,
                Some(_) => return Err(MalformedReason::NoJsonObject),
                None => text.len(),
            };
            Ok(&text[start..end])
        }
        None => Err(MalformedReason::NoJsonObject),
    }
}
