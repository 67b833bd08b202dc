//! Text-completion client for the assistant panel.
//!
//! One prompt in, one text blob out against a `generateContent`-shaped API.
//! Tip generation asks for a JSON array and parses it tolerantly (code
//! fences stripped first); any failure on that path is recovered locally by
//! the fixed fallback tip list, never surfaced as a hard error.

use std::fmt;

use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::{AssistantConfig, resolve_api_key, resolve_base_url};

/// Prompt for the initial three-tip generation.
pub const TIPS_PROMPT: &str = "You are an AI assistant for \"Swachh Saathi\", an app for clean \
living in Indian cities. Generate 3 distinct, practical waste disposal tips for an Indian \
household, one for each category: 'Segregation', 'Composting', and 'Reduce/Reuse'. Provide a \
short, catchy 'title' and a 'tip' (1-2 sentences). Respond ONLY with a valid JSON array.";

/// Warning shown when live tips could not be loaded.
pub const FALLBACK_WARNING: &str = "Could not load live AI tips. Showing our top suggestions!";

/// Answer substituted when a question could not be forwarded.
pub const CONNECTION_ERROR_ANSWER: &str = "There was an error connecting to the AI. This might \
be a network issue or a problem with the service. Please try again.";

/// Builds the Q&A prompt for a user question.
pub fn question_prompt(question: &str) -> String {
    format!(
        "As the AI assistant for the \"Swachh Saathi\" app in India, please answer the \
         following user's question about waste disposal. IMPORTANT: First, detect the language \
         of the user's question. Then, provide a helpful, concise, and easy-to-understand \
         answer IN THE SAME LANGUAGE. Question: \"{question}\""
    )
}

// ============================================================================
// Tips
// ============================================================================

/// Tip category, used to pick the screen glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipCategory {
    Segregation,
    Composting,
    ReduceReuse,
}

impl TipCategory {
    fn from_label(label: &str) -> Option<Self> {
        match label {
            "Segregation" => Some(Self::Segregation),
            "Composting" => Some(Self::Composting),
            "Reduce/Reuse" => Some(Self::ReduceReuse),
            _ => None,
        }
    }
}

/// A single disposal tip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tip {
    pub title: String,
    pub tip: String,
    pub category: TipCategory,
}

/// The fixed built-in tips used whenever live generation fails.
pub fn fallback_tips() -> Vec<Tip> {
    vec![
        Tip {
            title: "The Two-Bin Rule".to_string(),
            tip: "Always keep two separate bins for wet (kitchen waste) and dry (plastic, \
                  paper, metal) waste. This is the first and most important step in recycling."
                .to_string(),
            category: TipCategory::Segregation,
        },
        Tip {
            title: "Balcony Composting".to_string(),
            tip: "You don't need a large garden to compost. A simple pot on your balcony can \
                  turn vegetable scraps into \"black gold\" for your plants."
                .to_string(),
            category: TipCategory::Composting,
        },
        Tip {
            title: "The Bottle-to-Broom Trick".to_string(),
            tip: "Before throwing away a plastic bottle, consider reusing it. They can be cut \
                  and repurposed into funnels, small planters, or even parts of a DIY broom."
                .to_string(),
            category: TipCategory::ReduceReuse,
        },
    ]
}

#[derive(Debug, Deserialize)]
struct TipPayload {
    title: String,
    tip: String,
    category: Option<String>,
}

/// Parses the model's tip reply: strip code-fence markers, then expect a
/// JSON array of `{title, tip, category}`. Unknown categories default to
/// Segregation.
///
/// # Errors
/// Returns a `Parse` error when the cleaned text is not a tip array.
pub fn parse_tips(raw: &str) -> CompletionResult<Vec<Tip>> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    let payloads: Vec<TipPayload> = serde_json::from_str(cleaned.trim()).map_err(|e| {
        CompletionError::parse(format!("tip reply is not a JSON array: {e}"))
    })?;
    Ok(payloads
        .into_iter()
        .map(|p| Tip {
            category: p
                .category
                .as_deref()
                .and_then(TipCategory::from_label)
                .unwrap_or(TipCategory::Segregation),
            title: p.title,
            tip: p.tip,
        })
        .collect())
}

// ============================================================================
// Errors
// ============================================================================

/// Error category for completion requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionErrorKind {
    /// Non-success HTTP status.
    HttpStatus,
    /// Transport-level failure.
    Network,
    /// Response arrived but did not have the expected structure.
    Parse,
}

/// Structured error from the completion service.
#[derive(Debug, Clone)]
pub struct CompletionError {
    pub kind: CompletionErrorKind,
    pub message: String,
    pub details: Option<String>,
}

impl CompletionError {
    pub fn http_status(status: u16, body: &str) -> Self {
        Self {
            kind: CompletionErrorKind::HttpStatus,
            message: format!("HTTP {status}"),
            details: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: CompletionErrorKind::Parse,
            message: message.into(),
            details: None,
        }
    }

    pub fn from_transport(err: &reqwest::Error) -> Self {
        Self {
            kind: CompletionErrorKind::Network,
            message: err.to_string(),
            details: None,
        }
    }
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CompletionError {}

pub type CompletionResult<T> = std::result::Result<T, CompletionError>;

// ============================================================================
// Client
// ============================================================================

/// Completion service client.
pub struct CompletionClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl CompletionClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    /// Returns an error if no API key is configured.
    pub fn new(config: &AssistantConfig) -> Result<Self> {
        let api_key = resolve_api_key(config.api_key.as_deref(), "GEMINI_API_KEY", "assistant")?;
        let base_url = resolve_base_url(&config.base_url, "SAATHI_ASSISTANT_BASE_URL");
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
            model: config.model.clone(),
        })
    }

    /// Sends one prompt and returns the generated text.
    ///
    /// # Errors
    /// Fails with `HttpStatus`, `Network`, or `Parse`.
    pub async fn complete(&self, prompt: &str) -> CompletionResult<String> {
        let request = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }]
        });
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .http
            .post(&url)
            .headers(build_headers(&self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::from_transport(&e))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(CompletionError::http_status(status.as_u16(), &body));
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| CompletionError::parse(format!("response is not JSON: {e}")))?;
        extract_text(&value)
            .ok_or_else(|| CompletionError::parse("response has no candidate text"))
    }

    /// Generates the three-tip list.
    ///
    /// # Errors
    /// Propagates completion and parse failures; the caller substitutes
    /// [`fallback_tips`] on any error.
    pub async fn generate_tips(&self) -> CompletionResult<Vec<Tip>> {
        let raw = self.complete(TIPS_PROMPT).await?;
        parse_tips(&raw)
    }

    /// Answers a free-form user question.
    ///
    /// # Errors
    /// Propagates completion failures; the caller substitutes
    /// [`CONNECTION_ERROR_ANSWER`].
    pub async fn answer_question(&self, question: &str) -> CompletionResult<String> {
        self.complete(&question_prompt(question)).await
    }
}

fn extract_text(value: &Value) -> Option<String> {
    let text = value
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()?;
    if text.is_empty() {
        return None;
    }
    Some(text.to_string())
}

fn build_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "x-goog-api-key",
        HeaderValue::from_str(api_key).unwrap_or_else(|_| HeaderValue::from_static("")),
    );
    headers.insert("content-type", HeaderValue::from_static("application/json"));
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tips_strips_code_fences() {
        let raw = "```json\n[{\"title\":\"T\",\"tip\":\"Do it.\",\"category\":\"Composting\"}]\n```";
        let tips = parse_tips(raw).expect("parse");
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].title, "T");
        assert_eq!(tips[0].category, TipCategory::Composting);
    }

    #[test]
    fn parse_tips_defaults_unknown_category() {
        let raw = r#"[{"title":"A","tip":"B","category":"Mystery"},{"title":"C","tip":"D"}]"#;
        let tips = parse_tips(raw).expect("parse");
        assert!(tips.iter().all(|t| t.category == TipCategory::Segregation));
    }

    #[test]
    fn parse_tips_rejects_non_array() {
        let err = parse_tips("not json at all").expect_err("should fail");
        assert_eq!(err.kind, CompletionErrorKind::Parse);
    }

    #[test]
    fn fallback_tips_are_the_fixed_three() {
        let tips = fallback_tips();
        assert_eq!(tips.len(), 3);
        assert_eq!(tips[0].title, "The Two-Bin Rule");
        assert_eq!(tips[1].title, "Balcony Composting");
        assert_eq!(tips[2].title, "The Bottle-to-Broom Trick");
    }

    #[test]
    fn extract_text_reads_first_candidate() {
        let value = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "hello" }] }
            }]
        });
        assert_eq!(extract_text(&value).as_deref(), Some("hello"));
        assert_eq!(extract_text(&json!({"candidates": []})), None);
    }
}
