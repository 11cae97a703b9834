//! Model Gateway: the single point of entry for all upstream LLM calls.
//!
//! No other module may call the Perplexity API directly. Route handlers
//! depend only on the `ModelGateway` trait so tests can inject a fake.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::Config;

pub mod prompts;

const REQUEST_TIMEOUT_SECS: u64 = 90;
const TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u32 = 4096;
/// One initial attempt plus one retry on 429/5xx/network errors.
const MAX_ATTEMPTS: u32 = 2;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("model returned empty content")]
    EmptyContent,

    #[error("JSON parse error: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("analysis payload is missing required field: {0}")]
    InvalidShape(&'static str),
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorEnvelope {
    error: UpstreamErrorBody,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    message: String,
}

/// Gateway trait carried in `AppState` as `Arc<dyn ModelGateway>` so route
/// handlers never depend on the concrete HTTP client.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Sends the prompt to the external model and returns the parsed,
    /// shape-checked (but otherwise untrusted) JSON payload.
    async fn query(&self, prompt: &str) -> Result<Value, GatewayError>;
}

/// Perplexity chat-completions client with a bounded timeout and a small
/// retry budget.
#[derive(Clone)]
pub struct PerplexityClient {
    client: Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl PerplexityClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key: config.perplexity_api_key.clone(),
            api_url: config.perplexity_api_url.clone(),
            model: config.perplexity_model.clone(),
        }
    }

    /// Makes the chat-completion call and returns the completion text.
    /// Retries once on 429/5xx/network errors with a short backoff.
    async fn call(&self, prompt: &str) -> Result<String, GatewayError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompts::FACT_CHECK_SYSTEM,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let mut last_error: Option<GatewayError> = None;

        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                let delay = std::time::Duration::from_millis(1000 * u64::from(attempt));
                warn!(
                    "Model call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.api_url)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(GatewayError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                // Raw body stays in the operational log; callers only get
                // the extracted message.
                error!("Upstream model returned {status}: {body}");
                last_error = Some(GatewayError::Upstream {
                    status: status.as_u16(),
                    message: extract_upstream_message(&body),
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                error!("Upstream model returned {status}: {body}");
                return Err(GatewayError::Upstream {
                    status: status.as_u16(),
                    message: extract_upstream_message(&body),
                });
            }

            let chat: ChatResponse = response.json().await?;
            let content = chat
                .choices
                .into_iter()
                .next()
                .map(|c| c.message.content)
                .ok_or(GatewayError::EmptyContent)?;

            if content.trim().is_empty() {
                return Err(GatewayError::EmptyContent);
            }

            debug!("Model call succeeded ({} bytes of content)", content.len());

            return Ok(content);
        }

        Err(last_error.unwrap_or(GatewayError::EmptyContent))
    }
}

#[async_trait]
impl ModelGateway for PerplexityClient {
    async fn query(&self, prompt: &str) -> Result<Value, GatewayError> {
        let content = self.call(prompt).await?;
        let text = strip_json_fences(&content);
        let payload: Value = serde_json::from_str(text)?;
        validate_shape(&payload)?;
        Ok(payload)
    }
}

/// Extracts the short `error.message` field from an upstream error body.
/// The raw body itself is never surfaced to clients.
fn extract_upstream_message(body: &str) -> String {
    serde_json::from_str::<UpstreamErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| "Unknown upstream error".to_string())
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
/// The model sometimes wraps JSON in markdown despite instructions.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Minimal structural check before the payload enters the normalizer:
/// numeric trust score, string reasoning, object-typed analysis sections,
/// array-typed citations. Everything deeper is the normalizer's problem.
fn validate_shape(payload: &Value) -> Result<(), GatewayError> {
    if !payload.is_object() {
        return Err(GatewayError::InvalidShape("payload is not a JSON object"));
    }
    if !payload.get("trustScore").map(Value::is_number).unwrap_or(false) {
        return Err(GatewayError::InvalidShape("trustScore"));
    }
    if !payload.get("reasoning").map(Value::is_string).unwrap_or(false) {
        return Err(GatewayError::InvalidShape("reasoning"));
    }
    for key in ["companyVerification", "jobPostingAnalysis", "communityInsights"] {
        if !payload.get(key).map(Value::is_object).unwrap_or(false) {
            return Err(GatewayError::InvalidShape(key));
        }
    }
    if !payload.get("citations").map(Value::is_array).unwrap_or(false) {
        return Err(GatewayError::InvalidShape("citations"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    fn minimal_valid_payload() -> Value {
        json!({
            "trustScore": 0.6,
            "reasoning": "Looks legitimate",
            "companyVerification": {},
            "jobPostingAnalysis": {},
            "communityInsights": {},
            "citations": []
        })
    }

    #[test]
    fn test_validate_shape_accepts_minimal_payload() {
        assert!(validate_shape(&minimal_valid_payload()).is_ok());
    }

    #[test]
    fn test_validate_shape_rejects_non_numeric_trust_score() {
        let mut payload = minimal_valid_payload();
        payload["trustScore"] = json!("high");
        assert!(matches!(
            validate_shape(&payload),
            Err(GatewayError::InvalidShape("trustScore"))
        ));
    }

    #[test]
    fn test_validate_shape_rejects_missing_section() {
        let mut payload = minimal_valid_payload();
        payload.as_object_mut().unwrap().remove("communityInsights");
        assert!(matches!(
            validate_shape(&payload),
            Err(GatewayError::InvalidShape("communityInsights"))
        ));
    }

    #[test]
    fn test_validate_shape_rejects_non_array_citations() {
        let mut payload = minimal_valid_payload();
        payload["citations"] = json!({});
        assert!(matches!(
            validate_shape(&payload),
            Err(GatewayError::InvalidShape("citations"))
        ));
    }

    #[test]
    fn test_extract_upstream_message_from_error_envelope() {
        let body = r#"{"error": {"message": "Rate limit exceeded", "type": "rate_limit"}}"#;
        assert_eq!(extract_upstream_message(body), "Rate limit exceeded");
    }

    #[test]
    fn test_extract_upstream_message_falls_back_on_garbage() {
        assert_eq!(
            extract_upstream_message("<html>502 Bad Gateway</html>"),
            "Unknown upstream error"
        );
    }
}
