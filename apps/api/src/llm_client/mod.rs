//! LLM Client — the single point of entry for all Gemini API calls.
//!
//! No other module may call the generation endpoint directly; the orchestrator
//! reaches it only through the `TextGenerator` trait.
//!
//! Model: gemini-2.0-flash (hardcoded — the endpoint path is built from it)

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// The model used for every generation call.
pub const MODEL: &str = "gemini-2.0-flash";
/// Keys shorter than this are rejected before any request is made.
pub const MIN_API_KEY_LEN: usize = 10;

const TEMPERATURE: f64 = 0.7;
const TOP_K: u32 = 40;
const TOP_P: f64 = 0.9;
const MAX_OUTPUT_TOKENS: u32 = 1000;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Please enter a valid Gemini API key")]
    InvalidKey,

    /// Built with `without_url`: the request URL carries the key.
    #[error("Gemini API request failed: {0}")]
    Http(reqwest::Error),

    #[error("Gemini API Error: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response format from Gemini API")]
    UnexpectedFormat,
}

/// Produces text for a prompt. Carried in `AppState` as `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, api_key: &str) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_k: u32,
    top_p: f64,
    max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE,
            top_k: TOP_K,
            top_p: TOP_P,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`, if every step of the path exists.
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: Option<GeminiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Wraps one `generateContent` call. No retries, no caching; every call stands alone.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
}

impl GeminiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, LlmError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(LlmError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{MODEL}:generateContent", self.base_url)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, api_key: &str) -> Result<String, LlmError> {
        if api_key.trim().is_empty() || api_key.chars().count() < MIN_API_KEY_LEN {
            return Err(LlmError::InvalidKey);
        }

        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig::default(),
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Http(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Http(e.without_url()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiError>(&body)
                .ok()
                .and_then(|e| e.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|_| LlmError::UnexpectedFormat)?;
        let text = parsed.text().ok_or(LlmError::UnexpectedFormat)?;

        debug!("Gemini call succeeded: {} chars generated", text.len());

        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const KEY: &str = "test-key-0123456789";
    const ENDPOINT_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(server.uri()).unwrap()
    }

    #[tokio::test]
    async fn test_returns_trimmed_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT_PATH))
            .and(query_param("key", KEY))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": " Hello World "}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server).generate("prompt", KEY).await.unwrap();
        assert_eq!(text, "Hello World");
    }

    #[tokio::test]
    async fn test_sends_prompt_and_generation_config() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT_PATH))
            .and(body_partial_json(json!({
                "contents": [{"parts": [{"text": "Write something"}]}],
                "generationConfig": {
                    "temperature": 0.7,
                    "topK": 40,
                    "topP": 0.9,
                    "maxOutputTokens": 1000
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "ok"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server)
            .generate("Write something", KEY)
            .await
            .unwrap();
        assert_eq!(text, "ok");
    }

    #[tokio::test]
    async fn test_short_key_fails_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server).generate("prompt", "short").await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidKey));
        assert_eq!(err.to_string(), "Please enter a valid Gemini API key");
    }

    #[tokio::test]
    async fn test_blank_key_fails_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate("prompt", "            ")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::InvalidKey));
    }

    #[tokio::test]
    async fn test_transport_error_does_not_reveal_key() {
        let secret = "AIzaSECRET-0123456789";
        let client = GeminiClient::new("http://127.0.0.1:9").unwrap();

        let err = client.generate("prompt", secret).await.unwrap_err();

        assert!(matches!(err, LlmError::Http(_)));
        let shown = err.to_string();
        assert!(!shown.contains(secret), "key leaked: {shown}");
        assert!(!format!("{err:?}").contains(secret));
    }

    #[tokio::test]
    async fn test_server_error_carries_reported_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("prompt", KEY).await.unwrap_err();
        match &err {
            LlmError::Api { status, message } => {
                assert_eq!(*status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert_eq!(err.to_string(), "Gemini API Error: API key not valid");
    }

    #[tokio::test]
    async fn test_server_error_without_envelope_is_generic() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("prompt", KEY).await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 500, .. }));
        assert_eq!(err.to_string(), "Gemini API Error: Unknown error");
    }

    #[tokio::test]
    async fn test_missing_candidates_is_format_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"promptFeedback": {}})))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("prompt", KEY).await.unwrap_err();
        assert!(matches!(err, LlmError::UnexpectedFormat));
    }

    #[tokio::test]
    async fn test_missing_parts_is_format_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": []}}]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("prompt", KEY).await.unwrap_err();
        assert!(matches!(err, LlmError::UnexpectedFormat));
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_format_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("prompt", KEY).await.unwrap_err();
        assert!(matches!(err, LlmError::UnexpectedFormat));
    }

    #[test]
    fn test_response_text_path() {
        let parsed: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "first"}, {"text": "second"}]}}]
        }))
        .unwrap();
        assert_eq!(parsed.text(), Some("first"));
    }
}
