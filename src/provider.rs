//! Question generator clients.
//!
//! Unified interface over the hosted and local text-generation services that
//! back quiz generation (Gemini, OpenAI-compatible endpoints, Ollama). The
//! pipeline only ever sees free text back; any transport or quota failure
//! maps onto a generation-failure condition, and the core never retries.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use crate::error::QuizError;

/// Sampling options forwarded to the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: Some(1.0),
            max_tokens: None,
        }
    }
}

/// Provider selection for [`create_generator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    OpenAi,
    Ollama,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Ollama => "ollama",
        }
    }
}

/// Generator configuration, usually loaded from `quizsmith.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_kind")]
    pub kind: ProviderKind,

    #[serde(default = "default_model")]
    pub model: String,

    /// Falls back to the provider's conventional environment variable
    /// (GEMINI_API_KEY, OPENAI_API_KEY) when unset.
    pub api_key: Option<String>,

    /// Custom endpoint for OpenAI-compatible and Ollama servers.
    pub endpoint: Option<String>,

    #[serde(default)]
    pub options: GenerationOptions,
}

fn default_kind() -> ProviderKind {
    ProviderKind::Gemini
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            model: default_model(),
            api_key: None,
            endpoint: None,
            options: GenerationOptions::default(),
        }
    }
}

/// Generator collaborator: prompt in, free text out.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Produce the raw completion for a prompt.
    async fn generate(&self, prompt: &str) -> Result<String, QuizError>;

    fn provider_name(&self) -> &str;

    fn model_name(&self) -> &str;
}

const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

fn build_http_client() -> Result<Client, QuizError> {
    Client::builder()
        .connect_timeout(HTTP_CONNECT_TIMEOUT)
        .timeout(HTTP_REQUEST_TIMEOUT)
        .build()
        .map_err(|e| QuizError::ProviderError(format!("Failed to create HTTP client: {}", e)))
}

fn map_http_error(error: reqwest::Error) -> QuizError {
    if error.is_timeout() {
        QuizError::ProviderRequestFailed(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        QuizError::ProviderRequestFailed(format!("Connection error: {}", error))
    } else {
        QuizError::ProviderError(format!("HTTP error: {}", error))
    }
}

fn map_status_error(status: reqwest::StatusCode, body: String) -> QuizError {
    match status.as_u16() {
        401 | 403 => QuizError::ProviderAuthFailed(format!("Authentication failed: {}", body)),
        429 => QuizError::ProviderRateLimit(format!("Rate limit exceeded: {}", body)),
        _ => QuizError::ProviderRequestFailed(format!(
            "Request failed with status {}: {}",
            status, body
        )),
    }
}

/// Gemini `generateContent` client.
pub struct GeminiClient {
    client: Client,
    model: String,
    api_key: String,
    base_url: String,
    options: GenerationOptions,
}

impl GeminiClient {
    pub fn new(
        model: String,
        api_key: String,
        base_url: Option<String>,
        options: GenerationOptions,
    ) -> Result<Self, QuizError> {
        let client = build_http_client()?;
        let base_url = base_url
            .unwrap_or_else(|| "https://generativelanguage.googleapis.com/v1beta".to_string());
        Ok(Self {
            client,
            model,
            api_key,
            base_url,
            options,
        })
    }
}

#[async_trait]
impl QuestionGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, QuizError> {
        let mut generation_config = json!({});
        if let Some(temperature) = self.options.temperature {
            generation_config["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = self.options.max_tokens {
            generation_config["maxOutputTokens"] = json!(max_tokens);
        }
        let request_body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": generation_config,
        });

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(map_http_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(map_status_error(status, body));
        }

        #[derive(Deserialize)]
        struct GenerateContentResponse {
            candidates: Option<Vec<Candidate>>,
        }
        #[derive(Deserialize)]
        struct Candidate {
            content: CandidateContent,
        }
        #[derive(Deserialize)]
        struct CandidateContent {
            parts: Vec<Part>,
        }
        #[derive(Deserialize)]
        struct Part {
            text: String,
        }

        let completion: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| QuizError::ProviderError(format!("Failed to parse response: {}", e)))?;

        let text = completion
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .ok_or_else(|| QuizError::ProviderError("No candidates in response".to_string()))?;

        Ok(text)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Client for OpenAI-compatible chat-completions endpoints.
///
/// Covers the hosted OpenAI API, Ollama's `/v1` surface, and any local
/// server speaking the same protocol.
pub struct ChatCompletionsClient {
    client: Client,
    model: String,
    api_key: Option<String>,
    base_url: String,
    options: GenerationOptions,
    provider_name: &'static str,
}

impl ChatCompletionsClient {
    pub fn new(
        model: String,
        api_key: Option<String>,
        base_url: String,
        options: GenerationOptions,
        provider_name: &'static str,
    ) -> Result<Self, QuizError> {
        let client = build_http_client()?;
        Ok(Self {
            client,
            model,
            api_key,
            base_url,
            options,
            provider_name,
        })
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[async_trait]
impl QuestionGenerator for ChatCompletionsClient {
    async fn generate(&self, prompt: &str) -> Result<String, QuizError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.options.temperature,
            max_tokens: self.options.max_tokens,
            stream: false,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let mut request_builder = self
            .client
            .post(&url)
            .header("Content-Type", "application/json");
        if let Some(api_key) = &self.api_key {
            request_builder =
                request_builder.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = request_builder
            .json(&request)
            .send()
            .await
            .map_err(map_http_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(map_status_error(status, body));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| QuizError::ProviderError(format!("Failed to parse response: {}", e)))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| QuizError::ProviderError("No choices in response".to_string()))?;

        Ok(choice.message.content)
    }

    fn provider_name(&self) -> &str {
        self.provider_name
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Build a generator client from configuration.
pub fn create_generator(config: &ProviderConfig) -> Result<Box<dyn QuestionGenerator>, QuizError> {
    match config.kind {
        ProviderKind::Gemini => {
            let api_key = resolve_api_key(config, "GEMINI_API_KEY")?;
            Ok(Box::new(GeminiClient::new(
                config.model.clone(),
                api_key,
                config.endpoint.clone(),
                config.options.clone(),
            )?))
        }
        ProviderKind::OpenAi => {
            let api_key = resolve_api_key(config, "OPENAI_API_KEY")?;
            let base_url = config
                .endpoint
                .clone()
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string());
            Ok(Box::new(ChatCompletionsClient::new(
                config.model.clone(),
                Some(api_key),
                base_url,
                config.options.clone(),
                "openai",
            )?))
        }
        ProviderKind::Ollama => {
            let base_url = config
                .endpoint
                .clone()
                .unwrap_or_else(|| "http://localhost:11434/v1".to_string());
            Ok(Box::new(ChatCompletionsClient::new(
                config.model.clone(),
                None,
                base_url,
                config.options.clone(),
                "ollama",
            )?))
        }
    }
}

fn resolve_api_key(config: &ProviderConfig, env_var: &str) -> Result<String, QuizError> {
    config
        .api_key
        .clone()
        .or_else(|| std::env::var(env_var).ok())
        .ok_or_else(|| {
            QuizError::ProviderNotConfigured(format!(
                "API key required for {}; set provider.api_key or {}",
                config.kind.as_str(),
                env_var
            ))
        })
}

// Mock generator for testing
#[cfg(test)]
pub struct MockGenerator {
    responses: Vec<String>,
    current: std::sync::Mutex<usize>,
}

#[cfg(test)]
impl MockGenerator {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses,
            current: std::sync::Mutex::new(0),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl QuestionGenerator for MockGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, QuizError> {
        let mut idx = self.current.lock().unwrap();
        let response = self
            .responses
            .get(*idx)
            .cloned()
            .unwrap_or_else(|| "Mock response".to_string());
        *idx += 1;
        Ok(response)
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_builds_gemini_from_config_key() {
        let config = ProviderConfig {
            api_key: Some("test-key".to_string()),
            ..ProviderConfig::default()
        };
        let client = create_generator(&config).unwrap();
        assert_eq!(client.provider_name(), "gemini");
        assert_eq!(client.model_name(), "gemini-1.5-flash");
    }

    #[test]
    fn factory_builds_ollama_without_credentials() {
        let config = ProviderConfig {
            kind: ProviderKind::Ollama,
            model: "llama3".to_string(),
            api_key: None,
            endpoint: None,
            options: GenerationOptions::default(),
        };
        let client = create_generator(&config).unwrap();
        assert_eq!(client.provider_name(), "ollama");
        assert_eq!(client.model_name(), "llama3");
    }

    #[test]
    fn provider_kind_round_trips_through_serde() {
        let kind: ProviderKind = serde_json::from_str("\"openai\"").unwrap();
        assert_eq!(kind, ProviderKind::OpenAi);
        assert_eq!(
            serde_json::to_string(&ProviderKind::Gemini).unwrap(),
            "\"gemini\""
        );
    }

    #[tokio::test]
    async fn mock_generator_replays_responses_in_order() {
        let mock = MockGenerator::new(vec!["first".to_string(), "second".to_string()]);
        assert_eq!(mock.generate("p").await.unwrap(), "first");
        assert_eq!(mock.generate("p").await.unwrap(), "second");
        assert_eq!(mock.generate("p").await.unwrap(), "Mock response");
    }

    #[test]
    fn missing_api_key_is_a_configuration_error() {
        // An ambient key would make this test pass vacuously.
        if std::env::var("GEMINI_API_KEY").is_ok() {
            return;
        }
        let config = ProviderConfig::default();
        match create_generator(&config) {
            Err(QuizError::ProviderNotConfigured(msg)) => {
                assert!(msg.contains("GEMINI_API_KEY"));
            }
            Err(other) => panic!("expected ProviderNotConfigured, got {other}"),
            Ok(_) => panic!("expected ProviderNotConfigured, got a client"),
        }
    }
}
