//! Gemini client.
//!
//! Thin HTTP wrapper around the `generateContent` endpoint, configured for
//! structured output: every call carries `responseMimeType: application/json`
//! and a response schema, so the model is contractually bound to the payload
//! shape the caller will parse.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Gemini client configuration.
#[derive(Debug, Clone)]
pub struct GeminiClientConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Model name (e.g., "gemini-2.5-flash").
    pub model: String,
    /// Base endpoint URL.
    pub endpoint: String,
    /// Temperature for generation (0.0 - 2.0).
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GeminiClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-2.5-flash".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            // Slightly creative for the mystical register.
            temperature: 0.8,
            timeout_secs: 30,
        }
    }
}

/// Gemini call errors.
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("http error: {0}")]
    Http(String),
    #[error("response error: {0}")]
    Response(String),
    #[error("empty response: {0}")]
    Empty(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Gemini LLM client.
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiClientConfig,
}

impl GeminiClient {
    /// Create a new Gemini client.
    pub fn new(config: GeminiClientConfig) -> Result<Self, GeminiError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeminiError::Http(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GeminiClientConfig {
        &self.config
    }

    fn build_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.endpoint, self.config.model, self.config.api_key
        )
    }

    /// One structured completion: system instruction + user prompt +
    /// response schema, returning the raw JSON text the model emitted.
    pub async fn generate_json(
        &self,
        system: &str,
        user: &str,
        schema: Value,
    ) -> Result<String, GeminiError> {
        let url = self.build_url();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: user.to_string(),
                }],
            }],
            system_instruction: if system.is_empty() {
                None
            } else {
                Some(GeminiSystemInstruction {
                    parts: vec![GeminiPart {
                        text: system.to_string(),
                    }],
                })
            },
            generation_config: GeminiGenerationConfig {
                temperature: self.config.temperature,
                response_mime_type: "application/json".to_string(),
                response_schema: schema,
            },
        };

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| GeminiError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(GeminiError::Response(format!("HTTP {}: {}", status, text)));
        }

        let text = response
            .text()
            .await
            .map_err(|e| GeminiError::Http(e.to_string()))?;

        let parsed: GeminiResponse =
            serde_json::from_str(&text).map_err(|e| GeminiError::Serialization(e.to_string()))?;

        if let Some(error) = parsed.error {
            return Err(GeminiError::Response(format!(
                "Gemini API error: {}",
                error.message
            )));
        }

        let content = parsed
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| GeminiError::Empty("no content in response".to_string()))?;

        if content.trim().is_empty() {
            return Err(GeminiError::Empty("blank content in response".to_string()));
        }

        Ok(content)
    }
}

// Gemini API request/response structures

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiSystemInstruction>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiSystemInstruction {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
    error: Option<GeminiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContentResponse,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    parts: Vec<GeminiPartResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiPartResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    message: String,
    #[allow(dead_code)]
    code: Option<i32>,
}
