//! Anthropic Messages API client.
//!
//! Thin HTTP wrapper for `/messages`. Pure parsing in `parse_response` for
//! testability.

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::config::LlmTimeouts;
use super::types::LlmError;

const API_VERSION: &str = "2023-06-01";

/// The Messages API requires an output cap; reviews are short.
const MAX_REVIEW_TOKENS: u32 = 1024;

// =============================================================================
// CLIENT
// =============================================================================

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl AnthropicClient {
    pub fn new(api_key: String, base_url: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, base_url })
    }

    pub async fn chat(&self, model: &str, system: &str, user: &str) -> Result<String, LlmError> {
        let body = ApiRequest {
            model,
            max_tokens: MAX_REVIEW_TOKENS,
            system,
            messages: vec![ApiMessage { role: "user", content: user }],
        };

        let url = format!("{}/messages", self.base_url);
        let response = self
            .http
            .post(url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

// =============================================================================
// PARSING
// =============================================================================

/// Concatenate the text blocks of a Messages API response, trimmed.
fn parse_response(json_text: &str) -> Result<String, LlmError> {
    let root: Value = serde_json::from_str(json_text).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let blocks = root
        .get("content")
        .and_then(Value::as_array)
        .ok_or_else(|| LlmError::ApiParse("messages: missing content array".to_string()))?;

    let mut out = String::new();
    for block in blocks {
        if block.get("type").and_then(Value::as_str) == Some("text") {
            if let Some(text) = block.get("text").and_then(Value::as_str) {
                out.push_str(text);
            }
        }
    }

    if out.is_empty() {
        return Err(LlmError::ApiParse("messages: no text blocks in content".to_string()));
    }
    Ok(out.trim().to_string())
}
