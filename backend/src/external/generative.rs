//! Generative Language API client
//!
//! Sends a single-turn text prompt to `models/{model}:generateContent` and
//! returns the concatenated text of the first candidate.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::AiConfig;
use crate::error::{AppError, AppResult};

/// Client for the generative model
#[derive(Clone)]
pub struct GenerativeModelClient {
    http_client: Client,
    api_endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerativeModelClient {
    /// Create a new client from configuration
    pub fn new(config: &AiConfig) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_endpoint: config.api_endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.trim_start_matches("models/").to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_endpoint, self.model)
    }

    /// Send `prompt` and return the raw text reply
    pub async fn generate(&self, prompt: &str) -> AppResult<String> {
        if self.api_key.is_empty() {
            return Err(AppError::AiService("API key not configured".to_string()));
        }

        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http_client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::AiService(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::AiService(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AppError::AiService(format!("Failed to parse response: {}", e)))?;

        extract_text(result)
    }
}

fn extract_text(response: GenerateContentResponse) -> AppResult<String> {
    let candidate = match response.candidates.into_iter().next() {
        Some(c) => c,
        None => {
            let reason = response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates".to_string());
            return Err(AppError::AiService(format!("Model returned no output: {}", reason)));
        }
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AppError::AiService(format!(
            "Model returned empty text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_extract_joins_parts() {
        let response = parse(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"{\"a\":"},{"text":"1}"}]},"finishReason":"STOP"}]}"#,
        );
        assert_eq!(extract_text(response).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_blocked_prompt() {
        let response = parse(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        let err = extract_text(response).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_empty_candidate() {
        let response = parse(r#"{"candidates":[{"finishReason":"MAX_TOKENS"}]}"#);
        let err = extract_text(response).unwrap_err();
        assert!(err.to_string().contains("MAX_TOKENS"));
    }

    #[test]
    fn test_model_prefix_is_stripped() {
        let client = GenerativeModelClient::new(&AiConfig {
            api_endpoint: "http://localhost:1234/v1beta/".into(),
            model: "models/gemini-2.5-flash".into(),
            ..AiConfig::default()
        })
        .unwrap();
        assert_eq!(client.model(), "gemini-2.5-flash");
        assert_eq!(
            client.generate_url(),
            "http://localhost:1234/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_missing_key_is_a_model_failure() {
        let client = GenerativeModelClient::new(&AiConfig::default()).unwrap();
        let result = client.generate("prompt").await;
        assert!(matches!(result, Err(AppError::AiService(_))));
    }

    #[test]
    fn test_request_shape() {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: "hello" }],
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }
}
