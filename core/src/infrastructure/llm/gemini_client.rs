use std::time::Duration;

use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{LLMConfig, entities::app_errors::CoreError},
    generation::{errors::GenerationError, ports::LLMClient, value_objects::ImageInput},
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct GeminiLLMClient {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ContentResponse>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

impl GeminiLLMClient {
    pub fn new(config: &LLMConfig) -> Result<Self, CoreError> {
        if config.gemini_api_key.trim().is_empty() {
            return Err(CoreError::InvalidConfig(
                "Gemini API key is empty".to_string(),
            ));
        }

        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| CoreError::InvalidConfig(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key: config.gemini_api_key.clone(),
            model_name: config.gemini_model.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    fn build_request(
        prompt: String,
        image: Option<&ImageInput>,
        response_schema: serde_json::Value,
    ) -> GeminiRequest {
        let mut parts = Vec::with_capacity(2);

        if let Some(image) = image {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: image.mime_type().to_string(),
                    data: general_purpose::STANDARD.encode(image.data()),
                },
            });
        }
        parts.push(Part::Text { text: prompt });

        GeminiRequest {
            contents: vec![Content { parts }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema,
            }),
        }
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<String, GenerationError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.model_name
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // The URL carries the API key.
                let e = e.without_url();
                tracing::error!("Gemini API request failed: {}", e);
                GenerationError::transport(
                    e.status().map(|s| s.as_u16()),
                    format!("LLM API error: {}", e),
                )
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!("Failed to read Gemini response body: {}", e);
            GenerationError::transport(None, format!("Failed to read LLM response: {}", e))
        })?;

        if !status.is_success() {
            let message = extract_error_message(&body);
            tracing::error!("Gemini API error: {} - {}", status, message);
            return Err(GenerationError::transport(
                Some(status.as_u16()),
                format!("LLM API returned error: {}", message),
            ));
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            GenerationError::MalformedOutput(format!("Failed to parse LLM response: {}", e))
        })?;

        extract_text(gemini_response)
    }
}

impl std::fmt::Debug for GeminiLLMClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiLLMClient")
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<GeminiErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// Concatenates the text parts of the first candidate.
fn extract_text(response: GeminiResponse) -> Result<String, GenerationError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
            .map(|reason| format!(" (blocked: {})", reason))
            .unwrap_or_default();
        return Err(GenerationError::MalformedOutput(format!(
            "No response from LLM{}",
            reason
        )));
    };

    let text: String = candidate
        .content
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.text)
        .collect();

    if text.trim().is_empty() {
        let reason = candidate
            .finish_reason
            .map(|reason| format!(" (finish reason: {})", reason))
            .unwrap_or_default();
        return Err(GenerationError::MalformedOutput(format!(
            "Empty response from LLM{}",
            reason
        )));
    }

    Ok(text)
}

impl LLMClient for GeminiLLMClient {
    async fn generate_with_image(
        &self,
        prompt: String,
        image: ImageInput,
        response_schema: serde_json::Value,
    ) -> Result<String, GenerationError> {
        let request = Self::build_request(prompt, Some(&image), response_schema);

        self.call_gemini_api(request).await
    }

    async fn generate_with_text(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> Result<String, GenerationError> {
        let request = Self::build_request(prompt, None, response_schema);

        self.call_gemini_api(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn config(base_url: &str) -> LLMConfig {
        LLMConfig {
            gemini_api_key: "test-key".to_string(),
            gemini_model: "gemini-2.5-flash".to_string(),
            gemini_base_url: base_url.to_string(),
        }
    }

    #[test]
    fn test_text_request_shape() {
        let request = GeminiLLMClient::build_request(
            "Olá".to_string(),
            None,
            json!({ "type": "object" }),
        );
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [{ "parts": [{ "text": "Olá" }] }],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": { "type": "object" }
                }
            })
        );
    }

    #[test]
    fn test_image_request_puts_inline_data_before_prompt() {
        let image = ImageInput::new(b"abc".to_vec(), "image/webp").unwrap();
        let request = GeminiLLMClient::build_request(
            "Analisa".to_string(),
            Some(&image),
            json!({ "type": "object" }),
        );
        let value = serde_json::to_value(&request).unwrap();
        let parts = &value["contents"][0]["parts"];

        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/webp");
        assert_eq!(parts[0]["inlineData"]["data"], "YWJj");
        assert_eq!(parts[1]["text"], "Analisa");
    }

    #[test]
    fn test_extract_text_joins_parts_of_first_candidate() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] }, "finishReason": "STOP" },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();

        assert_eq!(extract_text(response).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_extract_text_reports_blocked_and_empty_responses() {
        let blocked: GeminiResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();
        let err = extract_text(blocked).unwrap_err();
        assert_eq!(
            err,
            GenerationError::MalformedOutput("No response from LLM (blocked: SAFETY)".to_string())
        );

        let empty: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{ "finishReason": "MAX_TOKENS" }]
        }))
        .unwrap();
        assert_eq!(extract_text(empty).unwrap_err().kind(), "malformed_output");
    }

    #[test]
    fn test_extract_error_message_prefers_api_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(extract_error_message(body), "API key not valid.");
        assert_eq!(extract_error_message(" upstream down "), "upstream down");
    }

    #[test]
    fn test_new_rejects_empty_key_and_debug_redacts_it() {
        let mut empty = config("http://localhost");
        empty.gemini_api_key = "  ".to_string();
        assert!(matches!(
            GeminiLLMClient::new(&empty),
            Err(CoreError::InvalidConfig(_))
        ));

        let client = GeminiLLMClient::new(&config("http://localhost/")).unwrap();
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("test-key"));
        assert!(rendered.contains("http://localhost\""));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_transport_failure() {
        let client = GeminiLLMClient::new(&config("http://127.0.0.1:1/v1beta")).unwrap();

        let err = client
            .generate_with_text("Olá".to_string(), json!({ "type": "object" }))
            .await
            .unwrap_err();

        match err {
            GenerationError::Transport { status, message } => {
                assert_eq!(status, None);
                assert!(!message.contains("test-key"));
            }
            other => panic!("expected transport failure, got {:?}", other),
        }
    }
}
