//! Text-generation service client.
//!
//! The pipeline asks the service for a JSON object keyed by sheet name,
//! each value an array of row objects. [`OpenAiCompatibleClient`] talks to
//! any `/chat/completions` endpoint; strict-JSON mode requests
//! `response_format: json_object` and the response is fence-stripped before
//! parsing either way, since not every provider honors the flag.

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Generated tables: sheet name -> rows, each row a JSON object.
pub type SheetTables = HashMap<String, Vec<serde_json::Map<String, serde_json::Value>>>;

/// A service that turns extracted text into tabular JSON.
#[async_trait::async_trait]
pub trait TableGenerator {
    /// Generate sheet tables from the document paragraphs.
    async fn generate(
        &self,
        system: &str,
        prompt: &str,
        paragraphs: &[String],
    ) -> Result<SheetTables>;
}

/// Client for OpenAI-compatible chat completion endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleClient {
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f64,
    strict_json: bool,
    http_client: reqwest::Client,
}

impl OpenAiCompatibleClient {
    /// Create a client against `base_url` (without the `/chat/completions`
    /// suffix).
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: None,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            temperature: 0.0,
            strict_json: true,
            http_client: reqwest::Client::new(),
        }
    }

    /// Read `CREWPLAN_API_BASE`, `CREWPLAN_API_KEY`, and `CREWPLAN_MODEL`
    /// from the environment (a `.env` file is honored).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let base_url = std::env::var("CREWPLAN_API_BASE")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let model = std::env::var("CREWPLAN_MODEL")
            .map_err(|_| ReportError::Generation("CREWPLAN_MODEL is not set".to_string()))?;

        let mut client = Self::new(base_url, model);
        client.api_key = std::env::var("CREWPLAN_API_KEY").ok();
        Ok(client)
    }

    /// Set the bearer token.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Toggle the `response_format: json_object` request flag.
    pub fn with_strict_json(mut self, strict_json: bool) -> Self {
        self.strict_json = strict_json;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    async fn request_completion(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: Some(self.temperature),
            response_format: self.strict_json.then(|| ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        };

        let mut builder = self
            .http_client
            .post(self.endpoint())
            .header("Content-Type", "application/json");

        if let Some(api_key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = builder.json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ReportError::Generation(format!(
                "service error ({status}): {error_text}"
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ReportError::Generation(format!("unreadable response: {e}")))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ReportError::MalformedResponse {
                detail: "response contained no choices".to_string(),
            })
    }
}

#[async_trait::async_trait]
impl TableGenerator for OpenAiCompatibleClient {
    async fn generate(
        &self,
        system: &str,
        prompt: &str,
        paragraphs: &[String],
    ) -> Result<SheetTables> {
        let user = format!("{prompt}\n\n---\n\n{}", paragraphs.join("\n\n"));

        tracing::debug!(model = %self.model, strict = self.strict_json, "requesting tables");
        let content = self.request_completion(system, &user).await?;
        parse_sheet_tables(&content)
    }
}

/// Parse the service output into [`SheetTables`], tolerating code fences
/// and surrounding prose.
pub fn parse_sheet_tables(raw: &str) -> Result<SheetTables> {
    let json_str = extract_json_object(raw);
    if json_str.is_empty() {
        return Err(ReportError::MalformedResponse {
            detail: "no JSON object found in response".to_string(),
        });
    }
    Ok(serde_json::from_str(json_str)?)
}

/// Take the substring from the first `{` to the last `}`. Models wrap JSON
/// in markdown fences or lead-in prose even when told not to.
fn extract_json_object(raw: &str) -> &str {
    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if end > start => &raw[start..=end],
        _ => "",
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
