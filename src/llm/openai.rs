//! OpenAI Responses API client implementation
//!
//! This module implements the ResponsesClient trait for `POST /v1/responses`.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use crate::config::{DEFAULT_MODEL, DEFAULT_OPENAI_BASE_URL};
use crate::error::{AgentError, Result};
use crate::llm::client::ResponsesClient;
use crate::llm::types::{AgentResponse, ResponseRequest, ToolCall, ToolCallKind, Usage};

/// Configuration for the OpenAI client
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub model: String,
    pub base_url: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
        }
    }
}

impl OpenAiConfig {
    /// Create a new config with a specific model
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Point the client at a different API base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url.trim_end_matches('/'))
    }
}

/// OpenAI API client
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    config: OpenAiConfig,
}

impl OpenAiClient {
    /// Create a client with an explicit API key
    pub fn with_api_key(api_key: String, config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| AgentError::remote(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, api_key, config })
    }

    /// Build the request body for the Responses API
    fn build_request(&self, request: &ResponseRequest) -> Value {
        let model = request.model.as_ref().unwrap_or(&self.config.model).clone();

        let mut body = json!({
            "model": model,
            "input": request.input
        });

        if !request.instructions.is_empty() {
            body["instructions"] = json!(request.instructions);
        }

        if !request.tools.is_empty() {
            body["tools"] = json!(request.tools);
        }

        body
    }

    /// Parse the API response into an AgentResponse
    fn parse_response(&self, body: Value) -> Result<AgentResponse> {
        if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
            let message = error["message"].as_str().unwrap_or("unknown error").to_string();
            return Err(AgentError::RemoteCall {
                status: None,
                message: format!("Response failed: {}", message),
                body: Some(body.to_string()),
            });
        }

        let usage = match body.get("usage") {
            Some(u) => Usage::new(
                u["input_tokens"].as_u64().unwrap_or(0),
                u["output_tokens"].as_u64().unwrap_or(0),
            ),
            None => Usage::default(),
        };

        let mut text = String::new();
        let mut tool_calls = Vec::new();
        let mut listed_tools = Vec::new();

        if let Some(items) = body["output"].as_array() {
            for item in items {
                let item_type = item["type"].as_str().unwrap_or("");
                match item_type {
                    "message" => {
                        for part in item["content"].as_array().into_iter().flatten() {
                            if part["type"] != "output_text" {
                                continue;
                            }
                            if let Some(t) = part["text"].as_str() {
                                if !text.is_empty() {
                                    text.push('\n');
                                }
                                text.push_str(t);
                            }
                        }
                    }
                    "mcp_list_tools" => {
                        listed_tools.extend(
                            item["tools"]
                                .as_array()
                                .into_iter()
                                .flatten()
                                .filter_map(|t| t["name"].as_str().map(str::to_string)),
                        );
                    }
                    other => match ToolCallKind::from_item_type(other) {
                        Some(kind) => tool_calls.push(parse_tool_call(item, kind)),
                        None => log::debug!("Skipping output item of type '{}'", other),
                    },
                }
            }
        }

        // The API may also provide the aggregate text directly
        let output_text = match body["output_text"].as_str() {
            Some(t) => t.to_string(),
            None => text,
        };

        Ok(AgentResponse {
            id: body["id"].as_str().unwrap_or("").to_string(),
            output_text,
            tool_calls,
            listed_tools,
            usage,
        })
    }

    /// Send a request to the Responses API
    async fn send_request(&self, body: Value) -> Result<Value> {
        let url = self.config.responses_url();
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::remote(format!("Request failed: {}", e)))?;

        let status = response.status();

        // Rate limiting is reported, never retried
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            let error_body = response.text().await.ok();
            return Err(AgentError::RemoteCall {
                status: Some(429),
                message: format!("Rate limited, retry after {} seconds", retry_after),
                body: error_body,
            });
        }

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AgentError::RemoteCall {
                status: Some(status.as_u16()),
                message: api_error_message(status, &error_body),
                body: Some(error_body),
            });
        }

        response
            .json()
            .await
            .map_err(|e| AgentError::remote(format!("Failed to parse response: {}", e)))
    }
}

fn parse_tool_call(item: &Value, kind: ToolCallKind) -> ToolCall {
    let id = item["id"].as_str().unwrap_or("").to_string();
    let name = item["name"].as_str().map(str::to_string);
    let arguments = match &item["arguments"] {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    };

    let mut call = ToolCall::new(id, kind, name, arguments);
    call.server_label = item["server_label"].as_str().map(str::to_string);
    call
}

/// `API error <status>`, plus the API's own message when the body is a JSON error object
fn api_error_message(status: reqwest::StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string));
    match detail {
        Some(detail) => format!("API error {}: {}", status, detail),
        None => format!("API error {}", status),
    }
}

#[async_trait]
impl ResponsesClient for OpenAiClient {
    async fn create(&self, request: ResponseRequest) -> Result<AgentResponse> {
        let body = self.build_request(&request);
        let response = self.send_request(body).await?;
        self.parse_response(response)
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn is_ready(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// Keep the API key out of Debug output
impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .finish()
    }
}
