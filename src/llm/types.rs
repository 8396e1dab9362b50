//! LLM types for OpenAI Responses API communication
//!
//! This module defines the request, tool descriptor, and response types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::endpoint::SignedEndpoint;

/// Header carrying the endpoint signature on every MCP call the model makes.
pub const SIGNATURE_HEADER: &str = "x-twilio-signature";

/// Whether the remote agent must ask before invoking a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalMode {
    #[default]
    Always,
    Never,
}

/// Remote MCP server exposed to the model as a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpTool {
    #[serde(rename = "type")]
    pub kind: String,
    pub server_label: String,
    pub server_url: String,
    pub require_approval: ApprovalMode,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub headers: BTreeMap<String, String>,
}

impl McpTool {
    /// Create a descriptor for an unauthenticated server
    pub fn new(server_label: impl Into<String>, server_url: impl Into<String>, require_approval: ApprovalMode) -> Self {
        Self {
            kind: "mcp".to_string(),
            server_label: server_label.into(),
            server_url: server_url.into(),
            require_approval,
            headers: BTreeMap::new(),
        }
    }

    /// Create a descriptor for a signed Twilio endpoint, passing URL and signature through unmodified
    pub fn signed(server_label: impl Into<String>, endpoint: &SignedEndpoint, require_approval: ApprovalMode) -> Self {
        Self::new(server_label, endpoint.url(), require_approval).with_header(SIGNATURE_HEADER, endpoint.signature())
    }

    /// Add a request header the agent framework sends to the server
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Request to the LLM
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub instructions: String,
    pub input: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<McpTool>,
}

impl ResponseRequest {
    /// Create a new request with system instructions
    pub fn new(instructions: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
            ..Default::default()
        }
    }

    /// Set the natural-language input
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }

    /// Add tools to the request
    pub fn with_tools(mut self, tools: Vec<McpTool>) -> Self {
        self.tools = tools;
        self
    }

    /// Override the client's default model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Kind of tool activity reported in a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCallKind {
    McpCall,
    McpApprovalRequest,
    FunctionCall,
}

impl ToolCallKind {
    /// Map an output item `type` to a tool call kind
    pub fn from_item_type(item_type: &str) -> Option<Self> {
        match item_type {
            "mcp_call" => Some(Self::McpCall),
            "mcp_approval_request" => Some(Self::McpApprovalRequest),
            "function_call" => Some(Self::FunctionCall),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::McpCall => "mcp_call",
            Self::McpApprovalRequest => "mcp_approval_request",
            Self::FunctionCall => "function_call",
        }
    }
}

/// A tool invocation (or request to invoke) made by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub kind: ToolCallKind,
    pub name: Option<String>,
    pub arguments: Option<String>,
    pub server_label: Option<String>,
}

impl ToolCall {
    /// Create a new tool call
    pub fn new(id: impl Into<String>, kind: ToolCallKind, name: Option<String>, arguments: Option<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name,
            arguments,
            server_label: None,
        }
    }
}

/// Response from the LLM
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentResponse {
    pub id: String,
    pub output_text: String,
    pub tool_calls: Vec<ToolCall>,
    /// Tool names advertised by MCP servers during the run
    pub listed_tools: Vec<String>,
    pub usage: Usage,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl Usage {
    /// Create new usage stats
    pub fn new(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    /// Calculate total tokens
    pub fn total(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}
