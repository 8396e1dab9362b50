//! LLM Client Layer - OpenAI Responses API integration with remote MCP tools
//!
//! This module provides:
//! - Request, tool descriptor, and response types
//! - ResponsesClient trait for API abstraction
//! - OpenAiClient implementation
//! - MockResponsesClient for tests

pub mod client;
pub mod openai;
pub mod types;

pub use client::{MockResponsesClient, ResponsesClient};
pub use openai::{OpenAiClient, OpenAiConfig};
pub use types::{
    AgentResponse, ApprovalMode, McpTool, ResponseRequest, SIGNATURE_HEADER, ToolCall, ToolCallKind, Usage,
};
