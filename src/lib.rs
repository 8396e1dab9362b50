//! twilio-mcp-agent - hand a signed Twilio MCP endpoint to an LLM as a tool
//!
//! Builds the `/mcp?services=...` URL for the enabled Twilio services, signs it with the
//! account auth token, and sends a natural-language query to the OpenAI Responses API
//! with that endpoint registered as a remote MCP tool.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod llm;
pub mod report;
pub mod runner;
pub mod service;
pub mod signing;

pub use error::{AgentError, Result};
