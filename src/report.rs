//! Console rendering of an agent response.

use std::fmt::Write as _;

use crate::llm::AgentResponse;

const NOT_AVAILABLE: &str = "N/A";

/// Render the assistant text followed by a numbered listing of tool calls.
pub fn render_response(response: &AgentResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Assistant Response: {}", response.output_text);

    if !response.tool_calls.is_empty() {
        let _ = writeln!(out, "\nTool Calls Made:");
        for (index, call) in response.tool_calls.iter().enumerate() {
            let _ = writeln!(out, "\n{}. Tool Call: {}", index + 1, call.kind.as_str());
            let _ = writeln!(out, "Function: {}", call.name.as_deref().unwrap_or(NOT_AVAILABLE));
            let _ = writeln!(out, "Arguments: {}", call.arguments.as_deref().unwrap_or(NOT_AVAILABLE));
        }
    }

    out
}
