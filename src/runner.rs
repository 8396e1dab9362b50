//! One-shot agent run: register the signed endpoint, send the query, print the outcome.

use std::io::Write;

use crate::config::Settings;
use crate::endpoint::SignedEndpoint;
use crate::error::{AgentError, Result};
use crate::llm::{AgentResponse, McpTool, ResponseRequest, ResponsesClient};
use crate::report::render_response;

/// Query used when none is given on the command line.
pub const DEFAULT_QUERY: &str = "What Twilio phone numbers are available in my account?";

/// Build the request for `input` with the signed endpoint as the only tool.
pub fn build_request(endpoint: &SignedEndpoint, settings: &Settings, input: &str) -> ResponseRequest {
    let tool = McpTool::signed(&settings.server_label, endpoint, settings.require_approval);
    ResponseRequest::new(&settings.instructions)
        .with_model(&settings.model)
        .with_input(input)
        .with_tools(vec![tool])
}

/// Send `input` to the model and write the report to `out`.
///
/// On failure nothing is written to `out`; the error and any captured response body go to
/// `err` and the error is returned to the caller.
pub async fn run_query<W, E>(
    client: &dyn ResponsesClient,
    endpoint: &SignedEndpoint,
    settings: &Settings,
    input: &str,
    out: &mut W,
    err: &mut E,
) -> Result<AgentResponse>
where
    W: Write,
    E: Write,
{
    let request = build_request(endpoint, settings, input);
    log::info!(
        "Sending query to {} with {} tool(s)",
        request.model.as_deref().unwrap_or(client.model()),
        request.tools.len()
    );

    let result = if client.is_ready() {
        client.create(request).await
    } else {
        Err(AgentError::Configuration("LLM client has no API key".to_string()))
    };

    match result {
        Ok(response) => {
            log::debug!(
                "Response {}: {} tool call(s), {} tokens, tools listed: {:?}",
                response.id,
                response.tool_calls.len(),
                response.usage.total(),
                response.listed_tools
            );
            out.write_all(render_response(&response).as_bytes())?;
            out.flush()?;
            Ok(response)
        }
        Err(e) => {
            log::error!("Agent run failed: {}", e);
            let _ = writeln!(err, "Error running MCP: {}", e);
            if let Some(body) = e.response_body() {
                let _ = writeln!(err, "API Response: {}", body);
            }
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::build_endpoint;
    use crate::llm::{
        ApprovalMode, MockResponsesClient, OpenAiClient, OpenAiConfig, SIGNATURE_HEADER, ToolCall, ToolCallKind,
    };
    use crate::service::ServiceName;
    use crate::signing::TwilioSigner;

    fn endpoint() -> SignedEndpoint {
        build_endpoint(
            &TwilioSigner,
            "secret-token",
            "https://mcp.example.com",
            &[ServiceName::Voice, ServiceName::Verify],
        )
        .unwrap()
    }

    #[test]
    fn test_build_request_carries_signed_tool() {
        let endpoint = endpoint();
        let request = build_request(&endpoint, &Settings::default(), DEFAULT_QUERY);

        assert_eq!(request.model.as_deref(), Some("o3"));
        assert_eq!(request.input, DEFAULT_QUERY);
        assert_eq!(request.tools.len(), 1);

        let tool = &request.tools[0];
        assert_eq!(tool.kind, "mcp");
        assert_eq!(tool.server_label, "twilio");
        assert_eq!(tool.server_url, endpoint.url());
        assert_eq!(tool.require_approval, ApprovalMode::Always);
        assert_eq!(tool.headers.get(SIGNATURE_HEADER).map(String::as_str), Some(endpoint.signature()));
    }

    #[tokio::test]
    async fn test_success_writes_report_only_to_out() {
        let client = MockResponsesClient::replying(AgentResponse {
            output_text: "You have one number.".to_string(),
            tool_calls: vec![ToolCall::new(
                "mcp_1",
                ToolCallKind::McpCall,
                Some("ListIncomingPhoneNumbers".to_string()),
                Some("{}".to_string()),
            )],
            ..Default::default()
        });
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let response = run_query(&client, &endpoint(), &Settings::default(), "numbers?", &mut out, &mut err)
            .await
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(response.output_text, "You have one number.");
        assert!(out.starts_with("Assistant Response: You have one number.\n"));
        assert!(out.contains("1. Tool Call: mcp_call"));
        assert!(err.is_empty());

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].input, "numbers?");
    }

    #[tokio::test]
    async fn test_failure_writes_reason_to_err_and_nothing_to_out() {
        let client = MockResponsesClient::failing(AgentError::remote("Request failed: connection refused"));
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let result = run_query(&client, &endpoint(), &Settings::default(), "numbers?", &mut out, &mut err).await;

        assert!(result.is_err());
        assert!(out.is_empty());
        let err = String::from_utf8(err).unwrap();
        assert!(err.contains("Error running MCP:"));
        assert!(err.contains("connection refused"));
        assert!(!err.contains("API Response:"));
    }

    #[tokio::test]
    async fn test_failure_includes_response_body() {
        let client = MockResponsesClient::failing(AgentError::RemoteCall {
            status: Some(401),
            message: "API error 401 Unauthorized".to_string(),
            body: Some(r#"{"error":{"message":"Incorrect API key"}}"#.to_string()),
        });
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let result = run_query(&client, &endpoint(), &Settings::default(), "q", &mut out, &mut err).await;

        assert!(matches!(result, Err(AgentError::RemoteCall { status: Some(401), .. })));
        let err = String::from_utf8(err).unwrap();
        assert!(err.contains("API Response: {\"error\":{\"message\":\"Incorrect API key\"}}"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_settings_flow_into_request() {
        let settings = Settings {
            model: "gpt-4.1".to_string(),
            server_label: "twilio-prod".to_string(),
            require_approval: ApprovalMode::Never,
            ..Settings::default()
        };
        let client = MockResponsesClient::replying(AgentResponse::default());
        let (mut out, mut err) = (Vec::new(), Vec::new());

        run_query(&client, &endpoint(), &settings, "q", &mut out, &mut err).await.unwrap();

        let request = &client.requests()[0];
        assert_eq!(request.model.as_deref(), Some("gpt-4.1"));
        assert_eq!(request.tools[0].server_label, "twilio-prod");
        assert_eq!(request.tools[0].require_approval, ApprovalMode::Never);
    }

    #[tokio::test]
    async fn test_client_without_key_reports_error() {
        let client = OpenAiClient::with_api_key(String::new(), OpenAiConfig::default()).unwrap();
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let result = run_query(&client, &endpoint(), &Settings::default(), "q", &mut out, &mut err).await;

        assert!(matches!(result, Err(AgentError::Configuration(_))));
        assert!(out.is_empty());
        let err = String::from_utf8(err).unwrap();
        assert!(err.contains("Error running MCP:"));
        assert!(err.contains("no API key"));
    }
}
