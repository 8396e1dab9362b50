//! Core LLM client trait and a mock for tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AgentError, Result};
use crate::llm::types::{AgentResponse, ResponseRequest};

/// Stateless tool-calling client - one request, one response
#[async_trait]
pub trait ResponsesClient: Send + Sync {
    /// Send a request and wait for the complete response
    async fn create(&self, request: ResponseRequest) -> Result<AgentResponse>;

    /// Model used when the request does not name one
    fn model(&self) -> &str;

    /// Whether the client has what it needs to make a call
    fn is_ready(&self) -> bool;
}

/// Replays queued responses and records every request it receives
#[derive(Debug, Default)]
pub struct MockResponsesClient {
    responses: Mutex<VecDeque<Result<AgentResponse>>>,
    requests: Mutex<Vec<ResponseRequest>>,
}

impl MockResponsesClient {
    pub fn new(responses: Vec<Result<AgentResponse>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Mock that answers once with `response`
    pub fn replying(response: AgentResponse) -> Self {
        Self::new(vec![Ok(response)])
    }

    /// Mock that fails once with `error`
    pub fn failing(error: AgentError) -> Self {
        Self::new(vec![Err(error)])
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ResponseRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ResponsesClient for MockResponsesClient {
    async fn create(&self, request: ResponseRequest) -> Result<AgentResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        self.responses
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or_else(|| Err(AgentError::remote("mock has no queued response")))
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    fn is_ready(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_replays_in_order() {
        let first = AgentResponse {
            output_text: "one".to_string(),
            ..Default::default()
        };
        let second = AgentResponse {
            output_text: "two".to_string(),
            ..Default::default()
        };
        let mock = MockResponsesClient::new(vec![Ok(first), Ok(second)]);

        assert_eq!(mock.create(ResponseRequest::new("s")).await.unwrap().output_text, "one");
        assert_eq!(mock.create(ResponseRequest::new("s")).await.unwrap().output_text, "two");
        assert!(mock.create(ResponseRequest::new("s")).await.is_err());
        assert_eq!(mock.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_mock_failing() {
        let mock = MockResponsesClient::failing(AgentError::remote("boom"));
        let err = mock.create(ResponseRequest::new("s")).await.unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_mock_identity() {
        let mock = MockResponsesClient::default();
        assert!(mock.is_ready());
        assert_eq!(mock.model(), "mock-model");
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MockResponsesClient>();
    }
}
