//! Signed tool-endpoint construction.
//!
//! The URL string built here is the exact byte sequence both the MCP server and the signer
//! must agree on, so nothing downstream may re-encode or normalize it.

use crate::error::{AgentError, Result};
use crate::service::ServiceName;
use crate::signing::{RequestSigner, no_params};

/// Path the Twilio MCP server listens on.
pub const MCP_PATH: &str = "/mcp";

/// Query parameter repeated once per enabled service.
pub const SERVICES_PARAM: &str = "services";

/// An endpoint URL together with its signature. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedEndpoint {
    url: String,
    signature: String,
}

impl SignedEndpoint {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }
}

/// Build `<base>/mcp?services=A&services=B...` in the given service order.
pub fn endpoint_url(base_address: &str, services: &[ServiceName]) -> String {
    let query = services
        .iter()
        .map(|svc| format!("{}={}", SERVICES_PARAM, svc.as_str()))
        .collect::<Vec<_>>()
        .join("&");
    format!("{base_address}{MCP_PATH}?{query}")
}

/// Build the endpoint URL and sign it with no body parameters.
pub fn build_endpoint(
    signer: &dyn RequestSigner,
    signing_key: &str,
    base_address: &str,
    services: &[ServiceName],
) -> Result<SignedEndpoint> {
    if signing_key.is_empty() {
        return Err(AgentError::Configuration("signing key is empty".to_string()));
    }
    if base_address.is_empty() {
        return Err(AgentError::Configuration("base address is empty".to_string()));
    }
    if services.is_empty() {
        return Err(AgentError::Configuration("at least one service is required".to_string()));
    }

    let url = endpoint_url(base_address, services);
    let signature = signer.sign(signing_key, &url, &no_params())?;
    log::debug!("Built signed endpoint for {} service(s): {}", services.len(), url);

    Ok(SignedEndpoint { url, signature })
}
