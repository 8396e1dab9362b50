//! Secrets read from the environment.

use crate::error::{AgentError, Result};

/// Twilio auth token used as the signing key.
pub const AUTH_TOKEN_VAR: &str = "AUTH_TOKEN";

/// Base address of the Twilio MCP server.
pub const MCP_SERVER_VAR: &str = "MCP_SERVER";

/// OpenAI API key.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Every variable that must be present and non-empty.
pub const REQUIRED_VARS: [&str; 3] = [AUTH_TOKEN_VAR, MCP_SERVER_VAR, OPENAI_API_KEY_VAR];

/// The three required values, constructed once at startup.
#[derive(Clone)]
pub struct Credentials {
    pub auth_token: String,
    pub mcp_server: String,
    pub openai_api_key: String,
}

impl Credentials {
    /// Read credentials from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through `lookup`, reporting every missing variable at once.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let auth_token = get(AUTH_TOKEN_VAR);
        let mcp_server = get(MCP_SERVER_VAR);
        let openai_api_key = get(OPENAI_API_KEY_VAR);

        match (auth_token, mcp_server, openai_api_key) {
            (Some(auth_token), Some(mcp_server), Some(openai_api_key)) => Ok(Self {
                auth_token,
                mcp_server,
                openai_api_key,
            }),
            _ => {
                let missing: Vec<&str> = REQUIRED_VARS.into_iter().filter(|name| get(*name).is_none()).collect();
                Err(AgentError::Configuration(format!(
                    "Missing required environment variables: {}. Please check your .env file.",
                    missing.join(", ")
                )))
            }
        }
    }
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("auth_token", &"[REDACTED]")
            .field("mcp_server", &self.mcp_server)
            .field("openai_api_key", &"[REDACTED]")
            .finish()
    }
}
