//! Configuration for twilio-mcp-agent.
//!
//! Two sources, kept apart so secrets never land in a file:
//! 1. Settings (model, instructions, services, ...) from an optional YAML file
//! 2. Credentials (auth token, MCP server, OpenAI key) from the environment or `.env`

use std::path::PathBuf;

use eyre::Result;

pub use self::credentials::{Credentials, REQUIRED_VARS};
pub use self::settings::Settings;

mod credentials;
mod settings;

/// Default LLM model.
pub const DEFAULT_MODEL: &str = "o3";

/// Default OpenAI API base URL.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default label the MCP tool is registered under.
pub const DEFAULT_SERVER_LABEL: &str = "twilio";

/// Default system instructions sent with every query.
pub const DEFAULT_INSTRUCTIONS: &str = "You are a helpful assistant with access to Twilio tools. \
     Use these tools to accomplish the tasks given to you. \
     Always verify inputs and handle errors appropriately.";

/// Load settings from the standard search paths.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. ~/.config/twilio-mcp-agent/twilio-mcp-agent.yml
/// 3. ./twilio-mcp-agent.yml
/// 4. Default values
pub fn load_settings(explicit_path: Option<&PathBuf>) -> Result<Settings> {
    let mut settings = Settings::load(explicit_path)?;
    settings.apply_env(|name| std::env::var(name).ok());
    Ok(settings)
}

/// Load `.env` from the working directory (or a parent) into the process environment.
///
/// Runs before settings and logging are set up so `.env` values such as `OPENAI_BASE_URL` and
/// `RUST_LOG` take effect; the outcome is returned for the caller to log once a logger exists.
/// A missing file is `Ok(None)`.
pub fn load_dotenv() -> std::result::Result<Option<PathBuf>, dotenvy::Error> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Log the outcome of [`load_dotenv`]; a malformed file is reported and otherwise ignored.
pub fn log_dotenv(outcome: &std::result::Result<Option<PathBuf>, dotenvy::Error>) {
    match outcome {
        Ok(Some(path)) => log::debug!("Loaded environment from {}", path.display()),
        Ok(None) => log::debug!("No .env file found"),
        Err(e) => log::warn!("Failed to load .env: {}", e),
    }
}
