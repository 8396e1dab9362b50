//! Non-secret settings, loaded from YAML.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::llm::ApprovalMode;
use crate::service::ServiceName;

/// Environment variable that overrides the OpenAI base URL.
pub const OPENAI_BASE_URL_VAR: &str = "OPENAI_BASE_URL";

/// Settings for one agent run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// LLM model identifier.
    pub model: String,

    /// System instructions sent with the query.
    pub instructions: String,

    /// Services enabled on the MCP endpoint, in URL order.
    pub services: Vec<ServiceName>,

    /// Label the MCP tool is registered under.
    pub server_label: String,

    /// Whether the model must ask before each tool call.
    pub require_approval: ApprovalMode,

    /// Base URL of the OpenAI API.
    pub openai_base_url: String,

    /// Log level filter when RUST_LOG is unset.
    pub log_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: super::DEFAULT_MODEL.to_string(),
            instructions: super::DEFAULT_INSTRUCTIONS.to_string(),
            services: ServiceName::ALL.to_vec(),
            server_label: super::DEFAULT_SERVER_LABEL.to_string(),
            require_approval: ApprovalMode::Always,
            openai_base_url: super::DEFAULT_OPENAI_BASE_URL.to_string(),
            log_level: None,
        }
    }
}

impl Settings {
    /// Load settings with fallback chain.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // Explicit path takes precedence
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_name = env!("CARGO_PKG_NAME");

        if let Some(config_dir) = dirs::config_dir() {
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(settings) => return Ok(settings),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(settings) => return Ok(settings),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let settings: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        settings.validate()?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(settings)
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(OPENAI_BASE_URL_VAR).filter(|v| !v.is_empty()) {
            log::debug!("Using {} from environment: {}", OPENAI_BASE_URL_VAR, base_url);
            self.openai_base_url = base_url;
        }
    }

    /// Validate the settings.
    pub fn validate(&self) -> Result<()> {
        if self.model.is_empty() {
            eyre::bail!("model must not be empty");
        }
        if self.services.is_empty() {
            eyre::bail!("services must list at least one service");
        }
        if self.server_label.is_empty() {
            eyre::bail!("server-label must not be empty");
        }
        Ok(())
    }
}
