//! CLI definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use twilio_mcp_agent::runner::DEFAULT_QUERY;

/// Ask an LLM a question with a signed Twilio MCP server available as a tool
#[derive(Parser, Debug)]
#[command(name = "twilio-mcp-agent")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Natural-language query for the assistant
    #[arg(default_value = DEFAULT_QUERY)]
    pub query: String,

    /// Optional config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Comma-separated Twilio services to enable (e.g. Voice,Verify)
    #[arg(short, long, value_delimiter = ',')]
    pub services: Option<Vec<String>>,

    /// Model to use instead of the configured one
    #[arg(short, long)]
    pub model: Option<String>,

    /// Print the signed endpoint and exit without calling the API
    #[arg(long)]
    pub dry_run: bool,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}
