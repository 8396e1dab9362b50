//! CLI module for twilio-mcp-agent - command-line arguments.

pub mod commands;

pub use commands::Cli;
