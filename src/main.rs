use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::process;

mod cli;

use cli::Cli;
use twilio_mcp_agent::AgentError;
use twilio_mcp_agent::config::{self, Credentials, Settings};
use twilio_mcp_agent::endpoint::{SignedEndpoint, build_endpoint};
use twilio_mcp_agent::llm::{OpenAiClient, OpenAiConfig};
use twilio_mcp_agent::runner::run_query;
use twilio_mcp_agent::service::ServiceName;
use twilio_mcp_agent::signing::TwilioSigner;

fn setup_logging(cli: &Cli, settings: &Settings) -> Result<()> {
    let default_level = if cli.is_verbose() {
        "debug"
    } else {
        settings.log_level.as_deref().unwrap_or("warn")
    };

    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level));

    if let Some(log_file) = &cli.log_file {
        let target = Box::new(
            fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)
                .context("Failed to open log file")?,
        );
        builder.target(env_logger::Target::Pipe(target));
    } else {
        builder.target(env_logger::Target::Stderr);
    }

    builder.init();
    Ok(())
}

/// Print a configuration problem and exit 1 before any network activity.
fn fail_configuration(err: AgentError) -> ! {
    eprintln!("{} {}", "Error:".red(), err);
    process::exit(1);
}

fn prepare_endpoint(cli: &Cli, settings: &Settings, credentials: &Credentials) -> Result<SignedEndpoint, AgentError> {
    let services = match &cli.services {
        Some(names) => ServiceName::parse_list(names)?,
        None => settings.services.clone(),
    };

    build_endpoint(&TwilioSigner, &credentials.auth_token, &credentials.mcp_server, &services)
}

async fn run_application(cli: &Cli, settings: &Settings, credentials: &Credentials) -> Result<()> {
    let endpoint = match prepare_endpoint(cli, settings, credentials) {
        Ok(endpoint) => endpoint,
        Err(e) => fail_configuration(e),
    };
    info!("Signed endpoint: {}", endpoint.url());

    if cli.dry_run {
        println!("{} {}", "URL:".green(), endpoint.url());
        println!("{} {}", "Signature:".green(), endpoint.signature());
        return Ok(());
    }

    let openai_config = OpenAiConfig::with_model(&settings.model).base_url(&settings.openai_base_url);
    let client = OpenAiClient::with_api_key(credentials.openai_api_key.clone(), openai_config)
        .context("Failed to create OpenAI client")?;

    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    run_query(&client, &endpoint, settings, &cli.query, &mut stdout, &mut stderr)
        .await
        .context("Agent run failed")?;

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // .env feeds both settings overrides and credentials
    let dotenv = config::load_dotenv();

    // Load settings
    let mut settings = config::load_settings(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(model) = &cli.model {
        settings.model = model.clone();
    }

    setup_logging(&cli, &settings).context("Failed to setup logging")?;
    info!("Starting with config from: {:?}", cli.config);
    config::log_dotenv(&dotenv);

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => fail_configuration(e),
    };
    info!("Loaded credentials: {:?}", credentials);

    run_application(&cli, &settings, &credentials).await
}
