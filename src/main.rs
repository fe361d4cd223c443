use chrono::Utc;
use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::io::Read;
use std::sync::Arc;

use agentcore_relay::aws::load_sdk_config;
use agentcore_relay::build::{BuildStarter, BuildWaiter, CodeBuildClient};
use agentcore_relay::clock::SystemClock;
use agentcore_relay::domain::WaitOutcome;
use agentcore_relay::gateway::{self, AgentCoreRuntime, Gateway};
use agentcore_relay::resource::{CustomResourceHandler, HttpResultSink, TriggerEvent, reject_event};

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;

fn setup_logging(config: &Config, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else {
        config.log_level.as_deref().unwrap_or("info")
    };

    // RUST_LOG wins over the configured level; output goes to stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();

    info!("Logging initialized at level {}", default_level);
}

async fn build_gateway(config: &Config) -> Result<Gateway> {
    config.validate_gateway()?;
    let sdk_config = load_sdk_config(config.aws.region.as_deref()).await;
    let runtime = Arc::new(AgentCoreRuntime::new(&sdk_config));
    Ok(Gateway::new(runtime, config.gateway_settings()))
}

async fn handle_serve_command(bind: Option<&str>, config: &Config) -> Result<()> {
    let gateway = build_gateway(config).await?;
    let addr = bind.unwrap_or(&config.gateway.bind_addr);
    info!(
        "Serving gateway for {} ({}, payload shape {})",
        config.gateway.runtime_arn, config.gateway.qualifier, config.gateway.payload_shape
    );
    gateway::serve(gateway, addr).await.context("Gateway server failed")?;
    Ok(())
}

async fn handle_invoke_command(prompt: &str, config: &Config) -> Result<()> {
    let gateway = build_gateway(config).await?;
    let result = gateway.handle_prompt(Some(prompt)).await;

    println!("{}", serde_json::to_string_pretty(&result.body)?);
    if !result.status.is_success() {
        eyre::bail!("Invocation failed with status {}", result.status);
    }
    Ok(())
}

fn read_event(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read event from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(source).context(format!("Failed to read event from {}", source))
    }
}

fn prepare_event(raw: &str, config: &Config) -> Result<TriggerEvent> {
    config.validate_waiter()?;
    Ok(TriggerEvent::from_json(raw)?)
}

async fn handle_wait_build_command(event_source: &str, config: &Config) -> Result<()> {
    let raw = read_event(event_source)?;

    // The orchestrator waits on the callback, so a bad event or config still gets FAILED
    let event = match prepare_event(&raw, config) {
        Ok(event) => event,
        Err(e) => {
            let sink = HttpResultSink::new()?;
            if reject_event(&sink, &raw, &e.to_string()).await {
                println!("{} {}", "FAILED".red(), e);
            }
            return Err(e);
        }
    };

    let sdk_config = load_sdk_config(config.aws.region.as_deref()).await;
    let source = Arc::new(CodeBuildClient::new(&sdk_config));
    let waiter = BuildWaiter::new(source, Arc::new(SystemClock), config.waiter_config());
    let sink = Arc::new(HttpResultSink::with_timeout(config.callback_timeout())?);
    let handler = CustomResourceHandler::new(waiter, sink);

    let started = Utc::now();
    let outcome = handler.handle(&event).await;
    let elapsed = Utc::now() - started;

    match &outcome {
        WaitOutcome::Success => println!("{} {:?}", "SUCCESS".green(), event.request_type),
        WaitOutcome::Failure(reason) => println!("{} {}", "FAILED".red(), reason),
        WaitOutcome::Timeout(reason) => println!("{} {}", "TIMEOUT".yellow(), reason),
    }
    println!("  started:  {}", started.to_rfc3339());
    println!("  elapsed:  {}s", elapsed.num_seconds());
    Ok(())
}

async fn handle_start_build_command(project: Option<&str>, config: &Config) -> Result<()> {
    let project = project
        .or(config.build.project.as_deref())
        .ok_or_else(|| eyre::eyre!("No build project given (--project, build.project or BUILD_PROJECT_NAME)"))?;

    let sdk_config = load_sdk_config(config.aws.region.as_deref()).await;
    let client = CodeBuildClient::new(&sdk_config);
    let job = client.start(project).await?;

    info!("Started build {} for project {} ({})", job.id, project, job.status);
    println!("{}", job.id);
    Ok(())
}

fn handle_config_command(config: &Config) -> Result<()> {
    print!("{}", serde_yaml::to_string(config)?);
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        eprintln!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::Serve { bind } => handle_serve_command(bind.as_deref(), config).await,
        Commands::Invoke { prompt } => handle_invoke_command(prompt, config).await,
        Commands::WaitBuild { event } => handle_wait_build_command(event, config).await,
        Commands::StartBuild { project } => handle_start_build_command(project.as_deref(), config).await,
        Commands::Config => handle_config_command(config),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration before logging so its level applies
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(&config, cli.is_verbose());
    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
