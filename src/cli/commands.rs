//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - serve: run the invocation gateway over HTTP
//! - invoke: send one prompt through the gateway
//! - wait-build: handle one build-waiter trigger event
//! - start-build: start a container image build
//! - config: print the effective configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// agentcore-relay - build waiter and invocation gateway for a managed agent runtime
#[derive(Parser, Debug)]
#[command(name = "agentcore-relay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the invocation gateway over HTTP
    Serve {
        /// Address to bind (overrides gateway.bind-addr)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Send one prompt to the agent runtime and print the JSON response
    Invoke {
        /// Prompt text
        prompt: String,
    },

    /// Wait for a build described by a trigger event and deliver the outcome
    WaitBuild {
        /// Path to the trigger event JSON ("-" reads stdin)
        #[arg(short, long, default_value = "-")]
        event: String,
    },

    /// Start a build and print its ID
    StartBuild {
        /// Build project name (overrides build.project)
        #[arg(short, long)]
        project: Option<String>,
    },

    /// Print the effective configuration
    Config,
}
