//! FLOWGUARD CLI
//!
//! Command-line interface for checking flows against the FLOWGUARD authorizer.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use flowguard_authz::{Authorizer, AuthorizerConfig};
use flowguard_core::{AddressSpace, NetworkMembership, ENV_ADDRESS_SPACE};

/// FLOWGUARD - Network flow authorization
#[derive(Parser)]
#[command(name = "flowguard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide whether a flow is permitted (config from FLOWGUARD_* env / .env)
    Check {
        /// Source address
        source: String,
        /// Destination address
        destination: String,
        /// Destination port
        port: String,
        /// Give up on the policy service after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Report whether an address is inside the internal address space
    Classify {
        /// Address to classify
        address: String,
        /// Internal network CIDR
        #[arg(long, env = ENV_ADDRESS_SPACE)]
        address_space: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "flowguard=debug,info"
    } else {
        "flowguard=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());

    if cli.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    match cli.command {
        Commands::Check {
            source,
            destination,
            port,
            timeout_ms,
        } => cmd_check(&source, &destination, &port, timeout_ms).await,
        Commands::Classify {
            address,
            address_space,
        } => cmd_classify(&address, &address_space),
    }
}

/// Run one authorization check
async fn cmd_check(
    source: &str,
    destination: &str,
    port: &str,
    timeout_ms: Option<u64>,
) -> Result<ExitCode> {
    let config = AuthorizerConfig::from_env().context("Failed to load configuration")?;
    info!(
        address_space = %config.address_space,
        policy_url = %config.policy.validate_url(),
        ttl_secs = config.ttl.as_secs(),
        "Loaded configuration"
    );

    let authorizer = Authorizer::from_config(config).context("Failed to build authorizer")?;

    let outcome = match timeout_ms {
        Some(ms) => {
            authorizer
                .is_authorized_within(source, destination, port, Duration::from_millis(ms))
                .await
        }
        None => authorizer.is_authorized(source, destination, port).await,
    };

    let flow = format!("{} -> {}:{}", source, destination, port);
    match outcome {
        Ok(true) => {
            println!("{} {}", "✅ allowed".green().bold(), flow);
            Ok(ExitCode::SUCCESS)
        }
        Ok(false) => {
            println!("{} {}", "⛔ denied".red().bold(), flow);
            Ok(ExitCode::from(1))
        }
        Err(e) => {
            println!("{} {}", "⛔ denied".red().bold(), flow);
            Err(e).context("Policy validation failed")
        }
    }
}

/// Classify an address against the internal network
fn cmd_classify(address: &str, address_space: &str) -> Result<ExitCode> {
    let space: AddressSpace = address_space
        .parse()
        .context("Invalid address space")?;
    let membership = NetworkMembership::new(space);

    if membership.is_member(address) {
        println!("{} {} is inside {}", "●".green(), address, space);
    } else {
        println!("{} {} is outside {}", "○".yellow(), address, space);
    }

    Ok(ExitCode::SUCCESS)
}
