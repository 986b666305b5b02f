//! secretgate binary
//!
//! Runs the gateway inside the Lambda runtime, or as a local HTTP server
//! for development.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use secretgate::{lambda, server, telemetry, Config, LogFormat, SecretGateway};
use secretgate_secretsmanager::AwsSecretStore;

#[derive(Parser, Debug)]
#[command(name = "secretgate")]
#[command(about = "Secret retrieval gateway for API Gateway proxy integrations", long_about = None)]
struct Args {
    /// Configuration file (defaults to ./secretgate.toml when present)
    #[arg(long, env = "SECRETGATE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (json or text)
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Custom Secrets Manager endpoint (e.g. LocalStack)
    #[arg(long)]
    secretsmanager_endpoint: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve invocations from the Lambda runtime API (default)
    Lambda,
    /// Serve the gateway over HTTP for local development
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(level) = args.log_level {
        config.log_level = level;
    }
    if let Some(format) = args.log_format {
        config.log_format = format;
    }
    if let Some(endpoint) = args.secretsmanager_endpoint {
        config.secretsmanager_endpoint = Some(endpoint);
    }

    telemetry::init(&config.log_level, config.log_format);

    let mut store = AwsSecretStore::from_env().await;
    if let Some(endpoint) = &config.secretsmanager_endpoint {
        info!(endpoint = %endpoint, "Using custom Secrets Manager endpoint");
        store = store.with_endpoint_url(endpoint);
    }
    let gateway = Arc::new(SecretGateway::new(store));

    match args.command.unwrap_or(Command::Lambda) {
        Command::Lambda => {
            info!("Starting secretgate Lambda runtime");
            lambda::run(gateway)
                .await
                .map_err(|err| anyhow::anyhow!(err))?;
        }
        Command::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let addr: SocketAddr = format!("{host}:{port}")
                .parse()
                .with_context(|| format!("invalid listen address {host}:{port}"))?;

            info!("Starting secretgate development server");
            server::serve(gateway, addr).await?;
        }
    }

    Ok(())
}
