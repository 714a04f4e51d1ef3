mod cli;
mod commands;
mod config;
mod observability;
mod output;

use std::sync::Arc;

use anyhow::{Context, Result};
use assocsync_client::{Credentials, HttpTransport};
use assocsync_core::memory::MemoryTransport;
use assocsync_core::{DynTransport, Reconciler};
use clap::Parser;

use cli::{Backend, Cli, Commands};
use crate::config::AppConfig;
use output::print_error;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut cfg = crate::config::loader::load_config(cli.config.as_deref())
        .map_err(anyhow::Error::msg)?;
    cfg.apply_overrides(cli.endpoint.as_deref(), cli.token.as_deref());
    cfg.validate().map_err(anyhow::Error::msg)?;

    observability::init_tracing_with_level(&cfg.logging.level);

    let reconciler = make_reconciler(cli.backend, &cfg)?;
    let format = cli.format.unwrap_or_default();

    match &cli.command {
        Commands::Create(args) => {
            commands::association::create(
                &reconciler,
                &args.instance_id,
                &args.function_arn,
                format,
            )
            .await?;
        }
        Commands::Read(args) => {
            commands::association::read(&reconciler, &args.id, format).await?;
        }
        Commands::Delete(args) => {
            commands::association::delete(&reconciler, &args.id).await?;
        }
        Commands::Import(args) => {
            commands::association::import(&reconciler, &args.id, format).await?;
        }
        Commands::Status(args) => {
            commands::association::status(&reconciler, &args.id, format).await?;
        }
    }

    Ok(())
}

fn make_reconciler(backend: Backend, cfg: &AppConfig) -> Result<Reconciler> {
    let transport: DynTransport = match backend {
        Backend::Http => {
            let mut transport =
                HttpTransport::with_timeout(&cfg.endpoint.base_url, cfg.request_timeout())
                    .context("Failed to set up control-plane client")?;
            if let Some(token) = &cfg.endpoint.token {
                transport = transport.with_credentials(Credentials::bearer(token));
            }
            Arc::new(transport)
        }
        Backend::Memory => {
            tracing::warn!("Using the in-memory backend; no remote calls will be made");
            Arc::new(MemoryTransport::new())
        }
    };
    Ok(Reconciler::with_config(transport, cfg.reconciler_config()))
}
