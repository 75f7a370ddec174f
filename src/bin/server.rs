//! jumpdef server — serves the jump-to-definition endpoints over HTTP.
//!
//! Usage:
//!   jumpdef-server [--config jumpdef.toml] [--bind ADDR] [--base-url URL] [--token T]
//!
//! Config precedence: flags, then `JUMPDEF_*` environment variables, then the
//! config file, then defaults.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use jumpdef::cli::ServerArgs;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = ServerArgs::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: ServerArgs) -> Result<()> {
    let config = args
        .load_config()
        .with_context(|| format!("loading {}", args.config.display()))?;

    info!(
        bind = %config.bind,
        base_url = %config.base_url,
        extension = %config.extension_name,
        "starting jumpdef server"
    );

    jumpdef::http::server::run(config).await?;
    Ok(())
}
