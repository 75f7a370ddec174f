//! HTTP server loop — binds, serves until Ctrl-C, then drains.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use super::auth::TokenAuth;
use super::router::{build_router, endpoint_path, HELLO_ENDPOINT};
use crate::config::ServerConfig;
use crate::error::Result;
use crate::introspection::{IntrospectionEncoding, PythonJediTemplate};

/// Run the server with `config` until interrupted.
///
/// A token is generated and logged if the config has none.
pub async fn run(mut config: ServerConfig) -> Result<()> {
    config.validate()?;
    let addr = config.bind_addr()?;
    let (token, generated) = config.ensure_token();

    let encoding: Arc<dyn IntrospectionEncoding> = Arc::new(PythonJediTemplate);
    let app = build_router(
        &config.base_url,
        &config.extension_name,
        TokenAuth::new(token.clone()),
        encoding,
    );

    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;

    info!(addr = %local, base_url = %config.base_url, "jumpdef server listening");
    if generated {
        info!(
            "no token configured; use http://{}{}?token={}",
            local,
            endpoint_path(&config.base_url, &config.extension_name, HELLO_ENDPOINT),
            token
        );
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("jumpdef server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
