//! Study gateway entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Load configuration** from the environment (after reading `.env`, if
//!    present) and validate it.
//! 2. **Wire observability**: install the `tracing-subscriber` stack and, when
//!    configured, the OpenTelemetry OTLP exporter.
//! 3. **Construct infrastructure**: build the [`llm::OpenRouterProvider`] and
//!    inject it into a [`tutor::TutorService`].
//! 4. **Serve** the [`server`] router until Ctrl-C or SIGTERM, letting
//!    in-flight requests finish.

mod config;
mod observability;

use std::sync::Arc;

use anyhow::Context;
use llm::OpenRouterProvider;
use tokio::net::TcpListener;
use tracing::info;
use tutor::TutorService;

use crate::config::GatewayConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let loaded_env_file = dotenvy::dotenv().is_ok();

    let config = GatewayConfig::from_env().context("Invalid configuration")?;
    let telemetry = observability::init(config.log_format, config.otlp_endpoint.as_deref())?;

    if loaded_env_file {
        info!("Loaded .env file");
    }

    let provider = OpenRouterProvider::new(config.upstream.clone())
        .context("Failed to construct upstream client")?;
    info!(
        model = %provider.model(),
        upstream = %config.upstream.base_url,
        timeout_secs = config.upstream.timeout.map(|t| t.as_secs()),
        "Upstream client ready"
    );

    let service = TutorService::new(Arc::new(provider));

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    let result = server::serve(listener, service, shutdown_signal())
        .await
        .context("Server failed");

    info!("Study gateway stopped");
    telemetry.shutdown();
    result
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
