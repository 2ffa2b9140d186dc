// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use proxy_attestation_server::ca::CaIdentity;
use proxy_attestation_server::config::Config;
use proxy_attestation_server::proxy::{router, Proxy};
use proxy_attestation_server::session::MemoSessionStore;
use proxy_attestation_server::verifier::VtsClient;
use std::error::Error;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = Config::parse();

    if let Err(e) = run(config).await {
        tracing::error!("proxy attestation server failed: {e}");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), Box<dyn Error>> {
    let ca = CaIdentity::from_pem_files(&config.ca_cert, &config.ca_key)?;

    tracing::info!(
        cert = %config.ca_cert.display(),
        ca = ?ca,
        "CA loaded"
    );

    let sessions = MemoSessionStore::with_limits(config.session_ttl(), config.max_sessions);
    let verifier = VtsClient::new(&config.verifier_url, config.verifier_timeout())?;

    tracing::info!(url = verifier.url(), tenant_id = %config.tenant_id, "using verifier");

    let proxy = Proxy::new(Arc::new(sessions), Arc::new(verifier), Arc::new(ca))
        .with_tenant_id(config.tenant_id.clone())
        .with_verifier_timeout(config.verifier_timeout());

    let listener = tokio::net::TcpListener::bind(config.listen).await?;

    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, router(proxy))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("installing Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::error!("installing SIGTERM handler: {e}");
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

    tracing::info!("shutting down");
}
