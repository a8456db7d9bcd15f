// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{env, net::SocketAddr};

use amity_server::api::router;
use amity_server::auth::TokenService;
use amity_server::config::{DEFAULT_HOST, DEFAULT_PORT, HOST_ENV, JWT_SECRET_ENV, LOG_FORMAT_ENV, PORT_ENV};
use amity_server::state::AppState;
use amity_server::store::GraphStore;

#[tokio::main]
async fn main() {
    init_tracing();

    // The signing secret is mandatory; tokens minted with an accidental
    // default would outlive a restart with the real secret.
    let secret = env::var(JWT_SECRET_ENV).expect("JWT_SECRET must be set");

    let state = AppState::new(GraphStore::new(), TokenService::new(&secret));
    let app = router(state);

    let host = env::var(HOST_ENV).unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port: u16 = env::var(PORT_ENV)
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    tracing::info!("Amity server listening on http://{addr} (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=debug"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if matches!(env::var(LOG_FORMAT_ENV).as_deref(), Ok("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, draining connections");
}
