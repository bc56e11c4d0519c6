pub mod api;
pub mod error;
pub mod filter;
pub mod id;
pub mod memory;
pub mod models;
pub mod repo;
pub mod response;
pub mod settings;
pub mod store;
pub mod validation;

use anyhow::Context;
use axum::{serve::Serve, Router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::build_app;
use crate::memory::InMemoryBookRepo;
use crate::settings::Settings;

/// Binds the listener and returns its address together with the server
/// future, which does nothing until awaited.
pub async fn start_server(
    settings: &Settings,
) -> anyhow::Result<(SocketAddr, Serve<TcpListener, Router, Router>)> {
    let repo = InMemoryBookRepo::new();

    let router = build_app(repo);

    let listener = TcpListener::bind(settings.address())
        .await
        .with_context(|| format!("failed to bind to {}", settings.address()))?;
    let local_addr = listener
        .local_addr()
        .context("failed to read the bound address")?;
    info!("Listening on {}", local_addr);

    Ok((local_addr, axum::serve(listener, router)))
}
