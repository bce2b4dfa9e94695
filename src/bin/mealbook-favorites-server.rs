// ABOUTME: Favorites REST backend binary serving per-user favorite rows over HTTP
// ABOUTME: SQLite persistence, structured logging and graceful shutdown on Ctrl-C or SIGTERM
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Mealbook Favorites Server
//!
//! Serves `GET /api/favorites/:userId`, `POST /api/favorites` and
//! `DELETE /api/favorites/:userId/:recipeId` for the remote favorites store.

use anyhow::Result;
use clap::Parser;
use mealbook::{
    config::ServerConfig,
    constants::service_names,
    database::FavoritesManager,
    logging::LoggingConfig,
    routes,
};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "mealbook-favorites-server")]
#[command(about = "Mealbook favorites backend - per-user recipe favorites over REST")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    port: Option<u16>,

    /// Override SQLite database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env();
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    LoggingConfig::for_service(service_names::FAVORITES_SERVER).init()?;

    info!("Starting Mealbook favorites server");
    let manager = Arc::new(FavoritesManager::connect(&config.database_url).await?);
    info!("Database initialized: {}", config.database_url);

    let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.http_port));
    let listener = TcpListener::bind(address).await?;
    info!("Favorites server listening on {address}");

    axum::serve(listener, routes::router(manager))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Favorites server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
