// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod extract;
mod routes;
mod session;

#[cfg(test)]
mod tests;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use bookstore_persistence::Persistence;
use clap::Parser;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::routes::build_router;

/// Bookstore Server - HTTP backend for catalog, orders, sales and the ledger
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "BOOKSTORE_DATABASE")]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, env = "BOOKSTORE_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, env = "BOOKSTORE_PORT", default_value_t = 8000)]
    port: u16,

    /// How long a login session stays valid
    #[arg(
        long,
        env = "BOOKSTORE_SESSION_TTL_HOURS",
        default_value_t = 24,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    session_ttl_hours: u32,

    /// Seconds between sweeps of expired sessions
    #[arg(
        long,
        env = "BOOKSTORE_SESSION_SWEEP_SECS",
        default_value_t = 300,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    session_sweep_secs: u64,
}

/// Application state shared across handlers.
///
/// One connection behind a mutex; every handler does its persistence work
/// while holding the lock.
#[derive(Clone)]
pub struct AppState {
    pub persistence: Arc<Mutex<Persistence>>,
    pub session_ttl: time::Duration,
}

/// Deletes expired sessions on a fixed interval until the process exits.
async fn sweep_expired_sessions(persistence: Arc<Mutex<Persistence>>, period: std::time::Duration) {
    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        let mut guard = persistence.lock().await;
        match guard.delete_expired_sessions() {
            Ok(0) => {}
            Ok(removed) => info!(removed, "Swept expired sessions"),
            Err(e) => error!(error = %e, "Failed to sweep expired sessions"),
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Bookstore Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        session_ttl: time::Duration::hours(i64::from(args.session_ttl_hours)),
    };

    tokio::spawn(sweep_expired_sessions(
        Arc::clone(&app_state.persistence),
        std::time::Duration::from_secs(args.session_sweep_secs),
    ));

    let app: Router = build_router(app_state);

    let addr: SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
