#![warn(clippy::pedantic, clippy::all, clippy::nursery)]

use crate::{config::DbConfig, state::RegistraState, store::memory::MemoryStudentStore};
use sqlx::postgres::PgPoolOptions;
use std::{env, sync::Arc};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[macro_use]
extern crate tracing;

mod config;
mod data;
mod error;
mod maud_conveniences;
mod query;
mod routes;
mod state;
mod store;

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    warn!("signal received, starting graceful shutdown");
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish(),
    )
    .expect("unable to set tracing subscriber");

    info!("`tracing` online");

    let state = match DbConfig::new() {
        Ok(db_config) => {
            let options = PgPoolOptions::new().max_connections(15);
            RegistraState::new(options, &db_config)
                .await
                .expect("unable to create state")
        }
        Err(e) => {
            warn!(?e, "DB config incomplete, records will not survive a restart");
            RegistraState::with_store(Arc::new(MemoryStudentStore::new()))
        }
    };

    let app = routes::router(state).layer(TraceLayer::new_for_http());

    let server_ip =
        env::var("REGISTRA_SERVER_IP").unwrap_or_else(|_| "127.0.0.1:5050".to_string());
    let listener = TcpListener::bind(&server_ip)
        .await
        .expect("unable to listen on server ip");

    info!(?server_ip, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("unable to serve app");
}
