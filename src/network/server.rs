//! HTTP Server
//!
//! Binds the listener, mounts the routes and serves until shutdown.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header::CONTENT_TYPE, Method};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::Notify;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::error::Result;
use crate::protocol::paths;
use crate::store::RecordStore;

use super::handlers::{add_bulk_handler, add_student_handler, delete_student_handler, list_handler};

/// Build the application router around a store handle
pub fn router(store: Arc<RecordStore>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(paths::STUDENTS, get(list_handler))
        .route(paths::ADD_STUDENT, post(add_student_handler))
        .route(paths::ADD_BULK, post(add_bulk_handler))
        .route(paths::DELETE_STUDENT, post(delete_student_handler))
        .layer(cors)
        .with_state(store)
}

/// HTTP server for the records store
pub struct Server {
    config: Config,
    store: Arc<RecordStore>,
    shutdown: Arc<Notify>,
}

impl Server {
    /// Create a new server with the given config and store
    pub fn new(config: Config, store: Arc<RecordStore>) -> Self {
        Self {
            config,
            store,
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Bind the configured address and serve until shutdown
    pub async fn run(&self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.listen_addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until shutdown
    pub async fn serve(&self, listener: TcpListener) -> Result<()> {
        let address = listener.local_addr()?;
        tracing::info!("Server running on {}", address);

        axum::serve(listener, router(Arc::clone(&self.store)))
            .with_graceful_shutdown(shutdown_signal(Arc::clone(&self.shutdown)))
            .await?;

        tracing::info!("Server shutting down...");
        Ok(())
    }

    /// Signal the server to shutdown gracefully
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }
}

async fn shutdown_signal(requested: Arc<Notify>) {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::warn!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
        _ = requested.notified() => tracing::info!("Shutdown requested"),
    }
}
