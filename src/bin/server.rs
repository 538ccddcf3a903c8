//! Gradebook Server Binary
//!
//! Starts the HTTP records store.

use std::sync::Arc;

use clap::Parser;
use gradebook::network::Server;
use gradebook::{Config, RecordStore};
use tracing_subscriber::{fmt, EnvFilter};

/// Gradebook Server
#[derive(Parser, Debug)]
#[command(name = "gradebook-server")]
#[command(about = "Student records store over HTTP/JSON")]
#[command(version)]
struct Args {
    /// SQLite database file
    #[arg(short, long, default_value = "students.db")]
    db: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:5000")]
    listen: String,

    /// How long to wait on a locked database (milliseconds)
    #[arg(long, default_value = "5000")]
    busy_timeout_ms: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gradebook=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("Gradebook Server v{}", gradebook::VERSION);
    tracing::info!("Database: {}", args.db);
    tracing::info!("Listen address: {}", args.listen);

    // Build config from args
    let config = Config::builder()
        .db_path(&args.db)
        .listen_addr(&args.listen)
        .busy_timeout_ms(args.busy_timeout_ms)
        .build();

    // Open store
    let store = match RecordStore::open(config.clone()) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Store initialized successfully");

    let server = Server::new(config, store);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
