//! Network Module
//!
//! HTTP server for the records store.
//!
//! ## Architecture
//! - axum router, one handler per endpoint
//! - The store handle is injected as router state
//! - SQLite work runs on the blocking pool, one command per request

mod server;
mod handlers;

pub use server::{router, Server};
pub use handlers::{add_bulk_handler, add_student_handler, delete_student_handler, list_handler};
