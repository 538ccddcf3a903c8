//! # Gradebook
//!
//! A small student-records service with:
//! - One SQLite table of (name, subject, marks) records
//! - Create, bulk-create, list and delete over HTTP/JSON
//! - All-or-nothing bulk inserts, delete-all-matches by (name, subject)
//! - A polling dashboard client that derives per-student and per-subject views
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Dashboard (RecordsClient)                   │
//! │           poll /students, render(snapshot, selection)        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ HTTP/JSON
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   HTTP Server (axum)                         │
//! │        decode + validate body -> Command                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    RecordStore                               │
//! │          (one connection behind a Mutex)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌───────────────┐
//!               │    SQLite     │
//!               │  students.db  │
//!               └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod store;
pub mod network;
pub mod dashboard;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{GradebookError, Result};
pub use config::Config;
pub use store::RecordStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Gradebook
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
