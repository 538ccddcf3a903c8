//! Dashboard Module
//!
//! The presentation side of Gradebook: polls the store, derives views,
//! sends mutations back.
//!
//! ## Flow
//! ```text
//!   RecordsClient ──poll──▶ Snapshot ──render(selection)──▶ DashboardView ──▶ text
//!        ▲                                                                     │
//!        └──────────────── add / add_bulk / delete, then re-poll ◀─────────────┘
//! ```
//!
//! A store that cannot be reached is an empty snapshot, never a failure of
//! the dashboard itself.

mod client;
mod views;
mod text;

pub use client::RecordsClient;
pub use views::{
    render, Bar, DashboardView, GraphKind, Panels, Selection, Snapshot, StudentView,
    SubjectAverage, SubjectSeries,
};
pub use text::render_text;
