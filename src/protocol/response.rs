//! Response definitions
//!
//! Acknowledgments returned to clients, and the raw outcome of a command.

use serde::{Deserialize, Serialize};

use super::Record;

/// Acknowledgment body for mutations and errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub message: String,

    /// Records inserted by a bulk request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    /// Records removed by a delete request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<usize>,
}

impl Ack {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            count: None,
            deleted: None,
        }
    }

    pub fn student_added() -> Self {
        Self::new("Student added")
    }

    pub fn bulk_added(count: usize) -> Self {
        Self {
            count: Some(count),
            ..Self::new("Bulk students added")
        }
    }

    pub fn student_deleted(deleted: usize) -> Self {
        Self {
            deleted: Some(deleted),
            ..Self::new("Student deleted")
        }
    }
}

/// What the store did for a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Snapshot in insertion order
    Listed(Vec<Record>),

    /// Newly inserted records, in request order
    Created(Vec<Record>),

    /// Number of rows removed
    Deleted(usize),
}
