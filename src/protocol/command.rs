//! Command definitions
//!
//! Records and the operations clients can ask the store to perform.

use serde::{Deserialize, Serialize};

/// One (name, subject, marks) tuple as it travels over the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub subject: String,
    pub marks: i64,
}

impl Student {
    pub fn new(name: impl Into<String>, subject: impl Into<String>, marks: i64) -> Self {
        Self {
            name: name.into(),
            subject: subject.into(),
            marks,
        }
    }
}

/// A persisted student with its surrogate id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Assigned by the store, never reused
    pub id: i64,
    pub student: Student,
}

impl From<Record> for Student {
    fn from(record: Record) -> Self {
        record.student
    }
}

/// (name, subject) pair used to select records for deletion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaturalKey {
    pub name: String,
    pub subject: String,
}

impl NaturalKey {
    pub fn new(name: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subject: subject.into(),
        }
    }
}

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    List,
    Create,
    CreateBulk,
    Delete,
}

/// A validated command
#[derive(Debug, Clone)]
pub enum Command {
    /// Full table scan in insertion order
    List,

    /// Insert one student
    Create(Student),

    /// Insert every student, all or nothing
    CreateBulk(Vec<Student>),

    /// Remove every record matching the key
    Delete(NaturalKey),
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::List => CommandType::List,
            Command::Create(_) => CommandType::Create,
            Command::CreateBulk(_) => CommandType::CreateBulk,
            Command::Delete(_) => CommandType::Delete,
        }
    }

    /// Whether executing this command writes to the table
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Command::List)
    }
}
