//! Store Module
//!
//! The records store: one SQLite table of students behind a single handle.
//!
//! ## Responsibilities
//! - Create the `students` table on first open
//! - Validate and insert single and bulk requests
//! - Full-table reads in insertion order
//! - Delete by (name, subject)
//!
//! ## Schema
//! ```text
//! students
//! ┌──────────────────────────────────┬──────────────────┐
//! │ id INTEGER PK AUTOINCREMENT      │ never reused     │
//! │ name TEXT NOT NULL               │                  │
//! │ subject TEXT NOT NULL            │                  │
//! │ marks INTEGER NOT NULL           │                  │
//! └──────────────────────────────────┴──────────────────┘
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use parking_lot::Mutex;
use rusqlite::{params, Connection};

use crate::config::Config;
use crate::error::{GradebookError, Result};
use crate::protocol::{Command, NaturalKey, Outcome, Record, Student};

/// Handle to the records table
///
/// ## Concurrency
///
/// The connection sits behind a `Mutex`, so every operation runs alone
/// against SQLite. Each operation is either one statement or one
/// transaction, so a reader never sees half of a bulk insert and concurrent
/// creates/deletes cannot interleave inside each other.
///
/// Construct once at startup and share through an `Arc`.
pub struct RecordStore {
    /// Store configuration
    config: Config,

    /// The only connection to the database file
    conn: Mutex<Connection>,
}

impl RecordStore {
    // =========================================================================
    // SQL
    // =========================================================================
    const SCHEMA: &'static str = "CREATE TABLE IF NOT EXISTS students (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            subject TEXT NOT NULL,
            marks INTEGER NOT NULL
        );";
    const INSERT: &'static str = "INSERT INTO students (name, subject, marks) VALUES (?1, ?2, ?3)";
    const SELECT_ALL: &'static str = "SELECT id, name, subject, marks FROM students ORDER BY id ASC";
    const DELETE_BY_KEY: &'static str = "DELETE FROM students WHERE name = ?1 AND subject = ?2";
    const COUNT: &'static str = "SELECT COUNT(*) FROM students";

    /// Open or create the store described by `config`
    ///
    /// On startup:
    /// 1. Create the parent directory of the database file
    /// 2. Open the connection and apply pragmas
    /// 3. Create the `students` table if missing
    pub fn open(config: Config) -> Result<Self> {
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&config.db_path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::init(conn, config)
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified database file
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().db_path(path).build())
    }

    /// Open a private, non-persistent store
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn, Config::builder().db_path(":memory:").build())
    }

    fn init(conn: Connection, config: Config) -> Result<Self> {
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        conn.execute_batch(Self::SCHEMA)?;

        tracing::debug!("Records store ready at {}", config.db_path.display());

        Ok(Self {
            config,
            conn: Mutex::new(conn),
        })
    }

    /// Execute a command
    ///
    /// Routes commands to appropriate handlers
    pub fn execute(&self, command: Command) -> Result<Outcome> {
        match command {
            Command::List => self.list().map(Outcome::Listed),
            Command::Create(student) => self.create(student).map(|r| Outcome::Created(vec![r])),
            Command::CreateBulk(students) => self.create_bulk(students).map(Outcome::Created),
            Command::Delete(key) => self.delete(&key).map(Outcome::Deleted),
        }
    }

    /// Every record, oldest first
    pub fn list(&self) -> Result<Vec<Record>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare_cached(Self::SELECT_ALL)?;

        let records = stmt
            .query_map([], |row| {
                Ok(Record {
                    id: row.get(0)?,
                    student: Student {
                        name: row.get(1)?,
                        subject: row.get(2)?,
                        marks: row.get(3)?,
                    },
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    /// Insert one student and return the stored record
    pub fn create(&self, student: Student) -> Result<Record> {
        validate(&student)?;

        let conn = self.conn.lock();
        conn.prepare_cached(Self::INSERT)?
            .execute(params![student.name, student.subject, student.marks])?;
        let id = conn.last_insert_rowid();

        tracing::debug!(id, name = %student.name, subject = %student.subject, "Record created");

        Ok(Record { id, student })
    }

    /// Insert every student in one transaction
    ///
    /// All items are validated before anything is written; a failure at any
    /// point leaves the table as it was.
    pub fn create_bulk(&self, students: Vec<Student>) -> Result<Vec<Record>> {
        for (index, student) in students.iter().enumerate() {
            validate(student).map_err(|e| match e {
                GradebookError::Validation(msg) => {
                    GradebookError::Validation(format!("item {index}: {msg}"))
                }
                other => other,
            })?;
        }

        if students.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let mut records = Vec::with_capacity(students.len());

        {
            let mut stmt = tx.prepare_cached(Self::INSERT)?;
            for student in students {
                stmt.execute(params![student.name, student.subject, student.marks])?;
                records.push(Record {
                    id: tx.last_insert_rowid(),
                    student,
                });
            }
        }

        tx.commit()?;

        tracing::debug!(count = records.len(), "Bulk records created");

        Ok(records)
    }

    /// Remove every record whose name and subject match exactly
    ///
    /// Returns the number of records removed; zero is not an error.
    pub fn delete(&self, key: &NaturalKey) -> Result<usize> {
        let conn = self.conn.lock();
        let deleted = conn
            .prepare_cached(Self::DELETE_BY_KEY)?
            .execute(params![key.name, key.subject])?;

        tracing::debug!(deleted, name = %key.name, subject = %key.subject, "Records deleted");

        Ok(deleted)
    }

    /// Number of records in the table
    pub fn count(&self) -> Result<usize> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row(Self::COUNT, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the database file path
    pub fn db_path(&self) -> &Path {
        &self.config.db_path
    }
}

/// Reject students the table must never hold
fn validate(student: &Student) -> Result<()> {
    if student.name.trim().is_empty() {
        return Err(GradebookError::validation("field `name` must not be empty"));
    }
    if student.subject.trim().is_empty() {
        return Err(GradebookError::validation("field `subject` must not be empty"));
    }
    Ok(())
}
