//! Protocol Module
//!
//! Defines the JSON contract between the records store and its clients.
//!
//! ## Endpoints
//! ```text
//! ┌────────┬──────────────────┬──────────────────────────────┬──────────────────────────┐
//! │ Method │ Path             │ Body                         │ Response                 │
//! ├────────┼──────────────────┼──────────────────────────────┼──────────────────────────┤
//! │ GET    │ /students        │ -                            │ [{name, subject, marks}] │
//! │ POST   │ /add_student     │ {name, subject, marks}       │ {message}                │
//! │ POST   │ /add_bulk        │ [{name, subject, marks}, ..] │ {message, count}         │
//! │ POST   │ /delete_student  │ {name, subject}              │ {message, deleted}       │
//! └────────┴──────────────────┴──────────────────────────────┴──────────────────────────┘
//! ```
//!
//! Errors come back as `{message}` with a 4xx/5xx status.

mod command;
mod response;
mod codec;

pub use command::{Command, CommandType, NaturalKey, Record, Student};
pub use response::{Ack, Outcome};
pub use codec::{decode_bulk, decode_command, decode_key, decode_student};

/// Route paths, shared by the server and the dashboard client
pub mod paths {
    pub const STUDENTS: &str = "/students";
    pub const ADD_STUDENT: &str = "/add_student";
    pub const ADD_BULK: &str = "/add_bulk";
    pub const DELETE_STUDENT: &str = "/delete_student";
}
