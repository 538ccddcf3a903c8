//! Request Handlers
//!
//! Decode a body, run one command against the store, shape the reply.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::error::{GradebookError, Result};
use crate::protocol::{decode_command, Ack, Command, CommandType, Outcome, Student};
use crate::store::RecordStore;

/// GET /students
pub async fn list_handler(State(store): State<Arc<RecordStore>>) -> Result<Json<Vec<Student>>> {
    match execute(store, Command::List).await? {
        Outcome::Listed(records) => Ok(Json(records.into_iter().map(Student::from).collect())),
        other => Err(unexpected(other)),
    }
}

/// POST /add_student
pub async fn add_student_handler(
    State(store): State<Arc<RecordStore>>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<Ack>> {
    let command = decode(CommandType::Create, payload)?;

    match execute(store, command).await? {
        Outcome::Created(records) => {
            for record in &records {
                tracing::info!(
                    id = record.id,
                    name = %record.student.name,
                    subject = %record.student.subject,
                    "Student added"
                );
            }
            Ok(Json(Ack::student_added()))
        }
        other => Err(unexpected(other)),
    }
}

/// POST /add_bulk
pub async fn add_bulk_handler(
    State(store): State<Arc<RecordStore>>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<Ack>> {
    let command = decode(CommandType::CreateBulk, payload)?;

    match execute(store, command).await? {
        Outcome::Created(records) => {
            tracing::info!(count = records.len(), "Bulk students added");
            Ok(Json(Ack::bulk_added(records.len())))
        }
        other => Err(unexpected(other)),
    }
}

/// POST /delete_student
pub async fn delete_student_handler(
    State(store): State<Arc<RecordStore>>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<Ack>> {
    let command = decode(CommandType::Delete, payload)?;

    match execute(store, command).await? {
        Outcome::Deleted(deleted) => {
            tracing::info!(deleted, "Student deleted");
            Ok(Json(Ack::student_deleted(deleted)))
        }
        other => Err(unexpected(other)),
    }
}

/// Turn a JSON body (or its rejection) into a validated command
fn decode(
    command_type: CommandType,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Command> {
    let result = payload
        .map_err(|rejection| GradebookError::validation(rejection.body_text()))
        .and_then(|Json(body)| decode_command(command_type, &body));

    if let Err(ref e) = result {
        tracing::warn!(?command_type, "Rejected request: {}", e);
    }

    result
}

/// Run a command on the blocking pool
async fn execute(store: Arc<RecordStore>, command: Command) -> Result<Outcome> {
    let command_type = command.command_type();
    let outcome = tokio::task::spawn_blocking(move || store.execute(command)).await?;

    if let Err(ref e) = outcome {
        tracing::error!(?command_type, "Store failure: {}", e);
    }

    outcome
}

fn unexpected(outcome: Outcome) -> GradebookError {
    GradebookError::Storage(format!("unexpected store outcome: {outcome:?}"))
}
