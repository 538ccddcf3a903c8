//! Validation Tests
//!
//! Tests for turning JSON bodies into validated commands.

use gradebook::error::GradebookError;
use gradebook::protocol::{
    decode_bulk, decode_command, decode_key, decode_student, Command, CommandType, NaturalKey,
    Student,
};
use serde_json::json;

fn validation_message<T: std::fmt::Debug>(result: Result<T, GradebookError>) -> String {
    match result {
        Err(GradebookError::Validation(msg)) => msg,
        other => panic!("Expected validation error, got {other:?}"),
    }
}

// =============================================================================
// Single Student
// =============================================================================

#[test]
fn test_decode_valid_student() {
    let body = json!({"name": "Alice", "subject": "Math", "marks": 90});

    assert_eq!(decode_student(&body).unwrap(), Student::new("Alice", "Math", 90));
}

#[test]
fn test_decode_ignores_unknown_fields() {
    let body = json!({"name": "Alice", "subject": "Math", "marks": 90, "id": 7, "grade": "A"});

    assert_eq!(decode_student(&body).unwrap(), Student::new("Alice", "Math", 90));
}

#[test]
fn test_decode_missing_marks() {
    let body = json!({"name": "Alice", "subject": "Math"});

    let msg = validation_message(decode_student(&body));
    assert!(msg.contains("marks"), "{msg}");
}

#[test]
fn test_decode_null_field_counts_as_missing() {
    let body = json!({"name": null, "subject": "Math", "marks": 1});

    let msg = validation_message(decode_student(&body));
    assert!(msg.contains("missing field `name`"), "{msg}");
}

#[test]
fn test_decode_marks_as_string_rejected() {
    let body = json!({"name": "Alice", "subject": "Math", "marks": "90"});

    let msg = validation_message(decode_student(&body));
    assert!(msg.contains("`marks` must be an integer"), "{msg}");
}

#[test]
fn test_decode_marks_as_float_rejected() {
    let body = json!({"name": "Alice", "subject": "Math", "marks": 90.5});

    let msg = validation_message(decode_student(&body));
    assert!(msg.contains("a float"), "{msg}");
}

#[test]
fn test_decode_name_as_number_rejected() {
    let body = json!({"name": 42, "subject": "Math", "marks": 90});

    let msg = validation_message(decode_student(&body));
    assert!(msg.contains("`name` must be a string"), "{msg}");
}

#[test]
fn test_decode_empty_subject_rejected() {
    let body = json!({"name": "Alice", "subject": "   ", "marks": 90});

    let msg = validation_message(decode_student(&body));
    assert!(msg.contains("`subject` must not be empty"), "{msg}");
}

#[test]
fn test_decode_non_object_rejected() {
    let msg = validation_message(decode_student(&json!([1, 2, 3])));
    assert!(msg.contains("expected a JSON object"), "{msg}");
}

#[test]
fn test_decode_negative_marks_accepted() {
    let body = json!({"name": "Alice", "subject": "Math", "marks": -3});

    assert_eq!(decode_student(&body).unwrap().marks, -3);
}

// =============================================================================
// Bulk
// =============================================================================

#[test]
fn test_decode_bulk_valid() {
    let body = json!([
        {"name": "Alice", "subject": "Math", "marks": 90},
        {"name": "Bob", "subject": "Math", "marks": 70},
    ]);

    assert_eq!(
        decode_bulk(&body).unwrap(),
        vec![Student::new("Alice", "Math", 90), Student::new("Bob", "Math", 70)]
    );
}

#[test]
fn test_decode_bulk_empty_array() {
    assert!(decode_bulk(&json!([])).unwrap().is_empty());
}

#[test]
fn test_decode_bulk_reports_first_bad_index() {
    let body = json!([
        {"name": "Alice", "subject": "Math", "marks": 90},
        {"name": "Bob", "subject": "Math"},
        {"subject": "Math", "marks": 1},
    ]);

    let msg = validation_message(decode_bulk(&body));
    assert!(msg.starts_with("item 1:"), "{msg}");
}

#[test]
fn test_decode_bulk_requires_array() {
    let body = json!({"name": "Alice", "subject": "Math", "marks": 90});

    let msg = validation_message(decode_bulk(&body));
    assert!(msg.contains("expected a JSON array"), "{msg}");
}

// =============================================================================
// Delete Key
// =============================================================================

#[test]
fn test_decode_key() {
    let body = json!({"name": "Alice", "subject": "Physics"});

    assert_eq!(decode_key(&body).unwrap(), NaturalKey::new("Alice", "Physics"));
}

#[test]
fn test_decode_key_accepts_empty_strings() {
    let body = json!({"name": "", "subject": "  "});

    assert_eq!(decode_key(&body).unwrap(), NaturalKey::new("", "  "));
}

#[test]
fn test_decode_key_name_as_number_rejected() {
    let msg = validation_message(decode_key(&json!({"name": 7, "subject": "Math"})));
    assert!(msg.contains("`name` must be a string"), "{msg}");
}

#[test]
fn test_decode_key_missing_subject() {
    let msg = validation_message(decode_key(&json!({"name": "Alice"})));
    assert!(msg.contains("subject"), "{msg}");
}

// =============================================================================
// Command Dispatch
// =============================================================================

#[test]
fn test_decode_command_by_type() {
    let student = json!({"name": "Alice", "subject": "Math", "marks": 90});

    assert!(matches!(
        decode_command(CommandType::List, &json!(null)).unwrap(),
        Command::List
    ));
    assert!(matches!(
        decode_command(CommandType::Create, &student).unwrap(),
        Command::Create(_)
    ));
    assert!(matches!(
        decode_command(CommandType::CreateBulk, &json!([student.clone()])).unwrap(),
        Command::CreateBulk(ref items) if items.len() == 1
    ));
    assert!(matches!(
        decode_command(CommandType::Delete, &student).unwrap(),
        Command::Delete(_)
    ));
}

#[test]
fn test_command_mutation_flags() {
    assert!(!Command::List.is_mutation());
    assert!(Command::Delete(NaturalKey::new("a", "b")).is_mutation());
}
