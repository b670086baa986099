//! JSON encoding and decoding of task collections.
//!
//! The same text form is used for the editor buffer, request bodies and
//! response bodies: a top-level JSON array of task objects.

use serde_json::Value;

use crate::api::ErrorBody;
use crate::task::Task;

/// Error type for codec encode/decode operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CodecError {
    /// The input is not valid JSON, or an element is not a valid task.
    #[error("{0}")]
    Malformed(String),
    /// The input is valid JSON but not an array.
    #[error("Input must be a JSON array")]
    NotAnArray,
    /// Serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Encodes tasks as pretty-printed JSON with two-space indentation.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if a task cannot be serialized.
pub fn encode_pretty(tasks: &[Task]) -> Result<String, CodecError> {
    serde_json::to_string_pretty(tasks).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Encodes tasks as compact JSON bytes.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if a task cannot be serialized.
pub fn encode(tasks: &[Task]) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(tasks).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Parses text as a JSON array of tasks.
///
/// # Errors
///
/// Returns `CodecError::Malformed` for invalid JSON or an invalid element
/// (the message names the element index), and `CodecError::NotAnArray` when
/// the top-level value is not an array.
pub fn decode_task_array(text: &str) -> Result<Vec<Task>, CodecError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| CodecError::Malformed(e.to_string()))?;
    tasks_from_value(value)
}

/// Parses bytes as a JSON array of tasks.
///
/// # Errors
///
/// Same as [`decode_task_array`].
pub fn decode_task_array_bytes(bytes: &[u8]) -> Result<Vec<Task>, CodecError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| CodecError::Malformed(e.to_string()))?;
    tasks_from_value(value)
}

/// Extracts the `error` message from a failure response body, if present.
#[must_use]
pub fn decode_error_message(bytes: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(bytes)
        .ok()
        .map(|body| body.error)
}

fn tasks_from_value(value: Value) -> Result<Vec<Task>, CodecError> {
    let Value::Array(items) = value else {
        return Err(CodecError::NotAnArray);
    };
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item)
                .map_err(|e| CodecError::Malformed(format!("task {index}: {e}")))
        })
        .collect()
}
