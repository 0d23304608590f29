/// Error types for GridState
///
/// Every fallible operation in the crate returns `Result<T, GridError>`.
/// Errors are caller contract violations (bad shapes, bad indices, bad input
/// documents); the engine never fails on valid input.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    /// A row (or the footer list, when `row` is `None`) does not have one
    /// entry per header.
    #[error("{}: expected {expected} values, found {found}", describe_row(.row))]
    ShapeMismatch {
        row: Option<usize>,
        expected: usize,
        found: usize,
    },

    #[error("index {index} out of range [0, {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    /// A JSON cell held an array or object.
    #[error("unsupported JSON value at row {row}, column {column}")]
    UnsupportedJson { row: usize, column: usize },
}

fn describe_row(row: &Option<usize>) -> String {
    match row {
        Some(index) => format!("row {}", index),
        None => "footer titles".to_string(),
    }
}

impl GridError {
    pub(crate) fn check_index(index: usize, len: usize) -> Result<(), GridError> {
        if index < len {
            Ok(())
        } else {
            Err(GridError::IndexOutOfRange { index, len })
        }
    }
}
