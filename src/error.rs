use thiserror::Error;

/// Errors surfaced by load generation.
///
/// Per-destination lookup failures never show up here; those destinations
/// are skipped.
#[derive(Error, Debug, PartialEq)]
pub enum GenerateError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
