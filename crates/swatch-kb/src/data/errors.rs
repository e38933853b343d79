//! Error types for the color knowledge base

use thiserror::Error;

use crate::data::records::ColorRow;

/// The specific structural check a row failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("name length {0} outside allowed range")]
    NameLength(usize),
    #[error("hex field has invalid shape: {0:?}")]
    HexShape(String),
}

/// Specific error type for the color store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),
    #[error("store request timeout: {0}")]
    Timeout(String),
    #[error("store returned unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("failed to decode store response: {0}")]
    Response(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Base error type for the per-row pipeline.
///
/// All three kinds are caught at the single-row boundary inside the batch
/// driver, logged with the row position, and skipped. None is fatal to the
/// batch and none triggers a retry.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("row failed validation ({failure}): {row:?}")]
    Validation {
        failure: ValidationFailure,
        row: ColorRow,
    },
    #[error("embedding provider error: {0}")]
    Provider(String),
    #[error("persistence error: {0}")]
    Persistence(#[from] StoreError),
}
