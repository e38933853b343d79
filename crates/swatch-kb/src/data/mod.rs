//! Core data types for the color knowledge base

pub mod errors;
pub mod records;

pub use errors::{IngestError, StoreError, ValidationFailure};
pub use records::{
    ColorMatch, ColorRow, EnrichedColor, RunWindow, ValidatedRow, EMBEDDING_DIM, FIELD_DELIMITER,
    GOOD_NAME_MARKER, HEX_LEN, HEX_MARKER, MAX_NAME_LEN,
};
