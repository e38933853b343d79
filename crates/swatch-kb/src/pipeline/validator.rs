//! Structural validation of parsed rows

use crate::data::errors::{IngestError, ValidationFailure};
use crate::data::records::{ColorRow, ValidatedRow, HEX_LEN, HEX_MARKER, MAX_NAME_LEN};

/// Checks the structural invariants of a parsed row, in order: name length
/// bound, then hex length-and-prefix shape.
///
/// Digit validity after the `#` marker is deliberately not checked. The
/// flag field needs no check here: it is a `bool` by construction after
/// parsing.
///
/// Failure carries the offending record so the caller can log it; it is
/// local to one record and never aborts a batch.
pub fn validate_row(row: ColorRow) -> Result<ValidatedRow, IngestError> {
    let name_len = row.name.chars().count();
    if name_len == 0 || name_len >= MAX_NAME_LEN {
        return Err(IngestError::Validation {
            failure: ValidationFailure::NameLength(name_len),
            row,
        });
    }

    if row.hex.chars().count() != HEX_LEN || !row.hex.starts_with(HEX_MARKER) {
        return Err(IngestError::Validation {
            failure: ValidationFailure::HexShape(row.hex.clone()),
            row,
        });
    }

    Ok(ValidatedRow::new(row))
}
