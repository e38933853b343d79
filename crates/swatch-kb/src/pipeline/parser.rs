//! Raw line parsing

use crate::data::records::{ColorRow, FIELD_DELIMITER, GOOD_NAME_MARKER};

/// Splits one raw input line into a [`ColorRow`].
///
/// Total and deterministic: missing fields become empty strings, surplus
/// fields are ignored. The third field maps to `is_good_name` by equality
/// with [`GOOD_NAME_MARKER`]; anything else is `false`.
///
/// Delimiters embedded inside the name field are not handled; there is no
/// quoting or escaping in the input format.
pub fn parse_row(line: &str) -> ColorRow {
    let mut fields = line.split(FIELD_DELIMITER);
    let name = fields.next().unwrap_or("").to_string();
    let hex = fields.next().unwrap_or("").to_string();
    let is_good_name = fields.next() == Some(GOOD_NAME_MARKER);

    ColorRow {
        name,
        hex,
        is_good_name,
    }
}
