//! Record types that flow through the ingestion pipeline.
//!
//! Each record type is produced by exactly one pipeline stage and consumed
//! by the next: `ColorRow` (parsed) -> `ValidatedRow` (checked) ->
//! `EnrichedColor` (embedded, storage-ready). All of them are immutable
//! once constructed.

use serde::{Deserialize, Serialize};

/// Fixed output dimension of the embedding model.
pub const EMBEDDING_DIM: usize = 1536;

/// Exclusive upper bound on the color name length, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Expected length of the raw hex field, marker included.
pub const HEX_LEN: usize = 7;

/// Leading marker character carried by the raw hex field.
pub const HEX_MARKER: char = '#';

/// Field separator in the input file.
pub const FIELD_DELIMITER: char = ',';

/// Flag-field token that marks a row as having a good name.
pub const GOOD_NAME_MARKER: &str = "x";

/// One parsed input row, before validation.
///
/// `hex` still carries its leading `#` marker; `is_good_name` is derived
/// from the third field's equality with [`GOOD_NAME_MARKER`], not parsed
/// as a literal boolean token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorRow {
    pub name: String,
    pub hex: String,
    pub is_good_name: bool,
}

/// A `ColorRow` that passed all structural checks.
///
/// The only way to obtain one is [`validate_row`](crate::pipeline::validate_row),
/// so holding a `ValidatedRow` means the record is safe to enrich.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRow(ColorRow);

impl ValidatedRow {
    pub(crate) fn new(row: ColorRow) -> Self {
        Self(row)
    }

    pub fn as_row(&self) -> &ColorRow {
        &self.0
    }

    pub fn into_inner(self) -> ColorRow {
        self.0
    }
}

/// Storage-ready record: canonical 6-digit hex (marker stripped) plus the
/// embedding serialized into the store's vector-column text form.
///
/// Storage key is `name`; conflicting upserts overwrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedColor {
    pub name: String,
    pub hex: String,
    pub is_good_name: bool,
    pub embedding: String,
}

/// One ranked hit from a nearest-neighbor search, ordered by ascending
/// distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorMatch {
    pub name: String,
    pub distance: f32,
}

/// Run parameters for a batch: an optional starting offset (to resume a
/// prior partial run) and an optional row cap. Defaults to the whole input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunWindow {
    pub offset: Option<usize>,
    pub limit: Option<usize>,
}
