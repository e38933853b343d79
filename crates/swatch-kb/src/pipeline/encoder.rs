//! Encoding of validated rows into storage-ready records

use crate::data::errors::{IngestError, StoreError};
use crate::data::records::{EnrichedColor, ValidatedRow, EMBEDDING_DIM, HEX_MARKER};

/// Combines a validated row with its embedding into an [`EnrichedColor`].
///
/// Strips the leading marker from `hex` to produce the 6-digit canonical
/// form and serializes the vector into the store's text representation.
/// This is the single choke point that enforces the embedding dimension:
/// a vector of the wrong length surfaces as a provider error and the row
/// is skipped like any other provider failure.
pub fn encode_record(row: ValidatedRow, embedding: &[f32]) -> Result<EnrichedColor, IngestError> {
    if embedding.len() != EMBEDDING_DIM {
        return Err(IngestError::Provider(format!(
            "embedding has {} dimensions, expected {}",
            embedding.len(),
            EMBEDDING_DIM
        )));
    }

    let row = row.into_inner();
    // The validator guarantees hex starts with the one-byte marker.
    let hex = row.hex[HEX_MARKER.len_utf8()..].to_string();

    Ok(EnrichedColor {
        name: row.name,
        hex,
        is_good_name: row.is_good_name,
        embedding: format_embedding(embedding),
    })
}

/// Serializes an embedding into the store's vector-column text form,
/// `"[f1,f2,...]"`.
pub fn format_embedding(embedding: &[f32]) -> String {
    let mut out = String::with_capacity(embedding.len() * 12 + 2);
    out.push('[');
    for (i, value) in embedding.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&value.to_string());
    }
    out.push(']');
    out
}

/// Inverse of [`format_embedding`], used by the in-memory store to rank
/// stored records.
pub fn parse_embedding(text: &str) -> Result<Vec<f32>, StoreError> {
    let inner = text
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(|| StoreError::InvalidInput(format!("malformed embedding text: {:?}", text)))?;

    if inner.is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<f32>()
                .map_err(|e| StoreError::InvalidInput(format!("bad embedding component {:?}: {}", v, e)))
        })
        .collect()
}
