//! Pure per-record pipeline stages: parse, validate, encode.
//!
//! Everything in this module is deterministic and free of I/O; the async
//! boundaries (embedding, persistence) live behind the traits in
//! [`crate::traits`].

pub mod encoder;
pub mod parser;
pub mod validator;

pub use encoder::{encode_record, format_embedding, parse_embedding};
pub use parser::parse_row;
pub use validator::validate_row;
