//! Services orchestrating the pipeline over the injected collaborators

pub mod ingestion;
pub mod query;

pub use ingestion::IngestionService;
pub use query::QueryService;
