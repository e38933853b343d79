//! Core trait definitions: the seams where external collaborators plug in

pub mod color_store;
pub mod embedding_generator;

pub use color_store::ColorStore;
pub use embedding_generator::EmbeddingGenerator;
