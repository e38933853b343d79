//! Store implementations that live inside the crate

pub mod memory;

pub use memory::MemoryColorStore;
