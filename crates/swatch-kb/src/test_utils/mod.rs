//! Test utilities: hand-rolled mocks for the collaborator traits

pub mod mocks;
