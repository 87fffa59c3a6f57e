//! `catalog-core`: shared building blocks for the catalog admin client.
//!
//! This crate contains **pure** primitives (no HTTP, no runtime, no storage).

pub mod error;
pub mod id;

pub use error::DomainError;
pub use id::RecordId;
