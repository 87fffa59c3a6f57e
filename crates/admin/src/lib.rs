//! `catalog-admin`
//!
//! **Responsibility:** client-side core of the product catalog admin.
//!
//! This crate provides:
//! - `RemoteCatalogClient`: typed calls against the management product API
//! - `CatalogStore`: the session's mirror of the loaded page, selection and
//!   request status, reconciled from API responses
//!
//! The management API remains the authority; nothing here persists state.

pub mod ack;
pub mod client;
pub mod config;
pub mod store;

pub use ack::Acknowledgement;
pub use client::{ApiError, CatalogApi, RemoteCatalogClient, StatusChange, StatusFlag};
pub use config::{CatalogConfig, ConfigError};
pub use store::{CatalogSnapshot, CatalogStore, StoreError};
