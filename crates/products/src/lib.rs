//! Products domain module (client-side mirror).
//!
//! This crate holds the catalog records and the local state shapes built
//! around them, implemented purely as deterministic logic (no IO, no HTTP,
//! no runtime).

pub mod collection;
pub mod filter;
pub mod product;
pub mod selection;

pub use collection::{ProductCollection, listing_rows};
pub use filter::{ActiveFilter, DEFAULT_PAGE_SIZE, FilterOverrides, ProductFilter};
pub use product::{Product, ProductId};
pub use selection::SelectionSet;
