//! Listing filter (search text, page size, active-only flag, page number).

use serde::{Serialize, Serializer};

/// Page size used until a caller picks another one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Which products a listing should include.
///
/// Sent over the wire as `0` (every product) or `1` (active products only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveFilter {
    Any,
    #[default]
    ActiveOnly,
}

impl ActiveFilter {
    pub fn as_flag(self) -> u8 {
        match self {
            ActiveFilter::Any => 0,
            ActiveFilter::ActiveOnly => 1,
        }
    }
}

impl Serialize for ActiveFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_flag())
    }
}

/// Request body for the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductFilter {
    pub search: String,
    #[serde(rename = "page_count")]
    pub page_size: u32,
    pub active: ActiveFilter,
    pub page: u32,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            active: ActiveFilter::ActiveOnly,
            page: 1,
        }
    }
}

impl ProductFilter {
    /// Lay `overrides` on top of this filter. Unset fields keep their value.
    pub fn merged(mut self, overrides: &FilterOverrides) -> Self {
        if let Some(search) = &overrides.search {
            self.search = search.clone();
        }
        if let Some(page_size) = overrides.page_size {
            self.page_size = page_size;
        }
        if let Some(active) = overrides.active {
            self.active = active;
        }
        if let Some(page) = overrides.page {
            self.page = page;
        }
        self
    }
}

/// Per-request adjustments to the store's listing cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOverrides {
    pub search: Option<String>,
    pub page_size: Option<u32>,
    pub active: Option<ActiveFilter>,
    pub page: Option<u32>,
}

impl FilterOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn active(mut self, active: ActiveFilter) -> Self {
        self.active = Some(active);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}
