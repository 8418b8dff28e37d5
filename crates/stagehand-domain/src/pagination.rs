//! Pagination and sort direction types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Generic sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sort {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Error)]
#[error("unknown sort order: {0:?}")]
pub struct UnknownSort(pub String);

impl FromStr for Sort {
    type Err = UnknownSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(UnknownSort(s.to_owned())),
        }
    }
}

/// A caller-chosen sort column plus direction. `F` is a per-resource enum of
/// known columns, so free text never reaches a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortBy<F> {
    pub field: F,
    pub order: Sort,
}

/// Default number of rows per page.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Upper bound for `per_page`.
pub const MAX_PER_PAGE: u32 = 100;

/// Pagination parameters shared across all list endpoints.
///
/// - `per_page`: 1–100, default 10
/// - `page`: ≥ 1, default 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

fn default_page() -> u32 {
    1
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            page: default_page(),
        }
    }
}

impl PageRequest {
    /// Clamp `per_page` to the valid range 1–100 and `page` to ≥ 1.
    ///
    /// Call after deserializing from query params to enforce bounds.
    pub fn clamped(self) -> Self {
        Self {
            per_page: self.per_page.clamp(1, MAX_PER_PAGE),
            page: self.page.max(1),
        }
    }

    /// Zero-based row offset of the first item on this page.
    pub fn offset(self) -> u64 {
        let Self { per_page, page } = self.clamped();
        u64::from(page - 1) * u64::from(per_page)
    }
}

/// Page metadata attached to every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub next_page: Option<u32>,
    pub prev_page: Option<u32>,
    pub total_pages: u32,
    pub total_count: u64,
}

impl PageMeta {
    /// Build metadata for `request` over a collection of `total_count` rows.
    ///
    /// A page past the end reports neither a next nor a previous page.
    pub fn new(request: PageRequest, total_count: u64) -> Self {
        let PageRequest { per_page, page } = request.clamped();
        let total_pages = total_count.div_ceil(u64::from(per_page));
        let total_pages = u32::try_from(total_pages).unwrap_or(u32::MAX);
        let in_range = page <= total_pages;
        Self {
            current_page: page,
            next_page: (page < total_pages).then(|| page + 1),
            prev_page: (page > 1 && in_range).then(|| page - 1),
            total_pages,
            total_count,
        }
    }
}

/// One window of a filtered, sorted collection.
#[derive(Debug, Clone)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Paged<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_count: u64) -> Self {
        Self {
            items,
            meta: PageMeta::new(request, total_count),
        }
    }

    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paged<U> {
        Paged {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
