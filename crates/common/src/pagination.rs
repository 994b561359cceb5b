//! Pagination utilities shared by list endpoints.
//!
//! `Pagination` normalizes raw query input; `Paged` carries one page of
//! results plus the totals the admin tables render.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u64,
    /// items per page
    pub limit: u64,
}

impl Pagination {
    /// Build from optional query values, clamping to sane bounds.
    pub fn from_query(page: Option<u64>, limit: Option<u64>) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        Self { page, limit }
    }

    /// Zero-based page index as used by sea-orm's `fetch_page`.
    pub fn page_index(&self) -> u64 {
        self.page.saturating_sub(1)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, limit: DEFAULT_LIMIT } }
}

/// The `pagination` object returned next to every list.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

impl PageInfo {
    pub fn new(p: Pagination, total: u64) -> Self {
        Self { page: p.page, limit: p.limit, total, pages: total.div_ceil(p.limit) }
    }
}

/// One page of items.
#[derive(Clone, Debug)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub info: PageInfo,
}

impl<T> Paged<T> {
    pub fn new(items: Vec<T>, p: Pagination, total: u64) -> Self {
        Self { items, info: PageInfo::new(p, total) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_query_defaults() {
        let p = Pagination::from_query(None, None);
        assert_eq!(p, Pagination { page: 1, limit: 10 });
        assert_eq!(p.page_index(), 0);
    }

    #[test]
    fn from_query_clamps_zero_and_upper_bound() {
        let p = Pagination::from_query(Some(0), Some(0));
        assert_eq!(p, Pagination { page: 1, limit: 1 });
        let p = Pagination::from_query(Some(5), Some(1000));
        assert_eq!(p.page_index(), 4);
        assert_eq!(p.limit, 100);
    }

    #[test]
    fn page_count_rounds_up() {
        let p = Pagination { page: 1, limit: 10 };
        assert_eq!(PageInfo::new(p, 0).pages, 0);
        assert_eq!(PageInfo::new(p, 10).pages, 1);
        assert_eq!(PageInfo::new(p, 11).pages, 2);
    }
}
