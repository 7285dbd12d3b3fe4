//! Pagination arithmetic.
//!
//! `page` is 1-based. A request without parameters asks for the first
//! [`DEFAULT_LIMIT`] items. The page reported back is always within
//! `1..=total_pages`, and `total_pages` is at least 1 even for an empty
//! result.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Query parameters `?page=&limit=`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Requested page, at least 1.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE).max(1)
    }

    /// Requested page size, within `1..=MAX_LIMIT`.
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }
}

/// `max(1, ceil(total / limit))`.
pub fn total_pages(total: usize, limit: u32) -> u32 {
    let limit = u64::from(limit.max(1));
    let pages = (total as u64).div_ceil(limit).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Moves `page` into `1..=total_pages`.
pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Cuts the page described by `request` out of the full, ordered result.
    pub fn paginate(all: Vec<T>, request: &PageRequest) -> Self {
        let total = all.len();
        let limit = request.limit();
        let total_pages = total_pages(total, limit);
        let page = clamp_page(request.page(), total_pages);
        let skip = (page as usize - 1).saturating_mul(limit as usize);

        Self {
            items: all.into_iter().skip(skip).take(limit as usize).collect(),
            total,
            page,
            limit,
            total_pages,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}
