//! crates/flixr_core/src/pagination.rs
//!
//! Page slicing for the recommendation and admin analytics lists.

use serde::Serialize;

/// The lists the frontend pages through, each with its own fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Recommendations,
    AdminAnalytics,
}

impl ListKind {
    pub const fn page_size(self) -> usize {
        match self {
            Self::Recommendations => 12,
            Self::AdminAnalytics => 20,
        }
    }
}

/// A 1-based page number taken from the `page` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1 }
    }
}

impl PageRequest {
    /// Anything below 1 is treated as page 1.
    pub fn new(page: u64) -> Self {
        Self { page: page.max(1) }
    }

    /// Parses the raw query value. Absent, empty, negative or non-numeric
    /// input all mean page 1.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.trim().parse::<u64>().ok())
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn page(&self) -> u64 {
        self.page
    }
}

/// One page of an ordered list plus the metadata the views need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub current_page: u64,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Cuts the requested page out of `items`.
///
/// Never fails: a page past the end yields an empty slice, and `current_page`
/// is reported as requested even when it exceeds `total_pages`. A zero page
/// size produces an empty page with no pages at all.
pub fn paginate<T: Clone>(items: &[T], request: PageRequest, page_size: usize) -> PageResult<T> {
    let total_items = items.len();
    if page_size == 0 {
        return PageResult {
            items: Vec::new(),
            current_page: request.page(),
            total_pages: 0,
            total_items,
        };
    }

    let page_index = usize::try_from(request.page() - 1).unwrap_or(usize::MAX);
    let start = page_index.saturating_mul(page_size).min(total_items);
    let end = start.saturating_add(page_size).min(total_items);

    PageResult {
        items: items[start..end].to_vec(),
        current_page: request.page(),
        total_pages: total_items.div_ceil(page_size),
        total_items,
    }
}
