//! Pagination and list result types.
//!
//! A list read returns a [`Listing`]: either a plain sequence of records (capped or
//! unbounded mode) or a [`Page`] envelope carrying [`PageInfo`] (windowed mode).

use serde::{Deserialize, Serialize};
use std::cmp::min;

use crate::error::{RecordStoreError, RecordStoreResult};

/// Metadata describing one page of a windowed result.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// The page number (1-indexed).
    pub page: usize,
    /// Number of items per page.
    pub page_size: usize,
    /// Number of matching items before slicing.
    pub total: usize,
    /// `ceil(total / page_size)`.
    pub total_pages: usize,
}

/// A single page of a windowed result.
///
/// # Example
///
/// ```ignore
/// let page = PaginationParams::new(2, 5)?.paginate((1..=12).collect::<Vec<_>>());
///
/// assert_eq!(page.items, vec![6, 7, 8, 9, 10]);
/// assert_eq!(page.pagination.total_pages, 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// The items contained in this page.
    pub items: Vec<T>,
    /// Position of this page within the full result.
    pub pagination: PageInfo,
}

/// Parameters for windowed pagination. Pages are 1-indexed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    page: usize,
    per_page: usize,
}

impl PaginationParams {
    /// Creates new pagination parameters.
    ///
    /// # Arguments
    ///
    /// * `page` - The page number (1-indexed)
    /// * `per_page` - Number of items per page
    ///
    /// # Errors
    ///
    /// Returns [`RecordStoreError::ValidationFailed`] if either value is zero.
    pub fn new(page: usize, per_page: usize) -> RecordStoreResult<Self> {
        if page == 0 {
            return Err(RecordStoreError::ValidationFailed("page must be positive".into()));
        }

        if per_page == 0 {
            return Err(RecordStoreError::ValidationFailed("pageSize must be positive".into()));
        }

        Ok(Self { page, per_page })
    }

    /// The page number (1-indexed).
    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of items per page.
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Calculates the offset (number of items to skip) for this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Slices `items` to this page and attaches the page metadata.
    ///
    /// A page beyond the end yields an empty slice, never an error.
    pub fn paginate<T>(&self, items: Vec<T>) -> Page<T> {
        let total = items.len();
        let start = min(self.offset(), total);
        let end = min(start.saturating_add(self.per_page), total);

        let paginated_items = items
            .into_iter()
            .skip(start)
            .take(end - start)
            .collect();

        Page {
            items: paginated_items,
            pagination: PageInfo {
                page: self.page,
                page_size: self.per_page,
                total,
                total_pages: total.div_ceil(self.per_page),
            },
        }
    }
}

/// The result of a list read.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Listing<T> {
    /// Windowed mode.
    Page(Page<T>),
    /// Capped or unbounded mode.
    Items(Vec<T>),
}

impl<T> Listing<T> {
    /// Returns the records contained in this listing.
    pub fn items(&self) -> &[T] {
        match self {
            Listing::Page(page) => &page.items,
            Listing::Items(items) => items,
        }
    }

    /// Consumes the listing and returns its records.
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Page(page) => page.items,
            Listing::Items(items) => items,
        }
    }

    /// Returns the page metadata in windowed mode.
    pub fn page_info(&self) -> Option<&PageInfo> {
        match self {
            Listing::Page(page) => Some(&page.pagination),
            Listing::Items(_) => None,
        }
    }
}
