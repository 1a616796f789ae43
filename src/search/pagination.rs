//! Page numbers, page sizes and the window sent downstream

use crate::search::SearchError;
use nutype::nutype;
use serde::Serialize;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// One-based page number
#[nutype(
    validate(greater_or_equal = 1),
    default = 1,
    derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, AsRef, Default, TryFrom)
)]
pub struct PageNumber(u32);

/// Number of records per page
#[nutype(
    validate(greater_or_equal = 1),
    default = 50,
    derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, AsRef, Default, TryFrom)
)]
pub struct PageSize(u32);

/// Requested page and page size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub page: PageNumber,
    pub page_size: PageSize,
}

impl Pagination {
    /// Build from optional client values, applying the defaults
    pub fn from_request(page: Option<u32>, page_size: Option<u32>) -> Result<Self, SearchError> {
        let page = PageNumber::try_new(page.unwrap_or(DEFAULT_PAGE))
            .map_err(|_| SearchError::InvalidPage)?;
        let page_size = PageSize::try_new(page_size.unwrap_or(DEFAULT_PAGE_SIZE))
            .map_err(|_| SearchError::InvalidPageSize)?;
        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> u32 {
        self.page.into_inner()
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.into_inner()
    }

    /// Zero-based record offset of the first record on this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page() - 1) * u64::from(self.page_size())
    }

    pub fn window(&self, style: PaginationStyle) -> PageWindow {
        match style {
            PaginationStyle::Page => PageWindow::Page {
                page: self.page(),
                page_size: self.page_size(),
            },
            PaginationStyle::Offset => PageWindow::Offset {
                offset: self.offset(),
                limit: self.page_size(),
            },
        }
    }
}

/// How a downstream endpoint expects the requested window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationStyle {
    Page,
    Offset,
}

/// Window fields as they appear in the downstream payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageWindow {
    Page { page: u32, page_size: u32 },
    Offset { offset: u64, limit: u32 },
}

/// Pages needed to hold `total` records
pub fn total_pages(total: u64, page_size: u32) -> u64 {
    match page_size {
        0 => 0,
        size => total.div_ceil(u64::from(size)),
    }
}
