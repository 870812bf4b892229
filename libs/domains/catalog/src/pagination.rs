use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_PAGE_NUMBER: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

fn default_page_number() -> u32 {
    DEFAULT_PAGE_NUMBER
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// `?pageNumber=&pageSize=` query parameters for paged listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Validate, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// 1-based page index
    #[serde(default = "default_page_number")]
    #[validate(range(min = 1))]
    #[param(minimum = 1, default = 1)]
    pub page_number: u32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100))]
    #[param(minimum = 1, maximum = 100, default = 10)]
    pub page_size: u32,
}

impl PaginationQuery {
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number.saturating_sub(1)) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE)
    }
}

/// One page of results plus navigation metadata.
///
/// Metadata is derived from `total_count`, so a page past the end still
/// reports the real totals alongside an empty `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u64,
    pub total_count: u64,
    pub has_previous: bool,
    pub has_next: bool,
    pub data: Vec<T>,
}

impl<T> PagedResponse<T> {
    pub fn new(data: Vec<T>, total_count: u64, page_number: u32, page_size: u32) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_count.div_ceil(u64::from(page_size))
        };

        Self {
            current_page: page_number,
            page_size,
            total_pages,
            total_count,
            has_previous: page_number > 1,
            has_next: u64::from(page_number) < total_pages,
            data,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResponse<U> {
        PagedResponse {
            current_page: self.current_page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            total_count: self.total_count,
            has_previous: self.has_previous,
            has_next: self.has_next,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}
