//! Page-number pagination shared by every list endpoint.

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_with::{DisplayFromStr, serde_as};

use crate::error::{AppError, FieldErrors};

/// Page size limits applied to list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSettings {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

/// Pagination query parameters.
///
/// Uses `serde_with` to parse page numbers from query strings as integers.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page_size: Option<u32>,
}

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.page_size as i64
    }

    pub fn limit(&self) -> i64 {
        self.page_size as i64
    }
}

impl PaginationParams {
    /// Applies defaults and bounds.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `page_size`: [`PaginationSettings::default_page_size`]
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `page` is 0 or `page_size` is
    /// outside `1..=max_page_size`. Both problems are reported together.
    pub fn resolve(&self, settings: &PaginationSettings) -> Result<PageRequest, AppError> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(settings.default_page_size);

        let mut errors = FieldErrors::new();
        if page == 0 {
            errors.add("page", "Page must be greater than 0.");
        }
        if !(1..=settings.max_page_size).contains(&page_size) {
            errors.add(
                "page_size",
                format!(
                    "Page size must be between 1 and {}.",
                    settings.max_page_size
                ),
            );
        }
        errors.into_result()?;

        Ok(PageRequest { page, page_size })
    }
}

/// Paginated response envelope.
///
/// `next` and `previous` are page numbers, `null` at either end.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<u32>,
    pub previous: Option<u32>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Wraps one page of results.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when a page other than the first lies
    /// past the last result.
    pub fn new(request: PageRequest, count: i64, results: Vec<T>) -> Result<Self, AppError> {
        if request.page > 1 && request.offset() >= count {
            return Err(AppError::not_found(
                "Invalid page",
                json!({"page": request.page}),
            ));
        }

        let next = (request.offset() + request.limit() < count).then_some(request.page + 1);
        let previous = (request.page > 1).then(|| request.page - 1);

        Ok(Self {
            count,
            next,
            previous,
            results,
        })
    }

    /// Converts every result with `f`, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}
