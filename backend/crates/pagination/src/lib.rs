//! Page request validation and pagination envelopes for list endpoints.
//!
//! Handlers validate `page`/`limit` query values through [`PageRequest`],
//! hand the validated window to a repository, and wrap the fetched slice in a
//! [`PaginatedResponse`] via [`create_response`]. The envelope carries the
//! total page count plus ready-to-follow `previous` and `next` links.
//!
//! ```
//! use pagination::{PageRequest, PaginationData, create_response};
//!
//! let request = PageRequest::new(1, 2).expect("valid window");
//! let data = PaginationData::new(request, 5, vec!["a", "b"]);
//! let response = create_response("http://localhost:8080/users", data);
//!
//! assert_eq!(response.total_pages, 3);
//! assert_eq!(response.previous, None);
//! assert_eq!(
//!     response.next.as_deref(),
//!     Some("http://localhost:8080/users?page=2&limit=2")
//! );
//! ```

use serde::Serialize;
use utoipa::ToSchema;

/// First page number; pages are 1-based.
pub const MIN_PAGE: u32 = 1;
/// Smallest accepted page size.
pub const MIN_LIMIT: u32 = 1;
/// Largest accepted page size.
pub const MAX_LIMIT: u32 = 10;
/// Page used when the caller does not supply one.
pub const DEFAULT_PAGE: u32 = MIN_PAGE;
/// Page size used when the caller does not supply one.
pub const DEFAULT_LIMIT: u32 = MIN_LIMIT;

/// Reasons a page window is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// The requested page is below [`MIN_PAGE`].
    #[error("page must be at least {min}, got {actual}")]
    PageTooSmall {
        /// Smallest accepted page.
        min: u32,
        /// Value supplied by the caller.
        actual: u32,
    },
    /// The requested page size is outside `MIN_LIMIT..=MAX_LIMIT`.
    #[error("limit must be between {min} and {max}, got {actual}")]
    LimitOutOfRange {
        /// Smallest accepted page size.
        min: u32,
        /// Largest accepted page size.
        max: u32,
        /// Value supplied by the caller.
        actual: u32,
    },
}

impl PageRequestError {
    /// Name of the query parameter the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::PageTooSmall { .. } => "page",
            Self::LimitOutOfRange { .. } => "limit",
        }
    }
}

/// Validated page window.
///
/// ## Invariants
/// - `page >= MIN_PAGE`
/// - `MIN_LIMIT <= limit <= MAX_LIMIT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Validate a page window.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when `page` or `limit` is out of range.
    ///
    /// ```
    /// use pagination::{PageRequest, PageRequestError};
    ///
    /// assert!(PageRequest::new(1, 10).is_ok());
    /// assert!(matches!(
    ///     PageRequest::new(0, 1),
    ///     Err(PageRequestError::PageTooSmall { .. })
    /// ));
    /// ```
    pub const fn new(page: u32, limit: u32) -> Result<Self, PageRequestError> {
        if page < MIN_PAGE {
            return Err(PageRequestError::PageTooSmall {
                min: MIN_PAGE,
                actual: page,
            });
        }
        if limit < MIN_LIMIT || limit > MAX_LIMIT {
            return Err(PageRequestError::LimitOutOfRange {
                min: MIN_LIMIT,
                max: MAX_LIMIT,
                actual: limit,
            });
        }
        Ok(Self { page, limit })
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// The page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of records preceding this page: `(page - 1) * limit`.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Inputs for building a [`PaginatedResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationData<T> {
    /// Window the records were fetched for.
    pub request: PageRequest,
    /// Row count of the whole collection, independent of the window.
    pub total_records: u64,
    /// Records already fetched for this page.
    pub records: Vec<T>,
}

impl<T> PaginationData<T> {
    /// Bundle a window, the collection total, and the fetched records.
    #[must_use]
    pub const fn new(request: PageRequest, total_records: u64, records: Vec<T>) -> Self {
        Self {
            request,
            total_records,
            records,
        }
    }
}

/// Paginated list envelope returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    /// Current 1-based page.
    #[schema(example = 1)]
    pub page: u32,
    /// Page size.
    #[schema(example = 1)]
    pub limit: u32,
    /// `ceil(total_records / limit)`.
    #[schema(example = 3)]
    pub total_pages: u64,
    /// Row count of the whole collection.
    #[schema(example = 3)]
    pub total_records: u64,
    /// Records on this page.
    pub records: Vec<T>,
    /// Link to the previous page, absent on the first page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    /// Link to the next page, absent on the last page.
    #[schema(example = "http://localhost:8080/users?page=2&limit=1")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl<T> PaginatedResponse<T> {
    /// Convert every record, keeping the pagination metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResponse<U> {
        PaginatedResponse {
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
            total_records: self.total_records,
            records: self.records.into_iter().map(f).collect(),
            previous: self.previous,
            next: self.next,
        }
    }
}

fn page_link(base_url: &str, page: u64, limit: u32) -> String {
    format!("{base_url}?page={page}&limit={limit}")
}

/// Number of pages needed to hold `total_records` at `limit` per page.
///
/// ```
/// use pagination::{PageRequest, total_pages};
///
/// let request = PageRequest::new(1, 4).expect("valid window");
/// assert_eq!(total_pages(0, request), 0);
/// assert_eq!(total_pages(9, request), 3);
/// ```
#[must_use]
pub const fn total_pages(total_records: u64, request: PageRequest) -> u64 {
    total_records.div_ceil(request.limit as u64)
}

/// Build the pagination envelope for a fetched page.
///
/// `previous` is present when `page > 1`; `next` is present when
/// `page < total_pages`. Links are `{base_url}?page={n}&limit={limit}`.
#[must_use]
pub fn create_response<T>(base_url: &str, data: PaginationData<T>) -> PaginatedResponse<T> {
    let PaginationData {
        request,
        total_records,
        records,
    } = data;
    let page = u64::from(request.page());
    let limit = request.limit();
    let total_pages = total_pages(total_records, request);

    let previous = (page > u64::from(MIN_PAGE)).then(|| page_link(base_url, page - 1, limit));
    let next = (page < total_pages).then(|| page_link(base_url, page + 1, limit));

    PaginatedResponse {
        page: request.page(),
        limit,
        total_pages,
        total_records,
        records,
        previous,
        next,
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for window validation and link construction.

    use super::*;
    use rstest::rstest;

    const BASE_URL: &str = "http://localhost:5002/users";

    fn request(page: u32, limit: u32) -> PageRequest {
        PageRequest::new(page, limit).expect("valid window")
    }

    #[rstest]
    #[case(0, 1, "page")]
    #[case(1, 0, "limit")]
    #[case(1, 11, "limit")]
    fn rejects_out_of_range_windows(
        #[case] page: u32,
        #[case] limit: u32,
        #[case] field: &str,
    ) {
        let err = PageRequest::new(page, limit).expect_err("window should be rejected");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    #[case(1, 1, 0)]
    #[case(2, 1, 1)]
    #[case(3, 10, 20)]
    fn offset_skips_preceding_pages(#[case] page: u32, #[case] limit: u32, #[case] offset: u64) {
        assert_eq!(request(page, limit).offset(), offset);
    }

    #[test]
    fn default_window_is_first_page_of_one() {
        let window = PageRequest::default();
        assert_eq!(window.page(), 1);
        assert_eq!(window.limit(), 1);
    }

    #[test]
    fn empty_collection_has_no_links() {
        let data = PaginationData::new(request(1, 1), 0, Vec::<u8>::new());
        let response = create_response(BASE_URL, data);

        assert_eq!(response.total_pages, 0);
        assert_eq!(response.total_records, 0);
        assert!(response.records.is_empty());
        assert_eq!(response.previous, None);
        assert_eq!(response.next, None);
    }

    #[test]
    fn first_page_links_forward_only() {
        let response = create_response(BASE_URL, PaginationData::new(request(1, 1), 3, vec![1]));

        assert_eq!(response.total_pages, 3);
        assert_eq!(response.previous, None);
        assert_eq!(
            response.next.as_deref(),
            Some("http://localhost:5002/users?page=2&limit=1")
        );
    }

    #[test]
    fn last_page_links_backward_only() {
        let response = create_response(BASE_URL, PaginationData::new(request(3, 1), 3, vec![3]));

        assert_eq!(
            response.previous.as_deref(),
            Some("http://localhost:5002/users?page=2&limit=1")
        );
        assert_eq!(response.next, None);
    }

    #[test]
    fn middle_page_links_both_ways() {
        let response = create_response(BASE_URL, PaginationData::new(request(2, 2), 5, vec![3, 4]));

        assert_eq!(response.total_pages, 3);
        assert_eq!(
            response.previous.as_deref(),
            Some("http://localhost:5002/users?page=1&limit=2")
        );
        assert_eq!(
            response.next.as_deref(),
            Some("http://localhost:5002/users?page=3&limit=2")
        );
    }

    #[test]
    fn page_past_the_end_links_back_but_not_forward() {
        let response =
            create_response(BASE_URL, PaginationData::new(request(7, 2), 3, Vec::<u8>::new()));

        assert_eq!(response.total_pages, 2);
        assert!(response.previous.is_some());
        assert_eq!(response.next, None);
    }

    #[test]
    fn absent_links_are_omitted_from_json() {
        let response = create_response(BASE_URL, PaginationData::new(request(1, 1), 1, vec!["a"]));
        let value = serde_json::to_value(&response).expect("serialise response");

        assert!(value.get("previous").is_none());
        assert!(value.get("next").is_none());
        assert_eq!(value.get("total_pages"), Some(&serde_json::json!(1)));
    }

    #[test]
    fn map_preserves_metadata() {
        let response = create_response(BASE_URL, PaginationData::new(request(1, 2), 3, vec![1, 2]))
            .map(|n| n * 10);

        assert_eq!(response.records, vec![10, 20]);
        assert_eq!(response.total_pages, 2);
        assert!(response.next.is_some());
    }
}
