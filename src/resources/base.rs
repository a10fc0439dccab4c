//! Shared plumbing of the resource facades.

use std::borrow::Cow;
use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::{HttpClient, QueryValue, RequestOptions};
use crate::error::Result;
use crate::time::{Sleeper, TokioSleeper};
use crate::transport::{ReqwestTransport, Transport};

/// Characters left as-is in a path segment (RFC 3986 unreserved).
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A client bound to one API base path.
///
/// Facades issue every call through a `Resource`, naming the endpoint as
/// path segments below the base path. Segments are percent-encoded, so ids,
/// names and codes supplied by callers cannot escape their position.
pub struct Resource<T = ReqwestTransport, S = TokioSleeper> {
    client: HttpClient<T, S>,
    base_path: Cow<'static, str>,
}

impl<T, S> Resource<T, S> {
    /// Binds `client` to `base_path` (absolute, without trailing slash).
    #[must_use]
    pub const fn new(client: HttpClient<T, S>, base_path: &'static str) -> Self {
        Self {
            client,
            base_path: Cow::Borrowed(base_path),
        }
    }

    /// Binds `client` to the percent-encoded `segments` below `parent`.
    ///
    /// Used for collections owned by another resource, such as a user's
    /// bank accounts.
    #[must_use]
    pub fn nested(client: HttpClient<T, S>, parent: &'static str, segments: &[&str]) -> Self {
        Self {
            client,
            base_path: Cow::Owned(join_segments(parent, segments)),
        }
    }

    /// The base path, e.g. `/api/v1/mangopay/users`.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// The shared request engine.
    #[must_use]
    pub const fn client(&self) -> &HttpClient<T, S> {
        &self.client
    }

    /// Appends a raw endpoint to the base path; `""` is the base path itself.
    #[must_use]
    pub fn path(&self, endpoint: &str) -> String {
        if endpoint.is_empty() {
            self.base_path.to_string()
        } else {
            format!("{}/{endpoint}", self.base_path)
        }
    }

    /// Joins percent-encoded `segments` below the base path.
    #[must_use]
    pub fn path_segments(&self, segments: &[&str]) -> String {
        join_segments(&self.base_path, segments)
    }
}

fn join_segments(base: &str, segments: &[&str]) -> String {
    segments.iter().fold(base.to_string(), |mut path, segment| {
        path.push('/');
        path.extend(utf8_percent_encode(segment, SEGMENT));
        path
    })
}

impl<T: Transport, S: Sleeper> Resource<T, S> {
    pub(crate) async fn get<R: DeserializeOwned>(
        &self,
        segments: &[&str],
        options: RequestOptions,
    ) -> Result<R> {
        self.client.get(&self.path_segments(segments), options).await
    }

    pub(crate) async fn post<R, B>(
        &self,
        segments: &[&str],
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.client
            .post(&self.path_segments(segments), body, options)
            .await
    }

    pub(crate) async fn put<R, B>(&self, segments: &[&str], body: &B) -> Result<R>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.client
            .put(&self.path_segments(segments), Some(body), RequestOptions::new())
            .await
    }

    pub(crate) async fn delete<R: DeserializeOwned>(&self, segments: &[&str]) -> Result<R> {
        self.client
            .delete(&self.path_segments(segments), RequestOptions::new())
            .await
    }
}

impl<T, S> Clone for Resource<T, S> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_path: self.base_path.clone(),
        }
    }
}

impl<T, S> fmt::Debug for Resource<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("base_path", &self.base_path)
            .finish_non_exhaustive()
    }
}

/// Sort direction of a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// The query value, `asc` or `desc`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Pagination parameters of listing endpoints.
///
/// Unset fields are left out of the query string.
///
/// # Example
///
/// ```
/// use fam_sdk::resources::{Pagination, SortOrder};
///
/// let options = Pagination::new()
///     .with_page(2)
///     .with_order(SortOrder::Desc)
///     .into_options();
///
/// let set = options.params().iter().filter(|(_, value)| !value.is_null());
/// assert_eq!(set.count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
    /// Field to sort by.
    pub sort: Option<String>,
    /// Sort direction.
    pub order: Option<SortOrder>,
}

impl Pagination {
    /// Creates empty pagination (server defaults).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page number.
    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Sets the sort field.
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Sets the sort direction.
    #[must_use]
    pub const fn with_order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Adds the set fields as query parameters to `options`.
    #[must_use]
    pub fn apply(&self, options: RequestOptions) -> RequestOptions {
        options
            .with_param("page", self.page)
            .with_param("per_page", self.per_page)
            .with_param("sort", self.sort.clone())
            .with_param("order", self.order)
    }

    /// Request options carrying only these parameters.
    #[must_use]
    pub fn into_options(self) -> RequestOptions {
        self.apply(RequestOptions::new())
    }
}

impl From<Pagination> for RequestOptions {
    fn from(pagination: Pagination) -> Self {
        pagination.into_options()
    }
}

impl From<SortOrder> for QueryValue {
    fn from(order: SortOrder) -> Self {
        Self::from(order.as_str())
    }
}
