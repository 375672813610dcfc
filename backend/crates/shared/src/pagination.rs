//! Offset/limit pagination
//!
//! Pages are 1-indexed. Out-of-range input is clamped rather than rejected.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Requested page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Build from raw query values; missing or out-of-range values are clamped.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page
            .unwrap_or(DEFAULT_PAGE as i64)
            .clamp(1, u32::MAX as i64) as u32;
        let limit = limit
            .unwrap_or(DEFAULT_LIMIT as i64)
            .clamp(1, MAX_LIMIT as i64) as u32;
        Self { page, limit }
    }

    /// Build from raw query-string values. Unparseable values fall back to the defaults.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        let parse = |v: Option<&str>| v.and_then(|s| s.trim().parse::<i64>().ok());
        Self::new(parse(page), parse(limit))
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Row offset for SQL `OFFSET`
    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.limit as i64
    }

    /// Summary for a result set of `total` rows
    pub fn info(&self, total: i64) -> PageInfo {
        let limit = self.limit as i64;
        PageInfo {
            total,
            page: self.page,
            limit: self.limit,
            total_pages: (total + limit - 1) / limit,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Pagination summary returned with every list response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: i64,
}

/// One page of rows plus the unpaginated total
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn new(rows: Vec<T>, total: i64) -> Self {
        Self { rows, total }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            rows: self.rows.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let req = PageRequest::default();
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), 10);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_offset() {
        let req = PageRequest::new(Some(3), Some(20));
        assert_eq!(req.offset(), 40);
    }

    #[test]
    fn test_clamping() {
        let req = PageRequest::new(Some(0), Some(0));
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), 1);

        let req = PageRequest::new(Some(-4), Some(10_000));
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), MAX_LIMIT);
    }

    #[test]
    fn test_from_query() {
        let req = PageRequest::from_query(Some("2"), Some(" 25 "));
        assert_eq!(req.page(), 2);
        assert_eq!(req.limit(), 25);

        let req = PageRequest::from_query(Some("abc"), None);
        assert_eq!(req, PageRequest::default());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let req = PageRequest::new(Some(1), Some(10));
        assert_eq!(req.info(0).total_pages, 0);
        assert_eq!(req.info(10).total_pages, 1);
        assert_eq!(req.info(11).total_pages, 2);
    }

    #[test]
    fn test_page_info_serialization() {
        let info = PageRequest::new(Some(2), Some(5)).info(12);
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains(r#""totalPages":3"#));
        assert!(json.contains(r#""page":2"#));
    }
}
