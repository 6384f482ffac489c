//! Query-string driven list parameters.
//!
//! - [`projection`]: `fields=` → selection tree
//! - [`filters`]: `filter_<field>=` → equality predicates
//! - [`sort`]: `sort=` / `order=` → ordered sort keys
//!
//! [`ListParams::from_pairs`] combines them with `page`, `limit` and the free-text
//! `query` into one validated value. It takes raw pairs rather than a typed
//! `Query<T>` so that repeated and bracketed `filter_*` keys can be detected.

pub mod filters;
pub mod projection;
pub mod sort;

pub use filters::{FILTER_PREFIX, Filters};
pub use projection::{ID_FIELD, Projection, Selection};
pub use sort::{SortDirection, SortKey, parse_sort};

use crate::errors::AppError;
use crate::pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, checked_skip, skip_for};

pub const PAGE_OUT_OF_RANGE: &str = "page is out of range";

#[derive(Debug, Clone, PartialEq)]
pub struct ListParams {
    pub page: i64,
    pub limit: i64,
    pub sort: Vec<SortKey>,
    pub projection: Projection,
    pub search: Option<String>,
    pub filters: Filters,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort: vec![SortKey::new(sort::DEFAULT_SORT_FIELD, SortDirection::Desc)],
            projection: Projection::default(),
            search: None,
            filters: Filters::default(),
        }
    }
}

impl ListParams {
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, AppError> {
        let first = |name: &str| {
            pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
        };

        let page = parse_positive(first("page"), "page", DEFAULT_PAGE)?;
        let limit = parse_positive(first("limit"), "limit", DEFAULT_LIMIT)?;
        if limit > MAX_LIMIT {
            return Err(AppError::bad_request(format!(
                "limit must not exceed {MAX_LIMIT}"
            )));
        }
        if checked_skip(page, limit).is_none() {
            return Err(AppError::bad_request(PAGE_OUT_OF_RANGE));
        }

        let search = first("query")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self {
            page,
            limit,
            sort: parse_sort(first("sort"), first("order"))?,
            projection: Projection::parse(first("fields")),
            search,
            filters: Filters::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
        })
    }

    #[must_use]
    pub fn skip(&self) -> i64 {
        skip_for(self.page, self.limit)
    }
}

fn parse_positive(raw: Option<&str>, name: &str, default: i64) -> Result<i64, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(value) => value
            .parse::<i64>()
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| AppError::bad_request(format!("{name} must be a positive integer"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let params = ListParams::from_pairs(&[]).unwrap();
        assert_eq!(params, ListParams::default());
        assert_eq!(params.skip(), 0);
    }

    #[test]
    fn test_page_and_limit() {
        let params = ListParams::from_pairs(&pairs(&[("page", "3"), ("limit", "10")])).unwrap();
        assert_eq!(params.page, 3);
        assert_eq!(params.limit, 10);
        assert_eq!(params.skip(), 20);
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let params = ListParams::from_pairs(&pairs(&[("page", ""), ("limit", " ")])).unwrap();
        assert_eq!(params.page, DEFAULT_PAGE);
        assert_eq!(params.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_zero_page_rejected() {
        let err = ListParams::from_pairs(&pairs(&[("page", "0")])).unwrap_err();
        assert_eq!(err.to_string(), "page must be a positive integer");
    }

    #[test]
    fn test_non_numeric_limit_rejected() {
        assert!(ListParams::from_pairs(&pairs(&[("limit", "ten")])).is_err());
    }

    #[test]
    fn test_limit_above_max_rejected() {
        assert!(ListParams::from_pairs(&pairs(&[("limit", "101")])).is_err());
    }

    #[test]
    fn test_page_past_offset_range_rejected() {
        let err = ListParams::from_pairs(&pairs(&[
            ("page", "9223372036854775807"),
            ("limit", "100"),
        ]))
        .unwrap_err();
        assert_eq!(err.to_string(), PAGE_OUT_OF_RANGE);

        let params =
            ListParams::from_pairs(&pairs(&[("page", "1000000"), ("limit", "100")])).unwrap();
        assert_eq!(params.skip(), 99_999_900);
    }

    #[test]
    fn test_search_trimmed() {
        let params = ListParams::from_pairs(&pairs(&[("query", "  jo ")])).unwrap();
        assert_eq!(params.search.as_deref(), Some("jo"));
        let params = ListParams::from_pairs(&pairs(&[("query", "   ")])).unwrap();
        assert!(params.search.is_none());
    }

    #[test]
    fn test_filters_and_fields_collected() {
        let params = ListParams::from_pairs(&pairs(&[
            ("fields", "firstName"),
            ("filter_role", "driver"),
            ("filter_status", "active"),
        ]))
        .unwrap();
        assert_eq!(params.filters.len(), 2);
        assert!(params.projection.fields().contains_key("firstName"));
    }
}
