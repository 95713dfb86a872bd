//! Translation of untrusted query-string parameters into a bounded,
//! allow-listed catalog query.
//!
//! Normalization never fails: malformed values degrade to the field default
//! and unrecognized keys are dropped, so the output can be handed to the
//! storage layer without further sanitization.

use std::collections::HashMap;

/// Page size used when `limit` is absent or malformed.
pub const DEFAULT_LIMIT: u64 = 10;

/// Flat predicate over catalog fields: exact matches plus an inclusive price
/// range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub is_featured: Option<bool>,
    pub is_flash: Option<bool>,
}

impl ProductFilter {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.sub_category.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.is_featured.is_none()
            && self.is_flash.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    /// 1-based page index.
    pub page: u64,
    pub limit: u64,
    pub sort: Option<SortSpec>,
    /// When set, sampling replaces pagination and sort entirely.
    pub random: bool,
}

impl QueryOptions {
    pub fn skip(&self) -> u64 {
        if self.random {
            0
        } else {
            (self.page - 1).saturating_mul(self.limit)
        }
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self { page: 1, limit: DEFAULT_LIMIT, sort: None, random: false }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub filter: ProductFilter,
    pub options: QueryOptions,
}

/// Build a `ProductQuery` from raw query-string parameters.
pub fn normalize(raw: &HashMap<String, String>) -> ProductQuery {
    let mut filter = ProductFilter::default();
    let mut options = QueryOptions::default();

    if let Some(category) = raw.get("category").map(|v| v.trim()).filter(|v| !v.is_empty()) {
        filter.category = Some(category.to_owned());
    }
    if let Some(sub) = raw.get("subCategory").map(|v| v.trim()).filter(|v| !v.is_empty()) {
        filter.sub_category = Some(sub.to_owned());
    }
    filter.min_price = raw.get("minPrice").and_then(|v| parse_price(v));
    filter.max_price = raw.get("maxPrice").and_then(|v| parse_price(v));
    filter.is_featured = raw.get("isFeatured").and_then(|v| parse_bool(v));
    filter.is_flash = raw.get("isFlash").and_then(|v| parse_bool(v));

    if let Some(page) = raw.get("page").and_then(|v| parse_positive(v)) {
        options.page = page;
    }
    if let Some(limit) = raw.get("limit").and_then(|v| parse_positive(v)) {
        options.limit = limit;
    }
    options.random = raw.get("random").and_then(|v| parse_bool(v)).unwrap_or(false);
    if !options.random {
        options.sort = raw.get("sort").and_then(|v| parse_sort(v));
    }

    ProductQuery { filter, options }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_positive(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok().filter(|n| *n >= 1)
}

fn parse_price(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_sort(value: &str) -> Option<SortSpec> {
    let value = value.trim();
    let (field, direction) = match value.strip_prefix('-') {
        Some(rest) => (rest, SortDirection::Descending),
        None => (value, SortDirection::Ascending),
    };
    if field.is_empty() {
        return None;
    }
    Some(SortSpec { field: field.to_owned(), direction })
}
