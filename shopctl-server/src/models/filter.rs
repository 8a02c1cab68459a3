//! Catalog filter parameters
//!
//! Raw query parameters arrive as optional strings. Conversion into a
//! [`FilterSpec`] is lenient: a value that is present but unusable is
//! dropped as if it had never been sent.

use serde::Deserialize;

use super::Page;

/// Raw `/products` query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Result ordering for catalog queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    IdAsc,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    /// Parse a sort name, case-insensitively.
    ///
    /// Anything unrecognized (including "default") orders by id.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "price_asc" => Self::PriceAsc,
            "price_desc" => Self::PriceDesc,
            _ => Self::IdAsc,
        }
    }
}

/// Validated catalog filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub category: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub sort: SortKey,
    pub page: Page,
}

impl From<FilterParams> for FilterSpec {
    fn from(params: FilterParams) -> Self {
        Self {
            category: trimmed(params.category.as_deref()).map(str::to_owned),
            min_price: parse_int(params.min_price.as_deref()),
            max_price: parse_int(params.max_price.as_deref()),
            sort: params.sort.as_deref().map(SortKey::parse).unwrap_or_default(),
            page: Page::new(
                parse_int(params.limit.as_deref()),
                parse_int(params.offset.as_deref()),
            ),
        }
    }
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_int(value: Option<&str>) -> Option<i64> {
    trimmed(value).and_then(|v| v.parse().ok())
}
