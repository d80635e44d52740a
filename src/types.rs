//! Common types used throughout tokenfetch
//!
//! Filter values, sort directions and id selectors shared by the query
//! builder, the fetch engine and the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Ordered filter criteria, key to value
pub type Filters = Vec<(String, FilterValue)>;

/// Ordered sort criteria, key to direction
pub type SortSpec = Vec<(String, SortDirection)>;

/// Default number of records requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

/// Default number of ids sent in a single batched lookup
pub const DEFAULT_BATCH_SIZE: usize = 50;

// ============================================================================
// Filters
// ============================================================================

/// A filter value: either one scalar or a list of scalars
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// `filters[key]=value`
    Scalar(String),
    /// `filters[key][]=a&filters[key][]=b`
    List(Vec<String>),
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(str::to_string).collect())
    }
}

// ============================================================================
// Sorting
// ============================================================================

/// Sort direction token sent as `order_by[key]=ASC|DESC`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Wire token for this direction
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            other => Err(format!("unknown sort direction '{other}' (expected ASC or DESC)")),
        }
    }
}

// ============================================================================
// Id Selection
// ============================================================================

/// Ids to look up: a single id or an ordered list of ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdSelector {
    /// One id, sent as `filters[id]=<id>`
    Single(String),
    /// Many ids, sent in batches as `filters[id][]=<id>`
    List(Vec<String>),
}

impl From<u64> for IdSelector {
    fn from(id: u64) -> Self {
        Self::Single(id.to_string())
    }
}

impl From<&str> for IdSelector {
    fn from(id: &str) -> Self {
        Self::Single(id.to_string())
    }
}

impl From<Vec<u64>> for IdSelector {
    fn from(ids: Vec<u64>) -> Self {
        Self::List(ids.into_iter().map(|id| id.to_string()).collect())
    }
}

impl From<Vec<String>> for IdSelector {
    fn from(ids: Vec<String>) -> Self {
        Self::List(ids)
    }
}

/// Whether an id looks like a number (integer, signed, decimal or exponent form)
pub fn is_numeric_id(id: &str) -> bool {
    let trimmed = id.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        && trimmed.parse::<f64>().is_ok_and(f64::is_finite)
}
