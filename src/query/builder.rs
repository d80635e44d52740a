//! Request URL construction

use crate::error::{Error, Result};
use crate::types::{
    is_numeric_id, FilterValue, Filters, IdSelector, SortDirection, SortSpec, DEFAULT_PAGE_SIZE,
};
use std::num::{NonZeroU32, NonZeroUsize};
use url::form_urlencoded::byte_serialize;

/// Everything needed to request one collection
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    /// Object type as supplied by the caller
    pub object_type: String,
    /// Filter criteria, in insertion order
    pub filters: Filters,
    /// Sort criteria, in insertion order
    pub sort: SortSpec,
    /// Records requested per page
    pub page_size: NonZeroU32,
}

impl RequestSpec {
    /// Create a spec with no filters, no sorting and the default page size
    pub fn new(object_type: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            filters: Vec::new(),
            sort: Vec::new(),
            page_size: NonZeroU32::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroU32::MIN),
        }
    }

    /// Add a filter
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Add a sort key
    #[must_use]
    pub fn sort(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.sort.push((key.into(), direction));
        self
    }

    /// Replace all filters
    #[must_use]
    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }

    /// Replace all sort keys
    #[must_use]
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Set the page size; zero is rejected
    pub fn page_size(mut self, page_size: u32) -> Result<Self> {
        self.page_size = NonZeroU32::new(page_size)
            .ok_or_else(|| Error::invalid_value("page_size", "must be greater than zero"))?;
        Ok(self)
    }

    /// Key holding the records in a response, the lower-cased object type
    pub fn collection_key(&self) -> String {
        self.object_type.to_lowercase()
    }

    /// `<base>/<collection key>`
    pub fn path(&self, api_base_url: &str) -> String {
        collection_path(api_base_url, &self.object_type)
    }

    /// Full URL of the page starting at `offset`
    pub fn page_url(&self, api_base_url: &str, offset: u64) -> String {
        format!(
            "{}?limit={}&offset={offset}{}",
            self.path(api_base_url),
            self.page_size,
            filter_suffix(&self.filters, &self.sort)
        )
    }
}

/// `<base>/<lowercase object type>`
pub(crate) fn collection_path(api_base_url: &str, object_type: &str) -> String {
    format!(
        "{}/{}",
        api_base_url.trim_end_matches('/'),
        object_type.to_lowercase()
    )
}

/// Query suffix for filters then sort keys, each pair prefixed with `&`
pub fn filter_suffix(filters: &Filters, sort: &SortSpec) -> String {
    let mut suffix = String::new();

    for (key, value) in filters {
        let key = encode(key);
        match value {
            FilterValue::Scalar(v) => {
                suffix.push_str(&format!("&filters[{key}]={}", encode(v)));
            }
            FilterValue::List(values) => {
                for v in values {
                    suffix.push_str(&format!("&filters[{key}][]={}", encode(v)));
                }
            }
        }
    }

    for (key, direction) in sort {
        suffix.push_str(&format!("&order_by[{}]={direction}", encode(key)));
    }

    suffix
}

/// Query strings for an id lookup, one per request
///
/// Returns an empty list when there is nothing to look up: an empty id
/// list or a single id that is not numeric.
pub fn id_queries(ids: &IdSelector, batch_size: NonZeroUsize) -> Vec<String> {
    match ids {
        IdSelector::Single(id) if is_numeric_id(id) => {
            vec![format!("?filters[id]={}", encode(id.trim()))]
        }
        IdSelector::Single(_) => Vec::new(),
        IdSelector::List(ids) => ids
            .chunks(batch_size.get())
            .map(|slice| {
                let mut query = format!("?limit={batch_size}");
                for id in slice {
                    query.push_str(&format!("&filters[id][]={}", encode(id)));
                }
                query
            })
            .collect(),
    }
}

fn encode(value: &str) -> String {
    byte_serialize(value.as_bytes()).collect()
}
