//! Fetch engine module
//!
//! Token-validated, auto-paginating retrieval of resource collections.
//!
//! # Overview
//!
//! - `fetch_collection` walks `limit`/`offset` pages until a short or empty page
//! - `fetch_by_ids` splits id lists into bounded batches, one request each
//! - `fetch_by_id` looks up a single numeric id
//!
//! Every operation validates the access token before the first request and
//! aborts on the first failure; partial results are never returned.

mod types;

pub use types::FetchStats;

use crate::auth::{AccessToken, TokenValidator};
use crate::config::EngineConfig;
use crate::decode::classify_response;
use crate::error::{Error, Result};
use crate::http::{ReqwestTransport, Transport};
use crate::query::{id_queries, RequestSpec};
use crate::types::{
    is_numeric_id, Filters, IdSelector, JsonValue, SortSpec, DEFAULT_BATCH_SIZE,
    DEFAULT_PAGE_SIZE,
};
use std::num::{NonZeroU32, NonZeroUsize};
use std::time::Instant;
use tracing::{debug, info};

/// Fetch engine bound to one API and one transport
pub struct FetchEngine<T: Transport> {
    /// Request transport
    transport: T,
    /// Token validator
    validator: TokenValidator,
    /// `<hostname>/api/v3`
    api_base_url: String,
    /// Default records per page
    page_size: NonZeroU32,
    /// Default ids per batch
    batch_size: NonZeroUsize,
    /// Token used by the `*_with_bound_token` operations
    token: Option<AccessToken>,
    /// Statistics for the last operation
    stats: FetchStats,
}

impl FetchEngine<ReqwestTransport> {
    /// Build an engine with a reqwest transport from a validated config
    pub fn connect(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::with_config(&config.transport_config())?;
        Self::from_config(config, transport)
    }
}

impl<T: Transport> FetchEngine<T> {
    /// Create an engine with default page and batch sizes
    pub fn new(api_base_url: impl Into<String>, transport: T) -> Self {
        Self {
            transport,
            validator: TokenValidator::new(),
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            page_size: NonZeroU32::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroU32::MIN),
            batch_size: NonZeroUsize::new(DEFAULT_BATCH_SIZE).unwrap_or(NonZeroUsize::MIN),
            token: None,
            stats: FetchStats::default(),
        }
    }

    /// Create an engine from a config and an existing transport
    pub fn from_config(config: &EngineConfig, transport: T) -> Result<Self> {
        let mut engine = Self::new(config.api_base_url(), transport);
        engine.page_size = config.page_size_nonzero()?;
        engine.batch_size = config.batch_size_nonzero()?;
        Ok(engine)
    }

    /// Use a custom token validator
    #[must_use]
    pub fn with_validator(mut self, validator: TokenValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Bind an access token for the `*_with_bound_token` operations
    #[must_use]
    pub fn with_token(mut self, token: impl Into<AccessToken>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace the bound access token
    pub fn set_token(&mut self, token: impl Into<AccessToken>) {
        self.token = Some(token.into());
    }

    /// Remove the bound access token
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Base URL every request path is built from
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Default records per page
    pub fn page_size(&self) -> NonZeroU32 {
        self.page_size
    }

    /// Default ids per batch
    pub fn batch_size(&self) -> NonZeroUsize {
        self.batch_size
    }

    /// Statistics for the last operation
    pub fn stats(&self) -> &FetchStats {
        &self.stats
    }

    /// Get the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get mutable transport
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the engine and return its transport
    pub fn into_transport(self) -> T {
        self.transport
    }

    // ========================================================================
    // Collections
    // ========================================================================

    /// Fetch every record of a collection, following pages until exhausted
    ///
    /// `page_size` falls back to the engine default when `None`.
    pub async fn fetch_collection(
        &mut self,
        token: &str,
        object_type: &str,
        filters: &Filters,
        sort: &SortSpec,
        page_size: Option<u32>,
    ) -> Result<Vec<JsonValue>> {
        let spec = RequestSpec::new(object_type)
            .with_filters(filters.clone())
            .with_sort(sort.clone())
            .page_size(page_size.unwrap_or(self.page_size.get()))?;
        self.fetch(token, &spec).await
    }

    /// Fetch every record described by a request spec
    pub async fn fetch(&mut self, token: &str, spec: &RequestSpec) -> Result<Vec<JsonValue>> {
        let start = Instant::now();
        self.stats = FetchStats::default();
        self.authorize(token)?;

        let key = spec.collection_key();
        let limit = spec.page_size.get();
        let mut offset: u64 = 0;
        let mut records = Vec::new();

        loop {
            let url = spec.page_url(&self.api_base_url, offset);
            let page = self.get_records(&url, &key).await?;

            if page.is_empty() {
                debug!(collection = %key, offset, "empty page, stopping");
                break;
            }

            let count = page.len();
            records.extend(page);

            if count < limit as usize {
                debug!(collection = %key, offset, count, "short page, stopping");
                break;
            }

            offset += u64::from(limit);
        }

        self.finish(start, records.len());
        info!(
            collection = %key,
            records = records.len(),
            requests = self.stats.requests,
            "fetched collection"
        );
        Ok(records)
    }

    /// Fetch a collection using the bound token
    pub async fn fetch_with_bound_token(&mut self, spec: &RequestSpec) -> Result<Vec<JsonValue>> {
        let token = self.bound_token()?;
        self.fetch(&token, spec).await
    }

    // ========================================================================
    // Ids
    // ========================================================================

    /// Fetch one record by numeric id
    ///
    /// A non-numeric id yields `None` without validating the token or
    /// issuing a request.
    pub async fn fetch_by_id(
        &mut self,
        token: &str,
        object_type: &str,
        id: &str,
    ) -> Result<Option<JsonValue>> {
        if !is_numeric_id(id) {
            debug!(id, "non-numeric id, skipping lookup");
            return Ok(None);
        }

        let ids = IdSelector::List(vec![id.trim().to_string()]);
        let records = self
            .fetch_by_ids(token, object_type, &ids, Some(1))
            .await?;
        Ok(records.into_iter().next())
    }

    /// Fetch records for a set of ids
    ///
    /// Lists are split into consecutive batches of at most `batch_size` ids
    /// (engine default when `None`). An empty list or a non-numeric single
    /// id yields an empty result without validating the token or issuing a
    /// request.
    pub async fn fetch_by_ids(
        &mut self,
        token: &str,
        object_type: &str,
        ids: &IdSelector,
        batch_size: Option<usize>,
    ) -> Result<Vec<JsonValue>> {
        let batch_size = match batch_size {
            Some(size) => NonZeroUsize::new(size)
                .ok_or_else(|| Error::invalid_value("batch_size", "must be greater than zero"))?,
            None => self.batch_size,
        };

        let queries = id_queries(ids, batch_size);
        if queries.is_empty() {
            debug!(object_type, "no ids to look up");
            return Ok(Vec::new());
        }

        let start = Instant::now();
        self.stats = FetchStats::default();
        self.authorize(token)?;

        let path = RequestSpec::new(object_type).path(&self.api_base_url);
        let key = object_type.to_lowercase();
        let mut records = Vec::new();

        for query in &queries {
            let url = format!("{path}{query}");
            records.extend(self.get_records(&url, &key).await?);
        }

        self.finish(start, records.len());
        info!(
            collection = %key,
            records = records.len(),
            batches = queries.len(),
            "fetched records by id"
        );
        Ok(records)
    }

    /// Fetch one record by id using the bound token
    pub async fn fetch_by_id_with_bound_token(
        &mut self,
        object_type: &str,
        id: &str,
    ) -> Result<Option<JsonValue>> {
        let token = self.bound_token()?;
        self.fetch_by_id(&token, object_type, id).await
    }

    /// Fetch records for a set of ids using the bound token
    pub async fn fetch_by_ids_with_bound_token(
        &mut self,
        object_type: &str,
        ids: &IdSelector,
        batch_size: Option<usize>,
    ) -> Result<Vec<JsonValue>> {
        let token = self.bound_token()?;
        self.fetch_by_ids(&token, object_type, ids, batch_size).await
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Validate the token, then replace any previous headers with its auth header
    fn authorize(&mut self, token: &str) -> Result<()> {
        self.validator.validate(token)?;
        self.transport.reset_headers();
        self.transport
            .set_headers(vec![AccessToken::new(token).header_line()]);
        Ok(())
    }

    /// Issue one GET and extract the records under `key`
    async fn get_records(&mut self, url: &str, key: &str) -> Result<Vec<JsonValue>> {
        debug!(url, "GET");
        let body = self.transport.get(url).await;
        self.stats.add_request();
        classify_response(&body)?.into_records(key)
    }

    fn bound_token(&self) -> Result<String> {
        self.token
            .as_ref()
            .map(|t| t.as_str().to_string())
            .ok_or(Error::TokenEmpty)
    }

    fn finish(&mut self, start: Instant, records: usize) {
        self.stats.add_records(records);
        self.stats.set_duration(start.elapsed().as_millis() as u64);
    }
}

impl<T: Transport> std::fmt::Debug for FetchEngine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchEngine")
            .field("api_base_url", &self.api_base_url)
            .field("page_size", &self.page_size)
            .field("batch_size", &self.batch_size)
            .field("has_token", &self.token.is_some())
            .finish_non_exhaustive()
    }
}
