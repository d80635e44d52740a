//! Engine types
//!
//! Per-operation statistics for the fetch engine.

/// Statistics from the last fetch operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Requests issued to the transport
    pub requests: usize,
    /// Records returned to the caller
    pub records: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl FetchStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a request
    pub fn add_request(&mut self) {
        self.requests += 1;
    }

    /// Add records
    pub fn add_records(&mut self, count: usize) {
        self.records += count;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
