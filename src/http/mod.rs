//! HTTP transport module
//!
//! The fetch engine talks to the API through the [`Transport`] trait:
//! header reset, header set and a GET returning the raw body. A
//! reqwest-backed implementation is provided for production use.
//!
//! # Features
//!
//! - **Header State**: headers persist across calls until reset
//! - **Raw Bodies**: non-2xx bodies are returned as-is for classification
//! - **Failure Mapping**: transport failures become an empty body

mod transport;

pub use transport::{ReqwestTransport, Transport, TransportConfig, TransportConfigBuilder};
