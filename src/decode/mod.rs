//! Response decoding module
//!
//! Turns a raw response body into a [`ResultPage`] or a classified error.
//!
//! # Classification
//!
//! - empty body: `EmptyResponse`
//! - invalid or falsy JSON: `ResponseDecodeFailure`
//! - `{"errors": [...]}`: `ApiError` built from the first entry
//! - `{"code": .., "message": ..}`: `ApiError` carrying both
//! - anything else: a page for the caller to inspect

mod classify;

pub use classify::{classify_response, ResultPage};
