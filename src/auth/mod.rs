//! Authentication module
//!
//! Client-side checks for the compact signed access token used by the API:
//! structure (three dot-separated segments), payload decoding and expiry.
//! Signatures are not verified here; the API does that on every request.

mod types;
mod validator;

pub use types::{AccessToken, Clock, FixedClock, SystemClock, TokenClaims};
pub use validator::TokenValidator;

/// Header carrying the access token on every request
pub const AUTH_HEADER_NAME: &str = "X-JWT-Authorization";

#[cfg(test)]
mod tests;
