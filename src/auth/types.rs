//! Auth types
//!
//! The access token wrapper, its decoded claims and the clock used for
//! expiry checks.

use super::AUTH_HEADER_NAME;
use crate::types::{JsonObject, JsonValue};
use chrono::Utc;
use std::fmt;

/// An access token as supplied by the caller
///
/// The value is redacted from `Debug` output so it never lands in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token string
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Header line sent with every request, `X-JWT-Authorization: Token <token>`
    pub fn header_line(&self) -> String {
        format!("{AUTH_HEADER_NAME}: Token {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"<redacted>").finish()
    }
}

impl From<&str> for AccessToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// Claims decoded from the payload segment of an access token
#[derive(Debug, Clone, PartialEq)]
pub struct TokenClaims {
    claims: JsonObject,
}

impl TokenClaims {
    pub(crate) fn new(claims: JsonObject) -> Self {
        Self { claims }
    }

    /// Look up a claim by name
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.claims.get(name)
    }

    /// The `exp` claim as a Unix timestamp, if present and an integer
    pub fn exp(&self) -> Option<i64> {
        self.claims.get("exp").and_then(timestamp_from_value)
    }

    /// The `sub` claim, if present and a string
    pub fn subject(&self) -> Option<&str> {
        self.claims.get("sub").and_then(JsonValue::as_str)
    }

    /// All claims
    pub fn as_map(&self) -> &JsonObject {
        &self.claims
    }

    /// Consume into the underlying claims map
    pub fn into_map(self) -> JsonObject {
        self.claims
    }
}

/// Read an integer timestamp claim
pub(crate) fn timestamp_from_value(value: &JsonValue) -> Option<i64> {
    value.as_i64()
}

/// Source of the current time, in Unix seconds
pub trait Clock: Send + Sync {
    /// Current Unix timestamp in seconds
    fn now(&self) -> i64;
}

/// Wall clock backed by `chrono::Utc`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Clock frozen at a fixed instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}
