//! Access token validation
//!
//! Checks run in a fixed order so the reported error is the most precise
//! one: emptiness, segment count, payload decoding, then expiry.

use super::types::{timestamp_from_value, Clock, SystemClock, TokenClaims};
use crate::error::{Error, Result};
use crate::types::JsonValue;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use std::sync::Arc;
use tracing::debug;

/// base64url, with or without trailing `=` padding
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Validates access tokens before they are sent to the API
#[derive(Clone)]
pub struct TokenValidator {
    clock: Arc<dyn Clock>,
}

impl TokenValidator {
    /// Create a validator using the system clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create a validator using a custom clock
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
        }
    }

    /// Validate a token and return its decoded claims
    pub fn validate(&self, token: &str) -> Result<TokenClaims> {
        if token.trim().is_empty() {
            return Err(Error::TokenEmpty);
        }

        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 {
            return Err(Error::TokenInvalidSegments {
                segments: segments.len(),
            });
        }

        let claims = decode_payload(segments[1])?;

        let exp = match claims.get("exp") {
            None | Some(JsonValue::Null) => {
                return Err(Error::token_decode("the exp claim is missing"))
            }
            Some(raw_exp) => timestamp_from_value(raw_exp)
                .ok_or_else(|| Error::token_decode("the exp claim is not an integer timestamp"))?,
        };

        if exp < self.clock.now() {
            return Err(Error::TokenExpired { expired_at: exp });
        }

        debug!(expires_at = exp, "access token validated");
        Ok(claims)
    }
}

impl Default for TokenValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenValidator").finish_non_exhaustive()
    }
}

/// Decode the payload segment into a non-empty claims object
fn decode_payload(segment: &str) -> Result<TokenClaims> {
    let bytes = URL_SAFE_LENIENT
        .decode(segment)
        .map_err(|e| Error::token_decode(format!("base64 decode error: {e}")))?;

    let value: JsonValue = serde_json::from_slice(&bytes)
        .map_err(|e| Error::token_decode(format!("invalid JSON payload: {e}")))?;

    match value {
        JsonValue::Object(map) if !map.is_empty() => Ok(TokenClaims::new(map)),
        JsonValue::Object(_) => Err(Error::token_decode("payload contains no claims")),
        _ => Err(Error::token_decode("payload is not a claims object")),
    }
}
