//! Tests for the auth module

use super::*;
use crate::error::Error;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use test_case::test_case;

const NOW: i64 = 1_700_000_000;

fn validator() -> TokenValidator {
    TokenValidator::with_clock(FixedClock(NOW))
}

fn signed_token(claims: &serde_json::Value) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap()
}

fn token_with_payload(payload: &str) -> String {
    format!("eyJhbGciOiJIUzI1NiJ9.{payload}.c2lnbmF0dXJl")
}

#[test]
fn test_valid_token_returns_claims() {
    let token = signed_token(&json!({"sub": "user-1", "exp": NOW + 3600}));
    let claims = validator().validate(&token).unwrap();

    assert_eq!(claims.exp(), Some(NOW + 3600));
    assert_eq!(claims.subject(), Some("user-1"));
}

#[test]
fn test_token_expiring_now_is_still_valid() {
    let token = signed_token(&json!({"exp": NOW}));
    assert!(validator().validate(&token).is_ok());
}

#[test]
fn test_expired_token() {
    let token = signed_token(&json!({"exp": NOW - 1}));
    let err = validator().validate(&token).unwrap_err();
    assert!(matches!(err, Error::TokenExpired { expired_at } if expired_at == NOW - 1));
}

#[test]
fn test_token_without_exp_is_a_decode_failure() {
    let token = signed_token(&json!({"sub": "service"}));
    let err = validator().validate(&token).unwrap_err();
    assert!(matches!(
        err,
        Error::TokenDecodeFailure { ref message } if message == "the exp claim is missing"
    ));
}

#[test]
fn test_null_exp_is_a_decode_failure() {
    let payload = URL_SAFE_NO_PAD.encode(r#"{"sub":"x","exp":null}"#);
    let err = validator()
        .validate(&token_with_payload(&payload))
        .unwrap_err();
    assert!(matches!(err, Error::TokenDecodeFailure { .. }));
}

#[test_case(r#"{"exp":1700003600.5}"# ; "float exp")]
#[test_case(r#"{"exp":"1700003600"}"# ; "string exp")]
fn test_non_integer_exp_is_a_decode_failure(json_payload: &str) {
    let payload = URL_SAFE_NO_PAD.encode(json_payload);
    let err = validator()
        .validate(&token_with_payload(&payload))
        .unwrap_err();
    assert!(matches!(err, Error::TokenDecodeFailure { .. }));
}

#[test]
fn test_validator_debug_is_opaque() {
    assert_eq!(format!("{:?}", validator()), "TokenValidator { .. }");
}

#[test_case("" ; "empty")]
#[test_case("   " ; "spaces")]
#[test_case("\t\n" ; "tabs and newlines")]
fn test_empty_token(token: &str) {
    assert!(matches!(validator().validate(token), Err(Error::TokenEmpty)));
}

#[test_case("abc", 1 ; "one segment")]
#[test_case("a.b", 2 ; "two segments")]
#[test_case("a.b.c.d", 4 ; "four segments")]
#[test_case("a.b.c.d.e", 5 ; "five segments")]
fn test_invalid_segment_count(token: &str, expected: usize) {
    let err = validator().validate(token).unwrap_err();
    assert!(matches!(err, Error::TokenInvalidSegments { segments } if segments == expected));
}

#[test]
fn test_undecodable_payload() {
    let err = validator()
        .validate(&token_with_payload("!!not-base64!!"))
        .unwrap_err();
    assert!(matches!(err, Error::TokenDecodeFailure { .. }));
}

#[test]
fn test_payload_not_json() {
    let payload = URL_SAFE_NO_PAD.encode("g00bleG0bble");
    let err = validator()
        .validate(&token_with_payload(&payload))
        .unwrap_err();
    assert!(matches!(err, Error::TokenDecodeFailure { .. }));
}

#[test_case("{}" ; "empty object")]
#[test_case("null" ; "null")]
#[test_case("false" ; "false")]
#[test_case("[1,2]" ; "array")]
fn test_payload_falsy_or_not_a_mapping(json_payload: &str) {
    let payload = URL_SAFE_NO_PAD.encode(json_payload);
    let err = validator()
        .validate(&token_with_payload(&payload))
        .unwrap_err();
    assert!(matches!(err, Error::TokenDecodeFailure { .. }));
}

#[test]
fn test_empty_payload_segment_reports_decode_failure() {
    let err = validator().validate("header..signature").unwrap_err();
    assert!(matches!(err, Error::TokenDecodeFailure { .. }));
}

#[test]
fn test_padded_payload_is_accepted() {
    let payload = base64::engine::general_purpose::URL_SAFE.encode(r#"{"exp":1700003600}"#);
    assert!(payload.ends_with('='));
    let claims = validator().validate(&token_with_payload(&payload)).unwrap();
    assert_eq!(claims.exp(), Some(NOW + 3600));
}

#[test]
fn test_non_numeric_exp_is_a_decode_failure() {
    let payload = URL_SAFE_NO_PAD.encode(r#"{"exp":"tomorrow"}"#);
    let err = validator()
        .validate(&token_with_payload(&payload))
        .unwrap_err();
    assert!(matches!(err, Error::TokenDecodeFailure { .. }));
}

#[test]
fn test_system_clock_rejects_old_token() {
    let token = signed_token(&json!({"exp": 1_000_000_000}));
    let err = TokenValidator::new().validate(&token).unwrap_err();
    assert!(err.is_token_error());
}
