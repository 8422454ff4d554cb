//! Compact token codec.
//!
//! Tokens arrive as `header.payload.signature`, each segment URL-safe base64
//! of a JSON object. The functions here only undo that encoding; they never
//! look at the signature. Anything that acts on claims goes through
//! [`verify::TokenVerifier`] instead.

pub mod verify;

pub use verify::{TokenVerifier, VerificationMode};

use crate::error::TokenError;

use models::Claims;

use base64::Engine;
use base64::alphabet::URL_SAFE;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde::Serialize;
use serde_json::{Map, Value};

/// URL-safe alphabet that accepts segments with or without `=` padding and
/// encodes without it.
const SEGMENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const SEGMENT_COUNT: usize = 3;

/// The three dot-separated pieces of a compact token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments<'a> {
    pub header: &'a str,
    pub payload: &'a str,
    pub signature: &'a str,
}

/// Split a token into its segments.
///
/// Header and payload must be non-empty. The signature may be empty; whether
/// that is acceptable is the verifier's call.
#[track_caller]
pub fn split_segments(token: &str) -> Result<Segments<'_>, TokenError> {
    let parts: Vec<&str> = token.trim().split('.').collect();

    if parts.len() != SEGMENT_COUNT {
        return Err(TokenError::malformed(format!(
            "expected {SEGMENT_COUNT} segments, found {}",
            parts.len()
        )));
    }

    if parts[0].is_empty() || parts[1].is_empty() {
        return Err(TokenError::malformed("header and payload segments must be non-empty"));
    }

    Ok(Segments {
        header: parts[0],
        payload: parts[1],
        signature: parts[2],
    })
}

/// Decode one base64url segment into a JSON object.
#[track_caller]
pub fn decode_segment(segment: &str) -> Result<Map<String, Value>, TokenError> {
    let bytes = SEGMENT_ENGINE
        .decode(segment)
        .map_err(|e| TokenError::malformed(format!("segment is not base64url: {e}")))?;

    let text = std::str::from_utf8(&bytes)
        .map_err(|e| TokenError::malformed(format!("segment is not UTF-8: {e}")))?;

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(TokenError::malformed(format!(
            "segment decodes to JSON {}, expected an object",
            json_kind(&other)
        ))),
        Err(e) => Err(TokenError::malformed(format!("segment is not JSON: {e}"))),
    }
}

/// Decode the header segment (algorithm, type).
#[track_caller]
pub fn decode_header(token: &str) -> Result<Map<String, Value>, TokenError> {
    decode_segment(split_segments(token)?.header)
}

/// Decode the payload segment into a raw claims map. No verification.
#[track_caller]
pub fn decode_payload(token: &str) -> Result<Map<String, Value>, TokenError> {
    decode_segment(split_segments(token)?.payload)
}

/// Decode the payload segment into typed [`Claims`]. No verification.
#[track_caller]
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let payload = decode_payload(token)?;
    serde_json::from_value(Value::Object(payload))
        .map_err(|e| TokenError::malformed(format!("payload does not match claims shape: {e}")))
}

/// Encode a value as a payload segment. Inverse of [`decode_segment`].
#[track_caller]
pub fn encode_payload<T: Serialize>(claims: &T) -> Result<String, TokenError> {
    let json = serde_json::to_vec(claims)
        .map_err(|e| TokenError::malformed(format!("claims do not serialize: {e}")))?;
    Ok(SEGMENT_ENGINE.encode(json))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
