//! The single boundary every claim read passes through.
//!
//! A verifier either returns [`Claims`] it is prepared to act on or an error,
//! and callers treat any error as "not authenticated". Nothing here is a
//! security boundary: the server re-checks every gated request.

use super::{decode_claims, decode_segment, split_segments};
use crate::error::TokenError;

use common::{ErrorLocation, RedactedSecret};
use models::Claims;

use std::panic::Location;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How session tokens are checked before their claims are used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMode {
    /// Structure, header algorithm and expiry only. The signature is not
    /// checked because the client does not hold the server's key.
    #[default]
    DecodeOnly,
    /// HMAC-SHA256 signature and expiry, with a shared secret.
    Hs256,
}

#[derive(Debug, Clone)]
enum Strategy {
    DecodeOnly,
    Hs256 { secret: RedactedSecret },
}

#[derive(Debug, Clone)]
pub struct TokenVerifier {
    strategy: Strategy,
}

impl TokenVerifier {
    pub fn decode_only() -> Self {
        Self {
            strategy: Strategy::DecodeOnly,
        }
    }

    #[track_caller]
    pub fn hs256(secret: RedactedSecret) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::MissingSecret {
                message: "hs256 verification needs a non-empty secret".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            strategy: Strategy::Hs256 { secret },
        })
    }

    pub fn mode(&self) -> VerificationMode {
        match self.strategy {
            Strategy::DecodeOnly => VerificationMode::DecodeOnly,
            Strategy::Hs256 { .. } => VerificationMode::Hs256,
        }
    }

    /// Verify against the system clock.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, unix_now())
    }

    /// Verify as if the current time were `now_secs`.
    ///
    /// Both modes apply the same expiry rule: a token whose `exp` is not
    /// after `now_secs` is expired.
    pub fn verify_at(&self, token: &str, now_secs: u64) -> Result<Claims, TokenError> {
        let claims = match &self.strategy {
            Strategy::DecodeOnly => verify_structure(token, now_secs)?,
            Strategy::Hs256 { secret } => verify_hs256(token, secret, now_secs)?,
        };

        debug!(
            "Token accepted ({:?}) for user '{}'",
            self.mode(),
            claims.username
        );
        Ok(claims)
    }
}

impl Default for TokenVerifier {
    fn default() -> Self {
        Self::decode_only()
    }
}

#[track_caller]
fn verify_structure(token: &str, now_secs: u64) -> Result<Claims, TokenError> {
    let segments = split_segments(token)?;
    let header = decode_segment(segments.header)?;

    let algorithm = header.get("alg").and_then(Value::as_str).unwrap_or("");
    if algorithm.is_empty() || algorithm.eq_ignore_ascii_case("none") {
        return Err(TokenError::unsigned(format!(
            "header declares algorithm '{algorithm}'"
        )));
    }

    if segments.signature.is_empty() {
        return Err(TokenError::unsigned("signature segment is empty"));
    }

    let claims = decode_claims(token)?;
    if claims.is_expired_at(now_secs) {
        return Err(TokenError::expired());
    }

    Ok(claims)
}

#[track_caller]
fn verify_hs256(
    token: &str,
    secret: &RedactedSecret,
    now_secs: u64,
) -> Result<Claims, TokenError> {
    // jsonwebtoken accepts `exp == now`; expiry is checked below instead.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = false;
    validation.validate_aud = false;

    let key = DecodingKey::from_secret(secret.as_str().as_bytes());

    let claims = decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::expired(),
            ErrorKind::InvalidSignature => TokenError::invalid_signature(),
            ErrorKind::InvalidAlgorithm => {
                TokenError::unsigned(format!("token is not HS256: {e}"))
            }
            _ => TokenError::malformed(format!("JWT decode error: {e}")),
        })?;

    if claims.is_expired_at(now_secs) {
        return Err(TokenError::expired());
    }

    Ok(claims)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
