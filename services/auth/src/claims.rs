//! Advisory JWT claims peek
//!
//! The client never verifies token signatures: it only reads the claims to
//! decide which screen to show first. Whether a token is actually valid is
//! decided by the server on every authenticated request.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClaimsResult;

/// Claims the client reads from a session token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Expiration time, seconds since the epoch; may be fractional
    pub exp: f64,
    /// Issued at time
    #[serde(default)]
    pub iat: Option<u64>,
    /// Subject, whatever shape the server uses
    #[serde(default)]
    pub sub: Option<Value>,
}

impl Claims {
    /// Whether the token expired strictly before `now`
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.exp < now as f64
    }
}

/// Decode the payload of `token` without checking its signature
///
/// A token without a numeric `exp` claim is rejected as malformed.
pub fn peek_claims(token: &str) -> ClaimsResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    // Presence of `exp` is enforced by deserializing into `Claims`
    validation.required_spec_claims.clear();

    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(token_data.claims)
}

/// Current time in seconds since the epoch
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}
