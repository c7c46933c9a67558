//! Bearer-token minting and verification.
//!
//! Tokens are HS256 JWTs signed with a shared secret from the server
//! configuration. The subject claim carries the identity id; possession of
//! a valid token is the only credential the API recognises.

use chrono::Utc;
use jsonwebtoken::{
  Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried inside an access token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
  /// Identity id the token was minted for.
  sub: String,
  /// Issued-at, seconds since the Unix epoch.
  iat: i64,
  /// Expiry, seconds since the Unix epoch.
  exp: i64,
}

/// Signs and verifies access tokens with a shared secret.
pub struct TokenIssuer {
  encoding: EncodingKey,
  decoding: DecodingKey,
  ttl:      chrono::Duration,
}

impl TokenIssuer {
  pub fn new(secret: &str, ttl_days: i64) -> Self {
    Self {
      encoding: EncodingKey::from_secret(secret.as_bytes()),
      decoding: DecodingKey::from_secret(secret.as_bytes()),
      ttl:      chrono::Duration::days(ttl_days),
    }
  }

  /// Mint a token for `identity_id`, valid for the configured lifetime.
  pub fn mint(
    &self,
    identity_id: Uuid,
  ) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
      sub: identity_id.to_string(),
      iat: now.timestamp(),
      exp: (now + self.ttl).timestamp(),
    };
    encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
  }

  /// Verify `token` and return the identity id it names.
  ///
  /// Bad signature, wrong algorithm, expiry, and a malformed subject all
  /// come back as `None`; callers treat them identically.
  pub fn verify(&self, token: &str) -> Option<Uuid> {
    let validation = Validation::new(Algorithm::HS256);
    let data = decode::<Claims>(token, &self.decoding, &validation).ok()?;
    Uuid::parse_str(&data.claims.sub).ok()
  }
}
