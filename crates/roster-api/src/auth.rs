//! Bearer-token extractor: resolves the calling identity.

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};

use crate::{AppState, error::ApiError};
use roster_core::{identity::Identity, store::RosterStore};

/// The authenticated caller. Taking this in a handler means the request
/// carried a valid token naming a registered identity.
pub struct CurrentIdentity(pub Identity);

/// Pull the raw token out of an `Authorization: Bearer …` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
  headers
    .get(axum::http::header::AUTHORIZATION)?
    .to_str()
    .ok()?
    .strip_prefix("Bearer ")
}

impl<S> FromRequestParts<AppState<S>> for CurrentIdentity
where
  S: RosterStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token = bearer_token(&parts.headers).ok_or(ApiError::Unauthorized)?;
    let identity_id =
      state.tokens.verify(token).ok_or(ApiError::Unauthorized)?;

    // A well-signed token for a deleted or unknown identity is still a bad
    // credential.
    let identity = state
      .store
      .get_identity(identity_id)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?
      .ok_or(ApiError::Unauthorized)?;

    Ok(CurrentIdentity(identity))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::{path::PathBuf, sync::Arc};

  use axum::http::{Request, header};
  use chrono::Utc;
  use roster_core::candidate::{Candidate, CandidateDraft, CandidateUpdate};
  use roster_core::email::Email;
  use roster_core::identity::NewIdentity;
  use roster_core::query::CandidateQuery;
  use roster_core::store::UpdateOutcome;
  use uuid::Uuid;

  use crate::{AppState, ServerConfig, token::TokenIssuer};

  // A stub store that knows exactly one identity. The extractor only ever
  // calls `get_identity`; the remaining methods are unreachable here.
  #[derive(Clone)]
  struct OneIdentityStore(Identity);

  impl RosterStore for OneIdentityStore {
    type Error = std::convert::Infallible;
    async fn create_identity(&self, _: NewIdentity) -> Result<Identity, Self::Error> { unimplemented!() }
    async fn get_identity(&self, id: Uuid) -> Result<Option<Identity>, Self::Error> {
      Ok((self.0.identity_id == id).then(|| self.0.clone()))
    }
    async fn create_candidate(&self, _: Uuid, _: CandidateDraft) -> Result<Candidate, Self::Error> { unimplemented!() }
    async fn get_candidate(&self, _: Uuid, _: Uuid) -> Result<Option<Candidate>, Self::Error> { unimplemented!() }
    async fn update_candidate(&self, _: Uuid, _: Uuid, _: CandidateUpdate) -> Result<Option<UpdateOutcome>, Self::Error> { unimplemented!() }
    async fn delete_candidate(&self, _: Uuid, _: Uuid) -> Result<bool, Self::Error> { unimplemented!() }
    async fn list_candidates(&self, _: &CandidateQuery) -> Result<Vec<Candidate>, Self::Error> { unimplemented!() }
    async fn fetch_all_candidates(&self) -> Result<Vec<Candidate>, Self::Error> { unimplemented!() }
  }

  fn identity() -> Identity {
    Identity {
      identity_id: Uuid::new_v4(),
      first_name:  "Rania".to_string(),
      last_name:   "Haddad".to_string(),
      email:       Email::parse("rania@example.com").unwrap(),
      uuid:        Uuid::new_v4().to_string(),
      created_at:  Utc::now(),
    }
  }

  fn make_state(known: Identity) -> AppState<OneIdentityStore> {
    AppState {
      store:  Arc::new(OneIdentityStore(known)),
      tokens: Arc::new(TokenIssuer::new("test-secret", 30)),
      config: Arc::new(ServerConfig {
        host:            "127.0.0.1".to_string(),
        port:            8000,
        store_path:      PathBuf::from(":memory:"),
        token_secret:    "test-secret".to_string(),
        token_ttl_days:  30,
        unscoped_report: true,
      }),
    }
  }

  async fn extract(
    req: Request<axum::body::Body>,
    state: &AppState<OneIdentityStore>,
  ) -> Result<CurrentIdentity, ApiError> {
    let (mut parts, _) = req.into_parts();
    CurrentIdentity::from_request_parts(&mut parts, state).await
  }

  fn with_auth(value: &str) -> Request<axum::body::Body> {
    Request::builder()
      .header(header::AUTHORIZATION, value)
      .body(axum::body::Body::empty())
      .unwrap()
  }

  #[tokio::test]
  async fn a_valid_token_resolves_the_identity() {
    let known = identity();
    let state = make_state(known.clone());
    let token = state.tokens.mint(known.identity_id).unwrap();

    let got = extract(with_auth(&format!("Bearer {token}")), &state).await;
    assert_eq!(got.unwrap().0, known);
  }

  #[tokio::test]
  async fn a_missing_header_is_unauthorized() {
    let state = make_state(identity());
    let req = Request::builder().body(axum::body::Body::empty()).unwrap();
    assert!(matches!(
      extract(req, &state).await,
      Err(ApiError::Unauthorized)
    ));
  }

  #[tokio::test]
  async fn a_non_bearer_scheme_is_unauthorized() {
    let known = identity();
    let state = make_state(known.clone());
    let token = state.tokens.mint(known.identity_id).unwrap();

    let got = extract(with_auth(&format!("Basic {token}")), &state).await;
    assert!(matches!(got, Err(ApiError::Unauthorized)));
  }

  #[tokio::test]
  async fn a_token_for_an_unknown_identity_is_unauthorized() {
    let state = make_state(identity());
    let token = state.tokens.mint(Uuid::new_v4()).unwrap();

    let got = extract(with_auth(&format!("Bearer {token}")), &state).await;
    assert!(matches!(got, Err(ApiError::Unauthorized)));
  }

  #[tokio::test]
  async fn a_forged_token_is_unauthorized() {
    let known = identity();
    let state = make_state(known.clone());
    let forged = TokenIssuer::new("other-secret", 30)
      .mint(known.identity_id)
      .unwrap();

    let got = extract(with_auth(&format!("Bearer {forged}")), &state).await;
    assert!(matches!(got, Err(ApiError::Unauthorized)));
  }
}
