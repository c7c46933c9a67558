//! `/user` handlers: registration and lookup.

use axum::{
  Json,
  extract::{Path, State},
};
use serde_json::{Value, json};
use uuid::Uuid;

use roster_core::{
  identity::{Identity, NewIdentity},
  store::RosterStore,
};

use crate::{AppState, error::ApiError};

/// `POST /user` — register an identity and mint its access token.
pub async fn register<S>(
  State(state): State<AppState<S>>,
  Json(input): Json<NewIdentity>,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let identity = state
    .store
    .create_identity(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let token = state.tokens.mint(identity.identity_id)?;

  Ok(Json(json!({
    "status": "success",
    "token":  token,
    "user":   identity,
  })))
}

/// `GET /user/{id}` — look up a registered identity.
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Identity>, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state
    .store
    .get_identity(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("user {id} not found")))
}
