//! HTTP layer for the roster service.
//!
//! Exposes an axum [`Router`] over any [`RosterStore`]: registration and
//! token issue at `/user`, ownership-scoped candidate CRUD and filtered
//! listing under `/candidate` and `/all-candidates`, and the cross-owner
//! CSV export at `/generate-report`.

pub mod auth;
pub mod candidates;
pub mod error;
pub mod report;
pub mod token;
pub mod users;

pub use error::ApiError;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Json, Router,
  routing::{get, post},
};
use roster_core::store::RosterStore;
use serde::Deserialize;
use serde_json::{Value, json};

use token::TokenIssuer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  pub store_path:      PathBuf,
  /// Shared secret for signing access tokens. `--generate-secret` prints
  /// a suitable value.
  pub token_secret:    String,
  /// Token lifetime in days.
  #[serde(default = "default_token_ttl_days")]
  pub token_ttl_days:  i64,
  /// Serve the cross-owner CSV export at `/generate-report`.
  #[serde(default = "default_unscoped_report")]
  pub unscoped_report: bool,
}

fn default_token_ttl_days() -> i64 {
  30
}

fn default_unscoped_report() -> bool {
  true
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: RosterStore> {
  pub store:  Arc<S>,
  pub tokens: Arc<TokenIssuer>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the roster API.
///
/// `/generate-report` is mounted only when the configuration enables the
/// unscoped export; with it off the path does not exist.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: RosterStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let mut app = Router::new()
    .route("/user",           post(users::register::<S>))
    .route("/user/{id}",      get(users::get_one::<S>))
    .route("/candidate",      post(candidates::create::<S>))
    .route(
      "/candidate/{id}",
      get(candidates::get_one::<S>)
        .put(candidates::update::<S>)
        .delete(candidates::delete::<S>),
    )
    .route("/all-candidates", get(candidates::list::<S>))
    .route("/health",         get(health));

  if state.config.unscoped_report {
    app = app.route("/generate-report", get(report::generate::<S>));
  }

  app.with_state(state)
}

/// `GET /health` — liveness probe.
async fn health() -> Json<Value> {
  Json(json!({ "status": "healthy" }))
}

// ─── Integration tests ────────────────────────────────────────────────────────
