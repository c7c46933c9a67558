//! `/candidate` and `/all-candidates` handlers.
//!
//! Every operation here runs as the authenticated caller: creates stamp the
//! caller as owner, and reads, updates, deletes and listings are evaluated
//! against the caller's records only. A record owned by someone else is
//! reported exactly like a missing one.

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use roster_core::{
  candidate::{Candidate, CandidateDraft, CandidateUpdate, Gender},
  query::{CandidateFilter, CandidateQuery},
  store::RosterStore,
};

use crate::{AppState, auth::CurrentIdentity, error::ApiError};

/// `POST /candidate` — create a candidate owned by the caller.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentIdentity(identity): CurrentIdentity,
  Json(draft): Json<CandidateDraft>,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  draft
    .validate()
    .map_err(|e| ApiError::Validation(e.to_string()))?;

  let candidate = state
    .store
    .create_candidate(identity.identity_id, draft)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(json!({ "status": "success", "candidate": candidate })))
}

/// `GET /candidate/{id}` — fetch one of the caller's candidates.
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  CurrentIdentity(identity): CurrentIdentity,
  Path(id): Path<Uuid>,
) -> Result<Json<Candidate>, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  state
    .store
    .get_candidate(id, identity.identity_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .map(Json)
    .ok_or_else(|| ApiError::NotFound(format!("candidate {id} not found")))
}

/// `PUT /candidate/{id}` — apply a partial update to one of the caller's
/// candidates. Sending values identical to the stored ones is a success.
pub async fn update<S>(
  State(state): State<AppState<S>>,
  CurrentIdentity(identity): CurrentIdentity,
  Path(id): Path<Uuid>,
  Json(update): Json<CandidateUpdate>,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  update
    .validate()
    .map_err(|e| ApiError::Validation(e.to_string()))?;

  let outcome = state
    .store
    .update_candidate(id, identity.identity_id, update)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("candidate {id} not found")))?;

  Ok(Json(
    json!({ "status": "success", "candidate": outcome.candidate }),
  ))
}

/// `DELETE /candidate/{id}` — delete one of the caller's candidates. A
/// repeated delete reports not-found.
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  CurrentIdentity(identity): CurrentIdentity,
  Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let deleted = state
    .store
    .delete_candidate(id, identity.identity_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  if !deleted {
    return Err(ApiError::NotFound(format!("candidate {id} not found")));
  }
  Ok(Json(
    json!({ "status": "success", "message": "Candidate deleted" }),
  ))
}

/// Query parameters for `GET /all-candidates`. Unknown parameters are
/// ignored; `skills` is comma-separated.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
  pub first_name:          Option<String>,
  pub last_name:           Option<String>,
  pub email:               Option<String>,
  pub career_level:        Option<String>,
  pub job_major:           Option<String>,
  pub years_of_experience: Option<u32>,
  pub degree_type:         Option<String>,
  pub skills:              Option<String>,
  pub nationality:         Option<String>,
  pub city:                Option<String>,
  pub salary_min:          Option<f64>,
  pub salary_max:          Option<f64>,
  pub gender:              Option<Gender>,
  pub search:              Option<String>,
}

impl ListParams {
  fn into_filter(self) -> CandidateFilter {
    CandidateFilter {
      first_name:          self.first_name,
      last_name:           self.last_name,
      email:               self.email,
      career_level:        self.career_level,
      job_major:           self.job_major,
      years_of_experience: self.years_of_experience,
      degree_type:         self.degree_type,
      skills:              self
        .skills
        .map(|s| {
          s.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(ToOwned::to_owned)
            .collect()
        })
        .unwrap_or_default(),
      nationality:         self.nationality,
      city:                self.city,
      salary_min:          self.salary_min,
      salary_max:          self.salary_max,
      gender:              self.gender,
      search:              self.search,
    }
  }
}

/// `GET /all-candidates` — list the caller's candidates, filtered.
pub async fn list<S>(
  State(state): State<AppState<S>>,
  CurrentIdentity(identity): CurrentIdentity,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Candidate>>, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let filter = params.into_filter();
  let query = CandidateQuery::scoped(identity.identity_id, &filter);

  let candidates = state
    .store
    .list_candidates(&query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(candidates))
}
