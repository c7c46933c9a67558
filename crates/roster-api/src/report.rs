//! CSV export of every candidate in the store.

use axum::{
  extract::State,
  http::{HeaderValue, header},
  response::{IntoResponse, Response},
};

use roster_core::{candidate::Candidate, store::RosterStore};

use crate::{AppState, error::ApiError};

/// Column order of the export, one column per candidate field.
const HEADER: [&str; 15] = [
  "candidate_id",
  "owner_id",
  "first_name",
  "last_name",
  "email",
  "uuid",
  "career_level",
  "job_major",
  "years_of_experience",
  "degree_type",
  "skills",
  "nationality",
  "city",
  "salary",
  "gender",
];

/// Render `candidates` as CSV. The header row is always written, so an
/// empty store still exports a well-formed file.
pub fn write_csv(candidates: &[Candidate]) -> Result<Vec<u8>, csv::Error> {
  let mut writer = csv::WriterBuilder::new()
    .has_headers(false)
    .from_writer(Vec::new());

  writer.write_record(HEADER)?;
  for c in candidates {
    writer.write_record([
      c.candidate_id.to_string(),
      c.owner_id.to_string(),
      c.first_name.clone(),
      c.last_name.clone(),
      c.email.as_str().to_owned(),
      c.uuid.clone(),
      c.career_level.clone(),
      c.job_major.clone(),
      c.years_of_experience.to_string(),
      c.degree_type.clone(),
      c.skills.join(";"),
      c.nationality.clone(),
      c.city.clone(),
      c.salary.to_string(),
      c.gender.as_str().to_owned(),
    ])?;
  }
  Ok(writer.into_inner().map_err(|e| e.into_error())?)
}

/// `GET /generate-report` — export every candidate, across all owners, as a
/// CSV attachment. Requires no token.
pub async fn generate<S>(
  State(state): State<AppState<S>>,
) -> Result<Response, ApiError>
where
  S: RosterStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let candidates = state
    .store
    .fetch_all_candidates()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let csv = write_csv(&candidates).map_err(|e| ApiError::Store(Box::new(e)))?;

  let mut response = csv.into_response();
  response.headers_mut().insert(
    header::CONTENT_TYPE,
    HeaderValue::from_static("text/csv; charset=utf-8"),
  );
  response.headers_mut().insert(
    header::CONTENT_DISPOSITION,
    HeaderValue::from_static("attachment; filename=candidates_report.csv"),
  );
  Ok(response)
}
