//! [`SqliteStore`] — the SQLite implementation of [`RosterStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use roster_core::{
  candidate::{Candidate, CandidateDraft, CandidateUpdate},
  identity::{Identity, NewIdentity},
  query::CandidateQuery,
  store::{RosterStore, UpdateOutcome},
};

use crate::{
  encode::{encode_dt, encode_skills, encode_uuid, RawCandidate, RawIdentity},
  filter::compile_where,
  schema::SCHEMA,
  Error, Result,
};

/// Candidate column list shared by every SELECT; order matches
/// [`RawCandidate::from_row`].
const CANDIDATE_COLUMNS: &str = "candidate_id, owner_id, first_name, \
  last_name, email, uuid, career_level, job_major, years_of_experience, \
  degree_type, skills, nationality, city, salary, gender";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A roster store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert a fully-built [`Candidate`] and its text-index row in one
  /// transaction.
  async fn insert_candidate(&self, candidate: &Candidate) -> Result<()> {
    let candidate_id_str = encode_uuid(candidate.candidate_id);
    let owner_id_str     = encode_uuid(candidate.owner_id);
    let first_name       = candidate.first_name.clone();
    let last_name        = candidate.last_name.clone();
    let email_str        = candidate.email.as_str().to_owned();
    let uuid_str         = candidate.uuid.clone();
    let career_level     = candidate.career_level.clone();
    let job_major        = candidate.job_major.clone();
    let years            = i64::from(candidate.years_of_experience);
    let degree_type      = candidate.degree_type.clone();
    let skills_str       = encode_skills(&candidate.skills)?;
    let nationality      = candidate.nationality.clone();
    let city             = candidate.city.clone();
    let salary           = candidate.salary;
    let gender_str       = candidate.gender.as_str().to_owned();
    let body             = search_body(candidate);

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO candidates (
             candidate_id, owner_id, first_name, last_name, email, uuid,
             career_level, job_major, years_of_experience, degree_type,
             skills, nationality, city, salary, gender
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
          rusqlite::params![
            candidate_id_str,
            owner_id_str,
            first_name,
            last_name,
            email_str,
            uuid_str,
            career_level,
            job_major,
            years,
            degree_type,
            skills_str,
            nationality,
            city,
            salary,
            gender_str,
          ],
        )?;
        tx.execute(
          "INSERT INTO candidates_fts (candidate_id, body) VALUES (?1, ?2)",
          rusqlite::params![candidate_id_str, body],
        )?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── RosterStore impl ────────────────────────────────────────────────────────

impl RosterStore for SqliteStore {
  type Error = Error;

  // ── Identities ────────────────────────────────────────────────────────────

  async fn create_identity(&self, input: NewIdentity) -> Result<Identity> {
    let identity = Identity {
      identity_id: Uuid::new_v4(),
      first_name:  input.first_name,
      last_name:   input.last_name,
      email:       input.email,
      uuid:        input.uuid.unwrap_or_else(|| Uuid::new_v4().to_string()),
      created_at:  Utc::now(),
    };

    let id_str    = encode_uuid(identity.identity_id);
    let first     = identity.first_name.clone();
    let last      = identity.last_name.clone();
    let email_str = identity.email.as_str().to_owned();
    let uuid_str  = identity.uuid.clone();
    let at_str    = encode_dt(identity.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO identities (identity_id, first_name, last_name, email, uuid, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, first, last, email_str, uuid_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(identity)
  }

  async fn get_identity(&self, id: Uuid) -> Result<Option<Identity>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawIdentity> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT identity_id, first_name, last_name, email, uuid, created_at
             FROM identities WHERE identity_id = ?1",
            rusqlite::params![id_str],
            |row| {
              Ok(RawIdentity {
                identity_id: row.get(0)?,
                first_name:  row.get(1)?,
                last_name:   row.get(2)?,
                email:       row.get(3)?,
                uuid:        row.get(4)?,
                created_at:  row.get(5)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawIdentity::into_identity).transpose()
  }

  // ── Candidates ────────────────────────────────────────────────────────────

  async fn create_candidate(
    &self,
    owner: Uuid,
    draft: CandidateDraft,
  ) -> Result<Candidate> {
    let candidate = Candidate {
      candidate_id:        Uuid::new_v4(),
      owner_id:            owner,
      first_name:          draft.first_name,
      last_name:           draft.last_name,
      email:               draft.email,
      uuid:                draft.uuid.unwrap_or_else(|| Uuid::new_v4().to_string()),
      career_level:        draft.career_level,
      job_major:           draft.job_major,
      years_of_experience: draft.years_of_experience,
      degree_type:         draft.degree_type,
      skills:              draft.skills,
      nationality:         draft.nationality,
      city:                draft.city,
      salary:              draft.salary,
      gender:              draft.gender,
    };

    self.insert_candidate(&candidate).await?;
    Ok(candidate)
  }

  async fn get_candidate(
    &self,
    id: Uuid,
    owner: Uuid,
  ) -> Result<Option<Candidate>> {
    let id_str    = encode_uuid(id);
    let owner_str = encode_uuid(owner);

    let raw: Option<RawCandidate> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "SELECT {CANDIDATE_COLUMNS} FROM candidates
               WHERE candidate_id = ?1 AND owner_id = ?2"
            ),
            rusqlite::params![id_str, owner_str],
            RawCandidate::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawCandidate::into_candidate).transpose()
  }

  async fn update_candidate(
    &self,
    id: Uuid,
    owner: Uuid,
    update: CandidateUpdate,
  ) -> Result<Option<UpdateOutcome>> {
    let Some(mut candidate) = self.get_candidate(id, owner).await? else {
      return Ok(None);
    };

    if !update.apply_to(&mut candidate) {
      // Matched but nothing changed: success without a write.
      return Ok(Some(UpdateOutcome { candidate, modified: false }));
    }

    let candidate_id_str = encode_uuid(candidate.candidate_id);
    let owner_str        = encode_uuid(owner);
    let first_name       = candidate.first_name.clone();
    let last_name        = candidate.last_name.clone();
    let email_str        = candidate.email.as_str().to_owned();
    let uuid_str         = candidate.uuid.clone();
    let career_level     = candidate.career_level.clone();
    let job_major        = candidate.job_major.clone();
    let years            = i64::from(candidate.years_of_experience);
    let degree_type      = candidate.degree_type.clone();
    let skills_str       = encode_skills(&candidate.skills)?;
    let nationality      = candidate.nationality.clone();
    let city             = candidate.city.clone();
    let salary           = candidate.salary;
    let gender_str       = candidate.gender.as_str().to_owned();
    let body             = search_body(&candidate);

    let matched = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let n = tx.execute(
          "UPDATE candidates SET
             first_name = ?1, last_name = ?2, email = ?3, uuid = ?4,
             career_level = ?5, job_major = ?6, years_of_experience = ?7,
             degree_type = ?8, skills = ?9, nationality = ?10, city = ?11,
             salary = ?12, gender = ?13
           WHERE candidate_id = ?14 AND owner_id = ?15",
          rusqlite::params![
            first_name,
            last_name,
            email_str,
            uuid_str,
            career_level,
            job_major,
            years,
            degree_type,
            skills_str,
            nationality,
            city,
            salary,
            gender_str,
            candidate_id_str,
            owner_str,
          ],
        )?;
        if n > 0 {
          tx.execute(
            "DELETE FROM candidates_fts WHERE candidate_id = ?1",
            rusqlite::params![candidate_id_str],
          )?;
          tx.execute(
            "INSERT INTO candidates_fts (candidate_id, body) VALUES (?1, ?2)",
            rusqlite::params![candidate_id_str, body],
          )?;
        }
        tx.commit()?;
        Ok(n > 0)
      })
      .await?;

    // The record vanished between the read and the write.
    if !matched {
      return Ok(None);
    }

    Ok(Some(UpdateOutcome { candidate, modified: true }))
  }

  async fn delete_candidate(&self, id: Uuid, owner: Uuid) -> Result<bool> {
    let id_str    = encode_uuid(id);
    let owner_str = encode_uuid(owner);

    let deleted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let n = tx.execute(
          "DELETE FROM candidates WHERE candidate_id = ?1 AND owner_id = ?2",
          rusqlite::params![id_str, owner_str],
        )?;
        if n > 0 {
          tx.execute(
            "DELETE FROM candidates_fts WHERE candidate_id = ?1",
            rusqlite::params![id_str],
          )?;
        }
        tx.commit()?;
        Ok(n > 0)
      })
      .await?;

    Ok(deleted)
  }

  async fn list_candidates(
    &self,
    query: &CandidateQuery,
  ) -> Result<Vec<Candidate>> {
    let (where_clause, params) = compile_where(query);

    let raws: Vec<RawCandidate> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {CANDIDATE_COLUMNS} FROM candidates WHERE {where_clause}"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawCandidate::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCandidate::into_candidate).collect()
  }

  async fn fetch_all_candidates(&self) -> Result<Vec<Candidate>> {
    let raws: Vec<RawCandidate> = self
      .conn
      .call(|conn| {
        let sql = format!("SELECT {CANDIDATE_COLUMNS} FROM candidates");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawCandidate::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCandidate::into_candidate).collect()
  }
}

/// The text-index body for a candidate: every searchable field, space-joined.
/// `years_of_experience`, `salary`, `gender`, and the opaque token strings
/// are not indexed.
fn search_body(candidate: &Candidate) -> String {
  let mut parts: Vec<&str> = vec![
    &candidate.first_name,
    &candidate.last_name,
    candidate.email.as_str(),
    &candidate.career_level,
    &candidate.job_major,
    &candidate.degree_type,
  ];
  parts.extend(candidate.skills.iter().map(String::as_str));
  parts.push(&candidate.nationality);
  parts.push(&candidate.city);
  parts.join(" ")
}
