//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated lowercase
//! strings, skill lists as compact JSON arrays, gender as its canonical
//! string.

use chrono::{DateTime, Utc};
use roster_core::{
  candidate::{Candidate, Gender},
  email::Email,
  identity::Identity,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Skills ──────────────────────────────────────────────────────────────────

pub fn encode_skills(skills: &[String]) -> Result<String> {
  Ok(serde_json::to_string(skills)?)
}

pub fn decode_skills(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `identities` row.
pub struct RawIdentity {
  pub identity_id: String,
  pub first_name:  String,
  pub last_name:   String,
  pub email:       String,
  pub uuid:        String,
  pub created_at:  String,
}

impl RawIdentity {
  pub fn into_identity(self) -> Result<Identity> {
    Ok(Identity {
      identity_id: decode_uuid(&self.identity_id)?,
      first_name:  self.first_name,
      last_name:   self.last_name,
      email:       Email::parse(self.email)?,
      uuid:        self.uuid,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `candidates` row.
pub struct RawCandidate {
  pub candidate_id:        String,
  pub owner_id:            String,
  pub first_name:          String,
  pub last_name:           String,
  pub email:               String,
  pub uuid:                String,
  pub career_level:        String,
  pub job_major:           String,
  pub years_of_experience: i64,
  pub degree_type:         String,
  pub skills:              String,
  pub nationality:         String,
  pub city:                String,
  pub salary:              f64,
  pub gender:              String,
}

impl RawCandidate {
  /// Column order follows `CANDIDATE_COLUMNS` in `store.rs`.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      candidate_id:        row.get(0)?,
      owner_id:            row.get(1)?,
      first_name:          row.get(2)?,
      last_name:           row.get(3)?,
      email:               row.get(4)?,
      uuid:                row.get(5)?,
      career_level:        row.get(6)?,
      job_major:           row.get(7)?,
      years_of_experience: row.get(8)?,
      degree_type:         row.get(9)?,
      skills:              row.get(10)?,
      nationality:         row.get(11)?,
      city:                row.get(12)?,
      salary:              row.get(13)?,
      gender:              row.get(14)?,
    })
  }

  pub fn into_candidate(self) -> Result<Candidate> {
    Ok(Candidate {
      candidate_id:        decode_uuid(&self.candidate_id)?,
      owner_id:            decode_uuid(&self.owner_id)?,
      first_name:          self.first_name,
      last_name:           self.last_name,
      email:               Email::parse(self.email)?,
      uuid:                self.uuid,
      career_level:        self.career_level,
      job_major:           self.job_major,
      years_of_experience: self.years_of_experience as u32,
      degree_type:         self.degree_type,
      skills:              decode_skills(&self.skills)?,
      nationality:         self.nationality,
      city:                self.city,
      salary:              self.salary,
      gender:              Gender::parse(&self.gender)?,
    })
  }
}
