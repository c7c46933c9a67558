//! Candidate profile records and their command types.
//!
//! A candidate is a flat document owned by exactly one identity. The owner
//! is assigned by the store from the authenticated caller and is part of
//! every read/update/delete predicate; it is never accepted from a request
//! body.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  email::Email,
  error::{Error, Result},
};

/// The fixed gender enumeration. Serialised exactly as the variant names;
/// any other string is a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
  Male,
  Female,
  NotSpecified,
}

impl Gender {
  /// The canonical string stored in the `gender` column.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Male => "Male",
      Self::Female => "Female",
      Self::NotSpecified => "NotSpecified",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "Male" => Ok(Self::Male),
      "Female" => Ok(Self::Female),
      "NotSpecified" => Ok(Self::NotSpecified),
      other => Err(Error::UnknownGender(other.to_owned())),
    }
  }
}

/// A candidate profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
  pub candidate_id:        Uuid,
  /// The identity that created the record. Set by the store; immutable.
  pub owner_id:            Uuid,
  pub first_name:          String,
  pub last_name:           String,
  pub email:               Email,
  /// Caller-supplied external token string; defaulted to a fresh UUID by
  /// the store when absent. Carried, not checked for uniqueness.
  pub uuid:                String,
  pub career_level:        String,
  pub job_major:           String,
  pub years_of_experience: u32,
  pub degree_type:         String,
  /// Ordered; duplicates allowed.
  pub skills:              Vec<String>,
  pub nationality:         String,
  pub city:                String,
  pub salary:              f64,
  pub gender:              Gender,
}

/// Input to [`crate::store::RosterStore::create_candidate`].
/// `candidate_id` and `owner_id` are always set by the store; owner-like
/// keys in a request body are dropped during deserialisation.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateDraft {
  pub first_name:          String,
  pub last_name:           String,
  pub email:               Email,
  pub uuid:                Option<String>,
  pub career_level:        String,
  pub job_major:           String,
  pub years_of_experience: u32,
  pub degree_type:         String,
  pub skills:              Vec<String>,
  pub nationality:         String,
  pub city:                String,
  pub salary:              f64,
  pub gender:              Gender,
}

impl CandidateDraft {
  /// Shape checks the type system cannot express.
  pub fn validate(&self) -> Result<()> {
    if self.salary < 0.0 {
      return Err(Error::NegativeSalary);
    }
    Ok(())
  }
}

/// A partial update. Absent fields are left untouched, never nulled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateUpdate {
  pub first_name:          Option<String>,
  pub last_name:           Option<String>,
  pub email:               Option<Email>,
  pub uuid:                Option<String>,
  pub career_level:        Option<String>,
  pub job_major:           Option<String>,
  pub years_of_experience: Option<u32>,
  pub degree_type:         Option<String>,
  pub skills:              Option<Vec<String>>,
  pub nationality:         Option<String>,
  pub city:                Option<String>,
  pub salary:              Option<f64>,
  pub gender:              Option<Gender>,
}

impl CandidateUpdate {
  pub fn validate(&self) -> Result<()> {
    if let Some(salary) = self.salary {
      if salary < 0.0 {
        return Err(Error::NegativeSalary);
      }
    }
    Ok(())
  }

  /// Apply the present fields to `candidate` in place. Returns `true` if
  /// any field actually changed value.
  pub fn apply_to(&self, candidate: &mut Candidate) -> bool {
    let mut changed = false;
    apply(&mut candidate.first_name, &self.first_name, &mut changed);
    apply(&mut candidate.last_name, &self.last_name, &mut changed);
    apply(&mut candidate.email, &self.email, &mut changed);
    apply(&mut candidate.uuid, &self.uuid, &mut changed);
    apply(&mut candidate.career_level, &self.career_level, &mut changed);
    apply(&mut candidate.job_major, &self.job_major, &mut changed);
    apply(
      &mut candidate.years_of_experience,
      &self.years_of_experience,
      &mut changed,
    );
    apply(&mut candidate.degree_type, &self.degree_type, &mut changed);
    apply(&mut candidate.skills, &self.skills, &mut changed);
    apply(&mut candidate.nationality, &self.nationality, &mut changed);
    apply(&mut candidate.city, &self.city, &mut changed);
    apply(&mut candidate.salary, &self.salary, &mut changed);
    apply(&mut candidate.gender, &self.gender, &mut changed);
    changed
  }
}

fn apply<T: PartialEq + Clone>(
  target: &mut T,
  source: &Option<T>,
  changed: &mut bool,
) {
  if let Some(value) = source {
    if target != value {
      *target = value.clone();
      *changed = true;
    }
  }
}
