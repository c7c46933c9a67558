//! The candidate filter builder.
//!
//! [`CandidateFilter`] is the bag of optional search parameters a caller may
//! supply; [`CandidateQuery`] is the compiled predicate a store evaluates.
//! The owner constraint lives in a private field populated only by
//! [`CandidateQuery::scoped`], so no combination of caller input can widen a
//! query beyond the records of the identity that issued it.

use uuid::Uuid;

use crate::candidate::Gender;

// ─── Filter parameters ───────────────────────────────────────────────────────

/// Optional search parameters. The HTTP layer deserialises its own query
/// struct and builds this; unrecognised parameters never reach it.
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
  pub first_name:          Option<String>,
  pub last_name:           Option<String>,
  pub email:               Option<String>,
  pub career_level:        Option<String>,
  pub job_major:           Option<String>,
  pub years_of_experience: Option<u32>,
  pub degree_type:         Option<String>,
  /// Any-of semantics: match records whose skill set intersects this list.
  pub skills:              Vec<String>,
  pub nationality:         Option<String>,
  pub city:                Option<String>,
  pub salary_min:          Option<f64>,
  pub salary_max:          Option<f64>,
  pub gender:              Option<Gender>,
  /// Free text over the combined text index (names, email, career level,
  /// job major, degree type, skills, nationality, city).
  pub search:              Option<String>,
}

// ─── Compiled predicate ──────────────────────────────────────────────────────

/// A filterable candidate field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
  FirstName,
  LastName,
  Email,
  CareerLevel,
  JobMajor,
  YearsOfExperience,
  DegreeType,
  Skills,
  Nationality,
  City,
  Salary,
  Gender,
}

/// A scalar comparison value.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
  Text(String),
  Int(i64),
  Real(f64),
}

/// One compiled clause. Clauses always combine with AND.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
  /// Exact match on a scalar field.
  Eq(ScalarValue),
  /// Intersection with a list field: any of these values present.
  AnyOf(Vec<String>),
  /// Inclusive range; either bound may be absent, never both.
  Between { min: Option<f64>, max: Option<f64> },
}

/// The compiled, ownership-scoped candidate predicate.
///
/// `owner` is structural: set once by [`CandidateQuery::scoped`], readable
/// but not writable, and always evaluated alongside the clauses. A query
/// with an inverted salary range or a token-free search text still compiles;
/// it simply matches nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateQuery {
  owner:   Uuid,
  clauses: Vec<(FilterField, Clause)>,
  text:    Option<String>,
}

impl CandidateQuery {
  /// Compile `filter` into a predicate scoped to `owner`.
  ///
  /// Empty strings and empty skill lists are query-string artifacts and are
  /// treated as absent; numeric zero is a real value and is kept.
  pub fn scoped(owner: Uuid, filter: &CandidateFilter) -> Self {
    let mut clauses = Vec::new();

    if let Some(v) = non_empty(&filter.first_name) {
      clauses.push((FilterField::FirstName, eq_text(v)));
    }
    if let Some(v) = non_empty(&filter.last_name) {
      clauses.push((FilterField::LastName, eq_text(v)));
    }
    if let Some(v) = non_empty(&filter.email) {
      clauses.push((FilterField::Email, eq_text(v)));
    }
    if let Some(v) = non_empty(&filter.career_level) {
      clauses.push((FilterField::CareerLevel, eq_text(v)));
    }
    if let Some(v) = non_empty(&filter.job_major) {
      clauses.push((FilterField::JobMajor, eq_text(v)));
    }
    if let Some(years) = filter.years_of_experience {
      clauses.push((
        FilterField::YearsOfExperience,
        Clause::Eq(ScalarValue::Int(i64::from(years))),
      ));
    }
    if let Some(v) = non_empty(&filter.degree_type) {
      clauses.push((FilterField::DegreeType, eq_text(v)));
    }
    if !filter.skills.is_empty() {
      clauses.push((FilterField::Skills, Clause::AnyOf(filter.skills.clone())));
    }
    if let Some(v) = non_empty(&filter.nationality) {
      clauses.push((FilterField::Nationality, eq_text(v)));
    }
    if let Some(v) = non_empty(&filter.city) {
      clauses.push((FilterField::City, eq_text(v)));
    }
    if filter.salary_min.is_some() || filter.salary_max.is_some() {
      clauses.push((FilterField::Salary, Clause::Between {
        min: filter.salary_min,
        max: filter.salary_max,
      }));
    }
    if let Some(gender) = filter.gender {
      clauses.push((FilterField::Gender, eq_text(gender.as_str().to_owned())));
    }

    let text = non_empty(&filter.search);

    Self { owner, clauses, text }
  }

  pub fn owner(&self) -> Uuid {
    self.owner
  }

  pub fn clauses(&self) -> &[(FilterField, Clause)] {
    &self.clauses
  }

  /// The free-text component, if any. Always evaluated together with the
  /// clauses and the owner constraint, never instead of them.
  pub fn text(&self) -> Option<&str> {
    self.text.as_deref()
  }
}

fn eq_text(value: String) -> Clause {
  Clause::Eq(ScalarValue::Text(value))
}

fn non_empty(value: &Option<String>) -> Option<String> {
  value.as_ref().filter(|v| !v.is_empty()).cloned()
}
