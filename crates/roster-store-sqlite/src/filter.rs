//! Compilation of [`CandidateQuery`] into SQL.
//!
//! The compiler emits a `WHERE` body plus a positional parameter vector.
//! Every caller-supplied value travels as a bound parameter, never as SQL
//! text; the owner constraint is emitted first, unconditionally.

use roster_core::query::{CandidateQuery, Clause, FilterField, ScalarValue};
use rusqlite::types::Value;

use crate::encode::encode_uuid;

fn column(field: FilterField) -> &'static str {
  match field {
    FilterField::FirstName => "first_name",
    FilterField::LastName => "last_name",
    FilterField::Email => "email",
    FilterField::CareerLevel => "career_level",
    FilterField::JobMajor => "job_major",
    FilterField::YearsOfExperience => "years_of_experience",
    FilterField::DegreeType => "degree_type",
    FilterField::Skills => "skills",
    FilterField::Nationality => "nationality",
    FilterField::City => "city",
    FilterField::Salary => "salary",
    FilterField::Gender => "gender",
  }
}

fn scalar_param(value: &ScalarValue) -> Value {
  match value {
    ScalarValue::Text(v) => Value::Text(v.clone()),
    ScalarValue::Int(v) => Value::Integer(*v),
    ScalarValue::Real(v) => Value::Real(*v),
  }
}

/// Compile `query` into a `WHERE` body (without the keyword) and its
/// positional parameters, in binding order.
pub fn compile_where(query: &CandidateQuery) -> (String, Vec<Value>) {
  let mut conds: Vec<String> = vec!["owner_id = ?".into()];
  let mut params: Vec<Value> = vec![Value::Text(encode_uuid(query.owner()))];

  for (field, clause) in query.clauses() {
    match clause {
      Clause::Eq(value) => {
        conds.push(format!("{} = ?", column(*field)));
        params.push(scalar_param(value));
      }
      Clause::AnyOf(values) => {
        let placeholders = vec!["?"; values.len()].join(", ");
        conds.push(format!(
          "EXISTS (SELECT 1 FROM json_each({}) \
           WHERE json_each.value IN ({placeholders}))",
          column(*field)
        ));
        params.extend(values.iter().map(|v| Value::Text(v.clone())));
      }
      Clause::Between { min, max } => {
        let col = column(*field);
        if let Some(min) = min {
          conds.push(format!("{col} >= ?"));
          params.push(Value::Real(*min));
        }
        if let Some(max) = max {
          conds.push(format!("{col} <= ?"));
          params.push(Value::Real(*max));
        }
      }
    }
  }

  if let Some(text) = query.text() {
    match fts_match_expr(text) {
      Some(expr) => {
        conds.push(
          "candidate_id IN (SELECT candidate_id FROM candidates_fts \
           WHERE candidates_fts MATCH ?)"
            .into(),
        );
        params.push(Value::Text(expr));
      }
      // A token-free search matches nothing rather than erroring.
      None => conds.push("1 = 0".into()),
    }
  }

  (conds.join(" AND "), params)
}

/// Build an FTS5 `MATCH` expression from free text: each whitespace-separated
/// token becomes a quoted string (embedded quotes doubled) and tokens join
/// with `OR`, so a record matching any token matches the expression.
///
/// Tokens without a single alphanumeric character are dropped up front; the
/// tokenizer would reduce them to an empty phrase. Returns `None` when
/// nothing survives.
pub fn fts_match_expr(text: &str) -> Option<String> {
  let tokens: Vec<String> = text
    .split_whitespace()
    .filter(|t| t.chars().any(char::is_alphanumeric))
    .map(|t| format!("\"{}\"", t.replace('"', "\"\"")))
    .collect();
  if tokens.is_empty() { None } else { Some(tokens.join(" OR ")) }
}
