//! Syntactic email validation at the type boundary.
//!
//! `Email` validates during deserialisation, so a malformed address in a
//! request body is rejected before any handler or store code runs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A syntactically plausible email address.
///
/// The check is deliberately shallow: one `@`, a non-empty local part, a
/// dotted domain, no whitespace or control characters, RFC 5321 length caps.
/// Deliverability is out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Email(String);

impl Email {
  pub fn parse(raw: impl Into<String>) -> Result<Self> {
    let raw = raw.into();
    if is_plausible(&raw) {
      Ok(Self(raw))
    } else {
      Err(Error::InvalidEmail(raw))
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl TryFrom<String> for Email {
  type Error = Error;

  fn try_from(raw: String) -> Result<Self> {
    Self::parse(raw)
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

fn is_plausible(raw: &str) -> bool {
  if raw.len() > 254 {
    return false;
  }
  if raw.chars().any(|c| c.is_whitespace() || c.is_control()) {
    return false;
  }
  let Some((local, domain)) = raw.split_once('@') else {
    return false;
  };
  if local.is_empty() || local.len() > 64 {
    return false;
  }
  if domain.is_empty() || domain.contains('@') {
    return false;
  }
  // The domain must carry at least one dot, with no empty labels.
  domain.contains('.')
    && !domain.starts_with('.')
    && !domain.ends_with('.')
    && !domain.contains("..")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_ordinary_addresses() {
    for ok in [
      "john.doe@example.com",
      "a@b.co",
      "first+tag@sub.domain.org",
      "UPPER@CASE.NET",
    ] {
      assert!(Email::parse(ok).is_ok(), "rejected {ok}");
    }
  }

  #[test]
  fn rejects_malformed_addresses() {
    for bad in [
      "",
      "not-an-email",
      "missing-domain@",
      "@missing-local.com",
      "no-dot@domain",
      "two@@ats.com",
      "spaced out@example.com",
      "trailing-dot@example.com.",
      "double..label@x..com",
    ] {
      assert!(Email::parse(bad).is_err(), "accepted {bad}");
    }
  }

  #[test]
  fn deserialisation_validates() {
    let ok: std::result::Result<Email, _> =
      serde_json::from_str("\"jane@example.com\"");
    assert!(ok.is_ok());

    let bad: std::result::Result<Email, _> =
      serde_json::from_str("\"jane-at-example\"");
    assert!(bad.is_err());
  }

  #[test]
  fn serialises_as_a_bare_string() {
    let email = Email::parse("jane@example.com").unwrap();
    assert_eq!(
      serde_json::to_string(&email).unwrap(),
      "\"jane@example.com\""
    );
  }
}
