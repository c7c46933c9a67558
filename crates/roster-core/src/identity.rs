//! Identity — the registered caller that owns candidate records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::email::Email;

/// A registered identity. Created once via registration, read by id,
/// never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
  pub identity_id: Uuid,
  pub first_name:  String,
  pub last_name:   String,
  pub email:       Email,
  /// Caller-supplied external token string; defaulted to a fresh UUID by
  /// the store when the registration body omitted it. Carried, not checked
  /// for uniqueness.
  pub uuid:        String,
  /// Server-assigned registration timestamp; never changes.
  pub created_at:  DateTime<Utc>,
}

/// Input to [`crate::store::RosterStore::create_identity`].
/// `identity_id` and `created_at` are always set by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewIdentity {
  pub first_name: String,
  pub last_name:  String,
  pub email:      Email,
  pub uuid:       Option<String>,
}
