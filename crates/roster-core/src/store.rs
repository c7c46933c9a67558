//! The `RosterStore` trait and supporting types.
//!
//! The trait is implemented by storage backends (e.g.
//! `roster-store-sqlite`). The HTTP layer depends on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  candidate::{Candidate, CandidateDraft, CandidateUpdate},
  identity::{Identity, NewIdentity},
  query::CandidateQuery,
};

/// Result of a successful update: the record as stored after the call, and
/// whether anything actually changed. A matched-but-unchanged update is a
/// success; `modified` keeps the distinction observable.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
  pub candidate: Candidate,
  pub modified:  bool,
}

/// Abstraction over a roster storage backend.
///
/// Every candidate operation below takes the owning identity alongside the
/// record id; the joint predicate is what keeps one caller's records
/// invisible to another. Absence and non-ownership are deliberately
/// indistinguishable: both come back as `None` (or `false` for deletes).
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RosterStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Identities ────────────────────────────────────────────────────────

  /// Persist a new identity. The store assigns `identity_id` and
  /// `created_at`, and defaults `uuid` when the caller omitted it.
  fn create_identity(
    &self,
    input: NewIdentity,
  ) -> impl Future<Output = Result<Identity, Self::Error>> + Send + '_;

  /// Retrieve an identity by id. Returns `None` if not found.
  fn get_identity(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Identity>, Self::Error>> + Send + '_;

  // ── Candidates ────────────────────────────────────────────────────────

  /// Persist a new candidate owned by `owner`. The store assigns
  /// `candidate_id`, stamps `owner_id`, and defaults `uuid` when absent.
  fn create_candidate(
    &self,
    owner: Uuid,
    draft: CandidateDraft,
  ) -> impl Future<Output = Result<Candidate, Self::Error>> + Send + '_;

  /// Retrieve the candidate with `id` owned by `owner`.
  fn get_candidate(
    &self,
    id: Uuid,
    owner: Uuid,
  ) -> impl Future<Output = Result<Option<Candidate>, Self::Error>> + Send + '_;

  /// Apply the present fields of `update` to the candidate with `id` owned
  /// by `owner`. Returns `None` when nothing matches the joint predicate.
  fn update_candidate(
    &self,
    id: Uuid,
    owner: Uuid,
    update: CandidateUpdate,
  ) -> impl Future<Output = Result<Option<UpdateOutcome>, Self::Error>> + Send + '_;

  /// Delete the candidate with `id` owned by `owner`. Returns `false` when
  /// nothing matched; a repeated delete therefore reports not-found.
  fn delete_candidate(
    &self,
    id: Uuid,
    owner: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Evaluate a compiled query. Every returned record satisfies the
  /// query's owner constraint.
  fn list_candidates<'a>(
    &'a self,
    query: &'a CandidateQuery,
  ) -> impl Future<Output = Result<Vec<Candidate>, Self::Error>> + Send + 'a;

  /// Every candidate in the store, across all owners. Feeds the report
  /// exporter only; nothing else bypasses ownership scoping.
  fn fetch_all_candidates(
    &self,
  ) -> impl Future<Output = Result<Vec<Candidate>, Self::Error>> + Send + '_;
}
