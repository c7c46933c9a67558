//! SQL schema for the roster SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS identities (
    identity_id TEXT PRIMARY KEY,
    first_name  TEXT NOT NULL,
    last_name   TEXT NOT NULL,
    email       TEXT NOT NULL,
    uuid        TEXT NOT NULL,    -- caller-supplied token string
    created_at  TEXT NOT NULL     -- ISO 8601 UTC; server-assigned
);

CREATE TABLE IF NOT EXISTS candidates (
    candidate_id        TEXT PRIMARY KEY,
    owner_id            TEXT NOT NULL REFERENCES identities(identity_id),
    first_name          TEXT NOT NULL,
    last_name           TEXT NOT NULL,
    email               TEXT NOT NULL,
    uuid                TEXT NOT NULL,
    career_level        TEXT NOT NULL,
    job_major           TEXT NOT NULL,
    years_of_experience INTEGER NOT NULL,
    degree_type         TEXT NOT NULL,
    skills              TEXT NOT NULL DEFAULT '[]',  -- JSON array
    nationality         TEXT NOT NULL,
    city                TEXT NOT NULL,
    salary              REAL NOT NULL,
    gender              TEXT NOT NULL   -- 'Male' | 'Female' | 'NotSpecified'
);

-- Every candidate read/update/delete predicate carries owner_id.
CREATE INDEX IF NOT EXISTS candidates_owner_idx ON candidates(owner_id);

-- Combined text index over the searchable candidate fields (names, email,
-- career level, job major, degree type, skills, nationality, city).
-- Rewritten by the store on every candidate write.
CREATE VIRTUAL TABLE IF NOT EXISTS candidates_fts USING fts5(
    candidate_id UNINDEXED,
    body
);

PRAGMA user_version = 1;
";
