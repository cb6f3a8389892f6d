//! SQL schema for the Ward SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS patients (
    patient_id  INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    dob         TEXT NOT NULL,   -- ISO 8601 date, YYYY-MM-DD
    gender      TEXT NOT NULL,   -- 'Male' | 'Female' | 'Other'
    phone       TEXT NOT NULL,
    email       TEXT,
    status      TEXT NOT NULL DEFAULT 'Active'  -- 'Active' | 'Discharged'
);

CREATE INDEX IF NOT EXISTS patients_name_idx   ON patients(name);
CREATE INDEX IF NOT EXISTS patients_status_idx ON patients(status);

PRAGMA user_version = 1;
";
