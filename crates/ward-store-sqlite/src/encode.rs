//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are stored as ISO 8601 `YYYY-MM-DD` strings. Enums are stored with
//! their wire names (`'Male'`, `'Discharged'`, …) so the database stays
//! readable with a plain sqlite3 shell.

use chrono::NaiveDate;
use ward_core::patient::{Gender, Patient, PatientStatus};

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String {
  d.format(DATE_FORMAT).to_string()
}

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Gender ──────────────────────────────────────────────────────────────────

pub fn encode_gender(g: Gender) -> &'static str {
  match g {
    Gender::Male => "Male",
    Gender::Female => "Female",
    Gender::Other => "Other",
  }
}

pub fn decode_gender(s: &str) -> Result<Gender> {
  match s {
    "Male" => Ok(Gender::Male),
    "Female" => Ok(Gender::Female),
    "Other" => Ok(Gender::Other),
    other => Err(Error::UnknownEnumValue {
      column: "gender",
      value:  other.to_owned(),
    }),
  }
}

// ─── PatientStatus ───────────────────────────────────────────────────────────

pub fn encode_status(s: PatientStatus) -> &'static str {
  match s {
    PatientStatus::Active => "Active",
    PatientStatus::Discharged => "Discharged",
  }
}

pub fn decode_status(s: &str) -> Result<PatientStatus> {
  match s {
    "Active" => Ok(PatientStatus::Active),
    "Discharged" => Ok(PatientStatus::Discharged),
    other => Err(Error::UnknownEnumValue {
      column: "status",
      value:  other.to_owned(),
    }),
  }
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw values read directly from a `patients` row, decoded after the blocking
/// closure has returned.
pub struct RawPatient {
  pub patient_id: i64,
  pub name:       String,
  pub dob:        String,
  pub gender:     String,
  pub phone:      String,
  pub email:      Option<String>,
  pub status:     String,
}

impl RawPatient {
  pub fn into_patient(self) -> Result<Patient> {
    Ok(Patient {
      id:     self.patient_id,
      name:   self.name,
      dob:    decode_date(&self.dob)?,
      gender: decode_gender(&self.gender)?,
      phone:  self.phone,
      email:  self.email,
      status: decode_status(&self.status)?,
    })
  }
}
