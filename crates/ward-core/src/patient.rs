//! Patient — the sole entity of the record store.
//!
//! A patient row is mutated only through [`PatientPatch`]: the store merges
//! the supplied fields over the current record, re-validates the merged value,
//! and writes it back. Records are created from [`NewPatient`] and destroyed
//! by hard delete; there is no soft-delete state.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// Store-assigned identifier; unique and immutable once set.
pub type PatientId = i64;

// ─── Field bounds ────────────────────────────────────────────────────────────

pub const NAME_MIN: usize = 2;
pub const NAME_MAX: usize = 100;
pub const PHONE_MIN: usize = 11;
pub const PHONE_MAX: usize = 15;

// ─── Enums ───────────────────────────────────────────────────────────────────

/// Serialised with the variant names verbatim (`"Male"`, `"Female"`,
/// `"Other"`) — this is the wire format the clients and the database share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
  Male,
  Female,
  Other,
}

/// A plain data field with no enforced transition rules; any value may change
/// to any other via a patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PatientStatus {
  #[default]
  Active,
  Discharged,
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A persisted patient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
  pub id:     PatientId,
  pub name:   String,
  pub dob:    NaiveDate,
  pub gender: Gender,
  pub phone:  String,
  pub email:  Option<String>,
  pub status: PatientStatus,
}

/// Input for registration: a full record minus the id, which the store
/// assigns. `status` defaults to [`PatientStatus::Active`] when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPatient {
  pub name:   String,
  pub dob:    NaiveDate,
  pub gender: Gender,
  pub phone:  String,
  #[serde(default)]
  pub email:  Option<String>,
  #[serde(default)]
  pub status: PatientStatus,
}

impl NewPatient {
  /// Check every field constraint. Called by stores before persisting.
  pub fn validate(&self) -> Result<()> {
    validate_fields(&self.name, &self.phone, self.email.as_deref())
  }

  /// Attach a store-assigned id, producing the record to persist.
  pub fn into_patient(self, id: PatientId) -> Patient {
    Patient {
      id,
      name: self.name,
      dob: self.dob,
      gender: self.gender,
      phone: self.phone,
      email: self.email,
      status: self.status,
    }
  }
}

// ─── Partial update ──────────────────────────────────────────────────────────

/// A partial update: only fields present in the JSON body change; absent
/// fields retain their prior value.
///
/// `email` is itself optional on the record, so the patch distinguishes an
/// absent key (keep the current address) from an explicit `null` (clear it)
/// with a double `Option`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:   Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub dob:    Option<NaiveDate>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub gender: Option<Gender>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phone:  Option<String>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "deserialize_some"
  )]
  pub email:  Option<Option<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status: Option<PatientStatus>,
}

/// Wrap any present value (including `null`) in `Some`, so a missing key
/// deserialises to `None` and `"email": null` to `Some(None)`.
fn deserialize_some<'de, T, D>(de: D) -> Result<Option<T>, D::Error>
where
  T: Deserialize<'de>,
  D: Deserializer<'de>,
{
  T::deserialize(de).map(Some)
}

impl PatientPatch {
  /// Construct a new record equal to `current` except for the explicitly
  /// supplied fields. The merged record is validated as a whole, so a patch
  /// carrying an out-of-bounds field fails without a partial write.
  pub fn merged(&self, current: &Patient) -> Result<Patient> {
    let merged = Patient {
      id:     current.id,
      name:   self.name.clone().unwrap_or_else(|| current.name.clone()),
      dob:    self.dob.unwrap_or(current.dob),
      gender: self.gender.unwrap_or(current.gender),
      phone:  self.phone.clone().unwrap_or_else(|| current.phone.clone()),
      email:  match &self.email {
        Some(e) => e.clone(),
        None => current.email.clone(),
      },
      status: self.status.unwrap_or(current.status),
    };
    validate_fields(&merged.name, &merged.phone, merged.email.as_deref())?;
    Ok(merged)
  }
}

// ─── Validation ──────────────────────────────────────────────────────────────

fn validate_fields(name: &str, phone: &str, email: Option<&str>) -> Result<()> {
  let name_len = name.chars().count();
  if !(NAME_MIN..=NAME_MAX).contains(&name_len) {
    return Err(Error::NameLength(name_len));
  }

  let phone_len = phone.chars().count();
  if !(PHONE_MIN..=PHONE_MAX).contains(&phone_len) {
    return Err(Error::PhoneLength(phone_len));
  }

  if let Some(addr) = email
    && !is_valid_email(addr)
  {
    return Err(Error::InvalidEmail(addr.to_owned()));
  }

  Ok(())
}

/// Structural email check: one `@`, non-empty local part, dotted domain with
/// non-empty labels, no whitespace. Deliverability is out of scope.
fn is_valid_email(addr: &str) -> bool {
  if addr.chars().any(char::is_whitespace) {
    return false;
  }
  let Some((local, domain)) = addr.split_once('@') else {
    return false;
  };
  if local.is_empty() || domain.contains('@') {
    return false;
  }
  domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn draft() -> NewPatient {
    NewPatient {
      name:   "Ali Hassan".into(),
      dob:    NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
      gender: Gender::Male,
      phone:  "923001234567".into(),
      email:  Some("ali@example.com".into()),
      status: PatientStatus::Active,
    }
  }

  fn patient() -> Patient {
    draft().into_patient(1)
  }

  // ── Field bounds ──────────────────────────────────────────────────────────

  #[test]
  fn name_length_bounds() {
    let mut d = draft();
    d.name = "A".into();
    assert!(matches!(d.validate(), Err(Error::NameLength(1))));

    d.name = "Al".into();
    assert!(d.validate().is_ok());

    d.name = "x".repeat(100);
    assert!(d.validate().is_ok());

    d.name = "x".repeat(101);
    assert!(matches!(d.validate(), Err(Error::NameLength(101))));
  }

  #[test]
  fn phone_length_bounds() {
    let mut d = draft();
    d.phone = "0".repeat(10);
    assert!(matches!(d.validate(), Err(Error::PhoneLength(10))));

    d.phone = "0".repeat(11);
    assert!(d.validate().is_ok());

    d.phone = "0".repeat(15);
    assert!(d.validate().is_ok());

    d.phone = "0".repeat(16);
    assert!(matches!(d.validate(), Err(Error::PhoneLength(16))));
  }

  #[test]
  fn email_shapes() {
    for good in ["a@b.co", "first.last@sub.example.org", "x+tag@example.com"] {
      assert!(is_valid_email(good), "should accept {good:?}");
    }
    for bad in ["", "plain", "@example.com", "a@b", "a b@example.com", "a@@b.co", "a@.com"] {
      assert!(!is_valid_email(bad), "should reject {bad:?}");
    }
  }

  #[test]
  fn missing_email_is_valid() {
    let mut d = draft();
    d.email = None;
    assert!(d.validate().is_ok());
  }

  // ── Patch merge ───────────────────────────────────────────────────────────

  #[test]
  fn patch_changes_only_supplied_fields() {
    let current = patient();
    let patch = PatientPatch {
      status: Some(PatientStatus::Discharged),
      ..Default::default()
    };

    let merged = patch.merged(&current).unwrap();
    assert_eq!(merged.status, PatientStatus::Discharged);
    assert_eq!(merged.name, current.name);
    assert_eq!(merged.phone, current.phone);
    assert_eq!(merged.dob, current.dob);
    assert_eq!(merged.email, current.email);
  }

  #[test]
  fn patch_with_invalid_field_fails() {
    let current = patient();
    let patch = PatientPatch {
      name: Some("A".into()),
      ..Default::default()
    };
    assert!(matches!(patch.merged(&current), Err(Error::NameLength(1))));
  }

  #[test]
  fn patch_clears_email_with_explicit_null() {
    let current = patient();
    let patch = PatientPatch {
      email: Some(None),
      ..Default::default()
    };
    assert_eq!(patch.merged(&current).unwrap().email, None);
  }

  // ── Patch JSON semantics ──────────────────────────────────────────────────

  #[test]
  fn absent_email_key_keeps_current_value() {
    let patch: PatientPatch =
      serde_json::from_str(r#"{ "phone": "923009999999" }"#).unwrap();
    assert!(patch.email.is_none());

    let merged = patch.merged(&patient()).unwrap();
    assert_eq!(merged.phone, "923009999999");
    assert_eq!(merged.email.as_deref(), Some("ali@example.com"));
  }

  #[test]
  fn null_email_key_clears_value() {
    let patch: PatientPatch = serde_json::from_str(r#"{ "email": null }"#).unwrap();
    assert_eq!(patch.email, Some(None));
  }

  #[test]
  fn enums_use_variant_names_on_the_wire() {
    assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"Female\"");
    assert_eq!(
      serde_json::to_string(&PatientStatus::Discharged).unwrap(),
      "\"Discharged\""
    );
  }
}
