//! Error taxonomy for `ward-core`.
//!
//! Two failure classes matter to callers: constraint violations on a supplied
//! field, and operations targeting an id that does not exist. Backend faults
//! are folded into [`Error::Storage`] at the trait seam so the HTTP layer can
//! classify every error without knowing the concrete store.

use thiserror::Error;

use crate::patient::{NAME_MAX, NAME_MIN, PHONE_MAX, PHONE_MIN, PatientId};

#[derive(Debug, Error)]
pub enum Error {
  #[error("patient not found: {0}")]
  PatientNotFound(PatientId),

  #[error("name must be {NAME_MIN}-{NAME_MAX} characters (got {0})")]
  NameLength(usize),

  #[error("phone must be {PHONE_MIN}-{PHONE_MAX} characters (got {0})")]
  PhoneLength(usize),

  #[error("invalid email address: {0:?}")]
  InvalidEmail(String),

  #[error("storage error: {0}")]
  Storage(String),
}

impl Error {
  /// `true` for field-constraint violations (the 400 class), `false` for
  /// not-found and backend faults.
  pub fn is_validation(&self) -> bool {
    matches!(
      self,
      Self::NameLength(_) | Self::PhoneLength(_) | Self::InvalidEmail(_)
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
