//! Error type for `ward-store-sqlite`.
//!
//! Internal helpers return this type for rich context; at the
//! [`PatientStore`](ward_core::store::PatientStore) seam everything converts
//! into the core taxonomy, with backend faults folded into
//! [`ward_core::Error::Storage`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] ward_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date parse error: {0}")]
  DateParse(String),

  #[error("unknown {column} value in row: {value:?}")]
  UnknownEnumValue { column: &'static str, value: String },
}

impl From<Error> for ward_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::Core(core) => core,
      other => ward_core::Error::Storage(other.to_string()),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
