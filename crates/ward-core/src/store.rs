//! The `PatientStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `ward-store-sqlite`).
//! Higher layers (`ward-api`, `ward-cli`) depend on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{
  Error,
  patient::{Gender, NewPatient, Patient, PatientId, PatientPatch, PatientStatus},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`PatientStore::list`]. Each field is independently
/// optional; set fields are combined with AND.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientFilter {
  /// Restrict to records with this status.
  pub status: Option<PatientStatus>,
  /// Restrict to records with this gender.
  pub gender: Option<Gender>,
  /// Case-insensitive substring match on the name.
  pub name:   Option<String>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a patient record store backend.
///
/// Every method performs exactly one logical operation against the store.
/// The error type is fixed to the core taxonomy so callers can classify
/// failures (validation vs. not-found vs. backend fault) without knowing the
/// concrete backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait PatientStore: Send + Sync {
  /// Validate `new`, assign a fresh unique id, persist, and return the stored
  /// record.
  fn create(
    &self,
    new: NewPatient,
  ) -> impl Future<Output = Result<Patient, Error>> + Send + '_;

  /// Return all records matching `filter`. An empty result is valid, not an
  /// error. Order is unspecified; the SQLite backend returns insertion order.
  fn list(
    &self,
    filter: PatientFilter,
  ) -> impl Future<Output = Result<Vec<Patient>, Error>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get(
    &self,
    id: PatientId,
  ) -> impl Future<Output = Result<Option<Patient>, Error>> + Send + '_;

  /// Merge `patch` over the current record, validate the merged record, and
  /// persist it. Returns the full updated record.
  ///
  /// Fails with [`Error::PatientNotFound`] for an unknown id and with a
  /// validation error if a supplied field violates constraints (in which case
  /// the stored record is left unchanged).
  fn update(
    &self,
    id: PatientId,
    patch: PatientPatch,
  ) -> impl Future<Output = Result<Patient, Error>> + Send + '_;

  /// Remove the record permanently. Fails with [`Error::PatientNotFound`] for
  /// an unknown id.
  fn delete(
    &self,
    id: PatientId,
  ) -> impl Future<Output = Result<(), Error>> + Send + '_;
}
