//! Handlers for `/patients` endpoints.
//!
//! | Method   | Path             | Notes |
//! |----------|------------------|-------|
//! | `GET`    | `/patients/`     | Optional `?status=`, `?gender=`, `?name=` |
//! | `POST`   | `/patients/`     | Body: full record minus id; returns it with id |
//! | `GET`    | `/patients/{id}` | 404 if not found |
//! | `PUT`    | `/patients/{id}` | Body: partial fields; returns the full record |
//! | `DELETE` | `/patients/{id}` | Returns `{"ok": true}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use serde_json::{Value, json};
use ward_core::{
  patient::{NewPatient, Patient, PatientId, PatientPatch},
  store::{PatientFilter, PatientStore},
};

use crate::error::ApiError;

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /patients/[?status=...][&gender=...][&name=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(filter): Query<PatientFilter>,
) -> Result<Json<Vec<Patient>>, ApiError>
where
  S: PatientStore,
{
  let patients = store.list(filter).await?;
  Ok(Json(patients))
}

// ─── Create ──────────────────────────────────────────────────────────────────

/// `POST /patients/` — body is a full record minus the id; the stored record
/// (with its assigned id) comes back.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewPatient>,
) -> Result<Json<Patient>, ApiError>
where
  S: PatientStore,
{
  let patient = store.create(body).await?;
  Ok(Json(patient))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /patients/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<PatientId>,
) -> Result<Json<Patient>, ApiError>
where
  S: PatientStore,
{
  let patient = store
    .get(id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("patient not found: {id}")))?;
  Ok(Json(patient))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PUT /patients/{id}` — body is a [`PatientPatch`]; only supplied fields
/// change. Returns the full updated record.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<PatientId>,
  Json(patch): Json<PatientPatch>,
) -> Result<Json<Patient>, ApiError>
where
  S: PatientStore,
{
  let patient = store.update(id, patch).await?;
  Ok(Json(patient))
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /patients/{id}` — hard delete; acknowledges with `{"ok": true}`.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<PatientId>,
) -> Result<Json<Value>, ApiError>
where
  S: PatientStore,
{
  store.delete(id).await?;
  Ok(Json(json!({ "ok": true })))
}
