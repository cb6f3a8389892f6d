//! [`SqliteStore`] — the SQLite implementation of [`PatientStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use ward_core::{
  patient::{NewPatient, Patient, PatientId, PatientPatch},
  store::{PatientFilter, PatientStore},
};

use crate::{
  Error, Result,
  encode::{RawPatient, encode_date, encode_gender, encode_status},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A patient record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Every trait
/// operation is a single scoped call against the connection's serialised
/// executor; no operation spans multiple units of work.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

const PATIENT_COLUMNS: &str =
  "patient_id, name, dob, gender, phone, email, status";

fn row_to_raw(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPatient> {
  Ok(RawPatient {
    patient_id: row.get(0)?,
    name:       row.get(1)?,
    dob:        row.get(2)?,
    gender:     row.get(3)?,
    phone:      row.get(4)?,
    email:      row.get(5)?,
    status:     row.get(6)?,
  })
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Internal operations ───────────────────────────────────────────────────

  async fn insert(&self, new: NewPatient) -> Result<Patient> {
    new.validate().map_err(Error::Core)?;

    let name       = new.name.clone();
    let dob_str    = encode_date(new.dob);
    let gender_str = encode_gender(new.gender).to_owned();
    let phone      = new.phone.clone();
    let email      = new.email.clone();
    let status_str = encode_status(new.status).to_owned();

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO patients (name, dob, gender, phone, email, status)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![name, dob_str, gender_str, phone, email, status_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(new.into_patient(id))
  }

  async fn select_one(&self, id: PatientId) -> Result<Option<Patient>> {
    let raw: Option<RawPatient> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE patient_id = ?1"),
              rusqlite::params![id],
              row_to_raw,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPatient::into_patient).transpose()
  }

  async fn select_filtered(&self, filter: PatientFilter) -> Result<Vec<Patient>> {
    // Build the WHERE clause dynamically; set filters are AND-combined.
    // All bound values are strings, appended in clause order.
    let mut conds: Vec<&'static str> = vec![];
    let mut values: Vec<String> = vec![];

    if let Some(status) = filter.status {
      conds.push("status = ?");
      values.push(encode_status(status).to_owned());
    }
    if let Some(gender) = filter.gender {
      conds.push("gender = ?");
      values.push(encode_gender(gender).to_owned());
    }
    if let Some(name) = &filter.name {
      // SQLite LIKE is case-insensitive for ASCII, matching the intended
      // `ilike`-style substring search.
      conds.push("name LIKE ?");
      values.push(format!("%{name}%"));
    }

    let where_clause = if conds.is_empty() {
      String::new()
    } else {
      format!("WHERE {}", conds.join(" AND "))
    };

    let raws: Vec<RawPatient> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {PATIENT_COLUMNS} FROM patients {where_clause} ORDER BY patient_id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(values), row_to_raw)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPatient::into_patient).collect()
  }

  /// Read-merge-write; the merged record is validated before any write, so a
  /// failed patch never touches the row.
  async fn apply_patch(&self, id: PatientId, patch: PatientPatch) -> Result<Patient> {
    let current = self
      .select_one(id)
      .await?
      .ok_or(ward_core::Error::PatientNotFound(id))
      .map_err(Error::Core)?;

    let merged = patch.merged(&current).map_err(Error::Core)?;

    let name       = merged.name.clone();
    let dob_str    = encode_date(merged.dob);
    let gender_str = encode_gender(merged.gender).to_owned();
    let phone      = merged.phone.clone();
    let email      = merged.email.clone();
    let status_str = encode_status(merged.status).to_owned();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE patients
           SET name = ?1, dob = ?2, gender = ?3, phone = ?4, email = ?5, status = ?6
           WHERE patient_id = ?7",
          rusqlite::params![name, dob_str, gender_str, phone, email, status_str, id],
        )?;
        Ok(())
      })
      .await?;

    Ok(merged)
  }

  async fn remove(&self, id: PatientId) -> Result<()> {
    let affected: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM patients WHERE patient_id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;

    if affected == 0 {
      return Err(Error::Core(ward_core::Error::PatientNotFound(id)));
    }
    Ok(())
  }
}

// ─── PatientStore impl ───────────────────────────────────────────────────────

impl PatientStore for SqliteStore {
  async fn create(&self, new: NewPatient) -> Result<Patient, ward_core::Error> {
    Ok(self.insert(new).await?)
  }

  async fn list(&self, filter: PatientFilter) -> Result<Vec<Patient>, ward_core::Error> {
    Ok(self.select_filtered(filter).await?)
  }

  async fn get(&self, id: PatientId) -> Result<Option<Patient>, ward_core::Error> {
    Ok(self.select_one(id).await?)
  }

  async fn update(
    &self,
    id: PatientId,
    patch: PatientPatch,
  ) -> Result<Patient, ward_core::Error> {
    Ok(self.apply_patch(id, patch).await?)
  }

  async fn delete(&self, id: PatientId) -> Result<(), ward_core::Error> {
    Ok(self.remove(id).await?)
  }
}
