//! Async HTTP client wrapping the ward JSON API.

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use std::time::Duration;
use ward_core::{
  patient::{NewPatient, Patient, PatientId, PatientPatch},
  store::PatientFilter,
};

/// Connection settings for the ward API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the ward JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// Pass a successful response through; turn an error response into the
  /// server's `{"error": "<detail>"}` message.
  async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
    if resp.status().is_success() {
      return Ok(resp);
    }
    let status = resp.status();
    let detail = resp
      .json::<serde_json::Value>()
      .await
      .ok()
      .and_then(|v| v["error"].as_str().map(str::to_owned));
    match detail {
      Some(msg) => Err(anyhow!(msg)),
      None => Err(anyhow!("server returned {status}")),
    }
  }

  /// `GET /patients/` with the filter as query params.
  pub async fn list_patients(&self, filter: &PatientFilter) -> Result<Vec<Patient>> {
    let resp = self
      .client
      .get(self.url("/patients/"))
      .query(filter)
      .send()
      .await
      .context("GET /patients/ failed")?;
    Self::check(resp)
      .await?
      .json()
      .await
      .context("deserialising patients")
  }

  /// `POST /patients/`
  pub async fn create_patient(&self, new: &NewPatient) -> Result<Patient> {
    let resp = self
      .client
      .post(self.url("/patients/"))
      .json(new)
      .send()
      .await
      .context("POST /patients/ failed")?;
    Self::check(resp)
      .await?
      .json()
      .await
      .context("deserialising created patient")
  }

  /// `PUT /patients/{id}`
  pub async fn update_patient(
    &self,
    id: PatientId,
    patch: &PatientPatch,
  ) -> Result<Patient> {
    let resp = self
      .client
      .put(self.url(&format!("/patients/{id}")))
      .json(patch)
      .send()
      .await
      .context("PUT /patients/{id} failed")?;
    Self::check(resp)
      .await?
      .json()
      .await
      .context("deserialising updated patient")
  }

  /// `DELETE /patients/{id}`
  pub async fn delete_patient(&self, id: PatientId) -> Result<()> {
    let resp = self
      .client
      .delete(self.url(&format!("/patients/{id}")))
      .send()
      .await
      .context("DELETE /patients/{id} failed")?;
    Self::check(resp).await?;
    Ok(())
  }
}
