//! HTTP contract tests — drive the router end-to-end against an in-memory
//! SQLite store with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt as _;
use ward_store_sqlite::SqliteStore;

use crate::api_router;

async fn router() -> Router {
  let store = SqliteStore::open_in_memory().await.unwrap();
  api_router(Arc::new(store))
}

fn valid_body() -> Value {
  json!({
    "name":   "Ali Hassan",
    "dob":    "1990-04-12",
    "gender": "Male",
    "phone":  "923001234567",
    "email":  "ali@example.com",
    "status": "Active"
  })
}

async fn request(
  app: Router,
  method: &str,
  uri: &str,
  body: Option<Value>,
) -> (StatusCode, Value) {
  let mut builder = Request::builder().method(method).uri(uri);
  let body = match body {
    Some(v) => {
      builder = builder.header(header::CONTENT_TYPE, "application/json");
      Body::from(v.to_string())
    }
    None => Body::empty(),
  };
  let resp = app.oneshot(builder.body(body).unwrap()).await.unwrap();

  let status = resp.status();
  let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
    .await
    .unwrap();
  let value = if bytes.is_empty() {
    Value::Null
  } else {
    serde_json::from_slice(&bytes).unwrap()
  };
  (status, value)
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_returns_record_with_id() {
  let app = router().await;
  let (status, body) = request(app, "POST", "/patients/", Some(valid_body())).await;

  assert_eq!(status, StatusCode::OK);
  assert!(body["id"].as_i64().unwrap() > 0);
  assert_eq!(body["name"], "Ali Hassan");
  assert_eq!(body["dob"], "1990-04-12");
  assert_eq!(body["gender"], "Male");
  assert_eq!(body["phone"], "923001234567");
  assert_eq!(body["email"], "ali@example.com");
  assert_eq!(body["status"], "Active");
}

#[tokio::test]
async fn create_defaults_status_to_active() {
  let app = router().await;
  let mut b = valid_body();
  b.as_object_mut().unwrap().remove("status");

  let (status, body) = request(app, "POST", "/patients/", Some(b)).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body["status"], "Active");
}

#[tokio::test]
async fn create_with_short_name_is_400() {
  let app = router().await;
  let mut b = valid_body();
  b["name"] = json!("A");

  let (status, body) = request(app, "POST", "/patients/", Some(b)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn create_with_short_phone_is_400() {
  let app = router().await;
  let mut b = valid_body();
  b["phone"] = json!("0123456789"); // 10 chars

  let (status, body) = request(app, "POST", "/patients/", Some(b)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
  assert!(body["error"].as_str().unwrap().contains("phone"));
}

#[tokio::test]
async fn create_with_bad_email_is_400() {
  let app = router().await;
  let mut b = valid_body();
  b["email"] = json!("not-an-email");

  let (status, _) = request(app, "POST", "/patients/", Some(b)).await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ─── Get ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_after_create_returns_identical_record() {
  let app = router().await;
  let (_, created) = request(app.clone(), "POST", "/patients/", Some(valid_body())).await;
  let id = created["id"].as_i64().unwrap();

  let (status, fetched) = request(app, "GET", &format!("/patients/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_unknown_id_is_404() {
  let app = router().await;
  let (status, body) = request(app, "GET", "/patients/777", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
  assert!(body["error"].as_str().unwrap().contains("not found"));
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_without_filters_returns_full_set() {
  let app = router().await;
  for name in ["Ali Hassan", "Sara Khan", "John Doe"] {
    let mut b = valid_body();
    b["name"] = json!(name);
    request(app.clone(), "POST", "/patients/", Some(b)).await;
  }

  let (status, body) = request(app, "GET", "/patients/", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn list_on_empty_store_is_empty_array() {
  let app = router().await;
  let (status, body) = request(app, "GET", "/patients/", None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!([]));
}

#[tokio::test]
async fn name_filter_matches_any_case() {
  let app = router().await;
  for name in ["Ali Hassan", "ali raza", "ALINA Khan", "Sara Khan"] {
    let mut b = valid_body();
    b["name"] = json!(name);
    request(app.clone(), "POST", "/patients/", Some(b)).await;
  }

  let (status, body) = request(app, "GET", "/patients/?name=ali", None).await;
  assert_eq!(status, StatusCode::OK);
  let names: Vec<&str> = body
    .as_array()
    .unwrap()
    .iter()
    .map(|p| p["name"].as_str().unwrap())
    .collect();
  assert_eq!(names, ["Ali Hassan", "ali raza", "ALINA Khan"]);
}

#[tokio::test]
async fn status_and_gender_filters_combine() {
  let app = router().await;

  let mut b = valid_body();
  b["name"] = json!("Sara Khan");
  b["gender"] = json!("Female");
  request(app.clone(), "POST", "/patients/", Some(b)).await;

  let mut b = valid_body();
  b["name"] = json!("Nadia Iqbal");
  b["gender"] = json!("Female");
  b["status"] = json!("Discharged");
  request(app.clone(), "POST", "/patients/", Some(b)).await;

  request(app.clone(), "POST", "/patients/", Some(valid_body())).await;

  let (status, body) =
    request(app, "GET", "/patients/?status=Active&gender=Female", None).await;
  assert_eq!(status, StatusCode::OK);
  let hits = body.as_array().unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0]["name"], "Sara Khan");
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn put_changes_only_supplied_fields() {
  let app = router().await;
  let (_, created) = request(app.clone(), "POST", "/patients/", Some(valid_body())).await;
  let id = created["id"].as_i64().unwrap();

  let (status, updated) = request(
    app.clone(),
    "PUT",
    &format!("/patients/{id}"),
    Some(json!({ "status": "Discharged" })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["status"], "Discharged");
  assert_eq!(updated["name"], created["name"]);
  assert_eq!(updated["phone"], created["phone"]);
  assert_eq!(updated["email"], created["email"]);

  // Persisted too, not just echoed.
  let (_, fetched) = request(app, "GET", &format!("/patients/{id}"), None).await;
  assert_eq!(fetched, updated);
}

#[tokio::test]
async fn put_unknown_id_is_404() {
  let app = router().await;
  let (status, _) = request(
    app,
    "PUT",
    "/patients/777",
    Some(json!({ "status": "Discharged" })),
  )
  .await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_with_invalid_field_is_400() {
  let app = router().await;
  let (_, created) = request(app.clone(), "POST", "/patients/", Some(valid_body())).await;
  let id = created["id"].as_i64().unwrap();

  let (status, _) = request(
    app,
    "PUT",
    &format!("/patients/{id}"),
    Some(json!({ "phone": "123" })),
  )
  .await;
  assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn put_null_email_clears_it() {
  let app = router().await;
  let (_, created) = request(app.clone(), "POST", "/patients/", Some(valid_body())).await;
  let id = created["id"].as_i64().unwrap();

  let (status, updated) = request(
    app,
    "PUT",
    &format!("/patients/{id}"),
    Some(json!({ "email": null })),
  )
  .await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(updated["email"], Value::Null);
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_acknowledges_then_get_is_404() {
  let app = router().await;
  let (_, created) = request(app.clone(), "POST", "/patients/", Some(valid_body())).await;
  let id = created["id"].as_i64().unwrap();

  let (status, body) = request(app.clone(), "DELETE", &format!("/patients/{id}"), None).await;
  assert_eq!(status, StatusCode::OK);
  assert_eq!(body, json!({ "ok": true }));

  let (status, _) = request(app, "GET", &format!("/patients/{id}"), None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_id_is_404() {
  let app = router().await;
  let (status, _) = request(app, "DELETE", "/patients/777", None).await;
  assert_eq!(status, StatusCode::NOT_FOUND);
}
