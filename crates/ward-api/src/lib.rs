//! JSON REST API for Ward.
//!
//! Exposes an axum [`Router`] backed by any [`ward_core::store::PatientStore`].
//! Transport concerns (bind address, request tracing) are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = ward_api::api_router(store.clone());
//! ```

pub mod error;
pub mod patients;

use std::sync::Arc;

use axum::{Router, routing::get};
use ward_core::store::PatientStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: PatientStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route(
      "/patients/",
      get(patients::list::<S>).post(patients::create::<S>),
    )
    .route(
      "/patients/{id}",
      get(patients::get_one::<S>)
        .put(patients::update_one::<S>)
        .delete(patients::delete_one::<S>),
    )
    .with_state(store)
}

#[cfg(test)]
mod tests;
