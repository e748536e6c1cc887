//! Read-only JSON REST API for the Digidex catalog.
//!
//! Exposes an axum [`Router`] backed by any [`CatalogStore`]. Every listing
//! returns a [`view::Page`] envelope; image links are signed through an
//! [`ImageSigner`](digidex_core::image::ImageSigner).

pub mod config;
pub mod digimon;
pub mod error;
pub mod image;
pub mod lookups;
mod params;
pub mod view;

pub use config::ServerConfig;
pub use error::ApiError;

use std::sync::Arc;

use axum::{Router, http::Method, routing::get};
use digidex_core::store::CatalogStore;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

use image::ImageUrls;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: CatalogStore> {
  pub store:         Arc<S>,
  pub images:        ImageUrls,
  /// Requests with a larger `page_size` are rejected. `None` means no cap.
  pub max_page_size: Option<u32>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
///
/// Cross-origin `GET` requests are allowed from anywhere.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: CatalogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET])
    .allow_headers(Any);

  Router::new()
    // Digimon
    .route("/digimon", get(digimon::list::<S>))
    .route("/digimon/{id_or_name}", get(digimon::get_one::<S>))
    // Reference tables
    .route("/level", get(lookups::levels::<S>))
    .route("/field", get(lookups::fields::<S>))
    .route("/type", get(lookups::types::<S>))
    .route("/attribute", get(lookups::attributes::<S>))
    .route("/skill", get(lookups::skills::<S>))
    .layer(TraceLayer::new_for_http())
    .layer(cors)
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
