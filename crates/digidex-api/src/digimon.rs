//! Handlers for `/digimon` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/digimon` | Paged; optional filters, see [`ListParams`] |
//! | `GET`  | `/digimon/{id_or_name}` | Integer id, otherwise exact name; 404 if not found |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use digidex_core::{
  digimon::DigimonRef,
  pagination::{PageRequest, build_pagination},
  store::{CatalogStore, DigimonQuery},
};
use serde::Deserialize;

use crate::{
  AppState,
  error::ApiError,
  params::{default_page, lenient_bool},
  view::{DigimonDetailOut, DigimonSummaryOut, Page, assemble_detail},
};

/// Prefix of the page links for this listing.
const LINK_PATH: &str = "/digimon?";

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  #[serde(default = "default_page")]
  pub page:            i64,
  #[serde(default = "default_page_size")]
  pub page_size:       i64,
  #[serde(default, deserialize_with = "lenient_bool")]
  pub xantibody:       Option<bool>,
  pub name_contains:   Option<String>,
  pub id_type:         Option<i64>,
  pub id_field:        Option<i64>,
  pub id_level:        Option<i64>,
  pub id_attribute:    Option<i64>,
  /// Only digimon that evolve from this id.
  pub digivolved_from: Option<i64>,
  /// Only digimon that evolve into this id.
  pub digivolve_to:    Option<i64>,
}

fn default_page_size() -> i64 { 10 }

impl ListParams {
  fn into_query(self, page: PageRequest) -> DigimonQuery {
    DigimonQuery {
      xantibody: self.xantibody,
      name_contains: self.name_contains,
      id_type: self.id_type,
      id_field: self.id_field,
      id_level: self.id_level,
      id_attribute: self.id_attribute,
      digivolved_from: self.digivolved_from,
      digivolve_to: self.digivolve_to,
      page,
    }
  }
}

/// `GET /digimon[?page=..][&page_size=..][&xantibody=..][&name_contains=..]...`
///
/// `total_page` is computed from the unfiltered digimon count.
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Page<DigimonSummaryOut>>, ApiError>
where
  S: CatalogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let page = PageRequest::new(params.page, params.page_size, state.max_page_size)?;
  let query = params.into_query(page);

  let digimon = state
    .store
    .list_digimon(&query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let total = state
    .store
    .count_digimon()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let pagination =
    build_pagination(LINK_PATH, total, page, digimon.len(), &query.link_params());
  let content = digimon
    .iter()
    .map(|d| DigimonSummaryOut::new(d, &state.images))
    .collect();

  Ok(Json(Page { content, pagination }))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /digimon/{id_or_name}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  Path(id_or_name): Path<String>,
) -> Result<Json<DigimonDetailOut>, ApiError>
where
  S: CatalogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let key = DigimonRef::parse(&id_or_name);
  let digimon = state
    .store
    .get_digimon(&key)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("digimon with {key} not found")))?;

  Ok(Json(assemble_detail(digimon, &state.images)))
}
