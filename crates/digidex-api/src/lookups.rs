//! Handlers for the reference tables.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/level`, `/field`, `/type`, `/attribute` | Paged, default `page_size=5` |
//! | `GET`  | `/skill` | Paged, default `page_size=10`; `name_contains`, `description_contains` |

use axum::{
  Json,
  extract::{Query, State},
};
use digidex_core::{
  digimon::{LookupItem, LookupKind, Skill},
  pagination::{PageRequest, build_pagination},
  store::{CatalogStore, SkillQuery},
};
use serde::Deserialize;

use crate::{AppState, error::ApiError, params::default_page, view::Page};

// ─── Lookup tables ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LookupParams {
  #[serde(default = "default_page")]
  pub page:      i64,
  #[serde(default = "default_lookup_page_size")]
  pub page_size: i64,
}

fn default_lookup_page_size() -> i64 { 5 }

async fn list_lookup<S>(
  kind: LookupKind,
  state: AppState<S>,
  params: LookupParams,
) -> Result<Json<Page<LookupItem>>, ApiError>
where
  S: CatalogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let page = PageRequest::new(params.page, params.page_size, state.max_page_size)?;
  let (content, total) = state
    .store
    .list_lookup(kind, page)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let path = format!("/{kind}?");
  let pagination = build_pagination(&path, total, page, content.len(), &[]);
  Ok(Json(Page { content, pagination }))
}

/// `GET /level[?page=..][&page_size=..]`
pub async fn levels<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<LookupParams>,
) -> Result<Json<Page<LookupItem>>, ApiError>
where
  S: CatalogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  list_lookup(LookupKind::Level, state, params).await
}

/// `GET /field[?page=..][&page_size=..]`
pub async fn fields<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<LookupParams>,
) -> Result<Json<Page<LookupItem>>, ApiError>
where
  S: CatalogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  list_lookup(LookupKind::Field, state, params).await
}

/// `GET /type[?page=..][&page_size=..]`
pub async fn types<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<LookupParams>,
) -> Result<Json<Page<LookupItem>>, ApiError>
where
  S: CatalogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  list_lookup(LookupKind::Type, state, params).await
}

/// `GET /attribute[?page=..][&page_size=..]`
pub async fn attributes<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<LookupParams>,
) -> Result<Json<Page<LookupItem>>, ApiError>
where
  S: CatalogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  list_lookup(LookupKind::Attribute, state, params).await
}

// ─── Skills ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SkillParams {
  #[serde(default = "default_page")]
  pub page:                 i64,
  #[serde(default = "default_skill_page_size")]
  pub page_size:            i64,
  pub name_contains:        Option<String>,
  pub description_contains: Option<String>,
}

fn default_skill_page_size() -> i64 { 10 }

/// `GET /skill[?page=..][&page_size=..][&name_contains=..][&description_contains=..]`
///
/// Unlike `/digimon`, `total_page` reflects the filtered count.
pub async fn skills<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<SkillParams>,
) -> Result<Json<Page<Skill>>, ApiError>
where
  S: CatalogStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let page = PageRequest::new(params.page, params.page_size, state.max_page_size)?;
  let query = SkillQuery {
    name_contains: params.name_contains,
    description_contains: params.description_contains,
    page,
  };

  let (content, total) = state
    .store
    .list_skills(&query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let pagination =
    build_pagination("/skill?", total, page, content.len(), &query.link_params());
  Ok(Json(Page { content, pagination }))
}
