//! The `CatalogStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `digidex-store-sqlite`).
//! The API layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  digimon::{Digimon, DigimonRef, LookupItem, LookupKind, Skill},
  pagination::{LinkParam, PageRequest},
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Parameters for [`CatalogStore::list_digimon`].
///
/// Every `Some` filter must hold for a row to be returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigimonQuery {
  pub xantibody:       Option<bool>,
  /// Substring of the name. An empty string applies no filter.
  pub name_contains:   Option<String>,
  pub id_type:         Option<i64>,
  pub id_field:        Option<i64>,
  pub id_level:        Option<i64>,
  pub id_attribute:    Option<i64>,
  /// Only digimon reachable from this id by one evolution edge.
  pub digivolved_from: Option<i64>,
  /// Only digimon with an evolution edge leading to this id.
  pub digivolve_to:    Option<i64>,
  pub page:            PageRequest,
}

impl DigimonQuery {
  /// The filters echoed into page links, in their canonical order.
  pub fn link_params(&self) -> Vec<LinkParam> {
    vec![
      LinkParam::flag("xantibody", self.xantibody),
      LinkParam::int("id_field", self.id_field),
      LinkParam::int("id_level", self.id_level),
      LinkParam::int("id_type", self.id_type),
      LinkParam::text("name_contains", self.name_contains.as_deref()),
      LinkParam::int("id_attribute", self.id_attribute),
      LinkParam::int("digivolved_from", self.digivolved_from),
      LinkParam::int("digivolve_to", self.digivolve_to),
    ]
  }
}

/// Parameters for [`CatalogStore::list_skills`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillQuery {
  pub name_contains:        Option<String>,
  pub description_contains: Option<String>,
  pub page:                 PageRequest,
}

impl SkillQuery {
  pub fn link_params(&self) -> Vec<LinkParam> {
    vec![
      LinkParam::text("name_contains", self.name_contains.as_deref()),
      LinkParam::text(
        "description_contains",
        self.description_contains.as_deref(),
      ),
    ]
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Read-only access to the digimon catalog.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Digimon ───────────────────────────────────────────────────────────

  /// One page of digimon matching every filter in `query`, ordered by id.
  /// Returned entries carry no relations.
  fn list_digimon<'a>(
    &'a self,
    query: &'a DigimonQuery,
  ) -> impl Future<Output = Result<Vec<Digimon>, Self::Error>> + Send + 'a;

  /// Total number of digimon, ignoring any filter.
  fn count_digimon(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// A single digimon with every relation loaded.
  ///
  /// Returns `None` when nothing matches, and also when a name matches more
  /// than one digimon.
  fn get_digimon<'a>(
    &'a self,
    key: &'a DigimonRef,
  ) -> impl Future<Output = Result<Option<Digimon>, Self::Error>> + Send + 'a;

  // ── Lookups ───────────────────────────────────────────────────────────

  /// One page of a lookup table plus the table's total row count.
  fn list_lookup(
    &self,
    kind: LookupKind,
    page: PageRequest,
  ) -> impl Future<Output = Result<(Vec<LookupItem>, u64), Self::Error>> + Send + '_;

  /// One page of skills plus the number of skills matching the filters.
  fn list_skills<'a>(
    &'a self,
    query: &'a SkillQuery,
  ) -> impl Future<Output = Result<(Vec<Skill>, u64), Self::Error>> + Send + 'a;
}
