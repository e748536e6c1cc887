//! Catalog entities: digimon, their classification lookups, and the
//! directed evolution graph between them.
//!
//! All entities are reference data loaded from outside the service. Nothing
//! in this crate mutates them.

use std::fmt;

use serde::Serialize;

// ─── Lookups ─────────────────────────────────────────────────────────────────

/// The four plain classification tables. Each holds `(id, name)` rows and is
/// linked to digimon through a join table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
  Level,
  Field,
  Type,
  Attribute,
}

impl LookupKind {
  /// Table and route name, e.g. `"level"`.
  pub fn as_str(self) -> &'static str {
    match self {
      LookupKind::Level => "level",
      LookupKind::Field => "field",
      LookupKind::Type => "type",
      LookupKind::Attribute => "attribute",
    }
  }
}

impl fmt::Display for LookupKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A row of one of the [`LookupKind`] tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupItem {
  pub id:   i64,
  pub name: String,
}

/// A named technique. Unlike the other lookups it carries a description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skill {
  pub id:          i64,
  pub name:        String,
  pub description: String,
}

/// Free-text description of a digimon, from a given origin and language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
  pub id:          i64,
  pub id_digimon:  i64,
  pub origin:      String,
  pub language:    String,
  pub description: String,
}

// ─── Evolution graph ─────────────────────────────────────────────────────────

/// A directed evolution edge `prior → next`.
///
/// Both endpoint names are resolved by the store so that either side of the
/// edge can be presented without a second lookup. Cycles and duplicate edges
/// are not prevented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digivolution {
  pub id_digimon_prior:   i64,
  pub id_digimon_next:    i64,
  pub digimon_prior_name: String,
  pub digimon_next_name:  String,
  pub condition:          String,
}

// ─── Digimon ─────────────────────────────────────────────────────────────────

/// Collections attached to a digimon. Only loaded for single-item reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigimonRelations {
  pub levels:          Vec<LookupItem>,
  pub fields:          Vec<LookupItem>,
  pub attributes:      Vec<LookupItem>,
  pub types:           Vec<LookupItem>,
  pub skills:          Vec<Skill>,
  pub descriptions:    Vec<Description>,
  /// Edges where this digimon is the `next` side.
  pub digivolved_from: Vec<Digivolution>,
  /// Edges where this digimon is the `prior` side.
  pub digivolve_to:    Vec<Digivolution>,
}

/// A catalog entry.
///
/// Listings return it with `relations: None`; the single-item read fills in
/// every collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Digimon {
  pub id:           i64,
  pub name:         String,
  pub xantibody:    bool,
  pub release_date: String,
  pub relations:    Option<DigimonRelations>,
}

/// How a single digimon is addressed: `/digimon/12` or `/digimon/Agumon`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigimonRef {
  Id(i64),
  Name(String),
}

impl DigimonRef {
  /// Anything that parses as an integer is an id; everything else a name.
  pub fn parse(raw: &str) -> Self {
    match raw.parse::<i64>() {
      Ok(id) => DigimonRef::Id(id),
      Err(_) => DigimonRef::Name(raw.to_owned()),
    }
  }
}

impl fmt::Display for DigimonRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DigimonRef::Id(id) => write!(f, "id {id}"),
      DigimonRef::Name(name) => write!(f, "name {name:?}"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn numeric_ref_is_an_id() {
    assert_eq!(DigimonRef::parse("42"), DigimonRef::Id(42));
    assert_eq!(DigimonRef::parse("-3"), DigimonRef::Id(-3));
  }

  #[test]
  fn non_numeric_ref_is_a_name() {
    assert_eq!(
      DigimonRef::parse("Agumon X"),
      DigimonRef::Name("Agumon X".into())
    );
    assert_eq!(DigimonRef::parse("12a"), DigimonRef::Name("12a".into()));
  }

  #[test]
  fn lookup_kind_names_match_tables() {
    assert_eq!(LookupKind::Type.to_string(), "type");
    assert_eq!(LookupKind::Attribute.as_str(), "attribute");
  }
}
