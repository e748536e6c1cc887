//! Output records and their assembly from catalog entities.

use digidex_core::{
  digimon::{Description, Digimon, Digivolution, LookupItem, Skill},
  pagination::Pagination,
};
use serde::Serialize;

use crate::image::ImageUrls;

/// The envelope returned by every listing endpoint.
#[derive(Debug, Serialize)]
pub struct Page<T> {
  pub content:    Vec<T>,
  pub pagination: Pagination,
}

/// A digimon as it appears in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigimonSummaryOut {
  pub id:           i64,
  pub name:         String,
  pub xantibody:    bool,
  pub release_date: String,
  /// Relative link to the detail view, `digimon/{id}`.
  pub href:         String,
  /// Signed thumbnail URL, empty if signing failed.
  pub image_href:   String,
}

impl DigimonSummaryOut {
  pub fn new(d: &Digimon, images: &ImageUrls) -> Self {
    Self {
      id:           d.id,
      name:         d.name.clone(),
      xantibody:    d.xantibody,
      release_date: d.release_date.clone(),
      href:         href(d.id),
      image_href:   images.build(&d.name, true),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptionOut {
  pub origin:      String,
  pub language:    String,
  pub description: String,
}

impl From<Description> for DescriptionOut {
  fn from(d: Description) -> Self {
    Self { origin: d.origin, language: d.language, description: d.description }
  }
}

/// One side of an evolution edge: the other digimon's name and the condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvolutionOut {
  pub name:      String,
  pub condition: String,
}

/// A digimon with every relation, as returned by `GET /digimon/{id_or_name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigimonDetailOut {
  pub id:              i64,
  pub name:            String,
  pub xantibody:       bool,
  pub release_date:    String,
  pub href:            String,
  /// Signed full-size image URL, empty if signing failed.
  pub image_href:      String,
  pub levels:          Vec<LookupItem>,
  pub fields:          Vec<LookupItem>,
  pub attributes:      Vec<LookupItem>,
  pub descriptions:    Vec<DescriptionOut>,
  pub types:           Vec<LookupItem>,
  pub skills:          Vec<Skill>,
  pub digivolved_from: Vec<EvolutionOut>,
  pub digivolve_to:    Vec<EvolutionOut>,
}

fn href(id: i64) -> String { format!("digimon/{id}") }

/// Build the detail record. Incoming edges expose the prior digimon's name,
/// outgoing edges the next digimon's name. Missing relations render as empty
/// lists.
pub fn assemble_detail(digimon: Digimon, images: &ImageUrls) -> DigimonDetailOut {
  let image_href = images.build(&digimon.name, false);
  let rel = digimon.relations.unwrap_or_default();

  let from = |e: Digivolution| EvolutionOut {
    name:      e.digimon_prior_name,
    condition: e.condition,
  };
  let to = |e: Digivolution| EvolutionOut {
    name:      e.digimon_next_name,
    condition: e.condition,
  };

  DigimonDetailOut {
    id: digimon.id,
    href: href(digimon.id),
    name: digimon.name,
    xantibody: digimon.xantibody,
    release_date: digimon.release_date,
    image_href,
    levels: rel.levels,
    fields: rel.fields,
    attributes: rel.attributes,
    descriptions: rel.descriptions.into_iter().map(DescriptionOut::from).collect(),
    types: rel.types,
    skills: rel.skills,
    digivolved_from: rel.digivolved_from.into_iter().map(from).collect(),
    digivolve_to: rel.digivolve_to.into_iter().map(to).collect(),
  }
}
