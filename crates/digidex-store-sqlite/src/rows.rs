//! Row mappers and the relation loaders used by the single-item read.
//!
//! Column order in every `SELECT` must match the mapper it is paired with.

use digidex_core::digimon::{
  Description, Digimon, DigimonRelations, Digivolution, LookupItem, LookupKind, Skill,
};
use rusqlite::{Connection, Row};

use crate::query::join_table;

pub const DIGIMON_COLUMNS: &str = "d.id, d.name, d.xantibody, d.release_date";

pub fn digimon(row: &Row<'_>) -> rusqlite::Result<Digimon> {
  Ok(Digimon {
    id:           row.get(0)?,
    name:         row.get(1)?,
    xantibody:    row.get(2)?,
    release_date: row.get(3)?,
    relations:    None,
  })
}

pub fn lookup_item(row: &Row<'_>) -> rusqlite::Result<LookupItem> {
  Ok(LookupItem { id: row.get(0)?, name: row.get(1)? })
}

pub fn skill(row: &Row<'_>) -> rusqlite::Result<Skill> {
  Ok(Skill {
    id:          row.get(0)?,
    name:        row.get(1)?,
    description: row.get(2)?,
  })
}

fn description(row: &Row<'_>) -> rusqlite::Result<Description> {
  Ok(Description {
    id:          row.get(0)?,
    id_digimon:  row.get(1)?,
    origin:      row.get(2)?,
    language:    row.get(3)?,
    description: row.get(4)?,
  })
}

fn digivolution(row: &Row<'_>) -> rusqlite::Result<Digivolution> {
  Ok(Digivolution {
    id_digimon_prior:   row.get(0)?,
    id_digimon_next:    row.get(1)?,
    digimon_prior_name: row.get(2)?,
    digimon_next_name:  row.get(3)?,
    condition:          row.get(4)?,
  })
}

// ─── Relation loaders ────────────────────────────────────────────────────────

fn linked_lookups(
  conn: &Connection,
  kind: LookupKind,
  id_digimon: i64,
) -> rusqlite::Result<Vec<LookupItem>> {
  let (join, column) = join_table(kind);
  let sql = format!(
    "SELECT l.id, l.name
     FROM \"{kind}\" l
     JOIN {join} j ON j.{column} = l.id
     WHERE j.id_digimon = ?1
     ORDER BY l.id"
  );
  let mut stmt = conn.prepare(&sql)?;
  let items = stmt
    .query_map([id_digimon], lookup_item)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(items)
}

fn linked_skills(conn: &Connection, id_digimon: i64) -> rusqlite::Result<Vec<Skill>> {
  let mut stmt = conn.prepare(
    "SELECT s.id, s.name, s.description
     FROM skill s
     JOIN digimon_skill j ON j.id_skill = s.id
     WHERE j.id_digimon = ?1
     ORDER BY s.id",
  )?;
  let items = stmt
    .query_map([id_digimon], skill)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(items)
}

fn descriptions(conn: &Connection, id_digimon: i64) -> rusqlite::Result<Vec<Description>> {
  let mut stmt = conn.prepare(
    "SELECT id, id_digimon, origin, language, description
     FROM digimon_description
     WHERE id_digimon = ?1
     ORDER BY id",
  )?;
  let items = stmt
    .query_map([id_digimon], description)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(items)
}

/// Edges touching `id_digimon` on the given side (`id_digimon_prior` or
/// `id_digimon_next`), with both endpoint names resolved.
fn edges(
  conn: &Connection,
  side: &'static str,
  id_digimon: i64,
) -> rusqlite::Result<Vec<Digivolution>> {
  let sql = format!(
    "SELECT e.id_digimon_prior, e.id_digimon_next, p.name, n.name, e.condition
     FROM digivolution e
     JOIN digimon p ON p.id = e.id_digimon_prior
     JOIN digimon n ON n.id = e.id_digimon_next
     WHERE e.{side} = ?1
     ORDER BY e.id_digimon_prior, e.id_digimon_next"
  );
  let mut stmt = conn.prepare(&sql)?;
  let items = stmt
    .query_map([id_digimon], digivolution)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(items)
}

/// Load every collection attached to `id_digimon`.
pub fn relations(conn: &Connection, id_digimon: i64) -> rusqlite::Result<DigimonRelations> {
  Ok(DigimonRelations {
    levels:          linked_lookups(conn, LookupKind::Level, id_digimon)?,
    fields:          linked_lookups(conn, LookupKind::Field, id_digimon)?,
    attributes:      linked_lookups(conn, LookupKind::Attribute, id_digimon)?,
    types:           linked_lookups(conn, LookupKind::Type, id_digimon)?,
    skills:          linked_skills(conn, id_digimon)?,
    descriptions:    descriptions(conn, id_digimon)?,
    digivolved_from: edges(conn, "id_digimon_next", id_digimon)?,
    digivolve_to:    edges(conn, "id_digimon_prior", id_digimon)?,
  })
}
