//! Dynamic `WHERE` clause construction for the listing queries.
//!
//! Conditions use positional `?` placeholders; the accompanying parameter
//! vector is in placeholder order.

use digidex_core::{
  digimon::LookupKind,
  store::{DigimonQuery, SkillQuery},
};
use rusqlite::types::Value;

/// A `WHERE ...` fragment (possibly empty) and its bound values.
#[derive(Debug, Default)]
pub struct Filter {
  conds:  Vec<String>,
  params: Vec<Value>,
}

impl Filter {
  fn push(&mut self, cond: impl Into<String>, value: impl Into<Value>) {
    self.conds.push(cond.into());
    self.params.push(value.into());
  }

  /// `WHERE a AND b ...`, or an empty string when there are no conditions.
  pub fn where_clause(&self) -> String {
    if self.conds.is_empty() {
      String::new()
    } else {
      format!("WHERE {}", self.conds.join(" AND "))
    }
  }

  pub fn params(&self) -> &[Value] { &self.params }

  /// Parameters followed by `LIMIT ? OFFSET ?` values.
  pub fn params_with_page(&self, limit: u32, offset: u64) -> Vec<Value> {
    let mut params = self.params.clone();
    params.push(Value::Integer(i64::from(limit)));
    params.push(Value::Integer(i64::try_from(offset).unwrap_or(i64::MAX)));
    params
  }
}

/// Escape `LIKE` wildcards so user input matches literally under
/// `ESCAPE '\'`.
pub fn escape_like(input: &str) -> String {
  let mut out = String::with_capacity(input.len());
  for c in input.chars() {
    if matches!(c, '\\' | '%' | '_') {
      out.push('\\');
    }
    out.push(c);
  }
  out
}

fn contains_pattern(input: &str) -> String { format!("%{}%", escape_like(input)) }

/// Join table and foreign-key column linking digimon to a lookup table.
pub fn join_table(kind: LookupKind) -> (String, String) {
  (format!("digimon_{kind}"), format!("id_{kind}"))
}

fn has_lookup(kind: LookupKind) -> String {
  let (table, column) = join_table(kind);
  format!("EXISTS (SELECT 1 FROM {table} j WHERE j.id_digimon = d.id AND j.{column} = ?)")
}

/// Filters for `list_digimon`, against `digimon d`.
pub fn digimon_filter(query: &DigimonQuery) -> Filter {
  let mut f = Filter::default();

  if let Some(x) = query.xantibody {
    f.push("d.xantibody = ?", x);
  }
  for (kind, id) in [
    (LookupKind::Type, query.id_type),
    (LookupKind::Field, query.id_field),
    (LookupKind::Level, query.id_level),
    (LookupKind::Attribute, query.id_attribute),
  ] {
    if let Some(id) = id {
      f.push(has_lookup(kind), id);
    }
  }
  if let Some(text) = query.name_contains.as_deref().filter(|t| !t.is_empty()) {
    f.push("d.name LIKE ? ESCAPE '\\'", contains_pattern(text));
  }
  if let Some(prior) = query.digivolved_from {
    f.push(
      "EXISTS (SELECT 1 FROM digivolution e \
       WHERE e.id_digimon_next = d.id AND e.id_digimon_prior = ?)",
      prior,
    );
  }
  if let Some(next) = query.digivolve_to {
    f.push(
      "EXISTS (SELECT 1 FROM digivolution e \
       WHERE e.id_digimon_prior = d.id AND e.id_digimon_next = ?)",
      next,
    );
  }

  f
}

/// Filters for `list_skills`, against `skill s`.
pub fn skill_filter(query: &SkillQuery) -> Filter {
  let mut f = Filter::default();

  if let Some(text) = query.name_contains.as_deref().filter(|t| !t.is_empty()) {
    f.push("s.name LIKE ? ESCAPE '\\'", contains_pattern(text));
  }
  if let Some(text) = query
    .description_contains
    .as_deref()
    .filter(|t| !t.is_empty())
  {
    f.push("s.description LIKE ? ESCAPE '\\'", contains_pattern(text));
  }

  f
}
