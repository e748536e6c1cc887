//! Integration tests for `SqliteStore` against an in-memory database.

use digidex_core::{
  digimon::{DigimonRef, LookupKind},
  pagination::PageRequest,
  store::{CatalogStore, DigimonQuery, SkillQuery},
};

use crate::SqliteStore;

const FIXTURE: &str = include_str!("../../../data/sample.sql");

async fn store() -> SqliteStore {
  let s = SqliteStore::open_in_memory()
    .await
    .expect("in-memory store");
  s.execute_script(FIXTURE).await.expect("fixture");
  s
}

fn page(page: i64, page_size: i64) -> PageRequest {
  PageRequest::new(page, page_size, None).unwrap()
}

async fn ids(s: &SqliteStore, query: DigimonQuery) -> Vec<i64> {
  s.list_digimon(&query)
    .await
    .unwrap()
    .into_iter()
    .map(|d| d.id)
    .collect()
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_without_filters_is_ordered_by_id() {
  let s = store().await;
  let all = s.list_digimon(&DigimonQuery::default()).await.unwrap();
  assert_eq!(all.iter().map(|d| d.id).collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6]);
  assert!(all.iter().all(|d| d.relations.is_none()));
  assert_eq!(all[2].name, "Agumon X");
  assert!(all[2].xantibody);
}

#[tokio::test]
async fn list_applies_offset_and_limit() {
  let s = store().await;
  let q = DigimonQuery { page: page(2, 4), ..Default::default() };
  assert_eq!(ids(&s, q).await, [5, 6]);

  let q = DigimonQuery { page: page(3, 4), ..Default::default() };
  assert!(ids(&s, q).await.is_empty());
}

#[tokio::test]
async fn xantibody_filter() {
  let s = store().await;
  let q = DigimonQuery { xantibody: Some(true), ..Default::default() };
  assert_eq!(ids(&s, q).await, [3]);

  let q = DigimonQuery { xantibody: Some(false), ..Default::default() };
  assert_eq!(ids(&s, q).await, [1, 2, 4, 5, 6]);
}

#[tokio::test]
async fn filters_combine_conjunctively() {
  let s = store().await;

  let q = DigimonQuery { id_level: Some(1), ..Default::default() };
  assert_eq!(ids(&s, q.clone()).await, [1, 3, 5]);

  let q = DigimonQuery { id_type: Some(1), ..q };
  assert_eq!(ids(&s, q.clone()).await, [1, 3]);

  let q = DigimonQuery { xantibody: Some(false), ..q };
  assert_eq!(ids(&s, q.clone()).await, [1]);

  let q = DigimonQuery { id_field: Some(2), id_attribute: Some(1), ..q };
  assert_eq!(ids(&s, q).await, [1]);
}

#[tokio::test]
async fn membership_filter_with_unknown_id_matches_nothing() {
  let s = store().await;
  let q = DigimonQuery { id_attribute: Some(99), ..Default::default() };
  assert!(ids(&s, q).await.is_empty());
}

#[tokio::test]
async fn name_contains_is_case_insensitive_and_literal() {
  let s = store().await;

  let q = DigimonQuery { name_contains: Some("agumon".into()), ..Default::default() };
  assert_eq!(ids(&s, q).await, [1, 3]);

  let q = DigimonQuery { name_contains: Some("Greymon".into()), ..Default::default() };
  assert_eq!(ids(&s, q).await, [2, 4]);

  // Wildcards in the input are matched literally.
  let q = DigimonQuery { name_contains: Some("%".into()), ..Default::default() };
  assert!(ids(&s, q).await.is_empty());
  let q = DigimonQuery { name_contains: Some("Agumon_X".into()), ..Default::default() };
  assert!(ids(&s, q).await.is_empty());
}

#[tokio::test]
async fn evolution_filters_follow_edge_direction() {
  let s = store().await;

  let q = DigimonQuery { digivolved_from: Some(1), ..Default::default() };
  assert_eq!(ids(&s, q).await, [2]);

  let q = DigimonQuery { digivolve_to: Some(2), ..Default::default() };
  assert_eq!(ids(&s, q).await, [1, 3]);

  let q = DigimonQuery { digivolve_to: Some(2), xantibody: Some(true), ..Default::default() };
  assert_eq!(ids(&s, q).await, [3]);

  let q = DigimonQuery { digivolved_from: Some(4), ..Default::default() };
  assert!(ids(&s, q).await.is_empty());
}

#[tokio::test]
async fn count_ignores_filters() {
  let s = store().await;
  assert_eq!(s.count_digimon().await.unwrap(), 6);

  let q = DigimonQuery { xantibody: Some(true), ..Default::default() };
  assert_eq!(ids(&s, q).await.len(), 1);
  assert_eq!(s.count_digimon().await.unwrap(), 6);
}

// ─── Single item ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_by_id_loads_every_relation() {
  let s = store().await;
  let agumon = s.get_digimon(&DigimonRef::Id(1)).await.unwrap().unwrap();
  let rel = agumon.relations.expect("relations loaded");

  assert_eq!(agumon.name, "Agumon");
  assert_eq!(rel.levels.iter().map(|l| l.name.as_str()).collect::<Vec<_>>(), ["Rookie"]);
  assert_eq!(rel.fields.len(), 2);
  assert_eq!(rel.types[0].name, "Reptile");
  assert_eq!(rel.attributes[0].name, "Vaccine");
  assert_eq!(rel.skills[0].name, "Pepper Breath");
  assert_eq!(rel.descriptions.len(), 2);
  assert_eq!(rel.descriptions[1].language, "jp");
  assert!(rel.digivolved_from.is_empty());
  assert_eq!(rel.digivolve_to.len(), 1);
  assert_eq!(rel.digivolve_to[0].digimon_next_name, "Greymon");
  assert_eq!(rel.digivolve_to[0].condition, "Level 5");
}

#[tokio::test]
async fn evolution_edges_are_visible_from_both_ends() {
  let s = store().await;
  let greymon = s.get_digimon(&DigimonRef::Id(2)).await.unwrap().unwrap();
  let rel = greymon.relations.unwrap();

  let from: Vec<_> = rel
    .digivolved_from
    .iter()
    .map(|e| (e.digimon_prior_name.as_str(), e.condition.as_str()))
    .collect();
  assert_eq!(from, [("Agumon", "Level 5"), ("Agumon X", "")]);

  assert_eq!(rel.digivolve_to.len(), 1);
  assert_eq!(rel.digivolve_to[0].digimon_next_name, "MetalGreymon");
  assert_eq!(rel.digivolve_to[0].condition, "Level 20");
}

#[tokio::test]
async fn get_by_name_matches_whole_name_case_insensitively() {
  let s = store().await;

  let found = s
    .get_digimon(&DigimonRef::Name("Agumon X".into()))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(found.id, 3);

  let found = s
    .get_digimon(&DigimonRef::Name("agumon x".into()))
    .await
    .unwrap();
  assert_eq!(found.map(|d| d.id), Some(3));

  let partial = s
    .get_digimon(&DigimonRef::Name("Agu%".into()))
    .await
    .unwrap();
  assert!(partial.is_none());
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get_digimon(&DigimonRef::Id(404)).await.unwrap().is_none());
  assert!(
    s.get_digimon(&DigimonRef::Name("Missingmon".into()))
      .await
      .unwrap()
      .is_none()
  );
}

#[tokio::test]
async fn ambiguous_name_returns_none() {
  let s = store().await;
  s.execute_script("INSERT INTO digimon (id, name) VALUES (7, 'AGUMON');")
    .await
    .unwrap();

  let result = s
    .get_digimon(&DigimonRef::Name("Agumon".into()))
    .await
    .unwrap();
  assert!(result.is_none());
}

// ─── Lookups ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn lookup_pages_report_table_total() {
  let s = store().await;

  let (levels, total) = s.list_lookup(LookupKind::Level, page(1, 2)).await.unwrap();
  assert_eq!(total, 3);
  assert_eq!(levels.iter().map(|l| l.id).collect::<Vec<_>>(), [1, 2]);

  let (levels, total) = s.list_lookup(LookupKind::Level, page(2, 2)).await.unwrap();
  assert_eq!(total, 3);
  assert_eq!(levels.len(), 1);
  assert_eq!(levels[0].name, "Ultimate");
}

#[tokio::test]
async fn every_lookup_kind_is_queryable() {
  let s = store().await;
  for (kind, expected) in [
    (LookupKind::Level, 3),
    (LookupKind::Field, 2),
    (LookupKind::Type, 3),
    (LookupKind::Attribute, 2),
  ] {
    let (items, total) = s.list_lookup(kind, page(1, 10)).await.unwrap();
    assert_eq!(total, expected, "{kind}");
    assert_eq!(items.len() as u64, expected, "{kind}");
  }
}

#[tokio::test]
async fn skills_filter_by_name_and_description() {
  let s = store().await;

  let q = SkillQuery { name_contains: Some("Fire".into()), page: page(1, 10), ..Default::default() };
  let (skills, total) = s.list_skills(&q).await.unwrap();
  assert_eq!(skills.iter().map(|s| s.id).collect::<Vec<_>>(), [3]);
  assert_eq!(total, 1);

  let q = SkillQuery { description_contains: Some("fire".into()), page: page(1, 10), ..Default::default() };
  let (skills, total) = s.list_skills(&q).await.unwrap();
  assert_eq!(skills.iter().map(|s| s.id).collect::<Vec<_>>(), [1, 2]);
  assert_eq!(total, 2);
}

#[tokio::test]
async fn skill_total_counts_filtered_rows_not_the_page() {
  let s = store().await;
  let q = SkillQuery {
    description_contains: Some("fire".into()),
    page: page(1, 1),
    ..Default::default()
  };
  let (skills, total) = s.list_skills(&q).await.unwrap();
  assert_eq!(skills.len(), 1);
  assert_eq!(total, 2);

  let (all, total) = s.list_skills(&SkillQuery::default()).await.unwrap();
  assert_eq!(all.len(), 3);
  assert_eq!(total, 3);
}

#[tokio::test]
async fn schema_init_is_idempotent() {
  let s = store().await;
  s.execute_script(crate::schema::SCHEMA).await.unwrap();
  assert_eq!(s.count_digimon().await.unwrap(), 6);
}
