//! [`SqliteStore`]: the SQLite implementation of [`CatalogStore`].

use std::path::Path;

use digidex_core::{
  digimon::{Digimon, DigimonRef, LookupItem, LookupKind, Skill},
  pagination::PageRequest,
  store::{CatalogStore, DigimonQuery, SkillQuery},
};
use rusqlite::{OptionalExtension as _, params_from_iter};

use crate::{
  Result,
  query::{digimon_filter, escape_like, skill_filter},
  rows::{self, DIGIMON_COLUMNS},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A read-only view of the digimon catalog backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a batch of SQL statements, typically a catalog seed.
  pub async fn execute_script(&self, sql: impl Into<String>) -> Result<()> {
    let sql = sql.into();
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(&sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Read a SQL file from disk and run it with [`Self::execute_script`].
  pub async fn load_script(&self, path: impl AsRef<Path>) -> Result<()> {
    let sql = tokio::fs::read_to_string(path).await?;
    self.execute_script(sql).await
  }
}

fn to_count(n: i64) -> u64 { u64::try_from(n).unwrap_or(0) }

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = crate::Error;

  // ── Digimon ───────────────────────────────────────────────────────────────

  async fn list_digimon(&self, query: &DigimonQuery) -> Result<Vec<Digimon>> {
    let filter = digimon_filter(query);
    let sql = format!(
      "SELECT {DIGIMON_COLUMNS}
       FROM digimon d
       {}
       ORDER BY d.id
       LIMIT ? OFFSET ?",
      filter.where_clause()
    );
    let params = filter.params_with_page(query.page.page_size(), query.page.offset());
    tracing::debug!(%sql, params = params.len(), "listing digimon");

    let digimon = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let page = stmt
          .query_map(params_from_iter(params.iter()), rows::digimon)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(page)
      })
      .await?;

    Ok(digimon)
  }

  async fn count_digimon(&self) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM digimon", [], |r| r.get(0))?))
      .await?;
    Ok(to_count(n))
  }

  async fn get_digimon(&self, key: &DigimonRef) -> Result<Option<Digimon>> {
    tracing::debug!(%key, "fetching digimon");
    let key = key.clone();

    let digimon = self
      .conn
      .call(move |conn| {
        let found = match &key {
          DigimonRef::Id(id) => conn
            .query_row(
              &format!("SELECT {DIGIMON_COLUMNS} FROM digimon d WHERE d.id = ?1"),
              [id],
              rows::digimon,
            )
            .optional()?,
          DigimonRef::Name(name) => {
            // Two rows are enough to tell a unique match from an ambiguous one.
            let mut stmt = conn.prepare(&format!(
              "SELECT {DIGIMON_COLUMNS} FROM digimon d
               WHERE d.name LIKE ?1 ESCAPE '\\'
               ORDER BY d.id
               LIMIT 2"
            ))?;
            let mut matches = stmt
              .query_map([escape_like(name)], rows::digimon)?
              .collect::<rusqlite::Result<Vec<_>>>()?;
            if matches.len() == 1 { matches.pop() } else { None }
          }
        };

        let Some(mut digimon) = found else {
          return Ok(None);
        };
        digimon.relations = Some(rows::relations(conn, digimon.id)?);
        Ok(Some(digimon))
      })
      .await?;

    Ok(digimon)
  }

  // ── Lookups ───────────────────────────────────────────────────────────────

  async fn list_lookup(
    &self,
    kind: LookupKind,
    page: PageRequest,
  ) -> Result<(Vec<LookupItem>, u64)> {
    let limit = i64::from(page.page_size());
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

    let (items, total): (Vec<LookupItem>, i64) = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT l.id, l.name FROM \"{kind}\" l ORDER BY l.id LIMIT ?1 OFFSET ?2"
        ))?;
        let items = stmt
          .query_map([limit, offset], rows::lookup_item)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        let total: i64 =
          conn.query_row(&format!("SELECT COUNT(*) FROM \"{kind}\""), [], |r| r.get(0))?;
        Ok((items, total))
      })
      .await?;

    Ok((items, to_count(total)))
  }

  async fn list_skills(&self, query: &SkillQuery) -> Result<(Vec<Skill>, u64)> {
    let filter = skill_filter(query);
    let where_clause = filter.where_clause();
    let list_sql = format!(
      "SELECT s.id, s.name, s.description
       FROM skill s
       {where_clause}
       ORDER BY s.id
       LIMIT ? OFFSET ?"
    );
    let count_sql = format!("SELECT COUNT(*) FROM skill s {where_clause}");
    let list_params = filter.params_with_page(query.page.page_size(), query.page.offset());
    let count_params = filter.params().to_vec();
    tracing::debug!(sql = %list_sql, "listing skills");

    let (skills, total): (Vec<Skill>, i64) = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&list_sql)?;
        let skills = stmt
          .query_map(params_from_iter(list_params.iter()), rows::skill)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        let total: i64 = conn.query_row(
          &count_sql,
          params_from_iter(count_params.iter()),
          |r| r.get(0),
        )?;
        Ok((skills, total))
      })
      .await?;

    Ok((skills, to_count(total)))
  }
}
