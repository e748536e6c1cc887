//! Offset pagination and the page-link metadata returned with every listing.
//!
//! Links are built by plain string concatenation:
//! `<path>page=<n>&page_size=<s>[&key=value...]`. The path is expected to end
//! with `?`. Values are inserted as-is and booleans render as `True`/`False`.

use serde::Serialize;

use crate::{Error, Result};

// ─── Request ─────────────────────────────────────────────────────────────────

/// A validated `(page, page_size)` pair. Both are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  page:      u32,
  page_size: u32,
}

impl PageRequest {
  pub const DEFAULT_PAGE_SIZE: u32 = 10;

  /// Validate raw query values. `max_page_size`, when set, caps `page_size`.
  pub fn new(page: i64, page_size: i64, max_page_size: Option<u32>) -> Result<Self> {
    let page = positive("page", page)?;
    let page_size = positive("page_size", page_size)?;
    if let Some(max) = max_page_size
      && page_size > max
    {
      return Err(Error::PageSizeTooLarge { requested: page_size, max });
    }
    Ok(Self { page, page_size })
  }

  pub fn page(&self) -> u32 { self.page }

  pub fn page_size(&self) -> u32 { self.page_size }

  /// Rows to skip: `(page - 1) * page_size`.
  pub fn offset(&self) -> u64 {
    u64::from(self.page - 1) * u64::from(self.page_size)
  }
}

impl Default for PageRequest {
  fn default() -> Self {
    Self { page: 1, page_size: Self::DEFAULT_PAGE_SIZE }
  }
}

fn positive(field: &'static str, value: i64) -> Result<u32> {
  if value < 1 {
    return Err(Error::InvalidPage { field, value });
  }
  u32::try_from(value).map_err(|_| Error::OutOfRange { field, value, max: u32::MAX })
}

// ─── Link parameters ─────────────────────────────────────────────────────────

/// An extra `key=value` pair appended to page links. Pairs without a value
/// are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkParam {
  pub key:   &'static str,
  pub value: Option<String>,
}

impl LinkParam {
  pub fn int(key: &'static str, value: Option<i64>) -> Self {
    Self { key, value: value.map(|v| v.to_string()) }
  }

  pub fn text(key: &'static str, value: Option<&str>) -> Self {
    Self { key, value: value.map(str::to_owned) }
  }

  pub fn flag(key: &'static str, value: Option<bool>) -> Self {
    Self { key, value: value.map(|v| format_flag(v).to_owned()) }
  }
}

/// Booleans in links are capitalised; the API accepts this form back.
pub fn format_flag(value: bool) -> &'static str {
  if value { "True" } else { "False" }
}

// ─── Metadata ────────────────────────────────────────────────────────────────

/// Pagination block of a listing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
  /// Empty when the current page was not full.
  pub next_page:     String,
  /// Empty on the first page and when the current page was not full.
  pub previous_page: String,
  /// Rows actually returned, capped at the requested size.
  pub page_size:     u32,
  /// `total_count / page_size + 1`. An exact multiple yields a trailing
  /// empty page.
  pub total_page:    u64,
}

/// Compute the pagination block for a page holding `returned` rows out of
/// `total_count`.
pub fn build_pagination(
  path: &str,
  total_count: u64,
  request: PageRequest,
  returned: usize,
  extra: &[LinkParam],
) -> Pagination {
  let page = i64::from(request.page());
  let page_size = request.page_size();

  Pagination {
    next_page:     page_link(path, page_size, page + 1, returned, extra),
    previous_page: page_link(path, page_size, page - 1, returned, extra),
    page_size:     u32::try_from(returned).map_or(page_size, |r| r.min(page_size)),
    total_page:    total_count / u64::from(page_size) + 1,
  }
}

/// A link to `target` page, or an empty string if `target < 1` or the current
/// page held fewer than `page_size` rows.
pub fn page_link(
  path: &str,
  page_size: u32,
  target: i64,
  returned: usize,
  extra: &[LinkParam],
) -> String {
  if target < 1 || returned < page_size as usize {
    return String::new();
  }

  let mut parts = vec![format!("page={target}"), format!("page_size={page_size}")];
  parts.extend(
    extra
      .iter()
      .filter_map(|p| p.value.as_ref().map(|v| format!("{}={v}", p.key))),
  );
  format!("{path}{}", parts.join("&"))
}
