//! Filter/sort/page engine for browsing the record set.
//!
//! Stateless per call: the query carries every parameter (filters, one sort
//! key + direction, 1-indexed page) and the result is a pure
//! function of (records, query). Sorting is stable so equal keys keep their
//! storage order and pagination stays deterministic across requests.

use std::cmp::Ordering;

use crate::error::EngineError;
use crate::types::{BrowseQuery, Incident, Page, SortDir, SortKey};

/// Does a record pass every constraint in the query? Empty membership sets
/// constrain nothing; all constraints are ANDed.
fn matches(record: &Incident, query: &BrowseQuery) -> bool {
  if let Some(from) = query.date_from {
    if record.date < from {
      return false;
    }
  }
  if let Some(to) = query.date_to {
    if record.date > to {
      return false;
    }
  }
  if !query.squads.is_empty() && !query.squads.iter().any(|s| s == &record.squad) {
    return false;
  }
  if !query.products.is_empty() {
    // Same placeholder the product breakdown reports for missing products.
    let product = record
      .product
      .as_deref()
      .unwrap_or(crate::aggregate::UNSPECIFIED_PRODUCT);
    if !query.products.iter().any(|p| p == product) {
      return false;
    }
  }
  if !query.categories.is_empty() && !query.categories.iter().any(|c| c == &record.category) {
    return false;
  }
  if !query.impact_types.is_empty()
    && !query.impact_types.iter().any(|t| t == &record.impact_type)
  {
    return false;
  }
  true
}

fn compare(a: &Incident, b: &Incident, key: SortKey) -> Ordering {
  match key {
    SortKey::Date => a.date.cmp(&b.date),
    SortKey::Lph => a.lph.total_cmp(&b.lph),
    SortKey::Duration => a.duration_hours.total_cmp(&b.duration_hours),
    SortKey::Squad => a.squad.cmp(&b.squad),
    SortKey::Category => a.category.cmp(&b.category),
  }
}

/// Slice a sequence into a 1-indexed page.
///
/// `total_pages` is at least 1 even for zero records; a page past the end
/// yields an empty page (with correct totals) instead of an index error.
pub fn paginate(records: Vec<Incident>, page_size: usize, page: usize) -> Result<Page, EngineError> {
  if page_size == 0 {
    return Err(EngineError::validation("page_size", "must be greater than zero"));
  }
  if page == 0 {
    return Err(EngineError::validation("page", "pages are 1-indexed"));
  }

  let total_records = records.len();
  let total_pages = (total_records.div_ceil(page_size)).max(1);

  let start = (page - 1).saturating_mul(page_size);
  let slice = if start >= total_records {
    Vec::new()
  } else {
    let end = (start + page_size).min(total_records);
    records[start..end].to_vec()
  };

  Ok(Page {
    records: slice,
    page,
    total_pages,
    total_records,
  })
}

/// Filter, sort, and page a record-set snapshot.
pub fn browse(records: &[Incident], query: &BrowseQuery) -> Result<Page, EngineError> {
  let mut filtered: Vec<Incident> = records
    .iter()
    .filter(|r| matches(r, query))
    .cloned()
    .collect();

  if let Some(key) = query.sort_by {
    match query.direction {
      SortDir::Asc => filtered.sort_by(|a, b| compare(a, b, key)),
      SortDir::Desc => filtered.sort_by(|a, b| compare(b, a, key)),
    }
  }

  paginate(filtered, query.page_size, query.page)
}
