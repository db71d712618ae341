//! Conjunction filters over records.
//!
//! A filter is a struct of optional predicates; an absent predicate matches
//! everything. String predicates are exact matches. Dates are compared by
//! their canonical `YYYY-MM-DD` form.

use chrono::NaiveDate;

/// A conjunction of optional equality predicates over records of type `E`.
pub trait Filter<E> {
  fn matches(&self, record: &E) -> bool;
}

/// Keep the records `filter` accepts, preserving their order.
pub fn select<'a, E, F>(records: impl IntoIterator<Item = &'a E>, filter: &F) -> Vec<E>
where
  E: Clone + 'a,
  F: Filter<E> + ?Sized,
{
  records
    .into_iter()
    .filter(|record| filter.matches(record))
    .cloned()
    .collect()
}

pub fn field_eq(predicate: Option<&str>, value: &str) -> bool {
  predicate.is_none_or(|p| p == value)
}

/// A record without a date never satisfies a date predicate.
pub fn date_eq(predicate: Option<&str>, value: Option<NaiveDate>) -> bool {
  match predicate {
    None => true,
    Some(p) => value.is_some_and(|d| d.format("%Y-%m-%d").to_string() == p),
  }
}

/// Existential match: at least one of `values` equals the predicate.
pub fn any_eq<'a>(
  predicate: Option<&str>,
  mut values: impl Iterator<Item = &'a str>,
) -> bool {
  match predicate {
    None => true,
    Some(p) => values.any(|v| v == p),
  }
}
