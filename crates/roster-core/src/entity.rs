//! The [`Entity`] trait shared by every record kind.
//!
//! A kind declares three payload shapes next to its stored record: a `Draft`
//! accepted by create and replace, a sparse `Patch`, and a `Filter` of
//! optional equality predicates. Repositories are written once against this
//! trait and reused for every kind.

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{filter, merge::Merge};

/// The four kinds of record held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
  Person,
  Address,
  Club,
  Player,
}

impl EntityKind {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Person => "person",
      Self::Address => "address",
      Self::Club => "club",
      Self::Player => "player",
    }
  }
}

impl fmt::Display for EntityKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A stored record with a stable identifier and server-managed timestamps.
pub trait Entity:
  Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
  const KIND: EntityKind;

  /// Full payload accepted by create and replace.
  type Draft: DeserializeOwned + Send + Sync + 'static;
  /// Sparse payload accepted by patch.
  type Patch: Merge<Self> + DeserializeOwned + Send + Sync + 'static;
  /// Conjunction of optional predicates accepted by list.
  type Filter: filter::Filter<Self> + DeserializeOwned + Default + Send + Sync + 'static;

  fn id(&self) -> Uuid;
  fn created_at(&self) -> DateTime<Utc>;
  fn updated_at(&self) -> DateTime<Utc>;

  /// The identifier a creation payload asks for, if it carries one.
  fn requested_id(draft: &Self::Draft) -> Option<Uuid>;

  /// Build a record from `draft`. Any identifier inside the draft is ignored
  /// in favour of `id`.
  fn from_draft(
    id: Uuid,
    draft: Self::Draft,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self;

  /// Set `updated_at`.
  fn touch(&mut self, at: DateTime<Utc>);
}

/// A fresh `updated_at` that is strictly later than `previous`, even when the
/// clock has not visibly advanced since the last write.
pub fn next_stamp(previous: DateTime<Utc>) -> DateTime<Utc> {
  let now = Utc::now();
  if now > previous {
    now
  } else {
    previous + TimeDelta::microseconds(1)
  }
}
