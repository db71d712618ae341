//! Partial-update (merge) support.
//!
//! A sparse update tracks, per field, whether the caller supplied it. Each
//! field is an `Option` whose outer `None` means "omitted"; nullable fields
//! nest a second `Option` so an explicit `null` can clear them. Fields are
//! decoded with [`present`] so that a key sent as `null` is never confused
//! with a missing key.

use serde::{Deserialize, Deserializer};

/// A sparse update that knows how to apply itself to a stored record.
pub trait Merge<E> {
  /// Overwrite every field of `record` that this update supplies and leave
  /// the rest untouched.
  fn merge_into(self, record: &mut E);
}

/// Overwrite `slot` when the update supplied a value.
pub fn assign<T>(slot: &mut T, update: Option<T>) {
  if let Some(value) = update {
    *slot = value;
  }
}

/// `deserialize_with` helper for sparse-update fields.
///
/// Use together with `#[serde(default)]`: a missing key falls back to `None`,
/// while a key that is present always decodes to `Some(value)`. For a
/// non-nullable `T` an explicit `null` is a decode error; for `T = Option<U>`
/// it becomes `Some(None)`.
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  T::deserialize(deserializer).map(Some)
}
