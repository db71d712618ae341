//! [`Table`]: one entity kind's records, keyed by id, in insertion order.
//!
//! A table is plain data; callers wrap it in a lock and hold the guard for the
//! whole check-then-act sequence of an operation.

use std::collections::HashMap;

use chrono::Utc;
use roster_core::{
  Entity, Error, Result,
  entity::next_stamp,
  filter::select,
  merge::Merge,
};
use uuid::Uuid;

pub struct Table<E> {
  rows:  HashMap<Uuid, E>,
  order: Vec<Uuid>,
}

impl<E> Default for Table<E> {
  fn default() -> Self {
    Self {
      rows:  HashMap::new(),
      order: Vec::new(),
    }
  }
}

impl<E: Entity> Table<E> {
  pub fn contains(&self, id: Uuid) -> bool { self.rows.contains_key(&id) }

  /// Records in insertion order.
  pub fn iter(&self) -> impl Iterator<Item = &E> {
    self.order.iter().filter_map(|id| self.rows.get(id))
  }

  pub fn insert(&mut self, draft: E::Draft) -> Result<E> {
    self.insert_checked(draft, |_| Ok(()))
  }

  /// Insert after `check` accepts the draft. The id conflict is reported
  /// before anything `check` finds.
  pub fn insert_checked(
    &mut self,
    draft: E::Draft,
    check: impl FnOnce(&E::Draft) -> Result<()>,
  ) -> Result<E> {
    let id = E::requested_id(&draft).unwrap_or_else(Uuid::new_v4);
    if self.contains(id) {
      tracing::warn!(kind = %E::KIND, %id, "create rejected: id already taken");
      return Err(Error::Conflict { kind: E::KIND, id });
    }
    check(&draft)?;

    let now = Utc::now();
    let record = E::from_draft(id, draft, now, now);
    self.rows.insert(id, record.clone());
    self.order.push(id);

    tracing::debug!(kind = %E::KIND, %id, "record created");
    Ok(record)
  }

  pub fn get(&self, id: Uuid) -> Result<E> {
    self.rows.get(&id).cloned().ok_or(not_found::<E>(id))
  }

  pub fn list(&self, filter: &E::Filter) -> Vec<E> { select(self.iter(), filter) }

  pub fn patch(&mut self, id: Uuid, patch: E::Patch) -> Result<E> {
    let record = self.rows.get_mut(&id).ok_or(not_found::<E>(id))?;
    let stamp = next_stamp(record.updated_at());
    patch.merge_into(record);
    record.touch(stamp);

    tracing::debug!(kind = %E::KIND, %id, "record patched");
    Ok(record.clone())
  }

  pub fn replace(&mut self, id: Uuid, draft: E::Draft) -> Result<E> {
    self.replace_checked(id, draft, |_| Ok(()))
  }

  /// Replace after `check` accepts the draft. A missing id is reported before
  /// anything `check` finds.
  pub fn replace_checked(
    &mut self,
    id: Uuid,
    draft: E::Draft,
    check: impl FnOnce(&E::Draft) -> Result<()>,
  ) -> Result<E> {
    let slot = self.rows.get_mut(&id).ok_or(not_found::<E>(id))?;
    check(&draft)?;

    let stamp = next_stamp(slot.updated_at());
    *slot = E::from_draft(id, draft, slot.created_at(), stamp);

    tracing::debug!(kind = %E::KIND, %id, "record replaced");
    Ok(slot.clone())
  }

  pub fn remove(&mut self, id: Uuid) -> Result<()> {
    self.rows.remove(&id).ok_or(not_found::<E>(id))?;
    self.order.retain(|other| *other != id);

    tracing::debug!(kind = %E::KIND, %id, "record deleted");
    Ok(())
  }
}

fn not_found<E: Entity>(id: Uuid) -> Error {
  Error::NotFound { kind: E::KIND, id }
}
