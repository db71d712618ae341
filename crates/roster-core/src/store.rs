//! The store traits.
//!
//! [`Repository`] is implemented once per entity kind by storage backends
//! (e.g. `roster-store-memory`). Higher layers (`roster-api`) depend on these
//! abstractions, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  Result,
  address::Address,
  club::Club,
  entity::Entity,
  person::Person,
  player::Player,
};

// ─── Repository ──────────────────────────────────────────────────────────────

/// Create/read/update/delete and filtered listing for one entity kind.
///
/// Every operation either succeeds and touches exactly one record, or fails
/// and touches nothing. All methods return `Send` futures so the trait can be
/// used from multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait Repository<E: Entity>: Send + Sync {
  /// Store a new record. The id is taken from the draft when present and
  /// generated otherwise.
  ///
  /// Fails with [`Error::Conflict`](crate::Error::Conflict) if the id is
  /// already taken.
  fn create(
    &self,
    draft: E::Draft,
  ) -> impl Future<Output = Result<E>> + Send + '_;

  fn get(&self, id: Uuid) -> impl Future<Output = Result<E>> + Send + '_;

  /// Every record matching `filter`, in insertion order. Never fails for an
  /// empty result.
  fn list<'a>(
    &'a self,
    filter: &'a E::Filter,
  ) -> impl Future<Output = Result<Vec<E>>> + Send + 'a;

  /// Apply a sparse update and refresh `updated_at`.
  fn patch(
    &self,
    id: Uuid,
    patch: E::Patch,
  ) -> impl Future<Output = Result<E>> + Send + '_;

  /// Overwrite every field except the id and `created_at`. Any id inside
  /// `draft` is ignored.
  fn replace(
    &self,
    id: Uuid,
    draft: E::Draft,
  ) -> impl Future<Output = Result<E>> + Send + '_;

  fn delete(&self, id: Uuid) -> impl Future<Output = Result<()>> + Send + '_;
}

// ─── Club roster ─────────────────────────────────────────────────────────────

pub trait ClubRoster: Send + Sync {
  /// All players whose `club_id` is `club_id`. Fails with
  /// [`Error::NotFound`](crate::Error::NotFound) if the club does not exist.
  fn players_of_club(
    &self,
    club_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Player>>> + Send + '_;
}

// ─── Full store ──────────────────────────────────────────────────────────────

/// A backend holding all four repositories.
pub trait RosterStore:
  Repository<Person>
  + Repository<Address>
  + Repository<Club>
  + Repository<Player>
  + ClubRoster
{
}

impl<T> RosterStore for T where
  T: Repository<Person>
    + Repository<Address>
    + Repository<Club>
    + Repository<Player>
    + ClubRoster
{
}
