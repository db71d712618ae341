//! [`MemoryStore`], the in-memory implementation of the store traits.

use std::sync::Arc;

use roster_core::{
  Entity, Error, Result,
  address::Address,
  club::Club,
  person::Person,
  player::{NewPlayer, Player, PlayerPatch},
  store::{ClubRoster, Repository},
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::table::Table;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Roster store held entirely in process memory.
///
/// Cloning is cheap; all clones share the same tables. Locks are always
/// taken clubs before players.
#[derive(Clone, Default)]
pub struct MemoryStore {
  inner: Arc<Tables>,
}

#[derive(Default)]
struct Tables {
  persons:   RwLock<Table<Person>>,
  addresses: RwLock<Table<Address>>,
  clubs:     RwLock<Table<Club>>,
  players:   RwLock<Table<Player>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }
}

/// The whole player write must fail when `club_id` names a club that is not
/// in `clubs`.
fn check_club(clubs: &Table<Club>, draft: &NewPlayer) -> Result<()> {
  match draft.club_id {
    Some(club_id) if !clubs.contains(club_id) => {
      tracing::warn!(%club_id, "player write rejected: club does not exist");
      Err(Error::InvalidReference(club_id))
    }
    _ => Ok(()),
  }
}

// ─── Repository impls ────────────────────────────────────────────────────────

/// Kinds with no cross-table rules delegate straight to their table.
macro_rules! table_repository {
  ($entity:ty, $table:ident) => {
    impl Repository<$entity> for MemoryStore {
      async fn create(
        &self,
        draft: <$entity as Entity>::Draft,
      ) -> Result<$entity> {
        self.inner.$table.write().await.insert(draft)
      }

      async fn get(&self, id: Uuid) -> Result<$entity> {
        self.inner.$table.read().await.get(id)
      }

      async fn list(
        &self,
        filter: &<$entity as Entity>::Filter,
      ) -> Result<Vec<$entity>> {
        Ok(self.inner.$table.read().await.list(filter))
      }

      async fn patch(
        &self,
        id: Uuid,
        patch: <$entity as Entity>::Patch,
      ) -> Result<$entity> {
        self.inner.$table.write().await.patch(id, patch)
      }

      async fn replace(
        &self,
        id: Uuid,
        draft: <$entity as Entity>::Draft,
      ) -> Result<$entity> {
        self.inner.$table.write().await.replace(id, draft)
      }

      async fn delete(&self, id: Uuid) -> Result<()> {
        self.inner.$table.write().await.remove(id)
      }
    }
  };
}

table_repository!(Person, persons);
table_repository!(Address, addresses);
table_repository!(Club, clubs);

impl Repository<Player> for MemoryStore {
  async fn create(&self, draft: NewPlayer) -> Result<Player> {
    // The club read lock is held until the player is stored, so the club
    // cannot disappear between the check and the insert.
    let clubs = self.inner.clubs.read().await;
    let mut players = self.inner.players.write().await;
    players.insert_checked(draft, |d| check_club(&clubs, d))
  }

  async fn get(&self, id: Uuid) -> Result<Player> {
    self.inner.players.read().await.get(id)
  }

  async fn list(&self, filter: &<Player as Entity>::Filter) -> Result<Vec<Player>> {
    Ok(self.inner.players.read().await.list(filter))
  }

  /// Patch does not re-check `club_id`.
  async fn patch(&self, id: Uuid, patch: PlayerPatch) -> Result<Player> {
    self.inner.players.write().await.patch(id, patch)
  }

  async fn replace(&self, id: Uuid, draft: NewPlayer) -> Result<Player> {
    let clubs = self.inner.clubs.read().await;
    let mut players = self.inner.players.write().await;
    players.replace_checked(id, draft, |d| check_club(&clubs, d))
  }

  async fn delete(&self, id: Uuid) -> Result<()> {
    self.inner.players.write().await.remove(id)
  }
}

// ─── ClubRoster impl ─────────────────────────────────────────────────────────

impl ClubRoster for MemoryStore {
  async fn players_of_club(&self, club_id: Uuid) -> Result<Vec<Player>> {
    let clubs = self.inner.clubs.read().await;
    if !clubs.contains(club_id) {
      return Err(Error::NotFound {
        kind: Club::KIND,
        id:   club_id,
      });
    }

    let players = self.inner.players.read().await;
    Ok(
      players
        .iter()
        .filter(|p| p.club_id == Some(club_id))
        .cloned()
        .collect(),
    )
  }
}
