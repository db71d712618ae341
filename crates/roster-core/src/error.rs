//! Error types for `roster-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::entity::EntityKind;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{kind} not found: {id}")]
  NotFound { kind: EntityKind, id: Uuid },

  #[error("{kind} with id {id} already exists")]
  Conflict { kind: EntityKind, id: Uuid },

  /// A player referenced a club that is not in the store.
  #[error("club {0} does not exist")]
  InvalidReference(Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
