//! Players and their weak reference to a [`Club`](crate::club::Club).
//!
//! `club_id` is looked up when a player is created or replaced and never
//! again: deleting a club leaves its players pointing at a missing id.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  entity::{Entity, EntityKind},
  filter::{Filter, date_eq, field_eq},
  merge::{Merge, assign, present},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
  pub id:         Uuid,
  pub first_name: String,
  pub last_name:  String,
  pub position:   String,
  pub birth_date: Option<NaiveDate>,
  pub club_id:    Option<Uuid>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Input to player create and replace.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPlayer {
  /// Caller-chosen id. Honoured by create, ignored by replace.
  pub id:         Option<Uuid>,
  pub first_name: String,
  pub last_name:  String,
  pub position:   String,
  pub birth_date: Option<NaiveDate>,
  pub club_id:    Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerPatch {
  #[serde(default, deserialize_with = "present")]
  pub first_name: Option<String>,
  #[serde(default, deserialize_with = "present")]
  pub last_name:  Option<String>,
  #[serde(default, deserialize_with = "present")]
  pub position:   Option<String>,
  #[serde(default, deserialize_with = "present")]
  pub birth_date: Option<Option<NaiveDate>>,
  #[serde(default, deserialize_with = "present")]
  pub club_id:    Option<Option<Uuid>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerFilter {
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub position:   Option<String>,
  /// `YYYY-MM-DD`.
  pub birth_date: Option<String>,
}

impl Merge<Player> for PlayerPatch {
  fn merge_into(self, record: &mut Player) {
    assign(&mut record.first_name, self.first_name);
    assign(&mut record.last_name, self.last_name);
    assign(&mut record.position, self.position);
    assign(&mut record.birth_date, self.birth_date);
    assign(&mut record.club_id, self.club_id);
  }
}

impl Filter<Player> for PlayerFilter {
  fn matches(&self, p: &Player) -> bool {
    field_eq(self.first_name.as_deref(), &p.first_name)
      && field_eq(self.last_name.as_deref(), &p.last_name)
      && field_eq(self.position.as_deref(), &p.position)
      && date_eq(self.birth_date.as_deref(), p.birth_date)
  }
}

impl Entity for Player {
  const KIND: EntityKind = EntityKind::Player;

  type Draft = NewPlayer;
  type Patch = PlayerPatch;
  type Filter = PlayerFilter;

  fn id(&self) -> Uuid { self.id }

  fn created_at(&self) -> DateTime<Utc> { self.created_at }

  fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

  fn requested_id(draft: &NewPlayer) -> Option<Uuid> { draft.id }

  fn from_draft(
    id: Uuid,
    draft: NewPlayer,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      first_name: draft.first_name,
      last_name:  draft.last_name,
      position:   draft.position,
      birth_date: draft.birth_date,
      club_id:    draft.club_id,
      created_at,
      updated_at,
    }
  }

  fn touch(&mut self, at: DateTime<Utc>) { self.updated_at = at; }
}
