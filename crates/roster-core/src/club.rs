//! Clubs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  entity::{Entity, EntityKind},
  filter::{Filter, field_eq},
  merge::{Merge, assign, present},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
  pub id:         Uuid,
  pub city:       String,
  pub name:       String,
  pub country:    String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewClub {
  pub id:      Option<Uuid>,
  pub city:    String,
  pub name:    String,
  pub country: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClubPatch {
  #[serde(default, deserialize_with = "present")]
  pub city:    Option<String>,
  #[serde(default, deserialize_with = "present")]
  pub name:    Option<String>,
  #[serde(default, deserialize_with = "present")]
  pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClubFilter {
  pub city:    Option<String>,
  pub name:    Option<String>,
  pub country: Option<String>,
}

impl Merge<Club> for ClubPatch {
  fn merge_into(self, record: &mut Club) {
    assign(&mut record.city, self.city);
    assign(&mut record.name, self.name);
    assign(&mut record.country, self.country);
  }
}

impl Filter<Club> for ClubFilter {
  fn matches(&self, c: &Club) -> bool {
    field_eq(self.city.as_deref(), &c.city)
      && field_eq(self.name.as_deref(), &c.name)
      && field_eq(self.country.as_deref(), &c.country)
  }
}

impl Entity for Club {
  const KIND: EntityKind = EntityKind::Club;

  type Draft = NewClub;
  type Patch = ClubPatch;
  type Filter = ClubFilter;

  fn id(&self) -> Uuid { self.id }

  fn created_at(&self) -> DateTime<Utc> { self.created_at }

  fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

  fn requested_id(draft: &NewClub) -> Option<Uuid> { draft.id }

  fn from_draft(
    id: Uuid,
    draft: NewClub,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      city:    draft.city,
      name:    draft.name,
      country: draft.country,
      created_at,
      updated_at,
    }
  }

  fn touch(&mut self, at: DateTime<Utc>) { self.updated_at = at; }
}
