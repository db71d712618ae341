//! Standalone postal addresses.
//!
//! These records live in their own repository and are unrelated to the
//! [`PostalAddress`](crate::person::PostalAddress) values embedded in a person.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  entity::{Entity, EntityKind},
  filter::{Filter, field_eq},
  merge::{Merge, assign, present},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
  pub id:          Uuid,
  pub street:      String,
  /// City or locality.
  pub city:        String,
  /// State, province, or region.
  pub state:       String,
  pub postal_code: String,
  pub country:     String,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAddress {
  pub id:          Option<Uuid>,
  pub street:      String,
  pub city:        String,
  pub state:       String,
  pub postal_code: String,
  pub country:     String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressPatch {
  #[serde(default, deserialize_with = "present")]
  pub street:      Option<String>,
  #[serde(default, deserialize_with = "present")]
  pub city:        Option<String>,
  #[serde(default, deserialize_with = "present")]
  pub state:       Option<String>,
  #[serde(default, deserialize_with = "present")]
  pub postal_code: Option<String>,
  #[serde(default, deserialize_with = "present")]
  pub country:     Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressFilter {
  pub street:      Option<String>,
  pub city:        Option<String>,
  pub state:       Option<String>,
  pub postal_code: Option<String>,
  pub country:     Option<String>,
}

impl Merge<Address> for AddressPatch {
  fn merge_into(self, record: &mut Address) {
    assign(&mut record.street, self.street);
    assign(&mut record.city, self.city);
    assign(&mut record.state, self.state);
    assign(&mut record.postal_code, self.postal_code);
    assign(&mut record.country, self.country);
  }
}

impl Filter<Address> for AddressFilter {
  fn matches(&self, a: &Address) -> bool {
    field_eq(self.street.as_deref(), &a.street)
      && field_eq(self.city.as_deref(), &a.city)
      && field_eq(self.state.as_deref(), &a.state)
      && field_eq(self.postal_code.as_deref(), &a.postal_code)
      && field_eq(self.country.as_deref(), &a.country)
  }
}

impl Entity for Address {
  const KIND: EntityKind = EntityKind::Address;

  type Draft = NewAddress;
  type Patch = AddressPatch;
  type Filter = AddressFilter;

  fn id(&self) -> Uuid { self.id }

  fn created_at(&self) -> DateTime<Utc> { self.created_at }

  fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

  fn requested_id(draft: &NewAddress) -> Option<Uuid> { draft.id }

  fn from_draft(
    id: Uuid,
    draft: NewAddress,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      street:      draft.street,
      city:        draft.city,
      state:       draft.state,
      postal_code: draft.postal_code,
      country:     draft.country,
      created_at,
      updated_at,
    }
  }

  fn touch(&mut self, at: DateTime<Utc>) { self.updated_at = at; }
}
