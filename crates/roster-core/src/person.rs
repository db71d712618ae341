//! People and their embedded postal addresses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  entity::{Entity, EntityKind},
  filter::{Filter, any_eq, date_eq, field_eq},
  merge::{Merge, assign, present},
};

/// A postal address owned by a [`Person`]. This is a value: it has no id and
/// is not linked to the standalone address repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
  pub street:      String,
  pub city:        String,
  pub state:       String,
  pub postal_code: String,
  pub country:     String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub id:         Uuid,
  pub first_name: String,
  pub last_name:  String,
  /// University identifier.
  pub uni:        String,
  pub email:      String,
  pub phone:      String,
  pub birth_date: Option<NaiveDate>,
  /// Order carries no meaning.
  pub addresses:  Vec<PostalAddress>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPerson {
  pub id:         Option<Uuid>,
  pub first_name: String,
  pub last_name:  String,
  pub uni:        String,
  pub email:      String,
  pub phone:      String,
  pub birth_date: Option<NaiveDate>,
  #[serde(default)]
  pub addresses:  Vec<PostalAddress>,
}

/// Sparse update for a person. `addresses`, when supplied, replaces the whole
/// collection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonPatch {
  #[serde(default, deserialize_with = "present")]
  pub first_name: Option<String>,
  #[serde(default, deserialize_with = "present")]
  pub last_name:  Option<String>,
  #[serde(default, deserialize_with = "present")]
  pub uni:        Option<String>,
  #[serde(default, deserialize_with = "present")]
  pub email:      Option<String>,
  #[serde(default, deserialize_with = "present")]
  pub phone:      Option<String>,
  #[serde(default, deserialize_with = "present")]
  pub birth_date: Option<Option<NaiveDate>>,
  #[serde(default, deserialize_with = "present")]
  pub addresses:  Option<Vec<PostalAddress>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonFilter {
  pub uni:        Option<String>,
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub email:      Option<String>,
  pub phone:      Option<String>,
  /// `YYYY-MM-DD`.
  pub birth_date: Option<String>,
  /// Matches when any embedded address is in this city.
  pub city:       Option<String>,
  /// Matches when any embedded address is in this country.
  pub country:    Option<String>,
}

impl Merge<Person> for PersonPatch {
  fn merge_into(self, record: &mut Person) {
    assign(&mut record.first_name, self.first_name);
    assign(&mut record.last_name, self.last_name);
    assign(&mut record.uni, self.uni);
    assign(&mut record.email, self.email);
    assign(&mut record.phone, self.phone);
    assign(&mut record.birth_date, self.birth_date);
    assign(&mut record.addresses, self.addresses);
  }
}

impl Filter<Person> for PersonFilter {
  fn matches(&self, p: &Person) -> bool {
    field_eq(self.uni.as_deref(), &p.uni)
      && field_eq(self.first_name.as_deref(), &p.first_name)
      && field_eq(self.last_name.as_deref(), &p.last_name)
      && field_eq(self.email.as_deref(), &p.email)
      && field_eq(self.phone.as_deref(), &p.phone)
      && date_eq(self.birth_date.as_deref(), p.birth_date)
      && any_eq(
        self.city.as_deref(),
        p.addresses.iter().map(|a| a.city.as_str()),
      )
      && any_eq(
        self.country.as_deref(),
        p.addresses.iter().map(|a| a.country.as_str()),
      )
  }
}

impl Entity for Person {
  const KIND: EntityKind = EntityKind::Person;

  type Draft = NewPerson;
  type Patch = PersonPatch;
  type Filter = PersonFilter;

  fn id(&self) -> Uuid { self.id }

  fn created_at(&self) -> DateTime<Utc> { self.created_at }

  fn updated_at(&self) -> DateTime<Utc> { self.updated_at }

  fn requested_id(draft: &NewPerson) -> Option<Uuid> { draft.id }

  fn from_draft(
    id: Uuid,
    draft: NewPerson,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      first_name: draft.first_name,
      last_name:  draft.last_name,
      uni:        draft.uni,
      email:      draft.email,
      phone:      draft.phone,
      birth_date: draft.birth_date,
      addresses:  draft.addresses,
      created_at,
      updated_at,
    }
  }

  fn touch(&mut self, at: DateTime<Utc>) { self.updated_at = at; }
}
