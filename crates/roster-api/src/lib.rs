//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by any [`roster_core::store::RosterStore`].
//! Transport concerns (listening, tracing layers) are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .merge(roster_api::api_router(store.clone(), host_ip))
//! ```

pub mod clubs;
pub mod error;
pub mod health;
pub mod records;

use std::{net::IpAddr, sync::Arc};

use axum::{Router, routing::get};
use roster_core::{
  Entity,
  address::Address,
  club::Club,
  person::Person,
  player::Player,
  store::{Repository, RosterStore},
};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// `host` is reported by the health endpoints. The returned `Router<()>` can
/// be merged into any parent router regardless of its own state type.
pub fn api_router<S>(store: Arc<S>, host: IpAddr) -> Router<()>
where
  S: RosterStore + 'static,
{
  let records = Router::new();
  let records = record_routes::<S, Person>(records, "/persons");
  let records = record_routes::<S, Address>(records, "/addresses");
  let records = record_routes::<S, Club>(records, "/clubs");
  let records = record_routes::<S, Player>(records, "/players");

  let records = records
    .route("/clubs/{id}/players", get(clubs::players::<S>))
    .with_state(store);

  let health = Router::new()
    .route("/health", get(health::handler))
    .route("/health/{path_echo}", get(health::with_path))
    .with_state(host);

  records.merge(health)
}

/// Mount the six record operations for `E` under `path`.
fn record_routes<S, E>(router: Router<Arc<S>>, path: &str) -> Router<Arc<S>>
where
  S: Repository<E> + 'static,
  E: Entity,
{
  router
    .route(
      path,
      get(records::list::<S, E>).post(records::create::<S, E>),
    )
    .route(
      &format!("{path}/{{id}}"),
      get(records::get_one::<S, E>)
        .patch(records::patch_one::<S, E>)
        .put(records::replace_one::<S, E>)
        .delete(records::delete_one::<S, E>),
    )
}
