//! Handler for `GET /clubs/{id}/players`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use roster_core::{player::Player, store::ClubRoster};
use uuid::Uuid;

use crate::error::ApiError;

/// `GET /clubs/{id}/players`: 404 if the club does not exist.
pub async fn players<S>(
  State(store): State<Arc<S>>,
  Path(club_id): Path<Uuid>,
) -> Result<Json<Vec<Player>>, ApiError>
where
  S: ClubRoster,
{
  let players = store.players_of_club(club_id).await?;
  Ok(Json(players))
}
