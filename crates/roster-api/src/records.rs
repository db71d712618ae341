//! Handlers shared by every record collection.
//!
//! | Method   | Path           | Notes |
//! |----------|----------------|-------|
//! | `GET`    | `/{kind}`      | Filters as query parameters |
//! | `POST`   | `/{kind}`      | Body: the kind's draft; returns 201 + stored record |
//! | `GET`    | `/{kind}/{id}`  | 404 if not found |
//! | `PATCH`  | `/{kind}/{id}`  | Body: sparse update |
//! | `PUT`    | `/{kind}/{id}`  | Body: full draft; the path id wins |
//! | `DELETE` | `/{kind}/{id}`  | 204 |
//!
//! Each handler is generic over the entity `E` and instantiated once per kind
//! in [`crate::api_router`].

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{Entity, store::Repository};
use uuid::Uuid;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /{kind}[?field=value...]`
pub async fn list<S, E>(
  State(store): State<Arc<S>>,
  Query(filter): Query<E::Filter>,
) -> Result<Json<Vec<E>>, ApiError>
where
  S: Repository<E>,
  E: Entity,
{
  let records = store.list(&filter).await?;
  Ok(Json(records))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /{kind}`: 201 with the stored record.
pub async fn create<S, E>(
  State(store): State<Arc<S>>,
  Json(draft): Json<E::Draft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: Repository<E>,
  E: Entity,
{
  let record = store.create(draft).await?;
  Ok((StatusCode::CREATED, Json(record)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /{kind}/{id}`
pub async fn get_one<S, E>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<E>, ApiError>
where
  S: Repository<E>,
  E: Entity,
{
  Ok(Json(store.get(id).await?))
}

// ─── Patch ────────────────────────────────────────────────────────────────────

/// `PATCH /{kind}/{id}`: only the fields present in the body change.
pub async fn patch_one<S, E>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(patch): Json<E::Patch>,
) -> Result<Json<E>, ApiError>
where
  S: Repository<E>,
  E: Entity,
{
  Ok(Json(store.patch(id, patch).await?))
}

// ─── Replace ──────────────────────────────────────────────────────────────────

/// `PUT /{kind}/{id}`
pub async fn replace_one<S, E>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(draft): Json<E::Draft>,
) -> Result<Json<E>, ApiError>
where
  S: Repository<E>,
  E: Entity,
{
  Ok(Json(store.replace(id, draft).await?))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /{kind}/{id}`: 204 on success.
pub async fn delete_one<S, E>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: Repository<E>,
  E: Entity,
{
  store.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
