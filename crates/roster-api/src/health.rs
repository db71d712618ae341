//! Handlers for `GET /health` and `GET /health/{path_echo}`.
//!
//! Diagnostic only: nothing here touches the store.

use std::net::IpAddr;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct Health {
  pub status:         u16,
  pub status_message: String,
  /// RFC 3339, UTC, `Z` suffix.
  pub timestamp:      String,
  pub ip_address:     String,
  pub echo:           Option<String>,
  pub path_echo:      Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EchoParams {
  pub echo: Option<String>,
}

/// `GET /health[?echo=...]`
pub async fn handler(
  State(host): State<IpAddr>,
  Query(params): Query<EchoParams>,
) -> Json<Health> {
  Json(report(host, params.echo, None))
}

/// `GET /health/{path_echo}[?echo=...]`
pub async fn with_path(
  State(host): State<IpAddr>,
  Path(path_echo): Path<String>,
  Query(params): Query<EchoParams>,
) -> Json<Health> {
  Json(report(host, params.echo, Some(path_echo)))
}

fn report(host: IpAddr, echo: Option<String>, path_echo: Option<String>) -> Health {
  Health {
    status:         200,
    status_message: "OK".to_owned(),
    timestamp:      Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
    ip_address:     host.to_string(),
    echo,
    path_echo,
  }
}
