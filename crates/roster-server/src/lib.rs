//! HTTP server assembly for Roster.
//!
//! Wraps [`roster_api::api_router`] with the service root, request tracing and
//! the configuration the binary reads at startup.

use std::{
  net::{IpAddr, Ipv4Addr, Ipv6Addr},
  path::Path,
  sync::Arc,
};

use axum::{Json, Router, routing::get};
use roster_core::store::RosterStore;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  /// Address reported by `/health`. Defaults to [`host_address`].
  pub advertised_ip: Option<IpAddr>,
}

impl ServerConfig {
  /// Defaults, then the TOML file at `path` if it exists, then `ROSTER_*`
  /// environment variables.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 8000)?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("ROSTER").try_parsing(true))
      .build()?
      .try_deserialize()
  }
}

// ─── Host address ─────────────────────────────────────────────────────────────

/// The address `/health` reports when none is configured.
///
/// A concrete `bound` address is returned as is. For a wildcard bind the
/// machine's hostname is resolved instead, and loopback is the last resort.
pub async fn host_address(bound: IpAddr) -> IpAddr {
  if !bound.is_unspecified() {
    return bound;
  }

  let resolved = match hostname::get() {
    Ok(name) => {
      let name = name.to_string_lossy().into_owned();
      match tokio::net::lookup_host(format!("{name}:0")).await {
        Ok(addrs) => addrs.map(|a| a.ip()).collect(),
        Err(e) => {
          tracing::warn!(hostname = %name, "failed to resolve hostname: {e}");
          Vec::new()
        }
      }
    }
    Err(e) => {
      tracing::warn!("failed to read hostname: {e}");
      Vec::new()
    }
  };

  pick_host_address(resolved, bound)
}

/// Prefer a non-loopback address of the same family as `bound`, then any
/// resolved address, then loopback.
fn pick_host_address(resolved: Vec<IpAddr>, bound: IpAddr) -> IpAddr {
  let usable = |ip: &&IpAddr| !ip.is_unspecified();
  resolved
    .iter()
    .filter(usable)
    .find(|ip| !ip.is_loopback() && ip.is_ipv4() == bound.is_ipv4())
    .or_else(|| resolved.iter().filter(usable).find(|ip| !ip.is_loopback()))
    .or_else(|| resolved.iter().find(usable))
    .copied()
    .unwrap_or(match bound {
      IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
      IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::LOCALHOST),
    })
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `store`.
pub fn router<S>(store: Arc<S>, host: IpAddr) -> Router
where
  S: RosterStore + 'static,
{
  Router::new()
    .route("/", get(root))
    .merge(roster_api::api_router(store, host))
    .layer(TraceLayer::new_for_http())
}

async fn root() -> Json<Value> {
  Json(json!({
    "message": "Welcome to the Person/Address/Club/Player API."
  }))
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use roster_store_memory::MemoryStore;
  use tower::ServiceExt as _;
  use uuid::Uuid;

  fn app() -> Router {
    router(
      Arc::new(MemoryStore::new()),
      IpAddr::V4(Ipv4Addr::LOCALHOST),
    )
  }

  async fn send(
    app:    &Router,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = app
      .clone()
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();

    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let json = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
  }

  fn galatasaray() -> Value {
    json!({ "city": "Istanbul", "name": "Galatasaray", "country": "Turkey" })
  }

  fn messi(club_id: Option<&str>) -> Value {
    json!({
      "first_name": "Lionel",
      "last_name":  "Messi",
      "position":   "Center Forward",
      "birth_date": "1987-06-24",
      "club_id":    club_id,
    })
  }

  fn person(uni: &str, cities: &[&str]) -> Value {
    let addresses: Vec<Value> = cities
      .iter()
      .map(|city| {
        json!({
          "street":      "116th St & Broadway",
          "city":        city,
          "state":       "NY",
          "postal_code": "10027",
          "country":     "USA",
        })
      })
      .collect();
    json!({
      "first_name": "Ada",
      "last_name":  "Lovelace",
      "uni":        uni,
      "email":      format!("{uni}@columbia.edu"),
      "phone":      "+1-212-555-0199",
      "birth_date": "1815-12-10",
      "addresses":  addresses,
    })
  }

  // ── Configuration ───────────────────────────────────────────────────────────

  #[test]
  fn config_defaults_apply_without_a_file() {
    let cfg = ServerConfig::load(Path::new("no-such-roster-config.toml")).unwrap();
    assert_eq!(cfg.host, "0.0.0.0");
    assert_eq!(cfg.port, 8000);
    assert!(cfg.advertised_ip.is_none());
  }

  // ── Host address ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn concrete_bind_address_is_reported_as_is() {
    let bound = IpAddr::V4(Ipv4Addr::new(10, 1, 2, 3));
    assert_eq!(host_address(bound).await, bound);
  }

  #[tokio::test]
  async fn wildcard_bind_never_reports_unspecified() {
    let ip = host_address(IpAddr::V4(Ipv4Addr::UNSPECIFIED)).await;
    assert!(!ip.is_unspecified());
  }

  #[test]
  fn resolved_address_prefers_non_loopback_of_bound_family() {
    let lan = IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20));
    let v6 = IpAddr::V6("fd00::20".parse().unwrap());
    let resolved = vec![IpAddr::V4(Ipv4Addr::new(127, 0, 1, 1)), v6, lan];

    let bound = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
    assert_eq!(pick_host_address(resolved, bound), lan);
  }

  #[test]
  fn loopback_only_resolution_is_kept() {
    let loopback = IpAddr::V4(Ipv4Addr::new(127, 0, 1, 1));
    let bound = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
    assert_eq!(pick_host_address(vec![loopback], bound), loopback);
  }

  #[test]
  fn failed_resolution_falls_back_to_loopback() {
    let bound = IpAddr::V6(Ipv6Addr::UNSPECIFIED);
    assert_eq!(
      pick_host_address(Vec::new(), bound),
      IpAddr::V6(Ipv6Addr::LOCALHOST)
    );
  }

  // ── Root / health ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn root_returns_welcome() {
    let (status, body) = send(&app(), "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("Welcome"));
  }

  #[tokio::test]
  async fn health_echoes_query() {
    let (status, body) = send(&app(), "GET", "/health?echo=hello", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 200);
    assert_eq!(body["status_message"], "OK");
    assert_eq!(body["ip_address"], "127.0.0.1");
    assert_eq!(body["echo"], "hello");
    assert!(body["path_echo"].is_null());
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
  }

  #[tokio::test]
  async fn health_echoes_path() {
    let (status, body) = send(&app(), "GET", "/health/ping", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["path_echo"], "ping");
    assert!(body["echo"].is_null());
  }

  // ── Create ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_returns_201_with_timestamps() {
    let (status, club) = send(&app(), "POST", "/clubs", Some(galatasaray())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(Uuid::parse_str(club["id"].as_str().unwrap()).is_ok());
    assert_eq!(club["created_at"], club["updated_at"]);
  }

  #[tokio::test]
  async fn duplicate_id_returns_409() {
    let app = app();
    let id = Uuid::new_v4().to_string();
    let mut body = galatasaray();
    body["id"] = json!(id);

    let (status, _) = send(&app, "POST", "/clubs", Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, err) = send(&app, "POST", "/clubs", Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(err["error"].as_str().unwrap().contains(&id));
  }

  #[tokio::test]
  async fn player_with_missing_club_returns_400() {
    let app = app();
    let ghost = Uuid::new_v4().to_string();

    let (status, err) =
      send(&app, "POST", "/players", Some(messi(Some(ghost.as_str())))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["error"].is_string());

    let (_, players) = send(&app, "GET", "/players", None).await;
    assert_eq!(players, json!([]));
  }

  // ── Read / delete ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn missing_records_return_404() {
    let app = app();
    let id = Uuid::new_v4();

    let (status, _) = send(&app, "GET", &format!("/persons/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &format!("/addresses/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
      &app,
      "PATCH",
      &format!("/clubs/{id}"),
      Some(json!({ "name": "Nobody" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn malformed_id_is_a_client_error() {
    let (status, _) = send(&app(), "GET", "/players/not-a-uuid", None).await;
    assert!(status.is_client_error());
  }

  #[tokio::test]
  async fn delete_returns_204_then_404() {
    let app = app();
    let (_, club) = send(&app, "POST", "/clubs", Some(galatasaray())).await;
    let uri = format!("/clubs/{}", club["id"].as_str().unwrap());

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── List ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_persons_filters_by_address_city() {
    let app = app();
    send(&app, "POST", "/persons", Some(person("al1", &["Paris", "New York"]))).await;
    send(&app, "POST", "/persons", Some(person("al2", &["Rome"]))).await;
    send(&app, "POST", "/persons", Some(person("al3", &[]))).await;

    let (status, all) = send(&app, "GET", "/persons", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, hits) = send(&app, "GET", "/persons?city=New%20York", None).await;
    let hits = hits.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["uni"], "al1");

    let (_, hits) = send(&app, "GET", "/persons?city=Rome&uni=al1", None).await;
    assert_eq!(hits, json!([]));

    let (_, hits) = send(&app, "GET", "/persons?birth_date=1815-12-10", None).await;
    assert_eq!(hits.as_array().unwrap().len(), 3);
  }

  // ── Patch / replace ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn patch_with_null_required_field_is_rejected() {
    let app = app();
    let (_, club) = send(&app, "POST", "/clubs", Some(galatasaray())).await;
    let uri = format!("/clubs/{}", club["id"].as_str().unwrap());

    let (status, _) = send(&app, "PATCH", &uri, Some(json!({ "name": null }))).await;
    assert!(status.is_client_error());

    let (_, stored) = send(&app, "GET", &uri, None).await;
    assert_eq!(stored, club);
  }

  #[tokio::test]
  async fn put_uses_path_id_and_keeps_created_at() {
    let app = app();
    let (_, club) = send(&app, "POST", "/clubs", Some(galatasaray())).await;
    let id = club["id"].as_str().unwrap();

    let body = json!({
      "id": Uuid::new_v4().to_string(),
      "city": "Istanbul",
      "name": "Fenerbahce",
      "country": "Turkey",
    });
    let (status, replaced) = send(&app, "PUT", &format!("/clubs/{id}"), Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["id"], id);
    assert_eq!(replaced["name"], "Fenerbahce");
    assert_eq!(replaced["created_at"], club["created_at"]);
    assert_ne!(replaced["updated_at"], club["updated_at"]);
  }

  #[tokio::test]
  async fn put_on_missing_record_returns_404() {
    let uri = format!("/clubs/{}", Uuid::new_v4());
    let (status, _) = send(&app(), "PUT", &uri, Some(galatasaray())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Club roster ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn club_players_lists_members() {
    let app = app();
    let (_, club) = send(&app, "POST", "/clubs", Some(galatasaray())).await;
    let club_id = club["id"].as_str().unwrap();

    send(&app, "POST", "/players", Some(messi(Some(club_id)))).await;
    send(&app, "POST", "/players", Some(messi(None))).await;

    let (status, roster) =
      send(&app, "GET", &format!("/clubs/{club_id}/players"), None).await;
    assert_eq!(status, StatusCode::OK);
    let roster = roster.as_array().unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0]["club_id"], club_id);

    let (status, _) =
      send(&app, "GET", &format!("/clubs/{}/players", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── Scenario ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn club_player_lifecycle_leaves_dangling_reference() {
    let app = app();

    let (status, club) = send(&app, "POST", "/clubs", Some(galatasaray())).await;
    assert_eq!(status, StatusCode::CREATED);
    let club_id = club["id"].as_str().unwrap().to_owned();

    let (status, player) =
      send(&app, "POST", "/players", Some(messi(Some(club_id.as_str())))).await;
    assert_eq!(status, StatusCode::CREATED);
    let player_uri = format!("/players/{}", player["id"].as_str().unwrap());

    let (status, patched) = send(
      &app,
      "PATCH",
      &player_uri,
      Some(json!({ "position": "Winger" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["position"], "Winger");
    assert_eq!(patched["last_name"], "Messi");
    assert_eq!(patched["birth_date"], "1987-06-24");
    assert_ne!(patched["updated_at"], player["updated_at"]);

    let (status, _) = send(&app, "DELETE", &format!("/clubs/{club_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // No cascade: the player still points at the deleted club.
    let (status, after) = send(&app, "GET", &player_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["club_id"], club_id.as_str());
    assert_eq!(after["position"], "Winger");
  }
}
