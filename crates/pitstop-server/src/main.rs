//! pitstop server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens an
//! in-process SQLite store, seeds the fixed role set, and serves the JSON
//! API plus the root-level proxy endpoints over HTTP.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use pitstop_api::AppState;
use pitstop_client::{CatalogClient, NhtsaClient, PeopleClient};
use pitstop_core::{auth::SEED_ROLES, store::AuthStore as _};
use pitstop_store_sqlite::SqliteStore;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "pitstop point-of-sale server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

/// Runtime server configuration, deserialised from `config.toml` layered
/// with `PITSTOP_`-prefixed environment variables.
#[derive(Deserialize, Clone)]
struct ServerConfig {
  #[serde(default = "default_host")]
  host:       String,
  #[serde(default = "default_port")]
  port:       u16,
  #[serde(default = "default_store_path")]
  store_path: PathBuf,

  /// Base URLs for the sibling services the proxy endpoints call. When the
  /// platform runs as a single process these point back at this server.
  #[serde(default = "default_self_url")]
  people_base_url:  String,
  #[serde(default = "default_self_url")]
  catalog_base_url: String,

  #[serde(default = "default_nhtsa_url")]
  nhtsa_base_url: String,

  /// Taxonomy rows older than this many hours are refetched on refresh.
  #[serde(default = "default_refresh_hours")]
  refresh_max_age_hours: i64,
  /// Lifetime of tokens issued at login, in minutes.
  #[serde(default = "default_token_minutes")]
  token_ttl_minutes: i64,
}

fn default_host() -> String { "127.0.0.1".to_owned() }
fn default_port() -> u16 { 8080 }
fn default_store_path() -> PathBuf { PathBuf::from("pitstop.db") }
fn default_self_url() -> String { "http://127.0.0.1:8080".to_owned() }
fn default_nhtsa_url() -> String {
  pitstop_client::NHTSA_DEFAULT_BASE_URL.to_owned()
}
fn default_refresh_hours() -> i64 { 24 }
fn default_token_minutes() -> i64 { 60 }

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("PITSTOP"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Open SQLite store.
  let store_path = expand_tilde(&server_cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // Seed the fixed role set; idempotent, so safe on every start.
  store
    .seed_roles(&SEED_ROLES)
    .await
    .context("failed to seed roles")?;

  // Build application state.
  let state = AppState {
    store,
    nhtsa: NhtsaClient::new(&server_cfg.nhtsa_base_url)
      .context("failed to build NHTSA client")?,
    people: PeopleClient::new(&server_cfg.people_base_url)
      .context("failed to build people client")?,
    catalog: CatalogClient::new(&server_cfg.catalog_base_url)
      .context("failed to build catalog client")?,
    refresh_max_age: chrono::Duration::hours(server_cfg.refresh_max_age_hours),
    token_ttl: chrono::Duration::minutes(server_cfg.token_ttl_minutes),
  };

  let app = axum::Router::new()
    .nest("/api", pitstop_api::api_router(state.clone()))
    .merge(pitstop_api::proxy_router(state))
    .layer(TraceLayer::new_for_http());

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
