//! ritual API server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! SQLite store, and serves the JSON API. Any setting can be overridden
//! with a `RITUAL_`-prefixed environment variable, e.g. `RITUAL_PORT`.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use ritual_api::{AppState, ServerConfig, router};
use ritual_core::calendar::Calendar;
use ritual_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "ritual habit-tracking API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

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

  // Load configuration; the file is optional, defaults cover local use.
  let settings = config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 7171)?
    .set_default("store_path", "ritual.db")?
    .set_default("timezone", "America/Los_Angeles")?
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("RITUAL"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // The reference timezone fixes every user's day boundaries.
  let calendar = Calendar::from_zone_name(&server_cfg.timezone)
    .with_context(|| format!("bad timezone {:?}", server_cfg.timezone))?;

  let store = SqliteStore::open(&server_cfg.store_path)
    .await
    .with_context(|| {
      format!("failed to open store at {}", server_cfg.store_path.display())
    })?;

  let state = AppState { store: Arc::new(store), calendar };
  let app = router(state).layer(TraceLayer::new_for_http());

  let addr = format!("{}:{}", server_cfg.host, server_cfg.port);
  let listener = TcpListener::bind(&addr)
    .await
    .with_context(|| format!("failed to bind {addr}"))?;

  tracing::info!(%addr, zone = %server_cfg.timezone, "ritual API listening");
  axum::serve(listener, app).await?;

  Ok(())
}
