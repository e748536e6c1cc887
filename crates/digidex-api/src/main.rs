//! digidex server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite catalog, and serves the JSON API over HTTP.
//!
//! # Seeding
//!
//! To load a SQL script into the store before serving:
//!
//! ```
//! cargo run -p digidex-api --bin server -- --seed data/sample.sql
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use digidex_api::{
  AppState, ServerConfig,
  image::{ImageUrls, KeyedUrlSigner},
};
use digidex_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Digidex catalog API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// SQL script to run against the store before serving.
  #[arg(long)]
  seed: Option<PathBuf>,
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

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("DIGIDEX"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store_path = expand_tilde(&server_cfg.store_path);

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  if let Some(seed) = &cli.seed {
    store
      .load_script(seed)
      .await
      .with_context(|| format!("failed to load seed script {seed:?}"))?;
    tracing::info!(path = ?seed, "seeded store");
  }

  let secret = server_cfg
    .image_signing_secret
    .clone()
    .filter(|secret| !secret.is_empty());
  if secret.is_none() {
    tracing::warn!("image_signing_secret is unset or empty; image_href will be empty");
  }

  let signer = KeyedUrlSigner::new(server_cfg.image_base_url.clone(), secret);

  let state = AppState {
    store:         Arc::new(store),
    images:        ImageUrls::new(Arc::new(signer), server_cfg.image_url_ttl()),
    max_page_size: server_cfg.max_page_size,
  };

  let app = digidex_api::router(state);
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
