//! Runtime server configuration, deserialised from `config.toml` and
//! `DIGIDEX_*` environment variables.

use std::{path::PathBuf, time::Duration};

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                 String,
  #[serde(default = "default_port")]
  pub port:                 u16,
  #[serde(default = "default_store_path")]
  pub store_path:           PathBuf,
  /// Base URL of the image bucket or CDN in front of it.
  #[serde(default)]
  pub image_base_url:       String,
  /// Image URLs are left empty when this is unset.
  #[serde(default)]
  pub image_signing_secret: Option<String>,
  #[serde(default = "default_image_url_ttl_secs")]
  pub image_url_ttl_secs:   u64,
  /// Upper bound for `page_size`; unbounded when unset.
  #[serde(default)]
  pub max_page_size:        Option<u32>,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8000 }

fn default_store_path() -> PathBuf { PathBuf::from("digidex.db") }

fn default_image_url_ttl_secs() -> u64 { 3600 }

impl ServerConfig {
  pub fn image_url_ttl(&self) -> Duration { Duration::from_secs(self.image_url_ttl_secs) }
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                 default_host(),
      port:                 default_port(),
      store_path:           default_store_path(),
      image_base_url:       String::new(),
      image_signing_secret: None,
      image_url_ttl_secs:   default_image_url_ttl_secs(),
      max_page_size:        None,
    }
  }
}
