//! Image object keys and the signed-URL issuer seam.
//!
//! Images live in blob storage under a key derived from the digimon name.
//! The API never hands out raw object URLs; it asks an [`ImageSigner`] for a
//! time-limited one.

use std::time::Duration;

use thiserror::Error;

const THUMBNAIL_PREFIX: &str = "digimon-thumbnail";
const FULL_IMAGE_PREFIX: &str = "digimon-image";

/// Storage key for a digimon's image: spaces become underscores.
///
/// `object_key("Agumon X", true) == "digimon-thumbnail/Agumon_X.png"`
pub fn object_key(digimon_name: &str, thumbnail: bool) -> String {
  let prefix = if thumbnail { THUMBNAIL_PREFIX } else { FULL_IMAGE_PREFIX };
  format!("{prefix}/{}.png", digimon_name.replace(' ', "_"))
}

#[derive(Debug, Error)]
pub enum SignError {
  #[error("image signing is not configured")]
  NotConfigured,

  #[error("invalid object key: {0:?}")]
  InvalidKey(String),

  #[error("signing service error: {0}")]
  Service(String),
}

/// Issues time-limited URLs for objects in the image bucket.
pub trait ImageSigner: Send + Sync {
  fn presign(&self, key: &str, expires_in: Duration) -> Result<String, SignError>;
}
