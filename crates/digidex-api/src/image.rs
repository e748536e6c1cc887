//! Signed image URLs.
//!
//! [`ImageUrls`] turns a digimon name into a time-limited URL through an
//! [`ImageSigner`]. Signing failures never fail the request: they are logged
//! and the URL degrades to an empty string.
//!
//! [`KeyedUrlSigner`] is the bundled signer. It produces CDN-style links:
//!
//! ```text
//! <base_url>/<key>?Expires=<unix seconds>&Signature=<hex hmac-sha256(secret, key \n expires)>
//! ```

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use digidex_core::image::{ImageSigner, SignError, object_key};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Default lifetime of a signed image URL.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

// ─── URL building ────────────────────────────────────────────────────────────

/// The signer plus the expiry handed to it for every URL.
#[derive(Clone)]
pub struct ImageUrls {
  signer: Arc<dyn ImageSigner>,
  ttl:    Duration,
}

impl ImageUrls {
  pub fn new(signer: Arc<dyn ImageSigner>, ttl: Duration) -> Self {
    Self { signer, ttl }
  }

  /// Signed URL for a digimon's thumbnail or full image, or `""` on failure.
  pub fn build(&self, digimon_name: &str, thumbnail: bool) -> String {
    build_image_url(self.signer.as_ref(), self.ttl, digimon_name, thumbnail)
  }
}

pub fn build_image_url(
  signer: &dyn ImageSigner,
  ttl: Duration,
  digimon_name: &str,
  thumbnail: bool,
) -> String {
  let key = object_key(digimon_name, thumbnail);
  match signer.presign(&key, ttl) {
    Ok(url) => url,
    Err(e) => {
      tracing::error!(error = %e, %key, "failed to sign image url");
      String::new()
    }
  }
}

// ─── Keyed signer ────────────────────────────────────────────────────────────

/// Signs object keys with a shared secret known to the image CDN.
///
/// Without a non-empty secret or a base URL every call fails with
/// [`SignError::NotConfigured`].
#[derive(Clone)]
pub struct KeyedUrlSigner {
  base_url: String,
  secret:   Option<String>,
}

impl KeyedUrlSigner {
  pub fn new(base_url: impl Into<String>, secret: Option<String>) -> Self {
    Self {
      base_url: base_url.into().trim_end_matches('/').to_owned(),
      secret,
    }
  }

  /// Sign `key` with an absolute expiry (unix seconds).
  pub fn sign_until(&self, key: &str, expires: i64) -> Result<String, SignError> {
    let secret = self
      .secret
      .as_deref()
      .filter(|secret| !secret.is_empty() && !self.base_url.is_empty())
      .ok_or(SignError::NotConfigured)?;

    if key.is_empty() || key.starts_with('/') || key.split('/').any(|s| s == "..") {
      return Err(SignError::InvalidKey(key.to_owned()));
    }

    let signature = sign_message(secret, key, expires)?;

    let path = key
      .split('/')
      .map(|segment| urlencoding::encode(segment).into_owned())
      .collect::<Vec<_>>()
      .join("/");

    Ok(format!(
      "{}/{path}?Expires={expires}&Signature={signature}",
      self.base_url
    ))
  }
}

/// Hex HMAC-SHA256 of `key \n expires` under `secret`.
fn sign_message(secret: &str, key: &str, expires: i64) -> Result<String, SignError> {
  let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
    .map_err(|e| SignError::Service(e.to_string()))?;
  mac.update(key.as_bytes());
  mac.update(b"\n");
  mac.update(expires.to_string().as_bytes());
  Ok(hex::encode(mac.finalize().into_bytes()))
}

impl ImageSigner for KeyedUrlSigner {
  fn presign(&self, key: &str, expires_in: Duration) -> Result<String, SignError> {
    let ttl = i64::try_from(expires_in.as_secs()).unwrap_or(i64::MAX);
    self.sign_until(key, Utc::now().timestamp().saturating_add(ttl))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  struct FailingSigner;

  impl ImageSigner for FailingSigner {
    fn presign(&self, _key: &str, _expires_in: Duration) -> Result<String, SignError> {
      Err(SignError::Service("bucket unreachable".into()))
    }
  }

  fn signer() -> KeyedUrlSigner {
    KeyedUrlSigner::new("https://images.example.com/", Some("s3cret".into()))
  }

  #[test]
  fn signature_is_deterministic_for_a_fixed_expiry() {
    let a = signer().sign_until("digimon-image/Agumon.png", 1_700_000_000).unwrap();
    let b = signer().sign_until("digimon-image/Agumon.png", 1_700_000_000).unwrap();
    assert_eq!(a, b);
    assert!(a.starts_with("https://images.example.com/digimon-image/Agumon.png?Expires=1700000000&Signature="));

    let other = signer().sign_until("digimon-image/Agumon.png", 1_700_000_001).unwrap();
    assert_ne!(a, other);
  }

  #[test]
  fn signature_depends_on_secret() {
    let other = KeyedUrlSigner::new("https://images.example.com", Some("other".into()));
    assert_ne!(
      signer().sign_until("k.png", 1).unwrap(),
      other.sign_until("k.png", 1).unwrap()
    );
  }

  #[test]
  fn key_segments_are_percent_encoded() {
    let url = signer().sign_until("digimon-image/Agumon (2006).png", 1).unwrap();
    assert!(url.contains("/digimon-image/Agumon%20%282006%29.png?"), "{url}");
  }

  #[test]
  fn unconfigured_signer_fails() {
    let no_secret = KeyedUrlSigner::new("https://images.example.com", None);
    assert!(matches!(no_secret.sign_until("a.png", 1), Err(SignError::NotConfigured)));

    let no_base = KeyedUrlSigner::new("", Some("s3cret".into()));
    assert!(matches!(no_base.sign_until("a.png", 1), Err(SignError::NotConfigured)));
  }

  #[test]
  fn empty_secret_is_not_configured() {
    let empty = KeyedUrlSigner::new("https://images.example.com", Some(String::new()));
    assert!(matches!(
      empty.sign_until("digimon-image/Agumon.png", 1),
      Err(SignError::NotConfigured)
    ));
    assert!(matches!(
      empty.presign("digimon-image/Agumon.png", DEFAULT_TTL),
      Err(SignError::NotConfigured)
    ));
  }

  #[test]
  fn signature_is_hmac_of_key_and_expiry() {
    let url = signer().sign_until("digimon-image/Agumon.png", 1_700_000_000).unwrap();

    let mut mac = HmacSha256::new_from_slice(b"s3cret").unwrap();
    mac.update(b"digimon-image/Agumon.png\n1700000000");
    let expected = hex::encode(mac.finalize().into_bytes());
    assert!(url.ends_with(&format!("&Signature={expected}")), "{url}");

    // Differs from a plain hash of the secret-prefixed message.
    use sha2::Digest as _;
    let prefixed = hex::encode(Sha256::digest(b"s3cret\ndigimon-image/Agumon.png\n1700000000"));
    assert!(!url.contains(&prefixed));
  }

  #[test]
  fn traversal_keys_are_rejected() {
    assert!(matches!(
      signer().sign_until("../secrets.png", 1),
      Err(SignError::InvalidKey(_))
    ));
  }

  #[test]
  fn presign_expires_after_ttl() {
    let before = Utc::now().timestamp();
    let url = signer()
      .presign("digimon-thumbnail/Agumon.png", Duration::from_secs(60))
      .unwrap();
    let expires: i64 = url
      .split("Expires=")
      .nth(1)
      .and_then(|rest| rest.split('&').next())
      .and_then(|v| v.parse().ok())
      .unwrap();
    assert!(expires >= before + 60 && expires <= Utc::now().timestamp() + 60);
  }

  #[test]
  fn build_maps_name_to_thumbnail_key() {
    let urls = ImageUrls::new(Arc::new(signer()), DEFAULT_TTL);
    let url = urls.build("Agumon X", true);
    assert!(url.starts_with("https://images.example.com/digimon-thumbnail/Agumon_X.png?"), "{url}");
  }

  #[test]
  fn signing_failure_degrades_to_empty_string() {
    assert_eq!(build_image_url(&FailingSigner, DEFAULT_TTL, "Agumon X", true), "");
  }
}
