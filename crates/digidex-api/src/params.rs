//! Query-string helpers shared by the listing handlers.

use serde::{Deserialize, Deserializer, de};

pub(crate) fn default_page() -> i64 { 1 }

/// Accepts `true/false`, `1/0`, `yes/no`, `on/off` in any case, so that
/// page links carrying `True`/`False` can be followed.
pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
  D: Deserializer<'de>,
{
  let Some(raw) = Option::<String>::deserialize(deserializer)? else {
    return Ok(None);
  };
  match raw.to_ascii_lowercase().as_str() {
    "true" | "1" | "yes" | "on" => Ok(Some(true)),
    "false" | "0" | "no" | "off" => Ok(Some(false)),
    _ => Err(de::Error::custom(format!("invalid boolean: {raw:?}"))),
  }
}
