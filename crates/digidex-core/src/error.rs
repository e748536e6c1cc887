//! Error types for `digidex-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{field} must be a positive integer, got {value}")]
  InvalidPage { field: &'static str, value: i64 },

  #[error("page_size {requested} exceeds the maximum of {max}")]
  PageSizeTooLarge { requested: u32, max: u32 },

  #[error("{field} {value} is out of range, the largest accepted value is {max}")]
  OutOfRange { field: &'static str, value: i64, max: u32 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
