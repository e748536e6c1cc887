//! Core types and trait definitions for the Digidex catalog.
//!
//! Entities, paging and the [`store::CatalogStore`] contract live here,
//! shared by the SQLite backend and the HTTP layer. No I/O happens in this
//! crate.

#![allow(async_fn_in_trait)]

pub mod digimon;
pub mod error;
pub mod image;
pub mod pagination;
pub mod store;

pub use error::{Error, Result};
