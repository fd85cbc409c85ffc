//! SQLite backend for the fifty scheduling engine.
//!
//! Persists scheduling state in the same `sm2` table layout as the original
//! map trainer, so an existing `sm.sqlite` opens with its learning history
//! intact.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
