//! Error type for `fifty-store-sqlite`.

use fifty_core::Mode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  /// A keyed operation matched no row: the (name, mode) pair was never
  /// seeded. Signals a data/content mismatch, not a transient fault.
  #[error("no seeded item for {mode} {name:?}")]
  ItemNotSeeded { name: String, mode: Mode },

  #[error("unknown mode discriminant in `type` column: {0}")]
  UnknownMode(i64),

  #[error("column `{column}` holds an out-of-range value: {value}")]
  OutOfRange { column: &'static str, value: i64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
