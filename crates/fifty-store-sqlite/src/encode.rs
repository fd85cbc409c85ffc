//! Column encoding between Rust types and the legacy `sm2` table.

use chrono::{DateTime, TimeZone, Utc};
use fifty_core::{Item, Mode};

use crate::{Error, Result};

/// Integer discriminant stored in the `type` column.
pub fn encode_mode(mode: Mode) -> i64 {
  match mode {
    Mode::Position => 0,
    Mode::Name => 1,
  }
}

pub fn decode_mode(raw: i64) -> Result<Mode> {
  match raw {
    0 => Ok(Mode::Position),
    1 => Ok(Mode::Name),
    other => Err(Error::UnknownMode(other)),
  }
}

/// A row exactly as SQLite hands it back, before decoding.
///
/// `next` is read as a float because the original trainer wrote it via
/// `strftime('%s','now') + days * 86400.0`, which SQLite stores as REAL.
pub struct RawItem {
  pub mode: i64,
  pub name: String,
  pub ef:   f64,
  pub next: Option<f64>,
  pub reps: i64,
}

impl RawItem {
  pub fn into_item(self) -> Result<Item> {
    let next_due = self
      .next
      .map(|raw| {
        Utc
          .timestamp_opt(raw as i64, 0)
          .single()
          .ok_or(Error::OutOfRange { column: "next", value: raw as i64 })
      })
      .transpose()?;

    let repetition_count = u32::try_from(self.reps)
      .map_err(|_| Error::OutOfRange { column: "reps", value: self.reps })?;

    Ok(Item {
      name: self.name,
      mode: decode_mode(self.mode)?,
      easiness_factor: self.ef,
      repetition_count,
      next_due,
    })
  }
}

/// Epoch seconds for a `next` write.
pub fn encode_epoch(at: DateTime<Utc>) -> i64 {
  at.timestamp()
}
