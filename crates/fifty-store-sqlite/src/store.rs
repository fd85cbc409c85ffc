//! [`SqliteStore`] — the SQLite implementation of [`ItemStore`].

use std::{cell::RefCell, path::Path};

use chrono::Utc;
use rand::{Rng as _, SeedableRng as _, rngs::StdRng};
use rusqlite::{Connection, OptionalExtension as _};
use tracing::debug;

use fifty_core::{
  item::{INITIAL_EF, Item, Mode},
  store::ItemStore,
};

use crate::{
  encode::{RawItem, encode_epoch, encode_mode},
  schema::SCHEMA,
  Error, Result,
};

const ITEM_COLUMNS: &str = "type, item, ef, next, reps";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A scheduling store backed by a single SQLite file.
///
/// Holds one blocking connection; the engine serves a single interactive
/// session, so no pooling or locking is involved.
pub struct SqliteStore {
  conn: Connection,
  rng:  RefCell<StdRng>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    Self::from_connection(Connection::open(path)?)
  }

  /// Open an in-memory store — useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    Self::from_connection(Connection::open_in_memory()?)
  }

  /// Replace the selection RNG with a seeded one, for deterministic tests.
  pub fn with_rng_seed(self, seed: u64) -> Self {
    Self {
      rng: RefCell::new(StdRng::seed_from_u64(seed)),
      ..self
    }
  }

  fn from_connection(conn: Connection) -> Result<Self> {
    conn.execute_batch(SCHEMA)?;
    Ok(Self {
      conn,
      rng: RefCell::new(StdRng::from_entropy()),
    })
  }

  /// Total number of scheduling rows.
  pub fn item_count(&self) -> Result<usize> {
    let n: i64 = self
      .conn
      .query_row("SELECT COUNT(*) FROM sm2", [], |r| r.get(0))?;
    Ok(n as usize)
  }

  /// Run a keyed UPDATE and demand that it hit the one matching row.
  fn update_one(
    &self,
    sql: &str,
    params: impl rusqlite::Params,
    name: &str,
    mode: Mode,
  ) -> Result<()> {
    let changed = self.conn.execute(sql, params)?;
    if changed == 0 {
      return Err(Error::ItemNotSeeded { name: name.to_owned(), mode });
    }
    Ok(())
  }

  fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawItem> {
    Ok(RawItem {
      mode: row.get(0)?,
      name: row.get(1)?,
      ef:   row.get(2)?,
      next: row.get(3)?,
      reps: row.get(4)?,
    })
  }
}

// ─── ItemStore impl ──────────────────────────────────────────────────────────

impl ItemStore for SqliteStore {
  type Error = Error;

  fn ensure_seeded(&self, names: &[&str]) -> Result<()> {
    let mut check = self
      .conn
      .prepare("SELECT 1 FROM sm2 WHERE type = ?1 AND item = ?2")?;
    let mut insert = self.conn.prepare(
      "INSERT INTO sm2 (type, item, ef, next, reps) VALUES (?1, ?2, ?3, NULL, 0)",
    )?;

    let mut inserted = 0usize;
    for name in names {
      for mode in Mode::ALL {
        let present: Option<i64> = check
          .query_row(rusqlite::params![encode_mode(mode), name], |r| r.get(0))
          .optional()?;
        if present.is_none() {
          insert.execute(rusqlite::params![encode_mode(mode), name, INITIAL_EF])?;
          inserted += 1;
        }
      }
    }

    if inserted > 0 {
      debug!(inserted, "seeded new items");
    }
    Ok(())
  }

  fn select_due_candidate(&self) -> Result<Option<Item>> {
    let now = encode_epoch(Utc::now());

    let mut stmt = self.conn.prepare(&format!(
      "SELECT {ITEM_COLUMNS} FROM sm2 WHERE next IS NULL OR next <= ?1"
    ))?;
    let mut due = stmt
      .query_map(rusqlite::params![now], Self::read_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    if due.is_empty() {
      return Ok(None);
    }

    // Explicit uniform sample over the due set rather than ORDER BY RANDOM(),
    // so the RNG can be seeded in tests.
    let picked = self.rng.borrow_mut().gen_range(0..due.len());
    due.swap_remove(picked).into_item().map(Some)
  }

  fn fetch_item(&self, name: &str, mode: Mode) -> Result<Option<Item>> {
    let raw: Option<RawItem> = self
      .conn
      .query_row(
        &format!("SELECT {ITEM_COLUMNS} FROM sm2 WHERE type = ?1 AND item = ?2"),
        rusqlite::params![encode_mode(mode), name],
        Self::read_row,
      )
      .optional()?;

    raw.map(RawItem::into_item).transpose()
  }

  fn apply_lapse(&self, name: &str, mode: Mode) -> Result<()> {
    self.update_one(
      "UPDATE sm2 SET reps = 1 WHERE type = ?1 AND item = ?2",
      rusqlite::params![encode_mode(mode), name],
      name,
      mode,
    )
  }

  fn apply_success(&self, name: &str, mode: Mode, new_ef: f64) -> Result<()> {
    self.update_one(
      "UPDATE sm2 SET reps = reps + 1, ef = ?3 WHERE type = ?1 AND item = ?2",
      rusqlite::params![encode_mode(mode), name, new_ef],
      name,
      mode,
    )
  }

  fn clear_due_date(&self, name: &str, mode: Mode) -> Result<()> {
    self.update_one(
      "UPDATE sm2 SET next = NULL WHERE type = ?1 AND item = ?2",
      rusqlite::params![encode_mode(mode), name],
      name,
      mode,
    )
  }

  fn schedule_due_in(&self, name: &str, mode: Mode, days: f64) -> Result<()> {
    let next = (encode_epoch(Utc::now()) as f64 + days * 86_400.0) as i64;
    self.update_one(
      "UPDATE sm2 SET next = ?3 WHERE type = ?1 AND item = ?2",
      rusqlite::params![encode_mode(mode), name, next],
      name,
      mode,
    )
  }
}
