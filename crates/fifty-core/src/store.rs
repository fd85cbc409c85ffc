//! The `ItemStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `fifty-store-sqlite`).
//! The scheduler and the driver binary depend on this abstraction, not on any
//! concrete backend. All operations are synchronous and blocking; the engine
//! serves one interactive session at a time.

use crate::item::{Item, Mode};

/// Abstraction over the durable table of (state, mode) scheduling rows.
///
/// Every keyed mutation must affect exactly the one matching row. A mutation
/// that matches no row signals a seed-consistency failure and must surface as
/// the backend's error, never as a silent no-op.
pub trait ItemStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert a row with `ef = 2.5`, `reps = 0`, `next_due = NULL` for every
  /// (name, mode) pair not already present. Idempotent: existing rows keep
  /// their learning history untouched, so this is safe on every startup.
  fn ensure_seeded(&self, names: &[&str]) -> Result<(), Self::Error>;

  /// Pick one item whose `next_due` is unset or has passed, uniformly at
  /// random over all such rows. `None` when nothing is due.
  fn select_due_candidate(&self) -> Result<Option<Item>, Self::Error>;

  /// Read back a single row. `None` if the pair was never seeded.
  fn fetch_item(&self, name: &str, mode: Mode) -> Result<Option<Item>, Self::Error>;

  /// Reset the repetition count to 1; the easiness factor is left alone.
  fn apply_lapse(&self, name: &str, mode: Mode) -> Result<(), Self::Error>;

  /// Increment the repetition count and replace the easiness factor.
  fn apply_success(&self, name: &str, mode: Mode, new_ef: f64) -> Result<(), Self::Error>;

  /// Clear `next_due`, making the item immediately eligible again.
  fn clear_due_date(&self, name: &str, mode: Mode) -> Result<(), Self::Error>;

  /// Set `next_due` to now plus `days` (fractional days allowed).
  fn schedule_due_in(&self, name: &str, mode: Mode, days: f64) -> Result<(), Self::Error>;
}
