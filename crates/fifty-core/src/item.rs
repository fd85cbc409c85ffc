//! Item types — the unit of learning and its selection-time snapshot.
//!
//! Each state contributes two independently scheduled items, one per
//! [`Mode`]. Scheduling state is mutated only through the store operations;
//! the scheduler itself works on value snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Easiness factor assigned to a freshly seeded item.
pub const INITIAL_EF: f64 = 2.5;

/// Floor below which an easiness factor never drops.
pub const MIN_EF: f64 = 1.3;

// ─── Mode ────────────────────────────────────────────────────────────────────

/// The two learning tasks for each state.
///
/// A state carries two separate learning histories: pointing to it on the
/// map, and recalling its name when it is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
  /// "Point to this state on the map."
  Position,
  /// "Name this highlighted state."
  Name,
}

impl Mode {
  pub const ALL: [Mode; 2] = [Mode::Position, Mode::Name];
}

impl std::fmt::Display for Mode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Mode::Position => write!(f, "position"),
      Mode::Name => write!(f, "name"),
    }
  }
}

// ─── Items ───────────────────────────────────────────────────────────────────

/// A persistent scheduling row. Exactly one exists per (state, mode) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
  pub name:             String,
  pub mode:             Mode,
  /// Per-item difficulty multiplier; higher means easier / longer intervals.
  pub easiness_factor:  f64,
  /// Consecutive successful recalls since the last lapse.
  pub repetition_count: u32,
  /// Earliest time this item may be selected again; `None` means due now.
  pub next_due:         Option<DateTime<Utc>>,
}

/// Snapshot of an item at selection time.
///
/// Carries copies of the scheduling fields rather than a handle into the
/// store. [`Scheduler::update`](crate::Scheduler::update) computes the new
/// scheduling values from this snapshot, so a stale snapshot means a stale
/// reschedule — calls must stay sequential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveItem {
  pub name:             String,
  pub mode:             Mode,
  pub easiness_factor:  f64,
  pub repetition_count: u32,
}

impl From<Item> for ActiveItem {
  fn from(item: Item) -> Self {
    Self {
      name:             item.name,
      mode:             item.mode,
      easiness_factor:  item.easiness_factor,
      repetition_count: item.repetition_count,
    }
  }
}
