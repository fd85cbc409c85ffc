//! The SM2 scheduler: due-item selection and grading on top of an
//! [`ItemStore`].
//!
//! Implements the SuperMemo-2 variant described at
//! <https://www.supermemo.com/en/archives1990-2015/english/ol/sm2>, with two
//! deliberately different thresholds: a grade below 3 is a lapse (the
//! repetition count resets, the easiness factor is kept), while any grade
//! below 4 puts the item straight back into the due pool even when its
//! easiness factor just improved. Remembering an item and deciding how soon
//! to ask again are separate questions.

use tracing::debug;

use crate::{
  error::Error,
  item::{ActiveItem, MIN_EF},
  store::ItemStore,
};

/// Highest accepted quality score.
pub const MAX_QUALITY: u8 = 5;

/// Grades below this are lapses: the repetition streak resets.
const LAPSE_THRESHOLD: u8 = 3;

/// Grades below this are rescheduled for immediate retraining.
const RESCHEDULE_THRESHOLD: u8 = 4;

/// Selection and grading policy over a backing [`ItemStore`].
pub struct Scheduler<S> {
  store: S,
}

impl<S: ItemStore> Scheduler<S> {
  pub fn new(store: S) -> Self {
    Self { store }
  }

  /// Access to the backing store, e.g. for read-back of scheduling rows.
  pub fn store(&self) -> &S {
    &self.store
  }

  /// Pick the next due item, or `None` when nothing is scheduled for now.
  ///
  /// Read-only: safe to call repeatedly, and before any [`update`].
  ///
  /// [`update`]: Scheduler::update
  pub fn next(&self) -> Result<Option<ActiveItem>, Error<S::Error>> {
    let picked = self.store.select_due_candidate().map_err(Error::Store)?;
    if let Some(item) = &picked {
      debug!(name = %item.name, mode = %item.mode, "selected due item");
    }
    Ok(picked.map(ActiveItem::from))
  }

  /// Grade `item` with a recall quality in `0..=5` and reschedule it.
  ///
  /// Two independent phases, each a single atomic row update:
  ///
  /// - Phase A: below 3 the item lapses (`reps = 1`, easiness untouched);
  ///   otherwise the easiness factor is recomputed, floored at 1.3, and the
  ///   repetition count incremented.
  /// - Phase B: below 4 the due date is cleared for same-day retraining;
  ///   otherwise the next review lands `1` day out on the first success, or
  ///   `6 * ef^(reps - 2)` days out thereafter, both using the values Phase A
  ///   just wrote.
  ///
  /// A store failure aborts the call where it happened; the remaining phase
  /// is not attempted.
  pub fn update(&self, item: &ActiveItem, quality: u8) -> Result<(), Error<S::Error>> {
    if quality > MAX_QUALITY {
      return Err(Error::InvalidQuality(quality));
    }
    let (name, mode) = (item.name.as_str(), item.mode);

    // Phase A: easiness factor and repetition count.
    let (ef, reps) = if quality < LAPSE_THRESHOLD {
      self.store.apply_lapse(name, mode).map_err(Error::Store)?;
      (item.easiness_factor, 1)
    } else {
      let q = f64::from(quality);
      let ef = (item.easiness_factor + 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02))
        .max(MIN_EF);
      self
        .store
        .apply_success(name, mode, ef)
        .map_err(Error::Store)?;
      (ef, item.repetition_count + 1)
    };

    // Phase B: rescheduling, from the values Phase A just persisted.
    if quality < RESCHEDULE_THRESHOLD {
      self.store.clear_due_date(name, mode).map_err(Error::Store)?;
      debug!(name, %mode, quality, "due again immediately");
    } else {
      let days = if reps <= 1 {
        1.0
      } else {
        6.0 * ef.powi(reps as i32 - 2)
      };
      self
        .store
        .schedule_due_in(name, mode, days)
        .map_err(Error::Store)?;
      debug!(name, %mode, quality, days, "rescheduled");
    }

    Ok(())
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
