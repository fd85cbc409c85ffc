//! Error type for `fifty-core`.

use thiserror::Error;

/// An error raised by the [`Scheduler`](crate::Scheduler), generic over the
/// backing store's own error type.
#[derive(Debug, Error)]
pub enum Error<E>
where
  E: std::error::Error + Send + Sync + 'static,
{
  /// The backing store failed. Fatal to the calling operation; the scheduler
  /// performs no retry and never continues into a later write phase.
  #[error("store error: {0}")]
  Store(#[source] E),

  /// `update` was called with a grade outside `0..=5`. Rejected rather than
  /// clamped: the lapse threshold (3) and the reschedule threshold (4) are
  /// both meaning-sensitive.
  #[error("quality score {0} is outside 0..=5")]
  InvalidQuality(u8),
}

pub type Result<T, E> = std::result::Result<T, Error<E>>;
