//! Stage and event timing.
//!
//! Stages share one LIFO per logger; events keep an independent re-entrant
//! counter per id. The two are deliberately separate structures: events may
//! interleave across ids, which a single shared stack would forbid.

pub mod event;
pub mod stage;

pub use event::EventTimer;
pub use stage::StageStack;

use std::time::{Duration, Instant};

/// Returns `Some(Instant::now())` only when timing is enabled.
#[inline]
pub(crate) fn clock(enabled: bool) -> Option<Instant> {
    if enabled {
        Some(Instant::now())
    } else {
        None
    }
}

#[inline]
pub(crate) fn since(start: Option<Instant>) -> Duration {
    start.map(|s| s.elapsed()).unwrap_or_default()
}
