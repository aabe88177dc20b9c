//! The per-logger stage stack.

use std::time::{Duration, Instant};

use super::{clock, since};
use crate::error::{Error, NameKind, Result};
use crate::registry::MAX_IDS;

#[derive(Debug, Clone, Copy)]
struct Frame {
    id: usize,
    pushed_at: Option<Instant>,
}

#[derive(Debug, Clone, Copy, Default)]
struct StageTotals {
    elapsed: Duration,
    calls: u64,
    open: usize,
}

/// LIFO of active stage ids.
///
/// `pop` is positional: it removes the most recent push whatever its id. The
/// same id may sit on the stack more than once; only its outermost frame
/// contributes wall time, so self-nesting never counts an interval twice.
#[derive(Debug, Clone)]
pub struct StageStack {
    frames: Vec<Frame>,
    totals: Vec<StageTotals>,
    timing: bool,
}

impl StageStack {
    /// Create an empty stack; `timing` false skips all clock reads.
    pub fn new(timing: bool) -> Self {
        Self {
            frames: Vec::new(),
            totals: Vec::new(),
            timing,
        }
    }

    /// Push `id` on top. Ids at or above [`MAX_IDS`] are rejected.
    pub fn push(&mut self, id: usize) -> Result<()> {
        if id >= MAX_IDS {
            return Err(Error::UnknownId {
                kind: NameKind::Stage,
                id,
            });
        }
        if self.totals.len() <= id {
            self.totals.resize(id + 1, StageTotals::default());
        }
        self.totals[id].open += 1;
        self.frames.push(Frame {
            id,
            pushed_at: clock(self.timing),
        });
        Ok(())
    }

    /// Remove the top frame. Its wall time is folded into the stage's total
    /// only when no other frame of the same stage remains below it.
    pub fn pop(&mut self) -> Result<usize> {
        let frame = self.frames.pop().ok_or(Error::EmptyStack)?;

        // push() sized totals for every id on the stack
        let totals = &mut self.totals[frame.id];
        totals.open -= 1;
        totals.calls += 1;
        if totals.open == 0 {
            totals.elapsed += since(frame.pushed_at);
        }

        Ok(frame.id)
    }

    /// Bottom-to-top copy of the active ids.
    pub fn active_stages(&self) -> Vec<usize> {
        self.frames.iter().map(|f| f.id).collect()
    }

    /// Id of the most recent push, if any.
    pub fn top(&self) -> Option<usize> {
        self.frames.last().map(|f| f.id)
    }

    /// Number of frames on the stack.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// True when no stage is active.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Wall time accumulated by completed outermost pushes of `id`.
    pub fn elapsed(&self, id: usize) -> Duration {
        self.totals.get(id).map(|t| t.elapsed).unwrap_or_default()
    }

    /// Completed push/pop pairs of `id`, nested ones included.
    pub fn calls(&self, id: usize) -> u64 {
        self.totals.get(id).map(|t| t.calls).unwrap_or(0)
    }

    /// Number of frames for `id` currently on the stack.
    pub fn depth_of(&self, id: usize) -> usize {
        self.totals.get(id).map(|t| t.open).unwrap_or(0)
    }
}
