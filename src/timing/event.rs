//! Re-entrant per-event timers.

use std::time::{Duration, Instant};

use super::{clock, since};
use crate::error::{Error, NameKind, Result};
use crate::registry::MAX_IDS;

#[derive(Debug, Clone, Copy, Default)]
struct EventState {
    depth: u32,
    started: Option<Instant>,
    total: Duration,
    calls: u64,
}

/// Depth counter and accumulated duration for every event id.
///
/// Only the outermost begin/end pair of an id is timed; inner re-entries just
/// move the depth. Different ids are independent of each other.
#[derive(Debug, Clone)]
pub struct EventTimer {
    states: Vec<EventState>,
    timing: bool,
}

impl EventTimer {
    /// Timer with no open events; `timing` false skips all clock reads.
    pub fn new(timing: bool) -> Self {
        Self {
            states: Vec::new(),
            timing,
        }
    }

    fn state_mut(&mut self, id: usize) -> Result<&mut EventState> {
        if id >= MAX_IDS {
            return Err(Error::UnknownId {
                kind: NameKind::Event,
                id,
            });
        }
        if self.states.len() <= id {
            self.states.resize(id + 1, EventState::default());
        }
        Ok(&mut self.states[id])
    }

    /// Open one level of `id`, starting its clock if it was closed. Ids at or
    /// above [`MAX_IDS`] are rejected.
    pub fn begin(&mut self, id: usize) -> Result<()> {
        let timing = self.timing;
        let state = self.state_mut(id)?;
        if state.depth == 0 {
            state.started = clock(timing);
        }
        state.depth += 1;
        Ok(())
    }

    /// Close one level of `id`. The error carries the id as its name; callers
    /// holding a registry substitute the real one.
    pub fn end(&mut self, id: usize) -> Result<()> {
        let state = match self.states.get_mut(id) {
            Some(s) if s.depth > 0 => s,
            _ => {
                return Err(Error::UnmatchedEnd {
                    name: id.to_string(),
                })
            }
        };

        state.depth -= 1;
        if state.depth == 0 {
            state.total += since(state.started.take());
            state.calls += 1;
        }
        Ok(())
    }

    /// Accumulated time for `id`, including the running interval if the event
    /// is currently open.
    pub fn elapsed(&self, id: usize) -> Duration {
        match self.states.get(id) {
            Some(s) if s.depth > 0 => s.total + since(s.started),
            Some(s) => s.total,
            None => Duration::ZERO,
        }
    }

    /// Open levels of `id`.
    pub fn depth(&self, id: usize) -> u32 {
        self.states.get(id).map(|s| s.depth).unwrap_or(0)
    }

    /// True while `id` has at least one open level.
    pub fn is_active(&self, id: usize) -> bool {
        self.depth(id) > 0
    }

    /// Completed outermost intervals of `id`.
    pub fn calls(&self, id: usize) -> u64 {
        self.states.get(id).map(|s| s.calls).unwrap_or(0)
    }

    /// Ids with non-zero depth, ascending.
    pub fn active_events(&self) -> Vec<usize> {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, s)| s.depth > 0)
            .map(|(id, _)| id)
            .collect()
    }
}
