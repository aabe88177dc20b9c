//! The per-component logger façade.
//!
//! A [`Logger`] is bound to one subsystem through its class name, owns
//! separate event and stage namespaces, and enforces the nesting rules of
//! both. It is rank-local: nothing here talks to other processes.
//!
//! ```
//! use stagelog_rs::Logger;
//!
//! let mut logger = Logger::new();
//! logger.set_class_name("ElasticityExplicit");
//! logger.initialize();
//!
//! logger.register_stage("integrate")?;
//! logger.register_event("compute")?;
//!
//! logger.stage_push("integrate")?;
//! logger.event_begin("compute")?;
//! logger.event_end("compute")?;
//! logger.stage_pop()?;
//! # Ok::<(), stagelog_rs::Error>(())
//! ```

use std::ops::{Deref, DerefMut};
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::comm::Communicator;
use crate::config::LoggerConfig;
use crate::error::{Error, NameKind, Result};
use crate::registry::NameRegistry;
use crate::snapshot::{EventStats, LoggerSnapshot, StageStats};
use crate::timing::{EventTimer, StageStack};

#[derive(Debug)]
struct LoggerState {
    events: NameRegistry,
    stages: NameRegistry,
    stack: StageStack,
    timer: EventTimer,
}

impl LoggerState {
    fn new(config: &LoggerConfig) -> Self {
        let cap = config.registry_capacity;
        let policy = config.duplicate_policy;
        Self {
            events: NameRegistry::with_capacity(NameKind::Event, policy, cap),
            stages: NameRegistry::with_capacity(NameKind::Stage, policy, cap),
            stack: StageStack::new(config.timing),
            timer: EventTimer::new(config.timing),
        }
    }

    fn event_name(&self, id: usize) -> String {
        self.events
            .name(id)
            .map(str::to_string)
            .unwrap_or_else(|| id.to_string())
    }
}

/// Event and stage logger for one named component.
#[derive(Debug)]
pub struct Logger {
    config: LoggerConfig,
    state: Option<LoggerState>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// An inert logger with the default configuration.
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
            state: None,
        }
    }

    /// An inert logger using `config`, which is validated first.
    pub fn with_config(config: LoggerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: None,
        })
    }

    /// Current configuration.
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Label only; changing it after `initialize` is allowed.
    pub fn set_class_name<S: Into<String>>(&mut self, name: S) {
        self.config.class_name = name.into();
    }

    /// Label set by `set_class_name` or the config.
    pub fn class_name(&self) -> &str {
        &self.config.class_name
    }

    /// Label the logger with `rank` of `size`; rejects `rank >= size`.
    pub fn set_rank(&mut self, rank: usize, size: usize) -> Result<()> {
        let mut config = self.config.clone();
        config.rank = rank;
        config.size = size;
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Copy rank and size from `comm`. No collective call is made.
    pub fn set_communicator(&mut self, comm: &dyn Communicator) -> Result<()> {
        self.set_rank(comm.rank(), comm.size())
    }

    /// Rank this logger reports for.
    pub fn rank(&self) -> usize {
        self.config.rank
    }

    /// Size of the process group.
    pub fn size(&self) -> usize {
        self.config.size
    }

    /// Allocate fresh namespaces and an empty stage stack.
    ///
    /// Calling it again discards every registration and timing.
    pub fn initialize(&mut self) {
        if self.state.is_some() {
            debug!(class = %self.config.class_name, rank = self.config.rank, "logger re-initialized");
        } else {
            debug!(class = %self.config.class_name, rank = self.config.rank, "logger initialized");
        }
        self.state = Some(LoggerState::new(&self.config));
    }

    /// True once `initialize` has run.
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    fn state(&self) -> Result<&LoggerState> {
        self.state.as_ref().ok_or(Error::NotInitialized)
    }

    fn state_mut(&mut self) -> Result<&mut LoggerState> {
        self.state.as_mut().ok_or(Error::NotInitialized)
    }

    // ── Registration ────────────────────────────────────────────────────

    /// Register an event name and return its id.
    pub fn register_event(&mut self, name: &str) -> Result<usize> {
        let id = self.state_mut()?.events.register(name)?;
        debug!(class = %self.config.class_name, event = name, id, "event registered");
        Ok(id)
    }

    /// Id of a registered event.
    pub fn event_id(&self, name: &str) -> Result<usize> {
        self.state()?.events.lookup(name)
    }

    /// Name of event `id`.
    pub fn event_name(&self, id: usize) -> Result<&str> {
        let state = self.state()?;
        state.events.name(id).ok_or(Error::UnknownId {
            kind: NameKind::Event,
            id,
        })
    }

    /// Register a stage name and return its id.
    pub fn register_stage(&mut self, name: &str) -> Result<usize> {
        let id = self.state_mut()?.stages.register(name)?;
        debug!(class = %self.config.class_name, stage = name, id, "stage registered");
        Ok(id)
    }

    /// Id of a registered stage.
    pub fn stage_id(&self, name: &str) -> Result<usize> {
        self.state()?.stages.lookup(name)
    }

    /// Name of stage `id`.
    pub fn stage_name(&self, id: usize) -> Result<&str> {
        let state = self.state()?;
        state.stages.name(id).ok_or(Error::UnknownId {
            kind: NameKind::Stage,
            id,
        })
    }

    // ── Events ──────────────────────────────────────────────────────────

    /// Open one level of event `name`.
    pub fn event_begin(&mut self, name: &str) -> Result<()> {
        let id = self.event_id(name)?;
        self.event_begin_id(id)
    }

    /// Close one level of event `name`.
    pub fn event_end(&mut self, name: &str) -> Result<()> {
        let id = self.event_id(name)?;
        self.event_end_id(id)
    }

    /// Begin by id, skipping the name lookup.
    pub fn event_begin_id(&mut self, id: usize) -> Result<()> {
        let state = self.state_mut()?;
        state.events.check_id(id)?;
        state.timer.begin(id)?;
        trace!(id, depth = state.timer.depth(id), "event begin");
        Ok(())
    }

    /// End by id, skipping the name lookup.
    pub fn event_end_id(&mut self, id: usize) -> Result<()> {
        let state = self.state_mut()?;
        state.events.check_id(id)?;
        if state.timer.end(id).is_err() {
            return Err(Error::UnmatchedEnd {
                name: state.event_name(id),
            });
        }
        trace!(id, depth = state.timer.depth(id), "event end");
        Ok(())
    }

    /// Accumulated time of `name`, running interval included.
    pub fn event_elapsed(&self, name: &str) -> Result<Duration> {
        let id = self.event_id(name)?;
        Ok(self.state()?.timer.elapsed(id))
    }

    /// Open levels of `name`.
    pub fn event_depth(&self, name: &str) -> Result<u32> {
        let id = self.event_id(name)?;
        Ok(self.state()?.timer.depth(id))
    }

    /// Ids of currently open events, ascending.
    pub fn active_events(&self) -> Result<Vec<usize>> {
        Ok(self.state()?.timer.active_events())
    }

    /// Begin `name` and end it when the returned scope drops.
    pub fn event_scope(&mut self, name: &str) -> Result<EventScope<'_>> {
        let id = self.event_id(name)?;
        self.event_begin_id(id)?;
        Ok(EventScope { logger: self, id })
    }

    // ── Stages ──────────────────────────────────────────────────────────

    /// Push stage `name` on the stack.
    pub fn stage_push(&mut self, name: &str) -> Result<()> {
        let id = self.stage_id(name)?;
        self.stage_push_id(id)
    }

    /// Push by id, skipping the name lookup.
    pub fn stage_push_id(&mut self, id: usize) -> Result<()> {
        let state = self.state_mut()?;
        state.stages.check_id(id)?;
        state.stack.push(id)?;
        trace!(id, depth = state.stack.depth(), "stage push");
        Ok(())
    }

    /// Pop whichever stage is on top and return its id.
    pub fn stage_pop(&mut self) -> Result<usize> {
        let state = self.state_mut()?;
        let id = state.stack.pop()?;
        trace!(id, depth = state.stack.depth(), "stage pop");
        Ok(id)
    }

    /// Bottom-to-top ids of the active stages.
    pub fn active_stages(&self) -> Result<Vec<usize>> {
        Ok(self.state()?.stack.active_stages())
    }

    /// Bottom-to-top names of the active stages.
    pub fn active_stage_names(&self) -> Result<Vec<String>> {
        let state = self.state()?;
        Ok(state
            .stack
            .active_stages()
            .into_iter()
            .filter_map(|id| state.stages.name(id).map(str::to_string))
            .collect())
    }

    /// Time accumulated by completed outermost pushes of `name`. A push of
    /// a stage that is already active adds a call but no time.
    pub fn stage_elapsed(&self, name: &str) -> Result<Duration> {
        let id = self.stage_id(name)?;
        Ok(self.state()?.stack.elapsed(id))
    }

    /// Push `name` and pop it when the returned scope drops.
    pub fn stage_scope(&mut self, name: &str) -> Result<StageScope<'_>> {
        let id = self.stage_id(name)?;
        self.stage_push_id(id)?;
        let depth = self.state()?.stack.depth();
        Ok(StageScope {
            logger: self,
            id,
            depth,
        })
    }

    // ── Diagnostics ─────────────────────────────────────────────────────

    /// Copy out every counter.
    pub fn snapshot(&self) -> Result<LoggerSnapshot> {
        let state = self.state()?;

        let events = state
            .events
            .iter()
            .map(|(id, name)| EventStats {
                id,
                name: name.to_string(),
                calls: state.timer.calls(id),
                depth: state.timer.depth(id),
                elapsed: state.timer.elapsed(id),
            })
            .collect();

        let stages = state
            .stages
            .iter()
            .map(|(id, name)| StageStats {
                id,
                name: name.to_string(),
                calls: state.stack.calls(id),
                depth: state.stack.depth_of(id),
                elapsed: state.stack.elapsed(id),
            })
            .collect();

        Ok(LoggerSnapshot {
            class_name: self.config.class_name.clone(),
            rank: self.config.rank,
            size: self.config.size,
            events,
            stages,
            active_stages: state.stack.active_stages(),
        })
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Some(state) = &self.state {
            let open_events = state.timer.active_events();
            if !open_events.is_empty() || !state.stack.is_empty() {
                warn!(
                    class = %self.config.class_name,
                    rank = self.config.rank,
                    open_events = ?open_events,
                    active_stages = ?state.stack.active_stages(),
                    "logger dropped with open events or stages"
                );
            }
        }
    }
}

/// An open event, ended on drop.
///
/// Derefs to the logger so nested regions are opened through the scope.
#[derive(Debug)]
pub struct EventScope<'a> {
    logger: &'a mut Logger,
    id: usize,
}

impl EventScope<'_> {
    /// Id of the event this scope holds open.
    pub fn id(&self) -> usize {
        self.id
    }
}

impl Deref for EventScope<'_> {
    type Target = Logger;

    fn deref(&self) -> &Logger {
        self.logger
    }
}

impl DerefMut for EventScope<'_> {
    fn deref_mut(&mut self) -> &mut Logger {
        self.logger
    }
}

impl Drop for EventScope<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.logger.event_end_id(self.id) {
            warn!(id = self.id, error = %err, "event scope could not close its event");
        }
    }
}

/// An active stage, popped on drop.
///
/// Only pops if the stack still holds this scope's frame on top; anything
/// else means nested code already unbalanced the stack.
#[derive(Debug)]
pub struct StageScope<'a> {
    logger: &'a mut Logger,
    id: usize,
    depth: usize,
}

impl StageScope<'_> {
    /// Id of the stage this scope pushed.
    pub fn id(&self) -> usize {
        self.id
    }
}

impl Deref for StageScope<'_> {
    type Target = Logger;

    fn deref(&self) -> &Logger {
        self.logger
    }
}

impl DerefMut for StageScope<'_> {
    fn deref_mut(&mut self) -> &mut Logger {
        self.logger
    }
}

impl Drop for StageScope<'_> {
    fn drop(&mut self) {
        let on_top = self
            .logger
            .state
            .as_ref()
            .map(|s| s.stack.depth() == self.depth && s.stack.top() == Some(self.id))
            .unwrap_or(false);

        if on_top {
            if let Err(err) = self.logger.stage_pop() {
                warn!(id = self.id, error = %err, "stage scope could not pop its stage");
            }
        } else {
            warn!(id = self.id, "stage scope found its frame gone; stack left untouched");
        }
    }
}
