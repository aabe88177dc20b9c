//! Configuration for stagelog loggers

use crate::error::{Error, Result};
use crate::registry::MAX_IDS;

/// What `register_*` does with a name that is already registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail with `Error::DuplicateName`.
    #[default]
    Reject,
    /// Hand back the id issued the first time.
    ReturnExisting,
}

/// Logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Label of the owning subsystem, used in diagnostics.
    pub class_name: String,
    /// This process's rank.
    pub rank: usize,
    /// Number of ranks (must be > 0 and greater than `rank`).
    pub size: usize,
    /// Handling of repeated registrations.
    pub duplicate_policy: DuplicatePolicy,

    /// When false the logger still enforces nesting but never reads the clock.
    pub timing: bool,

    /// Names preallocated per namespace (at most `MAX_IDS`).
    pub registry_capacity: usize,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            class_name: String::new(),
            rank: 0,
            size: 1,
            duplicate_policy: DuplicatePolicy::default(),
            timing: true,
            registry_capacity: 16,
        }
    }
}

impl LoggerConfig {
    /// Create a new configuration builder
    pub fn builder() -> LoggerConfigBuilder {
        LoggerConfigBuilder::new()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::config("size must be > 0"));
        }
        if self.rank >= self.size {
            return Err(Error::config(format!(
                "rank {} out of range for size {}",
                self.rank, self.size
            )));
        }
        if self.registry_capacity > MAX_IDS {
            return Err(Error::config(format!(
                "registry_capacity too large (max {MAX_IDS})"
            )));
        }
        Ok(())
    }
}

/// Builder for [`LoggerConfig`]
#[derive(Debug, Default)]
pub struct LoggerConfigBuilder {
    config: LoggerConfig,
}

impl LoggerConfigBuilder {
    /// Builder starting from the defaults.
    pub fn new() -> Self {
        Self {
            config: LoggerConfig::default(),
        }
    }

    /// Set the class name
    pub fn class_name<S: Into<String>>(mut self, name: S) -> Self {
        self.config.class_name = name.into();
        self
    }

    /// Set rank and communicator size
    pub fn rank(mut self, rank: usize, size: usize) -> Self {
        self.config.rank = rank;
        self.config.size = size;
        self
    }

    /// Set the duplicate registration policy
    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.config.duplicate_policy = policy;
        self
    }

    /// Enable or disable clock reads
    pub fn timing(mut self, enable: bool) -> Self {
        self.config.timing = enable;
        self
    }

    /// Set the per-namespace preallocation
    pub fn registry_capacity(mut self, capacity: usize) -> Self {
        self.config.registry_capacity = capacity;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<LoggerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
