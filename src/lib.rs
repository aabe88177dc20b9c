//! stagelog - nested event and stage instrumentation
//!
//! Rank-local profiling primitives for parallel, distributed simulations.
//! Each subsystem owns a [`Logger`] that maps event and stage names to small
//! integer ids and times the regions bracketed by them.
//!
//! # Quick Start
//!
//! ```
//! use stagelog_rs::prelude::*;
//!
//! let mut logger = Logger::new();
//! logger.set_class_name("logging A");
//! logger.initialize();
//!
//! for event in ["event 1", "event 2", "event 3"] {
//!     logger.register_event(event)?;
//! }
//! assert_eq!(logger.event_id("event 3")?, 2);
//!
//! logger.event_begin("event 3")?;
//! logger.event_begin("event 1")?;
//! logger.event_end("event 1")?;
//! logger.event_end("event 3")?;
//! # Ok::<(), stagelog_rs::Error>(())
//! ```
//!
//! # Nesting rules
//!
//! - **Stages** share one LIFO per logger. `stage_pop` takes no name and
//!   removes whatever was pushed last. A stage may be pushed again while it
//!   is already active.
//! - **Events** nest per id. Different events interleave freely; the same
//!   event may be re-entered, and only its outermost interval is timed.
//!
//! Every violation is returned as an [`Error`]; nothing is retried.

// Lint configuration
#![warn(missing_docs, missing_debug_implementations)]

pub mod comm;
pub mod config;
pub mod error;
pub mod logger;
pub mod prelude;
pub mod registry;
pub mod shared;
pub mod snapshot;
pub mod timing;

// Re-export key types at crate root
pub use comm::{Communicator, LocalGroup, SingleProcess};
pub use config::{DuplicatePolicy, LoggerConfig, LoggerConfigBuilder};
pub use error::{Error, NameKind, Result};
pub use logger::{EventScope, Logger, StageScope};
pub use registry::NameRegistry;
pub use shared::SharedLogger;
pub use snapshot::{EventStats, LoggerSnapshot, StageStats};
pub use timing::{EventTimer, StageStack};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_logging_scenario() {
        let mut logger = Logger::new();
        logger.set_class_name("logging A");
        logger.initialize();
        for stage in ["stage 1b", "stage 2b", "stage 3b"] {
            logger.register_stage(stage).unwrap();
        }

        logger.stage_push("stage 2b").unwrap();
        logger.stage_pop().unwrap();

        logger.stage_push("stage 1b").unwrap();
        logger.stage_pop().unwrap();

        logger.stage_push("stage 3b").unwrap();
        logger.stage_push("stage 1b").unwrap();
        assert_eq!(logger.active_stages().unwrap(), vec![2, 0]);
        assert_eq!(logger.stage_pop().unwrap(), 0);
        assert_eq!(logger.stage_pop().unwrap(), 2);

        assert!(logger.active_stages().unwrap().is_empty());
        assert_eq!(logger.stage_pop(), Err(Error::EmptyStack));
    }
}
