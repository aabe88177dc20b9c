//! Convenience re-exports for common types
//!
//! ```
//! use stagelog_rs::prelude::*;
//! ```

pub use crate::comm::{Communicator, LocalGroup, SingleProcess};
pub use crate::config::{DuplicatePolicy, LoggerConfig, LoggerConfigBuilder};
pub use crate::error::{Error, NameKind, Result};
pub use crate::logger::{EventScope, Logger, StageScope};
pub use crate::shared::SharedLogger;
pub use crate::snapshot::{EventStats, LoggerSnapshot, StageStats};
