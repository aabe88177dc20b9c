//! Error types for stagelog

use std::fmt;

/// Result type alias for stagelog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Which namespace of a logger a name or id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NameKind {
    /// Re-entrant, per-id timed regions.
    Event,
    /// Entries of the logger's LIFO stage stack.
    Stage,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Event => f.write_str("event"),
            NameKind::Stage => f.write_str("stage"),
        }
    }
}

/// Main error type for stagelog
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A namespace or timing call came before `initialize`.
    #[error("logger not initialized")]
    NotInitialized,

    /// The name was never registered in this namespace.
    #[error("unknown {kind} name '{name}'")]
    UnknownName {
        /// Namespace that was searched.
        kind: NameKind,
        /// The name looked up.
        name: String,
    },

    /// The id was not issued by this namespace, or is out of range.
    #[error("unknown {kind} id {id}")]
    UnknownId {
        /// Namespace the id was used with.
        kind: NameKind,
        /// The rejected id.
        id: usize,
    },

    /// Registration of a name that already has an id.
    #[error("{kind} '{name}' already registered with id {id}")]
    DuplicateName {
        /// Namespace registered into.
        kind: NameKind,
        /// The duplicated name.
        name: String,
        /// Id issued the first time.
        id: usize,
    },

    /// The namespace has issued every id it can.
    #[error("{kind} namespace full ({limit} ids)")]
    NamespaceFull {
        /// Namespace registered into.
        kind: NameKind,
        /// Maximum number of ids.
        limit: usize,
    },

    /// `stage_pop` with nothing on the stack.
    #[error("stage pop with no active stage")]
    EmptyStack,

    /// `event_end` on an event whose depth is already zero.
    #[error("end of event '{name}' without a matching begin")]
    UnmatchedEnd {
        /// Event name, or its id when no registry was at hand.
        name: String,
    },

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    pub(crate) fn unknown_name<S: Into<String>>(kind: NameKind, name: S) -> Self {
        Error::UnknownName {
            kind,
            name: name.into(),
        }
    }

    /// True for the errors raised by stage/event nesting going wrong, as
    /// opposed to lookup or lifecycle mistakes.
    pub fn is_nesting_violation(&self) -> bool {
        matches!(self, Error::EmptyStack | Error::UnmatchedEnd { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_namespace() {
        let err = Error::unknown_name(NameKind::Stage, "solve");
        assert_eq!(err.to_string(), "unknown stage name 'solve'");

        let err = Error::DuplicateName {
            kind: NameKind::Event,
            name: "assemble".into(),
            id: 3,
        };
        assert_eq!(err.to_string(), "event 'assemble' already registered with id 3");

        let err = Error::NamespaceFull {
            kind: NameKind::Stage,
            limit: 4,
        };
        assert_eq!(err.to_string(), "stage namespace full (4 ids)");
    }

    #[test]
    fn test_nesting_violation_classification() {
        assert!(Error::EmptyStack.is_nesting_violation());
        assert!(Error::UnmatchedEnd { name: "x".into() }.is_nesting_violation());
        assert!(!Error::NotInitialized.is_nesting_violation());
        assert!(!Error::config("bad").is_nesting_violation());
    }
}
