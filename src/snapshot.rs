//! Point-in-time view of a logger's counters.

use std::time::Duration;

/// Counters of one registered event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EventStats {
    /// Registered id.
    pub id: usize,
    /// Registered name.
    pub name: String,
    /// Completed outermost begin/end pairs.
    pub calls: u64,
    /// Open levels right now.
    pub depth: u32,
    /// Includes the running interval when `depth > 0`.
    pub elapsed: Duration,
}

/// Counters of one registered stage.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StageStats {
    /// Registered id.
    pub id: usize,
    /// Registered name.
    pub name: String,
    /// Completed push/pop pairs, nested ones included.
    pub calls: u64,
    /// Frames of this stage currently on the stack.
    pub depth: usize,
    /// Time of completed outermost frames; nested self-pushes add nothing.
    pub elapsed: Duration,
}

/// Every counter of a logger, taken at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LoggerSnapshot {
    /// Class name of the logger.
    pub class_name: String,
    /// Rank the logger reports for.
    pub rank: usize,
    /// Size of its process group.
    pub size: usize,
    /// Indexed by event id.
    pub events: Vec<EventStats>,
    /// Indexed by stage id.
    pub stages: Vec<StageStats>,
    /// Bottom-to-top.
    pub active_stages: Vec<usize>,
}

impl LoggerSnapshot {
    /// Stats of the event called `name`.
    pub fn event(&self, name: &str) -> Option<&EventStats> {
        self.events.iter().find(|e| e.name == name)
    }

    /// Stats of the stage called `name`.
    pub fn stage(&self, name: &str) -> Option<&StageStats> {
        self.stages.iter().find(|s| s.name == name)
    }

    /// True when no event is open and the stage stack is empty.
    pub fn is_balanced(&self) -> bool {
        self.active_stages.is_empty() && self.events.iter().all(|e| e.depth == 0)
    }

    /// Events ordered by elapsed time, most expensive first.
    pub fn hottest_events(&self) -> Vec<&EventStats> {
        let mut sorted: Vec<_> = self.events.iter().collect();
        sorted.sort_by(|a, b| b.elapsed.cmp(&a.elapsed).then(a.id.cmp(&b.id)));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: usize, name: &str, millis: u64, depth: u32) -> EventStats {
        EventStats {
            id,
            name: name.to_string(),
            calls: 1,
            depth,
            elapsed: Duration::from_millis(millis),
        }
    }

    fn dummy_snapshot() -> LoggerSnapshot {
        LoggerSnapshot {
            class_name: "ElasticityExplicitTet4".into(),
            rank: 0,
            size: 1,
            events: vec![
                event(0, "ElIR setup", 5, 0),
                event(1, "ElIR compute", 40, 0),
                event(2, "ElIR update", 5, 0),
            ],
            stages: vec![],
            active_stages: vec![],
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let snap = dummy_snapshot();
        assert_eq!(snap.event("ElIR compute").map(|e| e.id), Some(1));
        assert!(snap.event("ElIR stress").is_none());
        assert!(snap.stage("anything").is_none());
    }

    #[test]
    fn test_hottest_events_ties_by_id() {
        let snap = dummy_snapshot();
        let order: Vec<_> = snap.hottest_events().iter().map(|e| e.id).collect();
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn test_balance() {
        let mut snap = dummy_snapshot();
        assert!(snap.is_balanced());
        snap.events[2].depth = 1;
        assert!(!snap.is_balanced());
        snap.events[2].depth = 0;
        snap.active_stages.push(0);
        assert!(!snap.is_balanced());
    }
}
