//! Name ↔ id namespaces for events and stages.

use std::collections::HashMap;

use crate::config::DuplicatePolicy;
use crate::error::{Error, NameKind, Result};

/// Upper bound on ids issued by one namespace. Timers and stacks reject ids
/// at or above it, so per-id state never grows past this many slots.
pub const MAX_IDS: usize = 1 << 20;

/// Maps names to dense ids issued in registration order, starting at 0.
///
/// Ids are never reused or removed for the lifetime of the registry, so an id
/// doubles as an index into per-name state kept elsewhere.
#[derive(Debug, Clone)]
pub struct NameRegistry {
    kind: NameKind,
    policy: DuplicatePolicy,
    ids: HashMap<String, usize>,
    names: Vec<String>,
}

impl NameRegistry {
    /// Empty registry for one namespace.
    pub fn new(kind: NameKind, policy: DuplicatePolicy) -> Self {
        Self::with_capacity(kind, policy, 0)
    }

    /// Empty registry with room for `capacity` names before reallocating.
    pub fn with_capacity(kind: NameKind, policy: DuplicatePolicy, capacity: usize) -> Self {
        Self {
            kind,
            policy,
            ids: HashMap::with_capacity(capacity),
            names: Vec::with_capacity(capacity),
        }
    }

    /// Namespace this registry serves.
    pub fn kind(&self) -> NameKind {
        self.kind
    }

    /// Register `name`, returning its id.
    ///
    /// A name seen before is rejected or resolved to its first id depending
    /// on the registry's [`DuplicatePolicy`]. A new name fails with
    /// `NamespaceFull` once [`MAX_IDS`] ids have been issued.
    pub fn register(&mut self, name: &str) -> Result<usize> {
        if let Some(&id) = self.ids.get(name) {
            return match self.policy {
                DuplicatePolicy::Reject => Err(Error::DuplicateName {
                    kind: self.kind,
                    name: name.to_string(),
                    id,
                }),
                DuplicatePolicy::ReturnExisting => Ok(id),
            };
        }

        let id = self.names.len();
        if id >= MAX_IDS {
            return Err(Error::NamespaceFull {
                kind: self.kind,
                limit: MAX_IDS,
            });
        }
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        Ok(id)
    }

    /// Id of a registered name.
    pub fn lookup(&self, name: &str) -> Result<usize> {
        self.ids
            .get(name)
            .copied()
            .ok_or_else(|| Error::unknown_name(self.kind, name))
    }

    /// Name behind `id`, if it was issued.
    pub fn name(&self, id: usize) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Fails with `UnknownId` unless `id` was issued by this registry.
    pub fn check_id(&self, id: usize) -> Result<()> {
        if id < self.names.len() {
            Ok(())
        } else {
            Err(Error::UnknownId {
                kind: self.kind,
                id,
            })
        }
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True before the first registration.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// `(id, name)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.names.iter().enumerate().map(|(id, n)| (id, n.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events() -> NameRegistry {
        NameRegistry::new(NameKind::Event, DuplicatePolicy::Reject)
    }

    #[test]
    fn test_sequential_ids() {
        let mut reg = events();
        assert_eq!(reg.register("event 1").unwrap(), 0);
        assert_eq!(reg.register("event 2").unwrap(), 1);
        assert_eq!(reg.register("event 3").unwrap(), 2);
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.lookup("event 2").unwrap(), 1);
        assert_eq!(reg.name(2), Some("event 3"));
    }

    #[test]
    fn test_unknown_name() {
        let reg = events();
        assert_eq!(
            reg.lookup("missing"),
            Err(Error::UnknownName {
                kind: NameKind::Event,
                name: "missing".into()
            })
        );
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut reg = events();
        reg.register("setup").unwrap();
        let err = reg.register("setup").unwrap_err();
        assert!(matches!(err, Error::DuplicateName { id: 0, .. }));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_duplicate_returns_existing() {
        let mut reg = NameRegistry::new(NameKind::Stage, DuplicatePolicy::ReturnExisting);
        assert_eq!(reg.register("solve").unwrap(), 0);
        assert_eq!(reg.register("output").unwrap(), 1);
        assert_eq!(reg.register("solve").unwrap(), 0);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_check_id() {
        let mut reg = events();
        reg.register("a").unwrap();
        assert!(reg.check_id(0).is_ok());
        assert_eq!(
            reg.check_id(1),
            Err(Error::UnknownId {
                kind: NameKind::Event,
                id: 1
            })
        );
    }

    #[test]
    fn test_register_stops_at_id_limit() {
        let mut reg = NameRegistry::new(NameKind::Stage, DuplicatePolicy::ReturnExisting);
        reg.names = (0..MAX_IDS).map(|i| i.to_string()).collect();
        reg.ids.insert("0".into(), 0);

        assert_eq!(reg.register("0").unwrap(), 0);
        assert_eq!(
            reg.register("one too many"),
            Err(Error::NamespaceFull {
                kind: NameKind::Stage,
                limit: MAX_IDS
            })
        );
        assert_eq!(reg.len(), MAX_IDS);
        assert!(reg.lookup("one too many").is_err());
    }

    #[test]
    fn test_iter_in_id_order() {
        let mut reg = events();
        for name in ["c", "a", "b"] {
            reg.register(name).unwrap();
        }
        let listed: Vec<_> = reg.iter().collect();
        assert_eq!(listed, vec![(0, "c"), (1, "a"), (2, "b")]);
    }
}
