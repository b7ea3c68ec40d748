use parking_lot::RwLock;
use thiserror::Error;

/// Failures raised by a [`Registry`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The highest id in use is `u64::MAX`, so no successor can be assigned.
    #[error("no {kind} id left after {max}")]
    IdsExhausted { kind: &'static str, max: u64 },
}

/// Something a [`Registry`] can hold: a cloneable record with a numeric id.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Short name used in log events.
    const KIND: &'static str;

    fn id(&self) -> u64;
}

/// An in-memory collection of same-typed entities, manipulated by id.
///
/// Lookups are linear scans in insertion order. Ids are expected to be
/// unique but this is not checked on insert.
pub struct Registry<T> {
    items: RwLock<Vec<T>>,
}

impl<T: Entity> Registry<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Append a new entity.
    ///
    /// `requested` is used verbatim when present; otherwise the next id after
    /// the current maximum is handed to `build`.
    pub fn create(
        &self,
        requested: Option<u64>,
        build: impl FnOnce(u64) -> T,
    ) -> Result<T, StoreError> {
        let mut items = self.items.write();
        let id = match requested {
            Some(id) => id,
            None => Self::next_id(&items)?,
        };
        let entity = build(id);
        items.push(entity.clone());

        tracing::debug!(kind = T::KIND, id, "entity created");
        Ok(entity)
    }

    /// Snapshot of every entity in insertion order.
    pub fn list(&self) -> Vec<T> {
        self.items.read().clone()
    }

    /// First entity with the given id.
    pub fn get(&self, id: u64) -> Option<T> {
        self.find(|item| item.id() == id)
    }

    /// First entity matching `predicate`.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.items.read().iter().find(|item| predicate(item)).cloned()
    }

    /// Replace the first entity sharing `entity`'s id. Returns `false` and
    /// leaves the registry untouched when nothing matches.
    pub fn replace(&self, entity: T) -> bool {
        let mut items = self.items.write();
        match items.iter_mut().find(|item| item.id() == entity.id()) {
            Some(slot) => {
                tracing::debug!(kind = T::KIND, id = entity.id(), "entity replaced");
                *slot = entity;
                true
            }
            None => false,
        }
    }

    /// Mutate the first entity with the given id in place and return the
    /// updated copy.
    pub fn modify(&self, id: u64, apply: impl FnOnce(&mut T)) -> Option<T> {
        let mut items = self.items.write();
        let slot = items.iter_mut().find(|item| item.id() == id)?;
        apply(slot);
        Some(slot.clone())
    }

    /// Remove every entity with the given id, returning how many were removed.
    pub fn remove(&self, id: u64) -> usize {
        let mut items = self.items.write();
        let before = items.len();
        items.retain(|item| item.id() != id);
        let removed = before - items.len();

        if removed > 0 {
            tracing::debug!(kind = T::KIND, id, removed, "entity removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    fn next_id(items: &[T]) -> Result<u64, StoreError> {
        match items.iter().map(Entity::id).max() {
            None => Ok(1),
            Some(max) => max
                .checked_add(1)
                .ok_or(StoreError::IdsExhausted { kind: T::KIND, max }),
        }
    }
}

impl<T: Entity> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Shelf {
        id: u64,
        label: String,
    }

    impl Entity for Shelf {
        const KIND: &'static str = "shelf";

        fn id(&self) -> u64 {
            self.id
        }
    }

    fn shelf(id: u64, label: &str) -> Shelf {
        Shelf {
            id,
            label: label.to_string(),
        }
    }

    #[test]
    fn assigns_ids_after_the_current_maximum() {
        let registry = Registry::new();
        let first = registry.create(None, |id| shelf(id, "a")).unwrap();
        let pinned = registry.create(Some(10), |id| shelf(id, "b")).unwrap();
        let next = registry.create(None, |id| shelf(id, "c")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(pinned.id, 10);
        assert_eq!(next.id, 11);
    }

    #[test]
    fn auto_id_after_the_largest_possible_id_is_an_error() {
        let registry = Registry::new();
        registry.create(Some(u64::MAX), |id| shelf(id, "last")).unwrap();

        assert_eq!(
            registry.create(None, |id| shelf(id, "overflow")),
            Err(StoreError::IdsExhausted {
                kind: "shelf",
                max: u64::MAX
            })
        );
        assert_eq!(registry.len(), 1);

        let pinned = registry.create(Some(5), |id| shelf(id, "pinned")).unwrap();
        assert_eq!(pinned.id, 5);
    }

    #[test]
    fn duplicate_ids_are_accepted_and_get_returns_the_first() {
        let registry = Registry::new();
        registry.create(Some(3), |id| shelf(id, "first")).unwrap();
        registry.create(Some(3), |id| shelf(id, "second")).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(3).unwrap().label, "first");
    }

    #[test]
    fn remove_drops_every_match() {
        let registry = Registry::new();
        registry.create(Some(3), |id| shelf(id, "first")).unwrap();
        registry.create(Some(3), |id| shelf(id, "second")).unwrap();
        registry.create(Some(4), |id| shelf(id, "other")).unwrap();

        assert_eq!(registry.remove(3), 2);
        assert_eq!(registry.remove(3), 0);
        assert_eq!(registry.list(), vec![shelf(4, "other")]);
    }

    #[test]
    fn replace_is_a_no_op_without_a_match() {
        let registry = Registry::new();
        registry.create(Some(1), |id| shelf(id, "a")).unwrap();

        assert!(!registry.replace(shelf(2, "b")));
        assert!(registry.replace(shelf(1, "z")));
        assert_eq!(registry.list(), vec![shelf(1, "z")]);
    }

    #[test]
    fn modify_updates_in_place() {
        let registry = Registry::new();
        registry.create(None, |id| shelf(id, "a")).unwrap();

        let updated = registry.modify(1, |s| s.label.push('!')).unwrap();
        assert_eq!(updated.label, "a!");
        assert_eq!(registry.get(1).unwrap().label, "a!");
        assert!(registry.modify(9, |s| s.label.clear()).is_none());
    }

    #[test]
    fn find_uses_the_predicate() {
        let registry = Registry::new();
        registry.create(None, |id| shelf(id, "fiction")).unwrap();
        registry.create(None, |id| shelf(id, "history")).unwrap();

        let found = registry.find(|s| s.label == "history").unwrap();
        assert_eq!(found.id, 2);
        assert!(registry.find(|s| s.label == "poetry").is_none());
        assert!(!registry.is_empty());
    }
}
