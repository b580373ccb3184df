//! Change notification hooks.
//!
//! The set decides when and what to signal; delivery belongs to the
//! registered observers. A single mutator signals one item event and one
//! `on_changed`. Bulk mutators signal one item event per affected item and
//! a single trailing `on_changed`.

/// Receiver of set change notifications. Every hook defaults to a no-op.
pub trait SetObserver<T> {
    fn on_added(&mut self, _item: &T) {}
    fn on_removed(&mut self, _item: &T) {}
    fn on_updated(&mut self, _new: &T, _old: &T) {}
    /// The set was cleared; `count` is the number of items it held before.
    fn on_cleared(&mut self, _count: usize) {}
    /// Aggregate signal, raised once per mutating call that changed the set.
    fn on_changed(&mut self) {}
}

/// Observer list owned by one set.
pub(crate) struct EventHub<T> {
    observers: Vec<Box<dyn SetObserver<T>>>,
}

impl<T> Default for EventHub<T> {
    fn default() -> Self {
        Self {
            observers: Vec::new(),
        }
    }
}

impl<T> EventHub<T> {
    pub(crate) fn subscribe(&mut self, observer: Box<dyn SetObserver<T>>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn is_active(&self) -> bool {
        !self.observers.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }

    pub(crate) fn added(&mut self, item: &T) {
        for o in &mut self.observers {
            o.on_added(item);
        }
    }

    pub(crate) fn removed(&mut self, item: &T) {
        for o in &mut self.observers {
            o.on_removed(item);
        }
    }

    pub(crate) fn updated(&mut self, new: &T, old: &T) {
        for o in &mut self.observers {
            o.on_updated(new, old);
        }
    }

    pub(crate) fn cleared(&mut self, count: usize) {
        for o in &mut self.observers {
            o.on_cleared(count);
        }
    }

    pub(crate) fn changed(&mut self) {
        for o in &mut self.observers {
            o.on_changed();
        }
    }
}

impl<T> core::fmt::Debug for EventHub<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventHub")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Tally(Rc<RefCell<Vec<String>>>);

    impl SetObserver<i32> for Tally {
        fn on_added(&mut self, item: &i32) {
            self.0.borrow_mut().push(format!("+{item}"));
        }
        fn on_changed(&mut self) {
            self.0.borrow_mut().push("changed".into());
        }
    }

    #[test]
    fn inactive_without_observers() {
        let hub: EventHub<i32> = EventHub::default();
        assert!(!hub.is_active());
        assert_eq!(hub.len(), 0);
    }

    #[test]
    fn dispatches_to_every_observer_and_skips_unimplemented_hooks() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut hub = EventHub::default();
        hub.subscribe(Box::new(Tally(log.clone())));
        hub.subscribe(Box::new(Tally(log.clone())));
        assert!(hub.is_active());
        hub.added(&4);
        hub.removed(&4);
        hub.changed();
        assert_eq!(*log.borrow(), vec!["+4", "+4", "changed", "changed"]);
    }
}
