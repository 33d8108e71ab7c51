use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{debug, trace};

use crate::handler::Callback;

/// Result of attaching a handler to a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attach {
    /// Nothing was attached to the target before.
    New,
    /// The same handler identity was already attached; nothing changed.
    Kept,
    /// A different handler was attached; it was detached and replaced.
    Replaced,
}

/// Running totals of listener attach/detach operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerChurn {
    pub attached: usize,
    pub detached: usize,
}

/// Listener registry keyed by target.
///
/// Re-attaching the identical handler is free; only an identity change costs a
/// detach + attach. This is the consumer that makes handler stability
/// observable.
pub struct ListenerTable<T> {
    listeners: HashMap<T, Callback<()>>,
    churn: ListenerChurn,
}

impl<T> Default for ListenerTable<T> {
    fn default() -> Self {
        Self {
            listeners: HashMap::new(),
            churn: ListenerChurn::default(),
        }
    }
}

impl<T: Eq + Hash + Debug> ListenerTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, target: T, handler: &Callback<()>) -> Attach {
        match self.listeners.entry(target) {
            Entry::Occupied(mut slot) => {
                if slot.get().ptr_eq(handler) {
                    return Attach::Kept;
                }
                debug!("Replacing listener on {:?}", slot.key());
                slot.insert(handler.clone());
                self.churn.detached += 1;
                self.churn.attached += 1;
                Attach::Replaced
            }
            Entry::Vacant(slot) => {
                trace!("Attaching listener on {:?}", slot.key());
                slot.insert(handler.clone());
                self.churn.attached += 1;
                Attach::New
            }
        }
    }

    pub fn detach(&mut self, target: &T) -> bool {
        let removed = self.listeners.remove(target).is_some();
        if removed {
            self.churn.detached += 1;
        }
        removed
    }

    /// Detach every target for which `keep` returns false.
    pub fn retain(&mut self, keep: impl Fn(&T) -> bool) {
        let before = self.listeners.len();
        self.listeners.retain(|target, _| keep(target));
        self.churn.detached += before - self.listeners.len();
    }

    /// Invoke the listener attached to `target`, if any.
    pub fn dispatch(&self, target: &T) -> bool {
        match self.listeners.get(target) {
            Some(handler) => {
                handler.call(());
                true
            }
            None => {
                trace!("No listener on {:?}", target);
                false
            }
        }
    }

    pub fn get(&self, target: &T) -> Option<&Callback<()>> {
        self.listeners.get(target)
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn churn(&self) -> ListenerChurn {
        self.churn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter_handler(counter: &Arc<AtomicUsize>) -> Callback<()> {
        let counter = counter.clone();
        Callback::new(move |()| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_same_identity_is_kept() {
        let counter = Arc::new(AtomicUsize::new(0));
        let handler = counter_handler(&counter);
        let mut table = ListenerTable::new();

        assert_eq!(table.attach("toggle", &handler), Attach::New);
        assert_eq!(table.attach("toggle", &handler.clone()), Attach::Kept);
        assert_eq!(
            table.churn(),
            ListenerChurn {
                attached: 1,
                detached: 0
            }
        );
    }

    #[test]
    fn test_new_identity_replaces() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut table = ListenerTable::new();

        table.attach("destroy", &counter_handler(&counter));
        assert_eq!(
            table.attach("destroy", &counter_handler(&counter)),
            Attach::Replaced
        );
        assert_eq!(table.churn().detached, 1);
        assert_eq!(table.churn().attached, 2);
    }

    #[test]
    fn test_dispatch_and_retain() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut table = ListenerTable::new();
        table.attach(1u32, &counter_handler(&counter));
        table.attach(2u32, &counter_handler(&counter));

        assert!(table.dispatch(&1));
        assert!(!table.dispatch(&3));
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        table.retain(|id| *id == 1);
        assert_eq!(table.len(), 1);
        assert_eq!(table.churn().detached, 1);
        assert!(table.detach(&1));
        assert!(table.is_empty());
    }
}
