//! Identity-stable handlers and the caches that keep them stable.
//!
//! A [`Handler`] is a shared callable whose equality is *pointer identity*:
//! two clones of the same handler compare equal, two handlers built from
//! identical closures do not. Rendering code hands handlers to a listener
//! layer that only re-attaches when identity changes, so handlers must be
//! produced through a [`Memo`] (or [`MemoMap`] for per-item handlers) keyed on
//! everything the handler closes over.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::ops::Deref;
use std::sync::Arc;
use tracing::trace;

/// Reference-counted callable compared by identity.
pub struct Handler<F: ?Sized>(Arc<F>);

/// Callback taking a single argument, the shape every external callback has.
pub type Callback<A> = Handler<dyn Fn(A) + Send + Sync>;

impl<F: ?Sized> Handler<F> {
    pub fn from_arc(inner: Arc<F>) -> Self {
        Self(inner)
    }

    /// True when both handles point at the same underlying callable.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }
}

impl<A> Handler<dyn Fn(A) + Send + Sync> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, arg: A) {
        (self.0)(arg)
    }
}

impl<F: ?Sized> Clone for Handler<F> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<F: ?Sized> PartialEq for Handler<F> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<F: ?Sized> Eq for Handler<F> {}

impl<F: ?Sized> Deref for Handler<F> {
    type Target = F;

    fn deref(&self) -> &F {
        &self.0
    }
}

impl<F: ?Sized> fmt::Debug for Handler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", Arc::as_ptr(&self.0))
    }
}

/// Bind `arg` into `callback`, producing a no-argument callback.
///
/// The result is a fresh identity on every call; wrap it in a [`Memo`] keyed
/// on `(callback, arg)` to keep it stable.
pub fn bind<A>(callback: &Callback<A>, arg: A) -> Callback<()>
where
    A: Clone + Send + Sync + 'static,
{
    let callback = callback.clone();
    Callback::new(move |()| callback.call(arg.clone()))
}

/// Single-slot cache holding the last dependency tuple and what it produced.
pub struct Memo<D, H> {
    slot: Option<(D, H)>,
    recomputed: usize,
}

impl<D, H> Default for Memo<D, H> {
    fn default() -> Self {
        Self {
            slot: None,
            recomputed: 0,
        }
    }
}

impl<D: PartialEq, H: Clone> Memo<D, H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value if `deps` equals the stored tuple, otherwise
    /// build a new one with `make` and replace the slot.
    pub fn get_or_update(&mut self, deps: D, make: impl FnOnce(&D) -> H) -> H {
        if let Some((prev, cached)) = &self.slot {
            if *prev == deps {
                return cached.clone();
            }
        }

        let fresh = make(&deps);
        self.slot = Some((deps, fresh.clone()));
        self.recomputed += 1;
        trace!("Memo recomputed (total {})", self.recomputed);
        fresh
    }

    pub fn current(&self) -> Option<&H> {
        self.slot.as_ref().map(|(_, cached)| cached)
    }

    /// How many times the cached value has been rebuilt.
    pub fn recomputed(&self) -> usize {
        self.recomputed
    }
}

/// One [`Memo`] per key, for handlers bound to per-item identifiers.
pub struct MemoMap<K, D, H> {
    entries: HashMap<K, Memo<D, H>>,
}

impl<K, D, H> Default for MemoMap<K, D, H> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, D: PartialEq, H: Clone> MemoMap<K, D, H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_update(&mut self, key: K, deps: D, make: impl FnOnce(&D) -> H) -> H {
        self.entries
            .entry(key)
            .or_default()
            .get_or_update(deps, make)
    }

    /// Forget every key for which `keep` returns false.
    pub fn retain(&mut self, keep: impl Fn(&K) -> bool) {
        self.entries.retain(|key, _| keep(key));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_callback(counter: &Arc<AtomicUsize>) -> Callback<u32> {
        let counter = counter.clone();
        Callback::new(move |n: u32| {
            counter.fetch_add(n as usize, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_clone_shares_identity() {
        let counter = Arc::new(AtomicUsize::new(0));
        let a = counting_callback(&counter);
        let b = a.clone();
        let c = counting_callback(&counter);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_bind_forwards_argument() {
        let counter = Arc::new(AtomicUsize::new(0));
        let callback = counting_callback(&counter);
        let bound = bind(&callback, 5);

        bound.call(());
        bound.call(());
        assert_eq!(counter.load(Ordering::SeqCst), 10);
    }

    #[test]
    fn test_memo_reuses_until_deps_change() {
        let counter = Arc::new(AtomicUsize::new(0));
        let first = counting_callback(&counter);
        let second = counting_callback(&counter);
        let mut memo: Memo<(Callback<u32>, u32), Callback<()>> = Memo::new();

        let h1 = memo.get_or_update((first.clone(), 1), |(cb, id)| bind(cb, *id));
        let h2 = memo.get_or_update((first.clone(), 1), |(cb, id)| bind(cb, *id));
        assert!(h1.ptr_eq(&h2));
        assert_eq!(memo.recomputed(), 1);

        let h3 = memo.get_or_update((first.clone(), 2), |(cb, id)| bind(cb, *id));
        assert!(!h3.ptr_eq(&h2));

        let h4 = memo.get_or_update((second, 2), |(cb, id)| bind(cb, *id));
        assert!(!h4.ptr_eq(&h3));
        assert_eq!(memo.recomputed(), 3);
        assert!(memo.current().is_some_and(|h| h.ptr_eq(&h4)));
    }

    #[test]
    fn test_memo_never_returns_stale_identity() {
        let counter = Arc::new(AtomicUsize::new(0));
        let first = counting_callback(&counter);
        let second = counting_callback(&counter);
        let mut memo: Memo<Callback<u32>, Callback<()>> = Memo::new();

        let old = memo.get_or_update(first.clone(), |cb| bind(cb, 1));
        let _ = memo.get_or_update(second, |cb| bind(cb, 1));
        // Returning to the first callback builds a new handler rather than
        // resurrecting the old one.
        let back = memo.get_or_update(first, |cb| bind(cb, 1));
        assert!(!back.ptr_eq(&old));
    }

    #[test]
    fn test_memo_map_per_key() {
        let counter = Arc::new(AtomicUsize::new(0));
        let callback = counting_callback(&counter);
        let mut handlers: MemoMap<u32, (Callback<u32>, u32), Callback<()>> = MemoMap::new();

        let a1 = handlers.get_or_update(1, (callback.clone(), 1), |(cb, id)| bind(cb, *id));
        let b1 = handlers.get_or_update(2, (callback.clone(), 2), |(cb, id)| bind(cb, *id));
        let a2 = handlers.get_or_update(1, (callback.clone(), 1), |(cb, id)| bind(cb, *id));

        assert!(a1.ptr_eq(&a2));
        assert!(!a1.ptr_eq(&b1));
        assert_eq!(handlers.len(), 2);

        handlers.retain(|id| *id != 2);
        assert_eq!(handlers.len(), 1);
    }
}
