use tracing::trace;

use crate::handler::{Callback, Memo};

/// Forwards focus loss of an edit field to an optional callback.
#[derive(Clone, Default)]
pub struct BlurController {
    on_blur: Option<Callback<()>>,
}

impl BlurController {
    pub fn new(on_blur: Option<Callback<()>>) -> Self {
        Self { on_blur }
    }

    /// Returns whether a callback was invoked.
    pub fn on_blur(&self) -> bool {
        match &self.on_blur {
            Some(callback) => {
                callback.call(());
                true
            }
            None => {
                trace!("Blur without a callback");
                false
            }
        }
    }

    pub fn into_handler(self) -> Callback<()> {
        Callback::new(move |()| {
            self.on_blur();
        })
    }
}

/// Keeps the blur handler stable while the supplied callback is unchanged.
#[derive(Default)]
pub struct BlurHandlerCache {
    memo: Memo<Option<Callback<()>>, Callback<()>>,
}

impl BlurHandlerCache {
    pub fn handler(&mut self, on_blur: Option<&Callback<()>>) -> Callback<()> {
        self.memo.get_or_update(on_blur.cloned(), |on_blur| {
            BlurController::new(on_blur.clone()).into_handler()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_missing_callback_is_a_no_op() {
        let controller = BlurController::new(None);
        assert!(!controller.on_blur());
        controller.into_handler().call(());
    }

    #[test]
    fn test_callback_runs_once_per_blur() {
        let count = Arc::new(AtomicUsize::new(0));
        let sink = count.clone();
        let on_blur = Callback::new(move |()| {
            sink.fetch_add(1, Ordering::SeqCst);
        });
        let handler = BlurController::new(Some(on_blur)).into_handler();

        handler.call(());
        assert_eq!(count.load(Ordering::SeqCst), 1);
        handler.call(());
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_cache_stability() {
        let on_blur = Callback::new(|()| {});
        let other = Callback::new(|()| {});
        let mut cache = BlurHandlerCache::default();

        let none_a = cache.handler(None);
        let none_b = cache.handler(None);
        assert!(none_a.ptr_eq(&none_b));

        let some_a = cache.handler(Some(&on_blur));
        let some_b = cache.handler(Some(&on_blur));
        assert!(some_a.ptr_eq(&some_b));
        assert!(!some_a.ptr_eq(&none_b));

        let swapped = cache.handler(Some(&other));
        assert!(!swapped.ptr_eq(&some_b));
    }
}
