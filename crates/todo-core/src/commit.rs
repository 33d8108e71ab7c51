use std::sync::Arc;
use tracing::debug;

use crate::handler::{Callback, Handler, Memo};
use crate::key::Key;
use crate::sanitize::sanitize;
use crate::validate::{is_valid, MIN_LENGTH};

/// Which field a controller serves; decides what happens to the raw value
/// after a successful commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// New-todo field: cleared after every commit.
    Add,
    /// Inline edit field: left untouched, the owner tears it down.
    Edit,
}

impl Mode {
    pub fn clears_on_commit(self) -> bool {
        matches!(self, Mode::Add)
    }
}

/// What a key press did to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Not the commit key.
    Ignored,
    /// Commit key, but the trimmed value was too short.
    Rejected,
    /// The commit callback ran.
    Committed,
}

/// Key handler exposed to the rendering layer.
pub type KeyHandler = Handler<dyn Fn(Key, &mut String) -> CommitOutcome + Send + Sync>;

impl Handler<dyn Fn(Key, &mut String) -> CommitOutcome + Send + Sync> {
    pub fn handle(&self, key: Key, raw: &mut String) -> CommitOutcome {
        (**self)(key, raw)
    }
}

/// Trim, validate, sanitize and forward a field's text on Enter.
#[derive(Clone)]
pub struct CommitController {
    mode: Mode,
    on_commit: Callback<String>,
}

impl CommitController {
    pub fn new(mode: Mode, on_commit: Callback<String>) -> Self {
        Self { mode, on_commit }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn on_key(&self, key: Key, raw: &mut String) -> CommitOutcome {
        if !key.is_commit() {
            return CommitOutcome::Ignored;
        }

        let trimmed = raw.trim();
        if !is_valid(trimmed, MIN_LENGTH) {
            debug!("Rejected {:?} commit of {} chars", self.mode, trimmed.chars().count());
            return CommitOutcome::Rejected;
        }

        let text = sanitize(trimmed);
        debug!("Committing {:?} field ({} chars)", self.mode, text.chars().count());
        self.on_commit.call(text);

        if self.mode.clears_on_commit() {
            raw.clear();
        }
        CommitOutcome::Committed
    }

    pub fn into_handler(self) -> KeyHandler {
        let handler: Arc<dyn Fn(Key, &mut String) -> CommitOutcome + Send + Sync> =
            Arc::new(move |key: Key, raw: &mut String| self.on_key(key, raw));
        Handler::from_arc(handler)
    }
}

/// Keeps a field's key handler stable while `(mode, on_commit)` is unchanged.
#[derive(Default)]
pub struct CommitHandlerCache {
    memo: Memo<(Mode, Callback<String>), KeyHandler>,
}

impl CommitHandlerCache {
    pub fn handler(&mut self, mode: Mode, on_commit: &Callback<String>) -> KeyHandler {
        self.memo
            .get_or_update((mode, on_commit.clone()), |(mode, on_commit)| {
                debug!("Building {:?} commit handler", mode);
                CommitController::new(*mode, on_commit.clone()).into_handler()
            })
    }
}
