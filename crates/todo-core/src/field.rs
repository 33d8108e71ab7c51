//! Text field hosting the commit and blur controllers.
//!
//! The field owns its raw value and cursor. Binding props is the render
//! step: it refreshes the memoised handlers from the current callbacks and
//! returns them, so repeated renders with the same callbacks hand out the
//! same handler identities.

use tracing::trace;

use crate::blur::BlurHandlerCache;
use crate::commit::{CommitHandlerCache, CommitOutcome, KeyHandler, Mode};
use crate::handler::Callback;
use crate::key::Key;

/// Handlers currently bound to a field.
#[derive(Clone, Debug)]
pub struct FieldHandlers {
    pub on_key: KeyHandler,
    pub on_blur: Callback<()>,
}

pub struct TextField {
    mode: Mode,
    value: String,
    /// Cursor position in chars, `0..=len`.
    cursor: usize,
    placeholder: Option<String>,
    commit_cache: CommitHandlerCache,
    blur_cache: BlurHandlerCache,
    handlers: Option<FieldHandlers>,
}

impl TextField {
    /// New-todo field, starting empty.
    pub fn add(placeholder: Option<String>) -> Self {
        Self::with_value(Mode::Add, String::new(), placeholder)
    }

    /// Inline edit field seeded with the current title; cursor at the end.
    pub fn edit(initial: impl Into<String>) -> Self {
        Self::with_value(Mode::Edit, initial.into(), None)
    }

    fn with_value(mode: Mode, value: String, placeholder: Option<String>) -> Self {
        let cursor = value.chars().count();
        Self {
            mode,
            value,
            cursor,
            placeholder,
            commit_cache: CommitHandlerCache::default(),
            blur_cache: BlurHandlerCache::default(),
            handlers: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn handlers(&self) -> Option<&FieldHandlers> {
        self.handlers.as_ref()
    }

    /// Refresh the bound handlers from the current callbacks.
    pub fn bind(
        &mut self,
        on_save: &Callback<String>,
        on_blur: Option<&Callback<()>>,
    ) -> FieldHandlers {
        let handlers = FieldHandlers {
            on_key: self.commit_cache.handler(self.mode, on_save),
            on_blur: self.blur_cache.handler(on_blur),
        };
        self.handlers = Some(handlers.clone());
        handlers
    }

    /// Dispatch `key` to the bound key handler, then apply editing.
    pub fn handle_key(&mut self, key: Key) -> CommitOutcome {
        let outcome = match &self.handlers {
            Some(handlers) => handlers.on_key.handle(key, &mut self.value),
            None => CommitOutcome::Ignored,
        };

        match outcome {
            CommitOutcome::Committed => {
                self.cursor = self.cursor.min(self.len());
                trace!("Commit done, cursor at {}", self.cursor);
            }
            CommitOutcome::Rejected => {}
            CommitOutcome::Ignored => self.edit_with(key),
        }
        outcome
    }

    /// Focus left the field.
    pub fn blur(&self) {
        if let Some(handlers) = &self.handlers {
            handlers.on_blur.call(());
        }
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn edit_with(&mut self, key: Key) {
        match key {
            Key::Char(c) if !c.is_control() => {
                let at = self.byte_index(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
            }
            Key::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
            }
            Key::Delete if self.cursor < self.len() => {
                let at = self.byte_index(self.cursor);
                self.value.remove(at);
            }
            Key::Left => self.cursor = self.cursor.saturating_sub(1),
            Key::Right => self.cursor = (self.cursor + 1).min(self.len()),
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.len(),
            _ => {}
        }
    }
}
