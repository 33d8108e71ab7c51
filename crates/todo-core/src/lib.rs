pub mod blur;
pub mod commit;
pub mod config;
pub mod error;
pub mod field;
pub mod handler;
pub mod key;
pub mod listeners;
pub mod logging;
pub mod sanitize;
pub mod todo;
pub mod validate;

pub use blur::{BlurController, BlurHandlerCache};
pub use commit::{CommitController, CommitHandlerCache, CommitOutcome, KeyHandler, Mode};
pub use config::Config;
pub use error::{Error, Result};
pub use field::{FieldHandlers, TextField};
pub use handler::{bind, Callback, Handler, Memo, MemoMap};
pub use key::Key;
pub use listeners::{Attach, ListenerChurn, ListenerTable};
pub use logging::init_tracing;
pub use sanitize::sanitize;
pub use todo::{Filter, Todo, TodoId, TodoStore};
pub use validate::{is_valid, MIN_LENGTH};
