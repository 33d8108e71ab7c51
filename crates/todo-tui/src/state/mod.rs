use crossbeam_channel::{Receiver, Sender};
use todo_core::config::UiConfig;
use todo_core::{
    bind, Callback, CommitOutcome, Filter, Key, ListenerTable, Memo, MemoMap, TextField, Todo,
    TodoId, TodoStore,
};
use tracing::{debug, info, warn};

/// Areas of the UI that can have focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusArea {
    NewTodo,
    List,
}

/// State changes requested by component callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add(String),
    Save(TodoId, String),
    CancelEdit,
    Toggle(TodoId),
    Destroy(TodoId),
    ToggleAll(bool),
    ClearCompleted,
    SetFilter(Filter),
}

/// Listener targets the list and footer expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Toggle(TodoId),
    Destroy(TodoId),
    ToggleAll,
    ClearCompleted,
    Filter(Filter),
}

/// External callbacks handed to the components. Each one only queues an
/// [`Action`]; the state applies them once the handler has returned.
#[derive(Clone)]
pub struct Callbacks {
    pub on_add: Callback<String>,
    pub on_save: Callback<(TodoId, String)>,
    pub on_cancel_edit: Callback<()>,
    pub on_toggle: Callback<TodoId>,
    pub on_destroy: Callback<TodoId>,
    pub on_toggle_all: Callback<bool>,
    pub on_clear_completed: Callback<()>,
    pub on_filter: Callback<Filter>,
}

fn dispatcher<A: 'static>(
    tx: &Sender<Action>,
    to_action: impl Fn(A) -> Action + Send + Sync + 'static,
) -> Callback<A> {
    let tx = tx.clone();
    Callback::new(move |arg| {
        let action = to_action(arg);
        if let Err(e) = tx.send(action) {
            warn!("Dropping action, state is gone: {:?}", e.into_inner());
        }
    })
}

impl Callbacks {
    pub fn new(tx: &Sender<Action>) -> Self {
        Self {
            on_add: dispatcher(tx, Action::Add),
            on_save: dispatcher(tx, |(id, title): (TodoId, String)| Action::Save(id, title)),
            on_cancel_edit: dispatcher(tx, |()| Action::CancelEdit),
            on_toggle: dispatcher(tx, Action::Toggle),
            on_destroy: dispatcher(tx, Action::Destroy),
            on_toggle_all: dispatcher(tx, Action::ToggleAll),
            on_clear_completed: dispatcher(tx, |()| Action::ClearCompleted),
            on_filter: dispatcher(tx, Action::SetFilter),
        }
    }
}

/// An item currently being edited inline.
pub struct EditSession {
    pub id: TodoId,
    pub field: TextField,
}

type BoundHandlers<K> = MemoMap<K, (Callback<K>, K), Callback<()>>;

/// Application state: the to-do store plus the UI state around it.
pub struct AppState {
    pub store: TodoStore,
    pub filter: Filter,
    pub focus: FocusArea,
    pub selected: usize,
    pub new_todo: TextField,
    pub editing: Option<EditSession>,
    pub show_help: bool,
    pub should_quit: bool,
    callbacks: Callbacks,
    actions: Receiver<Action>,
    edit_save: Memo<(Callback<(TodoId, String)>, TodoId), Callback<String>>,
    toggle_handlers: BoundHandlers<TodoId>,
    destroy_handlers: BoundHandlers<TodoId>,
    filter_handlers: BoundHandlers<Filter>,
    toggle_all_handler: Memo<(Callback<bool>, bool), Callback<()>>,
    listeners: ListenerTable<Target>,
}

impl AppState {
    pub fn new(ui: &UiConfig) -> Self {
        let (tx, actions) = crossbeam_channel::unbounded();
        let mut state = Self {
            store: TodoStore::new(),
            filter: Filter::All,
            focus: FocusArea::NewTodo,
            selected: 0,
            new_todo: TextField::add(Some(ui.placeholder.clone())),
            editing: None,
            show_help: ui.show_help,
            should_quit: false,
            callbacks: Callbacks::new(&tx),
            actions,
            edit_save: Memo::new(),
            toggle_handlers: MemoMap::new(),
            destroy_handlers: MemoMap::new(),
            filter_handlers: MemoMap::new(),
            toggle_all_handler: Memo::new(),
            listeners: ListenerTable::new(),
        };
        state.bind_handlers();
        state
    }

    /// To-dos shown under the current filter, in order.
    pub fn visible_todos(&self) -> Vec<&Todo> {
        self.store.visible(self.filter).collect()
    }

    pub fn selected_id(&self) -> Option<TodoId> {
        self.store.visible(self.filter).nth(self.selected).map(|todo| todo.id)
    }

    pub fn listeners(&self) -> &ListenerTable<Target> {
        &self.listeners
    }

    pub fn callbacks(&self) -> &Callbacks {
        &self.callbacks
    }

    /// Render pass: refresh every handler from the current props and attach
    /// them to the listener table. Unchanged props keep their identities, so
    /// an idle re-render attaches nothing.
    pub fn bind_handlers(&mut self) {
        let callbacks = &self.callbacks;

        self.new_todo.bind(&callbacks.on_add, None);

        if let Some(session) = &mut self.editing {
            let on_save = self.edit_save.get_or_update(
                (callbacks.on_save.clone(), session.id),
                |(on_save, id)| bind_edit_save(on_save, *id),
            );
            session.field.bind(&on_save, Some(&callbacks.on_cancel_edit));
        }

        let visible: Vec<TodoId> = self.store.visible(self.filter).map(|t| t.id).collect();
        for &id in &visible {
            let toggle = self.toggle_handlers.get_or_update(
                id,
                (callbacks.on_toggle.clone(), id),
                |(cb, id)| bind(cb, *id),
            );
            self.listeners.attach(Target::Toggle(id), &toggle);

            let destroy = self.destroy_handlers.get_or_update(
                id,
                (callbacks.on_destroy.clone(), id),
                |(cb, id)| bind(cb, *id),
            );
            self.listeners.attach(Target::Destroy(id), &destroy);
        }

        // Drop listeners and cached handlers for items no longer rendered
        self.listeners.retain(|target| match target {
            Target::Toggle(id) | Target::Destroy(id) => visible.contains(id),
            _ => true,
        });
        self.toggle_handlers.retain(|id| visible.contains(id));
        self.destroy_handlers.retain(|id| visible.contains(id));

        let target_checked = !self.store.all_completed();
        let toggle_all = self.toggle_all_handler.get_or_update(
            (callbacks.on_toggle_all.clone(), target_checked),
            |(cb, checked)| bind(cb, *checked),
        );
        self.listeners.attach(Target::ToggleAll, &toggle_all);
        self.listeners
            .attach(Target::ClearCompleted, &callbacks.on_clear_completed);

        for filter in Filter::ALL {
            let handler = self.filter_handlers.get_or_update(
                filter,
                (callbacks.on_filter.clone(), filter),
                |(cb, filter)| bind(cb, *filter),
            );
            self.listeners.attach(Target::Filter(filter), &handler);
        }
    }

    /// Route a key press to the focused component.
    pub fn handle_key(&mut self, key: Key) {
        if self.editing.is_some() {
            match key {
                Key::Esc | Key::Tab => self.blur_edit(),
                _ => {
                    if let Some(session) = &mut self.editing {
                        if session.field.handle_key(key) == CommitOutcome::Rejected {
                            debug!("Edit commit rejected, keeping field open");
                        }
                    }
                }
            }
        } else {
            match self.focus {
                FocusArea::NewTodo => self.handle_new_todo_key(key),
                FocusArea::List => self.handle_list_key(key),
            }
        }

        self.apply_actions();
        self.bind_handlers();
    }

    fn handle_new_todo_key(&mut self, key: Key) {
        match key {
            Key::Tab | Key::Down | Key::Esc => self.focus = FocusArea::List,
            _ => {
                self.new_todo.handle_key(key);
            }
        }
    }

    fn handle_list_key(&mut self, key: Key) {
        let selected = self.selected_id();
        match key {
            Key::Up => self.selected = self.selected.saturating_sub(1),
            Key::Down => {
                let visible = self.store.visible(self.filter).count();
                if self.selected + 1 < visible {
                    self.selected += 1;
                }
            }
            Key::Tab | Key::Char('n') | Key::Char('i') => self.focus = FocusArea::NewTodo,
            Key::Enter | Key::Char('e') => self.start_edit(),
            Key::Char(' ') | Key::Char('x') => {
                if let Some(id) = selected {
                    self.listeners.dispatch(&Target::Toggle(id));
                }
            }
            Key::Delete | Key::Char('d') => {
                if let Some(id) = selected {
                    self.listeners.dispatch(&Target::Destroy(id));
                }
            }
            Key::Char('a') => {
                self.listeners.dispatch(&Target::ToggleAll);
            }
            Key::Char('c') => {
                self.listeners.dispatch(&Target::ClearCompleted);
            }
            Key::Char('1') => {
                self.listeners.dispatch(&Target::Filter(Filter::All));
            }
            Key::Char('2') => {
                self.listeners.dispatch(&Target::Filter(Filter::Active));
            }
            Key::Char('3') => {
                self.listeners.dispatch(&Target::Filter(Filter::Completed));
            }
            Key::Char('?') => self.show_help = !self.show_help,
            Key::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    /// Open the inline editor on the selected item.
    pub fn start_edit(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if let Some(todo) = self.store.get(id) {
            debug!("Editing todo {}", id);
            self.editing = Some(EditSession {
                id,
                field: TextField::edit(todo.title.clone()),
            });
            self.bind_handlers();
        }
    }

    /// Focus left the inline editor.
    pub fn blur_edit(&mut self) {
        if let Some(session) = &self.editing {
            session.field.blur();
        }
    }

    /// The terminal window lost focus.
    pub fn focus_lost(&mut self) {
        self.blur_edit();
        self.apply_actions();
        self.bind_handlers();
    }

    /// Drain and apply every queued action.
    pub fn apply_actions(&mut self) {
        while let Ok(action) = self.actions.try_recv() {
            self.apply(action);
        }
    }

    fn apply(&mut self, action: Action) {
        debug!("Applying {:?}", action);
        match action {
            Action::Add(title) => {
                self.store.add(title);
            }
            Action::Save(id, title) => {
                self.store.save(id, title);
                self.close_editor(id);
            }
            Action::CancelEdit => self.editing = None,
            Action::Toggle(id) => {
                self.store.toggle(id);
            }
            Action::Destroy(id) => {
                self.store.destroy(id);
                self.close_editor(id);
            }
            Action::ToggleAll(completed) => self.store.toggle_all(completed),
            Action::ClearCompleted => {
                let removed = self.store.clear_completed();
                info!("Cleared {} completed todos", removed);
            }
            Action::SetFilter(filter) => {
                self.filter = filter;
                self.selected = 0;
            }
        }

        let visible = self.store.visible(self.filter).count();
        self.selected = self.selected.min(visible.saturating_sub(1));
    }

    fn close_editor(&mut self, id: TodoId) {
        if self.editing.as_ref().is_some_and(|session| session.id == id) {
            self.editing = None;
        }
    }
}

/// Commit callback for an edit field, with the item id bound in.
fn bind_edit_save(on_save: &Callback<(TodoId, String)>, id: TodoId) -> Callback<String> {
    let on_save = on_save.clone();
    Callback::new(move |title: String| on_save.call((id, title)))
}
