use std::sync::{Arc, Mutex};
use todo_core::{
    bind, sanitize, Attach, Callback, CommitOutcome, Key, ListenerTable, MemoMap, TextField,
    TodoId,
};

// Records every committed string
fn recorder() -> (Callback<String>, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let callback = Callback::new(move |text: String| sink.lock().unwrap().push(text));
    (callback, seen)
}

fn typed(field: &mut TextField, text: &str) {
    for c in text.chars() {
        field.handle_key(Key::Char(c));
    }
}

#[test]
fn test_add_mode_trims_and_resets() {
    let (on_save, seen) = recorder();
    let mut field = TextField::add(Some("What needs to be done?".to_string()));
    field.bind(&on_save, None);

    typed(&mut field, "  Trimmed todo  ");
    assert_eq!(field.handle_key(Key::Enter), CommitOutcome::Committed);

    assert_eq!(*seen.lock().unwrap(), vec!["Trimmed todo".to_string()]);
    assert_eq!(field.value(), "");
}

#[test]
fn test_add_mode_single_char_is_kept() {
    let (on_save, seen) = recorder();
    let mut field = TextField::add(None);
    field.bind(&on_save, None);

    typed(&mut field, "a");
    assert_eq!(field.handle_key(Key::Enter), CommitOutcome::Rejected);

    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(field.value(), "a");
}

#[test]
fn test_short_values_never_commit() {
    let (on_save, seen) = recorder();

    for input in ["", "x", " ", "      ", " y "] {
        let mut field = TextField::add(None);
        field.bind(&on_save, None);
        typed(&mut field, input);
        field.handle_key(Key::Enter);
        assert_eq!(field.value(), input);
    }
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn test_non_enter_keys_never_commit() {
    let (on_save, seen) = recorder();
    let mut field = TextField::edit("a perfectly valid title");
    field.bind(&on_save, None);

    for key in [Key::Tab, Key::Esc, Key::Up, Key::Down, Key::Other, Key::Home] {
        assert_ne!(field.handle_key(key), CommitOutcome::Committed);
    }
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn test_commit_is_sanitized() {
    let (on_save, seen) = recorder();
    let mut field = TextField::add(None);
    field.bind(&on_save, None);

    typed(&mut field, r#" <script>alert("xss")</script> & "q" 's' /x/ "#);
    field.handle_key(Key::Enter);

    assert_eq!(
        *seen.lock().unwrap(),
        vec![sanitize(r#"<script>alert("xss")</script> & "q" 's' /x/"#)]
    );
    assert_eq!(
        seen.lock().unwrap()[0],
        "&lt;script&gt;alert(&quot;xss&quot;)&lt;&#x2F;script&gt; &amp; &quot;q&quot; &#x27;s&#x27; &#x2F;x&#x2F;"
    );
}

#[test]
fn test_one_commit_per_enter() {
    let (on_save, seen) = recorder();
    let mut field = TextField::edit("keep me");
    field.bind(&on_save, None);

    field.handle_key(Key::Enter);
    field.handle_key(Key::Enter);

    // Edit mode keeps the value, so each Enter commits it again exactly once.
    assert_eq!(seen.lock().unwrap().len(), 2);
    assert_eq!(field.value(), "keep me");
}

#[test]
fn test_edit_blur_without_callback() {
    let (on_save, seen) = recorder();
    let mut field = TextField::edit("unchanged");
    field.bind(&on_save, None);

    field.blur();

    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(field.value(), "unchanged");
}

#[test]
fn test_edit_blur_does_not_commit() {
    let (on_save, seen) = recorder();
    let blurred = Arc::new(Mutex::new(0));
    let sink = blurred.clone();
    let on_blur = Callback::new(move |()| *sink.lock().unwrap() += 1);
    let mut field = TextField::edit("draft");
    field.bind(&on_save, Some(&on_blur));

    field.blur();

    assert_eq!(*blurred.lock().unwrap(), 1);
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn test_handler_identity_across_renders() {
    let (on_save, _) = recorder();
    let mut field = TextField::add(None);

    let first = field.bind(&on_save, None);
    let second = field.bind(&on_save, None);
    assert!(first.on_key.ptr_eq(&second.on_key));

    let (replacement, _) = recorder();
    let third = field.bind(&replacement, None);
    assert!(!third.on_key.ptr_eq(&second.on_key));
}

#[test]
fn test_bound_id_handlers_and_listener_churn() {
    let toggled = Arc::new(Mutex::new(Vec::new()));
    let sink = toggled.clone();
    let on_toggle: Callback<TodoId> = Callback::new(move |id: TodoId| sink.lock().unwrap().push(id));
    let ids = [TodoId::new(), TodoId::new()];

    let mut handlers = MemoMap::new();
    let mut listeners = ListenerTable::new();

    // Two identical renders: the second attaches nothing new.
    for pass in 0..2 {
        for id in ids {
            let handler = handlers.get_or_update(id, (on_toggle.clone(), id), |(cb, id)| {
                bind(cb, *id)
            });
            let attach = listeners.attach(id, &handler);
            if pass == 0 {
                assert_eq!(attach, Attach::New);
            } else {
                assert_eq!(attach, Attach::Kept);
            }
        }
    }
    assert_eq!(listeners.churn().attached, 2);
    assert_eq!(listeners.churn().detached, 0);

    // A new callback reference means new handlers for every id.
    let on_toggle_v2: Callback<TodoId> = Callback::new(|_| {});
    for id in ids {
        let handler = handlers.get_or_update(id, (on_toggle_v2.clone(), id), |(cb, id)| {
            bind(cb, *id)
        });
        assert_eq!(listeners.attach(id, &handler), Attach::Replaced);
    }

    listeners.retain(|id| *id == ids[0]);
    handlers.retain(|id| *id == ids[0]);
    assert_eq!(handlers.len(), 1);
    assert_eq!(listeners.len(), 1);
    assert!(toggled.lock().unwrap().is_empty());
}
