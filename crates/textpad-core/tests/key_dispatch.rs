use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use textpad_core::{
    CommandResult, EditorCommand, EditorOptions, EditorStateManager, Key, KeyCombo, KeyOutcome,
    Keymap, Modifiers, StateChangeType, TextState,
};

const CTRL: Modifiers = Modifiers::CONTROL;

fn ctrl_shift() -> Modifiers {
    Modifiers::CONTROL | Modifiers::SHIFT
}

fn type_text(manager: &mut EditorStateManager, text: &str) {
    for c in text.chars() {
        let key = match c {
            '\n' => Key::Enter,
            c => Key::Char(c),
        };
        manager.handle_key(KeyCombo::plain(key)).unwrap();
    }
}

fn press(manager: &mut EditorStateManager, c: char, modifiers: Modifiers) -> KeyOutcome {
    manager
        .handle_key(KeyCombo::new(Key::Char(c), modifiers))
        .unwrap()
}

#[test]
fn test_uppercase_undo_redo_scenario() {
    let mut manager = EditorStateManager::new("");
    type_text(&mut manager, "abc");
    press(&mut manager, 'a', CTRL);

    let outcome = press(&mut manager, 'u', ctrl_shift());
    assert_eq!(
        outcome,
        KeyOutcome::Shortcut {
            command: EditorCommand::Uppercase,
            result: CommandResult::TextChanged,
        }
    );
    assert_eq!(manager.document().get_text(), "ABC");

    press(&mut manager, 'z', CTRL);
    assert_eq!(manager.document().snapshot(), TextState::new(0, 3, "abc"));

    press(&mut manager, 'z', ctrl_shift());
    assert_eq!(manager.document().get_text(), "ABC");

    press(&mut manager, 'z', CTRL);
    press(&mut manager, 'y', CTRL);
    assert_eq!(manager.document().get_text(), "ABC");
}

#[test]
fn test_terminal_reporting_variants_resolve_to_same_shortcut() {
    let mut manager = EditorStateManager::new("Mixed");
    press(&mut manager, 'a', CTRL);

    // Uppercase letter without an explicit Shift flag, as legacy terminals report it.
    let outcome = press(&mut manager, 'L', CTRL);
    assert!(matches!(
        outcome,
        KeyOutcome::Shortcut {
            command: EditorCommand::Lowercase,
            ..
        }
    ));
    assert_eq!(manager.document().get_text(), "mixed");
}

#[test]
fn test_alternate_title_case_binding() {
    let mut manager = EditorStateManager::new("HELLO wORLD");
    press(&mut manager, 'a', CTRL);
    press(&mut manager, '?', ctrl_shift());
    assert_eq!(manager.document().get_text(), "Hello World");
}

#[test]
fn test_quit_shortcut_is_reported_to_frontend() {
    let mut manager = EditorStateManager::new("text");
    assert_eq!(press(&mut manager, 'q', CTRL), KeyOutcome::Quit);
    assert_eq!(manager.document().get_text(), "text");
}

#[test]
fn test_unbound_keys_fall_through_to_text_box() {
    let mut manager = EditorStateManager::new("");
    type_text(&mut manager, "Hi\nyo");
    assert_eq!(manager.document().get_text(), "Hi\nyo");

    let outcome = manager.handle_key(KeyCombo::plain(Key::Backspace)).unwrap();
    assert_eq!(outcome, KeyOutcome::Edited(CommandResult::TextChanged));
    assert_eq!(manager.document().get_text(), "Hi\ny");

    assert_eq!(press(&mut manager, 'k', CTRL), KeyOutcome::Ignored);
    assert_eq!(
        manager.handle_key(KeyCombo::plain(Key::F(5))).unwrap(),
        KeyOutcome::Ignored
    );
}

#[test]
fn test_custom_keymap_overrides_defaults() {
    let mut keymap = Keymap::default();
    keymap.bind_str("alt+u", "uppercase").unwrap();
    keymap.bind_str("ctrl+shift+u", "none").unwrap();

    let mut manager = EditorStateManager::with_options(
        "abc",
        EditorOptions {
            keymap,
            ..EditorOptions::default()
        },
    );
    press(&mut manager, 'a', CTRL);

    assert_eq!(press(&mut manager, 'u', ctrl_shift()), KeyOutcome::Ignored);
    assert_eq!(manager.document().get_text(), "abc");

    press(&mut manager, 'u', Modifiers::ALT);
    assert_eq!(manager.document().get_text(), "ABC");
}

#[test]
fn test_default_keymap_lists_bindings() {
    let keymap = Keymap::default();
    let redo: Vec<String> = keymap
        .bindings_for(EditorCommand::Redo)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(redo, vec!["Ctrl+Shift+Z", "Ctrl+Y"]);
    assert_eq!(keymap.len(), 8);
}

#[test]
fn test_subscribers_see_each_change() {
    let seen: Arc<Mutex<Vec<StateChangeType>>> = Arc::default();
    let mut manager = EditorStateManager::new("");
    let sink = Arc::clone(&seen);
    manager.subscribe(move |change| {
        assert_eq!(change.new_version, change.old_version + 1);
        sink.lock().unwrap().push(change.change_type);
    });

    type_text(&mut manager, "a");
    press(&mut manager, 'a', CTRL);
    press(&mut manager, 'l', ctrl_shift());
    manager.set_viewport(20, 5);

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            StateChangeType::DocumentModified,
            StateChangeType::SelectionChanged,
            StateChangeType::ViewportChanged,
        ]
    );
    assert_eq!(manager.version(), 3);
}
