use pretty_assertions::assert_eq;
use textpad_core::{CursorState, EditorStateManager, Key, KeyCombo, Modifiers, ScrollState};

fn key(manager: &mut EditorStateManager, key: Key, modifiers: Modifiers) {
    manager.handle_key(KeyCombo::new(key, modifiers)).unwrap();
}

#[test]
fn test_shift_arrows_extend_selection() {
    let mut manager = EditorStateManager::new("hello");
    key(&mut manager, Key::End, Modifiers::empty());
    key(&mut manager, Key::Left, Modifiers::SHIFT);
    key(&mut manager, Key::Left, Modifiers::SHIFT);

    assert_eq!(manager.document().selected_text(), "lo");
    assert_eq!(
        manager.get_cursor_state(),
        CursorState {
            line: 0,
            column: 3,
            selection_start: 3,
            selection_length: 2,
        }
    );

    key(&mut manager, Key::Right, Modifiers::empty());
    assert_eq!(manager.document().caret(), 5);
    assert!(!manager.document().has_selection());
}

#[test]
fn test_backspace_removes_whole_grapheme() {
    let mut manager = EditorStateManager::new("a\u{1F44D}\u{1F3FD}");
    key(&mut manager, Key::End, Modifiers::empty());
    key(&mut manager, Key::Backspace, Modifiers::empty());
    assert_eq!(manager.document().get_text(), "a");
}

#[test]
fn test_home_end_stay_on_line() {
    let mut manager = EditorStateManager::new("one\r\ntwo");
    key(&mut manager, Key::End, Modifiers::empty());
    assert_eq!(manager.document().caret(), 3);

    key(&mut manager, Key::Down, Modifiers::empty());
    key(&mut manager, Key::Home, Modifiers::SHIFT);
    assert_eq!(manager.document().selected_text(), "two");
}

#[test]
fn test_paste_is_a_single_undo_step() {
    let mut manager = EditorStateManager::new("");
    manager.paste("pasted text").unwrap();
    assert_eq!(manager.count_label(), "11");

    key(&mut manager, Key::Char('z'), Modifiers::CONTROL);
    assert_eq!(manager.document().get_text(), "");
}

#[test]
fn test_view_scrolls_to_caret_after_restore() {
    let text: String = (0..50).map(|i| format!("line {i}\n")).collect();
    let mut manager = EditorStateManager::new(&text);
    manager.set_viewport(20, 10);

    for _ in 0..40 {
        key(&mut manager, Key::Down, Modifiers::empty());
    }
    assert_eq!(manager.scroll_state(), ScrollState { top: 31, left: 0 });

    manager.paste("x").unwrap();
    for _ in 0..40 {
        key(&mut manager, Key::Up, Modifiers::empty());
    }
    assert_eq!(manager.scroll_state().top, 0);

    // Undo puts the caret back at line 40 and the view follows it.
    key(&mut manager, Key::Char('z'), Modifiers::CONTROL);
    assert_eq!(manager.get_cursor_state().line, 40);
    assert_eq!(manager.scroll_state().top, 31);
}
