use pretty_assertions::assert_eq;
use textpad_core::{
    Command, CommandExecutor, CommandResult, CursorCommand, EditCommand, EditorStateManager,
    HistoryCommand, Key, KeyCombo, Modifiers, TextState, TextTransform,
};

fn type_text(executor: &mut CommandExecutor, text: &str) {
    for c in text.chars() {
        executor
            .execute(Command::Edit(EditCommand::InsertText {
                text: c.to_string(),
            }))
            .unwrap();
    }
}

fn undo(executor: &mut CommandExecutor) -> CommandResult {
    executor
        .execute(Command::History(HistoryCommand::Undo))
        .unwrap()
}

fn redo(executor: &mut CommandExecutor) -> CommandResult {
    executor
        .execute(Command::History(HistoryCommand::Redo))
        .unwrap()
}

#[test]
fn test_undo_single_edit_restores_prior_state() {
    let mut executor = CommandExecutor::empty();
    type_text(&mut executor, "ab");
    let prior = executor.snapshot();

    type_text(&mut executor, "c");
    assert_eq!(executor.document().get_text(), "abc");

    assert_eq!(undo(&mut executor), CommandResult::TextChanged);
    assert_eq!(executor.snapshot(), prior);
    assert_eq!(executor.snapshot(), TextState::new(2, 0, "ab"));
}

#[test]
fn test_redo_restores_state_before_undo() {
    let mut executor = CommandExecutor::empty();
    type_text(&mut executor, "xyz");
    let before_undo = executor.snapshot();

    undo(&mut executor);
    assert_eq!(executor.document().get_text(), "xy");
    assert!(executor.can_redo());

    assert_eq!(redo(&mut executor), CommandResult::TextChanged);
    assert_eq!(executor.snapshot(), before_undo);
    assert!(!executor.can_redo());
}

#[test]
fn test_undo_on_empty_history_is_noop() {
    let mut executor = CommandExecutor::new("seed");
    assert_eq!(undo(&mut executor), CommandResult::Unchanged);
    assert_eq!(executor.document().get_text(), "seed");

    assert_eq!(redo(&mut executor), CommandResult::Unchanged);
    assert_eq!(executor.document().get_text(), "seed");
}

#[test]
fn test_undo_to_the_root_gives_empty_text() {
    let mut executor = CommandExecutor::empty();
    type_text(&mut executor, "hi");

    undo(&mut executor);
    undo(&mut executor);
    assert_eq!(executor.snapshot(), TextState::empty());
    assert_eq!(undo(&mut executor), CommandResult::Unchanged);
    assert_eq!(executor.redo_depth(), 2);
}

#[test]
fn test_uppercase_scenario_restores_selection() {
    let mut executor = CommandExecutor::empty();
    type_text(&mut executor, "abc");
    executor
        .execute(Command::Cursor(CursorCommand::SelectAll))
        .unwrap();

    executor
        .execute(Command::Transform(TextTransform::Uppercase))
        .unwrap();
    assert_eq!(executor.snapshot(), TextState::new(0, 3, "ABC"));

    undo(&mut executor);
    assert_eq!(executor.snapshot(), TextState::new(0, 3, "abc"));

    redo(&mut executor);
    assert_eq!(executor.snapshot(), TextState::new(0, 3, "ABC"));
}

#[test]
fn test_undo_restores_selection_replaced_by_typing() {
    let mut executor = CommandExecutor::new("hello world");
    executor
        .execute(Command::Cursor(CursorCommand::Select {
            start: 6,
            length: 5,
        }))
        .unwrap();
    type_text(&mut executor, "X");
    assert_eq!(executor.document().get_text(), "hello X");

    undo(&mut executor);
    assert_eq!(executor.snapshot(), TextState::new(6, 5, "hello world"));
    assert_eq!(executor.document().selected_text(), "world");
}

#[test]
fn test_fresh_edit_after_undo_clears_redo() {
    let mut executor = CommandExecutor::empty();
    type_text(&mut executor, "ab");
    undo(&mut executor);
    assert!(executor.can_redo());

    type_text(&mut executor, "z");
    assert_eq!(executor.document().get_text(), "az");
    assert!(!executor.can_redo());
    assert_eq!(redo(&mut executor), CommandResult::Unchanged);
    assert_eq!(executor.document().get_text(), "az");
}

#[test]
fn test_selection_changes_are_not_recorded() {
    let mut executor = CommandExecutor::empty();
    type_text(&mut executor, "ab");
    let depth = executor.undo_depth();

    executor
        .execute(Command::Cursor(CursorCommand::Left { extend: true }))
        .unwrap();
    executor
        .execute(Command::Cursor(CursorCommand::SelectAll))
        .unwrap();
    assert_eq!(executor.undo_depth(), depth);
}

#[test]
fn test_history_limit_bounds_undo() {
    let mut executor = CommandExecutor::with_history_limit("", 3);
    type_text(&mut executor, "abcd");

    assert_eq!(executor.undo_depth(), 2);
    undo(&mut executor);
    undo(&mut executor);
    assert_eq!(executor.document().get_text(), "ab");
    assert_eq!(undo(&mut executor), CommandResult::Unchanged);
}

#[test]
fn test_undo_back_to_seed_text_clears_modified() {
    let mut manager = EditorStateManager::new("seed");
    manager
        .handle_key(KeyCombo::new(Key::End, Modifiers::empty()))
        .unwrap();
    manager.handle_key(KeyCombo::plain(Key::Char('!'))).unwrap();
    assert!(manager.get_document_state().is_modified);

    let undo = KeyCombo::new(Key::Char('z'), Modifiers::CONTROL);
    manager.handle_key(undo).unwrap();
    assert_eq!(manager.document().get_text(), "seed");
    assert!(!manager.get_document_state().is_modified);
    assert!(!manager.is_modified());

    let redo = KeyCombo::new(Key::Char('y'), Modifiers::CONTROL);
    manager.handle_key(redo).unwrap();
    assert!(manager.is_modified());
}
