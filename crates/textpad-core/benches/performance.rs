use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use textpad_core::{
    Command, CommandExecutor, CursorCommand, EditCommand, EditorStateManager, HistoryCommand,
    Key, KeyCombo, TextTransform,
};

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        out.push_str(&format!(
            "{i:06} the quick brown fox jumps over the lazy dog (textpad-core benchmark line)\n"
        ));
    }
    // Remove the final '\n' to avoid creating an extra trailing empty line.
    out.pop();
    out
}

fn bench_typing_records_snapshots(c: &mut Criterion) {
    let text = large_text(50_000);
    c.bench_function("typing_middle/100_snapshots", |b| {
        b.iter_batched(
            || {
                let mut manager = EditorStateManager::new(&text);
                let middle = manager.document().char_count() / 2;
                manager
                    .execute(Command::Cursor(CursorCommand::Select {
                        start: middle,
                        length: 0,
                    }))
                    .unwrap();
                manager
            },
            |mut manager| {
                for _ in 0..100 {
                    manager.handle_key(KeyCombo::plain(Key::Char('x'))).unwrap();
                }
                black_box(manager.char_count());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_undo_redo_walk(c: &mut Criterion) {
    let text = large_text(10_000);
    let mut executor = CommandExecutor::new(&text);
    for _ in 0..200 {
        executor
            .execute(Command::Edit(EditCommand::InsertText {
                text: "y".to_string(),
            }))
            .unwrap();
    }

    c.bench_function("history/undo_redo_200", |b| {
        b.iter(|| {
            for _ in 0..200 {
                executor
                    .execute(Command::History(HistoryCommand::Undo))
                    .unwrap();
            }
            for _ in 0..200 {
                executor
                    .execute(Command::History(HistoryCommand::Redo))
                    .unwrap();
            }
            black_box(executor.undo_depth());
        })
    });
}

fn bench_title_case_whole_document(c: &mut Criterion) {
    let text = large_text(5_000);
    c.bench_function("transform/title_case_5k_lines", |b| {
        b.iter_batched(
            || {
                let mut executor = CommandExecutor::new(&text);
                executor
                    .execute(Command::Cursor(CursorCommand::SelectAll))
                    .unwrap();
                executor
            },
            |mut executor| {
                executor
                    .execute(Command::Transform(TextTransform::TitleCase))
                    .unwrap();
                black_box(executor.document().char_count());
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    bench_typing_records_snapshots,
    bench_undo_redo_walk,
    bench_title_case_whole_document
);
criterion_main!(benches);
