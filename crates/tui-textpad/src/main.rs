//! TUI text pad
//!
//! A single-window text pad built on `textpad-core` with crossterm and ratatui: a text box,
//! a live character count and case shortcuts with snapshot undo/redo.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p tui-textpad -- [seed_file]
//! ```
//!
//! The optional file only seeds the initial text; nothing is written back. On close the
//! text is copied to the system clipboard (disable with `clipboard_on_exit = false`).
//!
//! # Shortcuts
//!
//! - Ctrl+Shift+L / Ctrl+Shift+U / Ctrl+Shift+T: lowercase / uppercase / title case the selection
//! - Ctrl+Shift+/ (Ctrl+?): title case
//! - Ctrl+Z: undo
//! - Ctrl+Shift+Z, Ctrl+Y: redo
//! - Ctrl+Q: quit
//! - Ctrl+A: select all
//! - Arrows, Home/End: move the caret (with Shift: extend the selection)
//! - Backspace/Delete, Enter, Tab: edit
//!
//! Ctrl+Shift shortcuts need a terminal that speaks the enhanced keyboard protocol (kitty,
//! foot, WezTerm, recent Alacritty). Elsewhere Alt+L / Alt+U / Alt+T are bound to the case
//! commands, Ctrl+Y redoes, and Ctrl+Shift+Z behaves like Ctrl+Z.
//!
//! The shortcut table can be changed under `[keys]` in the config file, see [`config`].

mod config;
mod error;
mod logging;

use std::env;
use std::fs;
use std::io::{self, stdout};

use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use textpad_core::{
    CommandResult, EditorCommand, EditorStateManager, FormLayout, Key, KeyCombo, KeyOutcome,
    Keymap, Modifiers,
    text::{TAB_WIDTH, char_cell_width, line_content_len},
};

use crate::config::Config;
use crate::error::AppError;

const COUNT_CAPTION: &str = "Characters:";

struct App {
    state: EditorStateManager,
    layout: FormLayout,
    size: (u16, u16),
    clipboard_on_exit: bool,
    hints: String,
    status_message: String,
    should_quit: bool,
}

impl App {
    fn new(text: &str, config: &Config) -> Result<Self, AppError> {
        let options = config.editor_options()?;
        let hints = shortcut_hints(&options.keymap);
        Ok(Self {
            state: EditorStateManager::with_options(text, options),
            layout: FormLayout::default(),
            size: (0, 0),
            clipboard_on_exit: config.clipboard_on_exit,
            hints,
            status_message: String::new(),
            should_quit: false,
        })
    }

    /// Add shortcuts that still work when the terminal cannot report Shift together with Ctrl.
    fn use_legacy_key_fallbacks(&mut self) {
        let mut keymap = self.state.keymap().clone();
        keymap.bind_legacy_fallbacks();
        self.hints = shortcut_hints(&keymap);
        self.state.set_keymap(keymap);
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
        self.layout = FormLayout::compute(width, height);
        let inner = self.layout.text_box.inner();
        self.state
            .set_viewport(inner.width as usize, inner.height as usize);
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let Some(combo) = key_combo(&key) else {
            return;
        };

        match self.state.handle_key(combo) {
            Ok(KeyOutcome::Quit) => self.should_quit = true,
            Ok(KeyOutcome::Shortcut { command, result }) => {
                self.status_message = shortcut_status(command, result);
            }
            Ok(KeyOutcome::Edited(_)) | Ok(KeyOutcome::Ignored) => self.status_message.clear(),
            Err(err) => {
                log::warn!("{combo} failed: {err}");
                self.status_message = format!("{combo} failed: {err}");
            }
        }
    }

    fn handle_paste(&mut self, text: String) {
        // Terminals deliver pasted line breaks as '\r'.
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        if let Err(err) = self.state.paste(&text) {
            log::warn!("paste failed: {err}");
        }
        self.status_message.clear();
    }

    /// Hand the final text to the system clipboard.
    fn copy_text_to_clipboard(&self) {
        if !self.clipboard_on_exit {
            return;
        }
        let text = self.state.document().get_text();
        let chars = self.state.document().char_count();
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(()) => log::info!("copied {chars} chars to the clipboard"),
            Err(err) => log::warn!("could not copy text to the clipboard: {err}"),
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if self.size != (area.width, area.height) {
            self.resize(area.width, area.height);
        }

        self.render_text_box(frame);
        self.render_count(frame);
        self.render_hints(frame);
    }

    fn render_text_box(&self, frame: &mut Frame) {
        let area = tui_rect(self.layout.text_box);
        if area.is_empty() {
            return;
        }

        let mut block = Block::bordered().title(" TextPad ");
        if !self.status_message.is_empty() {
            block = block.title_bottom(Line::from(format!(" {} ", self.status_message)));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.is_empty() {
            return;
        }

        let document = self.state.document();
        let text = document.text();
        let scroll = self.state.scroll_state();
        let width = inner.width as usize;
        let selection = document.selection_start()..document.selection_end();
        let selected_style = Style::default().add_modifier(Modifier::REVERSED);

        let last_line = (scroll.top + inner.height as usize).min(text.len_lines());
        let mut lines = Vec::with_capacity(last_line.saturating_sub(scroll.top));
        for line_idx in scroll.top..last_line {
            let line_start = text.line_to_char(line_idx);
            let line_len = line_content_len(text, line_idx);
            let mut spans = Vec::new();
            let mut run = String::new();
            let mut run_selected = false;
            let mut x = 0;

            for (i, ch) in text.line(line_idx).chars().take(line_len).enumerate() {
                let cell_width = char_cell_width(ch);
                let visible = x >= scroll.left && x + cell_width <= scroll.left + width;
                x += cell_width;
                if !visible {
                    continue;
                }

                let is_selected = selection.contains(&(line_start + i));
                if is_selected != run_selected && !run.is_empty() {
                    spans.push(styled_run(std::mem::take(&mut run), run_selected, selected_style));
                }
                run_selected = is_selected;
                if ch == '\t' {
                    run.push_str(&" ".repeat(TAB_WIDTH));
                } else {
                    run.push(ch);
                }
            }
            if !run.is_empty() {
                spans.push(styled_run(run, run_selected, selected_style));
            }

            // A selected line break shows as one highlighted cell.
            let break_offset = line_start + line_len;
            if line_idx + 1 < text.len_lines()
                && selection.contains(&break_offset)
                && x >= scroll.left
                && x < scroll.left + width
            {
                spans.push(Span::styled(" ", selected_style));
            }
            lines.push(Line::from(spans));
        }
        frame.render_widget(Paragraph::new(lines), inner);

        let (caret_line, _) = document.caret_line_col();
        let caret_x = document.caret_cell_x();
        if caret_line >= scroll.top && caret_x >= scroll.left {
            let row = caret_line - scroll.top;
            let col = caret_x - scroll.left;
            if row < inner.height as usize && col < width {
                frame.set_cursor_position((inner.x + col as u16, inner.y + row as u16));
            }
        }
    }

    fn render_count(&self, frame: &mut Frame) {
        let caption = tui_rect(self.layout.count_caption);
        if !caption.is_empty() {
            frame.render_widget(
                Paragraph::new(COUNT_CAPTION).alignment(Alignment::Right),
                caption,
            );
        }

        let value = tui_rect(self.layout.count_value);
        if !value.is_empty() {
            frame.render_widget(
                Paragraph::new(format!(" {}", self.state.count_label()))
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                value,
            );
        }
    }

    fn render_hints(&self, frame: &mut Frame) {
        let area = tui_rect(self.layout.hint_bar);
        if area.is_empty() {
            return;
        }
        let hints =
            Paragraph::new(self.hints.as_str()).style(Style::default().bg(Color::Blue).fg(Color::White));
        frame.render_widget(hints, area);
    }
}

fn styled_run(text: String, selected: bool, selected_style: Style) -> Span<'static> {
    if selected {
        Span::styled(text, selected_style)
    } else {
        Span::raw(text)
    }
}

fn tui_rect(rect: textpad_core::Rect) -> ratatui::layout::Rect {
    ratatui::layout::Rect::new(rect.x, rect.y, rect.width, rect.height)
}

/// Convert a crossterm key event into the engine's key combination.
fn key_combo(event: &KeyEvent) -> Option<KeyCombo> {
    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Esc => Key::Esc,
        KeyCode::F(n) => Key::F(n),
        _ => return None,
    };

    let mut modifiers = Modifiers::empty();
    if event.modifiers.contains(KeyModifiers::SHIFT) {
        modifiers |= Modifiers::SHIFT;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        modifiers |= Modifiers::CONTROL;
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        modifiers |= Modifiers::ALT;
    }
    if event.modifiers.contains(KeyModifiers::SUPER) {
        modifiers |= Modifiers::SUPER;
    }

    Some(KeyCombo::new(key, modifiers))
}

/// One hint per bound command, using its first binding.
fn shortcut_hints(keymap: &Keymap) -> String {
    EditorCommand::ALL
        .iter()
        .filter_map(|&command| {
            let combo = keymap.bindings_for(command).into_iter().next()?;
            let label = match command {
                EditorCommand::Lowercase => "lower",
                EditorCommand::Uppercase => "UPPER",
                EditorCommand::TitleCase => "Title",
                EditorCommand::Undo => "undo",
                EditorCommand::Redo => "redo",
                EditorCommand::Quit => "quit",
            };
            Some(format!("{combo}:{label}"))
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn shortcut_status(command: EditorCommand, result: CommandResult) -> String {
    match (command, result) {
        (EditorCommand::Undo, CommandResult::Unchanged) => "Nothing to undo".to_string(),
        (EditorCommand::Redo, CommandResult::Unchanged) => "Nothing to redo".to_string(),
        (EditorCommand::Undo, _) => "Undone".to_string(),
        (EditorCommand::Redo, _) => "Redone".to_string(),
        (_, CommandResult::Unchanged) => "Selection unchanged".to_string(),
        (command, _) => format!("Applied {command}"),
    }
}

fn main() -> Result<(), AppError> {
    let (config, config_path) = Config::load()?;
    let log_path = config.log_path();
    logging::init(&log_path, config.log_level)?;
    match &config_path {
        Some(path) => log::info!("config loaded from {}", path.display()),
        None => log::info!("no config file, using defaults"),
    }

    let text = match env::args_os().nth(1) {
        Some(path) => {
            log::info!("seeding text from {}", path.to_string_lossy());
            fs::read_to_string(&path)?
        }
        None => String::new(),
    };

    let mut app = App::new(&text, &config)?;

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    // Without the enhanced protocol Ctrl+Shift+letter is indistinguishable from Ctrl+letter.
    let enhanced_keys = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced_keys {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    } else {
        log::warn!(
            "terminal does not report Ctrl+Shift shortcuts; using Alt+L/U/T and Ctrl+Y instead"
        );
        app.use_legacy_key_fallbacks();
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    if enhanced_keys {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        log::error!("terminal error: {err}");
    }
    app.copy_text_to_clipboard();

    result.map_err(AppError::from)
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if app.should_quit {
            break;
        }

        match event::read()? {
            Event::Key(key) => app.handle_key_event(key),
            Event::Paste(text) => app.handle_paste(text),
            Event::Resize(width, height) => app.resize(width, height),
            _ => {}
        }
    }

    Ok(())
}
