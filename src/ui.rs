// 🖥️ Arrow-key menu
// Inline ratatui viewport driven by crossterm key events.

use crate::error::Result;
use crate::prompt::{MenuState, OptionSelector};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal, TerminalOptions, Viewport,
};
use std::io::{self, Write};

/// Keeps the terminal in raw mode for as long as it lives.
struct RawModeGuard;

impl RawModeGuard {
    fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(RawModeGuard)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Confirm(usize),
    Cancel,
}

/// Up/Down (or k/j) move, Enter confirms, Esc or Ctrl-C cancels.
pub fn apply_key(menu: &mut MenuState, key: KeyEvent) -> KeyOutcome {
    if key.kind != KeyEventKind::Press {
        return KeyOutcome::Continue;
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => menu.previous(),
        KeyCode::Down | KeyCode::Char('j') => menu.next(),
        KeyCode::Enter => return KeyOutcome::Confirm(menu.position()),
        KeyCode::Esc => return KeyOutcome::Cancel,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return KeyOutcome::Cancel
        }
        _ => {}
    }

    KeyOutcome::Continue
}

#[derive(Debug, Default)]
pub struct ArrowSelector;

impl ArrowSelector {
    pub fn new() -> Self {
        ArrowSelector
    }
}

impl OptionSelector for ArrowSelector {
    fn select(&mut self, title: &str, options: &[&str]) -> Result<Option<usize>> {
        if options.is_empty() {
            return Ok(None);
        }

        let mut stdout = io::stdout();
        stdout.flush()?;

        let guard = RawModeGuard::acquire()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::with_options(
            backend,
            TerminalOptions {
                // borders + options + key help
                viewport: Viewport::Inline(options.len() as u16 + 3),
            },
        )?;

        let mut menu = MenuState::new(options.len());
        let mut area = Rect::default();
        let outcome = loop {
            terminal.draw(|f| {
                area = f.size();
                render_menu(f, title, options, &menu);
            })?;

            if let Event::Key(key) = event::read()? {
                match apply_key(&mut menu, key) {
                    KeyOutcome::Continue => {}
                    KeyOutcome::Confirm(position) => break Some(position),
                    KeyOutcome::Cancel => break None,
                }
            }
        };

        // Leave the cursor below the menu so later output does not overwrite it
        terminal.set_cursor(0, area.bottom().saturating_sub(1))?;
        terminal.show_cursor()?;
        drop(guard);
        writeln!(stdout)?;

        log::debug!("menu '{title}' -> {outcome:?}");
        Ok(outcome)
    }
}

fn render_menu(f: &mut Frame, title: &str, options: &[&str], menu: &MenuState) {
    let mut lines: Vec<Line> = options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            if i == menu.selected() {
                Line::from(vec![
                    Span::styled("➡ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                    Span::styled(*option, Style::default().add_modifier(Modifier::BOLD)),
                ])
            } else {
                Line::from(vec![Span::raw("   "), Span::raw(*option)])
            }
        })
        .collect();

    lines.push(Line::from(vec![
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Mover | "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Elegir | "),
        Span::styled("Esc", Style::default().fg(Color::Red)),
        Span::raw(" Salir"),
    ]));

    let menu_widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string()),
    );
    f.render_widget(menu_widget, f.size());
}
