// ⌨️ Prompt abstractions
// "Read a line" and "pick one of N options", so the shell can run against a
// real terminal or against scripted input.

use crate::error::{PensionError, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

// ============================================================================
// TRAITS
// ============================================================================

pub trait LineReader {
    /// Show `prompt` and read one line. `None` means end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

pub trait OptionSelector {
    /// Let the user pick one of `options`. Returns the 1-based position,
    /// or `None` if the selection was cancelled.
    fn select(&mut self, title: &str, options: &[&str]) -> Result<Option<usize>>;
}

// ============================================================================
// MENU STATE
// ============================================================================

/// Highlighted entry of a vertical menu. Moving past either end wraps around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    selected: usize,
    len: usize,
}

impl MenuState {
    pub fn new(len: usize) -> Self {
        MenuState { selected: 0, len }
    }

    pub fn next(&mut self) {
        if self.len == 0 {
            return;
        }
        self.selected = (self.selected + 1) % self.len;
    }

    pub fn previous(&mut self) {
        if self.len == 0 {
            return;
        }
        self.selected = (self.selected + self.len - 1) % self.len;
    }

    /// 0-based index of the highlighted entry
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// 1-based position of the highlighted entry
    pub fn position(&self) -> usize {
        self.selected + 1
    }
}

// ============================================================================
// LINE EDITOR
// ============================================================================

/// Line reader backed by rustyline, with in-memory history.
pub struct EditorReader {
    editor: DefaultEditor,
}

impl EditorReader {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| PensionError::Terminal(e.to_string()))?;
        Ok(EditorReader { editor })
    }
}

impl LineReader for EditorReader {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(None),
            Err(ReadlineError::Io(err)) => Err(PensionError::Io(err)),
            Err(err) => Err(PensionError::Terminal(err.to_string())),
        }
    }
}

// ============================================================================
// SHARED READER
// ============================================================================

/// One input handle read from several places (the shell and the numbered
/// menu) without each of them locking stdin on its own.
impl<R: LineReader> LineReader for Rc<RefCell<R>> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.borrow_mut().read_line(prompt)
    }
}

// ============================================================================
// NUMBERED SELECTOR
// ============================================================================

/// Menu without raw mode: prints numbered options and reads the number
/// through a `LineReader`.
pub struct LineSelector<R, W> {
    reader: R,
    output: W,
}

impl<R: LineReader, W: Write> LineSelector<R, W> {
    pub fn new(reader: R, output: W) -> Self {
        LineSelector { reader, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: LineReader, W: Write> OptionSelector for LineSelector<R, W> {
    fn select(&mut self, title: &str, options: &[&str]) -> Result<Option<usize>> {
        if options.is_empty() {
            return Ok(None);
        }

        let prompt = format!("Opción (1-{}): ", options.len());
        loop {
            writeln!(self.output, "\n{title}")?;
            for (i, option) in options.iter().enumerate() {
                writeln!(self.output, "  {}. {}", i + 1, option)?;
            }
            self.output.flush()?;

            let Some(line) = self.reader.read_line(&prompt)? else {
                return Ok(None);
            };

            match line.trim().parse::<usize>() {
                Ok(choice) if (1..=options.len()).contains(&choice) => return Ok(Some(choice)),
                _ => {
                    log::warn!("rejected menu choice {:?}", line.trim());
                    writeln!(self.output, "⚠️ Opción no válida: {}", line.trim())?;
                }
            }
        }
    }
}
