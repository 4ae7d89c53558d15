//! Line-mode terminal rendering.

use crossterm::style::{StyledContent, Stylize};
use noughts_core::{Cell, Cells, GameDisplay, Marker, WinPattern};
use std::io::{self, Write};
use tracing::warn;

/// Prompt printed whenever cell input opens.
pub const PROMPT: &str = "Enter a cell (1-9) or a command.";

/// Draws the board and status lines to any writer.
///
/// Write failures are logged and otherwise ignored; the game keeps running.
#[derive(Debug)]
pub struct TerminalDisplay<W> {
    out: W,
    cells: Cells,
    highlight: Option<WinPattern>,
    input_enabled: bool,
}

impl<W: Write> TerminalDisplay<W> {
    /// Creates a display that writes to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            cells: [Cell::Empty; 9],
            highlight: None,
            input_enabled: false,
        }
    }

    /// Returns whether cell input is open.
    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Prints a line outside the board and status flow.
    pub fn notice(&mut self, text: &str) {
        let result = writeln!(self.out, "{}", text.dark_grey()).and_then(|()| self.out.flush());
        self.report(result);
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn styled_cell(&self, index: usize) -> StyledContent<String> {
        let lit = self.highlight.is_some_and(|pattern| pattern.contains(&index));
        let content = match self.cells[index] {
            Cell::Empty => (index + 1).to_string().dark_grey(),
            Cell::Occupied(Marker::X) => Marker::X.symbol().to_string().blue().bold(),
            Cell::Occupied(Marker::O) => Marker::O.symbol().to_string().red().bold(),
        };
        if lit { content.on_green() } else { content }
    }

    fn draw(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        for row in 0..3 {
            let base = row * 3;
            writeln!(
                self.out,
                " {} | {} | {}",
                self.styled_cell(base),
                self.styled_cell(base + 1),
                self.styled_cell(base + 2)
            )?;
            if row < 2 {
                writeln!(self.out, "{}", "---+---+---".dark_grey())?;
            }
        }
        writeln!(self.out)?;
        self.out.flush()
    }

    fn report(&self, result: io::Result<()>) {
        if let Err(e) = result {
            warn!(error = %e, "Failed to write to terminal");
        }
    }
}

impl<W: Write> GameDisplay for TerminalDisplay<W> {
    fn render_board(&mut self, cells: &Cells) {
        self.cells = *cells;
        let result = self.draw();
        self.report(result);
    }

    fn set_status(&mut self, status: &str) {
        let result = writeln!(self.out, "{}", status.yellow()).and_then(|()| self.out.flush());
        self.report(result);
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        let opened = enabled && !self.input_enabled;
        self.input_enabled = enabled;
        if opened {
            self.notice(PROMPT);
        }
    }

    fn highlight_pattern(&mut self, pattern: &WinPattern) {
        self.highlight = Some(*pattern);
        let result = self.draw();
        self.report(result);
    }

    fn clear_highlights(&mut self) {
        self.highlight = None;
    }
}
