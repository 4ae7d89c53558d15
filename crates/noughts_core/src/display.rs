//! Render sink the turn controller reports to.
//!
//! The controller only ever writes to a [`GameDisplay`]; it never reads
//! anything back. Front ends implement the trait for their own surface.

use crate::rules::WinPattern;
use crate::types::Cells;

/// Output surface for a game.
pub trait GameDisplay {
    /// Draws the board.
    fn render_board(&mut self, cells: &Cells);

    /// Shows a status line.
    fn set_status(&mut self, status: &str);

    /// Enables or disables cell input.
    fn set_input_enabled(&mut self, enabled: bool);

    /// Marks the cells of a winning line.
    fn highlight_pattern(&mut self, pattern: &WinPattern);

    /// Removes any winning-line marks.
    fn clear_highlights(&mut self) {}
}

impl<D: GameDisplay + ?Sized> GameDisplay for &mut D {
    fn render_board(&mut self, cells: &Cells) {
        (**self).render_board(cells);
    }

    fn set_status(&mut self, status: &str) {
        (**self).set_status(status);
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        (**self).set_input_enabled(enabled);
    }

    fn highlight_pattern(&mut self, pattern: &WinPattern) {
        (**self).highlight_pattern(pattern);
    }

    fn clear_highlights(&mut self) {
        (**self).clear_highlights();
    }
}

/// A single call made on a [`RecordingDisplay`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    /// `render_board`
    Board(Cells),
    /// `set_status`
    Status(String),
    /// `set_input_enabled`
    InputEnabled(bool),
    /// `highlight_pattern`
    Highlight(WinPattern),
    /// `clear_highlights`
    ClearHighlights,
}

/// Headless display that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingDisplay {
    events: Vec<DisplayEvent>,
}

impl RecordingDisplay {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded calls.
    pub fn events(&self) -> &[DisplayEvent] {
        &self.events
    }

    /// Returns and clears the recorded calls.
    pub fn take(&mut self) -> Vec<DisplayEvent> {
        std::mem::take(&mut self.events)
    }

    /// Returns the most recent status line.
    pub fn last_status(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|event| match event {
            DisplayEvent::Status(status) => Some(status.as_str()),
            _ => None,
        })
    }

    /// Returns the most recent input-enabled flag.
    pub fn input_enabled(&self) -> Option<bool> {
        self.events.iter().rev().find_map(|event| match event {
            DisplayEvent::InputEnabled(enabled) => Some(*enabled),
            _ => None,
        })
    }
}

impl GameDisplay for RecordingDisplay {
    fn render_board(&mut self, cells: &Cells) {
        self.events.push(DisplayEvent::Board(*cells));
    }

    fn set_status(&mut self, status: &str) {
        self.events.push(DisplayEvent::Status(status.to_string()));
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.events.push(DisplayEvent::InputEnabled(enabled));
    }

    fn highlight_pattern(&mut self, pattern: &WinPattern) {
        self.events.push(DisplayEvent::Highlight(*pattern));
    }

    fn clear_highlights(&mut self) {
        self.events.push(DisplayEvent::ClearHighlights);
    }
}
