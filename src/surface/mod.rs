mod buffer;
mod terminal;

pub use buffer::BufferSurface;
pub use terminal::{render_listing, TerminalSurface};

use crate::debugger::BreakpointSet;

/// The little an editor widget has to offer the debugger.
///
/// Any front end (a GUI text widget, a terminal, a test double) plugs in by
/// implementing this; the debugger never touches toolkit types.
pub trait EditorSurface {
    fn set_text(&mut self, text: &str);

    fn text(&self) -> String;

    /// Move the execution marker; `None` clears it.
    fn highlight_line(&mut self, line: Option<usize>);

    /// Redraw the breakpoint gutter.
    fn show_breakpoints(&mut self, breakpoints: &BreakpointSet);

    /// Lines the user toggled in the gutter since the last call.
    fn take_breakpoint_toggles(&mut self) -> Vec<usize>;
}
