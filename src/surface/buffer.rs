use super::EditorSurface;
use crate::debugger::BreakpointSet;

/// Headless surface keeping everything in memory.
#[derive(Debug, Default)]
pub struct BufferSurface {
    text: String,
    highlight: Option<usize>,
    history: Vec<Option<usize>>,
    breakpoints: BreakpointSet,
    toggles: Vec<usize>,
}

impl BufferSurface {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    /// Simulate a click in the breakpoint gutter.
    pub fn click_gutter(&mut self, line: usize) {
        self.toggles.push(line);
    }

    pub fn edit(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlight
    }

    /// Every highlight request received, oldest first.
    pub fn history(&self) -> &[Option<usize>] {
        &self.history
    }

    pub fn gutter(&self) -> &BreakpointSet {
        &self.breakpoints
    }
}

impl EditorSurface for BufferSurface {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn highlight_line(&mut self, line: Option<usize>) {
        self.highlight = line;
        self.history.push(line);
    }

    fn show_breakpoints(&mut self, breakpoints: &BreakpointSet) {
        self.breakpoints = breakpoints.clone();
    }

    fn take_breakpoint_toggles(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.toggles)
    }
}
