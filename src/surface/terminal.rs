use std::io::Write;
use std::ops::Range;

use log::warn;

use super::EditorSurface;
use crate::debugger::BreakpointSet;
use crate::parser::split_source;

/// Lines shown above and below the execution marker.
const CONTEXT_LINES: usize = 3;

/// Gutter listing: breakpoint dot, execution marker, 1-based line number.
pub fn render_listing<S: AsRef<str>>(
    lines: &[S],
    breakpoints: &BreakpointSet,
    highlight: Option<usize>,
    range: Range<usize>,
) -> String {
    let end = range.end.min(lines.len());
    let mut out = String::new();
    for i in range.start.min(end)..end {
        let dot = if breakpoints.contains(i) { '●' } else { ' ' };
        let marker = if highlight == Some(i) { '>' } else { ' ' };
        out.push_str(&format!("{}{} {:>4} | {}\n", dot, marker, i + 1, lines[i].as_ref()));
    }
    out
}

/// Surface printing to a terminal (or any writer).
pub struct TerminalSurface<W: Write> {
    out: W,
    lines: Vec<String>,
    highlight: Option<usize>,
    breakpoints: BreakpointSet,
    toggles: Vec<usize>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            lines: Vec::new(),
            highlight: None,
            breakpoints: BreakpointSet::new(),
            toggles: Vec::new(),
        }
    }

    /// Queue a gutter toggle typed at the prompt.
    pub fn queue_toggle(&mut self, line: usize) {
        self.toggles.push(line);
    }

    pub fn listing(&self) -> String {
        render_listing(&self.lines, &self.breakpoints, self.highlight, 0..self.lines.len())
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            warn!("terminal write failed: {}", e);
        }
    }
}

impl<W: Write> EditorSurface for TerminalSurface<W> {
    fn set_text(&mut self, text: &str) {
        self.lines = split_source(text);
    }

    fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn highlight_line(&mut self, line: Option<usize>) {
        self.highlight = line;
        if let Some(line) = line {
            let window = line.saturating_sub(CONTEXT_LINES)..line + CONTEXT_LINES + 1;
            let text = render_listing(&self.lines, &self.breakpoints, self.highlight, window);
            self.write(&text);
        }
    }

    fn show_breakpoints(&mut self, breakpoints: &BreakpointSet) {
        self.breakpoints = breakpoints.clone();
    }

    fn take_breakpoint_toggles(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.toggles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_marks_breakpoints_and_current_line() {
        let lines = ["nop", "ecall"];
        let bp: BreakpointSet = [1].into_iter().collect();
        let text = render_listing(&lines, &bp, Some(0), 0..10);
        assert_eq!(text, " >    1 | nop\n●     2 | ecall\n");
    }

    #[test]
    fn highlight_prints_window() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.set_text("a\nb\nc\nd\ne\nf\ng\nh\ni");
        surface.highlight_line(Some(6));
        let out = String::from_utf8(surface.into_inner()).unwrap();
        assert!(out.starts_with("      4 | d\n"));
        assert!(out.contains(" >    7 | g\n"));
        assert!(out.ends_with("      9 | i\n"));
    }

    #[test]
    fn text_round_trips() {
        let mut surface = TerminalSurface::new(Vec::new());
        surface.set_text("nop\necall\n");
        assert_eq!(surface.text(), "nop\necall\n");
        surface.queue_toggle(1);
        assert_eq!(surface.take_breakpoint_toggles(), vec![1]);
        assert!(surface.take_breakpoint_toggles().is_empty());
    }
}
