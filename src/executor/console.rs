use std::collections::VecDeque;

/// Lines kept in the output pane.
pub const MAX_LINES: usize = 50;

/// Scrolling output pane holding the most recent lines.
#[derive(Debug, Default)]
pub struct Console {
    lines: VecDeque<String>,
    unread: usize,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message; multi-line messages are split.
    pub fn push(&mut self, message: &str) {
        for line in message.lines() {
            if self.lines.len() == MAX_LINES {
                self.lines.pop_front();
            }
            self.lines.push_back(line.to_string());
            self.unread = (self.unread + 1).min(MAX_LINES);
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.unread = 0;
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn text(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n")
    }

    /// Lines pushed since the previous call.
    pub fn take_unread(&mut self) -> Vec<String> {
        let skip = self.lines.len() - self.unread;
        self.unread = 0;
        self.lines.iter().skip(skip).cloned().collect()
    }
}
