use log::debug;

use super::breakpoints::BreakpointSet;
use crate::isa::InstructionSet;
use crate::parser::is_instruction_bearing;

/// Copy of the source with a trap line injected in front of every
/// breakpointed instruction. This is what the assembler actually sees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstrumentedDocument {
    lines: Vec<String>,
    /// Source line each output line came from. An injected trap points at
    /// the line it guards.
    origins: Vec<usize>,
    injected: Vec<bool>,
}

impl InstrumentedDocument {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn injected_count(&self) -> usize {
        self.injected.iter().filter(|&&i| i).count()
    }

    pub fn is_injected(&self, line: usize) -> bool {
        self.injected.get(line).copied().unwrap_or(false)
    }

    /// Source line that `line` of this document corresponds to.
    pub fn source_line(&self, line: usize) -> Option<usize> {
        self.origins.get(line).copied()
    }

    /// File contents handed to the assembler: every line followed by `\n`.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

/// Build the instrumented copy of `source`.
///
/// Output length is `source.len()` plus the number of breakpoints that sit on
/// instruction-bearing lines. Original lines are emitted unmodified.
pub fn build_instrumented_document<S, I>(
    source: &[S],
    breakpoints: &BreakpointSet,
    isa: &I,
) -> InstrumentedDocument
where
    S: AsRef<str>,
    I: InstructionSet + ?Sized,
{
    let mut doc = InstrumentedDocument {
        lines: Vec::with_capacity(source.len() + breakpoints.len()),
        origins: Vec::with_capacity(source.len() + breakpoints.len()),
        injected: Vec::with_capacity(source.len() + breakpoints.len()),
    };

    for (index, line) in source.iter().enumerate() {
        let line = line.as_ref();
        if breakpoints.contains(index) && is_instruction_bearing(line, isa) {
            doc.lines.push(isa.trap_mnemonic().to_string());
            doc.origins.push(index);
            doc.injected.push(true);
        }
        doc.lines.push(line.to_string());
        doc.origins.push(index);
        doc.injected.push(false);
    }

    debug!(
        "instrumented {} lines with {} trap(s)",
        source.len(),
        doc.injected_count()
    );
    doc
}
