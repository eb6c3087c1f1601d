use std::path::{Path, PathBuf};

use log::{debug, info};

use super::breakpoints::BreakpointSet;
use super::instrument::{build_instrumented_document, InstrumentedDocument};
use super::mapping::{instruction_index, resolve_in};
use super::stepping::RunMode;
use crate::isa::InstructionSet;
use crate::parser::split_source;

/// Session state the mapping operations run against.
///
/// The source is a snapshot taken when the session (re)starts; edits made
/// in the editor afterwards are only picked up by the next start or hot
/// reload.
#[derive(Debug, Default)]
pub struct DebugContext {
    source_path: Option<PathBuf>,
    source: Vec<String>,
    breakpoints: BreakpointSet,
    instrumented: Option<InstrumentedDocument>,
    highlight: Option<usize>,
    mode: RunMode,
    debugging: bool,
}

impl DebugContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn set_source_path(&mut self, path: impl Into<PathBuf>) {
        self.source_path = Some(path.into());
    }

    pub fn source(&self) -> &[String] {
        &self.source
    }

    pub fn breakpoints(&self) -> &BreakpointSet {
        &self.breakpoints
    }

    pub fn toggle_breakpoint(&mut self, line: usize) -> bool {
        self.breakpoints.toggle(line)
    }

    pub fn instrumented(&self) -> Option<&InstrumentedDocument> {
        self.instrumented.as_ref()
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: RunMode) {
        self.mode = mode;
    }

    pub fn is_debugging(&self) -> bool {
        self.debugging
    }

    /// Instrument `text` against the current breakpoints without touching
    /// the session. The result only becomes the mapping target once
    /// [`DebugContext::commit`] is called for it.
    pub fn stage<I>(&self, text: &str, isa: &I) -> (Vec<String>, InstrumentedDocument)
    where
        I: InstructionSet + ?Sized,
    {
        let source = split_source(text);
        let doc = build_instrumented_document(&source, &self.breakpoints, isa);
        (source, doc)
    }

    /// Make `doc` the document highlights are resolved against. Call this
    /// only once the engine is running the program built from it.
    pub fn commit(
        &mut self,
        source: Vec<String>,
        doc: InstrumentedDocument,
    ) -> &InstrumentedDocument {
        debug!(
            "session source: {} lines, {} effective breakpoint(s)",
            source.len(),
            doc.injected_count()
        );
        self.source = source;
        self.instrumented.insert(doc)
    }

    /// Stage and commit in one go.
    pub fn instrument<I>(&mut self, text: &str, isa: &I) -> &InstrumentedDocument
    where
        I: InstructionSet + ?Sized,
    {
        let (source, doc) = self.stage(text, isa);
        self.commit(source, doc)
    }

    pub fn begin(&mut self) {
        self.debugging = true;
        self.mode = RunMode::Paused;
        self.highlight = None;
        info!(
            "debug session started for {}",
            self.source_path
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<unsaved>".to_string())
        );
    }

    /// Recompute the highlighted line from the engine's program counter.
    pub fn update_highlight<I>(&mut self, pc: u32, text_base: u32, isa: &I) -> Option<usize>
    where
        I: InstructionSet + ?Sized,
    {
        self.highlight = match (&self.instrumented, instruction_index(pc, text_base)) {
            (Some(doc), Some(k)) => resolve_in(doc, k, isa),
            _ => None,
        };
        self.highlight
    }

    /// End the session. Breakpoints survive unless `clear_breakpoints`.
    pub fn stop(&mut self, clear_breakpoints: bool) {
        if self.debugging {
            info!("debug session stopped");
        }
        self.debugging = false;
        self.mode = RunMode::Paused;
        self.instrumented = None;
        self.highlight = None;
        if clear_breakpoints {
            self.breakpoints.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::Rv32Table;

    #[test]
    fn highlight_follows_pc() {
        let mut ctx = DebugContext::new();
        ctx.toggle_breakpoint(2);
        ctx.instrument("li a0, 1\n# comment\necall", &Rv32Table);
        ctx.begin();
        assert_eq!(ctx.update_highlight(0, 0, &Rv32Table), Some(0));
        assert_eq!(ctx.update_highlight(4, 0, &Rv32Table), Some(2));
        assert_eq!(ctx.update_highlight(8, 0, &Rv32Table), Some(2));
        assert_eq!(ctx.update_highlight(12, 0, &Rv32Table), None);
    }

    #[test]
    fn stop_discards_ephemeral_state() {
        let mut ctx = DebugContext::new();
        ctx.toggle_breakpoint(0);
        ctx.instrument("nop", &Rv32Table);
        ctx.begin();
        ctx.update_highlight(0, 0, &Rv32Table);
        ctx.stop(false);
        assert!(!ctx.is_debugging());
        assert!(ctx.instrumented().is_none());
        assert_eq!(ctx.highlight(), None);
        assert!(ctx.breakpoints().contains(0));
        ctx.stop(true);
        assert!(ctx.breakpoints().is_empty());
    }

    #[test]
    fn staged_document_is_not_used_until_committed() {
        let mut ctx = DebugContext::new();
        ctx.instrument("li a0, 1\nla a1, msg", &Rv32Table);
        ctx.begin();
        ctx.toggle_breakpoint(0);
        let (source, doc) = ctx.stage("li a0, 1\nla a1, msg", &Rv32Table);
        assert_eq!(doc.injected_count(), 1);
        assert_eq!(ctx.update_highlight(4, 0, &Rv32Table), Some(1));

        ctx.commit(source, doc);
        assert_eq!(ctx.update_highlight(4, 0, &Rv32Table), Some(0));
    }

    #[test]
    fn no_highlight_without_instrumentation() {
        let mut ctx = DebugContext::new();
        assert_eq!(ctx.update_highlight(0, 0, &Rv32Table), None);
    }
}
