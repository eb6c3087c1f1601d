use log::trace;

use super::breakpoints::BreakpointSet;
use super::instrument::{build_instrumented_document, InstrumentedDocument};
use super::scanner::scan_instruction_index;
use crate::isa::InstructionSet;

/// Bytes per RV32 instruction.
pub const INSTRUCTION_WIDTH: u32 = 4;

/// 1-based index of the instruction at `pc`, counting from `text_base`.
pub fn instruction_index(pc: u32, text_base: u32) -> Option<usize> {
    let offset = pc.checked_sub(text_base)?;
    Some((offset / INSTRUCTION_WIDTH) as usize + 1)
}

/// Source line to highlight when the engine is about to run instruction `k`
/// of an already instrumented document.
///
/// The k-th instruction is located in the document that was executed, then
/// mapped back through the line origins recorded at instrumentation time.
/// Each injected trap before the hit shifts the executed document down by
/// one line, and an injected trap itself resolves to the line it guards.
pub fn resolve_in<I>(doc: &InstrumentedDocument, k: usize, isa: &I) -> Option<usize>
where
    I: InstructionSet + ?Sized,
{
    let hit = scan_instruction_index(doc.lines(), k, isa)?;
    let line = doc.source_line(hit.line);
    trace!(
        "instruction {} -> executed line {} ({} trap(s)) -> source line {:?}",
        k,
        hit.line,
        hit.traps,
        line
    );
    line
}

/// Source line to highlight for instruction `k`, rebuilding the instrumented
/// document from `source` and `breakpoints`.
pub fn resolve_highlight_line<S, I>(
    k: usize,
    source: &[S],
    breakpoints: &BreakpointSet,
    isa: &I,
) -> Option<usize>
where
    S: AsRef<str>,
    I: InstructionSet + ?Sized,
{
    let doc = build_instrumented_document(source, breakpoints, isa);
    resolve_in(&doc, k, isa)
}
