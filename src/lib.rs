//! Source-line mapping and breakpoint injection for a RISC-V assembly IDE.
//!
//! Breakpoints are implemented by assembling a copy of the program with an
//! `ebreak` in front of every breakpointed instruction. The engine then
//! reports program counters against that copy, and [`debugger`] maps them
//! back to lines of the file the user is editing.

pub mod debugger;
pub mod error;
pub mod executor;
pub mod highlight;
pub mod isa;
pub mod parser;
pub mod prefs;
pub mod surface;

pub use debugger::{
    build_instrumented_document, resolve_highlight_line, scan_instruction_index, BreakpointSet,
    InstrumentedDocument,
};
pub use error::{DebugError, Result};
