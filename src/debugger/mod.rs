mod breakpoints;
mod context;
mod inspect;
mod instrument;
mod mapping;
mod scanner;
mod session;
mod stepping;

pub use breakpoints::BreakpointSet;
pub use context::DebugContext;
pub use inspect::{memory_rows, parse_address, register_rows, MemoryRow, RegisterRow, ABI_NAMES};
pub use instrument::{build_instrumented_document, InstrumentedDocument};
pub use mapping::{instruction_index, resolve_highlight_line, resolve_in, INSTRUCTION_WIDTH};
pub use scanner::{scan_instruction_index, total_instructions, ScanHit};
pub use session::{Assembler, ExecutionEngine};
pub use stepping::{ExecStatus, RunMode};
