use std::path::{Path, PathBuf};

use super::stepping::ExecStatus;

/// CPU/memory model that runs assembled programs.
///
/// Everything about instruction semantics lives behind this trait; the
/// debugger only needs the program counter and a status per step.
pub trait ExecutionEngine: Send {
    /// Fresh memory and registers.
    fn reset(&mut self);

    /// Load an assembled program; sets the program counter to its entry.
    fn load(&mut self, program: &Path) -> anyhow::Result<()>;

    fn step(&mut self) -> ExecStatus;

    fn pc(&self) -> u32;

    fn set_pc(&mut self, pc: u32);

    /// Address of the first instruction of the text section.
    fn text_base(&self) -> u32 {
        0
    }

    fn registers(&self) -> [u32; 32];

    /// `None` when the address is not mapped.
    fn read_byte(&self, addr: u32) -> Option<u8>;
}

/// Turns a source file into something [`ExecutionEngine::load`] accepts.
pub trait Assembler {
    /// Assemble `source` into `output_dir`, returning the produced program.
    fn assemble(&self, source: &Path, output_dir: &Path) -> anyhow::Result<PathBuf>;
}
