mod pseudo;
mod table;

pub use pseudo::{expand, parse_imm, PSEUDO_MNEMONICS};
pub use table::{Rv32Table, REAL_MNEMONICS};

/// Fixed instruction injected in front of a breakpointed line.
pub const TRAP_MNEMONIC: &str = "ebreak";

/// Instruction-table lookups supplied by the assembler.
///
/// Only two questions are ever asked of it: is a mnemonic a real machine
/// instruction, and what does a pseudo-instruction lower to. The debugger
/// never needs the encodings, just the number of real instructions a line
/// occupies.
pub trait InstructionSet {
    fn is_real(&self, mnemonic: &str) -> bool;

    /// `tokens` are the whitespace fields of the trimmed line, mnemonic first.
    /// Returns `None` when the mnemonic is not a pseudo-instruction.
    fn expand_pseudo(&self, tokens: &[&str]) -> Option<Vec<String>>;

    fn is_comment(&self, trimmed: &str) -> bool {
        trimmed.starts_with('#') || trimmed.starts_with("//")
    }

    fn trap_mnemonic(&self) -> &str {
        TRAP_MNEMONIC
    }
}
