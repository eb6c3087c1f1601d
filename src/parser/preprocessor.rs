use super::types::LineKind;
use crate::isa::InstructionSet;

/// Classify one line by its first token.
///
/// Blank and comment-only lines never carry an instruction. Real mnemonics
/// are looked up before pseudo ones.
pub fn classify_line<I: InstructionSet + ?Sized>(line: &str, isa: &I) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if isa.is_comment(trimmed) {
        return LineKind::Comment;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let mnemonic = tokens[0];

    if isa.is_real(mnemonic) {
        return LineKind::Instruction {
            mnemonic: mnemonic.to_string(),
            width: 1,
            trap: mnemonic == isa.trap_mnemonic(),
        };
    }

    match isa.expand_pseudo(&tokens) {
        Some(real) => LineKind::Instruction {
            mnemonic: mnemonic.to_string(),
            width: real.len(),
            trap: false,
        },
        None => LineKind::Other,
    }
}

pub fn is_instruction_bearing<I: InstructionSet + ?Sized>(line: &str, isa: &I) -> bool {
    classify_line(line, isa).is_instruction()
}
