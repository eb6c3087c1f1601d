use super::pseudo;
use super::InstructionSet;

/// RV32I base, M extension, Zicsr and fences.
pub const REAL_MNEMONICS: &[&str] = &[
    // R-type
    "add", "sub", "and", "or", "xor", "sll", "srl", "sra", "slt", "sltu",
    // I-type ALU
    "addi", "andi", "ori", "xori", "slli", "srli", "srai", "slti", "sltiu",
    // loads / stores
    "lb", "lh", "lw", "lbu", "lhu", "sb", "sh", "sw",
    // branches / jumps
    "beq", "bne", "blt", "bge", "bltu", "bgeu", "jal", "jalr",
    // upper immediates
    "lui", "auipc",
    // system
    "ecall", "ebreak", "fence", "fence.i",
    "csrrw", "csrrs", "csrrc", "csrrwi", "csrrsi", "csrrci",
    // M extension
    "mul", "mulh", "mulhsu", "mulhu", "div", "divu", "rem", "remu",
];

/// Built-in RISC-V table used when no assembler-provided table is plugged in.
#[derive(Debug, Default, Clone, Copy)]
pub struct Rv32Table;

impl InstructionSet for Rv32Table {
    fn is_real(&self, mnemonic: &str) -> bool {
        REAL_MNEMONICS.contains(&mnemonic)
    }

    fn expand_pseudo(&self, tokens: &[&str]) -> Option<Vec<String>> {
        pseudo::expand(tokens).map(|real| real.iter().map(|m| m.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_and_pseudo_do_not_overlap() {
        for m in pseudo::PSEUDO_MNEMONICS {
            assert!(!Rv32Table.is_real(m), "{m} listed as both");
        }
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(Rv32Table.is_real("ecall"));
        assert!(!Rv32Table.is_real("ECALL"));
        assert!(Rv32Table.expand_pseudo(&["LA", "a0,", "msg"]).is_none());
    }

    #[test]
    fn default_comment_prefixes() {
        assert!(Rv32Table.is_comment("# hello"));
        assert!(Rv32Table.is_comment("// hello"));
        assert!(!Rv32Table.is_comment("addi a0, a0, 1 # trailing"));
        assert_eq!(Rv32Table.trap_mnemonic(), "ebreak");
    }
}
