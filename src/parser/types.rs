/// What a single source line contributes to the instruction stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Comment,
    /// First token is a real or pseudo mnemonic. `width` is the number of
    /// real instructions the line lowers to.
    Instruction {
        mnemonic: String,
        width: usize,
        trap: bool,
    },
    /// Labels, directives and anything the instruction table does not know.
    Other,
}

impl LineKind {
    pub fn is_instruction(&self) -> bool {
        matches!(self, LineKind::Instruction { .. })
    }

    pub fn width(&self) -> usize {
        match self {
            LineKind::Instruction { width, .. } => *width,
            _ => 0,
        }
    }

    pub fn is_trap(&self) -> bool {
        matches!(self, LineKind::Instruction { trap: true, .. })
    }
}
