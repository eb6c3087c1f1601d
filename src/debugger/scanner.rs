use log::trace;

use crate::isa::InstructionSet;
use crate::parser::{classify_line, LineKind};

/// Where the k-th real instruction of a document begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanHit {
    /// Zero-based line index.
    pub line: usize,
    /// Trap lines seen at or before `line`.
    pub traps: usize,
    /// The hit line is itself a trap.
    pub on_trap: bool,
}

impl ScanHit {
    /// Trap lines strictly before the hit line.
    pub fn traps_before(&self) -> usize {
        self.traps - usize::from(self.on_trap)
    }
}

/// Find the line holding the `k`-th (1-based) real instruction of `lines`.
///
/// Blank and comment lines are skipped; a pseudo-instruction advances the
/// count by the number of real instructions it lowers to and is attributed
/// as a whole to its own line. Returns `None` for `k == 0` or when the
/// document holds fewer than `k` instructions.
pub fn scan_instruction_index<S, I>(lines: &[S], k: usize, isa: &I) -> Option<ScanHit>
where
    S: AsRef<str>,
    I: InstructionSet + ?Sized,
{
    if k == 0 {
        return None;
    }

    let mut count = 0usize;
    let mut traps = 0usize;

    for (i, line) in lines.iter().enumerate() {
        let LineKind::Instruction { width, trap, .. } = classify_line(line.as_ref(), isa) else {
            continue;
        };
        if trap {
            traps += 1;
        }
        count += width;
        if count >= k {
            return Some(ScanHit {
                line: i,
                traps,
                on_trap: trap,
            });
        }
    }

    trace!("instruction {} not found ({} in document)", k, count);
    None
}

/// Number of real instructions in `lines`.
pub fn total_instructions<S, I>(lines: &[S], isa: &I) -> usize
where
    S: AsRef<str>,
    I: InstructionSet + ?Sized,
{
    lines
        .iter()
        .map(|line| classify_line(line.as_ref(), isa).width())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::Rv32Table;

    const PROGRAM: [&str; 7] = [
        ".text",
        "la a1, message",
        "# print it",
        "li a7, 4",
        "",
        "ebreak",
        "ecall",
    ];

    #[test]
    fn pseudo_expansion_is_atomic() {
        let isa = Rv32Table;
        assert_eq!(scan_instruction_index(&PROGRAM, 1, &isa).map(|h| h.line), Some(1));
        assert_eq!(scan_instruction_index(&PROGRAM, 2, &isa).map(|h| h.line), Some(1));
        assert_eq!(scan_instruction_index(&PROGRAM, 3, &isa).map(|h| h.line), Some(3));
    }

    #[test]
    fn counts_traps_at_or_before_hit() {
        let isa = Rv32Table;
        let on_trap = scan_instruction_index(&PROGRAM, 4, &isa).unwrap();
        assert_eq!(on_trap, ScanHit { line: 5, traps: 1, on_trap: true });
        assert_eq!(on_trap.traps_before(), 0);

        let after = scan_instruction_index(&PROGRAM, 5, &isa).unwrap();
        assert_eq!(after, ScanHit { line: 6, traps: 1, on_trap: false });
        assert_eq!(after.traps_before(), 1);
    }

    #[test]
    fn out_of_range_is_none() {
        let isa = Rv32Table;
        assert_eq!(scan_instruction_index(&PROGRAM, 0, &isa), None);
        assert_eq!(scan_instruction_index(&PROGRAM, 6, &isa), None);
        assert_eq!(total_instructions(&PROGRAM, &isa), 5);
        let empty: [&str; 0] = [];
        assert_eq!(scan_instruction_index(&empty, 1, &isa), None);
    }

    #[test]
    fn line_is_monotonic_in_k() {
        let isa = Rv32Table;
        let hits: Vec<usize> = (1..=total_instructions(&PROGRAM, &isa))
            .filter_map(|k| scan_instruction_index(&PROGRAM, k, &isa))
            .map(|h| h.line)
            .collect();
        assert_eq!(hits.len(), 5);
        assert!(hits.windows(2).all(|w| w[0] <= w[1]));
    }
}
