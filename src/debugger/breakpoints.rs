use std::collections::BTreeSet;

use log::debug;

use crate::isa::InstructionSet;
use crate::parser::is_instruction_bearing;

/// Zero-based source lines the user wants execution to pause at.
///
/// Any line may be toggled; only instruction-bearing ones take effect when a
/// session starts (see [`BreakpointSet::effective`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakpointSet {
    points: BTreeSet<usize>,
}

impl BreakpointSet {
    pub fn new() -> Self {
        Self {
            points: BTreeSet::new(),
        }
    }

    pub fn add(&mut self, line: usize) {
        self.points.insert(line);
        debug!("breakpoint set at line {}", line);
    }

    pub fn remove(&mut self, line: usize) {
        self.points.remove(&line);
        debug!("breakpoint removed from line {}", line);
    }

    /// Flip the breakpoint on `line`; returns whether it is now set.
    pub fn toggle(&mut self, line: usize) -> bool {
        if self.points.remove(&line) {
            debug!("breakpoint removed from line {}", line);
            false
        } else {
            self.points.insert(line);
            debug!("breakpoint set at line {}", line);
            true
        }
    }

    pub fn contains(&self, line: usize) -> bool {
        self.points.contains(&line)
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.points.iter().copied()
    }

    /// Breakpoints that land on instruction-bearing lines of `lines`.
    pub fn effective<S, I>(&self, lines: &[S], isa: &I) -> Vec<usize>
    where
        S: AsRef<str>,
        I: InstructionSet + ?Sized,
    {
        self.iter()
            .filter(|&i| {
                lines
                    .get(i)
                    .is_some_and(|line| is_instruction_bearing(line.as_ref(), isa))
            })
            .collect()
    }
}

impl FromIterator<usize> for BreakpointSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}
