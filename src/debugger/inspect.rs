//! Register and memory views for the debug panel. Display only.

use super::session::ExecutionEngine;
use crate::error::{DebugError, Result};

pub const ABI_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2",
    "s0/fp", "s1", "a0", "a1", "a2", "a3", "a4", "a5",
    "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7",
    "s8", "s9", "s10", "s11", "t3", "t4", "t5", "t6",
];

/// Rows shown by the memory view.
pub const MEMORY_ROWS: u32 = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRow {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRow {
    pub address: String,
    pub hex: String,
    pub ascii: String,
}

pub fn register_rows(regs: &[u32; 32]) -> Vec<RegisterRow> {
    regs.iter()
        .enumerate()
        .map(|(i, &value)| RegisterRow {
            name: format!("x{}({})", i, ABI_NAMES[i]),
            value: format!("0x{:x}({})", value, value as i32),
        })
        .collect()
}

/// Parse a user-entered hex address; the `0x` prefix is optional.
pub fn parse_address(input: &str) -> Result<u32> {
    let t = input.trim();
    let digits = t
        .strip_prefix("0x")
        .or_else(|| t.strip_prefix("0X"))
        .unwrap_or(t);
    u32::from_str_radix(digits, 16).map_err(|_| DebugError::InvalidAddress(input.to_string()))
}

pub fn memory_rows<E: ExecutionEngine + ?Sized>(engine: &E, start: u32) -> Vec<MemoryRow> {
    (0..MEMORY_ROWS)
        .map(|i| {
            let addr = start.wrapping_add(i);
            let (hex, ascii) = match engine.read_byte(addr) {
                Some(byte) => {
                    let ch = if (32..=126).contains(&byte) {
                        byte as char
                    } else {
                        '.'
                    };
                    (format!("0x{:02x}", byte), ch.to_string())
                }
                None => ("Error".to_string(), "-".to_string()),
            };
            MemoryRow {
                address: format!("0x{:x}", addr),
                hex,
                ascii,
            }
        })
        .collect()
}
