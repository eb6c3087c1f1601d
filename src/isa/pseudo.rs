pub const PSEUDO_MNEMONICS: &[&str] = &[
    "nop", "li", "la", "mv", "not", "neg", "seqz", "snez", "sltz", "sgtz",
    "beqz", "bnez", "blez", "bgez", "bltz", "bgtz", "bgt", "ble", "bgtu", "bleu",
    "j", "jr", "ret", "call", "tail",
];

/// Split the operand part of a line on commas ("a0, 0(sp)" → ["a0", "0(sp)"]).
fn split_operands(tokens: &[&str]) -> Vec<String> {
    tokens
        .get(1..)
        .unwrap_or_default()
        .join(" ")
        .split(',')
        .map(|op| op.trim().to_string())
        .filter(|op| !op.is_empty())
        .collect()
}

/// Parse a decimal, `0x` hex or `0b` binary immediate, optionally negative.
pub fn parse_imm(s: &str) -> Option<i64> {
    let s = s.trim();
    let (neg, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let value = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()?
    } else if let Some(bin) = body.strip_prefix("0b").or_else(|| body.strip_prefix("0B")) {
        i64::from_str_radix(bin, 2).ok()?
    } else {
        body.parse::<i64>().ok()?
    };
    Some(if neg { -value } else { value })
}

fn lower_li(ops: &[String]) -> &'static [&'static str] {
    const FULL: &[&str] = &["lui", "addi"];
    let Some(value) = ops.last().and_then(|op| parse_imm(op)) else {
        // symbolic operand, resolved by the assembler to a full 32-bit load
        return FULL;
    };
    if !(i32::MIN as i64..=u32::MAX as i64).contains(&value) {
        return FULL;
    }
    let imm = value as u32 as i32;
    if (-2048..=2047).contains(&imm) {
        &["addi"]
    } else if imm & 0xfff == 0 {
        &["lui"]
    } else {
        FULL
    }
}

/// Real instructions a pseudo-instruction lowers to, or `None` if
/// `tokens[0]` is not a pseudo mnemonic.
pub fn expand(tokens: &[&str]) -> Option<&'static [&'static str]> {
    let mnemonic = *tokens.first()?;
    let real: &'static [&'static str] = match mnemonic {
        "nop" | "mv" => &["addi"],
        "li" => lower_li(&split_operands(tokens)),
        "la" => &["auipc", "addi"],
        "not" => &["xori"],
        "neg" => &["sub"],
        "seqz" => &["sltiu"],
        "snez" => &["sltu"],
        "sltz" | "sgtz" => &["slt"],
        "beqz" => &["beq"],
        "bnez" => &["bne"],
        "blez" | "bgez" | "ble" => &["bge"],
        "bltz" | "bgtz" | "bgt" => &["blt"],
        "bgtu" => &["bltu"],
        "bleu" => &["bgeu"],
        "j" => &["jal"],
        "jr" | "ret" => &["jalr"],
        "call" | "tail" => &["auipc", "jalr"],
        _ => return None,
    };
    Some(real)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn width(line: &str) -> Option<usize> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        expand(&tokens).map(|r| r.len())
    }

    #[test]
    fn every_listed_pseudo_expands() {
        for m in PSEUDO_MNEMONICS {
            assert!(expand(&[*m]).is_some(), "{m} has no expansion");
        }
        assert!(expand(&["addi"]).is_none());
        assert!(expand(&[]).is_none());
    }

    #[test]
    fn la_and_call_take_two_slots() {
        assert_eq!(width("la a1, message"), Some(2));
        assert_eq!(width("call print"), Some(2));
        assert_eq!(width("tail exit"), Some(2));
        assert_eq!(width("ret"), Some(1));
    }

    #[test]
    fn li_width_follows_immediate() {
        assert_eq!(width("li a0, 1"), Some(1));
        assert_eq!(width("li a0,-2048"), Some(1));
        assert_eq!(width("li a0, 2048"), Some(2));
        assert_eq!(width("li a0, 0x10000"), Some(1));
        assert_eq!(width("li a0, 0x12345"), Some(2));
        assert_eq!(width("li a0, 0xFFFFFFFF"), Some(1));
        assert_eq!(width("li t0, SOME_CONST"), Some(2));
    }

    #[test]
    fn immediates() {
        assert_eq!(parse_imm("42"), Some(42));
        assert_eq!(parse_imm("-0x10"), Some(-16));
        assert_eq!(parse_imm("0b101"), Some(5));
        assert_eq!(parse_imm("label"), None);
    }
}
