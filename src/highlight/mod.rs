//! Token classification for the editor's syntax colouring.

mod lexer;
mod theme;

pub use lexer::Token;
pub use theme::{render_ansi, Rgb, Theme};

use logos::Logos;

use crate::isa::InstructionSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    Register,
    Instruction,
    Pseudo,
    Directive,
    Comment,
    String,
    Char,
    Number,
    Label,
    Ident,
    Punct,
}

/// Byte range of a classified token within its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub class: TokenClass,
}

pub fn is_register(word: &str) -> bool {
    const NAMED: &[&str] = &["zero", "ra", "sp", "gp", "tp", "fp"];
    if NAMED.contains(&word) {
        return true;
    }
    let (Some(prefix), Some(digits)) = (word.get(..1), word.get(1..)) else {
        return false;
    };
    let canonical = !digits.is_empty()
        && digits.bytes().all(|b| b.is_ascii_digit())
        && (digits.len() == 1 || !digits.starts_with('0'));
    if !canonical {
        return false;
    }
    let Ok(n) = digits.parse::<u32>() else {
        return false;
    };
    match prefix {
        "x" => n < 32,
        "t" => n <= 6,
        "s" => n <= 11,
        "a" => n <= 7,
        _ => false,
    }
}

fn classify_word<I: InstructionSet + ?Sized>(word: &str, isa: &I) -> TokenClass {
    if is_register(word) {
        TokenClass::Register
    } else if isa.is_real(word) {
        TokenClass::Instruction
    } else if isa.expand_pseudo(&[word]).is_some() {
        TokenClass::Pseudo
    } else {
        TokenClass::Ident
    }
}

/// Classify every token of `line`. Characters the lexer does not know are
/// left uncoloured.
pub fn highlight_line<I: InstructionSet + ?Sized>(line: &str, isa: &I) -> Vec<Span> {
    let mut lexer = Token::lexer(line);
    let mut spans = Vec::new();
    while let Some(token) = lexer.next() {
        let Ok(token) = token else {
            continue;
        };
        let range = lexer.span();
        let class = match token {
            Token::Comment => TokenClass::Comment,
            Token::String => TokenClass::String,
            Token::Char => TokenClass::Char,
            Token::Number => TokenClass::Number,
            Token::Label => TokenClass::Label,
            Token::Directive => TokenClass::Directive,
            Token::Punct => TokenClass::Punct,
            Token::Word => classify_word(&line[range.clone()], isa),
        };
        spans.push(Span {
            start: range.start,
            end: range.end,
            class,
        });
    }
    spans
}
