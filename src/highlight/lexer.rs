use logos::Logos;

/// Raw tokens of one line of RISC-V assembly. Words are classified
/// afterwards against the instruction table.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // ── Comments run to end of line ──────────
    #[regex(r"#[^\n]*")]
    #[regex(r"//[^\n]*")]
    Comment,

    // ── Literals ─────────────────────────────
    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[regex(r"'([^'\\]|\\.)*'")]
    Char,

    #[regex(r"0[xX][0-9A-Fa-f]+")]
    #[regex(r"0[bB][01]+")]
    #[regex(r"[0-9]+")]
    Number,

    // ── Names ────────────────────────────────
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*:")]
    Label,

    #[regex(r"\.[A-Za-z_][A-Za-z0-9_]*")]
    Directive,

    #[regex(r"[A-Za-z_][A-Za-z0-9_.]*")]
    Word,

    // ── Punctuation ──────────────────────────
    #[token(",")]
    #[token("(")]
    #[token(")")]
    #[token("-")]
    #[token("+")]
    #[token("%")]
    Punct,
}
