use super::{Span, TokenClass};

pub const LIGHT: &str = "Light";
pub const DARK: &str = "Dark";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Theme from its preference name; anything but "dark" is light.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case(DARK) {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn from_dark_mode(dark: bool) -> Self {
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
        }
    }

    /// Foreground colour for a token class; `None` keeps the default.
    pub fn color(self, class: TokenClass) -> Option<Rgb> {
        use TokenClass::*;
        let rgb = match (self, class) {
            (_, Ident) | (_, Punct) => return None,
            (Theme::Dark, Register) => Rgb(209, 105, 105),
            (Theme::Dark, Instruction) => Rgb(86, 156, 214),
            (Theme::Dark, Directive) => Rgb(197, 134, 192),
            (Theme::Dark, Pseudo) => Rgb(78, 201, 176),
            (Theme::Dark, Comment) => Rgb(106, 153, 85),
            (Theme::Dark, String) | (Theme::Dark, Char) => Rgb(206, 145, 120),
            (Theme::Dark, Number) => Rgb(181, 206, 168),
            (Theme::Dark, Label) => Rgb(220, 220, 170),
            (Theme::Light, Register) => Rgb(170, 43, 43),
            (Theme::Light, Instruction) => Rgb(0, 0, 255),
            (Theme::Light, Directive) => Rgb(163, 21, 163),
            (Theme::Light, Pseudo) => Rgb(0, 128, 128),
            (Theme::Light, Comment) => Rgb(0, 128, 0),
            (Theme::Light, String) | (Theme::Light, Char) => Rgb(163, 21, 21),
            (Theme::Light, Number) => Rgb(9, 136, 90),
            (Theme::Light, Label) => Rgb(121, 94, 38),
        };
        Some(rgb)
    }

    pub fn is_bold(class: TokenClass) -> bool {
        class == TokenClass::Register
    }
}

/// Wrap each coloured span of `line` in ANSI true-colour escapes.
pub fn render_ansi(line: &str, spans: &[Span], theme: Theme) -> String {
    let mut out = String::with_capacity(line.len() * 2);
    let mut pos = 0;
    for span in spans {
        out.push_str(&line[pos..span.start]);
        let text = &line[span.start..span.end];
        match theme.color(span.class) {
            Some(Rgb(r, g, b)) => {
                if Theme::is_bold(span.class) {
                    out.push_str("\x1b[1m");
                }
                out.push_str(&format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, text));
            }
            None => out.push_str(text),
        }
        pos = span.end;
    }
    out.push_str(&line[pos..]);
    out
}
