use crate::error::Span;
use once_cell::sync::Lazy;
use regex::Regex;

/// Token classes, tried leftmost-first at every position. Quoted strings stop
/// at the first matching quote and never span a line terminator; anything
/// not covered by the first four classes becomes a single-character token.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?P<directive>@[A-Za-z0-9_]+)",
        r#"|(?P<quoted>"[^"\n\r\x{2028}\x{2029}]*"|'[^'\n\r\x{2028}\x{2029}]*')"#,
        r"|(?P<word>[A-Za-z0-9_$]+)",
        r"|(?P<char>(?s:.))",
    ))
    .expect("valid token regex")
});

/// Kinds of token found inside a directive block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `@` followed by word characters
    Directive,
    /// Double- or single-quoted string, quotes included
    Quoted,
    /// Run of identifier characters
    Word,
    /// Any other single character, whitespace included
    Char,
}

/// A token with its source span
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl SpannedToken {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Whether the token consists only of blanks or line breaks
    pub fn is_whitespace(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(|c| matches!(c, ' ' | '\t' | '\n' | '\r'))
    }

    /// Directive name without its leading `@`.
    ///
    /// A lone `@` names the empty directive.
    pub fn directive_name(&self) -> Option<&str> {
        self.text.strip_prefix('@')
    }
}

/// Split the body of a directive block into tokens.
///
/// Tokenizing cannot fail: every character belongs to some token.
pub fn tokenize(source: &str) -> Vec<SpannedToken> {
    TOKEN_RE
        .captures_iter(source)
        .filter_map(|caps| {
            let (kind, m) = if let Some(m) = caps.name("directive") {
                (TokenKind::Directive, m)
            } else if let Some(m) = caps.name("quoted") {
                (TokenKind::Quoted, m)
            } else if let Some(m) = caps.name("word") {
                (TokenKind::Word, m)
            } else {
                (TokenKind::Char, caps.name("char")?)
            };
            Some(SpannedToken::new(kind, m.as_str(), Span::new(m.start(), m.end())))
        })
        .collect()
}
