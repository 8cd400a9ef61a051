//! Token kind definitions for the lenient SQL tokenizer.
//!
//! Each `TokenKind` variant represents a syntactic atom discovered during the
//! scanning phase. Anything unrecognized becomes `Other(char)`.
//!
//! See `keyword.rs` for the `Keyword` enum and `tokenizer.rs` for tokenization.

use crate::sql::keyword::Keyword;

/// Classification for a token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Table / alias / column / generic identifier. Back-tick quotes are
    /// stripped from `name`; `quoted` remembers that they were there.
    Ident { name: String, quoted: bool },
    /// Keyword that steers completion context.
    Keyword(Keyword),
    /// Any other reserved SQL word, kept in its original spelling.
    Reserved(String),
    /// `@name` or `@@scope.name`.
    Variable(String),
    /// Number or quoted string literal.
    Literal,
    /// Comma `,`.
    Comma,
    /// Dot `.` (qualified names like `schema.table`).
    Dot,
    /// Opening parenthesis `(`.
    ParenOpen,
    /// Closing parenthesis `)`.
    ParenClose,
    /// Statement separator `;`.
    Semicolon,
    /// Run of operator characters such as `=`, `<>`, `+`.
    Operator(String),
    /// Any other single symbol we do not specially classify.
    Other(char),
}

impl TokenKind {
    pub fn ident(name: impl Into<String>) -> Self {
        TokenKind::Ident {
            name: name.into(),
            quoted: false,
        }
    }

    /// True if this token is the given keyword.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == kw)
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self {
            TokenKind::Keyword(k) => Some(*k),
            _ => None,
        }
    }

    /// Returns the identifier text if this token is an `Ident`.
    pub fn ident_name(&self) -> Option<&str> {
        match self {
            TokenKind::Ident { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// True for `JOIN` and reserved words ending in `JOIN` (`STRAIGHT_JOIN`).
    pub fn is_join(&self) -> bool {
        match self {
            TokenKind::Keyword(Keyword::Join) => true,
            TokenKind::Reserved(word) => word.to_ascii_uppercase().ends_with("JOIN"),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_detection() {
        let tk = TokenKind::Keyword(Keyword::Select);
        assert!(tk.is_keyword(Keyword::Select));
        assert!(!tk.is_keyword(Keyword::From));
        assert!(tk.ident_name().is_none());
    }

    #[test]
    fn join_variants() {
        assert!(TokenKind::Keyword(Keyword::Join).is_join());
        assert!(TokenKind::Reserved("STRAIGHT_JOIN".into()).is_join());
        assert!(!TokenKind::Reserved("LEFT".into()).is_join());
        assert!(!TokenKind::ident("join_table").is_join());
    }
}
