//! A scanned token: what it is and where it came from.
use crate::sql::{keyword::Keyword, token_kind::TokenKind};

/// `kind` plus the byte range `[start, end)` of the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub const fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    /// The slice of `sql` this token was scanned from.
    pub fn text<'a>(&self, sql: &'a str) -> &'a str {
        sql.get(self.start..self.end).unwrap_or_default()
    }

    /// Unquoted identifier name; `None` for anything else.
    pub fn ident(&self) -> Option<&str> {
        self.kind.ident_name()
    }

    /// Identifier name, or the spelling of a reserved word.
    ///
    /// Used where the grammar expects a name and reserved words are legal
    /// (`FROM user`, `mysql.user`).
    pub fn name<'a>(&'a self, sql: &'a str) -> Option<&'a str> {
        match &self.kind {
            TokenKind::Ident { name, .. } => Some(name),
            TokenKind::Reserved(word) => Some(word),
            TokenKind::Keyword(_) => Some(self.text(sql)),
            _ => None,
        }
    }

    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.kind.is_keyword(kw)
    }

    pub fn keyword(&self) -> Option<Keyword> {
        self.kind.keyword()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_name_and_source_text() {
        let sql = "`Users`";
        let t = Token::new(TokenKind::ident("Users"), 0, sql.len());
        assert_eq!(t.ident(), Some("Users"));
        assert_eq!(t.text(sql), "`Users`");
        assert_eq!(t.keyword(), None);
    }

    #[test]
    fn name_accepts_reserved_words() {
        let sql = "from USER";
        let t = Token::new(TokenKind::Keyword(Keyword::User), 5, 9);
        assert_eq!(t.name(sql), Some("USER"));
        let t = Token::new(TokenKind::Reserved("type".into()), 0, 4);
        assert_eq!(t.name(sql), Some("type"));
        assert_eq!(Token::new(TokenKind::Comma, 0, 1).name(sql), None);
    }

    #[test]
    fn text_out_of_range_is_empty() {
        let t = Token::new(TokenKind::Dot, 1, 2);
        assert_eq!(t.text("a.b"), ".");
        assert_eq!(Token::new(TokenKind::Dot, 4, 9).text("a.b"), "");
    }
}
