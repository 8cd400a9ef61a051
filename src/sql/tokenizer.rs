use crate::sql::{keyword::Keyword, token::Token, token_kind::TokenKind};
use sqlparser::keywords::ALL_KEYWORDS;
use std::{iter::Peekable, str::CharIndices};

type Chars<'a> = Peekable<CharIndices<'a>>;

/// Lenient SQL tokenizer producing a flat stream of `Token`s.
///
/// Scope / Intent:
/// - Designed for cursor-aware completion on half-typed statements.
/// - Accepts incomplete / syntactically invalid SQL (unterminated strings,
///   dangling quotes, `SELECT FROM`).
///
/// Behavior:
/// - Skips whitespace and `--`, `#`, `/* */` comments.
/// - Aggregates word characters into identifiers, preserving original case, then
///   classifies them as `Keyword`, `Reserved` (any word sqlparser knows as a
///   keyword) or `Ident`.
/// - Merges `ORDER BY` / `GROUP BY` into a single keyword token.
/// - Back-tick quoted names become `Ident { quoted: true }` without the quotes.
/// - Emits single-character tokens for comma, dot, parentheses and semicolon;
///   runs of operator characters become one `Operator`.
///
/// Guarantees:
/// - Never panics and never fails; malformed constructs still yield tokens.
/// - Offsets are byte offsets on char boundaries.
pub fn tokenize(sql: &str) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::new();
    let mut chars = sql.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        // Comments
        if c == '#' || sql[start..].starts_with("--") {
            skip_while(&mut chars, sql.len(), |c| c != '\n');
            continue;
        }
        if sql[start..].starts_with("/*") {
            let end = sql[start + 2..]
                .find("*/")
                .map_or(sql.len(), |i| start + 2 + i + 2);
            while chars.next_if(|&(i, _)| i < end).is_some() {}
            continue;
        }

        if is_word_char(c) {
            let end = skip_while(&mut chars, sql.len(), is_word_char);
            let text = &sql[start..end];
            if text.chars().all(|c| c.is_ascii_digit()) {
                out.push(Token::new(TokenKind::Literal, start, end));
                continue;
            }
            let lower = text.to_lowercase();
            if lower == "by" && merge_by(&mut out, sql, end) {
                continue;
            }
            out.push(Token::new(classify_word(text, &lower), start, end));
            continue;
        }

        chars.next();
        let end = match c {
            '`' | '\'' | '"' => {
                let (name, end) = quoted(sql, c, &mut chars);
                let kind = if c == '`' {
                    TokenKind::Ident { name, quoted: true }
                } else {
                    TokenKind::Literal
                };
                out.push(Token::new(kind, start, end));
                continue;
            }
            '@' => skip_while(&mut chars, sql.len(), |c| c == '@' || c == '.' || is_word_char(c)),
            c if is_operator_char(c) => skip_while(&mut chars, sql.len(), is_operator_char),
            c => start + c.len_utf8(),
        };
        let kind = match c {
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '(' => TokenKind::ParenOpen,
            ')' => TokenKind::ParenClose,
            ';' => TokenKind::Semicolon,
            '@' => TokenKind::Variable(sql[start..end].to_string()),
            c if is_operator_char(c) => TokenKind::Operator(sql[start..end].to_string()),
            other => TokenKind::Other(other),
        };
        out.push(Token::new(kind, start, end));
    }

    out
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn is_operator_char(c: char) -> bool {
    matches!(
        c,
        '+' | '-' | '*' | '/' | '%' | '=' | '<' | '>' | '!' | '&' | '|' | '^' | '~' | ':'
    )
}

/// Fold `BY` into a preceding `ORDER` / `GROUP` word.
fn merge_by(out: &mut [Token], sql: &str, end: usize) -> bool {
    let Some(prev) = out.last_mut() else {
        return false;
    };
    if !matches!(
        &prev.kind,
        TokenKind::Reserved(_) | TokenKind::Ident { quoted: false, .. }
    ) {
        return false;
    }
    let merged = format!("{} by", prev.text(sql).to_lowercase());
    match Keyword::from_lower(&merged) {
        Some(kw) => {
            prev.kind = TokenKind::Keyword(kw);
            prev.end = end;
            true
        }
        None => false,
    }
}

fn classify_word(text: &str, lower: &str) -> TokenKind {
    if let Some(kw) = Keyword::from_lower(lower) {
        return TokenKind::Keyword(kw);
    }
    let upper = text.to_uppercase();
    if ALL_KEYWORDS.binary_search(&upper.as_str()).is_ok() {
        TokenKind::Reserved(text.to_string())
    } else {
        TokenKind::ident(text)
    }
}

/// Consume chars while `keep` holds; returns the byte offset of the first char
/// not consumed, or `len` at end of input.
fn skip_while(chars: &mut Chars<'_>, len: usize, keep: impl Fn(char) -> bool) -> usize {
    while let Some(&(i, c)) = chars.peek() {
        if !keep(c) {
            return i;
        }
        chars.next();
    }
    len
}

/// Scan the body of a quoted run whose opening quote was just consumed.
/// A doubled quote is an escaped quote. Unterminated runs extend to the end of
/// input.
fn quoted(sql: &str, quote: char, chars: &mut Chars<'_>) -> (String, usize) {
    let mut value = String::new();
    while let Some((i, c)) = chars.next() {
        if c == quote {
            if chars.next_if(|&(_, n)| n == quote).is_some() {
                value.push(quote);
                continue;
            }
            return (value, i + c.len_utf8());
        }
        value.push(c);
    }
    (value, sql.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn kinds(sql: &str) -> Vec<TokenKind> {
        tokenize(sql).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn basic_select_sequence() {
        let toks = tokenize("SELECT a, b FROM t");
        assert!(toks.iter().any(|t| t.is_keyword(Keyword::Select)));
        assert!(toks.iter().any(|t| t.is_keyword(Keyword::From)));
        for name in ["a", "b", "t"] {
            assert!(toks.iter().any(|t| t.ident() == Some(name)), "{name}");
        }
    }

    #[test]
    fn preserves_case_for_identifiers() {
        let toks = tokenize("From MyTable");
        assert!(toks[0].is_keyword(Keyword::From));
        assert_eq!(toks[1].ident(), Some("MyTable"));
    }

    #[rstest]
    #[case("order by", Keyword::OrderBy)]
    #[case("GROUP   BY", Keyword::GroupBy)]
    #[case("Order\nBy", Keyword::OrderBy)]
    fn merges_two_word_keywords(#[case] sql: &str, #[case] expected: Keyword) {
        let toks = tokenize(sql);
        assert_eq!(toks.len(), 1);
        assert!(toks[0].is_keyword(expected));
        assert_eq!((toks[0].start, toks[0].end), (0, sql.len()));
    }

    #[test]
    fn reserved_words_are_not_identifiers() {
        assert_eq!(
            kinds("left password"),
            vec![
                TokenKind::Reserved("left".into()),
                TokenKind::Reserved("password".into()),
            ]
        );
        assert_eq!(kinds("haha1"), vec![TokenKind::ident("haha1")]);
    }

    #[test]
    fn backtick_identifiers_are_unquoted() {
        assert_eq!(
            kinds("`my table`.`a``b`"),
            vec![
                TokenKind::Ident {
                    name: "my table".into(),
                    quoted: true
                },
                TokenKind::Dot,
                TokenKind::Ident {
                    name: "a`b".into(),
                    quoted: true
                },
            ]
        );
    }

    #[test]
    fn unterminated_literals_run_to_end() {
        let sql = "select 'abc, def";
        let toks = tokenize(sql);
        assert_eq!(toks.len(), 2);
        assert_eq!(toks[1].kind, TokenKind::Literal);
        assert_eq!(toks[1].end, sql.len());
    }

    #[test]
    fn variables_and_operators() {
        assert_eq!(
            kinds("@@global.port >= 1"),
            vec![
                TokenKind::Variable("@@global.port".into()),
                TokenKind::Operator(">=".into()),
                TokenKind::Literal,
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        let toks = tokenize("select -- from\n a /* where */ # x\n;");
        assert_eq!(
            toks.into_iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::ident("a"),
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn punctuation_tokens() {
        assert_eq!(
            kinds("(a.b,c);"),
            vec![
                TokenKind::ParenOpen,
                TokenKind::ident("a"),
                TokenKind::Dot,
                TokenKind::ident("b"),
                TokenKind::Comma,
                TokenKind::ident("c"),
                TokenKind::ParenClose,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn multibyte_text_keeps_char_boundaries() {
        let sql = "select é, ü from ß";
        for t in tokenize(sql) {
            assert!(sql.is_char_boundary(t.start) && sql.is_char_boundary(t.end));
        }
    }
}
