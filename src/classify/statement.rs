use super::TableReference;
use crate::sql::{Keyword, Token, TokenKind, tokenize};

/// Keywords after which a reserved word is a column name rather than syntax
/// (`SELECT user, password`, `WHERE name = 1`).
const NAME_POSITION_KEYWORDS: [Keyword; 12] = [
    Keyword::Select,
    Keyword::Distinct,
    Keyword::Where,
    Keyword::Having,
    Keyword::On,
    Keyword::Set,
    Keyword::OrderBy,
    Keyword::GroupBy,
    Keyword::And,
    Keyword::Or,
    Keyword::Not,
    Keyword::Between,
];

/// The statement under the cursor, tokenized up to the cursor.
#[derive(Debug)]
pub(crate) struct Statement<'a> {
    pub text: &'a str,
    pub tokens: Vec<Token>,
}

/// Where an `INSERT ... VALUES (` tuple is being filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValuesPosition {
    pub table: TableReference,
    pub columns: Vec<String>,
    pub value_index: usize,
}

impl<'a> Statement<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            tokens: tokenize(text),
        }
    }

    pub fn first_keyword(&self) -> Option<Keyword> {
        self.tokens.first()?.keyword()
    }

    pub fn starts_with(&self, kw: Keyword) -> bool {
        self.first_keyword() == Some(kw)
    }

    /// Index of the keyword (or unmatched `(`) that governs the tokens before
    /// `before`.
    ///
    /// Balanced parenthesised groups are stepped over, `AND`/`OR`/`NOT`/`BETWEEN`
    /// are skipped, and reserved words sitting in a column position are treated
    /// as names.
    pub fn prev_keyword(&self, before: usize) -> Option<usize> {
        let mut depth = 0usize;
        for j in (0..before.min(self.tokens.len())).rev() {
            match &self.tokens[j].kind {
                TokenKind::ParenClose => depth += 1,
                TokenKind::ParenOpen if depth > 0 => depth -= 1,
                TokenKind::ParenOpen => return Some(j),
                _ if depth > 0 => {}
                TokenKind::Keyword(k) if k.is_connective() => {}
                TokenKind::Keyword(Keyword::User) | TokenKind::Reserved(_)
                    if self.in_name_position(j) => {}
                TokenKind::Keyword(_) | TokenKind::Reserved(_) => return Some(j),
                _ => {}
            }
        }
        None
    }

    /// Whether the word at `idx` is used as a name: it follows a list
    /// separator, an operator, or a clause keyword that expects an
    /// expression, or it is itself qualified / compared.
    pub fn in_name_position(&self, idx: usize) -> bool {
        let before = idx
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| &t.kind);
        let after = self.tokens.get(idx + 1).map(|t| &t.kind);
        let after_separator = match before {
            Some(
                TokenKind::Comma | TokenKind::Dot | TokenKind::ParenOpen | TokenKind::Operator(_),
            ) => true,
            Some(TokenKind::Keyword(k)) => NAME_POSITION_KEYWORDS.contains(k),
            _ => false,
        };
        after_separator
            || matches!(
                after,
                Some(TokenKind::Dot | TokenKind::Operator(_) | TokenKind::Comma)
            )
    }

    /// True when the token at `idx` belongs to a `WHERE` clause that is still
    /// open at that point.
    pub fn in_where(&self, idx: usize) -> bool {
        let mut depth = 0usize;
        for j in (0..=idx.min(self.tokens.len().saturating_sub(1))).rev() {
            match &self.tokens[j].kind {
                TokenKind::ParenClose if j < idx => depth += 1,
                TokenKind::ParenOpen if depth > 0 => depth -= 1,
                _ if depth > 0 => {}
                TokenKind::Keyword(Keyword::Where) => return true,
                TokenKind::Keyword(Keyword::Select) => return false,
                TokenKind::Keyword(k) if Keyword::WHERE_TERMINATORS.contains(k) => return false,
                _ => {}
            }
        }
        false
    }

    /// For a `(` at `paren` that opens a `VALUES` tuple of an `INSERT`, work out
    /// the target table, the explicit column list and which value the cursor
    /// is on.
    pub fn values_position(&self, paren: usize) -> Option<ValuesPosition> {
        if !self.starts_with(Keyword::Insert) {
            return None;
        }
        let values = self.values_keyword_before(paren)?;
        let into = self.tokens[..values]
            .iter()
            .rposition(|t| t.is_keyword(Keyword::Into))?;
        let (table, after_table) = self.reference_after(into)?;

        let mut columns = Vec::new();
        if self.tokens.get(after_table).map(|t| &t.kind) == Some(&TokenKind::ParenOpen) {
            for t in self.tokens[after_table + 1..values].iter() {
                match &t.kind {
                    TokenKind::ParenClose => break,
                    TokenKind::Comma => {}
                    _ => {
                        if let Some(name) = t.name(self.text) {
                            columns.push(name.to_string());
                        }
                    }
                }
            }
        }

        let mut depth = 0usize;
        let mut value_index = 0;
        for t in &self.tokens[paren + 1..] {
            match t.kind {
                TokenKind::ParenOpen => depth += 1,
                TokenKind::ParenClose => depth = depth.saturating_sub(1),
                TokenKind::Comma if depth == 0 => value_index += 1,
                _ => {}
            }
        }

        Some(ValuesPosition {
            table,
            columns,
            value_index,
        })
    }

    /// Walk back from a tuple's `(` over earlier `(...),` tuples to `VALUES`.
    fn values_keyword_before(&self, paren: usize) -> Option<usize> {
        let mut j = paren.checked_sub(1)?;
        loop {
            match &self.tokens[j].kind {
                TokenKind::Keyword(Keyword::Values) => return Some(j),
                TokenKind::Reserved(word) if word.eq_ignore_ascii_case("value") => return Some(j),
                TokenKind::Comma => {
                    let close = j.checked_sub(1)?;
                    if self.tokens[close].kind != TokenKind::ParenClose {
                        return None;
                    }
                    j = self.matching_open(close)?.checked_sub(1)?;
                }
                _ => return None,
            }
        }
    }

    fn matching_open(&self, close: usize) -> Option<usize> {
        let mut depth = 0usize;
        for j in (0..=close).rev() {
            match self.tokens[j].kind {
                TokenKind::ParenClose => depth += 1,
                TokenKind::ParenOpen => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(j);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// `[schema.]table` right after the token at `idx`.
    fn reference_after(&self, idx: usize) -> Option<(TableReference, usize)> {
        let first = self.tokens.get(idx + 1)?.name(self.text)?;
        let dotted = self.tokens.get(idx + 2).map(|t| &t.kind) == Some(&TokenKind::Dot);
        match self.tokens.get(idx + 3).and_then(|t| t.name(self.text)) {
            Some(table) if dotted => Some((TableReference::new(Some(first), table, None), idx + 4)),
            _ => Some((TableReference::new(None, first, None), idx + 2)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn keyword_text(sql: &str) -> Option<String> {
        let stmt = Statement::new(sql);
        stmt.prev_keyword(stmt.tokens.len())
            .map(|i| stmt.tokens[i].text(sql).to_lowercase())
    }

    #[rstest]
    #[case("select a, ", Some("select"))]
    #[case("select user, password, ", Some("select"))]
    #[case("select count(a), ", Some("select"))]
    #[case("select * from t where a = 1 and ", Some("where"))]
    #[case("select * from t where name = ", Some("where"))]
    #[case("insert into t values (1, ", Some("("))]
    #[case("select a from t order by a, ", Some("order by"))]
    #[case("1, 2, ", None)]
    fn finds_previous_keyword(#[case] sql: &str, #[case] expected: Option<&str>) {
        assert_eq!(keyword_text(sql).as_deref(), expected);
    }

    #[rstest]
    #[case("select * from t where a = 1", true)]
    #[case("select * from t where a in (1, 2", true)]
    #[case("select * from t where a = 1 order by b", false)]
    #[case("select * from t where a = 1 group by b having", false)]
    #[case("select * from t", false)]
    #[case("select * from t where a in (select b from c", false)]
    fn detects_open_where_clause(#[case] sql: &str, #[case] expected: bool) {
        let stmt = Statement::new(sql);
        assert_eq!(stmt.in_where(stmt.tokens.len() - 1), expected);
    }

    #[rstest]
    #[case("insert into t1 values (", TableReference::new(None, "t1", None), vec![], 0)]
    #[case("insert into t1 values (1, 'x', ", TableReference::new(None, "t1", None), vec![], 2)]
    #[case("insert into d.t1 (c, a) values (now(), ", TableReference::new(Some("d"), "t1", None), vec!["c", "a"], 1)]
    #[case("insert into t1 values (1, 2), (3, ", TableReference::new(None, "t1", None), vec![], 1)]
    fn locates_values_tuple(
        #[case] sql: &str,
        #[case] table: TableReference,
        #[case] columns: Vec<&str>,
        #[case] value_index: usize,
    ) {
        let stmt = Statement::new(sql);
        let paren = stmt.prev_keyword(stmt.tokens.len()).expect("open paren");
        let position = stmt.values_position(paren).expect("values tuple");
        assert_eq!(position.table, table);
        assert_eq!(position.columns, columns);
        assert_eq!(position.value_index, value_index);
    }

    #[test]
    fn values_position_requires_insert() {
        let stmt = Statement::new("select * from t where a in (");
        let paren = stmt.tokens.len() - 1;
        assert_eq!(stmt.values_position(paren), None);
    }
}
