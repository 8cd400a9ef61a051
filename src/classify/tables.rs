use crate::sql::{Keyword, Token, TokenKind, tokenize};

/// A table named in a FROM / JOIN / UPDATE / INTO / COPY / TABLE clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableReference {
    /// Explicit qualifier; the active database applies when absent.
    pub schema: Option<String>,
    pub table: String,
    pub alias: Option<String>,
}

impl TableReference {
    pub fn new(schema: Option<&str>, table: impl Into<String>, alias: Option<&str>) -> Self {
        Self {
            schema: schema.map(str::to_string),
            table: table.into(),
            alias: alias.map(str::to_string),
        }
    }

    /// The name this table goes by in the statement.
    pub fn visible_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.table)
    }

    /// True when `qualifier` (the part before a dot) refers to this table by
    /// alias, by name, or as `schema.table`.
    pub fn identifies(&self, qualifier: &str) -> bool {
        self.alias.as_deref() == Some(qualifier)
            || self.table == qualifier
            || self
                .schema
                .as_deref()
                .is_some_and(|schema| qualifier == format!("{schema}.{}", self.table))
    }
}

const JOIN_MODIFIERS: [&str; 7] = ["LEFT", "RIGHT", "INNER", "OUTER", "CROSS", "NATURAL", "FULL"];

/// Keywords that close a table list when met outside a join condition.
const LIST_ENDERS: [Keyword; 13] = [
    Keyword::Where,
    Keyword::GroupBy,
    Keyword::OrderBy,
    Keyword::Having,
    Keyword::Limit,
    Keyword::Union,
    Keyword::Except,
    Keyword::Intersect,
    Keyword::Set,
    Keyword::Values,
    Keyword::Select,
    Keyword::Returning,
    Keyword::Offset,
];

/// Extract every table referenced by the first statement of `sql`, including
/// tables of sub-selects, in order of appearance.
///
/// - An `INSERT` statement stops at its first punctuation, so only the target
///   table is reported.
/// - `JOIN ... ON ...` / `USING (...)` chains are followed to the next join.
/// - Reserved words are accepted as names where a name is expected
///   (`FROM user`, `mysql.user`).
pub fn extract_tables(sql: &str) -> Vec<TableReference> {
    let tokens = tokenize(sql);
    let end = tokens
        .iter()
        .position(|t| t.kind == TokenKind::Semicolon)
        .unwrap_or(tokens.len());
    TableScan::new(sql, &tokens[..end]).run()
}

#[derive(Debug, Default)]
struct Scope {
    seen: bool,
    expect_name: bool,
    condition: bool,
    done: bool,
}

struct TableScan<'a> {
    sql: &'a str,
    tokens: &'a [Token],
    insert: bool,
}

impl<'a> TableScan<'a> {
    fn new(sql: &'a str, tokens: &'a [Token]) -> Self {
        let insert = tokens.first().is_some_and(|t| t.is_keyword(Keyword::Insert));
        Self {
            sql,
            tokens,
            insert,
        }
    }

    fn run(&self) -> Vec<TableReference> {
        let mut out = Vec::new();
        let mut scopes = vec![Scope::default()];
        let mut i = 0;

        while let Some(t) = self.tokens.get(i) {
            let outermost = scopes.len() == 1;
            match t.kind {
                TokenKind::ParenOpen => {
                    if self.insert && outermost && scopes[0].seen {
                        break;
                    }
                    // A derived table fills the name slot of the enclosing list.
                    if let Some(parent) = scopes.last_mut() {
                        parent.expect_name = false;
                    }
                    scopes.push(Scope::default());
                    i += 1;
                    continue;
                }
                TokenKind::ParenClose => {
                    if !outermost {
                        scopes.pop();
                    }
                    i += 1;
                    continue;
                }
                _ => {}
            }

            let Some(scope) = scopes.last_mut() else {
                break;
            };
            if scope.done {
                if outermost {
                    break;
                }
                i += 1;
                continue;
            }

            if !scope.seen {
                if starts_table_list(t) {
                    scope.seen = true;
                    scope.expect_name = true;
                }
                i += 1;
                continue;
            }

            if scope.condition {
                if t.kind.is_join() {
                    scope.condition = false;
                    scope.expect_name = true;
                } else if t.keyword().is_some_and(|k| LIST_ENDERS.contains(&k)) {
                    scope.done = true;
                }
                i += 1;
                continue;
            }

            if scope.expect_name && is_table_name(t) {
                let (reference, next) = self.reference_at(i);
                out.push(reference);
                scope.expect_name = false;
                i = next;
                continue;
            }

            match &t.kind {
                TokenKind::Comma if self.insert && outermost => break,
                TokenKind::Comma => scope.expect_name = true,
                kind if kind.is_join() => scope.expect_name = true,
                TokenKind::Keyword(Keyword::From) => scope.expect_name = true,
                TokenKind::Keyword(Keyword::On | Keyword::Using) => scope.condition = true,
                TokenKind::Keyword(Keyword::As) => {}
                TokenKind::Keyword(_) => scope.done = true,
                TokenKind::Reserved(word) if is_join_modifier(word) => {}
                TokenKind::Reserved(_) => scope.done = true,
                _ => {}
            }
            i += 1;
        }
        out
    }

    /// Parse `[schema.]name [[AS] alias]` starting at token `i`.
    fn reference_at(&self, i: usize) -> (TableReference, usize) {
        let sql = self.sql;
        let tokens = self.tokens;
        let first = tokens[i].name(sql).unwrap_or_default();
        let mut next = i + 1;

        let (schema, table) = match (tokens.get(next), tokens.get(next + 1)) {
            (Some(dot), Some(name)) if dot.kind == TokenKind::Dot && is_qualified_name(name) => {
                next += 2;
                (Some(first), name.name(sql).unwrap_or_default())
            }
            (Some(dot), _) if dot.kind == TokenKind::Dot => {
                next += 1;
                (None, first)
            }
            _ => (None, first),
        };

        let alias = match tokens.get(next).map(|t| &t.kind) {
            Some(TokenKind::Keyword(Keyword::As)) => {
                next += 1;
                match tokens.get(next).map(|t| &t.kind) {
                    Some(TokenKind::Ident { name, .. } | TokenKind::Reserved(name)) => {
                        next += 1;
                        Some(name.as_str())
                    }
                    _ => None,
                }
            }
            Some(TokenKind::Ident { name, .. }) => {
                next += 1;
                Some(name.as_str())
            }
            Some(kind @ TokenKind::Reserved(name)) if !kind.is_join() && !is_join_modifier(name) => {
                next += 1;
                Some(name.as_str())
            }
            _ => None,
        };

        (TableReference::new(schema, table, alias), next)
    }
}

fn starts_table_list(t: &Token) -> bool {
    t.kind.is_join()
        || t
            .keyword()
            .is_some_and(|k| Keyword::TABLE_LIST_START.contains(&k))
}

fn is_join_modifier(word: &str) -> bool {
    JOIN_MODIFIERS.contains(&word.to_ascii_uppercase().as_str())
}

/// A token that can name a table right after `FROM`, `JOIN` or a comma.
fn is_table_name(t: &Token) -> bool {
    match &t.kind {
        TokenKind::Ident { .. } => true,
        TokenKind::Reserved(word) => !is_join_modifier(word) && !t.kind.is_join(),
        TokenKind::Keyword(k) => matches!(k, Keyword::User | Keyword::Database | Keyword::Template),
        _ => false,
    }
}

/// After `schema.` any word is a table name.
fn is_qualified_name(t: &Token) -> bool {
    matches!(
        t.kind,
        TokenKind::Ident { .. } | TokenKind::Reserved(_) | TokenKind::Keyword(_)
    )
}
