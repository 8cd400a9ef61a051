//! Lexical context classification.
//!
//! Given the statement typed so far and the text before the cursor, decide
//! which kinds of things may come next (`SuggestionRequest`s) and in which
//! scope. Works on a flat token stream, so truncated and invalid input is
//! classified as well as valid input.
crate::reexport!(request);
crate::reexport!(tables);
mod statement;

use crate::*;
use crate::sql::{Keyword, TokenKind, WordBoundary, last_word, tokenize, tokenizer::is_word_char};
use statement::Statement;

/// Classify the cursor position. `cursor_text` is the prefix of `full_text`
/// that ends at the cursor.
///
/// Never fails: empty input yields `[Keyword, Special]`, and input that matches
/// no rule yields `[Keyword]`.
pub fn classify(full_text: &str, cursor_text: &str) -> Vec<SuggestionRequest> {
    let after_cursor = full_text.strip_prefix(cursor_text).unwrap_or_default();
    let word = last_word(cursor_text, WordBoundary::ManyPunctuations);
    let (parsed, qualifier) = if word.is_empty() || word.starts_with('\\') {
        (cursor_text, None)
    } else {
        (&cursor_text[..cursor_text.len() - word.len()], qualifier_of(word))
    };

    // Only the statement under the cursor matters.
    let stmt_start = tokenize(parsed)
        .iter()
        .rfind(|t| t.kind == TokenKind::Semicolon)
        .map_or(0, |t| t.end);
    let classifier = Classifier {
        stmt: Statement::new(&parsed[stmt_start..]),
        full: full_text.get(stmt_start..).unwrap_or_default(),
        qualifier,
    };
    trace!(word, stmt = classifier.stmt.text, "classifying");

    if let Some(table_hint) = classifier.database_lookahead(after_cursor) {
        return vec![SuggestionRequest::Database { table_hint }];
    }
    if let Some(scope) = session_scope(word) {
        return vec![SuggestionRequest::Session { scope }];
    }
    if let Some(requests) = classifier.magic_arguments() {
        return requests;
    }
    classifier.dispatch()
}

/// First segment of a dotted word (`t.` -> `t`, `d2.ta` -> `d2`).
fn qualifier_of(word: &str) -> Option<String> {
    let (parent, _) = word.split_once('.')?;
    if let Some(quoted) = parent.strip_prefix('`') {
        let name = quoted.strip_suffix('`').unwrap_or(quoted);
        return (!name.is_empty()).then(|| name.to_string());
    }
    (!parent.is_empty() && parent.chars().all(is_word_char)).then(|| parent.to_string())
}

fn session_scope(word: &str) -> Option<SessionScope> {
    let name = word.strip_prefix("@@")?.to_ascii_lowercase();
    Some(if name.starts_with("global.") {
        SessionScope::Global
    } else if name.starts_with("session.") {
        SessionScope::Session
    } else {
        SessionScope::Both
    })
}

enum Step {
    Done(Vec<SuggestionRequest>),
    /// Classify again as if the token at this index were the last one.
    Redispatch(usize),
}

struct Classifier<'a> {
    stmt: Statement<'a>,
    /// Statement text including whatever follows the cursor.
    full: &'a str,
    qualifier: Option<String>,
}

impl Classifier<'_> {
    /// `db|.table`: the cursor sits right before a dot in table position.
    /// Returns the table hint, `None` inside when no table follows the dot.
    fn database_lookahead(&self, after_cursor: &str) -> Option<Option<String>> {
        let last = self.stmt.tokens.last()?.keyword()?;
        if !last.is_table_context() {
            return None;
        }
        let head = after_cursor
            .split(|c: char| c.is_whitespace() || matches!(c, ';' | ',' | '(' | ')'))
            .next()
            .unwrap_or_default();
        if let Some(rest) = head.strip_prefix('.') {
            let table = rest.split('.').next().unwrap_or_default().trim_matches('`');
            return Some((!table.is_empty()).then(|| table.to_string()));
        }
        let name = head.strip_suffix('.')?;
        (!name.is_empty() && name.chars().all(is_word_char)).then_some(None)
    }

    /// Argument completion for `%load <file> <table>`.
    fn magic_arguments(&self) -> Option<Vec<SuggestionRequest>> {
        let rest = self.stmt.text.trim_start().strip_prefix('%')?;
        let (name, args) = rest.split_once(char::is_whitespace)?;
        if !name.eq_ignore_ascii_case("load") {
            return Some(vec![]);
        }
        Some(match args.split_whitespace().count() {
            0 => vec![SuggestionRequest::FileName],
            1 => vec![SuggestionRequest::Table {
                schema: self.qualifier.clone(),
            }],
            _ => vec![],
        })
    }

    fn dispatch(&self) -> Vec<SuggestionRequest> {
        let Some(last) = self.stmt.tokens.len().checked_sub(1) else {
            return vec![SuggestionRequest::Keyword, SuggestionRequest::Special];
        };
        let mut current = last;
        if self.stmt.in_where(last) {
            match self.stmt.prev_keyword(last + 1) {
                Some(k) => current = k,
                None => return vec![],
            }
        }
        loop {
            match self.step(current) {
                Step::Done(requests) => return requests,
                Step::Redispatch(next) => {
                    trace!(from = current, to = next, "re-dispatching on previous keyword");
                    current = next;
                }
            }
        }
    }

    fn step(&self, i: usize) -> Step {
        use SuggestionRequest as R;
        let requests = match &self.stmt.tokens[i].kind {
            TokenKind::ParenOpen => self.open_paren(i),
            TokenKind::Comma => return self.look_back(i),
            TokenKind::Operator(op) if op == "=" || op.ends_with(['+', '-', '*', '/']) => {
                return self.look_back(i);
            }
            kind if kind.is_join() => self.table_set(false),
            TokenKind::Keyword(kw) => match kw {
                Keyword::Set | Keyword::OrderBy | Keyword::Distinct => {
                    vec![R::columns(extract_tables(self.full))]
                }
                Keyword::As => vec![],
                Keyword::Show => vec![R::Show],
                Keyword::To if self.stmt.starts_with(Keyword::Change) => vec![R::Change],
                Keyword::To => vec![R::User],
                Keyword::User | Keyword::For if self.stmt.starts_with(Keyword::Select) => {
                    self.select_set(false)
                }
                Keyword::User | Keyword::For => vec![R::User],
                Keyword::Select => self.select_set(false),
                Keyword::Where | Keyword::Having => self.select_set(true),
                kw if kw.is_table_context() => self.table_set(*kw == Keyword::Truncate),
                Keyword::Function => match &self.qualifier {
                    Some(schema) => vec![R::Function {
                        schema: Some(schema.clone()),
                    }],
                    None => vec![
                        R::Function { schema: None },
                        R::Database { table_hint: None },
                    ],
                },
                Keyword::On => self.on_set(),
                Keyword::Use | Keyword::Database | Keyword::Template | Keyword::Connect => {
                    vec![R::Database { table_hint: None }]
                }
                Keyword::TableFormat => vec![R::TableFormat],
                Keyword::And | Keyword::Or => return self.look_back(i),
                _ => vec![R::Keyword],
            },
            _ => vec![R::Keyword],
        };
        Step::Done(requests)
    }

    fn look_back(&self, i: usize) -> Step {
        match self.stmt.prev_keyword(i) {
            Some(k) => Step::Redispatch(k),
            None => Step::Done(vec![]),
        }
    }

    fn open_paren(&self, i: usize) -> Vec<SuggestionRequest> {
        let stmt = &self.stmt;
        let before = i.checked_sub(1).map(|p| &stmt.tokens[p]);
        if stmt.in_where(i) {
            if before.is_some_and(|t| t.is_keyword(Keyword::Exists)) {
                return vec![SuggestionRequest::Keyword];
            }
            return self.select_set(true);
        }
        if before.is_some_and(|t| t.is_keyword(Keyword::Using)) {
            return vec![SuggestionRequest::Column {
                tables: extract_tables(self.full),
                drop_unique: true,
            }];
        }
        match stmt.first_keyword() {
            // A space-preceded paren in a select list opens a sub-select.
            Some(Keyword::Select) if last_word(stmt.text, WordBoundary::Whitespace).starts_with('(') => {
                return vec![SuggestionRequest::Keyword];
            }
            Some(Keyword::Show) => return vec![SuggestionRequest::Show],
            _ => {}
        }
        if let Some(position) = stmt.values_position(i) {
            return vec![SuggestionRequest::ColumnHint {
                table: position.table,
                columns: position.columns,
                value_index: position.value_index,
            }];
        }
        vec![SuggestionRequest::columns(extract_tables(self.full))]
    }

    fn select_set(&self, with_aliases: bool) -> Vec<SuggestionRequest> {
        let tables = extract_tables(self.full);
        if let Some(qualifier) = &self.qualifier {
            return qualified_set(tables, qualifier);
        }
        let aliases = with_aliases.then(|| aliases_of(&tables));
        let mut requests = vec![
            SuggestionRequest::columns(tables),
            SuggestionRequest::Function { schema: None },
            SuggestionRequest::Keyword,
        ];
        if let Some(aliases) = aliases {
            requests.push(SuggestionRequest::Alias { aliases });
        }
        requests
    }

    fn table_set(&self, truncate: bool) -> Vec<SuggestionRequest> {
        let schema = self.qualifier.clone();
        let mut requests = vec![SuggestionRequest::Table {
            schema: schema.clone(),
        }];
        if !truncate {
            requests.push(SuggestionRequest::View {
                schema: schema.clone(),
            });
        }
        if schema.is_none() {
            requests.push(SuggestionRequest::Database { table_hint: None });
        }
        requests
    }

    fn on_set(&self) -> Vec<SuggestionRequest> {
        let tables = extract_tables(self.full);
        if let Some(qualifier) = &self.qualifier {
            return qualified_set(tables, qualifier);
        }
        let aliases = aliases_of(&tables);
        // `GRANT ... ON <table>` has nothing to alias.
        let no_aliases = aliases.is_empty();
        let mut requests = vec![SuggestionRequest::Alias { aliases }];
        if no_aliases {
            requests.push(SuggestionRequest::Table { schema: None });
        }
        requests
    }
}

/// Requests after `qualifier.`: it may name a table, an alias or a schema.
fn qualified_set(tables: Vec<TableReference>, qualifier: &str) -> Vec<SuggestionRequest> {
    let tables = tables
        .into_iter()
        .filter(|t| t.identifies(qualifier))
        .collect();
    let schema = Some(qualifier.to_string());
    vec![
        SuggestionRequest::columns(tables),
        SuggestionRequest::Table {
            schema: schema.clone(),
        },
        SuggestionRequest::View {
            schema: schema.clone(),
        },
        SuggestionRequest::Function { schema },
    ]
}

fn aliases_of(tables: &[TableReference]) -> Vec<String> {
    tables
        .iter()
        .map(|t| t.visible_name().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use SuggestionRequest as R;
    use rstest::rstest;

    fn t(schema: Option<&str>, table: &str, alias: Option<&str>) -> TableReference {
        TableReference::new(schema, table, alias)
    }

    fn select_set(tables: Vec<TableReference>) -> Vec<SuggestionRequest> {
        vec![R::columns(tables), R::Function { schema: None }, R::Keyword]
    }

    fn where_set(tables: Vec<TableReference>, aliases: &[&str]) -> Vec<SuggestionRequest> {
        let mut requests = select_set(tables);
        requests.push(R::Alias {
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        });
        requests
    }

    fn qualified(tables: Vec<TableReference>, q: &str) -> Vec<SuggestionRequest> {
        let schema = Some(q.to_string());
        vec![
            R::columns(tables),
            R::Table { schema: schema.clone() },
            R::View { schema: schema.clone() },
            R::Function { schema },
        ]
    }

    fn tables_in(schema: Option<&str>) -> Vec<SuggestionRequest> {
        let schema = schema.map(str::to_string);
        let mut requests = vec![R::Table { schema: schema.clone() }, R::View { schema: schema.clone() }];
        if schema.is_none() {
            requests.push(R::Database { table_hint: None });
        }
        requests
    }

    /// Classify with the cursor at the end of `text`.
    fn at_end(text: &str) -> Vec<SuggestionRequest> {
        classify(text, text)
    }

    #[rstest]
    #[case("", vec![R::Keyword, R::Special])]
    #[case("sel", vec![R::Keyword, R::Special])]
    #[case("%lo", vec![R::Keyword, R::Special])]
    #[case("select ", select_set(vec![]))]
    #[case("SELECT ", select_set(vec![]))]
    #[case("select user fro", select_set(vec![]))]
    #[case("select a, ", select_set(vec![]))]
    #[case("select count(a), ", select_set(vec![]))]
    #[case("select * from t1 where ", where_set(vec![t(None, "t1", None)], &["t1"]))]
    #[case("select * from t1 x where a = 1 and ", where_set(vec![t(None, "t1", Some("x"))], &["x"]))]
    #[case("select * from t1 where a in (1, ", where_set(vec![t(None, "t1", None)], &["t1"]))]
    #[case("select * from t1 where exists (", vec![R::Keyword])]
    #[case("select a from t1 order by ", vec![R::columns(vec![t(None, "t1", None)])])]
    #[case("select * from t1 where a = 1 order by ", vec![R::columns(vec![t(None, "t1", None)])])]
    #[case("update t1 set ", vec![R::columns(vec![t(None, "t1", None)])])]
    #[case("select distinct ", vec![R::columns(vec![])])]
    #[case("select a as ", vec![])]
    #[case("select * from ", tables_in(None))]
    #[case("select * from t1 join ", tables_in(None))]
    #[case("select * from t1 left join ", tables_in(None))]
    #[case("describe ", tables_in(None))]
    #[case("truncate ", vec![R::Table { schema: None }, R::Database { table_hint: None }])]
    #[case("select * from d2.", tables_in(Some("d2")))]
    #[case("select * from d2.tab", tables_in(Some("d2")))]
    #[case("drop function ", vec![R::Function { schema: None }, R::Database { table_hint: None }])]
    #[case("drop function d1.", vec![R::Function { schema: Some("d1".into()) }])]
    #[case("use ", vec![R::Database { table_hint: None }])]
    #[case("create database x with template ", vec![R::Database { table_hint: None }])]
    #[case("tableformat ", vec![R::TableFormat])]
    #[case("SHOW ", vec![R::Show])]
    #[case("show create table (", vec![R::Show])]
    #[case("ALTER USER ", vec![R::User])]
    #[case("grant select on db1.* to ", vec![R::User])]
    #[case("change master to ", vec![R::Change])]
    #[case("select * from a join b on ", vec![R::Alias { aliases: vec!["a".into(), "b".into()] }])]
    #[case("grant select on ", vec![R::Alias { aliases: vec![] }, R::Table { schema: None }])]
    #[case("select * from a join b using (", vec![R::Column {
        tables: vec![t(None, "a", None), t(None, "b", None)],
        drop_unique: true,
    }])]
    #[case("select (", vec![R::Keyword])]
    #[case("select count(", vec![R::columns(vec![])])]
    #[case("insert into t1 (", vec![R::columns(vec![t(None, "t1", None)])])]
    #[case("insert into t1 values ( ", vec![R::ColumnHint {
        table: t(None, "t1", None),
        columns: vec![],
        value_index: 0,
    }])]
    #[case("insert into t1 (b, a) values (1, ", vec![R::ColumnHint {
        table: t(None, "t1", None),
        columns: vec!["b".into(), "a".into()],
        value_index: 1,
    }])]
    #[case("select 1, 2 from t1 limit ", vec![R::Keyword])]
    #[case("1, ", vec![])]
    #[case("select @@", vec![R::Session { scope: SessionScope::Both }])]
    #[case("select @@query_", vec![R::Session { scope: SessionScope::Both }])]
    #[case("select @@global.report_h", vec![R::Session { scope: SessionScope::Global }])]
    #[case("select @@SESSION.", vec![R::Session { scope: SessionScope::Session }])]
    #[case("%load ", vec![R::FileName])]
    #[case("%load data/ite", vec![R::FileName])]
    #[case("%load data.csv ", vec![R::Table { schema: None }])]
    #[case("%load data.csv t1 ", vec![])]
    #[case("%lsmagic ", vec![])]
    #[case("select a from b; select ", select_set(vec![]))]
    #[case("select a from b; select * from ", tables_in(None))]
    fn classifies_cursor_at_end(#[case] text: &str, #[case] expected: Vec<SuggestionRequest>) {
        assert_eq!(at_end(text), expected);
    }

    #[rstest]
    #[case("select t. from t1 as t", 9, qualified(vec![t(None, "t1", Some("t"))], "t"))]
    #[case("select * from a join b on a.id = b. ", 35, qualified(vec![t(None, "b", None)], "b"))]
    #[case("select user, Passwor from mysql.user;", 20, select_set(vec![t(Some("mysql"), "user", None)]))]
    #[case("select user, password, Select_pri from mysql.user;", 33, select_set(vec![t(Some("mysql"), "user", None)]))]
    #[case("select TABLE_NAM from information_schema.TABLES;", 16, select_set(vec![t(Some("information_schema"), "TABLES", None)]))]
    #[case("select  from t1; select * from t2", 7, select_set(vec![t(None, "t1", None)]))]
    #[case("select * from t1; select  from t2", 25, select_set(vec![t(None, "t2", None)]))]
    #[case("insert into .haha1", 12, vec![R::Database { table_hint: Some("haha1".into()) }])]
    #[case("insert into .", 12, vec![R::Database { table_hint: None }])]
    #[case("insert into da.", 14, vec![R::Database { table_hint: None }])]
    #[case("describe .`t_x` where", 9, vec![R::Database { table_hint: Some("t_x".into()) }])]
    fn classifies_cursor_inside(
        #[case] text: &str,
        #[case] cursor: usize,
        #[case] expected: Vec<SuggestionRequest>,
    ) {
        assert_eq!(classify(text, &text[..cursor]), expected);
    }

    #[rstest]
    #[case("t.", Some("t"))]
    #[case("d2.ta", Some("d2"))]
    #[case("`my db`.x", Some("my db"))]
    #[case("@@global.x", None)]
    #[case("plain", None)]
    #[case(".x", None)]
    fn extracts_qualifier(#[case] word: &str, #[case] expected: Option<&str>) {
        assert_eq!(qualifier_of(word).as_deref(), expected);
    }
}
