//! What the word under the cursor refers to.
use crate::*;
use crate::sql::word::{clamp_cursor, word_around};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Introspection {
    Keyword {
        word: String,
    },
    Function {
        word: String,
    },
    Database {
        word: String,
    },
    Table {
        word: String,
        database: String,
    },
    Column {
        word: String,
        database: String,
        table: String,
    },
    /// The column an `INSERT ... VALUES` slot fills.
    ColumnHint {
        hint: String,
        table: String,
        value_index: usize,
    },
    /// The slot is past the last column of the insert's column list.
    OutOfColumn {
        table: String,
        value_index: usize,
    },
}

/// The word at a cursor position and how its context classifies.
///
/// Resolution is split from construction so a caller can fetch the columns
/// of a table the snapshot lacks (see [`Lookup::remote_table`]) in between.
#[derive(Debug, Clone)]
pub struct Lookup<'a> {
    word: &'a str,
    /// Text right after the word.
    rest: &'a str,
    requests: Vec<SuggestionRequest>,
}

impl<'a> Lookup<'a> {
    pub fn new(full_text: &'a str, cursor_pos: usize) -> Self {
        let cursor = clamp_cursor(full_text, cursor_pos);
        let (start, end) = word_around(full_text, cursor);
        Self {
            word: &full_text[start..end],
            rest: &full_text[end..],
            requests: classify(full_text, &full_text[..start]),
        }
    }

    pub fn word(&self) -> &str {
        self.word
    }

    /// `(database, table)` of the first scoped table when its database is
    /// missing from `store`.
    pub fn remote_table(&self, store: &SchemaMetadata) -> Option<(&str, &str)> {
        let table = self.scoped_tables()?.first()?;
        let schema = table.schema.as_deref()?;
        (!store.has_schema(schema)).then_some((schema, table.table.as_str()))
    }

    fn scoped_tables(&self) -> Option<&[TableReference]> {
        self.requests.iter().find_map(|r| match r {
            SuggestionRequest::Column { tables, .. } => Some(tables.as_slice()),
            _ => None,
        })
    }

    /// Resolve against `store`. `remote_columns` stands in for the columns of
    /// [`Lookup::remote_table`] when it was fetched.
    ///
    /// Value hints win; otherwise the word is tried as a column, table,
    /// database, function and keyword, in that order.
    pub fn resolve(
        &self,
        store: &SchemaMetadata,
        remote_columns: Option<&[String]>,
    ) -> Option<Introspection> {
        if let Some(hint) = self.column_hint(store) {
            return Some(hint);
        }
        if self.word.is_empty() {
            return None;
        }
        let word = self.word.to_string();

        // `name(` is a call, never a column.
        if !self.rest.starts_with('(')
            && let Some(found) = self.column(store, remote_columns)
        {
            return Some(found);
        }
        if let Some(found) = self.table(store) {
            return Some(found);
        }
        if self.requested(|r| matches!(r, SuggestionRequest::Database { .. }))
            && store.databases().iter().any(|d| same_name(d, self.word))
        {
            return Some(Introspection::Database { word });
        }
        if self.is_function(store) {
            return Some(Introspection::Function { word });
        }
        if self.requested(|r| matches!(r, SuggestionRequest::Keyword)) && store.is_keyword(self.word) {
            return Some(Introspection::Keyword { word });
        }
        None
    }

    fn requested(&self, pred: impl Fn(&SuggestionRequest) -> bool) -> bool {
        self.requests.iter().any(pred)
    }

    fn column_hint(&self, store: &SchemaMetadata) -> Option<Introspection> {
        let (table, columns, value_index) = self.requests.iter().find_map(|r| match r {
            SuggestionRequest::ColumnHint {
                table,
                columns,
                value_index,
            } => Some((table, columns, *value_index)),
            _ => None,
        })?;
        let columns: Vec<&str> = if columns.is_empty() {
            store
                .columns_of(table.schema.as_deref(), &table.table)?
                .iter()
                .map(String::as_str)
                .filter(|c| *c != ALL_COLUMNS)
                .collect()
        } else {
            columns.iter().map(String::as_str).collect()
        };
        let table = table.table.clone();
        Some(match columns.get(value_index) {
            Some(hint) => Introspection::ColumnHint {
                hint: hint.to_string(),
                table,
                value_index,
            },
            None => Introspection::OutOfColumn { table, value_index },
        })
    }

    fn column(&self, store: &SchemaMetadata, remote_columns: Option<&[String]>) -> Option<Introspection> {
        let tables = self.scoped_tables()?;
        let active = store.active_schema();
        let names = |columns: &[String]| columns.iter().any(|c| same_name(c, self.word));

        if let Some(first) = tables.first() {
            let columns = remote_columns
                .filter(|_| self.remote_table(store).is_some())
                .or_else(|| store.columns_of(first.schema.as_deref(), &first.table));
            if columns.is_some_and(names) {
                return Some(Introspection::Column {
                    word: self.word.to_string(),
                    database: first.schema.as_deref().or(active).unwrap_or_default().to_string(),
                    table: first.table.clone(),
                });
            }
        }

        let active = active?;
        let mut tables = store.objects_of(None, ObjectKind::Table);
        tables.sort_unstable();
        tables
            .into_iter()
            .find(|t| store.columns_of(None, t).is_some_and(names))
            .map(|t| Introspection::Column {
                word: self.word.to_string(),
                database: active.to_string(),
                table: unescape(t).to_string(),
            })
    }

    fn table(&self, store: &SchemaMetadata) -> Option<Introspection> {
        let schema = self.requests.iter().find_map(|r| match r {
            SuggestionRequest::Table { schema } => Some(schema.as_deref()),
            _ => None,
        })?;
        let (database, known) = match schema {
            Some(db) => (db, store.tables_in_database(db)),
            None => (
                store.active_schema()?,
                store.objects_of(None, ObjectKind::Table),
            ),
        };
        known
            .iter()
            .any(|t| same_name(t, self.word))
            .then(|| Introspection::Table {
                word: self.word.to_string(),
                database: database.to_string(),
            })
    }

    fn is_function(&self, store: &SchemaMetadata) -> bool {
        self.requests.iter().any(|r| match r {
            SuggestionRequest::Function { schema } => {
                store
                    .objects_of(schema.as_deref(), ObjectKind::Function)
                    .iter()
                    .any(|f| same_name(f, self.word))
                    || (schema.is_none() && store.is_function(self.word))
            }
            _ => false,
        })
    }
}

/// Identifier equality ignoring backtick quoting and ASCII case.
fn same_name(stored: &str, word: &str) -> bool {
    unescape(stored).eq_ignore_ascii_case(unescape(word))
}

/// Describe the word at `cursor_pos` using only what `store` already holds.
pub fn introspect(store: &SchemaMetadata, full_text: &str, cursor_pos: usize) -> Option<Introspection> {
    Lookup::new(full_text, cursor_pos).resolve(store, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    fn column(word: &str, database: &str, table: &str) -> Option<Introspection> {
        Some(Introspection::Column {
            word: word.into(),
            database: database.into(),
            table: table.into(),
        })
    }

    #[rstest]
    #[case("insert into t1 (a, b, c) VALUES (", usize::MAX, Some(Introspection::ColumnHint {
        hint: "a".into(),
        table: "t1".into(),
        value_index: 0,
    }))]
    #[case("insert into t1 values (1, ", usize::MAX, Some(Introspection::ColumnHint {
        hint: "b".into(),
        table: "t1".into(),
        value_index: 1,
    }))]
    #[case("insert into t1 (a) VALUES (1, 2", usize::MAX, Some(Introspection::OutOfColumn {
        table: "t1".into(),
        value_index: 1,
    }))]
    #[case("insert into nowhere values (", usize::MAX, None)]
    fn value_slots(#[case] text: &str, #[case] cursor: usize, #[case] expected: Option<Introspection>) {
        assert_eq!(introspect(&sample_store(), text, cursor), expected);
    }

    #[rstest]
    #[case("select a from t1", 7, column("a", "d1", "t1"))]
    #[case("select title from orders", 9, column("title", "d1", "orders"))]
    #[case("select price from t1", 8, column("price", "d1", "orders"))]
    #[case("select * from orders", 16, Some(Introspection::Table {
        word: "orders".into(),
        database: "d1".into(),
    }))]
    #[case("select * from d2.haha1", 19, Some(Introspection::Table {
        word: "haha1".into(),
        database: "d2".into(),
    }))]
    #[case("use d2", 5, Some(Introspection::Database { word: "d2".into() }))]
    #[case("select count(a) from t1", 9, Some(Introspection::Function { word: "count".into() }))]
    #[case("select tax(price) from orders", 8, Some(Introspection::Function { word: "tax".into() }))]
    #[case("select a from t1", 10, Some(Introspection::Keyword { word: "from".into() }))]
    #[case("select xyz from t1", 8, None)]
    #[case("select ", 7, None)]
    fn words_resolve_by_priority(
        #[case] text: &str,
        #[case] cursor: usize,
        #[case] expected: Option<Introspection>,
    ) {
        assert_eq!(introspect(&sample_store(), text, cursor), expected);
    }

    #[test]
    fn remote_tables_use_fetched_columns() {
        let store = sample_store();
        let lookup = Lookup::new("select email from remote.events", 9);
        assert_eq!(lookup.word(), "email");
        assert_eq!(lookup.remote_table(&store), Some(("remote", "events")));
        assert_eq!(lookup.resolve(&store, None), None);
        assert_eq!(
            lookup.resolve(&store, Some(&["id".to_string(), "email".to_string()])),
            column("email", "remote", "events")
        );
    }

    #[test]
    fn known_databases_need_no_fetch() {
        let store = sample_store();
        let lookup = Lookup::new("select a from d1.t1", 7);
        assert_eq!(lookup.remote_table(&store), None);
        assert_eq!(lookup.resolve(&store, None), column("a", "d1", "t1"));
    }
}
