use super::TableReference;

/// Which variable namespace a `@@` reference draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SessionScope {
    #[display("global")]
    Global,
    #[display("session")]
    Session,
    #[display("both")]
    Both,
}

/// One kind of thing the user may be about to type at the cursor, with the
/// scope it should be resolved in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionRequest {
    Keyword,
    Special,
    Column {
        tables: Vec<TableReference>,
        /// Only offer columns shared by two or more of `tables` (`JOIN ... USING (`).
        drop_unique: bool,
    },
    Function {
        schema: Option<String>,
    },
    Table {
        schema: Option<String>,
    },
    View {
        schema: Option<String>,
    },
    Alias {
        aliases: Vec<String>,
    },
    /// `table_hint` is the table typed after the cursor in `db|.table`; only
    /// databases holding it are offered when it is non-empty.
    Database {
        table_hint: Option<String>,
    },
    Show,
    Change,
    User,
    Session {
        scope: SessionScope,
    },
    /// Cursor sits in an `INSERT ... VALUES (` tuple.
    ColumnHint {
        table: TableReference,
        /// Explicit `INSERT INTO t (a, b)` column list; empty means the table's
        /// natural column order.
        columns: Vec<String>,
        value_index: usize,
    },
    TableFormat,
    FileName,
}

impl SuggestionRequest {
    pub(crate) fn columns(tables: Vec<TableReference>) -> Self {
        SuggestionRequest::Column {
            tables,
            drop_unique: false,
        }
    }
}
