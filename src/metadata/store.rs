use super::*;
use crate::*;
use itertools::Itertools as _;
use std::collections::{BTreeSet, HashMap};

/// Everything completion knows about the connected server.
///
/// Built by a sequence of independent population calls, then published
/// behind an `Arc` and never mutated again. Schema object names are stored
/// escaped (see [`NameEscaper`]); lookups accept either spelling.
#[derive(Debug, Clone)]
pub struct SchemaMetadata {
    databases: Vec<String>,
    schemas: HashMap<String, Schema>,
    active_schema: Option<String>,
    users: Vec<String>,
    /// `(database, table)` pairs across every database.
    database_tables: Vec<(String, String)>,
    global_variables: Vec<String>,
    session_variables: Vec<String>,
    show_items: Vec<String>,
    change_items: Vec<String>,
    special_commands: Vec<String>,
    table_formats: Vec<String>,
    keywords: Vec<String>,
    functions: Vec<String>,
    escaper: NameEscaper,
    // Schema object names, users, show and change items for non-smart matching.
    index: BTreeSet<String>,
}

impl Default for SchemaMetadata {
    fn default() -> Self {
        let (keywords, change_items) = split_change_items(DEFAULT_KEYWORDS);
        let mut store = Self {
            databases: Vec::new(),
            schemas: HashMap::new(),
            active_schema: None,
            users: Vec::new(),
            database_tables: Vec::new(),
            global_variables: Vec::new(),
            session_variables: Vec::new(),
            show_items: Vec::new(),
            change_items,
            special_commands: Vec::new(),
            table_formats: Vec::new(),
            keywords,
            functions: DEFAULT_FUNCTIONS.iter().map(|f| f.to_string()).collect(),
            escaper: NameEscaper::default(),
            index: BTreeSet::new(),
        };
        store.rebuild_escaper();
        store
    }
}

impl SchemaMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Reference lists ---

    /// Replace the keyword list. Empty lists are ignored so the defaults stay.
    pub fn set_keywords<S: AsRef<str>>(&mut self, keywords: &[S]) {
        if keywords.is_empty() {
            return;
        }
        (self.keywords, self.change_items) = split_change_items(keywords);
        self.rebuild_escaper();
    }

    /// Replace the built-in function list. Empty lists are ignored.
    pub fn set_functions<S: AsRef<str>>(&mut self, functions: &[S]) {
        if functions.is_empty() {
            return;
        }
        self.functions = functions.iter().map(|f| f.as_ref().to_string()).collect();
        self.rebuild_escaper();
    }

    fn rebuild_escaper(&mut self) {
        self.escaper = NameEscaper::new(
            self.keywords
                .iter()
                .chain(&self.change_items)
                .chain(&self.functions)
                .map(String::as_str),
        );
    }

    pub fn escape_name<'a>(&self, name: &'a str) -> std::borrow::Cow<'a, str> {
        self.escaper.escape(name)
    }

    // --- Population ---

    pub fn extend_databases(&mut self, databases: impl IntoIterator<Item = String>) {
        self.databases.extend(databases);
    }

    /// Select the database unqualified names resolve against, creating its
    /// (empty) schema.
    pub fn set_active_schema(&mut self, name: impl Into<String>) {
        let name = name.into();
        if name.is_empty() {
            self.active_schema = None;
            return;
        }
        self.schemas
            .entry(name.clone())
            .or_insert_with(|| Schema::new(&name));
        self.index.insert(name.clone());
        self.active_schema = Some(name);
    }

    pub fn active_schema(&self) -> Option<&str> {
        self.active_schema.as_deref()
    }

    /// Add tables or views of the active schema, each with only the `*` column.
    pub fn extend_relations(&mut self, kind: ObjectKind, names: impl IntoIterator<Item = String>) {
        let Some(schema) = self.active_schema.clone() else {
            debug!("No active database, skipping {kind} names");
            return;
        };
        for name in names {
            self.insert_relation(&schema, kind, Table::new(name));
        }
    }

    /// Append `(relation, column)` pairs to relations of the active schema,
    /// in the order given.
    pub fn extend_columns(
        &mut self,
        kind: ObjectKind,
        columns: impl IntoIterator<Item = (String, String)>,
    ) {
        let Some(schema_name) = self.active_schema.clone() else {
            debug!("No active database, skipping {kind} columns");
            return;
        };
        for (relation, column) in columns {
            let relation = self.escaper.escape(&relation).into_owned();
            let column = self.escaper.escape(&column).into_owned();
            let Some(schema) = self.schemas.get_mut(&schema_name) else {
                return;
            };
            match schema.relation_mut(kind, &relation) {
                Some(table) => table.push_column(column.clone()),
                None => {
                    trace!("Column {column} of unknown {kind} {relation}");
                    continue;
                }
            }
            self.index.insert(column);
        }
    }

    /// Insert a relation (with its columns) or a function into `schema`.
    pub fn insert_relation(&mut self, schema: &str, kind: ObjectKind, relation: Table) {
        let escaped = Table::new_with(
            self.escaper.escape(&relation.name),
            relation
                .declared_columns()
                .iter()
                .map(|c| self.escaper.escape(c).into_owned()),
        );
        self.index.insert(escaped.name.clone());
        self.index
            .extend(escaped.declared_columns().iter().cloned());
        self.schemas
            .entry(schema.to_string())
            .or_insert_with(|| Schema::new(schema))
            .insert_relation(kind, escaped);
    }

    /// Add user-defined functions of the active schema.
    pub fn extend_functions(&mut self, names: impl IntoIterator<Item = String>) {
        self.extend_relations(ObjectKind::Function, names);
    }

    pub fn extend_users(&mut self, users: impl IntoIterator<Item = String>) {
        for user in users {
            self.index.insert(user.clone());
            self.users.push(user);
        }
    }

    pub fn extend_special_commands(&mut self, commands: impl IntoIterator<Item = String>) {
        self.special_commands.extend(commands);
    }

    pub fn extend_show_items(&mut self, items: impl IntoIterator<Item = String>) {
        for item in items {
            self.index.insert(item.clone());
            self.show_items.push(item);
        }
    }

    pub fn extend_change_items(&mut self, items: impl IntoIterator<Item = String>) {
        for item in items {
            self.index.insert(item.clone());
            self.change_items.push(item);
        }
    }

    pub fn extend_database_tables(&mut self, pairs: impl IntoIterator<Item = (String, String)>) {
        // Database names are kept verbatim, as in `databases`.
        for (database, table) in pairs {
            let table = self.escaper.escape(&table).into_owned();
            self.database_tables.push((database, table));
        }
    }

    pub fn extend_global_variables(&mut self, names: impl IntoIterator<Item = String>) {
        self.global_variables.extend(names);
    }

    pub fn extend_session_variables(&mut self, names: impl IntoIterator<Item = String>) {
        self.session_variables.extend(names);
    }

    pub fn set_table_formats(&mut self, formats: impl IntoIterator<Item = String>) {
        self.table_formats = formats.into_iter().collect();
    }

    // --- Lookups ---

    /// The schema `name` (or its escaped spelling), or the active one for `None`.
    pub fn schema(&self, name: Option<&str>) -> Option<&Schema> {
        let name = name.or(self.active_schema.as_deref())?;
        self.schemas
            .get(name)
            .or_else(|| self.schemas.get(self.escaper.escape(name).as_ref()))
            .or_else(|| self.schemas.get(unescape(name)))
    }

    pub fn has_schema(&self, name: &str) -> bool {
        self.schema(Some(name)).is_some()
    }

    /// Columns of `schema.table` (tables first, then views), `*` first.
    pub fn columns_of(&self, schema: Option<&str>, table: &str) -> Option<&[String]> {
        let schema = self.schema(schema)?;
        let escaped = self.escaper.escape(table);
        [table, escaped.as_ref(), unescape(table)]
            .into_iter()
            .find_map(|name| schema.relation(name))
            .map(Table::columns)
    }

    /// Names of every object of `kind` in `schema` (active schema for `None`).
    pub fn objects_of(&self, schema: Option<&str>, kind: ObjectKind) -> Vec<&str> {
        self.schema(schema)
            .map(|s| s.names(kind))
            .unwrap_or_default()
    }

    /// Union of the columns of `tables`, with duplicates.
    pub fn scoped_columns(&self, tables: &[TableReference]) -> Vec<String> {
        tables
            .iter()
            .filter_map(|t| self.columns_of(t.schema.as_deref(), &t.table))
            .flatten()
            .cloned()
            .collect()
    }

    /// Tables of `database` from the cross-database inventory.
    pub fn tables_in_database(&self, database: &str) -> Vec<&str> {
        let database = database.trim_end_matches('.');
        self.database_tables
            .iter()
            .filter(|(d, _)| d == database || unescape(d) == database)
            .map(|(_, t)| t.as_str())
            .collect()
    }

    /// Databases that hold a table called `table`.
    pub fn databases_with_table(&self, table: &str) -> Vec<&str> {
        self.database_tables
            .iter()
            .filter(|(_, t)| t == table || unescape(t) == table)
            .map(|(d, _)| d.as_str())
            .unique()
            .collect()
    }

    pub fn databases(&self) -> &[String] {
        &self.databases
    }

    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn global_variables(&self) -> &[String] {
        &self.global_variables
    }

    pub fn session_variables(&self) -> &[String] {
        &self.session_variables
    }

    pub fn show_items(&self) -> &[String] {
        &self.show_items
    }

    pub fn change_items(&self) -> &[String] {
        &self.change_items
    }

    pub fn special_commands(&self) -> &[String] {
        &self.special_commands
    }

    pub fn table_formats(&self) -> &[String] {
        &self.table_formats
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn functions(&self) -> &[String] {
        &self.functions
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.iter().any(|k| k.eq_ignore_ascii_case(word))
    }

    pub fn is_function(&self, word: &str) -> bool {
        self.functions.iter().any(|f| f.eq_ignore_ascii_case(word))
    }

    /// Every candidate regardless of context: keywords, built-in functions,
    /// then schema objects, users, show and change items. Each text once.
    pub fn all_candidates(&self) -> Vec<&str> {
        self.keywords
            .iter()
            .chain(&self.functions)
            .chain(&self.index)
            .map(String::as_str)
            .unique()
            .collect()
    }
}
