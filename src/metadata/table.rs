/// First entry of every column list; selects all columns.
pub const ALL_COLUMNS: &str = "*";

/// A table or view with its columns in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    // `ALL_COLUMNS` first, then declared columns in ordinal order.
    columns: Vec<String>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: vec![ALL_COLUMNS.to_string()],
        }
    }

    pub fn new_with(
        name: impl Into<String>,
        columns: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut table = Self::new(name);
        table.columns.extend(columns.into_iter().map(Into::into));
        table
    }

    pub fn push_column(&mut self, column: impl Into<String>) {
        self.columns.push(column.into());
    }

    /// Columns including the leading `*`.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Declared columns only, in order.
    pub fn declared_columns(&self) -> &[String] {
        &self.columns[1..]
    }
}
