use super::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ObjectKind {
    #[display("table")]
    Table,
    #[display("view")]
    View,
    #[display("function")]
    Function,
}

/// Objects of one database. Names are stored escaped.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub name: String,
    pub tables: HashMap<String, Table>,
    pub views: HashMap<String, Table>,
    /// Function name to optional opaque metadata.
    pub functions: HashMap<String, Option<String>>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Insert a table or view. A name is never both: a table replaces a view
    /// of the same name, and a view is ignored when the table exists.
    pub fn insert_relation(&mut self, kind: ObjectKind, relation: Table) {
        match kind {
            ObjectKind::Table => {
                self.views.remove(&relation.name);
                self.tables.insert(relation.name.clone(), relation);
            }
            ObjectKind::View if self.tables.contains_key(&relation.name) => {}
            ObjectKind::View => {
                self.views.insert(relation.name.clone(), relation);
            }
            ObjectKind::Function => {
                self.functions.insert(relation.name, None);
            }
        }
    }

    pub fn relation(&self, name: &str) -> Option<&Table> {
        self.tables.get(name).or_else(|| self.views.get(name))
    }

    pub fn relation_mut(&mut self, kind: ObjectKind, name: &str) -> Option<&mut Table> {
        match kind {
            ObjectKind::Table => self.tables.get_mut(name),
            ObjectKind::View => self.views.get_mut(name),
            ObjectKind::Function => None,
        }
    }

    pub fn names(&self, kind: ObjectKind) -> Vec<&str> {
        match kind {
            ObjectKind::Table => self.tables.keys().map(String::as_str).collect(),
            ObjectKind::View => self.views.keys().map(String::as_str).collect(),
            ObjectKind::Function => self.functions.keys().map(String::as_str).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_and_view_names_are_exclusive() {
        let mut schema = Schema::new("d1");
        schema.insert_relation(ObjectKind::View, Table::new("v"));
        schema.insert_relation(ObjectKind::Table, Table::new("v"));
        assert!(schema.views.is_empty());
        assert!(schema.tables.contains_key("v"));

        schema.insert_relation(ObjectKind::View, Table::new("v"));
        assert!(schema.views.is_empty());
    }

    #[test]
    fn relation_falls_back_to_views() {
        let mut schema = Schema::new("d1");
        schema.insert_relation(ObjectKind::View, Table::new_with("v", ["a"]));
        assert_eq!(schema.relation("v").map(Table::declared_columns), Some(&["a".to_string()][..]));
        assert_eq!(schema.names(ObjectKind::View), vec!["v"]);
    }
}
