//! MariaDB catalog queries behind an [`Executor`].
use super::*;
use crate::*;

const DATABASES: &str = "SHOW DATABASES";
const ACTIVE_DATABASE: &str = "SELECT DATABASE()";
const TABLES: &str = "SHOW FULL TABLES";
const USERS: &str = "SELECT CONCAT('''', user, '''@''', host, '''') FROM mysql.user";
const SHOW_TOPICS: &str = "SELECT LOWER(name) FROM mysql.help_topic WHERE name LIKE 'SHOW %'";
const DATABASE_TABLES: &str = "SELECT TABLE_SCHEMA, TABLE_NAME FROM information_schema.TABLES";
const GLOBAL_VARIABLES: &str = "SHOW GLOBAL VARIABLES";
const SESSION_VARIABLES: &str = "SHOW SESSION VARIABLES";
const KEYWORDS: &str = "SELECT UPPER(word) FROM information_schema.keywords";
const SQL_FUNCTIONS: &str = "SELECT UPPER(function) FROM information_schema.sql_functions";

/// Quote `value` as a string literal.
fn literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
}

/// Quote `name` as an identifier, dropping quotes it already carries.
fn identifier(name: &str) -> String {
    format!("`{}`", unescape(name).replace('`', "``"))
}

/// Typed access to the catalog queries completion needs.
pub struct Catalog<'e, E> {
    executor: &'e E,
}

impl<'e, E: Executor> Catalog<'e, E> {
    pub fn new(executor: &'e E) -> Self {
        Self { executor }
    }

    async fn names(&self, sql: &str) -> Result<Vec<String>> {
        Ok(first_column(self.executor.fetch_rows(sql).await?))
    }

    async fn pairs(&self, sql: &str) -> Result<Vec<(String, String)>> {
        Ok(column_pairs(self.executor.fetch_rows(sql).await?))
    }

    pub async fn databases(&self) -> Result<Vec<String>> {
        self.names(DATABASES).await
    }

    /// The selected database, `None` when no database is in use.
    pub async fn active_database(&self) -> Result<Option<String>> {
        Ok(self.names(ACTIVE_DATABASE).await?.into_iter().next())
    }

    /// Tables and views of the active database, split by kind.
    pub async fn relations(&self) -> Result<(Vec<String>, Vec<String>)> {
        let mut tables = Vec::new();
        let mut views = Vec::new();
        for (name, kind) in self.pairs(TABLES).await? {
            if kind.ends_with("VIEW") {
                views.push(name);
            } else {
                tables.push(name);
            }
        }
        Ok((tables, views))
    }

    /// `(table, column)` pairs of `database`, by table then ordinal position.
    pub async fn columns(&self, database: &str) -> Result<Vec<(String, String)>> {
        let sql = format!(
            "SELECT TABLE_NAME, COLUMN_NAME FROM information_schema.columns \
             WHERE table_schema = {} ORDER BY table_name, ordinal_position",
            literal(database)
        );
        self.pairs(&sql).await
    }

    /// Accounts as `'user'@'host'`.
    pub async fn users(&self) -> Result<Vec<String>> {
        self.names(USERS).await
    }

    /// Stored functions of `database`.
    pub async fn functions(&self, database: &str) -> Result<Vec<String>> {
        let sql = format!(
            "SELECT ROUTINE_NAME FROM information_schema.ROUTINES \
             WHERE ROUTINE_TYPE = 'FUNCTION' AND ROUTINE_SCHEMA = {}",
            literal(database)
        );
        self.names(&sql).await
    }

    /// What may follow `SHOW`, from the server's help topics.
    pub async fn show_items(&self) -> Result<Vec<String>> {
        Ok(self
            .names(SHOW_TOPICS)
            .await?
            .into_iter()
            .filter_map(|topic| {
                topic
                    .split_once(char::is_whitespace)
                    .map(|(_, rest)| rest.trim().to_string())
            })
            .collect())
    }

    /// `(database, table)` for every table the account can see.
    pub async fn database_tables(&self) -> Result<Vec<(String, String)>> {
        self.pairs(DATABASE_TABLES).await
    }

    pub async fn global_variables(&self) -> Result<Vec<String>> {
        self.names(GLOBAL_VARIABLES).await
    }

    pub async fn session_variables(&self) -> Result<Vec<String>> {
        self.names(SESSION_VARIABLES).await
    }

    /// Server keyword list, uppercase. Servers without the table fail here.
    pub async fn keywords(&self) -> Result<Vec<String>> {
        self.names(KEYWORDS).await
    }

    /// Server built-in function list, uppercase.
    pub async fn sql_functions(&self) -> Result<Vec<String>> {
        self.names(SQL_FUNCTIONS).await
    }

    /// Columns of one table, read live with `EXPLAIN`.
    pub async fn table_columns(&self, database: &str, table: &str) -> Result<Vec<String>> {
        let sql = format!("EXPLAIN {}.{}", identifier(database), identifier(table));
        self.names(&sql).await
    }
}
