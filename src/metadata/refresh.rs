use super::*;
use crate::*;
use std::time::Instant;

/// Log a failed population step and carry on with an empty result.
fn degrade<T: Default>(kind: &str, result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        warn!("Failed to fetch {kind}, continuing without them: {e}");
        T::default()
    })
}

/// Build a fresh [`SchemaMetadata`] from the server behind `executor`.
///
/// Every kind of object is fetched independently; a failure empties that kind
/// only. Reference lists are fetched first so names are escaped against the
/// server's own keywords and functions.
pub async fn load_metadata<E: Executor>(executor: &E, table_formats: &[String]) -> SchemaMetadata {
    let started = Instant::now();
    let catalog = Catalog::new(executor);
    let mut store = SchemaMetadata::new();

    store.set_keywords(&degrade("keywords", catalog.keywords().await));
    store.set_functions(&degrade("sql functions", catalog.sql_functions().await));

    store.extend_databases(degrade("databases", catalog.databases().await));

    let active = degrade("active database", catalog.active_database().await);
    if let Some(active) = active {
        store.set_active_schema(active.as_str());

        let (tables, views) = degrade("tables", catalog.relations().await);
        store.extend_relations(ObjectKind::Table, tables);
        store.extend_relations(ObjectKind::View, views);
        let columns = degrade("columns", catalog.columns(&active).await);
        store.extend_columns(ObjectKind::Table, columns.iter().cloned());
        store.extend_columns(ObjectKind::View, columns);

        store.extend_functions(degrade("functions", catalog.functions(&active).await));
    }

    store.extend_users(degrade("users", catalog.users().await));
    store.extend_special_commands(SPECIAL_COMMANDS.iter().map(|c| c.to_string()));
    store.extend_show_items(degrade("show items", catalog.show_items().await));
    store.extend_database_tables(degrade("database tables", catalog.database_tables().await));
    store.extend_global_variables(degrade("global variables", catalog.global_variables().await));
    store.extend_session_variables(degrade(
        "session variables",
        catalog.session_variables().await,
    ));
    store.set_table_formats(table_formats.iter().cloned());

    debug!(
        "Schema metadata loaded in {:#.2?} (active database {:?})",
        started.elapsed(),
        store.active_schema()
    );
    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[tokio::test]
    async fn populates_every_kind() {
        common_init();
        let executor = sample_executor();
        let store = load_metadata(&executor, &["csv".to_string()]).await;

        assert_eq!(store.databases(), ["d1", "d2", "mysql"]);
        assert_eq!(store.active_schema(), Some("d1"));
        assert_eq!(
            store.columns_of(None, "orders").map(<[String]>::to_vec),
            Some(vec!["*".into(), "title".into(), "price".into()])
        );
        assert_eq!(store.objects_of(None, ObjectKind::View), ["recent"]);
        assert_eq!(store.objects_of(None, ObjectKind::Function), ["tax"]);
        assert_eq!(store.users(), ["'root'@'localhost'"]);
        assert_eq!(store.show_items(), ["databases", "tables"]);
        assert_eq!(store.databases_with_table("haha1"), ["d2"]);
        assert_eq!(store.global_variables(), ["port", "report_host"]);
        assert_eq!(store.session_variables(), ["autocommit"]);
        assert_eq!(store.special_commands().len(), SPECIAL_COMMANDS.len());
        assert_eq!(store.table_formats(), ["csv"]);
    }

    #[tokio::test]
    async fn a_failing_kind_only_empties_itself() {
        common_init();
        let executor = sample_executor().failing("mysql.user").failing("SHOW DATABASES");
        let store = load_metadata(&executor, &[]).await;

        assert!(store.users().is_empty());
        assert!(store.databases().is_empty());
        assert_eq!(store.active_schema(), Some("d1"));
        assert!(store.columns_of(None, "orders").is_some());
    }

    #[tokio::test]
    async fn missing_reference_tables_keep_defaults() {
        let executor = sample_executor()
            .failing("information_schema.keywords")
            .failing("information_schema.sql_functions");
        let store = load_metadata(&executor, &[]).await;
        assert!(store.is_keyword("select"));
        assert!(store.is_function("group_concat"));
    }

    #[tokio::test]
    async fn no_active_database_skips_schema_objects() {
        let executor = FakeExecutor::new()
            .with_rows("SHOW DATABASES", [["d1"]])
            .with_null_row("SELECT DATABASE()");
        let store = load_metadata(&executor, &[]).await;
        assert_eq!(store.active_schema(), None);
        assert!(store.objects_of(None, ObjectKind::Table).is_empty());
        assert!(!executor.was_queried("ROUTINES"));
    }
}
