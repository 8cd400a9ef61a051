use crate::*;

/// Catalog answers for a server with databases `d1` (active), `d2` and `mysql`.
pub fn sample_executor() -> FakeExecutor {
    FakeExecutor::new()
        .with_rows("SHOW DATABASES", [["d1"], ["d2"], ["mysql"]])
        .with_rows("SELECT DATABASE()", [["d1"]])
        .with_rows("SHOW FULL TABLES", [["orders", "BASE TABLE"], ["recent", "VIEW"]])
        .with_rows(
            "information_schema.columns",
            [["orders", "title"], ["orders", "price"], ["recent", "title"]],
        )
        .with_rows("ROUTINES", [["tax"]])
        .with_rows("mysql.user", [["'root'@'localhost'"]])
        .with_rows("help_topic", [["show databases"], ["show tables"]])
        .with_rows(
            "information_schema.TABLES",
            [
                ["d1", "orders"],
                ["d1", "recent"],
                ["d2", "haha1"],
                ["d2", "haha2"],
                ["mysql", "user"],
            ],
        )
        .with_rows("SHOW GLOBAL VARIABLES", [["port"], ["report_host"]])
        .with_rows("SHOW SESSION VARIABLES", [["autocommit"]])
}

/// A populated store with `d1` active:
///
/// - tables `t1(a, b, c)`, `t2(a, title)`, `orders(title, price, user)`
/// - view `v1(a)`, function `tax`
/// - inventory `d1.{t1,t2,orders}`, `d2.{haha1,haha2}`, `mysql.{user,db}`
pub fn sample_store() -> SchemaMetadata {
    let mut store = SchemaMetadata::new();
    store.extend_databases(["d1", "d2", "mysql"].map(String::from));
    store.set_active_schema("d1");
    store.extend_relations(ObjectKind::Table, ["t1", "t2", "orders"].map(String::from));
    store.extend_relations(ObjectKind::View, ["v1".to_string()]);
    store.extend_columns(
        ObjectKind::Table,
        [
            ("t1", "a"),
            ("t1", "b"),
            ("t1", "c"),
            ("t2", "a"),
            ("t2", "title"),
            ("orders", "title"),
            ("orders", "price"),
            ("orders", "user"),
        ]
        .map(|(t, c)| (t.to_string(), c.to_string())),
    );
    store.extend_columns(ObjectKind::View, [("v1".to_string(), "a".to_string())]);
    store.extend_functions(["tax".to_string()]);
    store.extend_users(["'root'@'localhost'", "'app'@'%'"].map(String::from));
    store.extend_special_commands(SPECIAL_COMMANDS.iter().map(|c| c.to_string()));
    store.extend_show_items(["databases", "tables", "create table"].map(String::from));
    store.extend_database_tables(
        [
            ("d1", "t1"),
            ("d1", "t2"),
            ("d1", "orders"),
            ("d2", "haha1"),
            ("d2", "haha2"),
            ("mysql", "user"),
            ("mysql", "db"),
        ]
        .map(|(d, t)| (d.to_string(), t.to_string())),
    );
    store.extend_global_variables(["port", "report_host"].map(String::from));
    store.extend_session_variables(["autocommit", "report_host"].map(String::from));
    store.set_table_formats(["ascii", "csv", "json"].map(String::from));
    store
}
