//! Test support: in-memory fakes and fixtures for unit tests, and a MariaDB
//! container for the `#[ignore]`d integration tests.
#![cfg(test)]
crate::reexport!(container);
crate::reexport!(context);
crate::reexport!(fake);
crate::reexport!(fixtures);
pub use rstest::*;

/// Install a `RUST_LOG`-driven subscriber writing through the test harness.
/// Safe to call from every test.
pub(crate) fn common_init() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

mod isolated_integration_tests {
    use super::{super::*, *};

    #[test_context(IsolatedIntegrationTest)]
    #[tokio::test]
    #[ignore = "needs a docker daemon"]
    async fn scratch_database_is_selected(ctx: &mut IsolatedIntegrationTest) -> Result {
        let database: Option<String> = sqlx::query_scalar("SELECT DATABASE()")
            .fetch_one(&ctx.pool)
            .await?;
        assert_eq!(database.as_deref(), Some(ctx.database.as_str()));
        Ok(())
    }

    #[test_context(IsolatedIntegrationTest)]
    #[tokio::test]
    #[ignore = "needs a docker daemon"]
    async fn loads_metadata_from_a_live_server(ctx: &mut IsolatedIntegrationTest) -> Result {
        ctx.seed(&[
            "CREATE TABLE haha1 (a INT PRIMARY KEY, `user` VARCHAR(255))",
            "CREATE VIEW recent AS SELECT a FROM haha1",
        ])
        .await?;

        let executor = ctx.executor().await?;
        let store = load_metadata(&executor, &[]).await;

        assert_eq!(store.active_schema(), Some(ctx.database.as_str()));
        assert_eq!(
            store.columns_of(None, "haha1").map(<[String]>::to_vec),
            Some(vec!["*".into(), "a".into(), "`user`".into()])
        );
        assert_eq!(store.objects_of(None, ObjectKind::View), ["recent"]);
        assert!(store.databases().contains(&ctx.database));
        assert!(store.databases_with_table("haha1").contains(&ctx.database.as_str()));
        assert!(store.global_variables().iter().any(|v| v == "port"));
        assert!(!store.show_items().is_empty());

        executor.pool().close().await;
        Ok(())
    }

    #[test_context(IsolatedIntegrationTest)]
    #[rstest]
    #[case("select em from contacts", 9, "email")]
    #[case("select * from contacts where na", 31, "`name`")]
    #[tokio::test]
    #[ignore = "needs a docker daemon"]
    async fn completes_live_columns(
        ctx: &mut IsolatedIntegrationTest,
        #[case] text: &str,
        #[case] cursor: usize,
        #[case] expected: &str,
    ) -> Result {
        ctx.seed(&["CREATE TABLE contacts (id INT PRIMARY KEY, name VARCHAR(255), email TEXT)"])
            .await?;

        let completer = Completer::new(ctx.executor().await?, Settings::default());
        assert!(completer.refresh_sync().await);

        let first = completer
            .complete(text, cursor)
            .await
            .into_iter()
            .find(|c| c.category == Category::Column);
        assert_eq!(first.map(|c| c.text).as_deref(), Some(expected));
        Ok(())
    }
}
