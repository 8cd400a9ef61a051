use crate::*;
use crate::testing::*;
use rand::distr::{Alphanumeric, SampleString as _};
use sqlx::MySqlPool;
use test_context::AsyncTestContext;
pub use test_context::test_context;

/// A scratch database on the shared MariaDB container, created per test and
/// dropped on teardown unless `keep` is set.
pub struct IsolatedIntegrationTest {
    pub pool: MySqlPool,
    pub database: String,
    /// Leave the database behind for inspection after a failure.
    pub keep: bool,
}

impl IsolatedIntegrationTest {
    fn database_name() -> String {
        let suffix = Alphanumeric.sample_string(&mut rand::rng(), 10);
        format!("sqlsense_{}", suffix.to_lowercase())
    }

    /// Run each DDL/DML statement against the scratch database, in order.
    pub async fn seed(&self, statements: &[&str]) -> Result {
        for statement in statements {
            sqlx::query(sqlx::AssertSqlSafe(statement.to_string()))
                .execute(&self.pool)
                .await?;
        }
        Ok(())
    }

    /// A fresh executor bound to the scratch database.
    pub async fn executor(&self) -> Result<MySqlExecutor> {
        MySqlExecutor::connect(&url(&self.database).await).await
    }
}

impl AsyncTestContext for IsolatedIntegrationTest {
    async fn setup() -> Self {
        crate::testing::common_init();
        let database = Self::database_name();
        let admin = pool(ADMIN_DATABASE).await;
        sqlx::query(sqlx::AssertSqlSafe(format!(
            "CREATE DATABASE `{database}` CHARACTER SET utf8mb4"
        )))
        .execute(&admin)
        .await
        .expect("create scratch database");
        admin.close().await;

        Self {
            pool: pool(&database).await,
            database,
            keep: false,
        }
    }

    async fn teardown(self) {
        self.pool.close().await;
        if self.keep {
            warn!("Keeping scratch database {}", self.database);
            return;
        }
        let admin = pool(ADMIN_DATABASE).await;
        sqlx::query(sqlx::AssertSqlSafe(format!(
            "DROP DATABASE IF EXISTS `{}`",
            self.database
        )))
        .execute(&admin)
        .await
        .expect("drop scratch database");
    }
}
