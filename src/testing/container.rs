use crate::*;
use sqlx::{MySqlPool, mysql::MySqlPoolOptions};
use std::time::{Duration, Instant};
use testcontainers::{
    ContainerRequest, GenericImage, ImageExt,
    core::{IntoContainerPort as _, Mount, WaitFor, logs::LogFrame},
    runners::AsyncRunner as _,
};
use tokio::sync::OnceCell;

pub type Container = testcontainers::ContainerAsync<GenericImage>;

const ROOT_PASS: &str = "sqlsense";
/// Database every server has, used for administrative connections.
pub(super) const ADMIN_DATABASE: &str = "mysql";

// --- Container Singleton ---
pub async fn mariadb() -> &'static Container {
    static MARIADB: OnceCell<Container> = OnceCell::const_new();
    const TRIES: u8 = 5;
    MARIADB
        .get_or_init(|| async {
            for attempt in 1..=TRIES {
                match container().await {
                    Ok(container) => return container,
                    Err(e) => {
                        error!("Attempt {attempt}/{TRIES} failed: {e:?}");
                        if attempt == TRIES {
                            error!("Fatal: All attempts failed");
                            std::process::exit(1);
                        }
                    }
                }
            }
            unreachable!()
        })
        .await
}

// --- Pool Helpers ---
/// Connection URL for `database` on the test container.
pub(super) async fn url(database: &str) -> String {
    let container: &Container = mariadb().await;
    format!(
        "mysql://root:{ROOT_PASS}@{}:{}/{database}",
        container.get_host().await.expect("container host"),
        container
            .get_host_port_ipv4(3306)
            .await
            .expect("container port")
    )
}

/// Create a new connection pool to `database` on the test container.
pub(super) async fn pool(database: &str) -> MySqlPool {
    MySqlPoolOptions::new()
        .max_connections(3)
        .connect(&url(database).await)
        .await
        .expect("db init connection failure")
}

// --- Container Setup ---
async fn container() -> Result<Container> {
    debug!("Starting MariaDB Container");
    let container_startup = Instant::now();
    let container = image()
        .start()
        .await
        .map_err(|e| Error::Internal(format!("db startup failure: {e}")))?;
    let container_startup = container_startup.elapsed();
    debug!("Container ready in {:#.2?}", container_startup);
    Ok(container)
}

fn image() -> ContainerRequest<GenericImage> {
    const INIT_SQL: &[u8] = b" -- Initialize MariaDB
        SET GLOBAL innodb_flush_log_at_trx_commit = 0;
        SET GLOBAL sync_binlog = 0;";

    let mut image = GenericImage::new("mariadb", "11.4")
        .with_exposed_port(3306.tcp())
        .with_wait_for(WaitFor::message_on_stderr("ready for connections"))
        .with_wait_for(WaitFor::message_on_stderr("port: 3306"))
        .with_copy_to("/docker-entrypoint-initdb.d/init.sql", INIT_SQL.to_vec())
        .with_env_var("MARIADB_ROOT_PASSWORD", ROOT_PASS)
        .with_env_var("MARIADB_ROOT_HOST", "%");

    if config().container_logs {
        image = image.with_log_consumer(|line: &LogFrame| trace!("[Container Logs] {line:?}"));
    }

    if config().container_ramdisked {
        image = image.with_mount(Mount::tmpfs_mount("/var/lib/mysql"));
    }

    image.with_startup_timeout(Duration::from_secs(90))
}
