use crate::*;
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

/// In-memory [`Executor`] answering queries that contain a registered pattern.
///
/// The first matching pattern wins; failures are checked before rows and
/// unmatched queries return no rows. Clones share the query log.
#[derive(Debug, Clone, Default)]
pub struct FakeExecutor {
    failures: Vec<String>,
    responses: Vec<(String, Vec<Row>)>,
    delays: Vec<(String, Duration)>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows<R, V>(mut self, pattern: &str, rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|v| Some(v.into())).collect())
            .collect();
        self.responses.push((pattern.to_string(), rows));
        self
    }

    /// A single row holding one `NULL`.
    pub fn with_null_row(mut self, pattern: &str) -> Self {
        self.responses.push((pattern.to_string(), vec![vec![None]]));
        self
    }

    pub fn failing(mut self, pattern: &str) -> Self {
        self.failures.push(pattern.to_string());
        self
    }

    pub fn with_delay(mut self, pattern: &str, delay: Duration) -> Self {
        self.delays.push((pattern.to_string(), delay));
        self
    }

    pub fn query_count(&self, pattern: &str) -> usize {
        self.queries
            .lock()
            .expect("query log poisoned")
            .iter()
            .filter(|q| q.contains(pattern))
            .count()
    }

    pub fn was_queried(&self, pattern: &str) -> bool {
        self.query_count(pattern) > 0
    }
}

impl Executor for FakeExecutor {
    async fn fetch_rows(&self, sql: &str) -> Result<Vec<Row>> {
        self.queries
            .lock()
            .expect("query log poisoned")
            .push(sql.to_string());

        if let Some((_, delay)) = self.delays.iter().find(|(p, _)| sql.contains(p.as_str())) {
            tokio::time::sleep(*delay).await;
        }
        if self.failures.iter().any(|p| sql.contains(p.as_str())) {
            return Err(Error::Query(format!("injected failure: {sql}")));
        }
        Ok(self
            .responses
            .iter()
            .find(|(p, _)| sql.contains(p.as_str()))
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn answers_by_pattern_and_logs_queries() -> Result {
        let executor = FakeExecutor::new()
            .with_rows("SHOW DATABASES", [["d1"], ["d2"]])
            .failing("mysql.user");
        let rows = executor.fetch_rows("SHOW DATABASES").await?;
        assert_eq!(rows, vec![vec![Some("d1".to_string())], vec![Some("d2".to_string())]]);
        assert!(executor.fetch_rows("SELECT * FROM mysql.user").await.is_err());
        assert!(executor.fetch_rows("SHOW TABLES").await?.is_empty());
        assert_eq!(executor.clone().query_count("SHOW"), 2);
        Ok(())
    }
}
