use crate::*;
use std::future::Future;

/// One result row; `None` for SQL `NULL` or values that are not text.
pub type Row = Vec<Option<String>>;

/// Runs catalog queries against the connected server.
pub trait Executor: Send + Sync + 'static {
    fn fetch_rows(&self, sql: &str) -> impl Future<Output = Result<Vec<Row>>> + Send;
}

/// First column of every row, skipping `NULL`s.
pub fn first_column(rows: Vec<Row>) -> Vec<String> {
    rows.into_iter()
        .filter_map(|row| row.into_iter().next().flatten())
        .collect()
}

/// First two columns of every row where both are present.
pub fn column_pairs(rows: Vec<Row>) -> Vec<(String, String)> {
    rows.into_iter()
        .filter_map(|row| {
            let mut row = row.into_iter();
            Some((row.next()??, row.next()??))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[Option<&str>]) -> Row {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn first_column_skips_nulls() {
        let rows = vec![row(&[Some("a"), None]), row(&[None]), row(&[]), row(&[Some("b")])];
        assert_eq!(first_column(rows), ["a", "b"]);
    }

    #[test]
    fn pairs_need_both_columns() {
        let rows = vec![row(&[Some("t1"), Some("a")]), row(&[Some("t1"), None]), row(&[Some("t2")])];
        assert_eq!(column_pairs(rows), [("t1".to_string(), "a".to_string())]);
    }
}
