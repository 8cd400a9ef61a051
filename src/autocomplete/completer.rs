use super::resolve::{Partial, resolve};
use super::*;
use crate::sql::word::clamp_cursor;
use crate::*;
use moka::future::Cache;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tokio::sync::watch;

type LiveKey = (String, String);

/// Completion and introspection over one server connection.
///
/// Queries read an immutable [`SchemaMetadata`] snapshot; a refresh builds a
/// new one off to the side and swaps it in whole. Clones share everything.
pub struct Completer<E: Executor> {
    inner: Arc<Inner<E>>,
}

impl<E: Executor> Clone for Completer<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<E> {
    executor: E,
    settings: Settings,
    snapshot: watch::Sender<Arc<SchemaMetadata>>,
    refreshing: AtomicBool,
    /// Columns of tables outside the snapshot, fetched on demand.
    live_columns: Cache<LiveKey, Arc<Vec<String>>>,
}

/// Clears the refresh flag however the refresh ends.
struct RefreshGuard<'a>(&'a AtomicBool);

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<E: Executor> Completer<E> {
    /// A completer with only the built-in reference lists; call
    /// [`Completer::refresh`] to load the server's schema.
    pub fn new(executor: E, settings: Settings) -> Self {
        let mut store = SchemaMetadata::new();
        store.set_table_formats(settings.table_formats.iter().cloned());
        Self::with_metadata(executor, settings, store)
    }

    /// A completer starting from an already built snapshot.
    pub fn with_metadata(executor: E, settings: Settings, store: SchemaMetadata) -> Self {
        let live_columns = Cache::builder()
            .max_capacity(settings.live_cache_capacity)
            .time_to_live(settings.live_cache_ttl)
            .build();
        let (snapshot, _) = watch::channel(Arc::new(store));
        Self {
            inner: Arc::new(Inner {
                executor,
                settings,
                snapshot,
                refreshing: AtomicBool::new(false),
                live_columns,
            }),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    /// The snapshot queries currently read.
    pub fn snapshot(&self) -> Arc<SchemaMetadata> {
        self.inner.snapshot.borrow().clone()
    }

    /// Notified each time a refresh publishes a new snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<SchemaMetadata>> {
        self.inner.snapshot.subscribe()
    }

    /// Start rebuilding the snapshot in the background.
    ///
    /// Returns `false` without doing anything when a refresh is already
    /// running or there is no tokio runtime to run it on.
    pub fn refresh(&self) -> bool {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("Metadata refresh requested outside a tokio runtime");
            return false;
        };
        if !self.inner.begin_refresh() {
            return false;
        }
        let inner = Arc::clone(&self.inner);
        runtime.spawn(async move {
            let _guard = RefreshGuard(&inner.refreshing);
            inner.rebuild().await;
        });
        true
    }

    /// Rebuild the snapshot and wait for it to be published.
    ///
    /// Returns `false` when another refresh was already running.
    pub async fn refresh_sync(&self) -> bool {
        if !self.inner.begin_refresh() {
            return false;
        }
        let _guard = RefreshGuard(&self.inner.refreshing);
        self.inner.rebuild().await;
        true
    }

    /// Candidates for the cursor at byte offset `cursor_pos` of `full_text`,
    /// using the configured completion mode.
    pub async fn complete(&self, full_text: &str, cursor_pos: usize) -> Vec<Candidate> {
        self.complete_with_mode(full_text, cursor_pos, self.inner.settings.smart_completion)
            .await
    }

    /// Like [`Completer::complete`], choosing smart or plain completion.
    ///
    /// Plain completion prefix-matches every known name and ignores context.
    pub async fn complete_with_mode(
        &self,
        full_text: &str,
        cursor_pos: usize,
        smart: bool,
    ) -> Vec<Candidate> {
        let store = self.snapshot();
        let cursor_text = &full_text[..clamp_cursor(full_text, cursor_pos)];
        let partial = Partial::before(cursor_text);

        if !smart {
            return find_matches(partial.last, store.all_candidates(), MatchMode::Prefix, None)
                .into_iter()
                .map(|m| Candidate::from_match(m, Category::Any))
                .collect();
        }

        let requests = classify(full_text, cursor_text);
        trace!(?requests, "classified cursor context");
        let mut candidates = Vec::new();
        for request in &requests {
            let live = match request {
                SuggestionRequest::Column { tables, .. } => match tables.as_slice() {
                    [table] => match table.schema.as_deref() {
                        Some(schema) if !store.has_schema(schema) => {
                            self.inner.live_columns(schema, &table.table).await
                        }
                        _ => Arc::default(),
                    },
                    _ => Arc::default(),
                },
                _ => Arc::default(),
            };
            candidates.extend(resolve(
                request,
                &store,
                self.inner.settings.casing,
                partial,
                &live,
            ));
        }
        candidates
    }

    /// Describe the word at `cursor_pos`, fetching the columns of a table
    /// outside the snapshot when the word may be one of them.
    pub async fn introspect(&self, full_text: &str, cursor_pos: usize) -> Option<Introspection> {
        let store = self.snapshot();
        let lookup = Lookup::new(full_text, cursor_pos);
        let remote = match lookup.remote_table(&store) {
            Some((schema, table)) => Some(self.inner.live_columns(schema, table).await),
            None => None,
        };
        lookup.resolve(&store, remote.as_deref().map(Vec::as_slice))
    }
}

impl<E: Executor> Inner<E> {
    fn begin_refresh(&self) -> bool {
        let started = self
            .refreshing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if !started {
            info!("Metadata refresh already running, request dropped");
        }
        started
    }

    async fn rebuild(&self) {
        let store = load_metadata(&self.executor, &self.settings.table_formats).await;
        self.snapshot.send_replace(Arc::new(store));
        self.live_columns.invalidate_all();
        info!("Metadata snapshot published");
    }

    /// Columns of `schema.table` from the server, cached. Failures and
    /// timeouts give no columns and are retried on the next request.
    async fn live_columns(&self, schema: &str, table: &str) -> Arc<Vec<String>> {
        let timeout = self.settings.live_fetch_timeout;
        let key = (schema.to_string(), table.to_string());
        let fetch = async {
            let columns = tokio::time::timeout(
                timeout,
                Catalog::new(&self.executor).table_columns(schema, table),
            )
            .await
            .map_err(|_| Error::Timeout(timeout))??;
            debug!("Fetched {} live columns of {schema}.{table}", columns.len());
            Ok::<_, Error>(Arc::new(columns))
        };
        match self.live_columns.try_get_with(key, fetch).await {
            Ok(columns) => columns,
            Err(e) => {
                warn!("Cannot fetch columns of {schema}.{table}: {e}");
                Arc::default()
            }
        }
    }
}
