//! Runs queued catalog requests on the tokio runtime
//!
//! Each view owns one request slot. Dispatching into a busy slot aborts the
//! task already running there, so a superseded request never finishes its
//! network round-trip. Results come back over an unbounded channel and are
//! applied by [`App::apply`](crate::app::App::apply), which still checks the
//! token in case a response was already queued before the abort.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::debug;

use crate::api::Catalog;
use crate::app::{Fetch, Fetched, Slot};

pub type FetchedSender = mpsc::UnboundedSender<Fetched>;
pub type FetchedReceiver = mpsc::UnboundedReceiver<Fetched>;

/// Spawns one task per request, at most one live task per slot
pub struct Dispatcher {
    catalog: Arc<dyn Catalog>,
    tx: FetchedSender,
    inflight: HashMap<Slot, AbortHandle>,
}

impl Dispatcher {
    pub fn new(catalog: Arc<dyn Catalog>) -> (Self, FetchedReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        let dispatcher = Self {
            catalog,
            tx,
            inflight: HashMap::new(),
        };
        (dispatcher, rx)
    }

    /// Spawn `fetch`, aborting whatever was running in its slot.
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, fetch: Fetch) {
        let slot = fetch.slot();
        if let Some(previous) = self.inflight.remove(&slot) {
            if !previous.is_finished() {
                debug!(?slot, "aborting superseded request");
                previous.abort();
            }
        }

        let catalog = Arc::clone(&self.catalog);
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let fetched = run(catalog.as_ref(), fetch).await;
            // Receiver gone means the app is shutting down
            let _ = tx.send(fetched);
        });
        self.inflight.insert(slot, handle.abort_handle());
    }

    pub fn dispatch_all(&mut self, fetches: impl IntoIterator<Item = Fetch>) {
        for fetch in fetches {
            self.dispatch(fetch);
        }
    }

    /// Number of slots with a task that has not finished yet
    pub fn in_flight(&self) -> usize {
        self.inflight.values().filter(|h| !h.is_finished()).count()
    }

    /// Abort every outstanding request
    pub fn shutdown(&mut self) {
        for (slot, handle) in self.inflight.drain() {
            if !handle.is_finished() {
                debug!(?slot, "aborting request on shutdown");
                handle.abort();
            }
        }
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Execute a single request against the catalog
pub async fn run(catalog: &dyn Catalog, fetch: Fetch) -> Fetched {
    match fetch {
        Fetch::Search { token, query, sort } => Fetched::Search {
            token,
            result: catalog.search_movies(&query, Some(sort)).await,
        },
        Fetch::Discover {
            token,
            sort,
            release_gte,
            release_lte,
        } => Fetched::Discover {
            token,
            result: catalog
                .discover_movies(Some(sort), release_gte.as_deref(), release_lte.as_deref())
                .await,
        },
        Fetch::Movie { token, id } => Fetched::Movie {
            token,
            result: catalog.movie_by_id(id).await,
        },
    }
}
