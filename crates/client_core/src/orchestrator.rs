//! Search and pagination state machine consumed by the presentation layer.

use std::sync::Arc;

use shared::{
    domain::{PageResult, Photo},
    error::FetchError,
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::source::PhotoSource;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrchestratorPhase {
    #[default]
    Idle,
    Loading,
    LoadingMore,
    Ready,
    Failed,
}

/// Snapshot of everything the gallery needs to render.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    pub query: String,
    pub items: Vec<Photo>,
    /// Last page fetched successfully; `0` before any search.
    pub page: u32,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<FetchError>,
    pub phase: OrchestratorPhase,
}

#[derive(Debug, Clone)]
pub enum SearchEvent {
    StateChanged(SearchState),
    /// A fetch finished after a newer `search` or `reset` superseded it.
    StaleResponseDropped { query: String, page: u32 },
}

struct OrchestratorInner {
    state: SearchState,
    generation: u64,
}

pub struct SearchOrchestrator {
    source: Arc<dyn PhotoSource>,
    page_size: u32,
    inner: Mutex<OrchestratorInner>,
    events: broadcast::Sender<SearchEvent>,
}

impl SearchOrchestrator {
    pub fn new(source: Arc<dyn PhotoSource>) -> Self {
        Self::with_page_size(source, DEFAULT_PAGE_SIZE)
    }

    pub fn with_page_size(source: Arc<dyn PhotoSource>, page_size: u32) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            source,
            page_size: page_size.max(1),
            inner: Mutex::new(OrchestratorInner {
                state: SearchState::default(),
                generation: 0,
            }),
            events,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub async fn snapshot(&self) -> SearchState {
        self.inner.lock().await.state.clone()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SearchEvent> {
        self.events.subscribe()
    }

    /// Starts a fresh search, discarding accumulated results.
    ///
    /// Always permitted, even while another fetch is in flight. The earlier
    /// fetch keeps running but its result is dropped when it lands.
    pub async fn search(&self, query: impl Into<String>) -> SearchState {
        let query = query.into();
        let generation = {
            let mut guard = self.inner.lock().await;
            guard.generation += 1;
            guard.state = SearchState {
                query: query.clone(),
                page: 1,
                loading: true,
                phase: OrchestratorPhase::Loading,
                ..SearchState::default()
            };
            self.emit_state(&guard.state);
            guard.generation
        };
        info!(query = %query, generation, "search: started");

        let outcome = self.source.fetch_page(&query, 1, self.page_size).await;

        let mut guard = self.inner.lock().await;
        if guard.generation != generation {
            self.drop_stale(&query, 1, generation, guard.generation);
            return guard.state.clone();
        }
        match outcome {
            Ok(result) => {
                let PageResult { photos, has_more } = result;
                let state = &mut guard.state;
                state.items = self.clamp_page(photos);
                state.has_more = has_more;
                state.loading = false;
                state.phase = OrchestratorPhase::Ready;
                info!(query = %query, items = state.items.len(), has_more, "search: ready");
            }
            Err(err) => {
                warn!(query = %query, kind = err.kind().as_str(), error = %err, "search: failed");
                let state = &mut guard.state;
                state.error = Some(err);
                state.loading = false;
                state.phase = OrchestratorPhase::Failed;
            }
        }
        self.emit_state(&guard.state);
        guard.state.clone()
    }

    /// Fetches the page after the last successful one and appends it.
    ///
    /// Returns the unchanged snapshot when a fetch is already running or the
    /// source reported no further pages.
    pub async fn load_more(&self) -> SearchState {
        let (query, next_page, generation) = {
            let mut guard = self.inner.lock().await;
            if guard.state.loading || !guard.state.has_more {
                debug!(
                    loading = guard.state.loading,
                    has_more = guard.state.has_more,
                    "load_more: nothing to do"
                );
                return guard.state.clone();
            }
            let state = &mut guard.state;
            state.loading = true;
            state.error = None;
            state.phase = OrchestratorPhase::LoadingMore;
            let query = state.query.clone();
            let next_page = state.page + 1;
            self.emit_state(&guard.state);
            (query, next_page, guard.generation)
        };
        info!(query = %query, page = next_page, "load_more: started");

        let outcome = self
            .source
            .fetch_page(&query, next_page, self.page_size)
            .await;

        let mut guard = self.inner.lock().await;
        if guard.generation != generation {
            self.drop_stale(&query, next_page, generation, guard.generation);
            return guard.state.clone();
        }
        match outcome {
            Ok(result) => {
                let PageResult { photos, has_more } = result;
                let state = &mut guard.state;
                state.items.extend(self.clamp_page(photos));
                state.page = next_page;
                state.has_more = has_more;
                state.loading = false;
                state.phase = OrchestratorPhase::Ready;
                info!(
                    query = %query,
                    page = next_page,
                    items = state.items.len(),
                    has_more,
                    "load_more: ready"
                );
            }
            Err(err) => {
                warn!(
                    query = %query,
                    page = next_page,
                    kind = err.kind().as_str(),
                    error = %err,
                    "load_more: failed"
                );
                let state = &mut guard.state;
                state.error = Some(err);
                state.loading = false;
                state.phase = OrchestratorPhase::Failed;
            }
        }
        self.emit_state(&guard.state);
        guard.state.clone()
    }

    /// Returns to the initial empty state without touching the network.
    /// Any fetch still in flight is ignored when it completes.
    pub async fn reset(&self) -> SearchState {
        let mut guard = self.inner.lock().await;
        guard.generation += 1;
        guard.state = SearchState::default();
        debug!(generation = guard.generation, "search: reset");
        self.emit_state(&guard.state);
        guard.state.clone()
    }

    fn clamp_page(&self, mut photos: Vec<Photo>) -> Vec<Photo> {
        photos.truncate(self.page_size as usize);
        photos
    }

    fn drop_stale(&self, query: &str, page: u32, generation: u64, current: u64) {
        info!(
            query,
            page,
            generation,
            current_generation = current,
            "search: dropping superseded response"
        );
        let _ = self.events.send(SearchEvent::StaleResponseDropped {
            query: query.to_string(),
            page,
        });
    }

    fn emit_state(&self, state: &SearchState) {
        let _ = self.events.send(SearchEvent::StateChanged(state.clone()));
    }
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
