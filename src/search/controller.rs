//! Search controller: the event loop driving the pipeline

use super::models::{Effect, SearchEvent, SearchStore};
use crate::autocomplete::{fetch_suggestions, InterestBackend, SuggestBackend};
use crate::config::{SearchSettings, Settings};
use crate::network::HttpClient;
use crate::results::{CandidateSet, SearchState};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

/// Orchestrates debouncing, the cache gate, fetching and ranking into a
/// single state machine with one writer.
///
/// All transitions happen on a dedicated controller task; the UI observes
/// [`SearchState`] through a watch channel and feeds keystrokes through
/// [`SearchHandle::input`].
pub struct SearchController {
    client: HttpClient,
    backend: Arc<dyn SuggestBackend>,
    settings: Settings,
}

impl SearchController {
    /// Create a controller for the configured interest endpoint
    pub fn new(settings: Settings) -> Result<Self> {
        let base = Url::parse(&settings.endpoint.base_url).with_context(|| {
            format!("invalid base URL '{}'", settings.endpoint.base_url)
        })?;

        let client = HttpClient::with_settings(&settings.outgoing)?;
        let backend = Arc::new(InterestBackend::from_settings(&settings));

        info!("Suggestion backend ready at {}", base);

        Ok(Self {
            client,
            backend,
            settings,
        })
    }

    /// Create a controller with a specific client and backend
    pub fn with_backend(
        settings: Settings,
        client: HttpClient,
        backend: Arc<dyn SuggestBackend>,
    ) -> Self {
        Self {
            client,
            backend,
            settings,
        }
    }

    /// Start the controller task and return the handle the UI talks to
    pub fn spawn(self) -> SearchHandle {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SearchState::idle());

        let task = tokio::spawn(run(
            events_rx,
            events_tx.clone(),
            state_tx,
            self.client,
            self.backend,
            self.settings.search,
        ));

        SearchHandle {
            events: events_tx,
            state: state_rx,
            task,
        }
    }
}

/// Handle to a running [`SearchController`]
///
/// Dropping the handle shuts the controller down and cancels any pending
/// debounce timer.
pub struct SearchHandle {
    events: mpsc::UnboundedSender<SearchEvent>,
    state: watch::Receiver<SearchState>,
    task: JoinHandle<()>,
}

impl SearchHandle {
    /// Feed the raw input text on every change
    pub fn input(&self, text: impl Into<String>) {
        let _ = self.events.send(SearchEvent::Keystroke(text.into()));
    }

    /// Subscribe to state changes
    pub fn state(&self) -> watch::Receiver<SearchState> {
        self.state.clone()
    }

    /// Snapshot of the current state
    pub fn current(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Whether the controller task is still alive
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for SearchHandle {
    fn drop(&mut self) {
        let _ = self.events.send(SearchEvent::Shutdown);
    }
}

/// The controller event loop: one writer for all state transitions.
async fn run(
    mut events_rx: mpsc::UnboundedReceiver<SearchEvent>,
    events_tx: mpsc::UnboundedSender<SearchEvent>,
    state_tx: watch::Sender<SearchState>,
    client: HttpClient,
    backend: Arc<dyn SuggestBackend>,
    search: SearchSettings,
) {
    let mut store = SearchStore::new();
    let mut debounce: Option<JoinHandle<()>> = None;

    while let Some(event) = events_rx.recv().await {
        match event {
            SearchEvent::Keystroke(raw) => {
                // Cancel before rescheduling; a stale timer must never fire.
                if let Some(timer) = debounce.take() {
                    timer.abort();
                }

                let effect = store.keystroke(&raw);
                state_tx.send_replace(store.state().clone());

                if let Effect::StartDebounce { generation } = effect {
                    let tx = events_tx.clone();
                    let delay = Duration::from_millis(search.debounce_ms);
                    debounce = Some(tokio::spawn(async move {
                        tokio::time::sleep(delay).await;
                        let _ = tx.send(SearchEvent::DebounceFired { generation });
                    }));
                }
            }
            SearchEvent::DebounceFired { generation } => {
                if !store.commit(generation) {
                    debug!("Dropping stale debounce commit (generation {})", generation);
                    continue;
                }
                state_tx.send_replace(store.state().clone());

                let effect = store.decide(search.reuse_cached);
                state_tx.send_replace(store.state().clone());

                if let Effect::StartFetch { generation, query } = effect {
                    debug!(
                        "Fetching suggestions for '{}' (generation {})",
                        query, generation
                    );
                    let tx = events_tx.clone();
                    let client = client.clone();
                    let backend = backend.clone();
                    tokio::spawn(async move {
                        let result =
                            fetch_suggestions(&client, backend.as_ref(), query.as_str()).await;
                        let outcome =
                            result.map(|candidates| CandidateSet::new(query, candidates));
                        let _ = tx.send(SearchEvent::FetchResolved {
                            generation,
                            outcome,
                        });
                    });
                }
            }
            SearchEvent::FetchResolved {
                generation,
                outcome,
            } => {
                if generation == store.generation() {
                    if let Err(e) = &outcome {
                        warn!("Suggestion fetch failed: {}", e);
                    }
                }
                if store.fetch_resolved(generation, outcome) {
                    state_tx.send_replace(store.state().clone());
                } else {
                    debug!(
                        "Discarding stale fetch resolution (generation {})",
                        generation
                    );
                }
            }
            SearchEvent::Shutdown => {
                if let Some(timer) = debounce.take() {
                    timer.abort();
                }
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autocomplete::FetchError;
    use crate::results::{Candidate, Phase};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Clone)]
    struct Scripted {
        delay: Duration,
        outcome: Result<Vec<Candidate>, String>,
    }

    /// Backend answering from a fixed script, recording every lookup
    struct ScriptedBackend {
        script: HashMap<String, Scripted>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new() -> Self {
            Self {
                script: HashMap::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn on(
            mut self,
            query: &str,
            delay_ms: u64,
            outcome: Result<Vec<Candidate>, &str>,
        ) -> Self {
            self.script.insert(
                query.to_string(),
                Scripted {
                    delay: Duration::from_millis(delay_ms),
                    outcome: outcome.map_err(String::from),
                },
            );
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SuggestBackend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn suggest(
            &self,
            _client: &HttpClient,
            query: &str,
        ) -> Result<Vec<Candidate>, FetchError> {
            self.calls.lock().unwrap().push(query.to_string());
            let entry = self.script.get(query).cloned().unwrap_or_else(|| Scripted {
                delay: Duration::ZERO,
                outcome: Ok(Vec::new()),
            });
            if !entry.delay.is_zero() {
                tokio::time::sleep(entry.delay).await;
            }
            entry.outcome.map_err(FetchError::Transport)
        }
    }

    fn spawn_with(backend: Arc<ScriptedBackend>, reuse_cached: bool) -> SearchHandle {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("typeahead_rs=debug")
            .try_init();

        let mut settings = Settings::new("http://localhost", "/autocomplete/interests", "tok");
        settings.search.reuse_cached = reuse_cached;
        let client = HttpClient::new().unwrap();
        SearchController::with_backend(settings, client, backend).spawn()
    }

    fn names(state: &SearchState) -> Vec<String> {
        state.ranked.iter().map(|c| c.name.clone()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input_stays_idle_without_fetch() {
        let backend = Arc::new(ScriptedBackend::new());
        let handle = spawn_with(backend.clone(), true);

        handle.input("   ");
        tokio::time::sleep(Duration::from_millis(500)).await;

        let state = handle.current();
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.ranked.is_empty());
        assert!(!state.is_loading);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_keystrokes_commit_once() {
        let backend = Arc::new(
            ScriptedBackend::new().on("cat", 0, Ok(vec![Candidate::new("1", "cats", 2.0)])),
        );
        let handle = spawn_with(backend.clone(), true);
        let mut rx = handle.state();

        handle.input("c");
        handle.input("ca");
        handle.input("cat");

        let state = rx.wait_for(|s| s.phase == Phase::Ready).await.unwrap().clone();
        assert_eq!(state.query, "cat");
        assert_eq!(names(&state), vec!["cats"]);
        assert_eq!(backend.calls(), vec!["cat"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_never_overwrites_fresh_one() {
        let backend = Arc::new(
            ScriptedBackend::new()
                .on("ca", 500, Ok(vec![Candidate::new("1", "car", 1.0)]))
                .on("cat", 50, Ok(vec![Candidate::new("2", "cats", 2.0)])),
        );
        let handle = spawn_with(backend.clone(), true);
        let mut rx = handle.state();

        handle.input("ca");
        rx.wait_for(|s| s.phase == Phase::Fetching).await.unwrap();

        // Supersede the slow "ca" fetch before it resolves.
        handle.input("cat");
        let state = rx.wait_for(|s| s.phase == Phase::Ready).await.unwrap().clone();
        assert_eq!(state.query, "cat");
        assert_eq!(names(&state), vec!["cats"]);

        // Let the slow fetch resolve; its result must be discarded.
        tokio::time::sleep(Duration::from_millis(1000)).await;
        let state = handle.current();
        assert_eq!(state.query, "cat");
        assert_eq!(names(&state), vec!["cats"]);
        assert_eq!(backend.calls(), vec!["ca", "cat"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_prefix_narrowing_reuses_cached_set() {
        let backend = Arc::new(ScriptedBackend::new().on(
            "ca",
            0,
            Ok(vec![
                Candidate::new("1", "cat", 5.0),
                Candidate::new("2", "car", 9.0),
                Candidate::new("3", "scan", 2.0),
            ]),
        ));
        let handle = spawn_with(backend.clone(), true);
        let mut rx = handle.state();

        handle.input("ca");
        let state = rx.wait_for(|s| s.phase == Phase::Ready).await.unwrap().clone();
        assert_eq!(names(&state), vec!["cat", "car", "scan"]);

        handle.input("cat");
        let state = rx
            .wait_for(|s| s.phase == Phase::Ready && s.query == "cat")
            .await
            .unwrap()
            .clone();

        // Served from the cached set: "car" matches neither way for "cat".
        assert_eq!(names(&state), vec!["cat"]);
        assert_eq!(backend.calls(), vec!["ca"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reuse_disabled_fetches_every_commit() {
        let backend = Arc::new(
            ScriptedBackend::new()
                .on("ca", 0, Ok(vec![Candidate::new("1", "cat", 5.0)]))
                .on("cat", 0, Ok(vec![Candidate::new("1", "cat", 5.0)])),
        );
        let handle = spawn_with(backend.clone(), false);
        let mut rx = handle.state();

        handle.input("ca");
        rx.wait_for(|s| s.phase == Phase::Ready).await.unwrap();
        handle.input("cat");
        rx.wait_for(|s| s.phase == Phase::Ready && s.query == "cat")
            .await
            .unwrap();

        assert_eq!(backend.calls(), vec!["ca", "cat"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_clears_loading_and_pipeline_survives() {
        let backend = Arc::new(
            ScriptedBackend::new()
                .on("dog", 0, Err("connection refused"))
                .on("ca", 0, Ok(vec![Candidate::new("1", "cat", 5.0)])),
        );
        let handle = spawn_with(backend.clone(), true);
        let mut rx = handle.state();

        handle.input("dog");
        let state = rx.wait_for(|s| s.phase == Phase::Ready).await.unwrap().clone();
        assert!(state.ranked.is_empty());
        assert!(!state.is_loading);

        // The next keystroke re-triggers the pipeline as usual.
        handle.input("ca");
        let state = rx
            .wait_for(|s| s.phase == Phase::Ready && s.query == "ca")
            .await
            .unwrap()
            .clone();
        assert_eq!(names(&state), vec!["cat"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clearing_query_beats_inflight_fetch() {
        let backend = Arc::new(
            ScriptedBackend::new().on("ca", 300, Ok(vec![Candidate::new("1", "cat", 5.0)])),
        );
        let handle = spawn_with(backend.clone(), true);
        let mut rx = handle.state();

        handle.input("ca");
        rx.wait_for(|s| s.phase == Phase::Fetching).await.unwrap();

        handle.input("");
        tokio::time::sleep(Duration::from_millis(1000)).await;

        let state = handle.current();
        assert_eq!(state.phase, Phase::Idle);
        assert!(state.ranked.is_empty());
        assert!(!state.is_loading);
    }
}
