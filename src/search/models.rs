//! Controller events, effects and the single-owner state store
//!
//! Every state transition is a pure reducer step on [`SearchStore`]; side
//! effects (starting the debounce timer, starting a fetch) are described by
//! the returned [`Effect`] and executed by the controller loop. Stale work
//! is recognized by comparing the generation a timer or fetch was spawned
//! under against the store's current generation.

use crate::autocomplete::FetchError;
use crate::cache::{self, FetchDecision};
use crate::query::Query;
use crate::results::{rank, CandidateSet, Phase, SearchState};

/// An event consumed by the controller loop
#[derive(Debug)]
pub enum SearchEvent {
    /// Raw input text changed
    Keystroke(String),
    /// The debounce timer spawned under `generation` elapsed
    DebounceFired { generation: u64 },
    /// The fetch spawned under `generation` completed
    FetchResolved {
        generation: u64,
        outcome: Result<CandidateSet, FetchError>,
    },
    /// The handle was dropped; cancel pending work and stop
    Shutdown,
}

/// A side effect requested by a reducer step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Nothing to do
    None,
    /// Schedule the debounce timer for `generation`
    StartDebounce { generation: u64 },
    /// Start a remote lookup for `query` under `generation`
    StartFetch { generation: u64, query: Query },
}

/// Single-owner store for the search pipeline state
#[derive(Debug, Default)]
pub struct SearchStore {
    state: SearchState,
    cached: Option<CandidateSet>,
    query: Query,
    generation: u64,
}

impl SearchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The observable state after the latest transition
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// The generation of the latest keystroke
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The candidate set from the most recent successful fetch
    pub fn cached(&self) -> Option<&CandidateSet> {
        self.cached.as_ref()
    }

    /// React to raw input. Every keystroke supersedes all in-flight work by
    /// bumping the generation. Empty input drops straight to Idle; anything
    /// else enters Debouncing and asks for a timer.
    pub fn keystroke(&mut self, raw: &str) -> Effect {
        self.generation = self.generation.wrapping_add(1);
        self.query = Query::new(raw);

        if self.query.is_empty() {
            self.state = SearchState::idle();
            return Effect::None;
        }

        self.state.query = self.query.as_str().to_string();
        self.state.is_loading = false;
        self.state.phase = Phase::Debouncing;
        Effect::StartDebounce {
            generation: self.generation,
        }
    }

    /// React to the debounce timer. Returns false for a stale timer, which
    /// must cause no further processing.
    pub fn commit(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.query.is_empty() {
            return false;
        }
        self.state.phase = Phase::Deciding;
        true
    }

    /// Consult the cache gate for the committed query. Only valid directly
    /// after a successful [`commit`](Self::commit).
    pub fn decide(&mut self, reuse_cached: bool) -> Effect {
        let decision = if reuse_cached {
            cache::decide(&self.query, self.cached.as_ref())
        } else {
            FetchDecision::Fetch
        };

        match decision {
            FetchDecision::Reuse => {
                if let Some(set) = self.cached.as_ref() {
                    self.state.ranked = rank(&self.query, &set.candidates);
                }
                self.state.is_loading = false;
                self.state.phase = Phase::Ready;
                Effect::None
            }
            FetchDecision::Fetch => {
                self.state.is_loading = true;
                self.state.phase = Phase::Fetching;
                Effect::StartFetch {
                    generation: self.generation,
                    query: self.query.clone(),
                }
            }
        }
    }

    /// React to a completed fetch. A resolution whose generation is not
    /// current is stale and mutates nothing; the return value says whether
    /// the state changed. On failure the previous ranked results stay in
    /// place and only the loading flag clears.
    pub fn fetch_resolved(
        &mut self,
        generation: u64,
        outcome: Result<CandidateSet, FetchError>,
    ) -> bool {
        if generation != self.generation || self.query.is_empty() {
            return false;
        }

        if let Ok(set) = outcome {
            self.state.ranked = rank(&self.query, &set.candidates);
            self.cached = Some(set);
        }
        self.state.is_loading = false;
        self.state.phase = Phase::Ready;
        true
    }
}
