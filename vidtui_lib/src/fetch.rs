/// Per-fetch lifecycle state.
///
/// Every remote resource a view depends on gets its own slot: its own
/// status and its own generation counter. There is deliberately no shared
/// "loading" flag, and no joint completion signal between slots.

use crate::api::ApiError;

#[derive(Debug, Clone, Default)]
pub enum LoadState<T> {

    #[default]
    Idle,
    Pending,
    Ready(T),
    Failed(ApiError)
}

/// Holds the load state of one remote resource, tagged with a generation
/// counter so that responses from a superseded fetch can be recognized and
/// dropped instead of overwriting newer state.
#[derive(Debug, Default)]
pub struct FetchSlot<T> {
    state: LoadState<T>,
    generation: u64
}

impl<T> FetchSlot<T> {

    pub fn new() -> Self {
        Self { state: LoadState::Idle, generation: 0 }
    }

    /// Marks the slot pending and returns the generation the caller must
    /// pass back to `commit` when the fetch settles. Any fetch started
    /// under an earlier generation is invalidated by this call.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.state = LoadState::Pending;
        self.generation
    }

    /// Stores a settled result. Results carrying a stale generation are
    /// discarded; returns whether the commit was applied.
    pub fn commit(&mut self, generation: u64, result: Result<T, ApiError>) -> bool {

        if generation != self.generation { return false; }
        self.state = match result {
            Ok(value) => LoadState::Ready(value),
            Err(e) => LoadState::Failed(e)
        };
        true
    }

    /// Back to Idle. Outstanding fetches are invalidated.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = LoadState::Idle;
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, LoadState::Pending)
    }

    pub fn ready(&self) -> Option<&T> {
        match &self.state {
            LoadState::Ready(value) => Some(value),
            _ => None
        }
    }

    pub fn failed(&self) -> Option<&ApiError> {
        match &self.state {
            LoadState::Failed(e) => Some(e),
            _ => None
        }
    }
}
