//! Shared application state.

use std::sync::Arc;

use sportz_core::clock::Clock;
use sportz_core::repository::MatchRepository;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of "now" for status derivation.
    pub clock: Arc<dyn Clock>,
    /// Match store adapter.
    pub matches: Arc<dyn MatchRepository>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, matches: Arc<dyn MatchRepository>) -> Self {
        Self { clock, matches }
    }
}
