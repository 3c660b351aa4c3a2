//! Shared test mocks and utilities for the Sportz match tracker.

mod clock;
mod repository;

pub use clock::{FixedClock, ManualClock};
pub use repository::{FailingMatchRepository, InMemoryMatchRepository};
