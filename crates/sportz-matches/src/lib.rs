//! Sportz — match lifecycle bounded context.
//!
//! Validates untrusted match input, derives a match's status from its time
//! window, and orchestrates the store adapter for listing, creating, reading
//! and scoring matches.

pub mod application;
pub mod domain;
