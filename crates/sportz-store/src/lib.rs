//! PostgreSQL store adapter for the Sportz match tracker.
//!
//! Implements the `sportz-core` repository traits over a `sqlx::PgPool`.
//! The schema lives in the workspace `migrations/` directory.

pub mod pg_commentary_repository;
pub mod pg_match_repository;

use sportz_core::error::DomainError;

/// Maps any `sqlx` failure to a store error.
pub(crate) fn store_error(err: sqlx::Error) -> DomainError {
    DomainError::Store(err.to_string())
}
