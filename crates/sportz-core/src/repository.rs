//! Store adapter abstractions.
//!
//! The store is the single source of truth for match and commentary state.
//! Serializing concurrent writers is the adapter's concern.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::records::{Commentary, Match, MatchUpdate, NewCommentary, NewMatch};

/// Repository trait for persisting and reading matches.
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Inserts a match, returning the stored record with `id` and
    /// `created_at` assigned.
    async fn insert(&self, new_match: NewMatch) -> Result<Match, DomainError>;

    /// Returns up to `limit` matches, most recently created first. Ties on
    /// `created_at` are broken by descending `id`.
    async fn select_recent(&self, limit: u32) -> Result<Vec<Match>, DomainError>;

    /// Loads a single match.
    async fn find_by_id(&self, id: i64) -> Result<Option<Match>, DomainError>;

    /// Applies a partial update and returns the updated record.
    ///
    /// Returns `DomainError::MatchNotFound` if no match has the given id.
    async fn update(&self, id: i64, changes: MatchUpdate) -> Result<Match, DomainError>;

    /// Deletes a match and, through the cascade, all of its commentary.
    /// Returns `false` if no match had the given id.
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}

/// Repository trait for the match-scoped commentary stream.
#[async_trait]
pub trait CommentaryRepository: Send + Sync {
    /// Appends a commentary entry. Fails if the referenced match does not
    /// exist.
    async fn insert(&self, entry: NewCommentary) -> Result<Commentary, DomainError>;

    /// Returns up to `limit` entries for a match ordered by minute, then
    /// sequence.
    async fn list_for_match(
        &self,
        match_id: i64,
        limit: u32,
    ) -> Result<Vec<Commentary>, DomainError>;
}
