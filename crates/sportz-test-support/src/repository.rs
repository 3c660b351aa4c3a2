//! Test repositories — mock `MatchRepository` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sportz_core::error::DomainError;
use sportz_core::records::{Match, MatchUpdate, NewMatch};
use sportz_core::repository::MatchRepository;

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<Match>,
    next_id: i64,
    inserts: usize,
    updates: Vec<(i64, MatchUpdate)>,
    select_limits: Vec<u32>,
}

/// A match repository backed by a `Vec`. Assigns ids starting at 1 and
/// `created_at` values one second apart starting at the configured epoch,
/// and records every `update` and `select_recent` call for assertions.
#[derive(Debug)]
pub struct InMemoryMatchRepository {
    epoch: DateTime<Utc>,
    inner: Mutex<Inner>,
}

impl InMemoryMatchRepository {
    /// Create an empty repository whose first insert is stamped at `epoch`.
    #[must_use]
    pub fn new(epoch: DateTime<Utc>) -> Self {
        Self {
            epoch,
            inner: Mutex::new(Inner {
                next_id: 1,
                ..Inner::default()
            }),
        }
    }

    /// Create a repository pre-populated with `rows`, stored as given.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_rows(epoch: DateTime<Utc>, rows: Vec<Match>) -> Self {
        let repo = Self::new(epoch);
        {
            let mut inner = repo.inner.lock().unwrap();
            inner.next_id = rows.iter().map(|m| m.id).max().unwrap_or(0) + 1;
            inner.rows = rows;
        }
        repo
    }

    /// Returns a snapshot of all stored rows in insertion order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn rows(&self) -> Vec<Match> {
        self.inner.lock().unwrap().rows.clone()
    }

    /// Returns the number of successful `insert` calls.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn insert_count(&self) -> usize {
        self.inner.lock().unwrap().inserts
    }

    /// Returns every `update` call in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn updates(&self) -> Vec<(i64, MatchUpdate)> {
        self.inner.lock().unwrap().updates.clone()
    }

    /// Returns the `limit` argument of every `select_recent` call in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn select_limits(&self) -> Vec<u32> {
        self.inner.lock().unwrap().select_limits.clone()
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    async fn insert(&self, new_match: NewMatch) -> Result<Match, DomainError> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;
        let stored = Match {
            id,
            sport: new_match.sport,
            home_team: new_match.home_team,
            away_team: new_match.away_team,
            status: new_match.status,
            start_time: new_match.start_time,
            end_time: Some(new_match.end_time),
            home_score: new_match.home_score,
            away_score: new_match.away_score,
            created_at: self.epoch + Duration::seconds(id),
        };
        inner.rows.push(stored.clone());
        inner.inserts += 1;
        Ok(stored)
    }

    async fn select_recent(&self, limit: u32) -> Result<Vec<Match>, DomainError> {
        let mut inner = self.inner.lock().unwrap();
        inner.select_limits.push(limit);
        let mut rows = inner.rows.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        rows.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Match>, DomainError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.rows.iter().find(|m| m.id == id).cloned())
    }

    async fn update(&self, id: i64, changes: MatchUpdate) -> Result<Match, DomainError> {
        let mut inner = self.inner.lock().unwrap();
        inner.updates.push((id, changes));
        let row = inner
            .rows
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(DomainError::MatchNotFound(id))?;
        changes.apply_to(row);
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.rows.len();
        inner.rows.retain(|m| m.id != id);
        Ok(inner.rows.len() != before)
    }
}

/// A match repository that always returns a store error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingMatchRepository;

fn connection_refused() -> DomainError {
    DomainError::Store("connection refused".into())
}

#[async_trait]
impl MatchRepository for FailingMatchRepository {
    async fn insert(&self, _new_match: NewMatch) -> Result<Match, DomainError> {
        Err(connection_refused())
    }

    async fn select_recent(&self, _limit: u32) -> Result<Vec<Match>, DomainError> {
        Err(connection_refused())
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Match>, DomainError> {
        Err(connection_refused())
    }

    async fn update(&self, _id: i64, _changes: MatchUpdate) -> Result<Match, DomainError> {
        Err(connection_refused())
    }

    async fn delete(&self, _id: i64) -> Result<bool, DomainError> {
        Err(connection_refused())
    }
}
