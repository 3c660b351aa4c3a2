//! `PostgreSQL` implementation of the `MatchRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use sportz_core::error::DomainError;
use sportz_core::records::{Match, MatchStatus, MatchUpdate, NewMatch};
use sportz_core::repository::MatchRepository;

use crate::store_error;

// The enum column is read as text so rows decode without a custom sqlx type.
macro_rules! match_columns {
    () => {
        "id, sport, home_team, away_team, status::text AS status, start_time, end_time, \
         home_score, away_score, created_at"
    };
}

const INSERT_MATCH: &str = concat!(
    "INSERT INTO matches \
     (sport, home_team, away_team, status, start_time, end_time, home_score, away_score) \
     VALUES ($1, $2, $3, $4::match_status, $5, $6, $7, $8) \
     RETURNING ",
    match_columns!()
);

const SELECT_RECENT: &str = concat!(
    "SELECT ",
    match_columns!(),
    " FROM matches ORDER BY created_at DESC, id DESC LIMIT $1"
);

const SELECT_BY_ID: &str = concat!("SELECT ", match_columns!(), " FROM matches WHERE id = $1");

const UPDATE_MATCH: &str = concat!(
    "UPDATE matches SET \
     status = COALESCE($2::text::match_status, status), \
     home_score = COALESCE($3, home_score), \
     away_score = COALESCE($4, away_score) \
     WHERE id = $1 \
     RETURNING ",
    match_columns!()
);

const DELETE_MATCH: &str = "DELETE FROM matches WHERE id = $1";

#[derive(Debug, sqlx::FromRow)]
struct MatchRow {
    id: i64,
    sport: String,
    home_team: String,
    away_team: String,
    status: String,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    home_score: i32,
    away_score: i32,
    created_at: DateTime<Utc>,
}

impl MatchRow {
    fn into_match(self) -> Result<Match, DomainError> {
        let status = self
            .status
            .parse()
            .map_err(|e| DomainError::Store(format!("match {}: {e}", self.id)))?;
        Ok(Match {
            id: self.id,
            sport: self.sport,
            home_team: self.home_team,
            away_team: self.away_team,
            status,
            start_time: self.start_time,
            end_time: self.end_time,
            home_score: self.home_score,
            away_score: self.away_score,
            created_at: self.created_at,
        })
    }
}

/// PostgreSQL-backed match repository.
#[derive(Debug, Clone)]
pub struct PgMatchRepository {
    pool: PgPool,
}

impl PgMatchRepository {
    /// Creates a new `PgMatchRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchRepository for PgMatchRepository {
    #[instrument(skip(self, new_match), err)]
    async fn insert(&self, new_match: NewMatch) -> Result<Match, DomainError> {
        sqlx::query_as::<_, MatchRow>(INSERT_MATCH)
            .bind(new_match.sport)
            .bind(new_match.home_team)
            .bind(new_match.away_team)
            .bind(new_match.status.as_str())
            .bind(new_match.start_time)
            .bind(new_match.end_time)
            .bind(new_match.home_score)
            .bind(new_match.away_score)
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)?
            .into_match()
    }

    #[instrument(skip(self), err)]
    async fn select_recent(&self, limit: u32) -> Result<Vec<Match>, DomainError> {
        sqlx::query_as::<_, MatchRow>(SELECT_RECENT)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(MatchRow::into_match)
            .collect()
    }

    #[instrument(skip(self), err)]
    async fn find_by_id(&self, id: i64) -> Result<Option<Match>, DomainError> {
        sqlx::query_as::<_, MatchRow>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?
            .map(MatchRow::into_match)
            .transpose()
    }

    #[instrument(skip(self), err)]
    async fn update(&self, id: i64, changes: MatchUpdate) -> Result<Match, DomainError> {
        sqlx::query_as::<_, MatchRow>(UPDATE_MATCH)
            .bind(id)
            .bind(changes.status.map(MatchStatus::as_str))
            .bind(changes.home_score)
            .bind(changes.away_score)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?
            .ok_or(DomainError::MatchNotFound(id))?
            .into_match()
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(DELETE_MATCH)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(result.rows_affected() > 0)
    }
}
