//! `PostgreSQL` implementation of the `CommentaryRepository` trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use sportz_core::error::DomainError;
use sportz_core::records::{Commentary, NewCommentary};
use sportz_core::repository::CommentaryRepository;

use crate::store_error;

macro_rules! commentary_columns {
    () => {
        "id, match_id, minute, sequence, period, event_type, actor, team, message, metadata, \
         tags, created_at"
    };
}

const INSERT_COMMENTARY: &str = concat!(
    "INSERT INTO commentary \
     (match_id, minute, sequence, period, event_type, actor, team, message, metadata, tags) \
     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
     RETURNING ",
    commentary_columns!()
);

// Events without a minute (pre-match notes) sort first.
const SELECT_FOR_MATCH: &str = concat!(
    "SELECT ",
    commentary_columns!(),
    " FROM commentary WHERE match_id = $1 \
     ORDER BY minute ASC NULLS FIRST, sequence ASC, id ASC \
     LIMIT $2"
);

#[derive(Debug, sqlx::FromRow)]
struct CommentaryRow {
    id: i64,
    match_id: i64,
    minute: Option<i32>,
    sequence: i32,
    period: Option<String>,
    event_type: Option<String>,
    actor: Option<String>,
    team: Option<String>,
    message: String,
    metadata: Option<serde_json::Value>,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
}

impl From<CommentaryRow> for Commentary {
    fn from(row: CommentaryRow) -> Self {
        Self {
            id: row.id,
            match_id: row.match_id,
            minute: row.minute,
            sequence: row.sequence,
            period: row.period,
            event_type: row.event_type,
            actor: row.actor,
            team: row.team,
            message: row.message,
            metadata: row.metadata,
            tags: row.tags,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL-backed commentary repository.
#[derive(Debug, Clone)]
pub struct PgCommentaryRepository {
    pool: PgPool,
}

impl PgCommentaryRepository {
    /// Creates a new `PgCommentaryRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentaryRepository for PgCommentaryRepository {
    #[instrument(skip(self, entry), fields(match_id = entry.match_id), err)]
    async fn insert(&self, entry: NewCommentary) -> Result<Commentary, DomainError> {
        let row = sqlx::query_as::<_, CommentaryRow>(INSERT_COMMENTARY)
            .bind(entry.match_id)
            .bind(entry.minute)
            .bind(entry.sequence)
            .bind(entry.period)
            .bind(entry.event_type)
            .bind(entry.actor)
            .bind(entry.team)
            .bind(entry.message)
            .bind(entry.metadata)
            .bind(entry.tags)
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(row.into())
    }

    #[instrument(skip(self), err)]
    async fn list_for_match(
        &self,
        match_id: i64,
        limit: u32,
    ) -> Result<Vec<Commentary>, DomainError> {
        let rows = sqlx::query_as::<_, CommentaryRow>(SELECT_FOR_MATCH)
            .bind(match_id)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(Commentary::from).collect())
    }
}
