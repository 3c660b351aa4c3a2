//! Command handlers for the match context.
//!
//! Each handler validates untrusted input, applies domain rules, and makes at
//! most one write through the store adapter. Validation failures return
//! before the store is touched.

use serde_json::Value;
use sportz_core::clock::Clock;
use sportz_core::error::{DomainError, ValidationIssue};
use sportz_core::records::{Match, MatchUpdate};
use sportz_core::repository::MatchRepository;
use tracing::info;

use crate::domain::status::derive_status;
use crate::domain::validation::{validate_create_match, validate_match_id, validate_update_score};

/// Handles match creation: validates the body, derives the initial status
/// from the window at `clock.now()`, defaults missing scores to zero, and
/// inserts the match.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the body is invalid (no store call is
/// made) and `DomainError::Store` if the insert fails.
pub async fn handle_create_match(
    body: &Value,
    clock: &dyn Clock,
    repo: &dyn MatchRepository,
) -> Result<Match, DomainError> {
    let input = validate_create_match(body).map_err(DomainError::Validation)?;
    let status = derive_status(input.start_time, Some(input.end_time), clock.now())?;

    let stored = repo.insert(input.into_new_match(status)).await?;

    info!(match_id = stored.id, status = %stored.status, "match created");
    Ok(stored)
}

/// Handles a score update: validates the path id and body, then replaces both
/// scores.
///
/// # Errors
///
/// Returns `DomainError::Validation` with the issues of both the id and the
/// body, `DomainError::MatchNotFound` if the match does not exist, and
/// `DomainError::Store` if the update fails.
pub async fn handle_update_score(
    raw_id: &str,
    body: &Value,
    repo: &dyn MatchRepository,
) -> Result<Match, DomainError> {
    let (id, scores) = match (validate_match_id(raw_id), validate_update_score(body)) {
        (Ok(id), Ok(scores)) => (id, scores),
        (id, scores) => {
            let mut issues: Vec<ValidationIssue> = id.err().unwrap_or_default();
            issues.extend(scores.err().unwrap_or_default());
            return Err(DomainError::Validation(issues));
        }
    };

    let updated = repo
        .update(id, MatchUpdate::scores(scores.home_score, scores.away_score))
        .await?;

    info!(
        match_id = updated.id,
        home_score = updated.home_score,
        away_score = updated.away_score,
        "match score updated"
    );
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::json;
    use sportz_core::error::DomainError;
    use sportz_core::records::{MatchStatus, MatchUpdate};
    use sportz_core::repository::MatchRepository;
    use sportz_test_support::{FailingMatchRepository, FixedClock, InMemoryMatchRepository};

    use super::{handle_create_match, handle_update_score};

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
    }

    fn body() -> serde_json::Value {
        json!({
            "sport": "football",
            "homeTeam": "Lions",
            "awayTeam": "Tigers",
            "startTime": "2030-01-01T00:00:00Z",
            "endTime": "2030-01-01T02:00:00Z",
        })
    }

    #[tokio::test]
    async fn test_create_before_window_is_scheduled() {
        // Arrange
        let clock = FixedClock(Utc.with_ymd_and_hms(2029, 12, 31, 12, 0, 0).unwrap());
        let repo = InMemoryMatchRepository::new(epoch());

        // Act
        let created = handle_create_match(&body(), &clock, &repo).await.unwrap();

        // Assert
        assert_eq!(created.id, 1);
        assert_eq!(created.status, MatchStatus::Scheduled);
        assert_eq!(created.home_score, 0);
        assert_eq!(created.away_score, 0);
        assert_eq!(repo.rows(), vec![created]);
    }

    #[tokio::test]
    async fn test_create_inside_window_is_live_with_zero_scores() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2030, 1, 1, 1, 0, 0).unwrap());
        let repo = InMemoryMatchRepository::new(epoch());

        let created = handle_create_match(&body(), &clock, &repo).await.unwrap();

        assert_eq!(created.status, MatchStatus::Live);
        assert_eq!((created.home_score, created.away_score), (0, 0));
        assert_eq!(created.end_time, Some(Utc.with_ymd_and_hms(2030, 1, 1, 2, 0, 0).unwrap()));
    }

    #[tokio::test]
    async fn test_create_after_window_is_finished_and_keeps_scores() {
        let clock = FixedClock(Utc.with_ymd_and_hms(2030, 1, 2, 0, 0, 0).unwrap());
        let repo = InMemoryMatchRepository::new(epoch());
        let mut body = body();
        body["homeScore"] = json!(2);
        body["awayScore"] = json!("1");

        let created = handle_create_match(&body, &clock, &repo).await.unwrap();

        assert_eq!(created.status, MatchStatus::Finished);
        assert_eq!((created.home_score, created.away_score), (2, 1));
    }

    #[tokio::test]
    async fn test_create_with_invalid_body_never_touches_store() {
        let clock = FixedClock(epoch());
        let repo = InMemoryMatchRepository::new(epoch());
        let mut body = body();
        body["endTime"] = body["startTime"].clone();

        let result = handle_create_match(&body, &clock, &repo).await;

        match result {
            Err(DomainError::Validation(issues)) => {
                assert_eq!(issues[0].field(), Some("endTime"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
        assert_eq!(repo.insert_count(), 0);
    }

    #[tokio::test]
    async fn test_create_surfaces_store_failure() {
        let clock = FixedClock(epoch());

        let result = handle_create_match(&body(), &clock, &FailingMatchRepository).await;

        assert!(matches!(result, Err(DomainError::Store(_))));
    }

    #[tokio::test]
    async fn test_update_score_replaces_both_scores() {
        // Arrange
        let clock = FixedClock(epoch());
        let repo = InMemoryMatchRepository::new(epoch());
        let created = handle_create_match(&body(), &clock, &repo).await.unwrap();

        // Act
        let updated = handle_update_score(
            &created.id.to_string(),
            &json!({ "homeScore": 3, "awayScore": 2 }),
            &repo,
        )
        .await
        .unwrap();

        // Assert
        assert_eq!((updated.home_score, updated.away_score), (3, 2));
        assert_eq!(repo.updates(), vec![(created.id, MatchUpdate::scores(3, 2))]);
        let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(stored.home_score, 3);
    }

    #[tokio::test]
    async fn test_update_score_collects_id_and_body_issues() {
        let repo = InMemoryMatchRepository::new(epoch());

        let result = handle_update_score("zero", &json!({ "homeScore": -1 }), &repo).await;

        match result {
            Err(DomainError::Validation(issues)) => {
                let fields: Vec<_> = issues.iter().filter_map(|i| i.field()).collect();
                assert_eq!(fields, vec!["id", "homeScore", "awayScore"]);
            }
            other => panic!("expected Validation, got {other:?}"),
        }
        assert!(repo.updates().is_empty());
    }

    #[tokio::test]
    async fn test_update_score_on_missing_match_is_not_found() {
        let repo = InMemoryMatchRepository::new(epoch());

        let result =
            handle_update_score("41", &json!({ "homeScore": 1, "awayScore": 0 }), &repo).await;

        match result {
            Err(DomainError::MatchNotFound(id)) => assert_eq!(id, 41),
            other => panic!("expected MatchNotFound, got {other:?}"),
        }
    }
}
