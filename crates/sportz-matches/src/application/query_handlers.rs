//! Query handlers for the match context.

use sportz_core::clock::Clock;
use sportz_core::error::DomainError;
use sportz_core::records::{Match, MatchUpdate};
use sportz_core::repository::MatchRepository;
use tracing::debug;

use crate::application::status_sync::sync_match_status;
use crate::domain::validation::{ListMatchesParams, validate_list_query, validate_match_id};

/// Lists the most recently created matches, newest first.
///
/// The limit defaults to 50 and is capped at 100. Statuses are returned as
/// last persisted; listing does not sync them.
///
/// # Errors
///
/// Returns `DomainError::Validation` if `limit` is out of range and
/// `DomainError::Store` if the store read fails.
pub async fn list_recent_matches(
    params: &ListMatchesParams,
    repo: &dyn MatchRepository,
) -> Result<Vec<Match>, DomainError> {
    let query = validate_list_query(params).map_err(DomainError::Validation)?;
    let limit = query.effective_limit();

    let matches = repo.select_recent(limit).await?;

    debug!(limit, returned = matches.len(), "listed recent matches");
    Ok(matches)
}

/// Loads a single match and reconciles its stored status with its window at
/// `clock.now()`, persisting the new status if it changed.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a malformed id,
/// `DomainError::MatchNotFound` if no match exists,
/// `DomainError::InvalidTimeWindow` if the stored window is corrupt, and
/// `DomainError::Store` if a store call fails.
pub async fn get_match_by_id(
    raw_id: &str,
    clock: &dyn Clock,
    repo: &dyn MatchRepository,
) -> Result<Match, DomainError> {
    let id = validate_match_id(raw_id).map_err(DomainError::Validation)?;
    let mut record = repo
        .find_by_id(id)
        .await?
        .ok_or(DomainError::MatchNotFound(id))?;

    sync_match_status(&mut record, clock, move |match_id, status| async move {
        repo.update(match_id, MatchUpdate::status(status))
            .await
            .map(|_| ())
    })
    .await?;

    Ok(record)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use sportz_core::error::DomainError;
    use sportz_core::records::{Match, MatchStatus, MatchUpdate};
    use sportz_test_support::{FailingMatchRepository, FixedClock, InMemoryMatchRepository};

    use super::{get_match_by_id, list_recent_matches};
    use crate::domain::validation::ListMatchesParams;

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
    }

    fn stored_match(id: i64, created_at: DateTime<Utc>, status: MatchStatus) -> Match {
        let start = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        Match {
            id,
            sport: "basketball".to_owned(),
            home_team: format!("Home {id}"),
            away_team: format!("Away {id}"),
            status,
            start_time: start,
            end_time: Some(start + Duration::hours(2)),
            home_score: 0,
            away_score: 0,
            created_at,
        }
    }

    fn limit(raw: &str) -> ListMatchesParams {
        ListMatchesParams {
            limit: Some(raw.to_owned()),
        }
    }

    #[tokio::test]
    async fn test_list_defaults_to_fifty_newest_first() {
        // Arrange
        let rows = (1..=60)
            .map(|id| stored_match(id, epoch() + Duration::seconds(id), MatchStatus::Scheduled))
            .collect();
        let repo = InMemoryMatchRepository::with_rows(epoch(), rows);

        // Act
        let listed = list_recent_matches(&ListMatchesParams::default(), &repo)
            .await
            .unwrap();

        // Assert
        assert_eq!(listed.len(), 50);
        assert_eq!(listed[0].id, 60);
        assert_eq!(listed[49].id, 11);
        assert_eq!(repo.select_limits(), vec![50]);
    }

    #[tokio::test]
    async fn test_list_breaks_created_at_ties_by_descending_id() {
        let rows = vec![
            stored_match(1, epoch(), MatchStatus::Scheduled),
            stored_match(2, epoch(), MatchStatus::Scheduled),
            stored_match(3, epoch() - Duration::seconds(1), MatchStatus::Scheduled),
        ];
        let repo = InMemoryMatchRepository::with_rows(epoch(), rows);

        let listed = list_recent_matches(&limit("10"), &repo).await.unwrap();

        let ids: Vec<i64> = listed.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[tokio::test]
    async fn test_list_does_not_sync_stale_statuses() {
        let repo = InMemoryMatchRepository::with_rows(
            epoch(),
            vec![stored_match(1, epoch(), MatchStatus::Scheduled)],
        );

        let listed = list_recent_matches(&limit("1"), &repo).await.unwrap();

        assert_eq!(listed[0].status, MatchStatus::Scheduled);
        assert!(repo.updates().is_empty());
    }

    #[tokio::test]
    async fn test_list_rejects_limit_above_cap_before_store_access() {
        let repo = InMemoryMatchRepository::new(epoch());

        let result = list_recent_matches(&limit("500"), &repo).await;

        match result {
            Err(DomainError::Validation(issues)) => assert_eq!(issues[0].field(), Some("limit")),
            other => panic!("expected Validation, got {other:?}"),
        }
        assert!(repo.select_limits().is_empty());
    }

    #[tokio::test]
    async fn test_list_surfaces_store_failure() {
        let result = list_recent_matches(&ListMatchesParams::default(), &FailingMatchRepository).await;

        assert!(matches!(result, Err(DomainError::Store(_))));
    }

    #[tokio::test]
    async fn test_get_syncs_and_persists_changed_status_once() {
        // Arrange
        let repo = InMemoryMatchRepository::with_rows(
            epoch(),
            vec![stored_match(5, epoch(), MatchStatus::Scheduled)],
        );
        let clock = FixedClock(Utc.with_ymd_and_hms(2030, 1, 1, 4, 0, 0).unwrap());

        // Act
        let first = get_match_by_id("5", &clock, &repo).await.unwrap();
        let second = get_match_by_id("5", &clock, &repo).await.unwrap();

        // Assert
        assert_eq!(first.status, MatchStatus::Finished);
        assert_eq!(second.status, MatchStatus::Finished);
        assert_eq!(
            repo.updates(),
            vec![(5, MatchUpdate::status(MatchStatus::Finished))]
        );
    }

    #[tokio::test]
    async fn test_get_missing_match_is_not_found() {
        let repo = InMemoryMatchRepository::new(epoch());
        let clock = FixedClock(epoch());

        let result = get_match_by_id("3", &clock, &repo).await;

        assert!(matches!(result, Err(DomainError::MatchNotFound(3))));
    }

    #[tokio::test]
    async fn test_get_with_corrupt_window_surfaces_invalid_time_window() {
        let mut corrupt = stored_match(8, epoch(), MatchStatus::Live);
        corrupt.end_time = None;
        let repo = InMemoryMatchRepository::with_rows(epoch(), vec![corrupt]);
        let clock = FixedClock(epoch());

        let result = get_match_by_id("8", &clock, &repo).await;

        assert!(matches!(result, Err(DomainError::InvalidTimeWindow(_))));
        assert!(repo.updates().is_empty());
    }
}
