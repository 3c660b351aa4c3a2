//! Status derivation from a match window.

use chrono::{DateTime, Utc};
use sportz_core::error::DomainError;
use sportz_core::records::{Match, MatchStatus};

use super::timestamp::parse_timestamp;

/// Derives the lifecycle status of a match window at `now`.
///
/// `now < start` is `Scheduled`, `start <= now <= end` is `Live` (inclusive
/// at both ends), and `now > end` is `Finished`.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimeWindow` if `end_time` is missing.
pub fn derive_status(
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<MatchStatus, DomainError> {
    let end_time = end_time
        .ok_or_else(|| DomainError::InvalidTimeWindow("end time is missing".to_owned()))?;

    let status = if now < start_time {
        MatchStatus::Scheduled
    } else if now <= end_time {
        MatchStatus::Live
    } else {
        MatchStatus::Finished
    };
    Ok(status)
}

/// Derives the status of a window given as raw timestamp strings.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimeWindow` if either string fails to parse,
/// regardless of `now`.
pub fn derive_status_from_strs(
    start_time: &str,
    end_time: &str,
    now: DateTime<Utc>,
) -> Result<MatchStatus, DomainError> {
    let start = parse_timestamp(start_time).ok_or_else(|| {
        DomainError::InvalidTimeWindow(format!("unparseable start time: {start_time:?}"))
    })?;
    let end = parse_timestamp(end_time).ok_or_else(|| {
        DomainError::InvalidTimeWindow(format!("unparseable end time: {end_time:?}"))
    })?;
    derive_status(start, Some(end), now)
}

/// Derives the status of a stored match from its own window.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimeWindow` if the stored window is
/// incomplete.
pub fn derive_match_status(
    record: &Match,
    now: DateTime<Utc>,
) -> Result<MatchStatus, DomainError> {
    derive_status(record.start_time, record.end_time, now).map_err(|err| match err {
        DomainError::InvalidTimeWindow(reason) => {
            DomainError::InvalidTimeWindow(format!("match {}: {reason}", record.id))
        }
        other => other,
    })
}
