//! Reconciles a match's persisted status with its time-derived status.

use std::future::Future;

use sportz_core::clock::Clock;
use sportz_core::error::DomainError;
use sportz_core::records::{Match, MatchStatus};
use tracing::debug;

use crate::domain::status::derive_match_status;

/// Recomputes `record`'s status from its window at `clock.now()` and, only
/// when it differs from the stored status, awaits `update(id, new_status)`
/// before mutating the in-memory copy. Returns the resulting status.
///
/// Calling this twice without the clock advancing performs at most one
/// update. A stored `Finished` status is terminal and is never rewritten,
/// even when the clock reads earlier than the window end.
///
/// Not atomic with respect to the store: the read, the decision and the
/// write are separate steps, so two concurrent syncs of the same match may
/// both issue the update. Both write the same value, which is a function of
/// the window and the current time only.
///
/// # Errors
///
/// Returns `DomainError::InvalidTimeWindow` if the stored window cannot be
/// evaluated; `update` is not invoked in that case. Errors from `update`
/// are returned unchanged and leave `record` untouched.
pub async fn sync_match_status<F, Fut>(
    record: &mut Match,
    clock: &dyn Clock,
    update: F,
) -> Result<MatchStatus, DomainError>
where
    F: FnOnce(i64, MatchStatus) -> Fut,
    Fut: Future<Output = Result<(), DomainError>>,
{
    let next_status = derive_match_status(record, clock.now())?;

    if record.status == MatchStatus::Finished {
        return Ok(record.status);
    }

    if record.status != next_status {
        debug!(
            match_id = record.id,
            from = %record.status,
            to = %next_status,
            "syncing match status"
        );
        update(record.id, next_status).await?;
        record.status = next_status;
    }

    Ok(record.status)
}
