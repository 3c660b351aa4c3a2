//! Match and commentary records as exchanged with the store adapter.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a match, derived from its time window.
///
/// Transitions only move forward: `Scheduled → Live → Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    /// The window has not started yet.
    #[default]
    Scheduled,
    /// The current time lies inside the window.
    Live,
    /// The window has ended.
    Finished,
}

impl MatchStatus {
    /// Returns the persisted label for this status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Live => "live",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status label is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown match status: {0}")]
pub struct UnknownMatchStatus(pub String);

impl FromStr for MatchStatus {
    type Err = UnknownMatchStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "live" => Ok(Self::Live),
            "finished" => Ok(Self::Finished),
            other => Err(UnknownMatchStatus(other.to_owned())),
        }
    }
}

/// A persisted match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// Store-assigned identifier.
    pub id: i64,
    /// Sport being played.
    pub sport: String,
    /// Home team name.
    pub home_team: String,
    /// Away team name.
    pub away_team: String,
    /// Last persisted lifecycle status.
    pub status: MatchStatus,
    /// Start of the match window.
    pub start_time: DateTime<Utc>,
    /// End of the match window. Always set by the creation path.
    pub end_time: Option<DateTime<Utc>>,
    /// Home team score.
    pub home_score: i32,
    /// Away team score.
    pub away_score: i32,
    /// Store-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A validated match ready for insertion. The store assigns `id` and
/// `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMatch {
    pub sport: String,
    pub home_team: String,
    pub away_team: String,
    pub status: MatchStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub home_score: i32,
    pub away_score: i32,
}

/// Partial update of a stored match. `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchUpdate {
    pub status: Option<MatchStatus>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

impl MatchUpdate {
    /// An update that only changes the status.
    #[must_use]
    pub fn status(status: MatchStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// An update that replaces both scores.
    #[must_use]
    pub fn scores(home_score: i32, away_score: i32) -> Self {
        Self {
            status: None,
            home_score: Some(home_score),
            away_score: Some(away_score),
        }
    }

    /// Returns `true` if the update changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.home_score.is_none() && self.away_score.is_none()
    }

    /// Applies the update to an in-memory copy.
    pub fn apply_to(&self, record: &mut Match) {
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(home_score) = self.home_score {
            record.home_score = home_score;
        }
        if let Some(away_score) = self.away_score {
            record.away_score = away_score;
        }
    }
}

/// A persisted commentary entry belonging to a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commentary {
    /// Store-assigned identifier.
    pub id: i64,
    /// Owning match.
    pub match_id: i64,
    /// Match minute the event occurred in.
    pub minute: Option<i32>,
    /// Orders events sharing a minute, ascending.
    pub sequence: i32,
    /// Period label, e.g. "1st Half".
    pub period: Option<String>,
    /// Event kind, e.g. "goal" or "substitution".
    pub event_type: Option<String>,
    /// Player or official involved.
    pub actor: Option<String>,
    /// Team associated with the event.
    pub team: Option<String>,
    /// Commentary text.
    pub message: String,
    /// Caller-defined structured payload.
    pub metadata: Option<serde_json::Value>,
    /// Ordered labels.
    pub tags: Vec<String>,
    /// Store-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A commentary entry ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCommentary {
    pub match_id: i64,
    pub minute: Option<i32>,
    pub sequence: i32,
    pub period: Option<String>,
    pub event_type: Option<String>,
    pub actor: Option<String>,
    pub team: Option<String>,
    pub message: String,
    pub metadata: Option<serde_json::Value>,
    pub tags: Vec<String>,
}

impl NewCommentary {
    /// Creates an entry with only the required fields set.
    #[must_use]
    pub fn new(match_id: i64, sequence: i32, message: impl Into<String>) -> Self {
        Self {
            match_id,
            minute: None,
            sequence,
            period: None,
            event_type: None,
            actor: None,
            team: None,
            message: message.into(),
            metadata: None,
            tags: Vec::new(),
        }
    }
}
