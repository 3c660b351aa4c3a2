//! Validation of untrusted match input.
//!
//! Every validator inspects the whole input and reports all issues it finds,
//! each tagged with the offending field path. Numeric fields are coerced from
//! numeric strings as well as JSON numbers.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use sportz_core::error::{IssueCode, ValidationIssue};
use sportz_core::records::{MatchStatus, NewMatch};

use super::timestamp::parse_timestamp;

/// Number of matches listed when the caller gives no limit.
pub const DEFAULT_LIST_LIMIT: u32 = 50;

/// Upper bound on the number of matches returned by a single listing.
pub const MAX_LIST_LIMIT: u32 = 100;

/// Raw query parameters for a match listing, as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMatchesParams {
    /// Requested page size.
    pub limit: Option<String>,
}

/// Validated listing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMatchesQuery {
    /// Requested page size in `1..=MAX_LIST_LIMIT`; `None` means the default.
    pub limit: Option<u32>,
}

impl ListMatchesQuery {
    /// The limit to pass to the store.
    #[must_use]
    pub fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIST_LIMIT).min(MAX_LIST_LIMIT)
    }
}

/// Validated input for creating a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMatchInput {
    pub sport: String,
    pub home_team: String,
    pub away_team: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

impl CreateMatchInput {
    /// Builds the insertable record, defaulting absent scores to zero.
    #[must_use]
    pub fn into_new_match(self, status: MatchStatus) -> NewMatch {
        NewMatch {
            sport: self.sport,
            home_team: self.home_team,
            away_team: self.away_team,
            status,
            start_time: self.start_time,
            end_time: self.end_time,
            home_score: self.home_score.unwrap_or(0),
            away_score: self.away_score.unwrap_or(0),
        }
    }
}

/// Validated score replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreUpdate {
    pub home_score: i32,
    pub away_score: i32,
}

/// Validates the query of a match listing.
///
/// # Errors
///
/// Returns the issues found if `limit` is present but not an integer in
/// `1..=100`.
pub fn validate_list_query(
    params: &ListMatchesParams,
) -> Result<ListMatchesQuery, Vec<ValidationIssue>> {
    let Some(raw) = params.limit.as_deref() else {
        return Ok(ListMatchesQuery { limit: None });
    };

    let limit = coerce_integer(
        "limit",
        &Value::String(raw.to_owned()),
        1,
        i64::from(MAX_LIST_LIMIT),
    )
    .map_err(|issue| vec![issue])?;

    // In range 1..=100 by construction.
    let limit = u32::try_from(limit).unwrap_or(MAX_LIST_LIMIT);
    Ok(ListMatchesQuery { limit: Some(limit) })
}

/// Validates a match identifier taken from a request path.
///
/// # Errors
///
/// Returns an issue on `id` unless it is a positive integer.
pub fn validate_match_id(raw: &str) -> Result<i64, Vec<ValidationIssue>> {
    coerce_integer("id", &Value::String(raw.to_owned()), 1, i64::MAX).map_err(|issue| vec![issue])
}

/// Validates the body of a match creation request.
///
/// # Errors
///
/// Returns every issue found: missing or blank team and sport names,
/// unparseable timestamps, a window whose end does not follow its start
/// (reported on `endTime`), and out-of-range scores.
pub fn validate_create_match(body: &Value) -> Result<CreateMatchInput, Vec<ValidationIssue>> {
    let object = expect_object(body)?;
    let mut issues = Vec::new();

    let sport = required_text(object, "sport", "Sport cannot be empty", &mut issues);
    let home_team = required_text(object, "homeTeam", "Home team cannot be empty", &mut issues);
    let away_team = required_text(object, "awayTeam", "Away team cannot be empty", &mut issues);
    let start_time = required_timestamp(object, "startTime", &mut issues);
    let end_time = required_timestamp(object, "endTime", &mut issues);
    let home_score = optional_score(object, "homeScore", &mut issues);
    let away_score = optional_score(object, "awayScore", &mut issues);

    if let (Some(start), Some(end)) = (start_time, end_time) {
        if start >= end {
            issues.push(ValidationIssue::new(
                "endTime",
                IssueCode::Custom,
                "endTime must be chronologically after startTime",
            ));
        }
    }

    match (sport, home_team, away_team, start_time, end_time) {
        (Some(sport), Some(home_team), Some(away_team), Some(start_time), Some(end_time))
            if issues.is_empty() =>
        {
            Ok(CreateMatchInput {
                sport,
                home_team,
                away_team,
                start_time,
                end_time,
                home_score,
                away_score,
            })
        }
        _ => Err(issues),
    }
}

/// Validates the body of a score update. Both scores are required.
///
/// # Errors
///
/// Returns an issue for each score that is missing or not a non-negative
/// integer.
pub fn validate_update_score(body: &Value) -> Result<ScoreUpdate, Vec<ValidationIssue>> {
    let object = expect_object(body)?;
    let mut issues = Vec::new();

    let home_score = required_score(object, "homeScore", &mut issues);
    let away_score = required_score(object, "awayScore", &mut issues);

    match (home_score, away_score) {
        (Some(home_score), Some(away_score)) if issues.is_empty() => Ok(ScoreUpdate {
            home_score,
            away_score,
        }),
        _ => Err(issues),
    }
}

fn expect_object(body: &Value) -> Result<&Map<String, Value>, Vec<ValidationIssue>> {
    body.as_object().ok_or_else(|| {
        vec![ValidationIssue::root(
            IssueCode::InvalidType,
            format!("Expected object, received {}", type_name(body)),
        )]
    })
}

fn required_text(
    object: &Map<String, Value>,
    field: &str,
    empty_message: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<String> {
    match object.get(field) {
        None => {
            issues.push(required(field));
            None
        }
        Some(Value::String(text)) if text.trim().is_empty() => {
            issues.push(ValidationIssue::new(field, IssueCode::TooSmall, empty_message));
            None
        }
        Some(Value::String(text)) => Some(text.trim().to_owned()),
        Some(other) => {
            issues.push(wrong_type(field, "string", other));
            None
        }
    }
}

fn required_timestamp(
    object: &Map<String, Value>,
    field: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<DateTime<Utc>> {
    match object.get(field) {
        None => {
            issues.push(required(field));
            None
        }
        Some(Value::String(text)) => {
            let parsed = parse_timestamp(text);
            if parsed.is_none() {
                issues.push(ValidationIssue::new(
                    field,
                    IssueCode::InvalidDate,
                    format!("Invalid ISO date string for {field}"),
                ));
            }
            parsed
        }
        Some(other) => {
            issues.push(wrong_type(field, "string", other));
            None
        }
    }
}

fn optional_score(
    object: &Map<String, Value>,
    field: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<i32> {
    match object.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => score(field, value, issues),
    }
}

fn required_score(
    object: &Map<String, Value>,
    field: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<i32> {
    if let Some(value) = object.get(field) {
        score(field, value, issues)
    } else {
        issues.push(required(field));
        None
    }
}

fn score(field: &str, value: &Value, issues: &mut Vec<ValidationIssue>) -> Option<i32> {
    match coerce_integer(field, value, 0, i64::from(i32::MAX)) {
        // Bounded to the i32 range above.
        Ok(n) => i32::try_from(n).ok(),
        Err(issue) => {
            issues.push(issue);
            None
        }
    }
}

/// Coerces a JSON number or numeric string to an integer in `min..=max`.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn coerce_integer(field: &str, value: &Value, min: i64, max: i64) -> Result<i64, ValidationIssue> {
    let number = coerce_number(value).map_err(|received| {
        ValidationIssue::new(
            field,
            IssueCode::InvalidType,
            format!("Expected number, received {received}"),
        )
    })?;

    if !number.is_finite() || number.fract().abs() > 0.0 {
        return Err(ValidationIssue::new(
            field,
            IssueCode::InvalidType,
            "Expected integer, received float",
        ));
    }
    if number < min as f64 {
        let message = if min == 1 {
            "Number must be greater than 0".to_owned()
        } else {
            format!("Number must be greater than or equal to {min}")
        };
        return Err(ValidationIssue::new(field, IssueCode::TooSmall, message));
    }
    if number > max as f64 {
        return Err(ValidationIssue::new(
            field,
            IssueCode::TooBig,
            format!("Number must be less than or equal to {max}"),
        ));
    }
    Ok(number as i64)
}

/// Returns the numeric value, or the received type name on failure.
///
/// Numbers and numeric strings coerce; a blank string is zero. Booleans are
/// rejected as `boolean` rather than read as 0 or 1, so `true` is never a
/// score or a limit.
fn coerce_number(value: &Value) -> Result<f64, &'static str> {
    match value {
        Value::Number(n) => n.as_f64().ok_or("nan"),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(0.0);
            }
            match trimmed.parse::<f64>() {
                Ok(n) if !n.is_nan() => Ok(n),
                _ => Err("nan"),
            }
        }
        other => Err(type_name(other)),
    }
}

fn required(field: &str) -> ValidationIssue {
    ValidationIssue::new(field, IssueCode::InvalidType, "Required")
}

fn wrong_type(field: &str, expected: &str, received: &Value) -> ValidationIssue {
    ValidationIssue::new(
        field,
        IssueCode::InvalidType,
        format!("Expected {expected}, received {}", type_name(received)),
    )
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
