//! Provider rows to canonical match records.
//!
//! Upstream payloads spell the same field several ways (`homeID`, `home_id`,
//! `team_a_id`, ...) and use negative sentinels for "not recorded". All of
//! that is absorbed here so the calculators only ever see `MatchRecord`.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{CornerStats, MatchRecord, MatchResult, SideCounts, SourceId};

/// Errors that make a provider row unusable.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid kickoff timestamp: {0}")]
    InvalidKickoff(i64),

    #[error("Provider row is not a JSON object")]
    NotAnObject,

    #[error("Malformed provider row: {0}")]
    Json(#[from] serde_json::Error),
}

/// An id that may arrive as a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(u64),
    Text(String),
}

impl From<RawId> for SourceId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => SourceId::from(n),
            RawId::Text(s) => SourceId::from(s.trim()),
        }
    }
}

/// Accepted spellings per canonical field, most preferred first.
const FIELD_SPELLINGS: &[(&str, &[&str])] = &[
    ("id", &["id", "matchId", "match_id"]),
    ("date_unix", &["date_unix", "dateUnix", "kickoff_unix", "timestamp"]),
    ("kickoff_time", &["kickoff_time", "kickoffTime", "kickoff", "date"]),
    ("home_id", &["home_id", "homeID", "homeId", "team_a_id"]),
    ("away_id", &["away_id", "awayID", "awayId", "team_b_id"]),
    ("home_goals", &["home_goals", "homeGoalCount", "home_score", "team_a_goals"]),
    ("away_goals", &["away_goals", "awayGoalCount", "away_score", "team_b_goals"]),
    ("home_corners", &["home_corners", "team_a_corners", "homeCorners"]),
    ("away_corners", &["away_corners", "team_b_corners", "awayCorners"]),
    ("total_corners", &["total_corners", "totalCornerCount", "corners_total"]),
    ("home_corners_first_half", &["home_corners_first_half", "team_a_fh_corners"]),
    ("away_corners_first_half", &["away_corners_first_half", "team_b_fh_corners"]),
    ("home_corners_second_half", &["home_corners_second_half", "team_a_2h_corners"]),
    ("away_corners_second_half", &["away_corners_second_half", "team_b_2h_corners"]),
    ("home_cards", &["home_cards", "team_a_cards_num", "homeCards"]),
    ("away_cards", &["away_cards", "team_b_cards_num", "awayCards"]),
    ("total_cards", &["total_cards", "totalCardCount", "cards_total"]),
];

/// One fixture under canonical field names. Every field is optional; the
/// normalizer decides what is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderMatch {
    #[serde(default)]
    pub id: Option<RawId>,

    /// Seconds since the Unix epoch
    #[serde(default)]
    pub date_unix: Option<i64>,

    #[serde(default)]
    pub kickoff_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub home_id: Option<RawId>,

    #[serde(default)]
    pub away_id: Option<RawId>,

    #[serde(default)]
    pub home_goals: Option<i64>,

    #[serde(default)]
    pub away_goals: Option<i64>,

    #[serde(default)]
    pub home_corners: Option<i64>,

    #[serde(default)]
    pub away_corners: Option<i64>,

    #[serde(default)]
    pub total_corners: Option<i64>,

    #[serde(default)]
    pub home_corners_first_half: Option<i64>,

    #[serde(default)]
    pub away_corners_first_half: Option<i64>,

    #[serde(default)]
    pub home_corners_second_half: Option<i64>,

    #[serde(default)]
    pub away_corners_second_half: Option<i64>,

    #[serde(default)]
    pub home_cards: Option<i64>,

    #[serde(default)]
    pub away_cards: Option<i64>,

    #[serde(default)]
    pub total_cards: Option<i64>,
}

impl ProviderMatch {
    /// Resolve a raw provider row onto canonical field names.
    ///
    /// A row may carry several spellings of one field; the first non-null
    /// one in `FIELD_SPELLINGS` order wins. Unknown fields are ignored.
    pub fn from_value(value: Value) -> Result<Self, NormalizeError> {
        let Value::Object(mut fields) = value else {
            return Err(NormalizeError::NotAnObject);
        };

        let mut canonical = Map::new();
        for (name, spellings) in FIELD_SPELLINGS {
            let resolved = spellings
                .iter()
                .find_map(|s| fields.remove(*s).filter(|v| !v.is_null()));
            if let Some(v) = resolved {
                canonical.insert((*name).to_string(), v);
            }
        }

        Ok(serde_json::from_value(Value::Object(canonical))?)
    }
}

/// A provider count, or `None` for absent and negative sentinels.
fn known(value: Option<i64>) -> Option<u32> {
    value.and_then(|v| u32::try_from(v).ok())
}

fn side_counts(home: Option<i64>, away: Option<i64>, total: Option<i64>) -> Option<SideCounts> {
    let (home, away) = (known(home)?, known(away)?);
    Some(match known(total) {
        Some(total) => SideCounts::with_total(home, away, total),
        None => SideCounts::new(home, away),
    })
}

/// Map a provider row onto a `MatchRecord`.
///
/// Identity, kickoff and score are required. Corners and cards are kept only
/// when both sides were recorded; half splits only when all four are.
pub fn normalize_match(row: ProviderMatch) -> Result<MatchRecord, NormalizeError> {
    let match_id: SourceId = row.id.ok_or(NormalizeError::MissingField("match id"))?.into();
    let home_team_id: SourceId = row
        .home_id
        .ok_or(NormalizeError::MissingField("home team id"))?
        .into();
    let away_team_id: SourceId = row
        .away_id
        .ok_or(NormalizeError::MissingField("away team id"))?
        .into();

    let kickoff_time = match (row.kickoff_time, row.date_unix) {
        (Some(time), _) => time,
        (None, Some(secs)) => Utc
            .timestamp_opt(secs, 0)
            .single()
            .ok_or(NormalizeError::InvalidKickoff(secs))?,
        (None, None) => return Err(NormalizeError::MissingField("kickoff time")),
    };

    let result = MatchResult::new(
        known(row.home_goals).ok_or(NormalizeError::MissingField("home score"))?,
        known(row.away_goals).ok_or(NormalizeError::MissingField("away score"))?,
    );

    let mut record = MatchRecord::new(match_id, kickoff_time, home_team_id, away_team_id, result);

    if let Some(full_time) = side_counts(row.home_corners, row.away_corners, row.total_corners) {
        let mut corners = CornerStats::new(full_time);
        let first = side_counts(row.home_corners_first_half, row.away_corners_first_half, None);
        let second = side_counts(row.home_corners_second_half, row.away_corners_second_half, None);
        if let (Some(first), Some(second)) = (first, second) {
            corners = corners.with_halves(first, second);
        }
        record = record.with_corners(corners);
    }

    if let Some(cards) = side_counts(row.home_cards, row.away_cards, row.total_cards) {
        record = record.with_cards(cards);
    }

    Ok(record)
}

/// Normalize a raw JSON value.
pub fn normalize_value(value: Value) -> Result<MatchRecord, NormalizeError> {
    normalize_match(ProviderMatch::from_value(value)?)
}
