//! Normalized historical fixture model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MatchId, StatFamily, TeamId};

/// Final score of a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MatchResult {
    pub home_score: u32,
    pub away_score: u32,
}

impl MatchResult {
    pub fn new(home_score: u32, away_score: u32) -> Self {
        Self {
            home_score,
            away_score,
        }
    }

    /// Goals scored by both sides.
    pub fn total_goals(&self) -> u64 {
        u64::from(self.home_score) + u64::from(self.away_score)
    }

    /// Both teams to score.
    pub fn btts(&self) -> bool {
        self.home_score > 0 && self.away_score > 0
    }
}

/// A home/away split of one counted statistic.
///
/// `total` is kept as reported by the source. When it is absent it is derived
/// from `home + away`; a reported total that disagrees with the sides is
/// trusted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideCounts {
    pub home: u32,
    pub away: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
}

impl SideCounts {
    /// Counts with the total derived from both sides.
    pub fn new(home: u32, away: u32) -> Self {
        Self {
            home,
            away,
            total: None,
        }
    }

    /// Counts with a source-reported total.
    pub fn with_total(home: u32, away: u32, total: u32) -> Self {
        Self {
            home,
            away,
            total: Some(total),
        }
    }

    /// Reported total, or `home + away` when the source gave none.
    pub fn total(&self) -> u64 {
        self.total
            .map_or(u64::from(self.home) + u64::from(self.away), u64::from)
    }
}

/// Corner counts, optionally split by half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CornerStats {
    #[serde(flatten)]
    pub full_time: SideCounts,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_half: Option<SideCounts>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_half: Option<SideCounts>,
}

impl CornerStats {
    pub fn new(full_time: SideCounts) -> Self {
        Self {
            full_time,
            first_half: None,
            second_half: None,
        }
    }

    /// Builder method to attach half-time splits.
    pub fn with_halves(mut self, first_half: SideCounts, second_half: SideCounts) -> Self {
        self.first_half = Some(first_half);
        self.second_half = Some(second_half);
        self
    }

    /// Both halves, only when the source reported both.
    pub fn halves(&self) -> Option<(SideCounts, SideCounts)> {
        match (self.first_half, self.second_half) {
            (Some(first), Some(second)) => Some((first, second)),
            _ => None,
        }
    }
}

/// Per-family statistics of a fixture. Absence means unknown, never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MatchStatistics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corners: Option<CornerStats>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cards: Option<SideCounts>,
}

/// One historical fixture, already normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: MatchId,

    /// Kickoff, used only to check the caller's declared ordering
    pub kickoff_time: DateTime<Utc>,

    pub home_team_id: TeamId,

    pub away_team_id: TeamId,

    pub result: MatchResult,

    #[serde(default)]
    pub statistics: MatchStatistics,
}

impl MatchRecord {
    /// Create a record with no per-family statistics.
    pub fn new(
        match_id: MatchId,
        kickoff_time: DateTime<Utc>,
        home_team_id: TeamId,
        away_team_id: TeamId,
        result: MatchResult,
    ) -> Self {
        Self {
            match_id,
            kickoff_time,
            home_team_id,
            away_team_id,
            result,
            statistics: MatchStatistics::default(),
        }
    }

    /// Builder method to set corner counts.
    pub fn with_corners(mut self, corners: CornerStats) -> Self {
        self.statistics.corners = Some(corners);
        self
    }

    /// Builder method to set card counts.
    pub fn with_cards(mut self, cards: SideCounts) -> Self {
        self.statistics.cards = Some(cards);
        self
    }

    /// Full-time counts for a family, if the source reported them.
    pub fn family_counts(&self, family: StatFamily) -> Option<SideCounts> {
        match family {
            StatFamily::Corners => self.statistics.corners.map(|c| c.full_time),
            StatFamily::Cards => self.statistics.cards,
        }
    }

    /// Half-time splits for a family. Cards are never split by half.
    pub fn family_halves(&self, family: StatFamily) -> Option<(SideCounts, SideCounts)> {
        match family {
            StatFamily::Corners => self.statistics.corners.and_then(|c| c.halves()),
            StatFamily::Cards => None,
        }
    }

    /// Both teams to score.
    pub fn btts(&self) -> bool {
        self.result.btts()
    }

    /// True if both team ids are present.
    pub fn has_team_identity(&self) -> bool {
        !self.home_team_id.is_blank() && !self.away_team_id.is_blank()
    }
}
