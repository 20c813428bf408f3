//! Data quality classification models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Coarse trust level of sample-based statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Full,
    Partial,
    Limited,
    Minimal,
}

impl QualityTier {
    /// Tier from the number of missing availability flags.
    pub fn from_issue_count(issue_count: usize) -> Self {
        if issue_count >= 4 {
            QualityTier::Minimal
        } else if issue_count == 3 {
            QualityTier::Limited
        } else if issue_count == 2 {
            QualityTier::Partial
        } else {
            QualityTier::Full
        }
    }

    /// Returns true if sample statistics should be backed by a model estimate.
    pub fn needs_estimate(&self) -> bool {
        matches!(self, QualityTier::Limited | QualityTier::Minimal)
    }
}

impl std::fmt::Display for QualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QualityTier::Full => write!(f, "full"),
            QualityTier::Partial => write!(f, "partial"),
            QualityTier::Limited => write!(f, "limited"),
            QualityTier::Minimal => write!(f, "minimal"),
        }
    }
}

impl std::str::FromStr for QualityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(QualityTier::Full),
            "partial" => Ok(QualityTier::Partial),
            "limited" => Ok(QualityTier::Limited),
            "minimal" => Ok(QualityTier::Minimal),
            other => Err(format!("unknown quality tier: {}", other)),
        }
    }
}

/// Competition profile inferred from a league name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeagueHint {
    ReserveYouth,
    Womens,
    LowerDivision,
}

impl LeagueHint {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            LeagueHint::ReserveYouth => "Reserve/Youth",
            LeagueHint::Womens => "Women's",
            LeagueHint::LowerDivision => "Lower Division",
        }
    }
}

impl std::fmt::Display for LeagueHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A field whose presence decides the quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DataField {
    #[serde(rename = "Cards")]
    Cards,
    #[serde(rename = "Corners")]
    Corners,
    #[serde(rename = "Players")]
    Players,
    #[serde(rename = "Head-to-Head")]
    HeadToHead,
    #[serde(rename = "BTTS")]
    Btts,
    #[serde(rename = "Match Details")]
    MatchDetails,
}

impl DataField {
    pub fn label(&self) -> &'static str {
        match self {
            DataField::Cards => "Cards",
            DataField::Corners => "Corners",
            DataField::Players => "Players",
            DataField::HeadToHead => "Head-to-Head",
            DataField::Btts => "BTTS",
            DataField::MatchDetails => "Match Details",
        }
    }
}

impl std::fmt::Display for DataField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What the caller knows is available. `None` counts as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataAvailability {
    #[serde(default)]
    pub cards: Option<bool>,
    #[serde(default)]
    pub corners: Option<bool>,
    #[serde(default)]
    pub players: Option<bool>,
    #[serde(default)]
    pub h2h: Option<bool>,
    #[serde(default)]
    pub btts: Option<bool>,

    /// Basic team identity is present
    #[serde(default)]
    pub match_details: Option<bool>,

    #[serde(default)]
    pub league_name: Option<String>,
}

impl DataAvailability {
    /// Everything available.
    pub fn all() -> Self {
        Self {
            cards: Some(true),
            corners: Some(true),
            players: Some(true),
            h2h: Some(true),
            btts: Some(true),
            match_details: Some(true),
            league_name: None,
        }
    }

    /// Builder method to set the league name.
    pub fn with_league_name(mut self, name: impl Into<String>) -> Self {
        self.league_name = Some(name.into());
        self
    }

    /// The five flags that count towards the tier, paired with their field.
    pub fn scored_flags(&self) -> [(DataField, bool); 5] {
        [
            (DataField::Cards, self.cards.unwrap_or(false)),
            (DataField::Corners, self.corners.unwrap_or(false)),
            (DataField::Players, self.players.unwrap_or(false)),
            (DataField::HeadToHead, self.h2h.unwrap_or(false)),
            (DataField::Btts, self.btts.unwrap_or(false)),
        ]
    }
}

/// Outcome of data quality classification. Built fresh per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQualityIndicator {
    pub quality_tier: QualityTier,
    pub issue_count: usize,
    pub available_fields: BTreeSet<DataField>,
    pub missing_fields: BTreeSet<DataField>,
    pub league_hints: BTreeSet<LeagueHint>,
}

impl DataQualityIndicator {
    pub fn is_available(&self, field: DataField) -> bool {
        self.available_fields.contains(&field)
    }

    pub fn has_hint(&self, hint: LeagueHint) -> bool {
        self.league_hints.contains(&hint)
    }
}
