//! Home/away advantage, half-time distribution and venue effect.

use super::{average, percentage, round1, round2};
use crate::models::{
    HalfDistribution, HalfPattern, HomeAwayAdvantage, MatchRecord, StatFamily, TeamId,
    VenueEffect,
};

/// Advantage above which the home column is considered ahead.
const ADVANTAGE_CUTOFF: f64 = 0.5;

/// Advantage above which the home column dominates.
const DOMINANCE_CUTOFF: f64 = 1.0;

/// Share (percent) above which one half counts as heavy.
const HEAVY_HALF_SHARE: f64 = 60.0;

impl HomeAwayAdvantage {
    /// Build from the two column averages.
    ///
    /// Averages and advantage are rounded to two decimals before the cutoffs
    /// are applied, so the flags agree with the printed figures.
    pub fn from_averages(average_home: f64, average_away: f64) -> Self {
        let average_home = round2(average_home);
        let average_away = round2(average_away);
        let advantage = round2(average_home - average_away);

        Self {
            average_home,
            average_away,
            advantage,
            has_advantage: advantage > ADVANTAGE_CUTOFF,
            home_team_dominates: advantage > DOMINANCE_CUTOFF,
        }
    }
}

/// Home column against away column for every match that carries the family.
pub fn home_away_advantage(window: &[MatchRecord], family: StatFamily) -> HomeAwayAdvantage {
    let mut n = 0usize;
    let mut home = 0u64;
    let mut away = 0u64;

    for counts in window.iter().filter_map(|m| m.family_counts(family)) {
        n += 1;
        home += counts.home as u64;
        away += counts.away as u64;
    }

    HomeAwayAdvantage::from_averages(average(home as f64, n), average(away as f64, n))
}

/// Classify from first/second half shares in percent.
pub fn classify_half_pattern(first_half_share: f64, second_half_share: f64) -> HalfPattern {
    if first_half_share > HEAVY_HALF_SHARE {
        HalfPattern::FirstHalfHeavy
    } else if second_half_share > HEAVY_HALF_SHARE {
        HalfPattern::SecondHalfHeavy
    } else {
        HalfPattern::Balanced
    }
}

/// Share of the family falling in each half, over matches with both splits.
///
/// With no split data the result is all zeros and `Balanced`.
pub fn half_distribution(window: &[MatchRecord], family: StatFamily) -> HalfDistribution {
    let mut n = 0usize;
    let mut first = 0u64;
    let mut second = 0u64;

    for (f, s) in window.iter().filter_map(|m| m.family_halves(family)) {
        n += 1;
        first += f.total();
        second += s.total();
    }

    if n == 0 {
        return HalfDistribution::default();
    }

    let combined = (first + second) as f64;
    let first_share = percentage(first as f64, combined);
    let second_share = percentage(second as f64, combined);

    HalfDistribution {
        half_split_matches: n,
        first_half_average: round2(average(first as f64, n)),
        second_half_average: round2(average(second as f64, n)),
        first_half_percentage: round1(first_share),
        second_half_percentage: round1(second_share),
        pattern: classify_half_pattern(first_share, second_share),
    }
}

/// A team's own family column at home against away from home.
pub fn venue_effect(window: &[MatchRecord], family: StatFamily, team: &TeamId) -> VenueEffect {
    let mut home_matches = 0usize;
    let mut away_matches = 0usize;
    let mut at_home = 0u64;
    let mut on_road = 0u64;

    for m in window {
        let Some(counts) = m.family_counts(family) else {
            continue;
        };
        if &m.home_team_id == team {
            home_matches += 1;
            at_home += counts.home as u64;
        } else if &m.away_team_id == team {
            away_matches += 1;
            on_road += counts.away as u64;
        }
    }

    let average_at_home = round2(average(at_home as f64, home_matches));
    let average_away_from_home = round2(average(on_road as f64, away_matches));

    VenueEffect {
        home_matches,
        away_matches,
        average_at_home,
        average_away_from_home,
        venue_effect: round2(average_at_home - average_away_from_home),
    }
}
