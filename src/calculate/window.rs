//! Window selection and per-window aggregates.

use super::{average, percentage, round1, round2, AnalysisError};
use crate::models::{
    MatchOrder, MatchRecord, Perspective, SideCounts, StatFamily, TeamId, WindowAggregate,
};

/// What to aggregate over a window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub size: usize,
    pub family: StatFamily,
    pub perspective: Perspective,
    /// When set, "for" follows this team regardless of venue
    pub focus_team: Option<TeamId>,
}

impl WindowSpec {
    pub fn new(size: usize, family: StatFamily, perspective: Perspective) -> Self {
        Self {
            size,
            family,
            perspective,
            focus_team: None,
        }
    }

    /// Builder method to follow one team.
    pub fn with_focus_team(mut self, team: TeamId) -> Self {
        self.focus_team = Some(team);
        self
    }

    /// Window label, e.g. "last5".
    pub fn label(&self) -> String {
        window_label(self.size)
    }
}

pub fn window_label(size: usize) -> String {
    format!("last{}", size)
}

/// Check that kickoff times never contradict the declared order.
///
/// Equal kickoffs are allowed. Matches are never re-sorted.
pub fn validate_order(matches: &[MatchRecord], order: MatchOrder) -> Result<(), AnalysisError> {
    for (index, pair) in matches.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        let ok = match order {
            MatchOrder::MostRecentFirst => next.kickoff_time <= prev.kickoff_time,
            MatchOrder::OldestFirst => next.kickoff_time >= prev.kickoff_time,
        };
        if !ok {
            return Err(AnalysisError::InconsistentOrder { index: index + 1 });
        }
    }
    Ok(())
}

/// The most recent `size` matches, or all of them if fewer exist.
pub fn select_window(
    matches: &[MatchRecord],
    size: usize,
    order: MatchOrder,
) -> Result<&[MatchRecord], AnalysisError> {
    if size == 0 {
        return Err(AnalysisError::InvalidWindowSize(size));
    }
    let n = size.min(matches.len());
    Ok(match order {
        MatchOrder::MostRecentFirst => &matches[..n],
        MatchOrder::OldestFirst => &matches[matches.len() - n..],
    })
}

/// Select a window and aggregate it.
pub fn aggregate(
    matches: &[MatchRecord],
    order: MatchOrder,
    spec: &WindowSpec,
) -> Result<WindowAggregate, AnalysisError> {
    let window = select_window(matches, spec.size, order)?;
    Ok(aggregate_window(window, spec))
}

/// Aggregate an already selected window.
///
/// Matches without the family are left out of the family averages; matches
/// without both half splits are left out of the half averages. Each average
/// divides by the number of matches that actually contributed.
pub fn aggregate_window(window: &[MatchRecord], spec: &WindowSpec) -> WindowAggregate {
    let mut family_matches = 0usize;
    let mut total_sum = 0u64;

    let mut side_matches = 0usize;
    let mut for_sum = 0u64;
    let mut against_sum = 0u64;

    let mut half_split_matches = 0usize;
    let mut first_half_sum = 0u64;
    let mut second_half_sum = 0u64;

    for m in window {
        if let Some(counts) = m.family_counts(spec.family) {
            family_matches += 1;
            total_sum += counts.total();

            if let Some((f, a)) = for_against(m, counts, spec) {
                side_matches += 1;
                for_sum += f as u64;
                against_sum += a as u64;
            }
        }

        if let Some((first, second)) = m.family_halves(spec.family) {
            half_split_matches += 1;
            first_half_sum += first.total();
            second_half_sum += second.total();
        }
    }

    let goals: u64 = window.iter().map(|m| m.result.total_goals()).sum();
    let btts_matches = window.iter().filter(|m| m.btts()).count();

    WindowAggregate {
        label: spec.label(),
        requested_size: spec.size,
        total_matches: window.len(),
        family: spec.family,
        perspective: spec.perspective,
        family_matches,
        average_total: round2(average(total_sum as f64, family_matches)),
        average_for: round2(average(for_sum as f64, side_matches)),
        average_against: round2(average(against_sum as f64, side_matches)),
        half_split_matches,
        first_half_average: round2(average(first_half_sum as f64, half_split_matches)),
        second_half_average: round2(average(second_half_sum as f64, half_split_matches)),
        average_goals: round2(average(goals as f64, window.len())),
        btts_matches,
        btts_percentage: round1(percentage(btts_matches as f64, window.len() as f64)),
    }
}

/// The (for, against) columns of one match. `None` when a focus team is set
/// and did not play.
fn for_against(m: &MatchRecord, counts: SideCounts, spec: &WindowSpec) -> Option<(u32, u32)> {
    if let Some(team) = &spec.focus_team {
        return if &m.home_team_id == team {
            Some((counts.home, counts.away))
        } else if &m.away_team_id == team {
            Some((counts.away, counts.home))
        } else {
            None
        };
    }

    match spec.perspective {
        Perspective::Home | Perspective::Overall => Some((counts.home, counts.away)),
        Perspective::Away => Some((counts.away, counts.home)),
    }
}
