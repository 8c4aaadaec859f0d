use std::cmp::Reverse;

use serde::Serialize;

use crate::dataset::Match;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadToHead {
    pub team_a: String,
    pub team_b: String,
    /// Games between the two teams, most recent first.
    pub matches: Vec<Match>,
    pub wins_a: usize,
    pub wins_b: usize,
}

impl HeadToHead {
    /// Games won by neither side (ties, no result, abandoned).
    pub fn undecided(&self) -> usize {
        self.matches
            .iter()
            .filter(|m| !m.won_by(&self.team_a) && !m.won_by(&self.team_b))
            .count()
    }
}

/// Every game between `team_a` and `team_b` regardless of which side was listed
/// first, with a win count for each. An empty history is a valid result.
pub fn compute_h2h(matches: &[Match], team_a: &str, team_b: &str) -> HeadToHead {
    let mut between: Vec<Match> = matches
        .iter()
        .filter(|m| m.is_between(team_a, team_b))
        .cloned()
        .collect();

    let wins_a = between.iter().filter(|m| m.won_by(team_a)).count();
    let wins_b = between.iter().filter(|m| m.won_by(team_b)).count();

    // Unparseable dates sort last; equal dates keep table order.
    between.sort_by_cached_key(|m| Reverse((m.played_on(), m.date.clone())));

    HeadToHead {
        team_a: team_a.to_string(),
        team_b: team_b.to_string(),
        matches: between,
        wins_a,
        wins_b,
    }
}
