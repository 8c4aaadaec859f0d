use std::collections::{BTreeMap, HashSet};

use rayon::prelude::*;
use serde::Serialize;

use crate::dataset::Delivery;
use crate::rounding::round_to;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupStat {
    pub bowler: String,
    pub batter: String,
    pub matches: usize,
    pub balls: usize,
    pub runs: u64,
    pub wickets: u64,
    /// Runs per 100 balls, two decimals. `None` when no balls were bowled.
    pub strike_rate: Option<f64>,
}

#[derive(Default)]
struct Group {
    match_ids: HashSet<u64>,
    balls: usize,
    runs: u64,
    wickets: u64,
}

/// True when one side bowled the ball and the other side faced it.
pub fn qualifies(d: &Delivery, team_a: &HashSet<&str>, team_b: &HashSet<&str>) -> bool {
    let bowler = d.bowler.as_str();
    let batter = d.batter.as_str();
    (team_a.contains(bowler) && team_b.contains(batter))
        || (team_b.contains(bowler) && team_a.contains(batter))
}

/// Deliveries where a player of one squad bowled to a player of the other, in table order.
pub fn qualifying_deliveries<'a, S: AsRef<str>>(
    deliveries: &'a [Delivery],
    team_a: &[S],
    team_b: &[S],
) -> Vec<&'a Delivery> {
    let team_a: HashSet<&str> = team_a.iter().map(AsRef::as_ref).collect();
    let team_b: HashSet<&str> = team_b.iter().map(AsRef::as_ref).collect();
    deliveries
        .par_iter()
        .filter(|d| qualifies(d, &team_a, &team_b))
        .collect()
}

/// Bowler-vs-batter summaries across both squads, most balls first.
pub fn compute_matchups<S: AsRef<str>>(
    deliveries: &[Delivery],
    team_a: &[S],
    team_b: &[S],
) -> Vec<MatchupStat> {
    let mut groups: BTreeMap<(&str, &str), Group> = BTreeMap::new();
    for d in qualifying_deliveries(deliveries, team_a, team_b) {
        let group = groups
            .entry((d.bowler.as_str(), d.batter.as_str()))
            .or_default();
        group.match_ids.insert(d.match_id);
        group.balls += 1;
        group.runs += u64::from(d.total_runs);
        group.wickets += u64::from(d.is_wicket);
    }

    let mut out: Vec<MatchupStat> = groups
        .into_iter()
        .map(|((bowler, batter), g)| MatchupStat {
            bowler: bowler.to_string(),
            batter: batter.to_string(),
            matches: g.match_ids.len(),
            balls: g.balls,
            runs: g.runs,
            wickets: g.wickets,
            strike_rate: strike_rate(g.runs, g.balls),
        })
        .collect();
    // Stable: equal ball counts stay in (bowler, batter) order.
    out.sort_by(|a, b| b.balls.cmp(&a.balls));
    out
}

pub fn strike_rate(runs: u64, balls: usize) -> Option<f64> {
    if balls == 0 {
        return None;
    }
    Some(round_to(100.0 * runs as f64 / balls as f64, 2))
}
