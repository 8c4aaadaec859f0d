use std::collections::HashSet;

use rayon::prelude::*;
use serde::Serialize;

use crate::dataset::Delivery;
use crate::rounding::round_to;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStat {
    pub player: String,
    pub matches: usize,
    pub runs_scored: u64,
    // Raw delivery count; wides and no-balls are not excluded.
    pub balls_faced: usize,
    pub overs_bowled: f64,
    // Every wicket-flagged delivery, run-outs included.
    pub wickets: u64,
    pub runs_given: u64,
}

impl PlayerStat {
    pub fn empty(player: &str) -> Self {
        Self {
            player: player.to_string(),
            matches: 0,
            runs_scored: 0,
            balls_faced: 0,
            overs_bowled: 0.0,
            wickets: 0,
            runs_given: 0,
        }
    }
}

/// Batting and bowling summary for each distinct squad player, sorted by name.
/// Players without a single delivery still get an all-zero row.
pub fn compute_player_stats<S: AsRef<str>>(
    deliveries: &[Delivery],
    squad: &[S],
) -> Vec<PlayerStat> {
    let mut players: Vec<&str> = squad.iter().map(AsRef::as_ref).collect();
    players.sort_unstable();
    players.dedup();

    players
        .par_iter()
        .map(|player| player_stat(deliveries, player))
        .collect()
}

pub fn player_stat(deliveries: &[Delivery], player: &str) -> PlayerStat {
    let mut stat = PlayerStat::empty(player);
    let mut match_ids = HashSet::new();
    let mut balls_bowled = HashSet::new();

    for d in deliveries {
        if d.batter == player {
            match_ids.insert(d.match_id);
            stat.runs_scored += u64::from(d.batsman_runs);
            stat.balls_faced += 1;
        }
        if d.bowler == player {
            match_ids.insert(d.match_id);
            balls_bowled.insert((d.match_id, d.over, d.ball));
            stat.wickets += u64::from(d.is_wicket);
            stat.runs_given += u64::from(d.total_runs);
        }
    }

    stat.matches = match_ids.len();
    stat.overs_bowled = overs_from_balls(balls_bowled.len());
    stat
}

/// Balls divided by six, one decimal. Does not model partial overs.
pub fn overs_from_balls(balls: usize) -> f64 {
    round_to(balls as f64 / 6.0, 1)
}
