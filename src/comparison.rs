use anyhow::{Result, anyhow};
use serde::Serialize;

use crate::dataset::Dataset;
use crate::head_to_head::{HeadToHead, compute_h2h};
use crate::matchups::{MatchupStat, compute_matchups};
use crate::player_stats::{PlayerStat, compute_player_stats};

/// Two distinct team names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamPair {
    team1: String,
    team2: String,
}

impl TeamPair {
    pub fn new(team1: impl Into<String>, team2: impl Into<String>) -> Result<Self> {
        let team1 = team1.into();
        let team2 = team2.into();
        if team1 == team2 {
            return Err(anyhow!("team 2 must differ from team 1 ({team1})"));
        }
        Ok(Self { team1, team2 })
    }

    pub fn team1(&self) -> &str {
        &self.team1
    }

    pub fn team2(&self) -> &str {
        &self.team2
    }
}

/// Everything the presentation layer shows for one team pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub pair: TeamPair,
    pub head_to_head: HeadToHead,
    pub team1_stats: Vec<PlayerStat>,
    pub team2_stats: Vec<PlayerStat>,
    pub matchups: Vec<MatchupStat>,
}

impl Comparison {
    /// Runs the three independent aggregations over the shared tables.
    pub fn compute(dataset: &Dataset, pair: TeamPair) -> Self {
        let squad1 = dataset.squad(pair.team1());
        let squad2 = dataset.squad(pair.team2());

        let (head_to_head, ((team1_stats, team2_stats), matchups)) = rayon::join(
            || compute_h2h(&dataset.matches, pair.team1(), pair.team2()),
            || {
                rayon::join(
                    || {
                        rayon::join(
                            || compute_player_stats(&dataset.deliveries, &squad1),
                            || compute_player_stats(&dataset.deliveries, &squad2),
                        )
                    },
                    || compute_matchups(&dataset.history, &squad1, &squad2),
                )
            },
        );

        Self {
            pair,
            head_to_head,
            team1_stats,
            team2_stats,
            matchups,
        }
    }
}
