use crate::head_to_head::HeadToHead;
use crate::matchups::MatchupStat;
use crate::player_stats::PlayerStat;

/// Header plus stringified rows, shared by the terminal, text report and xlsx export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextTable {
    pub header: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest cell per column, header included.
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (idx, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(idx) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }
        widths
    }

    /// Left-aligned, space padded plain text.
    pub fn render_plain(&self) -> String {
        let widths = self.column_widths();
        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(pad_row(self.header.iter().map(|h| h.to_string()), &widths));
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        for row in &self.rows {
            lines.push(pad_row(row.iter().cloned(), &widths));
        }
        lines.join("\n")
    }
}

fn pad_row(cells: impl Iterator<Item = String>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

pub fn history_table(h2h: &HeadToHead) -> TextTable {
    let rows = h2h
        .matches
        .iter()
        .map(|m| {
            vec![
                m.season.clone(),
                m.date.clone(),
                opt_text(m.city.as_deref()),
                m.team1.clone(),
                m.team2.clone(),
                opt_text(m.toss_winner.as_deref()),
                opt_text(m.toss_decision.as_deref()),
                opt_text(m.winner.as_deref()),
                opt_text(m.result.as_deref()),
                opt_number(m.result_margin, 0),
                opt_number(m.target_runs, 0),
            ]
        })
        .collect();
    TextTable {
        header: vec![
            "Season",
            "Date",
            "City",
            "Team 1",
            "Team 2",
            "Toss Winner",
            "Toss Decision",
            "Winner",
            "Result",
            "Margin",
            "Target",
        ],
        rows,
    }
}

pub fn player_table(stats: &[PlayerStat]) -> TextTable {
    let rows = stats
        .iter()
        .map(|s| {
            vec![
                s.player.clone(),
                s.matches.to_string(),
                s.runs_scored.to_string(),
                s.balls_faced.to_string(),
                format!("{:.1}", s.overs_bowled),
                s.wickets.to_string(),
                s.runs_given.to_string(),
            ]
        })
        .collect();
    TextTable {
        header: vec![
            "Player",
            "Matches",
            "Runs Scored",
            "Balls Faced",
            "Overs Bowled",
            "Wickets Taken",
            "Runs Given",
        ],
        rows,
    }
}

pub fn matchup_table(matchups: &[MatchupStat]) -> TextTable {
    let rows = matchups
        .iter()
        .map(|m| {
            vec![
                m.bowler.clone(),
                m.batter.clone(),
                m.matches.to_string(),
                m.balls.to_string(),
                m.runs.to_string(),
                m.wickets.to_string(),
                opt_number(m.strike_rate, 2),
            ]
        })
        .collect();
    TextTable {
        header: vec![
            "Bowler",
            "Batter",
            "Matches",
            "Balls",
            "Runs",
            "Wickets",
            "Strike Rate",
        ],
        rows,
    }
}

fn opt_text(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn opt_number(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_plain_pads_columns() {
        let table = TextTable {
            header: vec!["A", "Long"],
            rows: vec![vec!["xyz".to_string(), "1".to_string()]],
        };
        assert_eq!(table.render_plain(), "A    Long\n---  ----\nxyz  1");
    }

    #[test]
    fn missing_strike_rate_renders_dash() {
        let table = matchup_table(&[MatchupStat {
            bowler: "B1".to_string(),
            batter: "P1".to_string(),
            matches: 0,
            balls: 0,
            runs: 0,
            wickets: 0,
            strike_rate: None,
        }]);
        assert_eq!(table.rows[0][6], "-");
    }
}
