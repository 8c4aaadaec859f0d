use std::collections::VecDeque;

use crate::comparison::{Comparison, TeamPair};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Team1,
    Team2,
    Team1Stats,
    Team2Stats,
    History,
    Matchups,
}

impl Focus {
    const ORDER: [Focus; 6] = [
        Focus::Team1,
        Focus::Team2,
        Focus::Team1Stats,
        Focus::Team2Stats,
        Focus::History,
        Focus::Matchups,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    fn is_table(self) -> bool {
        !matches!(self, Focus::Team1 | Focus::Team2)
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub teams: Vec<String>,
    /// Index into `teams`.
    pub team1_selected: usize,
    /// Index into `team2_candidates()`.
    pub team2_selected: usize,
    pub focus: Focus,
    pub team1_stats_scroll: usize,
    pub team2_stats_scroll: usize,
    pub history_scroll: usize,
    pub matchups_scroll: usize,
    pub comparison: Option<Comparison>,
    pub last_compute_ms: Option<u128>,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl AppState {
    pub fn new(teams: Vec<String>) -> Self {
        Self {
            teams,
            team1_selected: 0,
            team2_selected: 0,
            focus: Focus::Team1,
            team1_stats_scroll: 0,
            team2_stats_scroll: 0,
            history_scroll: 0,
            matchups_scroll: 0,
            comparison: None,
            last_compute_ms: None,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        }
    }

    pub fn team1(&self) -> Option<&str> {
        self.teams.get(self.team1_selected).map(String::as_str)
    }

    /// Every team except the current team 1 selection.
    pub fn team2_candidates(&self) -> Vec<&str> {
        let team1 = self.team1();
        self.teams
            .iter()
            .map(String::as_str)
            .filter(|t| Some(*t) != team1)
            .collect()
    }

    pub fn team2(&self) -> Option<&str> {
        let team1 = self.team1();
        self.teams
            .iter()
            .map(String::as_str)
            .filter(|t| Some(*t) != team1)
            .nth(self.team2_selected)
    }

    pub fn selected_pair(&self) -> Option<TeamPair> {
        let (team1, team2) = (self.team1()?, self.team2()?);
        TeamPair::new(team1, team2).ok()
    }

    /// Restores a saved selection. Returns false if either team is gone.
    pub fn select_teams(&mut self, team1: &str, team2: &str) -> bool {
        let Some(idx1) = self.teams.iter().position(|t| t == team1) else {
            return false;
        };
        let previous = self.team1_selected;
        self.team1_selected = idx1;
        let idx2 = self.team2_candidates().iter().position(|t| *t == team2);
        match idx2 {
            Some(idx2) => {
                self.team2_selected = idx2;
                true
            }
            None => {
                self.team1_selected = previous;
                false
            }
        }
    }

    /// Moves team 1. Team 2 keeps its name when still a candidate,
    /// otherwise falls back to the first candidate.
    pub fn set_team1(&mut self, idx: usize) -> bool {
        if idx >= self.teams.len() || idx == self.team1_selected {
            return false;
        }
        let team2 = self.team2().map(str::to_string);
        self.team1_selected = idx;
        self.team2_selected = team2
            .and_then(|name| self.team2_candidates().iter().position(|t| *t == name))
            .unwrap_or(0);
        true
    }

    pub fn set_team2(&mut self, idx: usize) -> bool {
        if idx >= self.team2_candidates().len() || idx == self.team2_selected {
            return false;
        }
        self.team2_selected = idx;
        true
    }

    /// Returns true when the team pair changed and results must be recomputed.
    pub fn select_next(&mut self) -> bool {
        match self.focus {
            Focus::Team1 => self.set_team1(self.team1_selected + 1),
            Focus::Team2 => self.set_team2(self.team2_selected + 1),
            _ => {
                self.scroll_by(1);
                false
            }
        }
    }

    pub fn select_prev(&mut self) -> bool {
        match self.focus {
            Focus::Team1 => match self.team1_selected.checked_sub(1) {
                Some(idx) => self.set_team1(idx),
                None => false,
            },
            Focus::Team2 => match self.team2_selected.checked_sub(1) {
                Some(idx) => self.set_team2(idx),
                None => false,
            },
            _ => {
                self.scroll_by(-1);
                false
            }
        }
    }

    pub fn scroll_by(&mut self, delta: isize) {
        if !self.focus.is_table() {
            return;
        }
        let len = self.focused_table_len();
        let max = len.saturating_sub(1);
        let Some(scroll) = self.focused_scroll_mut() else {
            return;
        };
        let next = if delta < 0 {
            scroll.saturating_sub(delta.unsigned_abs())
        } else {
            scroll.saturating_add(delta as usize)
        };
        *scroll = next.min(max);
    }

    fn focused_table_len(&self) -> usize {
        let Some(c) = &self.comparison else {
            return 0;
        };
        match self.focus {
            Focus::Team1Stats => c.team1_stats.len(),
            Focus::Team2Stats => c.team2_stats.len(),
            Focus::History => c.head_to_head.matches.len(),
            Focus::Matchups => c.matchups.len(),
            Focus::Team1 | Focus::Team2 => 0,
        }
    }

    fn focused_scroll_mut(&mut self) -> Option<&mut usize> {
        match self.focus {
            Focus::Team1Stats => Some(&mut self.team1_stats_scroll),
            Focus::Team2Stats => Some(&mut self.team2_stats_scroll),
            Focus::History => Some(&mut self.history_scroll),
            Focus::Matchups => Some(&mut self.matchups_scroll),
            Focus::Team1 | Focus::Team2 => None,
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn cycle_focus_back(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn set_comparison(&mut self, comparison: Comparison, elapsed_ms: u128) {
        self.comparison = Some(comparison);
        self.last_compute_ms = Some(elapsed_ms);
        self.team1_stats_scroll = 0;
        self.team2_stats_scroll = 0;
        self.history_scroll = 0;
        self.matchups_scroll = 0;
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

pub fn focus_label(focus: Focus) -> &'static str {
    match focus {
        Focus::Team1 => "TEAM 1",
        Focus::Team2 => "TEAM 2",
        Focus::Team1Stats => "TEAM 1 PLAYERS",
        Focus::Team2Stats => "TEAM 2 PLAYERS",
        Focus::History => "HISTORY",
        Focus::Matchups => "MATCHUPS",
    }
}
