use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::DataPaths;

/// One historical game. Extra source columns (id, venue, umpires, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub season: String,
    pub date: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub city: Option<String>,
    pub team1: String,
    pub team2: String,
    #[serde(default, deserialize_with = "optional_text")]
    pub toss_winner: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub toss_decision: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub winner: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub result: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub result_margin: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub target_runs: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Normal,
    Tie,
    NoResult,
}

impl Match {
    pub fn is_between(&self, team_a: &str, team_b: &str) -> bool {
        (self.team1 == team_a && self.team2 == team_b)
            || (self.team1 == team_b && self.team2 == team_a)
    }

    pub fn won_by(&self, team: &str) -> bool {
        self.winner.as_deref() == Some(team)
    }

    pub fn played_on(&self) -> Option<NaiveDate> {
        parse_match_date(&self.date)
    }

    /// A missing `result` with a recorded winner still counts as a decided game.
    pub fn result_kind(&self) -> ResultKind {
        let Some(raw) = self.result.as_deref() else {
            return if self.winner.is_some() {
                ResultKind::Normal
            } else {
                ResultKind::NoResult
            };
        };
        let lowered = raw.to_ascii_lowercase();
        if lowered == "tie" {
            ResultKind::Tie
        } else if lowered.contains("no result") || lowered == "no_result" {
            ResultKind::NoResult
        } else {
            ResultKind::Normal
        }
    }

    /// Human readable margin, e.g. "140 runs" or "7 wickets".
    pub fn margin_label(&self) -> String {
        match (self.result_kind(), self.result_margin) {
            (ResultKind::Tie, _) => "tie".to_string(),
            (ResultKind::NoResult, _) => "no result".to_string(),
            (ResultKind::Normal, Some(margin)) => {
                let unit = self.result.as_deref().unwrap_or("");
                if unit.is_empty() || unit.eq_ignore_ascii_case("normal") {
                    format!("{margin:.0}")
                } else {
                    format!("{margin:.0} {unit}")
                }
            }
            (ResultKind::Normal, None) => "-".to_string(),
        }
    }

    /// One-line outcome, e.g. "MI by 5 wickets", "tie, CSK won" or "no result".
    pub fn outcome_label(&self) -> String {
        match (self.result_kind(), self.winner.as_deref()) {
            (ResultKind::Normal, Some(winner)) if self.result_margin.is_some() => {
                format!("{winner} by {}", self.margin_label())
            }
            (ResultKind::Normal, Some(winner)) => format!("{winner} won"),
            (ResultKind::Tie, Some(winner)) => format!("tie, {winner} won"),
            _ => self.margin_label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadMember {
    pub team: String,
    pub player: String,
}

/// One bowled ball. `over` keeps whatever base the source file uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub match_id: u64,
    pub over: u32,
    pub ball: u32,
    pub batter: String,
    pub bowler: String,
    pub batsman_runs: u32,
    pub total_runs: u32,
    #[serde(deserialize_with = "wicket_flag")]
    pub is_wicket: bool,
}

/// The four base tables. Built once at startup and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub matches: Vec<Match>,
    pub squads: Vec<SquadMember>,
    pub deliveries: Vec<Delivery>,
    pub history: Vec<Delivery>,
}

impl Dataset {
    pub fn load(paths: &DataPaths) -> Result<Self> {
        let matches = read_csv_file(&paths.matches, "matches")?;
        let squads = read_csv_file(&paths.squads, "squads")?;
        let deliveries = read_csv_file(&paths.deliveries, "current-season deliveries")?;

        let archive = File::open(&paths.history_archive).with_context(|| {
            format!("open delivery archive {}", paths.history_archive.display())
        })?;
        let history = read_zipped_csv(
            BufReader::new(archive),
            &paths.history_entry,
            "historical deliveries",
        )
        .with_context(|| format!("load {}", paths.history_archive.display()))?;

        Ok(Self {
            matches,
            squads,
            deliveries,
            history,
        })
    }

    /// Distinct non-empty team names from the squad table, sorted.
    pub fn teams(&self) -> Vec<String> {
        self.squads
            .iter()
            .map(|m| m.team.trim())
            .filter(|t| !t.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Players currently listed under `team`, deduplicated in table order.
    /// Team names match the way [`Dataset::teams`] lists them.
    pub fn squad(&self, team: &str) -> Vec<&str> {
        let team = team.trim();
        let mut seen = HashSet::new();
        self.squads
            .iter()
            .filter(|m| m.team.trim() == team)
            .map(|m| m.player.as_str())
            .filter(|p| seen.insert(*p))
            .collect()
    }

    pub fn summary_line(&self) -> String {
        format!(
            "matches={} squad_rows={} deliveries={} history={}",
            self.matches.len(),
            self.squads.len(),
            self.deliveries.len(),
            self.history.len()
        )
    }
}

pub fn read_csv_file<T: DeserializeOwned>(path: &Path, label: &str) -> Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("open {label} file {}", path.display()))?;
    read_csv(BufReader::new(file), label).with_context(|| format!("load {}", path.display()))
}

pub fn read_csv<T: DeserializeOwned, R: Read>(reader: R, label: &str) -> Result<Vec<T>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();
    for (idx, record) in rdr.deserialize::<T>().enumerate() {
        // +2: header line, 1-based numbering.
        let row = record.with_context(|| format!("{label}: malformed row at line {}", idx + 2))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Reads a CSV stored as `entry` inside a zip archive.
pub fn read_zipped_csv<T: DeserializeOwned, R: Read + Seek>(
    archive: R,
    entry: &str,
    label: &str,
) -> Result<Vec<T>> {
    let mut zip = zip::ZipArchive::new(archive).context("read zip archive")?;
    let file = zip
        .by_name(entry)
        .with_context(|| format!("archive has no entry named {entry}"))?;
    read_csv(file, label)
}

pub fn parse_match_date(raw: &str) -> Option<NaiveDate> {
    const FORMATS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%Y/%m/%d"];

    let cleaned = raw.trim();
    for fmt in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(cleaned, fmt) {
            return Some(date);
        }
    }
    None
}

fn is_missing_marker(raw: &str) -> bool {
    matches!(raw, "NA" | "N/A" | "NaN" | "nan" | "None" | "null")
}

fn optional_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() || is_missing_marker(trimmed) {
            None
        } else {
            Some(trimmed.to_string())
        }
    }))
}

fn wicket_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_flag(&raw).ok_or_else(|| de::Error::custom(format!("invalid wicket flag {raw:?}")))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "1.0" | "true" | "yes" => Some(true),
        "0" | "0.0" | "false" | "no" | "" => Some(false),
        _ => None,
    }
}
