use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::comparison::{Comparison, TeamPair};
use crate::tables::{TextTable, history_table, matchup_table, player_table};

const MAX_SHEET_NAME: usize = 31;

pub struct ExportReport {
    pub path: PathBuf,
    pub sheets: usize,
    pub rows: usize,
}

/// Sheet name plus rows (header first) for each sheet of the workbook.
pub fn comparison_sheets(comparison: &Comparison) -> Vec<(String, Vec<Vec<String>>)> {
    let h2h = &comparison.head_to_head;
    let summary = vec![
        vec!["Team".to_string(), "Wins".to_string()],
        vec![h2h.team_a.clone(), h2h.wins_a.to_string()],
        vec![h2h.team_b.clone(), h2h.wins_b.to_string()],
        vec!["No winner".to_string(), h2h.undecided().to_string()],
        vec!["Matches".to_string(), h2h.matches.len().to_string()],
    ];

    let mut used = HashSet::new();
    vec![
        (sheet_name("Summary", &mut used), summary),
        (sheet_name("History", &mut used), table_rows(&history_table(h2h))),
        (
            sheet_name(comparison.pair.team1(), &mut used),
            table_rows(&player_table(&comparison.team1_stats)),
        ),
        (
            sheet_name(comparison.pair.team2(), &mut used),
            table_rows(&player_table(&comparison.team2_stats)),
        ),
        (
            sheet_name("Matchups", &mut used),
            table_rows(&matchup_table(&comparison.matchups)),
        ),
    ]
}

pub fn export_comparison(path: &Path, comparison: &Comparison) -> Result<ExportReport> {
    let sheets = comparison_sheets(comparison);
    let mut workbook = Workbook::new();
    let mut rows = 0usize;
    for (name, sheet_rows) in &sheets {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(name.as_str())
            .with_context(|| format!("name worksheet {name}"))?;
        write_rows(sheet, sheet_rows)?;
        rows += sheet_rows.len().saturating_sub(1);
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        path: path.to_path_buf(),
        sheets: sheets.len(),
        rows,
    })
}

/// `h2h_<team1>_vs_<team2>.xlsx` under `dir`.
pub fn default_export_path(dir: &Path, pair: &TeamPair) -> PathBuf {
    dir.join(format!(
        "h2h_{}_vs_{}.xlsx",
        slug(pair.team1()),
        slug(pair.team2())
    ))
}

fn slug(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

/// Excel rules: no `[]:*?/\`, at most 31 chars, unique ignoring case.
fn sheet_name(raw: &str, used: &mut HashSet<String>) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| if "[]:*?/\\".contains(c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'').to_string();
    let base = if cleaned.is_empty() {
        "Sheet".to_string()
    } else {
        cleaned
    };

    let mut candidate: String = base.chars().take(MAX_SHEET_NAME).collect();
    let mut n = 2;
    while used.contains(&candidate.to_lowercase()) {
        let suffix = format!(" ({n})");
        let keep = MAX_SHEET_NAME - suffix.chars().count();
        candidate = base.chars().take(keep).collect::<String>() + &suffix;
        n += 1;
    }
    used.insert(candidate.to_lowercase());
    candidate
}

fn table_rows(table: &TextTable) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(table.rows.len() + 1);
    rows.push(table.header.iter().map(|h| h.to_string()).collect());
    rows.extend(table.rows.iter().cloned());
    rows
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
