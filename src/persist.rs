use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const CACHE_DIR: &str = "h2h_terminal";
const CACHE_FILE: &str = "selection.json";
const CACHE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SelectionFile {
    version: u32,
    team1: String,
    team2: String,
}

/// Last team pair chosen in the terminal, if any was saved.
pub fn load_selection() -> Option<(String, String)> {
    load_selection_from(&cache_path()?)
}

pub fn save_selection(team1: &str, team2: &str) -> Result<()> {
    let Some(path) = cache_path() else {
        return Ok(());
    };
    save_selection_to(&path, team1, team2)
}

pub fn load_selection_from(path: &Path) -> Option<(String, String)> {
    let raw = fs::read_to_string(path).ok()?;
    let file = serde_json::from_str::<SelectionFile>(&raw).ok()?;
    if file.version != CACHE_VERSION {
        return None;
    }
    Some((file.team1, file.team2))
}

pub fn save_selection_to(path: &Path, team1: &str, team2: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let file = SelectionFile {
        version: CACHE_VERSION,
        team1: team1.to_string(),
        team2: team2.to_string(),
    };
    let json = serde_json::to_string(&file).context("serialize selection")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).context("write selection")?;
    fs::rename(&tmp, path).context("swap selection")?;
    Ok(())
}

fn cache_path() -> Option<PathBuf> {
    // Prefer XDG cache.
    if let Ok(base) = std::env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(CACHE_DIR).join(CACHE_FILE));
        }
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(
        PathBuf::from(home)
            .join(".cache")
            .join(CACHE_DIR)
            .join(CACHE_FILE),
    )
}
