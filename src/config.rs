use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "ipl_data";
pub const DEFAULT_MATCHES_CSV: &str = "matches.csv";
pub const DEFAULT_SQUADS_CSV: &str = "team_players_matches.csv";
pub const DEFAULT_DELIVERIES_CSV: &str = "deliveries_2025.csv";
pub const DEFAULT_HISTORY_ZIP: &str = "deliveries.csv.zip";
pub const DEFAULT_HISTORY_ENTRY: &str = "deliveries.csv";

/// Where the four base tables live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub dir: PathBuf,
    pub matches: PathBuf,
    pub squads: PathBuf,
    pub deliveries: PathBuf,
    pub history_archive: PathBuf,
    // Name of the csv inside `history_archive`.
    pub history_entry: String,
}

impl DataPaths {
    /// Default file names under `dir`, ignoring the environment.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            matches: dir.join(DEFAULT_MATCHES_CSV),
            squads: dir.join(DEFAULT_SQUADS_CSV),
            deliveries: dir.join(DEFAULT_DELIVERIES_CSV),
            history_archive: dir.join(DEFAULT_HISTORY_ZIP),
            history_entry: DEFAULT_HISTORY_ENTRY.to_string(),
            dir,
        }
    }

    /// `--data-dir` wins over `H2H_DATA_DIR`; per-file env overrides apply on top.
    pub fn resolve(args: &[String]) -> Self {
        Self::resolve_with(args, env_non_empty)
    }

    /// Same as [`DataPaths::resolve`] with `lookup` standing in for the environment.
    pub fn resolve_with(args: &[String], lookup: impl Fn(&str) -> Option<String>) -> Self {
        let dir = flag_value(args, "--data-dir")
            .or_else(|| lookup("H2H_DATA_DIR"))
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        let dir = PathBuf::from(dir);
        let file = |key: &str, default: &str| {
            dir.join(lookup(key).unwrap_or_else(|| default.to_string()))
        };

        Self {
            matches: file("H2H_MATCHES_CSV", DEFAULT_MATCHES_CSV),
            squads: file("H2H_SQUADS_CSV", DEFAULT_SQUADS_CSV),
            deliveries: file("H2H_DELIVERIES_CSV", DEFAULT_DELIVERIES_CSV),
            history_archive: file("H2H_HISTORY_ZIP", DEFAULT_HISTORY_ZIP),
            history_entry: lookup("H2H_HISTORY_ENTRY")
                .unwrap_or_else(|| DEFAULT_HISTORY_ENTRY.to_string()),
            dir,
        }
    }
}

pub fn export_dir() -> PathBuf {
    env_non_empty("H2H_EXPORT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Accepts both `--name value` and `--name=value`.
pub fn flag_value(args: &[String], name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == name {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() && !next.starts_with("--") {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
