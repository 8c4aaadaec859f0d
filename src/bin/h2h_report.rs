use std::path::PathBuf;

use anyhow::{Context, Result};

use h2h_terminal::comparison::{Comparison, TeamPair};
use h2h_terminal::config::{DataPaths, flag_value};
use h2h_terminal::dataset::Dataset;
use h2h_terminal::report_export;
use h2h_terminal::tables::{history_table, matchup_table, player_table};

const TOP_MATCHUPS: usize = 20;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let paths = DataPaths::resolve(&args);
    let dataset = Dataset::load(&paths)?;
    println!("Loaded {} from {}", dataset.summary_line(), paths.dir.display());

    let teams = dataset.teams();
    let (Some(team1), Some(team2)) = (flag_value(&args, "--team1"), flag_value(&args, "--team2"))
    else {
        println!("Pass --team1 <name> --team2 <name>. Available teams:");
        for team in &teams {
            println!("  {team}");
        }
        return Ok(());
    };
    for team in [&team1, &team2] {
        if !teams.contains(team) {
            eprintln!("[WARN] {team} is not listed in the squad table");
        }
    }

    let pair = TeamPair::new(team1, team2)?;
    let comparison = Comparison::compute(&dataset, pair);
    print_comparison(&comparison);

    if let Some(path) = flag_value(&args, "--xlsx").map(PathBuf::from) {
        let report = report_export::export_comparison(&path, &comparison)
            .context("export comparison workbook")?;
        println!(
            "\nWrote {} sheets / {} rows to {}",
            report.sheets,
            report.rows,
            report.path.display()
        );
    }

    Ok(())
}

fn print_comparison(comparison: &Comparison) {
    let h2h = &comparison.head_to_head;
    println!();
    println!("{} vs {}", h2h.team_a, h2h.team_b);
    println!("Matches: {}", h2h.matches.len());
    println!("{} wins: {}", h2h.team_a, h2h.wins_a);
    println!("{} wins: {}", h2h.team_b, h2h.wins_b);
    if h2h.undecided() > 0 {
        println!("No winner: {}", h2h.undecided());
    }
    if let Some(last) = h2h.matches.first() {
        println!("Last meeting: {} ({})", last.date, last.outcome_label());
    }

    println!("\nMatch History Between Teams");
    let history = history_table(h2h);
    if history.is_empty() {
        println!("  none");
    } else {
        println!("{}", history.render_plain());
    }

    for (team, stats) in [
        (comparison.pair.team1(), &comparison.team1_stats),
        (comparison.pair.team2(), &comparison.team2_stats),
    ] {
        println!("\n{team} - Current Players Stats");
        let table = player_table(stats);
        if table.is_empty() {
            println!("  no players listed");
        } else {
            println!("{}", table.render_plain());
        }
    }

    println!(
        "\nKey Player Matchups (top {} of {})",
        TOP_MATCHUPS.min(comparison.matchups.len()),
        comparison.matchups.len()
    );
    let top = &comparison.matchups[..TOP_MATCHUPS.min(comparison.matchups.len())];
    let table = matchup_table(top);
    if table.is_empty() {
        println!("  none");
    } else {
        println!("{}", table.render_plain());
    }
}
