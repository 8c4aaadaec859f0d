use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use h2h_terminal::comparison::{Comparison, TeamPair};
use h2h_terminal::dataset::{Dataset, Delivery, Match, SquadMember};
use h2h_terminal::head_to_head::compute_h2h;
use h2h_terminal::matchups::compute_matchups;
use h2h_terminal::player_stats::compute_player_stats;

const TEAMS: [&str; 10] = ["CSK", "DC", "GT", "KKR", "LSG", "MI", "PBKS", "RCB", "RR", "SRH"];
const SQUAD_SIZE: usize = 22;

fn player_name(team: usize, idx: usize) -> String {
    format!("{} Player {idx}", TEAMS[team])
}

fn synthetic_matches(n: usize) -> Vec<Match> {
    (0..n)
        .map(|i| {
            let a = i % TEAMS.len();
            let b = (i / TEAMS.len() + a + 1) % TEAMS.len();
            let b = if a == b { (b + 1) % TEAMS.len() } else { b };
            Match {
                season: (2008 + i % 17).to_string(),
                date: format!("{}-04-{:02}", 2008 + i % 17, 1 + i % 28),
                city: Some("Mumbai".to_string()),
                team1: TEAMS[a].to_string(),
                team2: TEAMS[b].to_string(),
                toss_winner: Some(TEAMS[a].to_string()),
                toss_decision: Some("field".to_string()),
                winner: if i % 13 == 0 {
                    None
                } else {
                    Some(TEAMS[if i % 2 == 0 { a } else { b }].to_string())
                },
                result: Some("runs".to_string()),
                result_margin: Some((i % 50) as f64),
                target_runs: Some(150.0 + (i % 60) as f64),
            }
        })
        .collect()
}

fn synthetic_squads() -> Vec<SquadMember> {
    let mut out = Vec::new();
    for team in 0..TEAMS.len() {
        for idx in 0..SQUAD_SIZE {
            out.push(SquadMember {
                team: TEAMS[team].to_string(),
                player: player_name(team, idx),
            });
        }
    }
    out
}

// Two innings of 120 balls per match.
fn synthetic_deliveries(matches: usize) -> Vec<Delivery> {
    let mut out = Vec::with_capacity(matches * 240);
    for m in 0..matches {
        let a = m % TEAMS.len();
        let b = (a + 1 + m / TEAMS.len()) % TEAMS.len();
        let b = if a == b { (b + 1) % TEAMS.len() } else { b };
        for (bat, bowl) in [(a, b), (b, a)] {
            for n in 0..120u32 {
                out.push(Delivery {
                    match_id: m as u64,
                    over: n / 6,
                    ball: n % 6 + 1,
                    batter: player_name(bat, (n / 12) as usize % 11),
                    bowler: player_name(bowl, 11 + (n / 24) as usize % 5),
                    batsman_runs: n % 5,
                    total_runs: n % 5 + u32::from(n % 17 == 0),
                    is_wicket: n % 19 == 0,
                });
            }
        }
    }
    out
}

fn bench_h2h(c: &mut Criterion) {
    let matches = synthetic_matches(1_100);
    c.bench_function("h2h_compute", |b| {
        b.iter(|| {
            let h2h = compute_h2h(black_box(&matches), "MI", "CSK");
            black_box(h2h.matches.len());
        })
    });
}

fn bench_player_stats(c: &mut Criterion) {
    let deliveries = synthetic_deliveries(74);
    let squad: Vec<String> = (0..SQUAD_SIZE).map(|i| player_name(5, i)).collect();
    c.bench_function("player_stats_compute", |b| {
        b.iter(|| {
            let rows = compute_player_stats(black_box(&deliveries), black_box(&squad));
            black_box(rows.len());
        })
    });
}

fn bench_matchups(c: &mut Criterion) {
    let history = synthetic_deliveries(1_100);
    let squad_a: Vec<String> = (0..SQUAD_SIZE).map(|i| player_name(5, i)).collect();
    let squad_b: Vec<String> = (0..SQUAD_SIZE).map(|i| player_name(0, i)).collect();
    c.bench_function("matchups_compute", |b| {
        b.iter(|| {
            let rows = compute_matchups(black_box(&history), &squad_a, &squad_b);
            black_box(rows.len());
        })
    });
}

fn bench_full_comparison(c: &mut Criterion) {
    let dataset = Dataset {
        matches: synthetic_matches(1_100),
        squads: synthetic_squads(),
        deliveries: synthetic_deliveries(74),
        history: synthetic_deliveries(1_100),
    };
    c.bench_function("comparison_compute", |b| {
        b.iter(|| {
            let pair = TeamPair::new("MI", "CSK").unwrap();
            let comparison = Comparison::compute(black_box(&dataset), pair);
            black_box(comparison.matchups.len());
        })
    });
}

criterion_group!(
    perf,
    bench_h2h,
    bench_player_stats,
    bench_matchups,
    bench_full_comparison
);
criterion_main!(perf);
