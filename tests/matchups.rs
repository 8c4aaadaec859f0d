use h2h_terminal::dataset::Delivery;
use h2h_terminal::matchups::{compute_matchups, qualifying_deliveries};

fn ball(match_id: u64, batter: &str, bowler: &str, total_runs: u32, is_wicket: bool) -> Delivery {
    Delivery {
        match_id,
        over: 1,
        ball: 1,
        batter: batter.to_string(),
        bowler: bowler.to_string(),
        batsman_runs: total_runs,
        total_runs,
        is_wicket,
    }
}

#[test]
fn two_deliveries_scenario() {
    let deliveries = vec![ball(1, "P1", "B1", 4, false), ball(1, "P1", "B1", 6, false)];
    let rows = compute_matchups(&deliveries, &["B1"], &["P1"]);
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.bowler, "B1");
    assert_eq!(row.batter, "P1");
    assert!(row.matches >= 1);
    assert_eq!(row.balls, 2);
    assert_eq!(row.runs, 10);
    assert_eq!(row.strike_rate, Some(500.0));
}

#[test]
fn only_cross_team_deliveries_qualify() {
    let deliveries = vec![
        ball(1, "A1", "B1", 1, false),
        // same-team practice pair and unknown player are excluded
        ball(1, "A1", "A2", 4, false),
        ball(1, "Z9", "B1", 4, false),
        ball(2, "B2", "A2", 0, true),
    ];
    let team_a = ["A1", "A2"];
    let team_b = ["B1", "B2"];
    let rows = compute_matchups(&deliveries, &team_a, &team_b);
    let pairs: Vec<(&str, &str)> = rows
        .iter()
        .map(|r| (r.bowler.as_str(), r.batter.as_str()))
        .collect();
    assert_eq!(pairs, vec![("A2", "B2"), ("B1", "A1")]);
    assert_eq!(rows[0].wickets, 1);
}

#[test]
fn qualification_is_symmetric() {
    let deliveries = vec![
        ball(1, "A1", "B1", 1, false),
        ball(1, "B1", "A1", 2, false),
        ball(2, "A2", "B2", 3, true),
        ball(2, "A2", "A1", 3, false),
    ];
    let team_a = ["A1", "A2"];
    let team_b = ["B1", "B2"];
    let forward = qualifying_deliveries(&deliveries, &team_a, &team_b);
    let backward = qualifying_deliveries(&deliveries, &team_b, &team_a);
    assert_eq!(forward, backward);
    assert_eq!(forward.len(), 3);
    assert_eq!(
        compute_matchups(&deliveries, &team_a, &team_b),
        compute_matchups(&deliveries, &team_b, &team_a)
    );
}

#[test]
fn sorted_by_balls_then_pair_order() {
    let deliveries = vec![
        ball(1, "A1", "B2", 1, false),
        ball(1, "A1", "B1", 1, false),
        ball(2, "A1", "B1", 1, false),
        ball(3, "A1", "B1", 1, false),
        ball(1, "A2", "B1", 1, false),
    ];
    let rows = compute_matchups(&deliveries, &["A1", "A2"], &["B1", "B2"]);
    assert_eq!(rows[0].balls, 3);
    assert_eq!(rows[0].matches, 3);
    // ties keep (bowler, batter) order
    assert_eq!((rows[1].bowler.as_str(), rows[1].batter.as_str()), ("B1", "A2"));
    assert_eq!((rows[2].bowler.as_str(), rows[2].batter.as_str()), ("B2", "A1"));
}

#[test]
fn strike_rate_rounds_to_two_decimals() {
    let deliveries = vec![
        ball(1, "A1", "B1", 1, false),
        ball(1, "A1", "B1", 0, false),
        ball(1, "A1", "B1", 0, false),
    ];
    let rows = compute_matchups(&deliveries, &["A1"], &["B1"]);
    assert_eq!(rows[0].strike_rate, Some(33.33));
}

#[test]
fn no_overlap_gives_empty_table() {
    let deliveries = vec![ball(1, "A1", "B1", 1, false)];
    assert!(compute_matchups(&deliveries, &["X"], &["Y"]).is_empty());
}
