use std::fs;
use std::io::{Cursor, Write};
use std::path::PathBuf;

use h2h_terminal::config::DataPaths;
use h2h_terminal::dataset::{Dataset, Delivery, Match, SquadMember, read_csv, read_zipped_csv};
use zip::write::SimpleFileOptions;

const MATCHES_CSV: &str = "\
id,season,city,date,match_type,player_of_match,venue,team1,team2,toss_winner,toss_decision,winner,result,result_margin,target_runs,target_overs,super_over,method,umpire1,umpire2
335982,2007/08,Bangalore,2008-04-18,League,BB McCullum,M Chinnaswamy Stadium,Royal Challengers Bangalore,Kolkata Knight Riders,Royal Challengers Bangalore,field,Kolkata Knight Riders,runs,140,223,20,N,NA,Asad Rauf,RE Koertzen
336004,2007/08,Kolkata,2008-05-08,League,NA,Eden Gardens,Kolkata Knight Riders,Royal Challengers Bangalore,Kolkata Knight Riders,bat,NA,no result,NA,NA,NA,N,NA,A,B
";

const SQUADS_CSV: &str = "\
team,player
Kolkata Knight Riders,SP Narine
Kolkata Knight Riders,AD Russell
Royal Challengers Bangalore,V Kohli
Kolkata Knight Riders,SP Narine
";

const DELIVERIES_CSV: &str = "\
match_id,inning,batting_team,bowling_team,over,ball,batter,bowler,non_striker,batsman_runs,extra_runs,total_runs,extras_type,is_wicket,player_dismissed,dismissal_kind,fielder
335982,1,Kolkata Knight Riders,Royal Challengers Bangalore,0,1,SC Ganguly,P Kumar,BB McCullum,0,1,1,legbyes,0,NA,NA,NA
335982,1,Kolkata Knight Riders,Royal Challengers Bangalore,0,2,BB McCullum,P Kumar,SC Ganguly,4,0,4,NA,0,NA,NA,NA
335982,2,Royal Challengers Bangalore,Kolkata Knight Riders,1,3,V Kohli,AB Agarkar,R Dravid,0,0,0,NA,1,V Kohli,bowled,NA
";

fn zipped(entry: &str, body: &str) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file(entry, SimpleFileOptions::default())
        .expect("start zip entry");
    writer.write_all(body.as_bytes()).expect("write zip entry");
    writer.finish().expect("finish zip").into_inner()
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("h2h_terminal_{}_{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

#[test]
fn matches_parse_with_missing_markers() {
    let rows: Vec<Match> = read_csv(MATCHES_CSV.as_bytes(), "matches").expect("matches parse");
    assert_eq!(rows.len(), 2);
    let first = &rows[0];
    assert_eq!(first.season, "2007/08");
    assert_eq!(first.winner.as_deref(), Some("Kolkata Knight Riders"));
    assert_eq!(first.result_margin, Some(140.0));
    assert_eq!(first.target_runs, Some(223.0));
    assert_eq!(first.margin_label(), "140 runs");

    let abandoned = &rows[1];
    assert_eq!(abandoned.winner, None);
    assert_eq!(abandoned.result_margin, None);
    assert_eq!(abandoned.target_runs, None);
}

#[test]
fn deliveries_parse_wicket_flag() {
    let rows: Vec<Delivery> =
        read_csv(DELIVERIES_CSV.as_bytes(), "deliveries").expect("deliveries parse");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1].batsman_runs, 4);
    assert!(!rows[1].is_wicket);
    assert!(rows[2].is_wicket);
    assert_eq!(rows[2].over, 1);
    assert_eq!(rows[2].ball, 3);
}

#[test]
fn malformed_row_reports_line() {
    let broken = "match_id,over,ball,batter,bowler,batsman_runs,total_runs,is_wicket\n1,0,1,A,B,x,1,0\n";
    let err = read_csv::<Delivery, _>(broken.as_bytes(), "deliveries").unwrap_err();
    assert!(format!("{err:#}").contains("line 2"));
}

#[test]
fn missing_column_is_an_error() {
    let no_bowler = "match_id,over,ball,batter,batsman_runs,total_runs,is_wicket\n1,0,1,A,0,0,0\n";
    assert!(read_csv::<Delivery, _>(no_bowler.as_bytes(), "deliveries").is_err());
}

#[test]
fn zipped_history_reads_named_entry() {
    let bytes = zipped("deliveries.csv", DELIVERIES_CSV);
    let rows: Vec<Delivery> =
        read_zipped_csv(Cursor::new(bytes.clone()), "deliveries.csv", "history")
            .expect("zip parse");
    assert_eq!(rows.len(), 3);

    let missing = read_zipped_csv::<Delivery, _>(Cursor::new(bytes), "other.csv", "history");
    assert!(missing.is_err());
}

#[test]
fn dataset_loads_from_directory() {
    let dir = scratch_dir("load");
    fs::write(dir.join("matches.csv"), MATCHES_CSV).unwrap();
    fs::write(dir.join("team_players_matches.csv"), SQUADS_CSV).unwrap();
    fs::write(dir.join("deliveries_2025.csv"), DELIVERIES_CSV).unwrap();
    fs::write(
        dir.join("deliveries.csv.zip"),
        zipped("deliveries.csv", DELIVERIES_CSV),
    )
    .unwrap();

    let dataset = Dataset::load(&DataPaths::in_dir(&dir)).expect("dataset loads");
    assert_eq!(dataset.matches.len(), 2);
    assert_eq!(dataset.deliveries.len(), 3);
    assert_eq!(dataset.history.len(), 3);
    assert_eq!(
        dataset.teams(),
        vec![
            "Kolkata Knight Riders".to_string(),
            "Royal Challengers Bangalore".to_string()
        ]
    );
    assert_eq!(
        dataset.squad("Kolkata Knight Riders"),
        vec!["SP Narine", "AD Russell"]
    );
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_file_is_fatal() {
    let dir = scratch_dir("missing");
    fs::write(dir.join("matches.csv"), MATCHES_CSV).unwrap();
    let err = Dataset::load(&DataPaths::in_dir(&dir)).unwrap_err();
    assert!(format!("{err:#}").contains("team_players_matches.csv"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn squad_rows_deserialize() {
    let rows: Vec<SquadMember> = read_csv(SQUADS_CSV.as_bytes(), "squads").unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[2].player, "V Kohli");
}
