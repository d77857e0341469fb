use std::fs;
use std::path::PathBuf;

use nba_leaders::scoreboard_fetch::parse_scoreboard_json;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_scoreboard_fixture() {
    let raw = read_fixture("scoreboard.json");
    let events = parse_scoreboard_json(&raw).expect("fixture should parse");
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].id.as_deref(), Some("401705301"));
    assert_eq!(
        events[0].name.as_deref(),
        Some("Los Angeles Lakers at Golden State Warriors")
    );

    let competition = events[0].first_competition().expect("competition");
    assert_eq!(competition.competitors.len(), 2);
    assert_eq!(
        competition.competitors[0].team_name(),
        Some("Golden State Warriors")
    );
    assert_eq!(competition.competitors[0].score.as_deref(), Some("112"));

    let points = &competition.competitors[0].leaders[0];
    let top = points.top_leader().expect("top leader");
    assert_eq!(top.athlete_name(), Some("Stephen Curry"));
    assert_eq!(top.display_value.as_deref(), Some("31"));
}

#[test]
fn scoreboard_null_is_empty() {
    assert!(parse_scoreboard_json("null").expect("null should parse").is_empty());
    assert!(parse_scoreboard_json("  ").expect("blank should parse").is_empty());
    assert!(parse_scoreboard_json("{}").expect("no events should parse").is_empty());
}

#[test]
fn invalid_json_is_an_error() {
    assert!(parse_scoreboard_json("{\"events\": [").is_err());
}
