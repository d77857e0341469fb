use std::cell::Cell;
use std::time::Duration;

use anyhow::{Result, anyhow};

use nba_leaders::collector::{EventSource, collect_once, run_schedule};
use nba_leaders::dataset::load_rows;
use nba_leaders::scoreboard_fetch::{ScoreboardClient, ScoreboardEvent, parse_scoreboard_json};

const GAME: &str = r#"{"events":[{"id":"401","competitions":[{"competitors":[
    {"team":{"displayName":"Home"}},{"team":{"displayName":"Away"}}
]}]}]}"#;

struct FixedSource {
    calls: Cell<usize>,
}

impl EventSource for FixedSource {
    fn fetch_events(&self) -> Result<Vec<ScoreboardEvent>> {
        self.calls.set(self.calls.get() + 1);
        parse_scoreboard_json(GAME)
    }
}

struct FailingSource;

impl EventSource for FailingSource {
    fn fetch_events(&self) -> Result<Vec<ScoreboardEvent>> {
        Err(anyhow!("failed to fetch scoreboard: http 503"))
    }
}

#[test]
fn collect_once_appends_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("raw.csv");
    let source = FixedSource { calls: Cell::new(0) };

    let summary = collect_once(&source, &path, "2025-02-10 01:00:00").expect("cycle");
    assert_eq!(summary.events_fetched, 1);
    assert_eq!(summary.rows, 1);
    assert!(summary.append.is_some_and(|a| a.created));

    let rows = load_rows(&path).expect("load");
    assert_eq!(rows[0].collection_timestamp, "2025-02-10 01:00:00");
    assert_eq!(rows[0].team2, "Away");
}

#[test]
fn failed_fetch_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("raw.csv");

    let summary = collect_once(&FailingSource, &path, "2025-02-10 01:00:00").expect("cycle");
    assert_eq!(summary.rows, 0);
    assert!(summary.append.is_none());
    assert!(!path.exists());
}

#[test]
fn unreachable_scoreboard_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("raw.csv");
    let client = ScoreboardClient::new("http://127.0.0.1:9/scoreboard", Duration::from_secs(2))
        .expect("client builds");

    let summary = collect_once(&client, &path, "2025-02-10 01:00:00").expect("cycle");
    assert_eq!(summary.events_fetched, 0);
    assert!(summary.append.is_none());
    assert!(!path.exists());
}

#[test]
fn schedule_runs_exactly_n_cycles() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("raw.csv");
    let source = FixedSource { calls: Cell::new(0) };
    let mut sleeps = Vec::new();

    let summaries = run_schedule(&source, &path, 3, Duration::from_secs(60), |d| sleeps.push(d))
        .expect("schedule");
    assert_eq!(summaries.len(), 3);
    assert_eq!(source.calls.get(), 3);
    assert_eq!(sleeps, vec![Duration::from_secs(60); 2]);
    assert_eq!(load_rows(&path).expect("load").len(), 3);
}

#[test]
fn zero_runs_does_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("raw.csv");
    let source = FixedSource { calls: Cell::new(0) };

    let summaries = run_schedule(&source, &path, 0, Duration::ZERO, |_| {}).expect("schedule");
    assert!(summaries.is_empty());
    assert_eq!(source.calls.get(), 0);
}
