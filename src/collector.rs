use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;

use crate::dataset::{self, AppendSummary};
use crate::normalize::{COLLECTION_TIME_FORMAT, normalize_events};
use crate::scoreboard_fetch::{ScoreboardClient, ScoreboardEvent};

pub trait EventSource {
    fn fetch_events(&self) -> Result<Vec<ScoreboardEvent>>;
}

impl EventSource for ScoreboardClient {
    fn fetch_events(&self) -> Result<Vec<ScoreboardEvent>> {
        self.fetch()
    }
}

#[derive(Debug, Clone)]
pub struct CycleSummary {
    pub collected_at: String,
    pub events_fetched: usize,
    pub rows: usize,
    /// `None` when nothing was written this cycle.
    pub append: Option<AppendSummary>,
}

pub fn collection_timestamp() -> String {
    Utc::now().format(COLLECTION_TIME_FORMAT).to_string()
}

/// A failed fetch is logged and yields an empty cycle. Only storage
/// failures are returned as errors.
pub fn collect_once(
    source: &dyn EventSource,
    dataset_path: &Path,
    collected_at: &str,
) -> Result<CycleSummary> {
    let events = match source.fetch_events() {
        Ok(events) => events,
        Err(err) => {
            log::warn!("{err:#}");
            Vec::new()
        }
    };

    let rows = normalize_events(&events, collected_at);
    if rows.is_empty() {
        log::info!("no data collected at {collected_at}");
        return Ok(CycleSummary {
            collected_at: collected_at.to_string(),
            events_fetched: events.len(),
            rows: 0,
            append: None,
        });
    }

    log::info!("fetched {} events, {} rows", events.len(), rows.len());
    let append = dataset::append_rows(dataset_path, &rows)?;
    log::info!(
        "data saved to {} at {collected_at}",
        append.path.display()
    );

    Ok(CycleSummary {
        collected_at: collected_at.to_string(),
        events_fetched: events.len(),
        rows: rows.len(),
        append: Some(append),
    })
}

/// Runs exactly `runs` cycles: the first immediately, then one every
/// `interval`. `sleep` is never called after the last cycle.
pub fn run_schedule(
    source: &dyn EventSource,
    dataset_path: &Path,
    runs: usize,
    interval: Duration,
    mut sleep: impl FnMut(Duration),
) -> Result<Vec<CycleSummary>> {
    let mut summaries = Vec::with_capacity(runs);
    for run in 1..=runs {
        let collected_at = collection_timestamp();
        log::debug!("collection run {run}/{runs}");
        summaries.push(collect_once(source, dataset_path, &collected_at)?);
        if run < runs {
            sleep(interval);
        }
    }
    Ok(summaries)
}
