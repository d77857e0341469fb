use std::path::PathBuf;
use std::time::Duration;

use crate::scoreboard_fetch::ESPN_NBA_SCOREBOARD_URL;

pub const DEFAULT_RAW_CSV: &str = "collected_espn_data_player_include.csv";
pub const DEFAULT_CLEAN_CSV: &str = "cleaned_espn_data.csv";

const DEFAULT_POLL_SECS: u64 = 3600;
const MIN_POLL_SECS: u64 = 10;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
// One immediate cycle plus five scheduled ones.
const DEFAULT_RUNS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub scoreboard_url: String,
    pub raw_dataset: PathBuf,
    pub clean_dataset: PathBuf,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub runs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoreboard_url: ESPN_NBA_SCOREBOARD_URL.to_string(),
            raw_dataset: PathBuf::from(DEFAULT_RAW_CSV),
            clean_dataset: PathBuf::from(DEFAULT_CLEAN_CSV),
            poll_interval: Duration::from_secs(DEFAULT_POLL_SECS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            runs: DEFAULT_RUNS,
        }
    }
}

impl Config {
    /// Reads `SCOREBOARD_URL`, `LEADERS_RAW_CSV`, `LEADERS_CLEAN_CSV`,
    /// `SCOREBOARD_POLL_SECS`, `SCOREBOARD_TIMEOUT_SECS` and
    /// `SCOREBOARD_RUNS`. Call after loading
    /// `.env` files.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|val| !val.trim().is_empty());

        let poll_secs = non_empty("SCOREBOARD_POLL_SECS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_POLL_SECS)
            .max(MIN_POLL_SECS);
        let timeout_secs = non_empty("SCOREBOARD_TIMEOUT_SECS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .max(1);
        let runs = non_empty("SCOREBOARD_RUNS")
            .and_then(|val| val.trim().parse::<usize>().ok())
            .unwrap_or(defaults.runs)
            .max(1);

        Self {
            scoreboard_url: non_empty("SCOREBOARD_URL").unwrap_or(defaults.scoreboard_url),
            raw_dataset: non_empty("LEADERS_RAW_CSV")
                .map(PathBuf::from)
                .unwrap_or(defaults.raw_dataset),
            clean_dataset: non_empty("LEADERS_CLEAN_CSV")
                .map(PathBuf::from)
                .unwrap_or(defaults.clean_dataset),
            poll_interval: Duration::from_secs(poll_secs),
            request_timeout: Duration::from_secs(timeout_secs),
            runs,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::Config;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_env_uses_defaults() {
        assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
    }

    #[test]
    fn poll_interval_has_a_floor() {
        let config = Config::from_lookup(lookup(&[("SCOREBOARD_POLL_SECS", "2")]));
        assert_eq!(config.poll_interval, Duration::from_secs(10));
    }

    #[test]
    fn request_timeout_from_env() {
        let config = Config::from_lookup(lookup(&[("SCOREBOARD_TIMEOUT_SECS", "25")]));
        assert_eq!(config.request_timeout, Duration::from_secs(25));
        let config = Config::from_lookup(lookup(&[("SCOREBOARD_TIMEOUT_SECS", "0")]));
        assert_eq!(config.request_timeout, Duration::from_secs(1));
    }

    #[test]
    fn overrides_and_bad_values() {
        let config = Config::from_lookup(lookup(&[
            ("LEADERS_RAW_CSV", "data/raw.csv"),
            ("SCOREBOARD_RUNS", "zero"),
            ("SCOREBOARD_URL", "  "),
        ]));
        assert_eq!(config.raw_dataset.to_str(), Some("data/raw.csv"));
        assert_eq!(config.runs, 6);
        assert_eq!(config.scoreboard_url, Config::default().scoreboard_url);
    }
}
