/// Cell values that dataframe tooling writes for "no value". Treated the
/// same as an empty cell.
const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-NaN", "-nan", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a",
    "nan", "null",
];

/// Outcome of parsing one `"Name: Stat"` leader cell.
#[derive(Debug, Clone, PartialEq)]
pub enum LeaderCell {
    /// No leader recorded for this row.
    Absent,
    /// Not exactly one `:` separator.
    Malformed,
    /// `stat` is `None` when the value part is not a number; the player still
    /// counts as an appearance.
    Player { name: String, stat: Option<f64> },
}

impl LeaderCell {
    pub fn into_pair(self) -> (Option<String>, Option<f64>) {
        match self {
            LeaderCell::Absent | LeaderCell::Malformed => (None, None),
            LeaderCell::Player { name, stat } => (Some(name), stat),
        }
    }
}

pub fn parse_leader(raw: Option<&str>) -> LeaderCell {
    let Some(raw) = raw else {
        return LeaderCell::Absent;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() || MISSING_MARKERS.contains(&trimmed) {
        return LeaderCell::Absent;
    }

    let mut parts = trimmed.split(':');
    let (Some(name), Some(stat), None) = (parts.next(), parts.next(), parts.next()) else {
        return LeaderCell::Malformed;
    };

    LeaderCell::Player {
        name: name.trim().to_string(),
        stat: parse_stat(stat.trim()),
    }
}

/// Pair view of [`parse_leader`]: absent and malformed both give `(None, None)`.
pub fn extract_player_stat(raw: &str) -> (Option<String>, Option<f64>) {
    parse_leader(Some(raw)).into_pair()
}

fn parse_stat(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_stat() {
        assert_eq!(
            extract_player_stat("LeBron James: 28"),
            (Some("LeBron James".to_string()), Some(28.0))
        );
        assert_eq!(
            extract_player_stat("  Nikola Jokic :12.5 "),
            (Some("Nikola Jokic".to_string()), Some(12.5))
        );
    }

    #[test]
    fn empty_and_missing_are_absent() {
        assert_eq!(parse_leader(None), LeaderCell::Absent);
        assert_eq!(parse_leader(Some("")), LeaderCell::Absent);
        assert_eq!(parse_leader(Some("   ")), LeaderCell::Absent);
        assert_eq!(parse_leader(Some("NaN")), LeaderCell::Absent);
        assert_eq!(extract_player_stat(""), (None, None));
    }

    #[test]
    fn separator_count_must_be_one() {
        assert_eq!(parse_leader(Some("BadFormat")), LeaderCell::Malformed);
        assert_eq!(parse_leader(Some("A: 1: 2")), LeaderCell::Malformed);
        assert_eq!(extract_player_stat("BadFormat"), (None, None));
    }

    #[test]
    fn non_numeric_stat_keeps_name() {
        assert_eq!(
            parse_leader(Some("Player: abc")),
            LeaderCell::Player {
                name: "Player".to_string(),
                stat: None
            }
        );
        assert_eq!(extract_player_stat("Player: nan"), (Some("Player".to_string()), None));
    }
}
