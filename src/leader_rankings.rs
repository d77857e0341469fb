use std::collections::BTreeMap;

use crate::leaders::{LeaderCell, parse_leader};
use crate::normalize::{EventRow, LeaderColumn, Side, StatCategory};

/// Appearances and mean stat for one player within one leader column.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerAggregate {
    pub player: String,
    pub count: usize,
    /// `None` when none of the appearances carried a numeric stat.
    pub avg_stat: Option<f64>,
}

/// One player's line in a category ranking across both teams.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderRanking {
    pub player: String,
    pub total_count: usize,
    pub overall_avg_stat: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaderReport {
    pub scorers: Vec<LeaderRanking>,
    pub rebounders: Vec<LeaderRanking>,
    pub assists: Vec<LeaderRanking>,
}

impl LeaderReport {
    pub fn from_rows(rows: &[EventRow]) -> Self {
        Self {
            scorers: category_ranking(rows, StatCategory::Points),
            rebounders: category_ranking(rows, StatCategory::Rebounds),
            assists: category_ranking(rows, StatCategory::Assists),
        }
    }

    pub fn get(&self, category: StatCategory) -> &[LeaderRanking] {
        match category {
            StatCategory::Points => &self.scorers,
            StatCategory::Rebounds => &self.rebounders,
            StatCategory::Assists => &self.assists,
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    count: usize,
    stat_sum: f64,
    stat_n: usize,
}

impl Tally {
    fn mean(&self) -> Option<f64> {
        (self.stat_n > 0).then(|| self.stat_sum / self.stat_n as f64)
    }
}

/// Parses every row's cell in `column`; absent and malformed cells are
/// skipped. Rows are only read.
pub fn aggregate_column(rows: &[EventRow], column: LeaderColumn) -> Vec<PlayerAggregate> {
    let pairs = rows
        .iter()
        .filter_map(|row| match parse_leader(Some(row.leader(column))) {
            LeaderCell::Player { name, stat } if !name.is_empty() => Some((name, stat)),
            _ => None,
        });
    aggregate_pairs(pairs)
}

/// Groups `(player, stat)` pairs by player, in player-name order.
pub fn aggregate_pairs<I>(pairs: I) -> Vec<PlayerAggregate>
where
    I: IntoIterator<Item = (String, Option<f64>)>,
{
    let mut by_player: BTreeMap<String, Tally> = BTreeMap::new();
    for (player, stat) in pairs {
        let tally = by_player.entry(player).or_default();
        tally.count += 1;
        if let Some(stat) = stat {
            tally.stat_sum += stat;
            tally.stat_n += 1;
        }
    }

    by_player
        .into_iter()
        .map(|(player, tally)| PlayerAggregate {
            avg_stat: tally.mean(),
            count: tally.count,
            player,
        })
        .collect()
}

/// Sums counts and takes the plain mean of the per-team averages (not
/// weighted by count). Sorted by `total_count` descending; ties stay in
/// player-name order.
pub fn combine_team_aggregates(
    team1: &[PlayerAggregate],
    team2: &[PlayerAggregate],
) -> Vec<LeaderRanking> {
    let mut by_player: BTreeMap<&str, (usize, Vec<f64>)> = BTreeMap::new();
    for agg in team1.iter().chain(team2) {
        let entry = by_player.entry(agg.player.as_str()).or_default();
        entry.0 += agg.count;
        if let Some(avg) = agg.avg_stat {
            entry.1.push(avg);
        }
    }

    let mut ranking = by_player
        .into_iter()
        .map(|(player, (total_count, avgs))| LeaderRanking {
            player: player.to_string(),
            total_count,
            overall_avg_stat: mean(&avgs),
        })
        .collect::<Vec<_>>();
    ranking.sort_by(|a, b| b.total_count.cmp(&a.total_count));
    ranking
}

pub fn category_ranking(rows: &[EventRow], category: StatCategory) -> Vec<LeaderRanking> {
    let team1 = aggregate_column(rows, LeaderColumn::new(Side::Team1, category));
    let team2 = aggregate_column(rows, LeaderColumn::new(Side::Team2, category));
    combine_team_aggregates(&team1, &team2)
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
