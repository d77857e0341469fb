use serde::{Deserialize, Serialize};

use crate::scoreboard_fetch::{Competitor, ScoreboardEvent};

/// Format of `collection_timestamp`, UTC.
pub const COLLECTION_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One flattened event per fetch cycle. Field order is the CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRow {
    pub collection_timestamp: String,
    pub event_id: String,
    pub event_name: String,
    pub event_date: String,
    pub team1: String,
    pub score1: String,
    pub team2: String,
    pub score2: String,
    pub team1_top_scorer: String,
    pub team1_top_rebounder: String,
    pub team1_top_assist: String,
    pub team2_top_scorer: String,
    pub team2_top_rebounder: String,
    pub team2_top_assist: String,
}

impl EventRow {
    pub fn dedup_key(&self) -> (&str, &str) {
        (&self.event_id, &self.collection_timestamp)
    }

    pub fn leader(&self, column: LeaderColumn) -> &str {
        match (column.side, column.category) {
            (Side::Team1, StatCategory::Points) => &self.team1_top_scorer,
            (Side::Team1, StatCategory::Rebounds) => &self.team1_top_rebounder,
            (Side::Team1, StatCategory::Assists) => &self.team1_top_assist,
            (Side::Team2, StatCategory::Points) => &self.team2_top_scorer,
            (Side::Team2, StatCategory::Rebounds) => &self.team2_top_rebounder,
            (Side::Team2, StatCategory::Assists) => &self.team2_top_assist,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatCategory {
    Points,
    Rebounds,
    Assists,
}

impl StatCategory {
    pub const ALL: [StatCategory; 3] = [
        StatCategory::Points,
        StatCategory::Rebounds,
        StatCategory::Assists,
    ];

    /// Maps a scoreboard leader category name; anything else is dropped.
    pub fn from_leader_name(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "points" => Some(StatCategory::Points),
            "rebounds" => Some(StatCategory::Rebounds),
            "assists" => Some(StatCategory::Assists),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatCategory::Points => "Top Scorers",
            StatCategory::Rebounds => "Top Rebounders",
            StatCategory::Assists => "Top Assist Providers",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Team1,
    Team2,
}

/// One of the six `teamN_top_*` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeaderColumn {
    pub side: Side,
    pub category: StatCategory,
}

impl LeaderColumn {
    pub const fn new(side: Side, category: StatCategory) -> Self {
        Self { side, category }
    }

    pub fn name(self) -> &'static str {
        match (self.side, self.category) {
            (Side::Team1, StatCategory::Points) => "team1_top_scorer",
            (Side::Team1, StatCategory::Rebounds) => "team1_top_rebounder",
            (Side::Team1, StatCategory::Assists) => "team1_top_assist",
            (Side::Team2, StatCategory::Points) => "team2_top_scorer",
            (Side::Team2, StatCategory::Rebounds) => "team2_top_rebounder",
            (Side::Team2, StatCategory::Assists) => "team2_top_assist",
        }
    }

    pub fn from_name(raw: &str) -> Option<Self> {
        [Side::Team1, Side::Team2]
            .into_iter()
            .flat_map(|side| StatCategory::ALL.map(|category| Self::new(side, category)))
            .find(|column| column.name() == raw)
    }
}

pub fn normalize_events(events: &[ScoreboardEvent], collected_at: &str) -> Vec<EventRow> {
    events
        .iter()
        .filter_map(|event| {
            let row = normalize_event(event, collected_at);
            if row.is_none() {
                log::debug!(
                    "skipping event {}: fewer than two competitors",
                    event.id.as_deref().unwrap_or("?")
                );
            }
            row
        })
        .collect()
}

/// `None` when the first competition is missing or has fewer than two
/// competitors.
pub fn normalize_event(event: &ScoreboardEvent, collected_at: &str) -> Option<EventRow> {
    let competition = event.first_competition()?;
    let [first, second, ..] = competition.competitors.as_slice() else {
        return None;
    };

    let team1_leaders = team_leaders(first);
    let team2_leaders = team_leaders(second);

    Some(EventRow {
        collection_timestamp: collected_at.to_string(),
        event_id: event.id.clone().unwrap_or_default(),
        event_name: event.name.clone().unwrap_or_default(),
        event_date: event.date.clone().unwrap_or_default(),
        team1: first.team_name().unwrap_or_default().to_string(),
        score1: first.score.clone().unwrap_or_default(),
        team2: second.team_name().unwrap_or_default().to_string(),
        score2: second.score.clone().unwrap_or_default(),
        team1_top_scorer: team1_leaders.points,
        team1_top_rebounder: team1_leaders.rebounds,
        team1_top_assist: team1_leaders.assists,
        team2_top_scorer: team2_leaders.points,
        team2_top_rebounder: team2_leaders.rebounds,
        team2_top_assist: team2_leaders.assists,
    })
}

#[derive(Debug, Default)]
struct TeamLeaders {
    points: String,
    rebounds: String,
    assists: String,
}

impl TeamLeaders {
    fn slot_mut(&mut self, category: StatCategory) -> &mut String {
        match category {
            StatCategory::Points => &mut self.points,
            StatCategory::Rebounds => &mut self.rebounds,
            StatCategory::Assists => &mut self.assists,
        }
    }
}

fn team_leaders(competitor: &Competitor) -> TeamLeaders {
    let mut out = TeamLeaders::default();
    for category in &competitor.leaders {
        let Some(kind) = category
            .name
            .as_deref()
            .and_then(StatCategory::from_leader_name)
        else {
            continue;
        };
        let Some(top) = category.top_leader() else {
            continue;
        };
        let player = top.athlete_name().unwrap_or_default();
        let value = top.display_value.as_deref().unwrap_or_default();
        log::debug!(
            "top {:?} for {}: {player} ({value})",
            kind,
            competitor.team_name().unwrap_or("?")
        );
        // Repeated categories: last one wins.
        *out.slot_mut(kind) = format_leader(player, value);
    }
    out
}

pub fn format_leader(player: &str, value: &str) -> String {
    format!("{player}: {value}")
}
