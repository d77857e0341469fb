use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::blocking::Client;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const ESPN_NBA_SCOREBOARD_URL: &str =
    "https://site.api.espn.com/apis/site/v2/sports/basketball/nba/scoreboard";

const USER_AGENT: &str = concat!("nba_leaders/", env!("CARGO_PKG_VERSION"));

/// One game from the scoreboard payload. Every member is optional so a
/// partially populated event still deserializes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreboardEvent {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub competitions: Vec<Competition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Competition {
    #[serde(default, deserialize_with = "null_as_default")]
    pub competitors: Vec<Competitor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Competitor {
    #[serde(default)]
    pub team: Option<Team>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub score: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub leaders: Vec<LeaderCategory>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Team {
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaderCategory {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub leaders: Vec<LeaderEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaderEntry {
    #[serde(rename = "displayValue", default)]
    pub display_value: Option<String>,
    #[serde(default)]
    pub athlete: Option<Athlete>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Athlete {
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
}

impl ScoreboardEvent {
    pub fn first_competition(&self) -> Option<&Competition> {
        self.competitions.first()
    }
}

impl Competitor {
    pub fn team_name(&self) -> Option<&str> {
        self.team.as_ref()?.display_name.as_deref()
    }
}

impl LeaderCategory {
    /// Only the first ranked leader counts.
    pub fn top_leader(&self) -> Option<&LeaderEntry> {
        self.leaders.first()
    }
}

impl LeaderEntry {
    pub fn athlete_name(&self) -> Option<&str> {
        self.athlete.as_ref()?.display_name.as_deref()
    }
}

/// Blocking scoreboard endpoint client. One GET per fetch, no retries.
pub struct ScoreboardClient {
    http: Client,
    url: String,
}

impl ScoreboardClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build scoreboard http client")?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn fetch(&self) -> Result<Vec<ScoreboardEvent>> {
        let resp = self
            .http
            .get(&self.url)
            .send()
            .with_context(|| format!("scoreboard request failed: {}", self.url))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!(
                "failed to fetch scoreboard: http {}",
                status.as_u16()
            ));
        }
        let body = resp.text().context("failed reading scoreboard body")?;
        parse_scoreboard_json(&body)
    }
}

/// Events that fail to deserialize are skipped instead of failing the
/// whole payload.
pub fn parse_scoreboard_json(raw: &str) -> Result<Vec<ScoreboardEvent>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }

    let root: Value = serde_json::from_str(trimmed).context("invalid scoreboard json")?;
    let Some(events) = root.get("events").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    let mut out = Vec::with_capacity(events.len());
    for (idx, raw_event) in events.iter().enumerate() {
        match ScoreboardEvent::deserialize(raw_event) {
            Ok(event) => out.push(event),
            Err(err) => log::debug!("skipping scoreboard event #{idx}: {err}"),
        }
    }
    Ok(out)
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
