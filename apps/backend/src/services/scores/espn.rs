//! ESPN public scoreboard feed. No API key required.

use async_trait::async_trait;
use serde::Deserialize;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::debug;

use super::provider::{FetchWindow, ScoreProvider, UpstreamUnavailable};
use super::record::{canonical_id, ScoreRecord, TeamScore};
use crate::config::scores::SportSource;

pub const ESPN_BASE: &str = "https://site.api.espn.com/apis/site/v2/sports";
const PROVIDER: &str = "espn";

// ── ESPN JSON deserialization structs ────────────────────────────

#[derive(Debug, Deserialize)]
struct EspnResponse {
    #[serde(default)]
    events: Vec<EspnEvent>,
}

#[derive(Debug, Deserialize)]
struct EspnEvent {
    id: String,
    date: String,
    #[serde(default)]
    competitions: Vec<EspnCompetition>,
}

#[derive(Debug, Deserialize)]
struct EspnCompetition {
    competitors: Vec<EspnCompetitor>,
    status: EspnStatus,
}

#[derive(Debug, Deserialize)]
struct EspnCompetitor {
    team: EspnTeam,
    #[serde(rename = "homeAway")]
    home_away: String,
    score: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EspnTeam {
    #[serde(rename = "displayName")]
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct EspnStatus {
    #[serde(rename = "type")]
    status_type: EspnStatusType,
}

#[derive(Debug, Deserialize)]
struct EspnStatusType {
    state: String,
    #[serde(default)]
    completed: bool,
}

// ── Client ──────────────────────────────────────────────────────

pub struct EspnScoreboardProvider {
    http: reqwest::Client,
    base_url: String,
    sport: SportSource,
    source_key: String,
}

impl EspnScoreboardProvider {
    pub fn new(http: reqwest::Client, sport: SportSource) -> Self {
        let source_key = format!("{PROVIDER}:{}", sport.espn_path);
        Self {
            http,
            base_url: ESPN_BASE.to_string(),
            sport,
            source_key,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl ScoreProvider for EspnScoreboardProvider {
    fn source_key(&self) -> &str {
        &self.source_key
    }

    async fn fetch_window(
        &self,
        window: FetchWindow,
    ) -> Result<Vec<ScoreRecord>, UpstreamUnavailable> {
        let url = format!("{}/{}/scoreboard", self.base_url, self.sport.espn_path);
        let dates = format!(
            "{:04}{:02}{:02}",
            window.date.year(),
            u8::from(window.date.month()),
            window.date.day()
        );

        // `dates=YYYYMMDD` scopes the scoreboard to one calendar day.
        let resp = self
            .http
            .get(&url)
            .query(&[("dates", dates)])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(UpstreamUnavailable::Status(status.as_u16()));
        }

        let body = resp.text().await?;
        let records = parse_scoreboard(&body, &self.sport)?;
        debug!(source = %self.source_key, date = %window.date, count = records.len(), "espn fetched");
        Ok(records)
    }
}

/// Parse a scoreboard body into records; events missing a home or away
/// competitor are skipped.
pub fn parse_scoreboard(
    body: &str,
    sport: &SportSource,
) -> Result<Vec<ScoreRecord>, UpstreamUnavailable> {
    let data: EspnResponse = serde_json::from_str(body)?;
    Ok(data
        .events
        .into_iter()
        .filter_map(|event| to_record(event, sport))
        .collect())
}

fn to_record(event: EspnEvent, sport: &SportSource) -> Option<ScoreRecord> {
    let start_time = parse_espn_date(&event.date)?;
    let comp = event.competitions.into_iter().next()?;

    let home = comp.competitors.iter().find(|c| c.home_away == "home")?;
    let away = comp.competitors.iter().find(|c| c.home_away == "away")?;

    let state = comp.status.status_type.state.as_str();
    let completed = comp.status.status_type.completed || state == "post";

    // Pre-game boards report "0" for both sides.
    let scoreline = match (state, &home.score, &away.score) {
        ("pre", _, _) => None,
        (_, Some(h), Some(a)) => Some([
            TeamScore::new(home.team.display_name.clone(), h.clone()),
            TeamScore::new(away.team.display_name.clone(), a.clone()),
        ]),
        _ => None,
    };

    Some(ScoreRecord {
        id: canonical_id(PROVIDER, &sport.espn_path, &event.id),
        sport: sport.label.clone(),
        source_key: sport.espn_path.clone(),
        home_team: home.team.display_name.clone(),
        away_team: away.team.display_name.clone(),
        start_time,
        completed,
        scoreline,
        last_update: None,
    })
}

/// ESPN omits seconds (`2026-10-17T23:30Z`); accept both forms.
fn parse_espn_date(raw: &str) -> Option<OffsetDateTime> {
    if let Ok(t) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(t);
    }
    let short = format_description!("[year]-[month]-[day]T[hour]:[minute]Z");
    PrimitiveDateTime::parse(raw, short)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}
