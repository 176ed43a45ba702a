//! The Odds API `/scores` feed.

use async_trait::async_trait;
use serde::Deserialize;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};
use tracing::debug;

use super::provider::{FetchWindow, ScoreProvider, UpstreamUnavailable};
use super::record::{canonical_id, ScoreRecord, TeamScore};
use crate::config::scores::SportSource;

pub const ODDS_API_BASE: &str = "https://api.the-odds-api.com/v4";
const PROVIDER: &str = "odds";
/// The API rejects larger look-backs.
const MAX_DAYS_FROM: i64 = 3;

#[derive(Debug, Deserialize)]
struct OddsGame {
    id: String,
    commence_time: String,
    #[serde(default)]
    completed: bool,
    home_team: String,
    away_team: String,
    #[serde(default)]
    scores: Option<Vec<OddsScore>>,
    #[serde(default)]
    last_update: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OddsScore {
    name: String,
    score: String,
}

pub struct OddsApiProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    sport: SportSource,
    source_key: String,
}

impl OddsApiProvider {
    pub fn new(http: reqwest::Client, sport: SportSource, api_key: Option<String>) -> Self {
        let source_key = format!("{PROVIDER}:{}", sport.odds_key);
        Self {
            http,
            base_url: ODDS_API_BASE.to_string(),
            api_key,
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
impl ScoreProvider for OddsApiProvider {
    fn source_key(&self) -> &str {
        &self.source_key
    }

    /// One request per refresh: the oldest window's `daysFrom` already covers
    /// every later day plus live and upcoming games.
    fn plan_windows(&self, windows: &[FetchWindow]) -> Vec<FetchWindow> {
        windows.iter().min().copied().into_iter().collect()
    }

    async fn fetch_window(
        &self,
        window: FetchWindow,
    ) -> Result<Vec<ScoreRecord>, UpstreamUnavailable> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(UpstreamUnavailable::NotConfigured("THE_ODDS_API_KEY"))?;

        let url = format!("{}/sports/{}/scores", self.base_url, self.sport.odds_key);
        let mut query: Vec<(&str, String)> = vec![
            ("apiKey", api_key.to_string()),
            ("dateFormat", "iso".to_string()),
        ];
        if let Some(days) = days_from(window.date, OffsetDateTime::now_utc().date()) {
            query.push(("daysFrom", days.to_string()));
        }

        let resp = self.http.get(&url).query(&query).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(UpstreamUnavailable::Status(status.as_u16()));
        }

        let body = resp.text().await?;
        let records = parse_scores(&body, &self.sport)?;
        debug!(source = %self.source_key, date = %window.date, count = records.len(), "odds api fetched");
        Ok(records)
    }
}

/// `daysFrom` for a window: past days map to a bounded look-back, today and
/// later need none (the feed always includes live and upcoming games).
pub fn days_from(window: Date, today: Date) -> Option<i64> {
    let days_ago = (today - window).whole_days();
    (days_ago > 0).then(|| days_ago.clamp(1, MAX_DAYS_FROM))
}

/// Parse a `/scores` response body.
///
/// Games with an unparseable start time are skipped; a body that is not a
/// game list is an error.
pub fn parse_scores(
    body: &str,
    sport: &SportSource,
) -> Result<Vec<ScoreRecord>, UpstreamUnavailable> {
    let games: Vec<OddsGame> = serde_json::from_str(body)?;

    Ok(games
        .into_iter()
        .filter_map(|game| to_record(game, sport))
        .collect())
}

fn to_record(game: OddsGame, sport: &SportSource) -> Option<ScoreRecord> {
    let start_time = match OffsetDateTime::parse(&game.commence_time, &Rfc3339) {
        Ok(t) => t,
        Err(e) => {
            debug!(game = %game.id, error = %e, "skipping game with bad commence_time");
            return None;
        }
    };
    let last_update = game
        .last_update
        .as_deref()
        .and_then(|s| OffsetDateTime::parse(s, &Rfc3339).ok());
    let scoreline = game
        .scores
        .and_then(|scores| order_scoreline(scores, &game.home_team, &game.away_team));

    Some(ScoreRecord {
        id: canonical_id(PROVIDER, &sport.odds_key, &game.id),
        sport: sport.label.clone(),
        source_key: sport.odds_key.clone(),
        home_team: game.home_team,
        away_team: game.away_team,
        start_time,
        completed: game.completed,
        scoreline,
        last_update,
    })
}

/// The feed does not promise an order; put the home team first.
fn order_scoreline(scores: Vec<OddsScore>, home: &str, away: &str) -> Option<[TeamScore; 2]> {
    let find = |team: &str| {
        scores
            .iter()
            .find(|s| s.name == team)
            .map(|s| TeamScore::new(s.name.clone(), s.score.clone()))
    };

    match (find(home), find(away)) {
        (Some(h), Some(a)) => Some([h, a]),
        _ => {
            let mut it = scores.into_iter();
            match (it.next(), it.next()) {
                (Some(h), Some(a)) => Some([
                    TeamScore::new(h.name, h.score),
                    TeamScore::new(a.name, a.score),
                ]),
                _ => None,
            }
        }
    }
}
