//! Score feed configuration, read from the environment at startup.

use std::env;
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::time::Duration;

use crate::error::AppError;

/// Which upstream families serve the score feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OddsApi,
    Espn,
    /// Both families, fanned out side by side
    All,
}

impl ProviderKind {
    pub fn uses_odds_api(self) -> bool {
        matches!(self, Self::OddsApi | Self::All)
    }

    pub fn uses_espn(self) -> bool {
        matches!(self, Self::Espn | Self::All)
    }
}

/// One sport as addressed by each upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SportSource {
    pub label: String,
    pub odds_key: String,
    pub espn_path: String,
}

impl SportSource {
    fn new(label: &str, odds_key: &str, espn_path: &str) -> Self {
        Self {
            label: label.to_string(),
            odds_key: odds_key.to_string(),
            espn_path: espn_path.to_string(),
        }
    }
}

/// The sports the platform runs competitions on.
pub fn default_sports() -> Vec<SportSource> {
    vec![
        SportSource::new("NBA", "basketball_nba", "basketball/nba"),
        SportSource::new("NFL", "americanfootball_nfl", "football/nfl"),
        SportSource::new("AFL", "aussierules_afl", "australian-football/afl"),
        SportSource::new("NRL", "rugbyleague_nrl", "rugby-league/3"),
        SportSource::new("Premier League", "soccer_epl", "soccer/eng.1"),
        SportSource::new("MLS", "soccer_usa_mls", "soccer/usa.1"),
    ]
}

pub const DEFAULT_MAX_TTL: Duration = Duration::from_secs(60 * 60);
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_millis(8_000);
pub const DEFAULT_LOOKBACK_DAYS: u32 = 3;
pub const DEFAULT_LOOKAHEAD_DAYS: u32 = 1;

/// Accepted ranges; anything outside is a startup error.
const MAX_TTL_SECS: RangeInclusive<u64> = 1..=24 * 60 * 60;
const FETCH_TIMEOUT_MS: RangeInclusive<u64> = 1..=60_000;
const WINDOW_DAYS: RangeInclusive<u32> = 0..=14;

#[derive(Debug, Clone)]
pub struct ScoresConfig {
    pub provider: ProviderKind,
    pub odds_api_key: Option<String>,
    /// Ceiling on how long an aggregated view stays fresh
    pub max_ttl: Duration,
    pub lookback_days: u32,
    pub lookahead_days: u32,
    /// Applied to each upstream fetch independently
    pub fetch_timeout: Duration,
    pub sports: Vec<SportSource>,
}

impl Default for ScoresConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Espn,
            odds_api_key: None,
            max_ttl: DEFAULT_MAX_TTL,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            lookahead_days: DEFAULT_LOOKAHEAD_DAYS,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            sports: default_sports(),
        }
    }
}

impl ScoresConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let odds_api_key = lookup("THE_ODDS_API_KEY").filter(|k| !k.trim().is_empty());

        let provider = match lookup("SCORES_PROVIDER").as_deref().map(str::trim) {
            None | Some("") => {
                if odds_api_key.is_some() {
                    ProviderKind::All
                } else {
                    ProviderKind::Espn
                }
            }
            Some(v) if v.eq_ignore_ascii_case("all") => ProviderKind::All,
            Some(v) if v.eq_ignore_ascii_case("odds") => ProviderKind::OddsApi,
            Some(v) if v.eq_ignore_ascii_case("espn") => ProviderKind::Espn,
            Some(other) => {
                return Err(AppError::config(format!(
                    "SCORES_PROVIDER must be 'all', 'odds' or 'espn', got '{other}'"
                )))
            }
        };

        if provider.uses_odds_api() && odds_api_key.is_none() {
            return Err(AppError::config(format!(
                "SCORES_PROVIDER={} requires THE_ODDS_API_KEY",
                if provider == ProviderKind::All { "all" } else { "odds" }
            )));
        }

        let max_ttl = Duration::from_secs(parse_in(
            &lookup,
            "SCORES_MAX_TTL_SECS",
            DEFAULT_MAX_TTL.as_secs(),
            MAX_TTL_SECS,
        )?);
        let fetch_timeout = Duration::from_millis(parse_in(
            &lookup,
            "SCORES_FETCH_TIMEOUT_MS",
            DEFAULT_FETCH_TIMEOUT.as_millis() as u64,
            FETCH_TIMEOUT_MS,
        )?);
        let lookback_days = parse_in(
            &lookup,
            "SCORES_LOOKBACK_DAYS",
            DEFAULT_LOOKBACK_DAYS,
            WINDOW_DAYS,
        )?;
        let lookahead_days = parse_in(
            &lookup,
            "SCORES_LOOKAHEAD_DAYS",
            DEFAULT_LOOKAHEAD_DAYS,
            WINDOW_DAYS,
        )?;

        Ok(Self {
            provider,
            odds_api_key,
            max_ttl,
            lookback_days,
            lookahead_days,
            fetch_timeout,
            sports: default_sports(),
        })
    }
}

fn parse_in<F, T>(lookup: &F, name: &str, default: T, range: RangeInclusive<T>) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialOrd + Display,
{
    let Some(raw) = lookup(name) else {
        return Ok(default);
    };
    let value: T = raw
        .trim()
        .parse()
        .map_err(|_| AppError::config(format!("{name} must be a non-negative integer, got '{raw}'")))?;
    if !range.contains(&value) {
        return Err(AppError::config(format!(
            "{name} must be between {} and {}, got {value}",
            range.start(),
            range.end()
        )));
    }
    Ok(value)
}
