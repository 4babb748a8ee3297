use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::error::OverstatsError;
use crate::models::profile::{GameMode, Platform};
use crate::normalizer::HistoryTieBreak;

pub const DEFAULT_API_URL: &str = "https://overfast-api.tekrop.fr";
pub const DEFAULT_LOCALE: &str = "en-us";
pub const DEFAULT_BIND: &str = "127.0.0.1:9922";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub locale: String,
    pub timeout: Duration,
    pub platform: Platform,
    pub gamemode: GameMode,
    pub tie_break: HistoryTieBreak,
    pub bind: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            platform: Platform::Pc,
            gamemode: GameMode::Competitive,
            tie_break: HistoryTieBreak::SourceOrder,
            bind: SocketAddr::from(([127, 0, 0, 1], 9922)),
        }
    }
}

impl Config {
    /// Read configuration from `OVERSTATS_*` variables, loading `.env` first.
    pub fn from_env() -> Result<Self, OverstatsError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but reading from an arbitrary source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, OverstatsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(url) = non_empty(lookup("OVERSTATS_API_URL")) {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(locale) = non_empty(lookup("OVERSTATS_LOCALE")) {
            config.locale = locale;
        }
        if let Some(secs) = non_empty(lookup("OVERSTATS_TIMEOUT_SECS")) {
            let secs: u64 = secs
                .parse()
                .map_err(|_| OverstatsError::Config(format!("OVERSTATS_TIMEOUT_SECS: {secs}")))?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(v) = non_empty(lookup("OVERSTATS_PLATFORM")) {
            config.platform = parse_var("OVERSTATS_PLATFORM", &v)?;
        }
        if let Some(v) = non_empty(lookup("OVERSTATS_GAMEMODE")) {
            config.gamemode = parse_var("OVERSTATS_GAMEMODE", &v)?;
        }
        if let Some(v) = non_empty(lookup("OVERSTATS_HISTORY_TIE_BREAK")) {
            config.tie_break = parse_var("OVERSTATS_HISTORY_TIE_BREAK", &v)?;
        }
        if let Some(v) = non_empty(lookup("OVERSTATS_BIND")) {
            config.bind = v
                .parse()
                .map_err(|_| OverstatsError::Config(format!("OVERSTATS_BIND: {v}")))?;
        }

        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T, OverstatsError> {
    value
        .parse()
        .map_err(|_| OverstatsError::Config(format!("{key}: {value}")))
}
