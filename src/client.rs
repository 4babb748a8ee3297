use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::OverstatsError;

/// Separator the remote API reserves inside player identifiers.
const ID_SEPARATOR: char = '#';

#[derive(Clone)]
pub struct OverfastClient {
    pub(crate) http: Client,
    pub(crate) base: Url,
    pub(crate) locale: String,
}

impl OverfastClient {
    pub fn new(config: &Config) -> Result<Self, OverstatsError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("overstats/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base = Url::parse(&config.api_url)
            .map_err(|e| OverstatsError::Config(format!("OVERSTATS_API_URL: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(OverstatsError::Config(format!(
                "OVERSTATS_API_URL: {} is not a base URL",
                config.api_url
            )));
        }

        Ok(Self {
            http,
            base,
            locale: config.locale.clone(),
        })
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Build an endpoint URL. Segments are percent-encoded, so `#` and
    /// spaces in identifiers can never leak into the fragment or query.
    pub(crate) fn url(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    /// GET `url` and decode the JSON body. A non-success status becomes
    /// [`OverstatsError::Api`] carrying the body's `message`, or `fallback`
    /// when the body has none.
    pub(crate) async fn get_json<T, F>(&self, url: Url, fallback: F) -> Result<T, OverstatsError>
    where
        T: DeserializeOwned,
        F: FnOnce(u16) -> String,
    {
        tracing::debug!(%url, "GET");
        let resp = self
            .http
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status();
        let body = resp.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
                .unwrap_or_else(|| fallback(status.as_u16()));
            tracing::warn!(%url, status = status.as_u16(), %message, "remote API error");
            return Err(OverstatsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

/// Turn a BattleTag such as `Player#1234` into the API's path form
/// `Player-1234`.
pub fn normalize_player_id(raw: &str) -> String {
    raw.trim().replace(ID_SEPARATOR, "-")
}
