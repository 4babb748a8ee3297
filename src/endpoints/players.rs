use crate::client::{normalize_player_id, OverfastClient};
use crate::error::OverstatsError;
use crate::models::profile::{PlayerProfile, PlayerSummary};
use crate::models::stats::PlayerStatsSummary;

const PLAYER_NOT_FOUND: &str = "Player not found!";

fn player_segment(raw_id: &str) -> Result<String, OverstatsError> {
    let id = normalize_player_id(raw_id);
    if id.is_empty() {
        return Err(OverstatsError::MissingPlayerId);
    }
    Ok(id)
}

impl OverfastClient {
    /// Player summary: name, avatar, endorsement and current ranks.
    pub async fn player_summary(&self, raw_id: &str) -> Result<PlayerSummary, OverstatsError> {
        let id = player_segment(raw_id)?;
        let url = self.url(&["players", id.as_str(), "summary"], &[]);
        self.get_json(url, |_| PLAYER_NOT_FOUND.to_string()).await
    }

    /// Full profile: summary plus career stats and heroes comparisons.
    pub async fn player_profile(&self, raw_id: &str) -> Result<PlayerProfile, OverstatsError> {
        let id = player_segment(raw_id)?;
        let url = self.url(&["players", id.as_str()], &[]);
        self.get_json(url, |_| PLAYER_NOT_FOUND.to_string()).await
    }

    /// Aggregated general, per-role and per-hero stats.
    pub async fn player_stats_summary(
        &self,
        raw_id: &str,
    ) -> Result<PlayerStatsSummary, OverstatsError> {
        let id = player_segment(raw_id)?;
        let url = self.url(&["players", id.as_str(), "stats", "summary"], &[]);
        self.get_json(url, |status| {
            format!("Failed to fetch stats (Status: {status})")
        })
        .await
    }
}
