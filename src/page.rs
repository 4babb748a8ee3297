//! Load state for each view region and the page orchestration on top of it.
//!
//! Every fetch is started with [`Loader::begin`], which hands out a
//! [`RequestToken`]. A result is only applied when its token is still the
//! latest one, so a slow response for an old player can never overwrite the
//! current view.

use serde::ser::{Serialize, Serializer};

use crate::client::{normalize_player_id, OverfastClient};
use crate::error::OverstatsError;
use crate::listing::{filter_maps, group_heroes_by_role, role_icons, HeroGroup};
use crate::models::catalog::{HeroReference, MapReference, RoleReference};
use crate::models::profile::PlayerProfile;
use crate::models::stats::PlayerStatsSummary;
use crate::normalizer::{normalize, NormalizeOptions, PlayerStatsView};
use crate::view::{summary_sections, StatSection};

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "state", content = "data", rename_all = "lowercase")]
pub enum LoadState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

#[derive(Debug)]
pub struct Loader<T> {
    generation: u64,
    state: LoadState<T>,
}

impl<T> Default for Loader<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            state: LoadState::Idle,
        }
    }
}

impl<T> Loader<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> RequestToken {
        self.generation += 1;
        self.state = LoadState::Loading;
        RequestToken(self.generation)
    }

    /// Apply `result` if `token` is current. Returns whether it was applied.
    pub fn finish(&mut self, token: RequestToken, result: Result<T, OverstatsError>) -> bool {
        if token.0 != self.generation {
            tracing::debug!(stale = token.0, current = self.generation, "dropping stale response");
            return false;
        }
        self.state = match result {
            Ok(value) => LoadState::Loaded(value),
            Err(e) => {
                tracing::warn!(error = %e, "load failed");
                LoadState::Failed(e.to_string())
            }
        };
        true
    }

    /// Back to idle; any request still in flight becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = LoadState::Idle;
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn loaded(&self) -> Option<&T> {
        match &self.state {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }
}

impl<T: Serialize> Serialize for Loader<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.state.serialize(serializer)
    }
}

/// Tokens for one player page load.
#[derive(Debug, Clone)]
pub struct PlayerRequest {
    pub player_id: String,
    profile: RequestToken,
    stats: RequestToken,
    heroes: RequestToken,
}

#[derive(Debug)]
pub struct PlayerResponse {
    request: PlayerRequest,
    profile: Result<PlayerProfile, OverstatsError>,
    stats: Result<PlayerStatsSummary, OverstatsError>,
    heroes: Result<Vec<HeroReference>, OverstatsError>,
}

/// Player page: profile view, stats sections and the hero catalog used to
/// decorate the profile. Each region loads and fails on its own.
#[derive(Debug, Default, serde::Serialize)]
pub struct PlayerPage {
    pub player_id: Option<String>,
    pub profile: Loader<PlayerStatsView>,
    pub stats: Loader<Vec<StatSection>>,
    pub heroes: Loader<Vec<HeroReference>>,
}

impl PlayerPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load for `raw_id`. Earlier loads still in flight become stale.
    pub fn begin(&mut self, raw_id: &str) -> PlayerRequest {
        let player_id = normalize_player_id(raw_id);
        self.player_id = Some(player_id.clone()).filter(|id| !id.is_empty());
        PlayerRequest {
            player_id,
            profile: self.profile.begin(),
            stats: self.stats.begin(),
            heroes: self.heroes.begin(),
        }
    }

    /// Issue the page's requests concurrently. Does not touch page state.
    pub async fn fetch(client: &OverfastClient, request: PlayerRequest) -> PlayerResponse {
        let id = request.player_id.as_str();
        let (profile, stats, heroes) = tokio::join!(
            client.player_profile(id),
            client.player_stats_summary(id),
            client.heroes(None),
        );
        PlayerResponse {
            request,
            profile,
            stats,
            heroes,
        }
    }

    /// Apply a response. Returns false when every region had moved on.
    pub fn apply(&mut self, response: PlayerResponse, options: NormalizeOptions) -> bool {
        let PlayerResponse {
            request,
            profile,
            stats,
            heroes,
        } = response;

        let decoration: &[HeroReference] = heroes.as_deref().unwrap_or(&[]);
        let profile = profile.map(|p| normalize(&p, decoration, options));
        let stats = stats.map(|s| summary_sections(&s));

        let applied_profile = self.profile.finish(request.profile, profile);
        let applied_stats = self.stats.finish(request.stats, stats);
        let applied_heroes = self.heroes.finish(request.heroes, heroes);
        applied_profile || applied_stats || applied_heroes
    }

    pub async fn load(&mut self, client: &OverfastClient, raw_id: &str, options: NormalizeOptions) {
        let request = self.begin(raw_id);
        let response = Self::fetch(client, request).await;
        self.apply(response, options);
    }

    /// Leaving the page: drop whatever is still loading.
    pub fn reset(&mut self) {
        self.player_id = None;
        self.profile.reset();
        self.stats.reset();
        self.heroes.reset();
    }
}

#[derive(Debug, Default, serde::Serialize)]
pub struct HeroesPage {
    pub heroes: Loader<Vec<HeroReference>>,
    pub roles: Loader<Vec<RoleReference>>,
}

impl HeroesPage {
    pub async fn load(&mut self, client: &OverfastClient) {
        let heroes_token = self.heroes.begin();
        let roles_token = self.roles.begin();
        let (heroes, roles) = tokio::join!(client.heroes(None), client.roles());
        self.heroes.finish(heroes_token, heroes);
        self.roles.finish(roles_token, roles);
    }

    /// Grouped listing for `query`. Role icons are optional decoration.
    pub fn listing(&self, query: &str) -> Vec<HeroGroup> {
        let icons = self.roles.loaded().map(|r| role_icons(r)).unwrap_or_default();
        let heroes = self.heroes.loaded().map(Vec::as_slice).unwrap_or(&[]);
        group_heroes_by_role(heroes, query, &icons)
    }
}

#[derive(Debug, Default, serde::Serialize)]
pub struct MapsPage {
    pub maps: Loader<Vec<MapReference>>,
}

impl MapsPage {
    pub async fn load(&mut self, client: &OverfastClient) {
        let token = self.maps.begin();
        let maps = client.maps(None).await;
        self.maps.finish(token, maps);
    }

    pub fn filtered(&self, query: &str, gamemode: Option<&str>) -> Vec<&MapReference> {
        self.maps
            .loaded()
            .map(|maps| filter_maps(maps, query, gamemode))
            .unwrap_or_default()
    }
}
