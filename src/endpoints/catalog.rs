use crate::client::OverfastClient;
use crate::error::OverstatsError;
use crate::models::catalog::{HeroReference, MapReference, RoleReference};
use crate::models::profile::Role;

impl OverfastClient {
    /// Hero catalog in the client's locale, optionally limited to one role.
    pub async fn heroes(&self, role: Option<Role>) -> Result<Vec<HeroReference>, OverstatsError> {
        let mut query = vec![("locale", self.locale.as_str())];
        if let Some(role) = role {
            query.push(("role", role.key()));
        }
        let url = self.url(&["heroes"], &query);
        self.get_json(url, |_| "Fetch Heroes error!".to_string()).await
    }

    /// Map catalog, optionally limited to one game mode.
    pub async fn maps(&self, gamemode: Option<&str>) -> Result<Vec<MapReference>, OverstatsError> {
        let query: Vec<(&str, &str)> = gamemode.map(|g| vec![("gamemode", g)]).unwrap_or_default();
        let url = self.url(&["maps"], &query);
        self.get_json(url, |_| "Failed to fetch maps".to_string()).await
    }

    /// Role catalog, used for role icons.
    pub async fn roles(&self) -> Result<Vec<RoleReference>, OverstatsError> {
        let url = self.url(&["roles"], &[("locale", self.locale.as_str())]);
        self.get_json(url, |_| "Fetch Roles Icons error!".to_string()).await
    }
}
