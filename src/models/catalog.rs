use serde::{Deserialize, Deserializer, Serialize};

use crate::models::profile::Role;

/// Entry of the `/heroes` catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroReference {
    pub key: String,
    pub name: String,
    pub portrait: Option<String>,
    #[serde(default, deserialize_with = "known_role")]
    pub role: Option<Role>,
}

/// Roles outside tank/damage/support decode as `None`.
fn known_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|r| r.parse().ok()))
}

/// Entry of the `/maps` catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapReference {
    pub name: String,
    pub screenshot: Option<String>,
    #[serde(default)]
    pub gamemodes: Vec<String>,
    #[serde(default)]
    pub location: String,
    pub country_code: Option<String>,
}

/// Entry of the `/roles` catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleReference {
    pub key: String,
    pub name: String,
    pub icon: Option<String>,
    pub description: Option<String>,
}
