//! Hero and map catalog listings with search.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::catalog::{HeroReference, MapReference, RoleReference};
use crate::models::profile::Role;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroListEntry {
    pub hero: HeroReference,
    pub is_match: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroGroup {
    pub role: Role,
    pub icon: Option<String>,
    pub heroes: Vec<HeroListEntry>,
}

/// Split the catalog into Tank, Damage and Support groups. Heroes whose name
/// contains `query` move to the front of their group; the rest keep catalog
/// order. Heroes without a known role are left out.
pub fn group_heroes_by_role(
    heroes: &[HeroReference],
    query: &str,
    icons: &HashMap<String, String>,
) -> Vec<HeroGroup> {
    let query = query.trim().to_lowercase();

    Role::ALL
        .into_iter()
        .map(|role| {
            let mut entries: Vec<HeroListEntry> = heroes
                .iter()
                .filter(|h| h.role == Some(role))
                .map(|h| HeroListEntry {
                    hero: h.clone(),
                    is_match: !query.is_empty() && h.name.to_lowercase().contains(&query),
                })
                .collect();
            // sort_by_key is stable
            entries.sort_by_key(|e| !e.is_match);
            HeroGroup {
                role,
                icon: icons.get(role.display_name()).cloned(),
                heroes: entries,
            }
        })
        .collect()
}

/// Role display name to icon URL.
pub fn role_icons(roles: &[RoleReference]) -> HashMap<String, String> {
    roles
        .iter()
        .filter_map(|r| r.icon.as_ref().map(|icon| (r.name.clone(), icon.clone())))
        .collect()
}

/// Maps whose name or location contains `query`, limited to `gamemode` when
/// one is selected.
pub fn filter_maps<'a>(
    maps: &'a [MapReference],
    query: &str,
    gamemode: Option<&str>,
) -> Vec<&'a MapReference> {
    let query = query.trim().to_lowercase();
    let gamemode = gamemode.map(str::trim).filter(|g| !g.is_empty());

    maps.iter()
        .filter(|m| {
            m.name.to_lowercase().contains(&query) || m.location.to_lowercase().contains(&query)
        })
        .filter(|m| gamemode.map_or(true, |g| m.gamemodes.iter().any(|mode| mode == g)))
        .collect()
}
