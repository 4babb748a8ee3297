use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::profile::Role;

/// `/players/{id}/stats/summary`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerStatsSummary {
    pub general: Option<StatsBlock>,
    pub roles: Option<RoleStatsBlocks>,
    pub heroes: Option<HashMap<String, StatsBlock>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleStatsBlocks {
    pub tank: Option<StatsBlock>,
    pub damage: Option<StatsBlock>,
    pub support: Option<StatsBlock>,
}

impl RoleStatsBlocks {
    pub fn get(&self, role: Role) -> Option<&StatsBlock> {
        match role {
            Role::Tank => self.tank.as_ref(),
            Role::Damage => self.damage.as_ref(),
            Role::Support => self.support.as_ref(),
        }
    }
}

/// Aggregate block shared by the general, per-role and per-hero sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsBlock {
    pub games_played: Option<f64>,
    pub games_won: Option<f64>,
    pub games_lost: Option<f64>,
    pub time_played: Option<f64>,
    pub winrate: Option<f64>,
    pub kda: Option<f64>,
    pub total: Option<StatTotals>,
    pub average: Option<StatTotals>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatTotals {
    pub eliminations: Option<f64>,
    pub assists: Option<f64>,
    pub deaths: Option<f64>,
    pub damage: Option<f64>,
    pub healing: Option<f64>,
}
