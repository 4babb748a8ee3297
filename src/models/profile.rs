use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// One of the three team-composition roles tracked for competitive rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tank,
    Damage,
    Support,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Tank, Role::Damage, Role::Support];

    pub fn key(self) -> &'static str {
        match self {
            Role::Tank => "tank",
            Role::Damage => "damage",
            Role::Support => "support",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Role::Tank => "Tank",
            Role::Damage => "Damage",
            Role::Support => "Support",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown role {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Pc,
    Console,
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pc" => Ok(Platform::Pc),
            "console" => Ok(Platform::Console),
            other => Err(format!("unknown platform {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Quickplay,
    #[default]
    Competitive,
}

impl FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quickplay" => Ok(GameMode::Quickplay),
            "competitive" => Ok(GameMode::Competitive),
            other => Err(format!("unknown game mode {other}")),
        }
    }
}

/// Competitive bracket. Unrecognised or missing values become `Unknown`,
/// which ranks below bronze.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Division {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Master,
    Grandmaster,
    #[serde(alias = "champion")]
    Ultimate,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Division {
    fn rank(self) -> u8 {
        match self {
            Division::Unknown => 0,
            Division::Bronze => 1,
            Division::Silver => 2,
            Division::Gold => 3,
            Division::Platinum => 4,
            Division::Diamond => 5,
            Division::Master => 6,
            Division::Grandmaster => 7,
            Division::Ultimate => 8,
        }
    }
}

impl Ord for Division {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Division {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Null and missing divisions decode as `Unknown`.
fn division_or_unknown<'de, D>(deserializer: D) -> Result<Division, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Division>::deserialize(deserializer)?.unwrap_or_default())
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Division::Unknown => "Unknown",
            Division::Bronze => "Bronze",
            Division::Silver => "Silver",
            Division::Gold => "Gold",
            Division::Platinum => "Platinum",
            Division::Diamond => "Diamond",
            Division::Master => "Master",
            Division::Grandmaster => "Grandmaster",
            Division::Ultimate => "Ultimate",
        };
        f.write_str(name)
    }
}

/// `/players/{id}`: summary plus per-platform career data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub summary: Option<PlayerSummary>,
    pub stats: Option<PlayerCareer>,
}

impl PlayerProfile {
    pub fn competitive(&self, platform: Platform) -> Option<&PlatformCompetitive> {
        let competitive = self.summary.as_ref()?.competitive.as_ref()?;
        match platform {
            Platform::Pc => competitive.pc.as_ref(),
            Platform::Console => competitive.console.as_ref(),
        }
    }

    pub fn career(&self, platform: Platform, mode: GameMode) -> Option<&GameModeCareer> {
        let stats = self.stats.as_ref()?;
        let platform = match platform {
            Platform::Pc => stats.pc.as_ref()?,
            Platform::Console => stats.console.as_ref()?,
        };
        match mode {
            GameMode::Quickplay => platform.quickplay.as_ref(),
            GameMode::Competitive => platform.competitive.as_ref(),
        }
    }
}

/// `/players/{id}/summary`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub username: Option<String>,
    pub avatar: Option<String>,
    pub namecard: Option<String>,
    pub title: Option<String>,
    pub endorsement: Option<Endorsement>,
    pub competitive: Option<CompetitiveSummary>,
    pub last_updated_at: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Endorsement {
    pub level: Option<u32>,
    pub frame: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompetitiveSummary {
    pub pc: Option<PlatformCompetitive>,
    pub console: Option<PlatformCompetitive>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformCompetitive {
    pub season: Option<u32>,
    pub tank: Option<RoleRank>,
    pub damage: Option<RoleRank>,
    pub support: Option<RoleRank>,
    pub history: Option<SeasonHistory>,
}

impl PlatformCompetitive {
    pub fn rank(&self, role: Role) -> Option<&RoleRank> {
        match role {
            Role::Tank => self.tank.as_ref(),
            Role::Damage => self.damage.as_ref(),
            Role::Support => self.support.as_ref(),
        }
    }

    pub fn history(&self, role: Role) -> Option<&[SeasonRank]> {
        let history = self.history.as_ref()?;
        let seasons = match role {
            Role::Tank => history.tank.as_ref(),
            Role::Damage => history.damage.as_ref(),
            Role::Support => history.support.as_ref(),
        };
        seasons.map(Vec::as_slice)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRank {
    #[serde(default, deserialize_with = "division_or_unknown")]
    pub division: Division,
    pub tier: Option<u8>,
    pub role_icon: Option<String>,
    pub rank_icon: Option<String>,
    pub tier_icon: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeasonHistory {
    pub tank: Option<Vec<SeasonRank>>,
    pub damage: Option<Vec<SeasonRank>>,
    pub support: Option<Vec<SeasonRank>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonRank {
    pub season: Option<u32>,
    #[serde(default, deserialize_with = "division_or_unknown")]
    pub division: Division,
    pub tier: Option<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerCareer {
    pub pc: Option<PlatformCareer>,
    pub console: Option<PlatformCareer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformCareer {
    pub quickplay: Option<GameModeCareer>,
    pub competitive: Option<GameModeCareer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameModeCareer {
    pub heroes_comparisons: Option<HashMap<String, HeroComparison>>,
    pub career_stats: Option<HashMap<String, Option<Vec<CareerStatCategory>>>>,
}

impl GameModeCareer {
    pub fn metric(&self, key: &str) -> Option<&[HeroMetric]> {
        let comparison = self.heroes_comparisons.as_ref()?.get(key)?;
        comparison.values.as_deref()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeroComparison {
    pub label: Option<String>,
    pub values: Option<Vec<HeroMetric>>,
}

/// One row of a comparison table. Rows missing either half are kept but
/// never picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroMetric {
    pub hero: Option<String>,
    pub value: Option<f64>,
}

impl HeroMetric {
    pub fn entry(&self) -> Option<(&str, f64)> {
        Some((self.hero.as_deref()?, self.value?))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerStatCategory {
    pub category: Option<String>,
    pub label: Option<String>,
    #[serde(default)]
    pub stats: Vec<CareerStat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerStat {
    pub key: Option<String>,
    pub label: Option<String>,
    pub value: Option<serde_json::Value>,
}
