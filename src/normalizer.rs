//! Derivation of the display model from a raw player profile.
//!
//! Everything here is a pure function of its inputs. Absent data is never an
//! error: it comes back as `None` or [`RankStatus::Unranked`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::config::Config;
use crate::models::catalog::HeroReference;
use crate::models::profile::{
    GameMode, HeroMetric, Platform, PlayerProfile, Role, RoleRank, SeasonRank,
};

/// Value dropped by default when picking a best hero: a 100% rate usually
/// means a single game on that hero.
pub const DEFAULT_EXCLUDED_VALUE: f64 = 100.0;

pub mod metrics {
    pub const TIME_PLAYED: &str = "time_played";
    pub const WIN_PERCENTAGE: &str = "win_percentage";
    pub const WEAPON_ACCURACY: &str = "weapon_accuracy";
    pub const ELIMINATIONS_PER_LIFE: &str = "eliminations_per_life";
}

/// Default comparator: higher values rank first.
pub fn descending_by_value(a: &HeroMetric, b: &HeroMetric) -> Ordering {
    let value = |m: &HeroMetric| m.value.unwrap_or(f64::NEG_INFINITY);
    value(b).total_cmp(&value(a))
}

/// Pick the top entry of a metric list under `comparator`, skipping entries
/// equal to `exclude` and rows without a hero or value. Ties keep the entry
/// seen first.
pub fn select_extremum_hero<'a, F>(
    values: Option<&'a [HeroMetric]>,
    exclude: Option<f64>,
    comparator: F,
) -> Option<&'a HeroMetric>
where
    F: Fn(&HeroMetric, &HeroMetric) -> Ordering,
{
    values?
        .iter()
        .filter(|entry| {
            entry
                .entry()
                .is_some_and(|(_, value)| exclude.map_or(true, |excluded| value != excluded))
        })
        .fold(None, |best, entry| match best {
            Some(current) if comparator(entry, current) != Ordering::Less => Some(current),
            _ => Some(entry),
        })
}

/// The time-played table already comes sorted by volume, so the raw first
/// complete entry is the most played hero.
pub fn select_most_played(values: Option<&[HeroMetric]>) -> Option<&HeroMetric> {
    values?.iter().find(|m| m.entry().is_some())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RankStatus {
    Ranked(RoleRank),
    Unranked,
}

impl fmt::Display for RankStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankStatus::Ranked(rank) => match rank.tier {
                Some(tier) => write!(f, "{} {}", rank.division, tier),
                None => write!(f, "{}", rank.division),
            },
            RankStatus::Unranked => f.write_str("Unranked"),
        }
    }
}

pub fn resolve_role_rank(profile: &PlayerProfile, platform: Platform, role: Role) -> RankStatus {
    profile
        .competitive(platform)
        .and_then(|c| c.rank(role))
        .cloned()
        .map_or(RankStatus::Unranked, RankStatus::Ranked)
}

/// How to break ties between seasons that reached the same division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HistoryTieBreak {
    /// First entry in the order the API returned them.
    #[default]
    SourceOrder,
    /// Highest season number.
    MostRecentSeason,
}

impl FromStr for HistoryTieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "source-order" | "source" => Ok(HistoryTieBreak::SourceOrder),
            "most-recent" | "most-recent-season" | "recent" => Ok(HistoryTieBreak::MostRecentSeason),
            other => Err(format!("unknown tie-break policy {other}")),
        }
    }
}

pub fn resolve_best_historical_rank(
    profile: &PlayerProfile,
    platform: Platform,
    role: Role,
    tie_break: HistoryTieBreak,
) -> Option<&SeasonRank> {
    let history = profile.competitive(platform)?.history(role)?;
    history.iter().fold(None, |best, entry| match best {
        Some(current) if !outranks(entry, current, tie_break) => Some(current),
        _ => Some(entry),
    })
}

fn outranks(entry: &SeasonRank, current: &SeasonRank, tie_break: HistoryTieBreak) -> bool {
    match entry.division.cmp(&current.division) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match tie_break {
            HistoryTieBreak::SourceOrder => false,
            HistoryTieBreak::MostRecentSeason => entry.season > current.season,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationStyle {
    /// `1h 30m`
    #[default]
    Compact,
    /// `1 hours 30 minutes`
    Long,
}

/// Format a number of seconds as hours and minutes. Absent, negative or
/// non-finite input counts as zero.
pub fn format_duration(total_seconds: Option<f64>, style: DurationStyle) -> String {
    let secs = total_seconds
        .filter(|s| s.is_finite() && *s > 0.0)
        .map_or(0, |s| s as u64);
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    match style {
        DurationStyle::Compact => format!("{hours}h {minutes}m"),
        DurationStyle::Long => format!("{hours} hours {minutes} minutes"),
    }
}

pub fn decorate_with_hero_reference<'a>(
    hero_key: &str,
    references: &'a [HeroReference],
) -> Option<&'a HeroReference> {
    references
        .iter()
        .find(|r| r.key.eq_ignore_ascii_case(hero_key))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalizeOptions {
    pub platform: Platform,
    pub gamemode: GameMode,
    pub tie_break: HistoryTieBreak,
}

impl From<&Config> for NormalizeOptions {
    fn from(config: &Config) -> Self {
        Self {
            platform: config.platform,
            gamemode: config.gamemode,
            tie_break: config.tie_break,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroLeaderboardEntry {
    pub hero_key: String,
    pub metric_value: f64,
    pub display: String,
    pub reference: Option<HeroReference>,
}

impl HeroLeaderboardEntry {
    /// Catalog name when known, otherwise the raw key.
    pub fn hero_name(&self) -> &str {
        self.reference
            .as_ref()
            .map_or(self.hero_key.as_str(), |r| r.name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeroHighlights {
    pub most_played: Option<HeroLeaderboardEntry>,
    pub best_win_rate: Option<HeroLeaderboardEntry>,
    pub best_weapon_accuracy: Option<HeroLeaderboardEntry>,
    pub best_eliminations_per_life: Option<HeroLeaderboardEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleRankView {
    pub role: Role,
    pub current: RankStatus,
    pub best: Option<SeasonRank>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStatsView {
    pub username: Option<String>,
    pub avatar: Option<String>,
    pub title: Option<String>,
    pub endorsement_level: Option<u32>,
    pub platform: Platform,
    pub gamemode: GameMode,
    pub season: Option<u32>,
    pub ranks: Vec<RoleRankView>,
    pub highlights: HeroHighlights,
}

fn leaderboard_entry<F>(
    picked: Option<&HeroMetric>,
    heroes: &[HeroReference],
    display: F,
) -> Option<HeroLeaderboardEntry>
where
    F: Fn(f64) -> String,
{
    let (hero, value) = picked?.entry()?;
    Some(HeroLeaderboardEntry {
        hero_key: hero.to_string(),
        metric_value: value,
        display: display(value),
        reference: decorate_with_hero_reference(hero, heroes).cloned(),
    })
}

/// Build the display model for one profile. `heroes` may be empty when the
/// catalog could not be loaded; highlights then carry keys only.
pub fn normalize(
    profile: &PlayerProfile,
    heroes: &[HeroReference],
    options: NormalizeOptions,
) -> PlayerStatsView {
    let summary = profile.summary.as_ref();
    let career = profile.career(options.platform, options.gamemode);
    let metric = |key: &str| career.and_then(|c| c.metric(key));

    let best = |key: &str| {
        select_extremum_hero(metric(key), Some(DEFAULT_EXCLUDED_VALUE), descending_by_value)
    };
    let percent = |v: f64| format!("{v}%");

    let highlights = HeroHighlights {
        most_played: leaderboard_entry(select_most_played(metric(metrics::TIME_PLAYED)), heroes, |v| {
            format_duration(Some(v), DurationStyle::Compact)
        }),
        best_win_rate: leaderboard_entry(best(metrics::WIN_PERCENTAGE), heroes, percent),
        best_weapon_accuracy: leaderboard_entry(best(metrics::WEAPON_ACCURACY), heroes, percent),
        best_eliminations_per_life: leaderboard_entry(
            best(metrics::ELIMINATIONS_PER_LIFE),
            heroes,
            |v| format!("{v:.2}"),
        ),
    };

    let ranks = Role::ALL
        .into_iter()
        .map(|role| RoleRankView {
            role,
            current: resolve_role_rank(profile, options.platform, role),
            best: resolve_best_historical_rank(profile, options.platform, role, options.tie_break)
                .cloned(),
        })
        .collect();

    PlayerStatsView {
        username: summary.and_then(|s| s.username.clone()),
        avatar: summary.and_then(|s| s.avatar.clone()),
        title: summary.and_then(|s| s.title.clone()),
        endorsement_level: summary.and_then(|s| s.endorsement.as_ref()?.level),
        platform: options.platform,
        gamemode: options.gamemode,
        season: profile.competitive(options.platform).and_then(|c| c.season),
        ranks,
        highlights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::{
        CompetitiveSummary, Division, PlatformCompetitive, PlayerSummary, SeasonHistory,
    };
    use rstest::rstest;
    use serde_json::json;

    fn metric(hero: &str, value: f64) -> HeroMetric {
        HeroMetric {
            hero: Some(hero.to_string()),
            value: Some(value),
        }
    }

    fn season(season: u32, division: Division) -> SeasonRank {
        SeasonRank {
            season: Some(season),
            division,
            tier: Some(3),
        }
    }

    fn profile(value: serde_json::Value) -> PlayerProfile {
        serde_json::from_value(value).unwrap()
    }

    fn hero_ref(key: &str, name: &str) -> HeroReference {
        HeroReference {
            key: key.to_string(),
            name: name.to_string(),
            portrait: None,
            role: None,
        }
    }

    #[test]
    fn extremum_skips_excluded_value() {
        let values = vec![metric("x", 100.0), metric("y", 75.0)];
        let best = select_extremum_hero(Some(values.as_slice()), Some(100.0), descending_by_value).unwrap();
        assert_eq!(best.entry(), Some(("y", 75.0)));
    }

    #[test]
    fn extremum_of_empty_or_absent_is_none() {
        assert!(select_extremum_hero(None, Some(100.0), descending_by_value).is_none());
        assert!(select_extremum_hero(Some(&[] as &[HeroMetric]), Some(100.0), descending_by_value).is_none());
        let only_excluded = vec![metric("x", 100.0), metric("z", 100.0)];
        assert!(select_extremum_hero(Some(only_excluded.as_slice()), Some(100.0), descending_by_value).is_none());
    }

    #[test]
    fn extremum_keeps_first_on_ties() {
        let values = vec![metric("a", 50.0), metric("b", 60.0), metric("c", 60.0)];
        let best = select_extremum_hero(Some(values.as_slice()), None, descending_by_value).unwrap();
        assert_eq!(best.hero.as_deref(), Some("b"));
    }

    #[test]
    fn extremum_with_custom_comparator() {
        let values = vec![metric("a", 3.0), metric("b", 1.0), metric("c", 2.0)];
        let lowest =
            select_extremum_hero(Some(values.as_slice()), None, |a, b| descending_by_value(b, a)).unwrap();
        assert_eq!(lowest.hero.as_deref(), Some("b"));
    }

    #[test]
    fn extremum_never_returns_excluded_when_alternative_exists() {
        let lists = [
            vec![metric("a", 100.0), metric("b", 1.0)],
            vec![metric("a", 0.5), metric("b", 100.0), metric("c", 100.0)],
            vec![metric("a", 100.0), metric("b", 100.0), metric("c", 99.9)],
        ];
        for values in &lists {
            let best = select_extremum_hero(Some(values.as_slice()), Some(100.0), descending_by_value).unwrap();
            assert_ne!(best.value, Some(100.0));
        }
    }

    #[test]
    fn most_played_takes_first_entry_without_exclusion() {
        let values = vec![metric("ana", 100.0), metric("mercy", 9000.0)];
        assert_eq!(select_most_played(Some(values.as_slice())).unwrap().hero.as_deref(), Some("ana"));
        assert!(select_most_played(None).is_none());
    }

    #[test]
    fn incomplete_rows_are_never_picked() {
        let values = vec![
            HeroMetric { hero: Some("mercy".into()), value: None },
            HeroMetric { hero: None, value: Some(90.0) },
            metric("ana", 55.0),
            metric("lucio", 40.0),
        ];
        let best = select_extremum_hero(Some(values.as_slice()), Some(100.0), descending_by_value).unwrap();
        assert_eq!(best.entry(), Some(("ana", 55.0)));
        let lowest =
            select_extremum_hero(Some(values.as_slice()), None, |a, b| descending_by_value(b, a)).unwrap();
        assert_eq!(lowest.entry(), Some(("lucio", 40.0)));
        assert_eq!(select_most_played(Some(values.as_slice())).unwrap().entry(), Some(("ana", 55.0)));

        let none_complete = vec![HeroMetric { hero: None, value: None }];
        assert!(select_extremum_hero(Some(none_complete.as_slice()), None, descending_by_value).is_none());
        assert!(select_most_played(Some(none_complete.as_slice())).is_none());
    }

    #[test]
    fn unknown_division_loses_to_bronze_in_history() {
        let p = profile(json!({"summary": {"competitive": {"pc": {"history": {"tank": [
            {"season": 5, "division": "iridescent"},
            {"season": 6},
            {"season": 7, "division": "bronze", "tier": 5}
        ]}}}}}));
        let best =
            resolve_best_historical_rank(&p, Platform::Pc, Role::Tank, HistoryTieBreak::SourceOrder).unwrap();
        assert_eq!(best.division, Division::Bronze);
        assert_eq!(best.season, Some(7));
    }

    #[test]
    fn normalize_survives_null_metric_values() {
        let p = profile(json!({"stats": {"pc": {"competitive": {"heroes_comparisons": {
            "time_played": {"values": [{"hero": "mercy", "value": null}, {"hero": "ana", "value": 3600}]},
            "win_percentage": {"values": [{"hero": "mercy", "value": null}]}
        }}}}}));
        let view = normalize(&p, &[], NormalizeOptions::default());
        let most_played = view.highlights.most_played.as_ref().unwrap();
        assert_eq!(most_played.hero_key, "ana");
        assert_eq!(most_played.display, "1h 0m");
        assert!(view.highlights.best_win_rate.is_none());
    }

    #[rstest]
    #[case(Some(0.0), "0h 0m")]
    #[case(None, "0h 0m")]
    #[case(Some(3661.0), "1h 1m")]
    #[case(Some(7200.0), "2h 0m")]
    #[case(Some(5400.0), "1h 30m")]
    #[case(Some(-30.0), "0h 0m")]
    fn compact_durations(#[case] seconds: Option<f64>, #[case] expected: &str) {
        assert_eq!(format_duration(seconds, DurationStyle::Compact), expected);
    }

    #[test]
    fn long_durations() {
        assert_eq!(format_duration(None, DurationStyle::Long), "0 hours 0 minutes");
        assert_eq!(format_duration(Some(3661.0), DurationStyle::Long), "1 hours 1 minutes");
    }

    #[rstest]
    #[case(Role::Tank)]
    #[case(Role::Damage)]
    #[case(Role::Support)]
    fn missing_rank_is_unranked(#[case] role: Role) {
        let p = profile(json!({"summary": {"competitive": {"pc": {"season": 12}}}}));
        assert_eq!(resolve_role_rank(&p, Platform::Pc, role), RankStatus::Unranked);
        assert_eq!(resolve_role_rank(&PlayerProfile::default(), Platform::Pc, role), RankStatus::Unranked);
    }

    #[rstest]
    #[case(Role::Tank)]
    #[case(Role::Damage)]
    #[case(Role::Support)]
    fn present_rank_is_verbatim(#[case] role: Role) {
        let rank = json!({"division": "diamond", "tier": 2, "role_icon": "r.svg", "rank_icon": "d.png", "tier_icon": "2.png"});
        let mut pc = serde_json::Map::new();
        pc.insert(role.key().to_string(), rank);
        let p = profile(json!({"summary": {"competitive": {"pc": pc}}}));
        let expected = RoleRank {
            division: Division::Diamond,
            tier: Some(2),
            role_icon: Some("r.svg".into()),
            rank_icon: Some("d.png".into()),
            tier_icon: Some("2.png".into()),
        };
        assert_eq!(resolve_role_rank(&p, Platform::Pc, role), RankStatus::Ranked(expected));
        assert_eq!(resolve_role_rank(&p, Platform::Console, role), RankStatus::Unranked);
    }

    #[test]
    fn best_historical_rank_picks_highest_division() {
        let p = profile(json!({"summary": {"competitive": {"pc": {"history": {"support": [
            {"season": 3, "division": "gold", "tier": 1},
            {"season": 2, "division": "platinum", "tier": 5},
            {"season": 1, "division": "bronze", "tier": 2}
        ]}}}}}));
        let best =
            resolve_best_historical_rank(&p, Platform::Pc, Role::Support, HistoryTieBreak::SourceOrder)
                .unwrap();
        assert_eq!(best.division, Division::Platinum);
        assert!(resolve_best_historical_rank(&p, Platform::Pc, Role::Tank, HistoryTieBreak::SourceOrder)
            .is_none());
    }

    #[test]
    fn historical_tie_break_policies() {
        let mut p = PlayerProfile::default();
        let history = vec![season(4, Division::Master), season(9, Division::Master), season(7, Division::Gold)];
        p.summary = Some(PlayerSummary {
            competitive: Some(CompetitiveSummary {
                pc: Some(PlatformCompetitive {
                    history: Some(SeasonHistory {
                        damage: Some(history),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                console: None,
            }),
            ..Default::default()
        });

        let first = resolve_best_historical_rank(&p, Platform::Pc, Role::Damage, HistoryTieBreak::SourceOrder);
        assert_eq!(first.unwrap().season, Some(4));
        let recent =
            resolve_best_historical_rank(&p, Platform::Pc, Role::Damage, HistoryTieBreak::MostRecentSeason);
        assert_eq!(recent.unwrap().season, Some(9));
    }

    #[test]
    fn hero_lookup_ignores_case() {
        let refs = vec![hero_ref("ana", "Ana"), hero_ref("mercy", "Mercy")];
        assert_eq!(decorate_with_hero_reference("Ana", &refs).unwrap().name, "Ana");
        assert_eq!(decorate_with_hero_reference("ANA", &refs).unwrap().name, "Ana");
        assert!(decorate_with_hero_reference("genji", &refs).is_none());
    }

    #[test]
    fn normalize_builds_highlights() {
        let p = profile(json!({
            "summary": {"username": "Player", "endorsement": {"level": 3}},
            "stats": {"pc": {"competitive": {"heroes_comparisons": {
                "time_played": {"label": "Time Played", "values": [{"hero": "ana", "value": 5400}]},
                "win_percentage": {"label": "Win Percentage", "values": [
                    {"hero": "x", "value": 100}, {"hero": "y", "value": 75}
                ]},
                "eliminations_per_life": {"label": "Eliminations per Life", "values": [
                    {"hero": "ana", "value": 1.456}
                ]}
            }}}}
        }));
        let refs = vec![hero_ref("ana", "Ana")];
        let view = normalize(&p, &refs, NormalizeOptions::default());

        let most_played = view.highlights.most_played.as_ref().unwrap();
        assert_eq!(most_played.hero_key, "ana");
        assert_eq!(most_played.display, "1h 30m");
        assert_eq!(most_played.hero_name(), "Ana");

        let win_rate = view.highlights.best_win_rate.as_ref().unwrap();
        assert_eq!(win_rate.hero_key, "y");
        assert_eq!(win_rate.display, "75%");
        assert!(win_rate.reference.is_none());
        assert_eq!(win_rate.hero_name(), "y");

        assert_eq!(view.highlights.best_eliminations_per_life.as_ref().unwrap().display, "1.46");
        assert!(view.highlights.best_weapon_accuracy.is_none());
        assert_eq!(view.username.as_deref(), Some("Player"));
        assert_eq!(view.endorsement_level, Some(3));
        assert_eq!(view.ranks.len(), 3);
        assert!(view.ranks.iter().all(|r| r.current == RankStatus::Unranked && r.best.is_none()));
    }

    #[test]
    fn normalize_empty_profile_does_not_panic() {
        let view = normalize(&PlayerProfile::default(), &[], NormalizeOptions::default());
        assert_eq!(view.highlights, HeroHighlights::default());
        assert!(view.username.is_none());
    }

    #[test]
    fn rank_status_display() {
        assert_eq!(RankStatus::Unranked.to_string(), "Unranked");
        let rank = RoleRank {
            division: Division::Grandmaster,
            tier: Some(1),
            role_icon: None,
            rank_icon: None,
            tier_icon: None,
        };
        assert_eq!(RankStatus::Ranked(rank).to_string(), "Grandmaster 1");
    }
}
