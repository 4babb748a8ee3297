//! Presentational cards and sections built from the normalized model and the
//! stats summary.

use std::fmt;

use serde::Serialize;

use crate::models::catalog::HeroReference;
use crate::models::profile::Role;
use crate::models::stats::{PlayerStatsSummary, StatTotals, StatsBlock};
use crate::normalizer::{
    decorate_with_hero_reference, format_duration, DurationStyle, PlayerStatsView,
};

const NOT_AVAILABLE: &str = "N/A";

/// Whole number with en-US thousands separators. Absent and zero give `"0"`.
pub fn format_number(value: Option<f64>) -> String {
    let Some(v) = value.filter(|v| v.is_finite() && *v != 0.0) else {
        return "0".to_string();
    };
    let rounded = v.round();
    let digits = format!("{}", rounded.abs() as u64);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Two decimals, or `N/A` when absent.
pub fn format_fixed(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{v:.2}"))
}

fn format_rate(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}%"),
        None => format!("{NOT_AVAILABLE}%"),
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCard {
    pub label: String,
    pub value: String,
}

impl StatCard {
    fn new(label: &str, value: String) -> Self {
        Self {
            label: label.to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatSection {
    pub title: String,
    pub cards: Vec<StatCard>,
}

impl StatSection {
    pub fn card(&self, label: &str) -> Option<&StatCard> {
        self.cards.iter().find(|c| c.label == label)
    }
}

impl fmt::Display for StatSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        let width = self.cards.iter().map(|c| c.label.len()).max().unwrap_or(0);
        for card in &self.cards {
            writeln!(f, "  {:<width$}  {}", card.label, card.value)?;
        }
        Ok(())
    }
}

fn totals(block: &StatsBlock) -> StatTotals {
    block.total.clone().unwrap_or_default()
}

fn averages(block: &StatsBlock) -> StatTotals {
    block.average.clone().unwrap_or_default()
}

pub fn general_section(block: &StatsBlock) -> StatSection {
    let total = totals(block);
    StatSection {
        title: "General Statistics".to_string(),
        cards: vec![
            StatCard::new("Eliminations", format_number(total.eliminations)),
            StatCard::new("Deaths", format_number(total.deaths)),
            StatCard::new("Healing", format_number(total.healing)),
            StatCard::new("Damage", format_number(total.damage)),
            StatCard::new("KDA", format_optional(block.kda)),
            StatCard::new("Win Rate", format_rate(block.winrate)),
            StatCard::new("Games Played", format_number(block.games_played)),
            StatCard::new("Games Won", format_number(block.games_won)),
            StatCard::new(
                "Time Played",
                format_duration(block.time_played, DurationStyle::Compact),
            ),
        ],
    }
}

pub fn average_section(block: &StatsBlock) -> StatSection {
    let avg = averages(block);
    StatSection {
        title: "Average Per Game".to_string(),
        cards: vec![
            StatCard::new("Eliminations", format_fixed(avg.eliminations)),
            StatCard::new("Assists", format_fixed(avg.assists)),
            StatCard::new("Deaths", format_fixed(avg.deaths)),
            StatCard::new("Damage", format_number(avg.damage)),
            StatCard::new("Healing", format_number(avg.healing)),
        ],
    }
}

pub fn role_section(role: Role, block: &StatsBlock) -> StatSection {
    let avg = averages(block);
    StatSection {
        title: format!("{} Statistics", role.display_name()),
        cards: vec![
            StatCard::new("Games Played", format_number(block.games_played)),
            StatCard::new("Games Won", format_number(block.games_won)),
            StatCard::new("Win Rate", format_rate(block.winrate)),
            StatCard::new("KDA", format_fixed(block.kda)),
            StatCard::new(
                "Time Played",
                format_duration(block.time_played, DurationStyle::Compact),
            ),
            StatCard::new("Avg. Elims", format_fixed(avg.eliminations)),
            StatCard::new("Avg. Assists", format_fixed(avg.assists)),
            StatCard::new("Avg. Deaths", format_fixed(avg.deaths)),
            StatCard::new("Avg. Healing", format_number(avg.healing)),
        ],
    }
}

/// General and average sections, then one section per role the payload has.
pub fn summary_sections(summary: &PlayerStatsSummary) -> Vec<StatSection> {
    let mut sections = Vec::new();
    if let Some(general) = &summary.general {
        sections.push(general_section(general));
        sections.push(average_section(general));
    }
    if let Some(roles) = &summary.roles {
        sections.extend(
            Role::ALL
                .into_iter()
                .filter_map(|role| roles.get(role).map(|block| role_section(role, block))),
        );
    }
    sections
}

pub fn hero_section(name: &str, block: &StatsBlock) -> StatSection {
    let avg = averages(block);
    StatSection {
        title: name.to_string(),
        cards: vec![
            StatCard::new("Games Played", format_number(block.games_played)),
            StatCard::new("Win Rate", format_rate(block.winrate)),
            StatCard::new("KDA", format_fixed(block.kda)),
            StatCard::new(
                "Time Played",
                format_duration(block.time_played, DurationStyle::Compact),
            ),
            StatCard::new("Avg. Elims", format_fixed(avg.eliminations)),
            StatCard::new("Avg. Damage", format_number(avg.damage)),
        ],
    }
}

/// One section per hero in the summary, most played first. Titles use the
/// catalog name when `heroes` knows the key.
pub fn hero_sections(summary: &PlayerStatsSummary, heroes: &[HeroReference]) -> Vec<StatSection> {
    let Some(blocks) = &summary.heroes else {
        return Vec::new();
    };
    let mut ordered: Vec<(&String, &StatsBlock)> = blocks.iter().collect();
    ordered.sort_by(|(a_key, a), (b_key, b)| {
        let played = |block: &StatsBlock| block.time_played.unwrap_or(0.0);
        played(b).total_cmp(&played(a)).then_with(|| a_key.cmp(b_key))
    });
    ordered
        .into_iter()
        .map(|(key, block)| {
            let name = decorate_with_hero_reference(key, heroes).map_or(key.as_str(), |h| h.name.as_str());
            hero_section(name, block)
        })
        .collect()
}

/// Terminal rendering of the normalized profile.
pub struct ProfileDisplay<'a>(pub &'a PlayerStatsView);

impl fmt::Display for ProfileDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        writeln!(f, "{}", view.username.as_deref().unwrap_or("Unknown player"))?;
        if let Some(title) = &view.title {
            writeln!(f, "  {title}")?;
        }
        if let Some(level) = view.endorsement_level {
            writeln!(f, "  Endorsement level {level}")?;
        }
        if let Some(season) = view.season {
            writeln!(f, "  Season {season}")?;
        }

        writeln!(f, "Ranks")?;
        for rank in &view.ranks {
            write!(f, "  {:<8} {}", rank.role.display_name(), rank.current)?;
            if let Some(best) = &rank.best {
                write!(f, " (best: {}", best.division)?;
                if let Some(season) = best.season {
                    write!(f, ", season {season}")?;
                }
                write!(f, ")")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "Heroes")?;
        let highlights = [
            ("Most Played", &view.highlights.most_played),
            ("Highest Win Rate", &view.highlights.best_win_rate),
            ("Best Accuracy", &view.highlights.best_weapon_accuracy),
            ("Best Elims per Life", &view.highlights.best_eliminations_per_life),
        ];
        for (label, entry) in highlights {
            match entry {
                Some(entry) => writeln!(f, "  {label:<20} {} ({})", entry.hero_name(), entry.display)?,
                None => writeln!(f, "  {label:<20} {NOT_AVAILABLE}")?,
            }
        }
        Ok(())
    }
}
