pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod listing;
pub mod models;
pub mod normalizer;
pub mod page;
pub mod view;

pub use client::{normalize_player_id, OverfastClient};
pub use config::Config;
pub use error::OverstatsError;
pub use models::catalog::{HeroReference, MapReference, RoleReference};
pub use models::profile::{Division, GameMode, Platform, PlayerProfile, Role};
pub use normalizer::{normalize, NormalizeOptions, PlayerStatsView};
pub use page::{HeroesPage, LoadState, Loader, MapsPage, PlayerPage};
