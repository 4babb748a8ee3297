use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use overstats::page::LoadState;
use overstats::view::ProfileDisplay;
use overstats::{
    Config, GameMode, HeroesPage, MapsPage, NormalizeOptions, OverfastClient, Platform, PlayerPage,
};

#[derive(Parser)]
#[command(name = "overstats")]
#[command(about = "Look up player statistics, heroes and maps from the OverFast API")]
struct Cli {
    /// Platform whose ranks and career stats are shown (pc or console)
    #[arg(long, global = true)]
    platform: Option<Platform>,

    /// Career game mode used for hero highlights (competitive or quickplay)
    #[arg(long = "gamemode-stats", global = true)]
    gamemode_stats: Option<GameMode>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show a player's ranks, hero highlights and stat summary
    Player {
        /// BattleTag, e.g. Player#12345
        battletag: String,
    },
    /// List heroes by role, matches first
    Heroes {
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// List maps filtered by name/location and game mode
    Maps {
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(short, long)]
        gamemode: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(platform) = cli.platform {
        config.platform = platform;
    }
    if let Some(mode) = cli.gamemode_stats {
        config.gamemode = mode;
    }
    let client = OverfastClient::new(&config)?;

    match cli.command {
        Command::Player { battletag } => {
            let mut page = PlayerPage::new();
            page.load(&client, &battletag, NormalizeOptions::from(&config)).await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                print_player(&page);
            }
        }
        Command::Heroes { search } => {
            let mut page = HeroesPage::default();
            page.load(&client).await;
            if let Some(error) = page.heroes.error() {
                anyhow::bail!("Error: {error}");
            }
            let groups = page.listing(&search);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&groups)?);
            } else {
                for group in groups {
                    println!("{}", group.role);
                    for entry in group.heroes {
                        let marker = if entry.is_match { "*" } else { " " };
                        println!(" {marker} {}", entry.hero.name);
                    }
                }
            }
        }
        Command::Maps { search, gamemode } => {
            let mut page = MapsPage::default();
            page.load(&client).await;
            if let Some(error) = page.maps.error() {
                anyhow::bail!("Error: {error}");
            }
            let maps = page.filtered(&search, gamemode.as_deref());
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&maps)?);
            } else {
                for map in maps {
                    println!("{} ({}) [{}]", map.name, map.location, map.gamemodes.join(", "));
                }
            }
        }
    }

    Ok(())
}

fn print_player(page: &PlayerPage) {
    match page.profile.state() {
        LoadState::Loaded(view) => print!("{}", ProfileDisplay(view)),
        LoadState::Failed(error) => eprintln!("Error: {error}"),
        LoadState::Idle | LoadState::Loading => {}
    }
    match page.stats.state() {
        LoadState::Loaded(sections) => {
            for section in sections {
                println!();
                print!("{section}");
            }
        }
        LoadState::Failed(error) => eprintln!("Error: {error}"),
        LoadState::Idle | LoadState::Loading => {}
    }
}
