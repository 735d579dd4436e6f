//! LexiGrid terminal game.

use clap::Parser;
use lexigrid_core::{AcceptAll, Dictionary, Game, GameConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod input;
mod render;
mod session;

use session::{load_config, load_dictionary, load_game, prompt_players, Session, DEFAULT_SAVE};

/// LexiGrid - a word placement game for the terminal
#[derive(Parser, Debug)]
#[command(name = "lexigrid")]
#[command(about = "Play LexiGrid in the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Player name, repeat once per player in seating order
    #[arg(short, long = "player")]
    players: Vec<String>,

    /// Resume a saved game instead of starting a new one
    #[arg(short, long)]
    load: Option<PathBuf>,

    /// Word list used to settle challenges, one word per line
    #[arg(short, long)]
    dictionary: Option<PathBuf>,

    /// Seed for the tile shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// Randomise the seating order
    #[arg(long)]
    shuffle_players: bool,

    /// Board and tile configuration as JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// File written by `save` when no name is given
    #[arg(long, default_value = DEFAULT_SAVE)]
    save_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let dictionary: Box<dyn Dictionary> = match &cli.dictionary {
        Some(path) => Box::new(load_dictionary(path)?),
        None => {
            warn!("No dictionary given, every challenge will fail");
            Box::new(AcceptAll)
        }
    };

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    let game = match &cli.load {
        Some(path) => load_game(path, dictionary)?,
        None => {
            let config = match &cli.config {
                Some(path) => load_config(path)?,
                None => GameConfig::standard(),
            };
            let rng = match cli.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let names = if cli.players.is_empty() {
                prompt_players(&mut input, &mut output)?
            } else {
                cli.players.clone()
            };
            let mut game = Game::with_rng(config, names, dictionary, rng)?;
            if cli.shuffle_players {
                game.shuffle_player_order();
            }
            game
        }
    };

    info!("Starting LexiGrid with {} players", game.player_count());

    Session::new(game, input, output)
        .with_default_save(cli.save_file)
        .run()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_players() {
        let cli = Cli::parse_from(["lexigrid", "-p", "Ann", "--player", "Bob", "--seed", "7"]);
        assert_eq!(cli.players, vec!["Ann".to_string(), "Bob".to_string()]);
        assert_eq!(cli.seed, Some(7));
        assert!(!cli.shuffle_players);
        assert_eq!(cli.save_file, PathBuf::from(DEFAULT_SAVE));
    }

    #[test]
    fn test_cli_load() {
        let cli = Cli::parse_from(["lexigrid", "--load", "game.json", "--shuffle-players"]);
        assert_eq!(cli.load, Some(PathBuf::from("game.json")));
        assert!(cli.shuffle_players);
        assert!(cli.players.is_empty());
    }
}
