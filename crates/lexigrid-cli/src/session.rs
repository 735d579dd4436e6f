//! Interactive game loop and save files.

use anyhow::{bail, Context};
use lexigrid_core::{Dictionary, Game, GameConfig, GameEvent, GameSnapshot, Move, PlayerId, WordList};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::input::{parse_command, Command, HELP};
use crate::render::{render_board, render_rack, render_standings};

/// Where `save` writes when no file is named
pub const DEFAULT_SAVE: &str = "saved_game.json";

/// On-disk save format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedGame {
    pub config: GameConfig,
    pub game: GameSnapshot,
}

pub fn save_game<D: Dictionary>(game: &Game<D>, path: &Path) -> anyhow::Result<()> {
    let saved = SavedGame {
        config: game.config.clone(),
        game: game.export_snapshot(),
    };
    let json = serde_json::to_string_pretty(&saved)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Saved game to {}", path.display());
    Ok(())
}

pub fn load_game<D: Dictionary>(path: &Path, dictionary: D) -> anyhow::Result<Game<D>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let saved: SavedGame = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a saved game", path.display()))?;
    let game = Game::from_snapshot(saved.config, saved.game, dictionary)?;
    info!("Loaded game from {}", path.display());
    Ok(game)
}

/// One word per line; lines with anything but letters are ignored
pub fn load_dictionary(path: &Path) -> anyhow::Result<WordList> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dictionary {}", path.display()))?;
    let words = WordList::parse(&text);
    if words.is_empty() {
        bail!("Dictionary {} has no words", path.display());
    }
    info!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

pub fn load_config(path: &Path) -> anyhow::Result<GameConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a game config", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Ask for player names on one line
pub fn prompt_players<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> anyhow::Result<Vec<String>> {
    write!(output, "Enter player names separated by spaces: ")?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let names: Vec<String> = line.split_whitespace().map(str::to_string).collect();
    if names.is_empty() {
        bail!("At least one player is required");
    }
    Ok(names)
}

/// A game driven by lines of text
pub struct Session<D: Dictionary, R: BufRead, W: Write> {
    game: Game<D>,
    input: R,
    output: W,
    default_save: PathBuf,
}

impl<D: Dictionary, R: BufRead, W: Write> Session<D, R, W> {
    pub fn new(game: Game<D>, input: R, output: W) -> Self {
        Self {
            game,
            input,
            output,
            default_save: PathBuf::from(DEFAULT_SAVE),
        }
    }

    pub fn with_default_save(mut self, path: PathBuf) -> Self {
        self.default_save = path;
        self
    }

    /// Play until the game ends or input runs out; returns the final game
    pub fn run(mut self) -> anyhow::Result<Game<D>> {
        writeln!(self.output, "Welcome to LexiGrid!")?;

        while !self.game.is_finished() {
            let player = self.game.current_player();
            let name = player.name.clone();

            if player.skip_next_turn {
                writeln!(self.output, "{}'s turn is skipped.", name)?;
                self.submit(Move::Skip)?;
                continue;
            }

            writeln!(self.output, "\n{}'s turn!", name)?;
            writeln!(self.output, "{}", render_board(&self.game.board))?;
            writeln!(self.output, "{}", render_rack(player))?;
            write!(
                self.output,
                "{} enter your move or help to get a list of move options: ",
                name
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                info!("Input closed, leaving game");
                break;
            }

            match parse_command(&line) {
                Ok(Command::Move(mv)) => self.submit(mv)?,
                Ok(Command::ChallengeBy(name)) => match self.game.find_player(&name).map(|p| p.id) {
                    Some(id) => self.submit(Move::challenge_by(id))?,
                    None => writeln!(
                        self.output,
                        "Invalid move input: Unknown player '{}'. Please try again.",
                        name
                    )?,
                },
                Ok(Command::Help) => write!(self.output, "\n{}", HELP)?,
                Ok(Command::Board) => writeln!(self.output, "{}", render_board(&self.game.board))?,
                Ok(Command::Scores) => write!(self.output, "{}", render_standings(&self.game))?,
                Err(e) => writeln!(self.output, "Invalid move input: {}. Please try again.", e)?,
            }
        }
        Ok(self.game)
    }

    fn submit(&mut self, mv: Move) -> anyhow::Result<()> {
        match self.game.apply_move(mv) {
            Ok(events) => {
                for event in events {
                    self.report(event)?;
                }
            }
            Err(e) => writeln!(self.output, "Invalid move: {}. Try again.", e)?,
        }
        Ok(())
    }

    fn name(&self, id: PlayerId) -> String {
        self.game
            .get_player(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("Player {}", id))
    }

    fn report(&mut self, event: GameEvent) -> anyhow::Result<()> {
        match event {
            GameEvent::WordPlayed { player, .. } => {
                let name = self.name(player);
                if let Some(score) = &self.game.last_turn_score {
                    write!(self.output, "{}", score.summary(&name))?;
                }
            }
            GameEvent::TurnPassed { player } => {
                let name = self.name(player);
                writeln!(self.output, "{} passes their turn.", name)?;
            }
            GameEvent::TurnSkipped { .. } => {}
            GameEvent::TilesExchanged { player, count } => {
                let name = self.name(player);
                writeln!(self.output, "{} exchanged {} tiles.", name, count)?;
            }
            GameEvent::ChallengeSucceeded {
                challenged, bonus, ..
            } => {
                let name = self.name(challenged);
                writeln!(
                    self.output,
                    "Challenge successful. Reverted {}'s last move, challenger earns {}.",
                    name, bonus
                )?;
                write!(self.output, "{}", render_standings(&self.game))?;
            }
            GameEvent::ChallengeFailed { challenger, .. } => {
                let name = self.name(challenger);
                writeln!(self.output, "Challenge defended. {} loses their next turn.", name)?;
            }
            GameEvent::SaveRequested { location } => {
                let path = location.map_or_else(|| self.default_save.clone(), PathBuf::from);
                match save_game(&self.game, &path) {
                    Ok(()) => writeln!(self.output, "File saved to {}", path.display())?,
                    Err(e) => {
                        warn!("Save failed: {:#}", e);
                        writeln!(self.output, "Save failed: {:#}", e)?
                    }
                }
            }
            GameEvent::GameEnded { winner } => {
                writeln!(self.output, "\nThe game is over! Final scores:")?;
                write!(self.output, "{}", render_standings(&self.game))?;
                if let Some(winner) = winner {
                    let name = self.name(winner);
                    writeln!(self.output, "{} wins!", name)?;
                }
            }
            other => debug!("{:?}", other),
        }
        Ok(())
    }
}
