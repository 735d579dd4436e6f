//! Core game state machine.
//!
//! This module contains the main `Game` struct and all turn logic. Exactly
//! one [`Move`] is processed per call; a rejected move leaves every part of
//! the state untouched so the same player can try again.

use crate::actions::{GameEvent, Move, MoveKind, MoveRecord, MoveResult};
use crate::board::{Board, PlayerId};
use crate::config::GameConfig;
use crate::coord::{Direction, Position};
use crate::dictionary::Dictionary;
use crate::error::{ConfigError, MoveError, SnapshotError};
use crate::player::{LetterCounts, Player};
use crate::resolver::{classify_tiles, formed_words, is_connected};
use crate::scoring::{turn_bonuses, ChallengeRecord, ScoredWord, TurnScore};
use crate::tiles::TilePool;
use crate::word::{PlayedWord, Word};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Everything needed to resume a game, in plain data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub tile_pool: TilePool,
    pub players: Vec<Player>,
    pub current_player: PlayerId,
    pub turn: u32,
    pub move_history: Vec<Option<MoveRecord>>,
    pub last_turn_score: Option<TurnScore>,
    pub finished: bool,
}

/// The complete game state
#[derive(Debug, Clone)]
pub struct Game<D: Dictionary> {
    pub config: GameConfig,
    /// The game board
    pub board: Board,
    /// Undrawn tiles
    pub tile_pool: TilePool,
    /// All players, indexed by id
    pub players: Vec<Player>,
    /// Player whose move is awaited
    pub current_player: PlayerId,
    /// Round counter, bumped each time play wraps back to the first player
    pub turn: u32,
    /// One slot per processed move; passes and skips leave `None`
    pub move_history: Vec<Option<MoveRecord>>,
    /// Score of the most recent play or challenge
    pub last_turn_score: Option<TurnScore>,
    /// Set by `End` or when every tile has been played
    pub finished: bool,
    dictionary: D,
    rng: StdRng,
}

impl<D: Dictionary> Game<D> {
    // ==================== Construction ====================

    /// Create a standard game with a randomly shuffled pool
    pub fn new(player_names: Vec<String>, dictionary: D) -> Self {
        let config = GameConfig::standard();
        let mut rng = StdRng::from_entropy();
        let pool = TilePool::from_config(&config, &mut rng);
        Self::build(config, player_names, dictionary, pool, rng)
    }

    /// Create a game whose pool is shuffled by `rng`
    pub fn with_rng(
        config: GameConfig,
        player_names: Vec<String>,
        dictionary: D,
        mut rng: StdRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let pool = TilePool::from_config(&config, &mut rng);
        Ok(Self::build(config, player_names, dictionary, pool, rng))
    }

    /// Create a game that deals tiles from `pool` in order
    pub fn with_pool(
        config: GameConfig,
        player_names: Vec<String>,
        dictionary: D,
        pool: TilePool,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(
            config,
            player_names,
            dictionary,
            pool,
            StdRng::seed_from_u64(0),
        ))
    }

    fn build(
        config: GameConfig,
        player_names: Vec<String>,
        dictionary: D,
        tile_pool: TilePool,
        rng: StdRng,
    ) -> Self {
        assert!(!player_names.is_empty(), "Must have at least one player");
        assert!(
            player_names.len() <= PlayerId::MAX as usize,
            "Too many players"
        );

        let players = player_names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Player::new(i as PlayerId, name))
            .collect();

        let mut game = Self {
            board: Board::new(&config),
            config,
            tile_pool,
            players,
            current_player: 0,
            turn: 0,
            move_history: Vec::new(),
            last_turn_score: None,
            finished: false,
            dictionary,
            rng,
        };
        let rack_size = game.config.rack_size;
        for player in &mut game.players {
            player.rack.refill(&mut game.tile_pool, rack_size);
        }
        game
    }

    /// Randomise the seating order. Only allowed before the first move;
    /// returns false once play has started.
    pub fn shuffle_player_order(&mut self) -> bool {
        if !self.move_history.is_empty() || !self.board.is_empty() {
            return false;
        }
        self.players.shuffle(&mut self.rng);
        for (i, player) in self.players.iter_mut().enumerate() {
            player.id = i as PlayerId;
        }
        true
    }

    // ==================== Snapshots ====================

    /// Copy out the full game state
    pub fn export_snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            tile_pool: self.tile_pool.clone(),
            players: self.players.clone(),
            current_player: self.current_player,
            turn: self.turn,
            move_history: self.move_history.clone(),
            last_turn_score: self.last_turn_score.clone(),
            finished: self.finished,
        }
    }

    /// Resume a game from a snapshot taken with the same config
    pub fn from_snapshot(
        config: GameConfig,
        snapshot: GameSnapshot,
        dictionary: D,
    ) -> Result<Self, SnapshotError> {
        config.validate()?;
        if snapshot.board.height() != config.board_height
            || snapshot.board.width() != config.board_width
        {
            return Err(SnapshotError::BoardSize {
                height: snapshot.board.height(),
                width: snapshot.board.width(),
                expected_height: config.board_height,
                expected_width: config.board_width,
            });
        }
        if !snapshot.board.is_well_formed() {
            return Err(SnapshotError::CellGrid {
                height: config.board_height,
                width: config.board_width,
            });
        }
        if snapshot.players.is_empty() {
            return Err(SnapshotError::NoPlayers);
        }
        if snapshot.current_player as usize >= snapshot.players.len() {
            return Err(SnapshotError::UnknownPlayer(snapshot.current_player));
        }
        for (seat, player) in snapshot.players.iter().enumerate() {
            if player.id as usize != seat {
                return Err(SnapshotError::SeatMismatch {
                    seat,
                    id: player.id,
                });
            }
            let expected = player.history_total();
            if player.current_score != expected {
                return Err(SnapshotError::ScoreMismatch {
                    player: player.id,
                    recorded: player.current_score,
                    expected,
                });
            }
        }
        let records = snapshot.move_history.iter().enumerate();
        for (index, record) in records.filter_map(|(i, r)| Some((i, r.as_ref()?))) {
            if record.player as usize >= snapshot.players.len() {
                return Err(SnapshotError::UnknownMovePlayer {
                    index,
                    player: record.player,
                });
            }
        }

        Ok(Self {
            config,
            board: snapshot.board,
            tile_pool: snapshot.tile_pool,
            players: snapshot.players,
            current_player: snapshot.current_player,
            turn: snapshot.turn,
            move_history: snapshot.move_history,
            last_turn_score: snapshot.last_turn_score,
            finished: snapshot.finished,
            dictionary,
            rng: StdRng::from_entropy(),
        })
    }

    // ==================== Queries ====================

    /// Get the number of players
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// The player whose move is awaited
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player as usize]
    }

    /// Get a player by ID
    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id as usize)
    }

    fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id as usize]
    }

    /// Find a player by name, ignoring case
    pub fn find_player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.is_named(name))
    }

    pub fn dictionary(&self) -> &D {
        &self.dictionary
    }

    /// Check if the game is finished
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Names and scores in seating order
    pub fn standings(&self) -> Vec<(String, u32)> {
        self.players
            .iter()
            .map(|p| (p.name.clone(), p.current_score))
            .collect()
    }

    /// Highest scorer; the earliest seat wins ties
    pub fn leader(&self) -> Option<PlayerId> {
        let mut best: Option<&Player> = None;
        for player in &self.players {
            if best.map_or(true, |b| player.current_score > b.current_score) {
                best = Some(player);
            }
        }
        best.map(|p| p.id)
    }

    /// Every tile in the game: pool, racks and board together
    pub fn tile_totals(&self) -> LetterCounts {
        let mut totals = self.tile_pool.counts();
        for player in &self.players {
            totals.add_counts(&player.rack.counts());
        }
        totals.add_counts(&self.board.letter_counts());
        totals
    }

    // ==================== Moves ====================

    /// Process one move, reporting the outcome
    pub fn make_move(&mut self, mv: Move) -> MoveResult {
        if self.finished {
            return MoveResult::End;
        }
        match self.apply_move(mv) {
            Ok(_) if self.finished => MoveResult::End,
            Ok(_) => MoveResult::Next,
            Err(e) => MoveResult::Retry(e),
        }
    }

    /// Apply a move, returning the resulting events.
    ///
    /// Every move is made by the player on turn except a challenge that names
    /// its challenger, which anyone may make at any time.
    pub fn apply_move(&mut self, mv: Move) -> Result<Vec<GameEvent>, MoveError> {
        if self.finished {
            return Err(MoveError::GameOver);
        }

        let player = match &mv {
            Move::Challenge { by: Some(id) } => {
                if self.get_player(*id).is_none() {
                    return Err(MoveError::UnknownPlayer(*id));
                }
                *id
            }
            _ => self.current_player,
        };
        let forfeited =
            player == self.current_player && self.players[player as usize].skip_next_turn;
        if forfeited && !matches!(mv, Move::Skip | Move::End | Move::Save { .. }) {
            debug!("{} must skip this turn", self.players[player as usize].name);
            return Err(MoveError::TurnForfeited);
        }

        let result = match mv {
            Move::Play {
                word,
                row,
                col,
                direction,
            } => self.play_word(player, &word, Position::new(row, col), direction),

            Move::Pass => {
                self.move_history.push(None);
                let mut events = vec![GameEvent::TurnPassed { player }];
                events.extend(self.advance_turn());
                Ok(events)
            }

            Move::Skip => {
                self.player_mut(player).skip_next_turn = false;
                self.move_history.push(None);
                let mut events = vec![GameEvent::TurnSkipped { player }];
                events.extend(self.advance_turn());
                Ok(events)
            }

            Move::Exchange { letters } => self.exchange(player, &letters),

            Move::Challenge { .. } => self.challenge(player),

            Move::End => {
                self.record(player, Move::End, Vec::new(), None);
                Ok(self.finish())
            }

            // Persisting is the caller's job; saving is not a turn
            Move::Save { location } => Ok(vec![GameEvent::SaveRequested { location }]),
        };

        if let Err(e) = &result {
            debug!(
                "Rejected move from {}: {}",
                self.players[player as usize].name,
                e
            );
        }
        result
    }

    // ==================== Play ====================

    /// Run every legality check for a play without touching the state.
    ///
    /// Returns the classified word and whether it empties a full rack.
    pub fn validate_play(
        &self,
        player: PlayerId,
        letters: &str,
        start: Position,
        direction: Direction,
    ) -> Result<(PlayedWord, bool), MoveError> {
        let letters = letters.trim();
        if letters.is_empty() {
            return Err(MoveError::MalformedMove("no word given".to_string()));
        }
        if !letters.chars().all(|c| self.config.is_tile_letter(c)) {
            return Err(MoveError::MalformedMove(format!(
                "'{}' is not made of tile letters",
                letters
            )));
        }

        let word = Word::new(letters, start, direction);
        if !word.is_fully_on_board(self.board.height(), self.board.width()) {
            return Err(MoveError::OutOfBounds);
        }
        let opening_move = self.board.is_empty();
        if opening_move && !word.covers(self.board.opening()) {
            return Err(MoveError::MissingOpeningCoverage);
        }

        let played = classify_tiles(word, &self.board)?;
        if !opening_move && !is_connected(&self.board, &played) {
            return Err(MoveError::NotConnected);
        }

        let needed = played.needed_letters();
        let (has_letters, is_bingo) = self
            .get_player(player)
            .map_or((false, false), |p| p.check_play(&needed, self.config.rack_size));
        if !has_letters {
            return Err(MoveError::InsufficientRackLetters {
                needed: needed.into_iter().collect(),
            });
        }
        Ok((played, is_bingo))
    }

    fn play_word(
        &mut self,
        player: PlayerId,
        letters: &str,
        start: Position,
        direction: Direction,
    ) -> Result<Vec<GameEvent>, MoveError> {
        let (played, is_bingo) = self.validate_play(player, letters, start, direction)?;
        let turn = self.turn;

        let mut placed = Vec::new();
        for (pos, letter) in played.new_tiles() {
            let ok = self.board.place_tile(pos, letter, player, turn);
            assert!(ok, "validated square {} was already occupied", pos.label());
            placed.push(pos);
        }
        let needed = played.needed_letters();
        let removed = self.player_mut(player).rack.remove_letters(&needed);
        assert!(removed, "validated rack is missing letters");

        let bonuses = turn_bonuses(&self.board, &played);
        let mut turn_score = TurnScore::new(MoveKind::Play, turn);
        for (key, word) in formed_words(&self.board, &played) {
            turn_score.add_word(key, ScoredWord::new(word, &bonuses, &self.config));
        }
        turn_score.apply_bingo_bonus(is_bingo, self.config.bingo_bonus);

        let words: Vec<String> = turn_score.words().map(str::to_string).collect();
        let score = turn_score.total_score;
        let rack_size = self.config.rack_size;
        let player_state = &mut self.players[player as usize];
        let score_index = player_state.add_score(turn_score.clone());
        let drawn = player_state.rack.refill(&mut self.tile_pool, rack_size);
        info!(
            "{} played {} for {} points{}",
            player_state.name,
            played.word().letters,
            score,
            if is_bingo { " (bingo)" } else { "" }
        );
        self.last_turn_score = Some(turn_score);

        self.record(
            player,
            Move::Play {
                word: played.word().letters.clone(),
                row: start.row,
                col: start.col,
                direction,
            },
            placed,
            Some(score_index),
        );

        let mut events = vec![GameEvent::WordPlayed {
            player,
            words,
            score,
            is_bingo,
        }];
        if !drawn.is_empty() {
            events.push(GameEvent::TilesDrawn {
                player,
                count: drawn.len(),
            });
        }

        if self.tile_pool.is_empty() && self.players.iter().all(|p| p.rack.is_empty()) {
            events.extend(self.finish());
        } else {
            events.extend(self.advance_turn());
        }
        Ok(events)
    }

    // ==================== Exchange ====================

    fn exchange(&mut self, player: PlayerId, letters: &[char]) -> Result<Vec<GameEvent>, MoveError> {
        if letters.is_empty() {
            return Err(MoveError::MalformedMove("no letters to exchange".to_string()));
        }
        if !letters.iter().all(|c| self.config.is_tile_letter(*c)) {
            return Err(MoveError::MalformedMove(
                "exchange letters must be tile letters".to_string(),
            ));
        }
        let letters: Vec<char> = letters.iter().flat_map(|c| c.to_uppercase()).collect();
        if !self.players[player as usize].rack.has_letters(&letters) {
            return Err(MoveError::InsufficientRackLetters {
                needed: letters.iter().collect(),
            });
        }
        if self.tile_pool.len() < letters.len() {
            return Err(MoveError::InsufficientPoolTiles);
        }

        // Draw before returning so the same tiles cannot come straight back
        let drawn = self.tile_pool.draw(letters.len());
        let player_state = &mut self.players[player as usize];
        player_state.rack.remove_letters(&letters);
        player_state.rack.extend(drawn);
        self.tile_pool.return_letters(&letters, &mut self.rng);
        info!(
            "{} exchanged {} tiles",
            self.players[player as usize].name,
            letters.len()
        );

        self.record(
            player,
            Move::Exchange {
                letters: letters.clone(),
            },
            Vec::new(),
            None,
        );
        let mut events = vec![GameEvent::TilesExchanged {
            player,
            count: letters.len(),
        }];
        events.extend(self.advance_turn());
        Ok(events)
    }

    // ==================== Challenge ====================

    /// The play a challenge would target, with the word its player typed
    fn challenge_target(&self, challenger: PlayerId) -> Result<(MoveRecord, String), MoveError> {
        let record = match self.move_history.last() {
            None => {
                return Err(MoveError::InvalidChallengeTarget(
                    "no moves have been made".to_string(),
                ))
            }
            Some(None) => {
                return Err(MoveError::InvalidChallengeTarget(
                    "the previous turn was passed".to_string(),
                ))
            }
            Some(Some(record)) => record,
        };

        let typed_word = match &record.action {
            Move::Play { word, .. } => word.clone(),
            _ => {
                return Err(MoveError::InvalidChallengeTarget(
                    "the previous move was not a play".to_string(),
                ))
            }
        };
        if record.player == challenger {
            return Err(MoveError::InvalidChallengeTarget(
                "cannot challenge your own play".to_string(),
            ));
        }

        let entry = record
            .score_index
            .and_then(|i| self.get_player(record.player)?.score_history.get(i))
            .ok_or_else(|| {
                MoveError::InvalidChallengeTarget("the previous play has no score".to_string())
            })?;
        if entry.voided {
            return Err(MoveError::InvalidChallengeTarget(
                "the previous play was already overturned".to_string(),
            ));
        }
        Ok((record.clone(), typed_word))
    }

    fn challenge(&mut self, challenger: PlayerId) -> Result<Vec<GameEvent>, MoveError> {
        let (target, word) = self.challenge_target(challenger)?;
        let challenged = target.player;
        let turn = self.turn;

        // Only the typed word is judged
        if self.dictionary.check_word(&word) {
            let record = ChallengeRecord {
                challenger,
                challenged,
                challenged_turn: target.turn,
                successful: false,
                voided_score: 0,
            };
            let score = TurnScore::for_challenge(turn, record, 0);
            let challenger_state = self.player_mut(challenger);
            let score_index = challenger_state.add_score(score.clone());
            challenger_state.skip_next_turn = true;
            info!("Challenge by {} failed, {} is a word", challenger_state.name, word);
            self.last_turn_score = Some(score);
            self.record(challenger, Move::challenge_by(challenger), Vec::new(), Some(score_index));
            return Ok(vec![GameEvent::ChallengeFailed {
                challenger,
                challenged,
            }]);
        }

        info!("Challenge succeeded, {} is not a word", word);

        // Only squares still carrying this play's marks are taken back
        let mut returned = Vec::new();
        for pos in &target.placed {
            let matches = self.board.get_cell(*pos).is_some_and(|cell| {
                cell.placed_by == Some(challenged) && cell.turn_placed == Some(target.turn)
            });
            if matches {
                if let Some(letter) = self.board.clear(*pos) {
                    returned.push(letter);
                }
            }
        }

        let challenged_state = self.player_mut(challenged);
        challenged_state.rack.extend(returned);
        let voided_score = target
            .score_index
            .map_or(0, |i| challenged_state.void_score(i));

        let bonus = self.config.challenge_bonus;
        let record = ChallengeRecord {
            challenger,
            challenged,
            challenged_turn: target.turn,
            successful: true,
            voided_score,
        };
        let score = TurnScore::for_challenge(turn, record, bonus);
        let score_index = self.player_mut(challenger).add_score(score.clone());
        self.last_turn_score = Some(score);
        self.record(challenger, Move::challenge_by(challenger), Vec::new(), Some(score_index));

        // Whoever was on turn stays on turn
        Ok(vec![GameEvent::ChallengeSucceeded {
            challenger,
            challenged,
            voided_score,
            bonus,
        }])
    }

    // ==================== Turn Management ====================

    fn record(&mut self, player: PlayerId, action: Move, placed: Vec<Position>, score_index: Option<usize>) {
        self.move_history.push(Some(MoveRecord {
            player,
            turn: self.turn,
            action,
            placed,
            score_index,
        }));
    }

    fn advance_turn(&mut self) -> Vec<GameEvent> {
        let player = self.current_player;
        let next = (player as usize + 1) % self.players.len();
        if next == 0 {
            self.turn += 1;
        }
        self.current_player = next as PlayerId;
        vec![GameEvent::TurnEnded {
            player,
            next_player: self.current_player,
        }]
    }

    fn finish(&mut self) -> Vec<GameEvent> {
        self.finished = true;
        let winner = self.leader();
        info!("Game over, final standings {:?}", self.standings());
        vec![GameEvent::GameEnded { winner }]
    }
}
