//! Plain text rendering of the board and scores.

use lexigrid_core::{Board, Bonus, Dictionary, Game, Player, Position};

/// The board as a grid with column letters across the top and one-based row
/// numbers down the side. Empty squares show their bonus.
pub fn render_board(board: &Board) -> String {
    let mut out = String::from("   ");
    for col in 0..board.width() {
        out.push_str(&format!("{:^3}", (b'A' + (col % 26) as u8) as char));
    }
    out.push('\n');

    for row in 0..board.height() {
        out.push_str(&format!("{:>2} ", row + 1));
        for col in 0..board.width() {
            let cell = board.get_cell(Position::new(row, col));
            let text = match cell {
                Some(c) if c.letter.is_some() => c.letter.map(String::from).unwrap_or_default(),
                Some(c) if c.bonus != Bonus::None => c.bonus.abbreviation().to_string(),
                _ => ".".to_string(),
            };
            out.push_str(&format!("{:^3}", text));
        }
        out.push('\n');
    }
    out
}

pub fn render_rack(player: &Player) -> String {
    format!("{}'s rack: {}", player.name, player.rack)
}

/// One line per player, leader marked
pub fn render_standings<D: Dictionary>(game: &Game<D>) -> String {
    let leader = game.leader();
    let mut out = String::from("Scores:\n");
    for player in &game.players {
        let marker = if Some(player.id) == leader { " *" } else { "" };
        out.push_str(&format!(
            "  {:<12} {:>4}{}\n",
            player.name, player.current_score, marker
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexigrid_core::{AcceptAll, GameConfig, TilePool};

    #[test]
    fn test_empty_board_shows_bonuses() {
        let text = render_board(&Board::standard());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 16);
        assert!(lines[0].contains(" A "));
        assert!(lines[1].starts_with(" 1 TW"));
        assert!(lines[8].contains(" * "));
    }

    #[test]
    fn test_letters_replace_bonuses() {
        let mut board = Board::standard();
        board.place_tile(Position::new(7, 7), 'Q', 0, 0);
        let text = render_board(&board);
        let row = text.lines().nth(8).unwrap();
        assert!(row.contains(" Q "));
        assert!(!row.contains('*'));
    }

    #[test]
    fn test_standings_mark_leader() {
        let mut game = Game::with_pool(
            GameConfig::standard(),
            vec!["Ann".to_string(), "Bob".to_string()],
            AcceptAll,
            TilePool::from_letters("ABCDEFGHIJKLMN".chars().collect()),
        )
        .unwrap();
        game.players[1].current_score = 12;
        let text = render_standings(&game);
        assert!(text.contains("Bob"));
        assert!(text.lines().any(|l| l.contains("Bob") && l.ends_with('*')));
        assert!(!text.lines().any(|l| l.contains("Ann") && l.ends_with('*')));
    }

    #[test]
    fn test_render_rack() {
        let mut player = Player::new(0, "Ann".to_string());
        player.rack = "CAT".into();
        assert_eq!(render_rack(&player), "Ann's rack: C A T");
    }
}
