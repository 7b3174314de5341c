// game/mod.rs

pub mod evaluation;
pub mod search;

use std::collections::HashSet;

use shakmaty::uci::UciMove;
use shakmaty::{fen::Fen, CastlingMode, Chess, Position};

use search::tt::position_hash;

/// The engine's root position plus the repetition bookkeeping the
/// search consumes.
pub struct GameState {
    pub chess: Chess,
    seen_once: HashSet<u64>,
    draw_set: HashSet<u64>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        let mut state = Self {
            chess: Chess::default(),
            seen_once: HashSet::new(),
            draw_set: HashSet::new(),
        };
        state.record_position();
        state
    }

    pub fn from_fen(fen: &str) -> Option<Self> {
        let chess: Chess = fen
            .parse::<Fen>()
            .ok()?
            .into_position(CastlingMode::Standard)
            .ok()?;
        let mut state = Self {
            chess,
            seen_once: HashSet::new(),
            draw_set: HashSet::new(),
        };
        state.record_position();
        Some(state)
    }

    /// Applies a UCI move if it is legal in the current position.
    pub fn make_move(&mut self, uci_move: &UciMove) -> bool {
        if let Ok(m) = uci_move.to_move(&self.chess) {
            self.chess.play_unchecked(&m);
            self.record_position();
            true
        } else {
            false
        }
    }

    /// Hashes of positions the game has already visited twice. The
    /// search scores reaching one of them again as a draw.
    pub fn draw_set(&self) -> &HashSet<u64> {
        &self.draw_set
    }

    fn record_position(&mut self) {
        let hash = position_hash(&self.chess);
        if !self.seen_once.insert(hash) {
            self.draw_set.insert(hash);
        }
    }
}

/// Counts the leaves of the move-generation tree to the given depth.
pub fn perft(pos: &Chess, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = pos.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|m| {
            let mut child = pos.clone();
            child.play_unchecked(m);
            perft(&child, depth - 1)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perft_from_the_starting_position() {
        let pos = Chess::default();
        assert_eq!(perft(&pos, 1), 20);
        assert_eq!(perft(&pos, 2), 400);
        assert_eq!(perft(&pos, 3), 8_902);
    }

    #[test]
    fn test_illegal_move_leaves_the_board_unchanged() {
        let mut game = GameState::new();
        let illegal: UciMove = "e2e5".parse().unwrap();
        assert!(!game.make_move(&illegal));
        assert_eq!(position_hash(&game.chess), position_hash(&Chess::default()));
    }

    #[test]
    fn test_repeated_position_enters_the_draw_set() {
        let mut game = GameState::new();
        let start_hash = position_hash(&game.chess);
        for m in ["g1f3", "g8f6", "f3g1", "f6g8"] {
            assert!(game.make_move(&m.parse().unwrap()));
        }
        // The opening position has now occurred twice.
        assert!(game.draw_set().contains(&start_hash));
        assert_eq!(game.draw_set().len(), 1);
    }
}
