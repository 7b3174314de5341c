//! King shelter evaluation.

use shakmaty::{attacks, Board, Color};

const SHELTER_BONUS_PER_PIECE: i32 = 2;

/// Rewards friendly pieces on the squares adjacent to the king.
pub fn evaluate(board: &Board, color: Color) -> i32 {
    match board.king_of(color) {
        Some(king) => {
            let shelter = attacks::king_attacks(king) & board.by_color(color);
            SHELTER_BONUS_PER_PIECE * shelter.count() as i32
        }
        None => 0,
    }
}
