//! Evaluation terms for knights.

use shakmaty::{Board, Color, Piece, Role};

/// Knights lose value as the board empties: each one is charged half
/// the remaining piece count.
pub fn evaluate(board: &Board, color: Color, total_pieces: i32) -> i32 {
    let knights = board.by_piece(Piece {
        role: Role::Knight,
        color,
    });
    -(total_pieces / 2) * knights.count() as i32
}
