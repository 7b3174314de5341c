//! Evaluation terms for bishops.

use shakmaty::{Board, Color, Piece, Role};

use crate::constants::BISHOP_PAIR_BONUS;

pub fn evaluate(board: &Board, color: Color) -> i32 {
    let bishops = board.by_piece(Piece {
        role: Role::Bishop,
        color,
    });
    if bishops.count() >= 2 {
        BISHOP_PAIR_BONUS
    } else {
        0
    }
}
