//! Evaluation of a chess position.
//!
//! Returns a white-positive score in centipawns: material plus tapered
//! piece-square tables, pawn structure, piece placement terms, king
//! shelter and a side-to-move bonus.

pub mod bishops;
pub mod king_safety;
pub mod knights;
pub mod pawn_structure;
pub mod pst;
pub mod rooks;

use shakmaty::{Chess, Color, Piece, Position, Role};

use crate::constants::{
    BISHOP_VALUE, KNIGHT_VALUE, MAX_SCORE, MIN_SCORE, PAWN_VALUE, QUEEN_VALUE, ROOK_VALUE,
    SIDE_TO_MOVE_BONUS,
};
use crate::game::search::window::sign;

pub fn material_value(role: Role) -> i32 {
    match role {
        Role::Pawn => PAWN_VALUE,
        Role::Knight => KNIGHT_VALUE,
        Role::Bishop => BISHOP_VALUE,
        Role::Rook => ROOK_VALUE,
        Role::Queen => QUEEN_VALUE,
        Role::King => 0,
    }
}

/// Interpolates between mid-game and end-game values by the number of
/// pieces left on the board: 32 pieces reads the mid-game table exactly,
/// an empty board the end-game table.
fn taper(mg: i32, eg: i32, total_pieces: i32) -> i32 {
    mg * total_pieces / 32 + eg * (32 - total_pieces) / 32
}

pub fn evaluate(pos: &Chess) -> i16 {
    let board = pos.board();
    let total_pieces = board.occupied().count() as i32;
    let mut total = 0i32;

    for color in Color::ALL {
        let mut side = 0i32;
        for role in Role::ALL {
            let (mg, eg) = pst::tables(role);
            let material = material_value(role);
            for square in board.by_piece(Piece { role, color }) {
                let index = pst::table_index(color, square);
                side += material + taper(mg[index], eg[index], total_pieces);
            }
        }
        side += pawn_structure::evaluate(board, color);
        side += knights::evaluate(board, color, total_pieces);
        side += bishops::evaluate(board, color);
        side += rooks::evaluate(board, color, total_pieces);
        side += king_safety::evaluate(board, color);
        total += side * sign(color);
    }

    total += SIDE_TO_MOVE_BONUS * sign(pos.turn());
    total.clamp(MIN_SCORE as i32 + 1, MAX_SCORE as i32 - 1) as i16
}
