//! Evaluation terms for rooks.

use shakmaty::{Bitboard, Board, Color, Piece, Role, Square};

const OPEN_FILE_BONUS: i32 = 18;
const SEMI_OPEN_FILE_BONUS: i32 = 7;

/// Rooks gain value as the board empties and like files without pawns.
pub fn evaluate(board: &Board, color: Color, total_pieces: i32) -> i32 {
    let rooks = board.by_piece(Piece {
        role: Role::Rook,
        color,
    });

    let mut score = rooks.count() as i32 * ((32 - total_pieces) / 2);
    for rook_square in rooks {
        score += evaluate_file(board, color, rook_square);
    }
    score
}

fn evaluate_file(board: &Board, color: Color, square: Square) -> i32 {
    let file_bb = Bitboard::from_file(square.file());
    let friendly_pawns = board.by_piece(Piece {
        role: Role::Pawn,
        color,
    });

    if (board.pawns() & file_bb).is_empty() {
        OPEN_FILE_BONUS
    } else if (friendly_pawns & file_bb).is_empty() {
        SEMI_OPEN_FILE_BONUS
    } else {
        0
    }
}
