// src/game/evaluation/pawn_structure.rs

use shakmaty::{attacks, Bitboard, Board, Color, File, Piece, Role, Square};

const DOUBLED_PAWN_PENALTY: i32 = -6;
const ISOLATED_PAWN_PENALTY: i32 = -21;
const ISOLATED_D_FILE_PENALTY: i32 = -4;
const CONNECTED_PASSER_BONUS: i32 = 9;
const BLOCKED_PAWN_PENALTY: i32 = -4;

pub fn evaluate(board: &Board, color: Color) -> i32 {
    let pawns = board.by_piece(Piece {
        role: Role::Pawn,
        color,
    });
    let mut score = 0;

    for file in File::ALL {
        let file_bb = Bitboard::from_file(file);
        let on_file = (pawns & file_bb).count() as i32;
        if on_file == 0 {
            continue;
        }
        score += (on_file - 1) * DOUBLED_PAWN_PENALTY;

        // A file group is isolated when every pawn of the group sits on
        // this single file.
        let group = pawns & (file_bb | adjacent_files(file));
        if group.count() as i32 == on_file {
            score += ISOLATED_PAWN_PENALTY;
            if file == File::D {
                score += ISOLATED_D_FILE_PENALTY;
            }
        }
    }

    for pawn_square in pawns {
        if in_opponent_half(pawn_square, color) {
            // Supporters: own pawns on the squares diagonally behind.
            let supporters = attacks::pawn_attacks(!color, pawn_square) & pawns;
            score += CONNECTED_PASSER_BONUS * supporters.count() as i32;
        }
        if let Some(front) = forward_square(pawn_square, color) {
            if board.by_color(color).contains(front) {
                score += BLOCKED_PAWN_PENALTY;
            }
        }
    }

    score
}

fn adjacent_files(file: File) -> Bitboard {
    let file_index = file as usize;
    let mut adjacent = Bitboard::EMPTY;
    if file_index > 0 {
        adjacent |= Bitboard::from_file(File::new((file_index - 1) as u32));
    }
    if file_index < 7 {
        adjacent |= Bitboard::from_file(File::new((file_index + 1) as u32));
    }
    adjacent
}

fn in_opponent_half(square: Square, color: Color) -> bool {
    match color {
        Color::White => square as usize >= 40,
        Color::Black => square as usize <= 23,
    }
}

fn forward_square(square: Square, color: Color) -> Option<Square> {
    square.offset(match color {
        Color::White => 8,
        Color::Black => -8,
    })
}
