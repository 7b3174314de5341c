//! Property-based tests for system invariants.

use griddle::constants::{MATE_BASE, MATE_SCORE, MAX_SCORE, MIN_SCORE};
use griddle::game::evaluation;
use griddle::game::search::window::Window;
use griddle::game::search::{clamp_score, get_mate_score, is_mate_score};
use proptest::prelude::*;
use shakmaty::{
    fen::Fen, Board, CastlingMode, Chess, Color, FromSetup, Piece, Position, Setup, Square,
};

/// Quiet positions (no checks, no castling rights, no en passant) whose
/// color-flipped mirrors are also valid.
const FENS: &[&str] = &[
    "4k3/8/8/8/8/8/8/4K3 w - - 0 1",
    "4k3/2p5/8/8/3P4/8/8/4K3 b - - 0 1",
    "r3k3/8/8/8/8/8/8/4KB2 w - - 0 1",
    "4k3/1b6/8/8/8/8/6N1/4K3 w - - 0 1",
    "2kr4/pp6/8/8/8/8/6PP/4K2R w - - 0 1",
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1",
];

fn position(fen: &str) -> Chess {
    fen.parse::<Fen>()
        .unwrap()
        .into_position(CastlingMode::Standard)
        .unwrap()
}

/// Flips the board vertically and swaps the colors of every piece and
/// the side to move.
fn mirrored(pos: &Chess) -> Chess {
    let mut board = Board::empty();
    for square in pos.board().occupied() {
        let piece = pos.board().piece_at(square).unwrap();
        let flipped = Square::new(square as u32 ^ 56);
        board.set_piece_at(
            flipped,
            Piece {
                color: !piece.color,
                role: piece.role,
            },
        );
    }
    let mut setup = Setup::empty();
    setup.board = board;
    setup.turn = !pos.turn();
    Chess::from_setup(setup, CastlingMode::Standard).unwrap()
}

fn window_strategy() -> impl Strategy<Value = Window> {
    (MIN_SCORE..MAX_SCORE)
        .prop_flat_map(|alpha| ((alpha + 1)..=MAX_SCORE).prop_map(move |beta| Window::new(alpha, beta)))
}

proptest! {
    #[test]
    fn test_fail_directions_mirror_across_colors(w in window_strategy(), s in MIN_SCORE..=MAX_SCORE) {
        let mirror = Window::new(-w.beta, -w.alpha);
        prop_assert_eq!(w.fails_low(s, Color::White), mirror.fails_low(-s, Color::Black));
        prop_assert_eq!(w.fails_high(s, Color::White), mirror.fails_high(-s, Color::Black));
    }

    #[test]
    fn test_cutoffs_mirror_across_colors(w in window_strategy(), s in MIN_SCORE..=MAX_SCORE) {
        let mut white = w;
        let mut black = Window::new(-w.beta, -w.alpha);
        prop_assert_eq!(white.try_cutoff(s, Color::White), black.try_cutoff(-s, Color::Black));
        prop_assert_eq!(white.alpha, -black.beta);
        prop_assert_eq!(white.beta, -black.alpha);
    }

    #[test]
    fn test_static_eval_is_pure_and_antisymmetric(fen in prop::sample::select(FENS)) {
        let pos = position(fen);
        prop_assert_eq!(evaluation::evaluate(&pos), evaluation::evaluate(&pos));
        prop_assert_eq!(evaluation::evaluate(&pos), -evaluation::evaluate(&mirrored(&pos)));
    }

    #[test]
    fn test_every_mate_distance_reads_as_mate(ply in 0i32..(MATE_SCORE - MATE_BASE) as i32) {
        prop_assert!(is_mate_score(get_mate_score(Color::White, ply)));
        prop_assert!(is_mate_score(get_mate_score(Color::Black, ply)));
        // The two sides' encodings are exact negations.
        prop_assert_eq!(
            get_mate_score(Color::White, ply),
            -get_mate_score(Color::Black, ply)
        );
    }

    #[test]
    fn test_clamped_scores_stay_inside_the_score_range(s in any::<i32>()) {
        let clamped = clamp_score(s);
        prop_assert!(clamped > MIN_SCORE && clamped < MAX_SCORE);
    }
}
