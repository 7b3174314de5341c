//! End-to-end search scenarios driven through the iterative-deepening
//! controller.

use griddle::constants::MATE_SCORE;
use griddle::game::search::tt::position_hash;
use griddle::game::search::window::Window;
use griddle::game::search::{get_mate_score, SearchConfig, Searcher};
use shakmaty::{fen::Fen, CastlingMode, Chess, Color, Move, Position};

fn position(fen: &str) -> Chess {
    fen.parse::<Fen>()
        .unwrap()
        .into_position(CastlingMode::Standard)
        .unwrap()
}

fn uci(m: &Move) -> String {
    m.to_uci(CastlingMode::Standard).to_string()
}

/// Runs a fixed-depth search with no time or node limit.
fn search_to_depth(pos: &Chess, depth: i32) -> (Searcher, Option<Move>) {
    let mut searcher = Searcher::new(SearchConfig::default());
    let best = searcher.find_best_move(pos, u64::MAX, u64::MAX, depth);
    (searcher, best)
}

#[test]
fn test_mate_in_one_is_found() {
    let pos = position("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1");
    let (searcher, best) = search_to_depth(&pos, 3);

    assert_eq!(uci(&best.unwrap()), "a1a8");
    // Black is mated one ply from the root.
    assert_eq!(searcher.pv_score, MATE_SCORE - 1);
}

#[test]
fn test_search_avoids_the_fools_mate_trap() {
    // After 1. f3 e5, advancing the g-pawn walks into Qh4 mate. A
    // depth-limited material count would call it harmless; the search
    // with its quiescence backing must steer clear.
    let pos = position("rnbqkbnr/pppp1ppp/8/4p3/8/5P2/PPPPP1PP/RNBQKBNR w KQkq - 0 2");
    let (searcher, best) = search_to_depth(&pos, 4);

    assert_ne!(uci(&best.unwrap()), "g2g4");
    // White may stand worse, but nowhere near a queen's worth worse.
    assert!(searcher.pv_score > -900);
}

#[test]
fn test_starting_position_depth_four() {
    let pos = Chess::default();
    let (searcher, best) = search_to_depth(&pos, 4);

    let openings = ["e2e4", "d2d4", "g1f3", "c2c4", "b1c3", "e2e3"];
    let chosen = uci(&best.unwrap());
    assert!(openings.contains(&chosen.as_str()), "unexpected opening {chosen}");
    assert_eq!(searcher.pv.len(), 4);
    assert!(searcher.pv_score.abs() <= 100);
}

#[test]
fn test_principal_variation_is_legal() {
    let pos = Chess::default();
    let (searcher, _) = search_to_depth(&pos, 4);

    let mut replay = pos.clone();
    for m in &searcher.pv {
        assert!(replay.legal_moves().contains(m), "illegal pv move {}", uci(m));
        replay.play_unchecked(m);
    }
}

#[test]
fn test_search_is_deterministic() {
    let pos = position("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    let (first, best_first) = search_to_depth(&pos, 4);
    let (second, best_second) = search_to_depth(&pos, 4);

    assert_eq!(best_first, best_second);
    assert_eq!(first.pv_score, second.pv_score);
    assert_eq!(first.pv, second.pv);
}

#[test]
fn test_null_move_does_not_invent_an_advantage() {
    // King-and-pawn endgame where passing the move would be attractive;
    // White is stalemated outright, and must not be scored as winning.
    let pos = position("8/8/8/8/8/6k1/6p1/6K1 w - - 0 1");
    let (searcher, best) = search_to_depth(&pos, 6);

    assert!(best.is_none());
    assert_eq!(searcher.pv_score, 0);
}

#[test]
fn test_stalemate_scores_zero() {
    let pos = position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    let (searcher, best) = search_to_depth(&pos, 1);

    assert!(best.is_none());
    assert_eq!(searcher.pv_score, 0);
}

#[test]
fn test_checkmated_root_reports_mate() {
    let pos = position("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
    let mut searcher = Searcher::new(SearchConfig::default());
    let (score, pv) = searcher.search(&pos, 0, 1, Window::infinite());

    assert_eq!(score, get_mate_score(Color::Black, 0));
    assert_eq!(score, MATE_SCORE);
    assert!(pv.is_empty());
}

#[test]
fn test_repetition_draws_at_shallow_plies() {
    let pos = Chess::default();
    let mut searcher = Searcher::new(SearchConfig::default());
    // Every successor of the root counts as an already-repeated
    // position, so depth-3 search sees nothing but draws.
    for m in pos.legal_moves() {
        let mut child = pos.clone();
        child.play_unchecked(&m);
        searcher.draw_set.insert(position_hash(&child));
    }

    let best = searcher.find_best_move(&pos, u64::MAX, u64::MAX, 3);
    assert!(best.is_some());
    assert_eq!(searcher.pv_score, 0);
}

#[test]
fn test_always_returns_a_move_under_a_node_cap() {
    let pos = Chess::default();
    let mut searcher = Searcher::new(SearchConfig::default());
    // A cap this small aborts depth 1 almost immediately; a legal move
    // must still come back.
    let best = searcher.find_best_move(&pos, u64::MAX, 10, 8);
    let best = best.unwrap();
    assert!(pos.legal_moves().contains(&best));
}
