// src/game/search/tt.rs

use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{Chess, EnPassantMode, Move};

use super::window::Window;
use crate::constants::{MATE_BASE, MAX_SCORE, MIN_SCORE};

/// Minimum ply from the root at which stored scores may be returned.
/// Keeps stale bounds out of the first plies, where repetition handling
/// and the root move decision must not be short-circuited.
pub const TT_MIN_PLY: i32 = 2;

const DEFAULT_CAPACITY: usize = 1 << 20;

pub fn position_hash(pos: &Chess) -> u64 {
    pos.zobrist_hash::<Zobrist64>(EnPassantMode::Legal).0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Clone, Debug)]
pub struct TtEntry {
    pub hash: u64,
    pub depth: i32,
    pub score: i16,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

/// Direct-mapped table of fixed power-of-two capacity. Collisions
/// overwrite unconditionally.
pub struct TranspositionTable {
    entries: Vec<Option<TtEntry>>,
    mask: u64,
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(2).next_power_of_two();
        Self {
            entries: vec![None; capacity],
            mask: (capacity - 1) as u64,
        }
    }

    pub fn from_megabytes(megabytes: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TtEntry>>();
        let capacity = ((megabytes << 20) / entry_size).max(2);
        let capacity = if capacity.is_power_of_two() {
            capacity
        } else {
            capacity.next_power_of_two() / 2
        };
        Self::with_capacity(capacity)
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.fill(None);
    }

    fn index(&self, hash: u64) -> usize {
        (hash & self.mask) as usize
    }

    /// Stores the result of a completed frame. The flag is derived from
    /// where the score sits relative to the window the frame started
    /// with: at or above beta is a lower bound, at or below alpha an
    /// upper bound, strictly inside is exact.
    pub fn store(
        &mut self,
        pos: &Chess,
        depth: i32,
        ply: i32,
        window: Window,
        score: i16,
        best_move: Option<Move>,
    ) {
        let hash = position_hash(pos);
        let bound = if score >= window.beta {
            Bound::Lower
        } else if score <= window.alpha {
            Bound::Upper
        } else {
            Bound::Exact
        };
        let index = self.index(hash);
        self.entries[index] = Some(TtEntry {
            hash,
            depth,
            score: to_tt_score(score, ply),
            bound,
            best_move,
        });
    }

    /// Returns a usable score for the position, or None. An entry is
    /// usable only when its key matches, it was stored at least as deep
    /// as requested, and its bound applies against the current window.
    pub fn get_score(&self, pos: &Chess, depth: i32, ply: i32, window: &Window) -> Option<i16> {
        let hash = position_hash(pos);
        let entry = self.entries[self.index(hash)].as_ref()?;
        if entry.hash != hash || entry.depth < depth {
            return None;
        }
        let score = from_tt_score(entry.score, ply);
        match entry.bound {
            Bound::Exact => Some(score),
            Bound::Lower if score >= window.beta => Some(score),
            Bound::Upper if score <= window.alpha => Some(score),
            _ => None,
        }
    }

    pub fn get_best_move(&self, pos: &Chess) -> Option<Move> {
        let hash = position_hash(pos);
        let entry = self.entries[self.index(hash)].as_ref()?;
        if entry.hash == hash {
            entry.best_move.clone()
        } else {
            None
        }
    }
}

/// Mate scores are stored as distance from the storing node, not from
/// the root, so a probe at a different ply still reads a correct mate
/// distance.
fn to_tt_score(score: i16, ply: i32) -> i16 {
    let score = score as i32;
    let adjusted = if score > MATE_BASE as i32 {
        score + ply
    } else if score < -(MATE_BASE as i32) {
        score - ply
    } else {
        score
    };
    adjusted.clamp(MIN_SCORE as i32 + 1, MAX_SCORE as i32 - 1) as i16
}

fn from_tt_score(score: i16, ply: i32) -> i16 {
    let score = score as i32;
    let adjusted = if score > MATE_BASE as i32 {
        score - ply
    } else if score < -(MATE_BASE as i32) {
        score + ply
    } else {
        score
    };
    adjusted.clamp(MIN_SCORE as i32 + 1, MAX_SCORE as i32 - 1) as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MATE_SCORE;
    use shakmaty::{Chess, Position};

    fn any_move(pos: &Chess) -> Move {
        pos.legal_moves()[0].clone()
    }

    #[test]
    fn test_store_and_probe_exact() {
        let mut tt = TranspositionTable::with_capacity(1 << 10);
        let pos = Chess::default();
        let window = Window::new(-50, 50);
        tt.store(&pos, 5, 2, window, 10, Some(any_move(&pos)));

        assert_eq!(tt.get_score(&pos, 5, 2, &window), Some(10));
        assert_eq!(tt.get_score(&pos, 3, 2, &window), Some(10));
    }

    #[test]
    fn test_shallower_entry_is_not_trusted() {
        let mut tt = TranspositionTable::with_capacity(1 << 10);
        let pos = Chess::default();
        let window = Window::new(-50, 50);
        tt.store(&pos, 3, 2, window, 10, None);

        assert_eq!(tt.get_score(&pos, 5, 2, &window), None);
    }

    #[test]
    fn test_bounds_respect_the_current_window() {
        let mut tt = TranspositionTable::with_capacity(1 << 10);
        let pos = Chess::default();

        // Score at beta of the original window: stored as a lower bound.
        tt.store(&pos, 4, 2, Window::new(-50, 50), 50, None);
        assert_eq!(tt.get_score(&pos, 4, 2, &Window::new(-100, 40)), Some(50));
        assert_eq!(tt.get_score(&pos, 4, 2, &Window::new(-100, 60)), None);

        // Score at alpha: stored as an upper bound.
        tt.store(&pos, 4, 2, Window::new(-50, 50), -50, None);
        assert_eq!(tt.get_score(&pos, 4, 2, &Window::new(-40, 100)), Some(-50));
        assert_eq!(tt.get_score(&pos, 4, 2, &Window::new(-60, 100)), None);
    }

    #[test]
    fn test_replace_always() {
        let mut tt = TranspositionTable::with_capacity(1 << 10);
        let pos = Chess::default();
        let window = Window::new(-50, 50);
        tt.store(&pos, 6, 2, window, 20, None);
        tt.store(&pos, 2, 2, window, -5, None);

        // The shallower store overwrote the deeper one.
        assert_eq!(tt.get_score(&pos, 6, 2, &window), None);
        assert_eq!(tt.get_score(&pos, 2, 2, &window), Some(-5));
    }

    #[test]
    fn test_best_move_round_trip() {
        let mut tt = TranspositionTable::with_capacity(1 << 10);
        let pos = Chess::default();
        let m = any_move(&pos);
        tt.store(&pos, 4, 2, Window::new(-50, 50), 0, Some(m.clone()));
        assert_eq!(tt.get_best_move(&pos), Some(m));
    }

    #[test]
    fn test_mate_scores_are_ply_adjusted() {
        let mut tt = TranspositionTable::with_capacity(1 << 10);
        let pos = Chess::default();
        let window = Window::infinite();
        // Mate found 5 plies from the root, stored from a node at ply 3.
        tt.store(&pos, 4, 3, window, MATE_SCORE - 5, None);
        // Probed from ply 1 the mate is 4 plies away.
        assert_eq!(tt.get_score(&pos, 4, 1, &window), Some(MATE_SCORE - 3));
    }
}
