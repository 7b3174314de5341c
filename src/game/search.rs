// src/game/search.rs

pub mod history;
pub mod ordering;
pub mod pvs;
pub mod quiescence;
pub mod tt;
pub mod window;

use std::collections::HashSet;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use shakmaty::{CastlingMode, Chess, Color, Move, Position};

use crate::constants::{MATE_BASE, MATE_SCORE, MAX_QSEARCH_DEPTH, MAX_SCORE, MIN_SCORE};
use crate::game::evaluation;
use history::{HistoryTable, Killers};
use tt::TranspositionTable;
use window::{sign, Window};

/// Mate score for the given side to move, `ply` plies from the root:
/// the side to move is the one being mated.
pub fn get_mate_score(color: Color, ply: i32) -> i16 {
    (-sign(color) * (MATE_SCORE as i32 - ply)) as i16
}

pub fn is_mate_score(score: i16) -> bool {
    (score as i32).abs() > MATE_BASE as i32
}

/// Packs 32-bit score arithmetic back into the legal 16-bit range.
pub fn clamp_score(score: i32) -> i16 {
    score.clamp(MIN_SCORE as i32 + 1, MAX_SCORE as i32 - 1) as i16
}

/// Formats a white-positive score for UCI output, which is relative to
/// the side to move.
pub fn uci_score(score: i16, turn: Color) -> String {
    let relative = score as i32 * sign(turn);
    if is_mate_score(score) {
        let plies = MATE_SCORE as i32 - (score as i32).abs();
        let moves = (plies + 1) / 2;
        if relative > 0 {
            format!("mate {moves}")
        } else {
            format!("mate -{moves}")
        }
    } else {
        format!("cp {relative}")
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchConfig {
    pub use_null_move_pruning: bool,
    pub use_lmr: bool,
    pub use_futility_pruning: bool,
    pub use_reverse_futility_pruning: bool,
    pub use_razoring: bool,
    pub use_delta_pruning: bool,
    pub razor_margin_per_depth: i32,
    pub futility_margin_per_depth: i32,
    pub reverse_futility_margin_per_depth: i32,
    pub lmr_history_threshold: i32,
    pub delta_margin_per_ply: i32,
    pub tt_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            use_null_move_pruning: true,
            use_lmr: true,
            use_futility_pruning: true,
            use_reverse_futility_pruning: true,
            use_razoring: true,
            use_delta_pruning: true,
            razor_margin_per_depth: 165,
            futility_margin_per_depth: 120,
            reverse_futility_margin_per_depth: 120,
            lmr_history_threshold: -1_320,
            delta_margin_per_ply: 81,
            tt_capacity: 1 << 20,
        }
    }
}

/// The search context: every table, counter and budget one root search
/// needs, owned in one place and threaded through the frames as `&mut
/// self`.
pub struct Searcher {
    pub config: SearchConfig,
    pub tt: TranspositionTable,
    pub history: HistoryTable,
    pub killers: Killers,
    /// Hashes of game positions already seen twice; reaching one of
    /// them at ply 1 or 2 scores as a draw.
    pub draw_set: HashSet<u64>,
    pub cur_depth: i32,
    pub cur_max_qsearch_depth: i32,
    pub total_nodes: u64,
    pub max_nodes: u64,
    pub achieved_depth: i32,
    pub pv_score: i16,
    pub pv: Vec<Move>,
    pub time_budget_ms: u64,
    started: Instant,
    verbose: bool,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        let tt = TranspositionTable::with_capacity(config.tt_capacity);
        Self {
            config,
            tt,
            history: HistoryTable::new(),
            killers: Killers::new(),
            draw_set: HashSet::new(),
            cur_depth: 0,
            cur_max_qsearch_depth: MAX_QSEARCH_DEPTH,
            total_nodes: 0,
            max_nodes: u64::MAX,
            achieved_depth: 0,
            pv_score: 0,
            pv: Vec::new(),
            time_budget_ms: u64::MAX,
            started: Instant::now(),
            verbose: false,
        }
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Zeros every table and counter; the start of a fresh root search.
    pub fn reset(&mut self) {
        self.tt.clear();
        self.history.clear();
        self.killers.clear();
        self.cur_depth = 0;
        self.cur_max_qsearch_depth = MAX_QSEARCH_DEPTH;
        self.total_nodes = 0;
        self.achieved_depth = 0;
        self.pv_score = 0;
        self.pv.clear();
    }

    pub fn abort(&self) -> bool {
        self.total_nodes >= self.max_nodes
            || self.started.elapsed().as_millis() as u64 >= self.time_budget_ms
    }

    /// Static evaluation nudged by the pawn-structure correction
    /// history.
    pub(crate) fn static_eval(&self, pos: &Chess) -> i16 {
        clamp_score(evaluation::evaluate(pos) as i32 + self.history.pawn_correction(pos.board()))
    }

    /// One iteration of iterative deepening.
    pub fn search_deeper(&mut self, root: &Chess) {
        self.cur_depth += 1;
        self.cur_max_qsearch_depth = self.cur_depth + MAX_QSEARCH_DEPTH;
        self.total_nodes = 0;
        self.killers.expand(self.cur_depth);
        self.history.shrink();

        // Seed the previous PV into the table as exact entries at
        // decreasing depths so it is searched first this iteration.
        let pv = std::mem::take(&mut self.pv);
        let mut pos = root.clone();
        for (i, m) in pv.iter().enumerate() {
            self.tt.store(
                &pos,
                self.cur_depth - i as i32,
                i as i32,
                Window::infinite(),
                self.pv_score,
                Some(m.clone()),
            );
            pos.play_unchecked(m);
        }

        let (score, pv) = self.search(root, 0, self.cur_depth, Window::infinite());
        self.pv_score = score;
        self.pv = self.extend_pv_from_tt(root, pv);
    }

    /// A transposition hit returns no line of its own, which can leave
    /// the PV shorter than the search depth; the tail is rebuilt by
    /// following stored best moves. Capped at the iteration depth.
    fn extend_pv_from_tt(&self, root: &Chess, mut pv: Vec<Move>) -> Vec<Move> {
        if pv.is_empty() {
            return pv;
        }
        let mut pos = root.clone();
        for m in &pv {
            pos.play_unchecked(m);
        }
        while (pv.len() as i32) < self.cur_depth {
            match self.tt.get_best_move(&pos) {
                Some(m) if pos.legal_moves().contains(&m) => {
                    pos.play_unchecked(&m);
                    pv.push(m);
                }
                _ => break,
            }
        }
        pv
    }

    /// Iterative-deepening driver. Deepens until the budget runs out or
    /// `max_depth` is reached, keeping the last fully completed
    /// iteration, and always returns a legal move when one exists.
    pub fn find_best_move(
        &mut self,
        root: &Chess,
        time_budget_ms: u64,
        max_nodes: u64,
        max_depth: i32,
    ) -> Option<Move> {
        self.reset();
        self.time_budget_ms = time_budget_ms;
        self.max_nodes = max_nodes;
        self.started = Instant::now();

        let mut best_pv: Vec<Move> = Vec::new();
        let mut best_score = 0;
        while self.cur_depth < max_depth {
            self.search_deeper(root);
            if self.abort() && self.cur_depth > 1 {
                // This iteration was cut short; its result is discarded.
                break;
            }
            best_pv = self.pv.clone();
            best_score = self.pv_score;
            if self.verbose {
                self.print_info(root.turn());
            }
            if self.abort() || is_mate_score(best_score) {
                break;
            }
        }

        self.pv = best_pv;
        self.pv_score = best_score;
        self.pv
            .first()
            .cloned()
            .or_else(|| root.legal_moves().first().cloned())
    }

    fn print_info(&self, turn: Color) {
        let elapsed = self.started.elapsed().as_millis() as u64;
        let nps = if elapsed > 0 {
            self.total_nodes * 1000 / elapsed
        } else {
            0
        };
        let pv = self
            .pv
            .iter()
            .map(|m| m.to_uci(CastlingMode::Standard).to_string())
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "info depth {} seldepth {} score {} nodes {} nps {} time {} pv {}",
            self.cur_depth,
            self.achieved_depth,
            uci_score(self.pv_score, turn),
            self.total_nodes,
            nps,
            elapsed,
            pv
        );
    }
}
