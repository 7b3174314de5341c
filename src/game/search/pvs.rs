// src/game/search/pvs.rs

//! Principal-variation alpha-beta search.
//!
//! Every frame owns a copy of the window; the first expanded move, check
//! positions and checking replies are "interesting" and exempt from
//! pruning. Quiet moves feed the history tables on cutoffs and
//! fail-lows, and the transposition table mediates every full-depth
//! child search.

use shakmaty::{Chess, Move, Position};

use super::tt::{position_hash, TT_MIN_PLY};
use super::window::{sign, Window};
use super::{clamp_score, get_mate_score, is_mate_score, Searcher};
use crate::game::evaluation;

const RAZOR_MIN_PLY: i32 = 3;
const RAZOR_DEPTH: i32 = 4;
const NMP_MIN_DEPTH: i32 = 0;
const NMP_MIN_PLY: i32 = 2;
const FP_MIN_PLY: i32 = 2;
const FP_MAX_DEPTH: i32 = 3;
const RFP_MIN_PLY: i32 = 2;
const RFP_MAX_DEPTH: i32 = 3;
const LMR_MIN_PLY: i32 = 2;
const LMR_MIN_DEPTH: i32 = 3;
const LMR_MIN_EXP_NODES: i32 = 4;
const LMR_BASE_REDUCTION: i32 = 3;
const LMR_DEEP_REDUCTION: i32 = 4;

fn is_quiet(m: &Move) -> bool {
    !m.is_capture() && m.promotion().is_none()
}

impl Searcher {
    pub fn search(
        &mut self,
        pos: &Chess,
        ply: i32,
        depth: i32,
        mut window: Window,
    ) -> (i16, Vec<Move>) {
        if self.abort() && self.cur_depth > 1 {
            return (0, Vec::new());
        }
        if depth <= 0 {
            return (self.qsearch(pos, ply, window), Vec::new());
        }
        if (ply == 1 || ply == 2) && self.draw_set.contains(&position_hash(pos)) {
            return (0, Vec::new());
        }
        self.total_nodes += 1;

        let color = pos.turn();
        let in_check = pos.is_check();
        let mut ply = ply;
        let mut depth = depth;

        // Razoring: when even a hopeful quiescence probe fails low, keep
        // searching, but shallower.
        if self.config.use_razoring && !in_check && ply >= RAZOR_MIN_PLY && depth == RAZOR_DEPTH {
            let probe = self.qsearch(pos, ply, window.get_lower_bound(color));
            let margin = self.config.razor_margin_per_depth * depth * sign(color);
            if window.fails_low(clamp_score(probe as i32 + margin), color) {
                depth -= 2;
                ply += 2;
            }
        }

        // Null move: hand the opponent a free tempo; a position that
        // still fails high is cut. Unsound in zugzwang, so skipped when
        // in check, near mate scores, or without room to fail high.
        if self.config.use_null_move_pruning
            && depth >= NMP_MIN_DEPTH
            && ply >= NMP_MIN_PLY
            && !in_check
            && !is_mate_score(self.pv_score)
            && window.can_fail_high(color)
        {
            if let Ok(null_child) = pos.clone().swap_turn() {
                let reduction = if ply <= 4 { 2 } else { 3 };
                let (score, _) = self.search(
                    &null_child,
                    ply + 1,
                    depth - reduction - 1,
                    window.get_upper_bound(color),
                );
                if window.fails_high(score, color) {
                    return (score, Vec::new());
                }
            }
        }

        let moves = self.order_moves(pos, ply);
        let mut pv: Vec<Move> = Vec::new();
        let mut expanded = 0;

        for m in moves {
            expanded += 1;
            let mut child = pos.clone();
            child.play_unchecked(&m);
            let quiet = is_quiet(&m);
            if quiet {
                self.history.add_visited(pos, &m);
            }
            let interesting = expanded == 1 || in_check || child.is_check();
            let child_eval = self.static_eval(&child);

            if self.config.use_futility_pruning
                && !interesting
                && ply >= FP_MIN_PLY
                && depth <= FP_MAX_DEPTH
            {
                let margin = self.config.futility_margin_per_depth * depth * sign(color);
                if window.fails_low(clamp_score(child_eval as i32 + margin), color) {
                    continue;
                }
            }

            if self.config.use_reverse_futility_pruning
                && !interesting
                && ply >= RFP_MIN_PLY
                && depth <= RFP_MAX_DEPTH
            {
                let margin = self.config.reverse_futility_margin_per_depth * depth * sign(color);
                if window.fails_high(clamp_score(child_eval as i32 - margin), color) {
                    continue;
                }
            }

            // Late-move reduction: a null-window probe at reduced depth;
            // only a move that survives it earns the full-depth search.
            if self.config.use_lmr
                && !interesting
                && ply >= LMR_MIN_PLY
                && depth >= LMR_MIN_DEPTH
                && expanded >= LMR_MIN_EXP_NODES
            {
                let reduction = if self.history.get_rep(pos, &m) < self.config.lmr_history_threshold
                {
                    LMR_DEEP_REDUCTION
                } else {
                    LMR_BASE_REDUCTION
                };
                let (probe, _) =
                    self.search(&child, ply + 1, depth - reduction, window.get_lower_bound(color));
                if window.fails_low(probe, color) {
                    continue;
                }
            }

            // The first move carries the principal variation; it is
            // searched directly so a table hit cannot truncate the line.
            let (score, child_pv) = if expanded == 1 {
                let result = self.search(&child, ply + 1, depth - 1, window);
                if !self.abort() {
                    self.tt.store(
                        &child,
                        depth - 1,
                        ply + 1,
                        window,
                        result.0,
                        result.1.first().cloned(),
                    );
                }
                result
            } else {
                self.probe_tt(&child, ply + 1, depth - 1, window)
            };

            if window.fails_low(score, color) {
                if quiet {
                    self.history.decrease_q_rep(pos, &m, depth);
                }
                continue;
            }

            self.tt
                .store(pos, depth, ply, window, score, Some(m.clone()));
            pv = Vec::with_capacity(child_pv.len() + 1);
            pv.push(m.clone());
            pv.extend(child_pv);

            if window.try_cutoff(score, color) {
                if quiet {
                    self.history.increase_q_rep(pos, &m, depth);
                    self.killers.add(ply, m);
                }
                return (window.bound_score(color), pv);
            }
        }

        if expanded == 0 {
            let score = if in_check {
                get_mate_score(color, ply)
            } else {
                0
            };
            return (score, Vec::new());
        }

        let score = window.bound_score(color);
        if !self.abort() && !in_check && !is_mate_score(score) {
            let raw = evaluation::evaluate(pos);
            self.history.update_pawn_corr_hist(pos, score, raw, depth);
        }
        (score, pv)
    }

    /// Full-depth child search mediated by the transposition table.
    fn probe_tt(&mut self, pos: &Chess, ply: i32, depth: i32, window: Window) -> (i16, Vec<Move>) {
        if ply >= TT_MIN_PLY {
            if let Some(score) = self.tt.get_score(pos, depth, ply, &window) {
                return (score, Vec::new());
            }
        }
        let (score, pv) = self.search(pos, ply, depth, window);
        if !self.abort() {
            self.tt
                .store(pos, depth, ply, window, score, pv.first().cloned());
        }
        (score, pv)
    }
}
