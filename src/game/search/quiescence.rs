// src/game/search/quiescence.rs

//! Quiescence search: extends the leaf with captures (and check
//! evasions) until the position is quiet enough to trust the static
//! evaluation.

use shakmaty::{Chess, Move, Position};

use super::ordering::mvv_lva;
use super::window::{sign, Window};
use super::{clamp_score, get_mate_score, Searcher};
use crate::game::evaluation::material_value;

/// Once this close to the extension limit, even check evasions fall
/// back to captures-only generation.
const EVASION_CUTOVER: i32 = 3;

/// Delta pruning starts this many plies below the current iteration
/// depth.
const DELTA_MIN_EXTENSION: i32 = 4;

impl Searcher {
    pub fn qsearch(&mut self, pos: &Chess, ply: i32, mut window: Window) -> i16 {
        if self.abort() {
            return 0;
        }
        self.total_nodes += 1;
        self.achieved_depth = self.achieved_depth.max(ply);

        if ply >= self.cur_max_qsearch_depth {
            return self.static_eval(pos);
        }

        let color = pos.turn();
        let in_check = pos.is_check();
        let stand_pat = self.static_eval(pos);
        if !in_check && window.try_cutoff(stand_pat, color) {
            return window.bound_score(color);
        }

        let captures_only = !in_check || ply >= self.cur_max_qsearch_depth - EVASION_CUTOVER;
        let mut moves: Vec<Move> = if captures_only {
            pos.capture_moves().to_vec()
        } else {
            pos.legal_moves().to_vec()
        };

        if moves.is_empty() {
            if !in_check {
                return stand_pat;
            }
            if !captures_only || pos.legal_moves().is_empty() {
                return get_mate_score(color, ply);
            }
            // In check with no capture but evasions left: estimate
            // conservatively instead of expanding the evasions.
            return clamp_score(stand_pat as i32 - 100 * sign(color));
        }

        moves.sort_unstable_by(|a, b| mvv_lva(b).cmp(&mvv_lva(a)));

        for m in moves {
            let mut child = pos.clone();
            child.play_unchecked(&m);

            if self.config.use_delta_pruning
                && captures_only
                && ply >= self.cur_depth + DELTA_MIN_EXTENSION
            {
                let margin = (self.cur_max_qsearch_depth - ply)
                    * self.config.delta_margin_per_ply
                    * sign(color);
                let gain = m.capture().map(material_value).unwrap_or(0) * sign(color);
                if window.fails_low(clamp_score(stand_pat as i32 + gain + margin), color) {
                    continue;
                }
            }

            let score = self.qsearch(&child, ply + 1, window);
            if window.try_cutoff(score, color) {
                break;
            }
        }

        window.bound_score(color)
    }
}
