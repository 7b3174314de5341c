// src/game/search/ordering.rs

//! Move ordering: transposition-table move first, captures by MVV-LVA,
//! killer moves, then the remaining quiets by history reputation.

use shakmaty::{Chess, Move, Position, Role};

use super::Searcher;

/// Small ordering values; victims weigh a thousand times more than
/// aggressors.
fn order_value(role: Role) -> i32 {
    match role {
        Role::Pawn => 1,
        Role::Knight | Role::Bishop => 3,
        Role::Rook => 5,
        Role::Queen => 9,
        Role::King => 100,
    }
}

pub(crate) fn mvv_lva(m: &Move) -> i32 {
    let victim = m.capture().map(order_value).unwrap_or(0);
    victim * 1000 - order_value(m.role())
}

impl Searcher {
    pub(crate) fn order_moves(&self, pos: &Chess, ply: i32) -> Vec<Move> {
        let legal = pos.legal_moves();
        let tt_move = self.tt.get_best_move(pos).filter(|m| legal.contains(m));

        let mut captures: Vec<Move> = Vec::new();
        let mut quiets: Vec<Move> = Vec::new();
        for m in legal.iter() {
            if tt_move.as_ref() == Some(m) {
                continue;
            }
            if m.is_capture() {
                captures.push(m.clone());
            } else {
                quiets.push(m.clone());
            }
        }

        captures.sort_unstable_by(|a, b| mvv_lva(b).cmp(&mvv_lva(a)));

        // Killer slots, most recent first. A killer that is not a legal
        // quiet move here simply does not make the bucket.
        let mut killers: Vec<Move> = Vec::new();
        for killer in self.killers.at(ply).into_iter().flatten() {
            if let Some(i) = quiets.iter().position(|m| *m == killer) {
                killers.push(quiets.remove(i));
            }
        }

        quiets.sort_unstable_by(|a, b| {
            self.history
                .get_rep(pos, b)
                .cmp(&self.history.get_rep(pos, a))
        });

        let mut ordered = Vec::with_capacity(legal.len());
        ordered.extend(tt_move);
        ordered.append(&mut captures);
        ordered.append(&mut killers);
        ordered.append(&mut quiets);
        ordered
    }
}
