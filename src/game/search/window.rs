// src/game/search/window.rs

//! The alpha/beta search window.
//!
//! All scores in the engine are white-positive, so the window is the one
//! place that knows which bound the side to move is working against:
//! White raises alpha, Black lowers beta. Search code stays side-agnostic
//! by asking the window whether a score cuts off, fails low or fails high.

use shakmaty::Color;

use crate::constants::{MAX_SCORE, MIN_SCORE};

/// +1 for White, -1 for Black. Used to give margins and penalties the
/// side-relative sign in white-positive score space.
pub fn sign(color: Color) -> i32 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub alpha: i16,
    pub beta: i16,
}

impl Window {
    pub fn new(alpha: i16, beta: i16) -> Self {
        Self { alpha, beta }
    }

    /// The full score range, used at the root of every iteration.
    pub fn infinite() -> Self {
        Self::new(MIN_SCORE, MAX_SCORE)
    }

    /// Folds `score` into the window for the given side to move.
    /// Returns true when the window has collapsed (a cutoff).
    pub fn try_cutoff(&mut self, score: i16, color: Color) -> bool {
        match color {
            Color::White => {
                if score > self.alpha {
                    self.alpha = score;
                    self.alpha >= self.beta
                } else {
                    false
                }
            }
            Color::Black => {
                if score < self.beta {
                    self.beta = score;
                    self.beta <= self.alpha
                } else {
                    false
                }
            }
        }
    }

    /// Whether `score` fails to improve on the mover's own bound.
    pub fn fails_low(&self, score: i16, color: Color) -> bool {
        match color {
            Color::White => score <= self.alpha,
            Color::Black => score >= self.beta,
        }
    }

    /// Whether `score` is good enough for the mover to cut off.
    pub fn fails_high(&self, score: i16, color: Color) -> bool {
        match color {
            Color::White => score >= self.beta,
            Color::Black => score <= self.alpha,
        }
    }

    /// Null window around alpha.
    pub fn lower_bound(&self) -> Self {
        Self::new(self.alpha, self.alpha + 1)
    }

    /// Null window around beta.
    pub fn upper_bound(&self) -> Self {
        Self::new(self.beta - 1, self.beta)
    }

    /// The null window around the bound the mover must beat.
    pub fn get_lower_bound(&self, color: Color) -> Self {
        match color {
            Color::White => self.lower_bound(),
            Color::Black => self.upper_bound(),
        }
    }

    /// The null window that tests whether the mover can fail high.
    pub fn get_upper_bound(&self, color: Color) -> Self {
        match color {
            Color::White => self.upper_bound(),
            Color::Black => self.lower_bound(),
        }
    }

    /// The mover's own bound: the score a completed frame returns.
    pub fn bound_score(&self, color: Color) -> i16 {
        match color {
            Color::White => self.alpha,
            Color::Black => self.beta,
        }
    }

    /// Whether there is numerical room left to fail high.
    pub fn can_fail_high(&self, color: Color) -> bool {
        match color {
            Color::White => self.beta < MAX_SCORE,
            Color::Black => self.alpha > MIN_SCORE,
        }
    }
}
