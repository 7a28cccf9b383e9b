//! Move budget, mission progress and score bookkeeping.
//!
//! `Mission` holds no event logic of its own. The engine asks it what
//! changed and emits events accordingly; the terminal transitions are
//! one-way latches so each can fire at most once per session.

use serde::{Deserialize, Serialize};

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every required bonus trigger happened
    MissionComplete,
    /// Moves ran out with bonus triggers still outstanding
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    moves_remaining: u32,
    bonus_remaining: u32,
    total_score: u64,
    outcome: Option<Outcome>,
}

impl Mission {
    pub fn new(max_moves: u32, bonus_target: u32) -> Self {
        Self {
            moves_remaining: max_moves,
            bonus_remaining: bonus_target,
            total_score: 0,
            outcome: None,
        }
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    pub fn bonus_remaining(&self) -> u32 {
        self.bonus_remaining
    }

    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    /// Whether either terminal transition has fired
    pub fn game_ended(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Spend one move. Returns the moves left.
    pub fn consume_move(&mut self) -> u32 {
        self.moves_remaining = self.moves_remaining.saturating_sub(1);
        self.moves_remaining
    }

    /// Add points and return the new total. Scores never go down.
    pub fn add_score(&mut self, amount: u64) -> u64 {
        self.total_score = self.total_score.saturating_add(amount);
        self.total_score
    }

    /// Spend one bonus trigger, if any are still required.
    /// Returns `false` (and changes nothing) once the target is met.
    pub fn consume_bonus(&mut self) -> bool {
        if self.bonus_remaining == 0 {
            return false;
        }
        self.bonus_remaining -= 1;
        true
    }

    /// Moves are gone but the mission isn't done, and nothing has ended yet
    pub fn is_out_of_moves(&self) -> bool {
        self.moves_remaining == 0 && self.bonus_remaining > 0 && !self.game_ended()
    }

    /// Mission target met and nothing has ended yet
    pub fn is_mission_met(&self) -> bool {
        self.bonus_remaining == 0 && !self.game_ended()
    }

    /// Latch the game-over outcome. Returns `true` only on the call that
    /// actually ended the session.
    pub fn latch_game_over(&mut self) -> bool {
        self.latch(Outcome::GameOver)
    }

    /// Latch the mission-complete outcome. Returns `true` only on the call
    /// that actually ended the session.
    pub fn latch_mission_complete(&mut self) -> bool {
        self.latch(Outcome::MissionComplete)
    }

    fn latch(&mut self, outcome: Outcome) -> bool {
        if self.outcome.is_some() {
            return false;
        }
        self.outcome = Some(outcome);
        true
    }

    /// Fraction of the target score reached, clamped to `0.0..=1.0`
    pub fn score_progress(&self, target_score: u64) -> f64 {
        if target_score == 0 {
            return 1.0;
        }
        (self.total_score as f64 / target_score as f64).min(1.0)
    }
}
