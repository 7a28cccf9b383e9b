//! Automated players.
//!
//! Used by the headless driver and by tests that need long random games.
//! Two difficulty levels:
//! - Easy: a random swap that produces at least one match
//! - Greedy: the swap that clears the most tiles right away

use crate::board::{Board, Tile};
use crate::hex::{Coord, Direction};
use crate::matcher;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Bot difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotDifficulty {
    Easy,
    Greedy,
}

/// A swap known to produce a match on the current board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapCandidate {
    pub origin: Coord,
    pub direction: Direction,
    pub target: Coord,
    /// Tiles the first pass would clear
    pub cleared: usize,
}

/// Every swap that would produce at least one match.
///
/// Each unordered pair of cells is tried once, from the lower coordinate.
pub fn find_productive_swaps(board: &Board) -> Vec<SwapCandidate> {
    let mut trial = board.clone();
    let mut candidates = Vec::new();

    for origin in board.dimensions().cells() {
        if !board.get(origin).map_or(false, Tile::is_normal) {
            continue;
        }
        for direction in Direction::ALL {
            let target = origin.neighbor(direction);
            if target <= origin || !board.get(target).map_or(false, Tile::is_normal) {
                continue;
            }
            if trial.swap_slots(origin, target).is_err() {
                continue;
            }
            let cleared = matcher::find_all_matches(&trial).len();
            if trial.swap_slots(origin, target).is_err() {
                trial = board.clone();
            }
            if cleared > 0 {
                candidates.push(SwapCandidate {
                    origin,
                    direction,
                    target,
                    cleared,
                });
            }
        }
    }

    candidates
}

/// A bot player that picks swaps
pub struct Bot {
    pub difficulty: BotDifficulty,
    rng: StdRng,
}

impl Bot {
    pub fn new(difficulty: BotDifficulty) -> Self {
        Self {
            difficulty,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(difficulty: BotDifficulty, seed: u64) -> Self {
        Self {
            difficulty,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose a swap, or `None` when the board has no productive swap
    pub fn choose_swap(&mut self, board: &Board) -> Option<SwapCandidate> {
        let candidates = find_productive_swaps(board);
        match self.difficulty {
            BotDifficulty::Easy => candidates.choose(&mut self.rng).copied(),
            // First of the largest, so results are stable for a given board
            BotDifficulty::Greedy => candidates
                .iter()
                .rev()
                .max_by_key(|c| c.cleared)
                .copied(),
        }
    }

    /// Any legal swap at all, for when nothing is productive. The engine will
    /// revert it, but it still exercises the input path.
    pub fn choose_fallback(&mut self, board: &Board) -> Option<(Coord, Direction)> {
        let moves: Vec<(Coord, Direction)> = board
            .tiles()
            .filter(|t| t.is_normal())
            .flat_map(|t| Direction::ALL.map(|d| (t.coord, d)))
            .filter(|(c, d)| board.get(c.neighbor(*d)).map_or(false, Tile::is_normal))
            .collect();
        moves.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::striped_board;
    use crate::board::ColorValue;
    use crate::hex::Dimensions;

    #[test]
    fn test_bot_creation() {
        let bot = Bot::new(BotDifficulty::Easy);
        assert_eq!(bot.difficulty, BotDifficulty::Easy);
    }

    #[test]
    fn test_clean_striped_board_has_no_productive_swaps() {
        let board = striped_board(Dimensions::new(6, 6));
        assert!(find_productive_swaps(&board).is_empty());

        let mut bot = Bot::with_seed(BotDifficulty::Easy, 1);
        assert!(bot.choose_swap(&board).is_none());
        assert!(bot.choose_fallback(&board).is_some());
    }

    #[test]
    fn test_finds_the_completing_swap() {
        let mut board = striped_board(Dimensions::new(7, 7));
        for row in [1, 2, 4] {
            board.recolor(Coord::new(3, row), ColorValue::Purple).unwrap();
        }
        let before = board.clone();

        let candidates = find_productive_swaps(&board);
        assert!(candidates
            .iter()
            .any(|c| c.origin == Coord::new(3, 3) && c.target == Coord::new(3, 4)));
        assert!(candidates.iter().all(|c| c.cleared >= 3));
        assert_eq!(board, before);
    }

    #[test]
    fn test_greedy_prefers_bigger_clears() {
        let mut board = striped_board(Dimensions::new(7, 7));
        // Swapping (4,2) into (3,2) makes a run of four; (1,3) into (0,3) a run of three
        for cell in [(3, 0), (3, 1), (3, 3), (4, 2)] {
            board
                .recolor(Coord::new(cell.0, cell.1), ColorValue::Purple)
                .unwrap();
        }
        for row in [4, 5] {
            board.recolor(Coord::new(0, row), ColorValue::Yellow).unwrap();
        }
        board.recolor(Coord::new(1, 3), ColorValue::Yellow).unwrap();

        let mut bot = Bot::with_seed(BotDifficulty::Greedy, 9);
        let choice = bot.choose_swap(&board).unwrap();
        assert_eq!(choice.cleared, 4);
    }
}
