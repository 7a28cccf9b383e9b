//! Match detection.
//!
//! Two shapes count as a match:
//! - axis runs: three or more same-colored normal tiles in a straight line
//!   along one of the three hex axes
//! - rhombus clusters: two adjacent same-colored tiles plus both cells they
//!   share as neighbors, all four the same color
//!
//! A tile may belong to several shapes; the result is a set. Bonus tiles are
//! never part of a match and stop any walk that reaches them.

use crate::board::{Board, ColorValue};
use crate::hex::{Coord, Direction, AXES};
use std::collections::BTreeSet;

/// Minimum length of a straight run
pub const MIN_RUN: usize = 3;

/// Deduplicated set of matched cells, ordered by coordinate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    coords: BTreeSet<Coord>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, coord: Coord) -> bool {
        self.coords.insert(coord)
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.coords.contains(&coord)
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords.iter().copied()
    }
}

impl Extend<Coord> for MatchSet {
    fn extend<I: IntoIterator<Item = Coord>>(&mut self, iter: I) {
        self.coords.extend(iter);
    }
}

impl FromIterator<Coord> for MatchSet {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self {
            coords: iter.into_iter().collect(),
        }
    }
}

/// Every matched cell on the board
pub fn find_all_matches(board: &Board) -> MatchSet {
    let mut matches = MatchSet::new();
    find_axis_runs(board, &mut matches);
    find_rhombus_matches(board, &mut matches);
    matches
}

/// Add every cell that is part of a straight run of at least [`MIN_RUN`]
pub fn find_axis_runs(board: &Board, matches: &mut MatchSet) {
    for tile in board.tiles() {
        let Some(color) = tile.color() else { continue };

        for (forward, backward) in AXES {
            let mut line = walk(board, tile.coord, color, forward);
            line.push(tile.coord);
            line.extend(walk(board, tile.coord, color, backward));

            if line.len() >= MIN_RUN {
                matches.extend(line);
            }
        }
    }
}

/// Cells past `start` in `direction` that hold normal tiles of `color`,
/// stopping at the first cell that doesn't
fn walk(board: &Board, start: Coord, color: ColorValue, direction: Direction) -> Vec<Coord> {
    let mut cells = Vec::new();
    let mut current = start.neighbor(direction);
    while board.color_at(current) == Some(color) {
        cells.push(current);
        current = current.neighbor(direction);
    }
    cells
}

/// Add every cell that is part of a four-tile rhombus of one color
pub fn find_rhombus_matches(board: &Board, matches: &mut MatchSet) {
    for tile in board.tiles() {
        let Some(color) = tile.color() else { continue };
        let t1 = tile.coord;

        for direction in Direction::FORWARD {
            let t2 = t1.neighbor(direction);
            if board.color_at(t2).is_none() {
                continue;
            }

            let common = t1.common_neighbors(&t2);
            let [t3, t4] = common.as_slice() else { continue };

            let same = [t2, *t3, *t4]
                .iter()
                .all(|&c| board.color_at(c) == Some(color));
            if same {
                matches.extend([t1, t2, *t3, *t4]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::tests::striped_board;
    use crate::board::TileKind;
    use crate::hex::Dimensions;
    use pretty_assertions::assert_eq;

    fn paint(board: &mut Board, cells: &[(i32, i32)], color: ColorValue) {
        for &(col, row) in cells {
            board.recolor(Coord::new(col, row), color).unwrap();
        }
    }

    fn coords(cells: &[(i32, i32)]) -> MatchSet {
        cells.iter().map(|&(c, r)| Coord::new(c, r)).collect()
    }

    #[test]
    fn test_clean_board_has_no_matches() {
        let board = striped_board(Dimensions::new(7, 7));
        assert!(find_all_matches(&board).is_empty());
    }

    #[test]
    fn test_vertical_run_of_three() {
        let mut board = striped_board(Dimensions::new(7, 7));
        paint(&mut board, &[(3, 1), (3, 2), (3, 3)], ColorValue::Purple);
        assert_eq!(find_all_matches(&board), coords(&[(3, 1), (3, 2), (3, 3)]));
    }

    #[test]
    fn test_diagonal_run_crosses_column_parity() {
        let mut board = striped_board(Dimensions::new(7, 7));
        // UpRight from (1,2): (2,2) then (3,3)
        let cells = [(1, 2), (2, 2), (3, 3), (4, 3)];
        paint(&mut board, &cells, ColorValue::Orange);
        assert_eq!(find_all_matches(&board), coords(&cells));
    }

    #[test]
    fn test_pair_is_not_a_match() {
        let mut board = striped_board(Dimensions::new(5, 5));
        paint(&mut board, &[(2, 1), (2, 2)], ColorValue::Yellow);
        assert!(find_all_matches(&board).is_empty());
    }

    #[test]
    fn test_rhombus_of_four() {
        let mut board = striped_board(Dimensions::new(7, 7));
        let cells = [(2, 2), (2, 3), (3, 3), (1, 3)];
        paint(&mut board, &cells, ColorValue::Purple);

        let mut runs = MatchSet::new();
        find_axis_runs(&board, &mut runs);
        assert!(runs.is_empty(), "a rhombus contains no straight run");

        assert_eq!(find_all_matches(&board), coords(&cells));
    }

    #[test]
    fn test_rhombus_needs_all_four_colors() {
        let mut board = striped_board(Dimensions::new(7, 7));
        paint(&mut board, &[(2, 2), (2, 3), (3, 3)], ColorValue::Purple);
        assert!(find_all_matches(&board).is_empty());
    }

    #[test]
    fn test_rhombus_cut_by_board_edge() {
        let mut board = striped_board(Dimensions::new(4, 4));
        // The pair at column 0 would need (-1, 1) to complete its rhombus
        paint(&mut board, &[(0, 0), (0, 1), (1, 1)], ColorValue::Yellow);
        assert!(find_all_matches(&board).is_empty());
    }

    #[test]
    fn test_bonus_tile_breaks_a_run() {
        let dims = Dimensions::new(5, 5);
        let mut board = Board::from_fn(dims, |c| {
            if c == Coord::new(2, 2) {
                Some(TileKind::Bonus)
            } else {
                Some(TileKind::Normal(crate::board::tests::striped(c)))
            }
        });
        paint(&mut board, &[(2, 0), (2, 1), (2, 3), (2, 4)], ColorValue::Purple);
        assert!(find_all_matches(&board).is_empty());
    }

    #[test]
    fn test_empty_slot_breaks_a_run() {
        let mut board = striped_board(Dimensions::new(5, 5));
        paint(&mut board, &[(2, 0), (2, 1), (2, 3)], ColorValue::Purple);
        board.take(Coord::new(2, 2)).unwrap();
        assert!(find_all_matches(&board).is_empty());
    }

    #[test]
    fn test_overlapping_shapes_are_deduplicated() {
        let mut board = striped_board(Dimensions::new(7, 7));
        // Rhombus plus a vertical run sharing (2,2) and (2,3)
        let cells = [(2, 1), (2, 2), (2, 3), (3, 3), (1, 3)];
        paint(&mut board, &cells, ColorValue::Purple);
        assert_eq!(find_all_matches(&board), coords(&cells));
    }
}
