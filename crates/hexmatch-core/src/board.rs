//! Board state: tiles, slots, generation and column collapse.
//!
//! This module contains:
//! - Tile colors and kinds (normal vs bonus)
//! - The slot grid, which is the single owner of every tile
//! - Initial board generation with match repair
//! - Gravity: collapsing columns around immovable bonus tiles and refilling
//! - A serializable snapshot for renderers

use crate::engine::EngineError;
use crate::hex::{Coord, Dimensions};
use crate::matcher;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Passes of the generation repair loop before giving up
pub const MAX_REPAIR_PASSES: u32 = 100;

/// Tile colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorValue {
    Red,
    Pink,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl ColorValue {
    /// All colors, in palette order
    pub const ALL: [ColorValue; 6] = [
        ColorValue::Red,
        ColorValue::Pink,
        ColorValue::Green,
        ColorValue::Yellow,
        ColorValue::Purple,
        ColorValue::Orange,
    ];

    /// The first `count` colors of the palette
    pub fn palette(count: u8) -> &'static [ColorValue] {
        &Self::ALL[..(count as usize).clamp(1, Self::ALL.len())]
    }

    /// A uniformly random color from the first `count` colors
    pub fn random<R: Rng + ?Sized>(rng: &mut R, count: u8) -> ColorValue {
        let palette = Self::palette(count);
        palette[rng.gen_range(0..palette.len())]
    }

    /// A uniformly random color from the first `count` colors, excluding
    /// `current`. Falls back to `current` when nothing else is available.
    pub fn random_other_than<R: Rng + ?Sized>(
        rng: &mut R,
        count: u8,
        current: ColorValue,
    ) -> ColorValue {
        let others: Vec<ColorValue> = Self::palette(count)
            .iter()
            .copied()
            .filter(|c| *c != current)
            .collect();
        others.choose(rng).copied().unwrap_or(current)
    }
}

/// What sort of tile occupies a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Matchable, falls under gravity, replaced when matched
    Normal(ColorValue),
    /// Immovable, never matched; triggered by an adjacent match
    Bonus,
}

/// Unique tile identity, stable across moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

/// A single tile on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    /// Always equal to the slot holding this tile
    pub coord: Coord,
    pub kind: TileKind,
}

impl Tile {
    /// The tile's color, if it is a normal tile
    pub fn color(&self) -> Option<ColorValue> {
        match self.kind {
            TileKind::Normal(color) => Some(color),
            TileKind::Bonus => None,
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self.kind, TileKind::Normal(_))
    }

    pub fn is_bonus(&self) -> bool {
        matches!(self.kind, TileKind::Bonus)
    }
}

/// Movement of one tile during a column collapse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileFall {
    pub tile: TileId,
    pub color: ColorValue,
    /// Where the fall starts; spawned tiles start one row above the board
    pub from: Coord,
    pub to: Coord,
    /// Whether the tile was created by the refill
    pub spawned: bool,
}

/// The slot grid.
///
/// Slots are stored column-major. Every mutation keeps each tile's `coord`
/// in step with the slot that holds it.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    dims: Dimensions,
    slots: Vec<Option<Tile>>,
    next_id: u32,
}

impl Board {
    /// Create an empty board
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            slots: vec![None; dims.cell_count()],
            next_id: 0,
        }
    }

    /// Build a board cell by cell. `f` returns the kind of tile to place at a
    /// coordinate, or `None` for an empty slot.
    pub fn from_fn<F>(dims: Dimensions, mut f: F) -> Self
    where
        F: FnMut(Coord) -> Option<TileKind>,
    {
        let mut board = Self::new(dims);
        for coord in dims.cells() {
            if let Some(kind) = f(coord) {
                let tile = board.new_tile(coord, kind);
                if let Some(index) = board.index(coord) {
                    board.slots[index] = Some(tile);
                }
            }
        }
        board
    }

    /// Generate a fresh board with no pre-existing matches.
    ///
    /// `bonus_tiles` bonus tiles are scattered over distinct cells, every other
    /// cell gets a random normal tile, and matched normal tiles are recolored
    /// until the board is match-free.
    pub fn generate<R: Rng + ?Sized>(
        dims: Dimensions,
        bonus_tiles: usize,
        color_count: u8,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        let mut cells: Vec<Coord> = dims.cells().collect();
        let bonus_count = bonus_tiles.min(cells.len());
        let (picked, _) = cells.partial_shuffle(&mut *rng, bonus_count);
        let bonus_cells: HashSet<Coord> = picked.iter().copied().collect();

        let mut board = Self::from_fn(dims, |coord| {
            if bonus_cells.contains(&coord) {
                Some(TileKind::Bonus)
            } else {
                Some(TileKind::Normal(ColorValue::random(&mut *rng, color_count)))
            }
        });

        for _ in 0..MAX_REPAIR_PASSES {
            let matches = matcher::find_all_matches(&board);
            if matches.is_empty() {
                return Ok(board);
            }
            for coord in matches.iter() {
                if let Some(current) = board.get(coord).and_then(Tile::color) {
                    let color = ColorValue::random_other_than(&mut *rng, color_count, current);
                    board.recolor(coord, color)?;
                }
            }
        }

        if matcher::find_all_matches(&board).is_empty() {
            Ok(board)
        } else {
            Err(EngineError::GenerationExhausted {
                passes: MAX_REPAIR_PASSES,
            })
        }
    }

    fn new_tile(&mut self, coord: Coord, kind: TileKind) -> Tile {
        let id = TileId(self.next_id);
        self.next_id += 1;
        Tile { id, coord, kind }
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        self.dims
            .contains(coord)
            .then(|| coord.col as usize * self.dims.height + coord.row as usize)
    }

    fn index_or_err(&self, coord: Coord) -> Result<usize, EngineError> {
        self.index(coord).ok_or(EngineError::OutOfBounds { coord })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn width(&self) -> usize {
        self.dims.width
    }

    pub fn height(&self) -> usize {
        self.dims.height
    }

    /// Whether a coordinate lies on the board
    pub fn contains(&self, coord: Coord) -> bool {
        self.dims.contains(coord)
    }

    /// The tile at a coordinate, if any. Out-of-bounds reads are empty.
    pub fn get(&self, coord: Coord) -> Option<&Tile> {
        self.index(coord).and_then(|i| self.slots[i].as_ref())
    }

    /// The color at a coordinate, if it holds a normal tile
    pub fn color_at(&self, coord: Coord) -> Option<ColorValue> {
        self.get(coord).and_then(Tile::color)
    }

    /// Put a tile (or nothing) into a slot, returning the previous occupant.
    /// The stored tile's coordinate is rewritten to match the slot.
    pub fn set(&mut self, coord: Coord, tile: Option<Tile>) -> Result<Option<Tile>, EngineError> {
        let index = self.index_or_err(coord)?;
        let tile = tile.map(|t| Tile { coord, ..t });
        Ok(std::mem::replace(&mut self.slots[index], tile))
    }

    /// Empty a slot, returning its occupant
    pub fn take(&mut self, coord: Coord) -> Result<Option<Tile>, EngineError> {
        self.set(coord, None)
    }

    /// Create a new normal tile in an empty or occupied slot
    pub fn spawn(&mut self, coord: Coord, color: ColorValue) -> Result<Tile, EngineError> {
        let index = self.index_or_err(coord)?;
        let tile = self.new_tile(coord, TileKind::Normal(color));
        self.slots[index] = Some(tile);
        Ok(tile)
    }

    /// Change the color of the normal tile at `coord`
    pub fn recolor(&mut self, coord: Coord, color: ColorValue) -> Result<(), EngineError> {
        let index = self.index_or_err(coord)?;
        if let Some(tile) = self.slots[index].as_mut() {
            if tile.is_normal() {
                tile.kind = TileKind::Normal(color);
            }
        }
        Ok(())
    }

    /// Exchange the occupants of two slots, updating both tiles' coordinates.
    /// Either both slots change or neither does.
    pub fn swap_slots(&mut self, a: Coord, b: Coord) -> Result<(), EngineError> {
        let ia = self.index_or_err(a)?;
        let ib = self.index_or_err(b)?;
        self.slots.swap(ia, ib);
        if let Some(tile) = self.slots[ia].as_mut() {
            tile.coord = a;
        }
        if let Some(tile) = self.slots[ib].as_mut() {
            tile.coord = b;
        }
        Ok(())
    }

    /// All tiles on the board, column by column
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.slots.iter().flatten()
    }

    /// Coordinates of every bonus tile
    pub fn bonus_coords(&self) -> Vec<Coord> {
        self.tiles()
            .filter(|t| t.is_bonus())
            .map(|t| t.coord)
            .collect()
    }

    /// Check that every tile's stored coordinate matches its slot and that
    /// no identity appears twice
    pub fn verify(&self) -> Result<(), EngineError> {
        let mut seen = HashSet::new();
        for (slot, cell) in self.dims.cells().zip(self.slots.iter()) {
            if let Some(tile) = cell {
                if tile.coord != slot || !seen.insert(tile.id) {
                    return Err(EngineError::SlotMismatch {
                        slot,
                        tile: tile.coord,
                    });
                }
            }
        }
        Ok(())
    }

    /// Apply gravity to every column and refill the gaps.
    ///
    /// Normal tiles keep their relative order and drop to the lowest free
    /// rows, stepping around bonus tiles, which never move. Rows still empty
    /// afterwards receive freshly spawned tiles that fall in from above the
    /// top row.
    pub fn collapse_and_refill<R: Rng + ?Sized>(
        &mut self,
        color_count: u8,
        rng: &mut R,
    ) -> Result<Vec<TileFall>, EngineError> {
        let mut falls = Vec::new();
        let height = self.dims.height as i32;

        for col in 0..self.dims.width as i32 {
            let column: Vec<Coord> = (0..height).map(|row| Coord::new(col, row)).collect();

            let mut falling = Vec::new();
            for &coord in &column {
                let is_normal = self.get(coord).map_or(false, Tile::is_normal);
                if is_normal {
                    if let Some(tile) = self.take(coord)? {
                        falling.push(tile);
                    }
                }
            }

            let mut falling = falling.into_iter();
            for &coord in &column {
                if self.get(coord).map_or(false, Tile::is_bonus) {
                    continue;
                }
                match falling.next() {
                    Some(tile) => {
                        let from = tile.coord;
                        self.set(coord, Some(tile))?;
                        if from != coord {
                            if let Some(color) = tile.color() {
                                falls.push(TileFall {
                                    tile: tile.id,
                                    color,
                                    from,
                                    to: coord,
                                    spawned: false,
                                });
                            }
                        }
                    }
                    None => {
                        let color = ColorValue::random(&mut *rng, color_count);
                        let tile = self.spawn(coord, color)?;
                        falls.push(TileFall {
                            tile: tile.id,
                            color,
                            from: Coord::new(col, height),
                            to: coord,
                            spawned: true,
                        });
                    }
                }
            }
        }

        Ok(falls)
    }

    /// Convert to a serializable form for renderers
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            width: self.dims.width,
            height: self.dims.height,
            tiles: self
                .tiles()
                .map(|t| TileSnapshot {
                    id: t.id,
                    col: t.coord.col,
                    row: t.coord.row,
                    kind: t.kind,
                })
                .collect(),
        }
    }
}

/// Flat board representation for rendering and debugging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<TileSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileSnapshot {
    pub id: TileId,
    pub col: i32,
    pub row: i32,
    pub kind: TileKind,
}
