use std::fmt::{Display, Formatter};

use ndarray::Array2;

use crate::location::{Dimension, Location};
use crate::shape::Shape;
use crate::solver::{BacktrackingSolver, SolverConfig, SolverFailure};
use crate::tile::Tile;
use crate::validator;

/// A grid of optional tiles, indexed `(row, col)`; see [`Location::as_index`].
pub type Grid = Array2<Option<Tile>>;

/// A [`Shape`] together with the tiles currently placed on it.
///
/// A board keeps the row-major list of its active locations, the "slots" which a solver fills in order.
/// Placement is unchecked; use [`Self::is_valid_placement`] and [`Self::is_fully_solved`] to judge a board.
#[derive(Clone, Debug)]
pub struct Board {
    shape: Shape,
    grid: Grid,
    slots: Vec<Location>,
}

impl Board {
    /// An empty board, or "skeleton", over `shape`.
    pub fn new(shape: Shape) -> Self {
        let grid = Array2::from_elem((shape.height(), shape.width()), None);
        let slots = shape.active_locations();

        Self { shape, grid, slots }
    }

    /// An empty board over the same shape as this one.
    pub fn to_skeleton(&self) -> Self {
        Self::new(self.shape.clone())
    }

    /// The shape this board is laid over.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// `(width, height)`
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.shape.dims()
    }

    /// The cells, indexed `(row, col)`.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The active locations in row-major order.
    pub fn slots(&self) -> &[Location] {
        &self.slots
    }

    /// The tile at `location`, if any. Off-board locations hold nothing.
    pub fn tile_at(&self, location: Location) -> Option<&Tile> {
        self.grid.get(location.as_index()).and_then(Option::as_ref)
    }

    /// Every placed tile with its location, in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (Location, &Tile)> {
        self.grid.indexed_iter()
            .filter_map(|(index, cell)| cell.as_ref().map(|tile| (Location::from(index), tile)))
    }

    /// The placed tiles in row-major order, e.g. to hand them to a solver as a pool.
    pub fn pool(&self) -> Vec<Tile> {
        self.tiles().map(|(_, tile)| *tile).collect()
    }

    /// Put `tile` at `location`, returning whatever was there before.
    /// Off-board locations are ignored and hand `tile` straight back.
    pub fn place(&mut self, tile: Tile, location: Location) -> Option<Tile> {
        match self.grid.get_mut(location.as_index()) {
            Some(cell) => cell.replace(tile),
            None => Some(tile),
        }
    }

    /// Take the tile at `location` off the board.
    pub fn remove(&mut self, location: Location) -> Option<Tile> {
        self.grid.get_mut(location.as_index()).and_then(Option::take)
    }

    /// Take every tile off the board.
    pub fn clear(&mut self) {
        self.grid.fill(None);
    }

    /// Whether no cell holds a tile.
    pub fn is_empty(&self) -> bool {
        self.grid.iter().all(Option::is_none)
    }

    /// See [`validator::is_valid_placement`].
    pub fn is_valid_placement(&self, tile: &Tile, location: Location) -> bool {
        validator::is_valid_placement(&self.grid, tile, location)
    }

    /// See [`validator::is_fully_solved`].
    pub fn is_fully_solved(&self) -> bool {
        validator::is_fully_solved(self)
    }

    /// Fill this empty board from `pool` with an unbounded [`BacktrackingSolver`].
    ///
    /// On success every slot holds a tile and the board is fully solved; on failure the board is left empty.
    pub fn solve(&mut self, pool: &[Tile]) -> Result<(), SolverFailure> {
        self.solve_with(pool, SolverConfig::default())
    }

    /// As [`Self::solve`], under the limits in `config`.
    pub fn solve_with(&mut self, pool: &[Tile], config: SolverConfig) -> Result<(), SolverFailure> {
        BacktrackingSolver::new(self, pool, config).solve()
    }
}

impl Display for Board {
    /// One line per row; tiles print as box-drawing glyphs, empty active cells as `?` and inactive cells as a space.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (y, row) in self.grid.rows().into_iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let glyph = match cell {
                    Some(tile) => tile.connections().glyph(),
                    None if self.shape.is_active(Location(x, y)) => '?',
                    None => ' ',
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
