//! The wire format shared with collaborators outside the engine.
//!
//! A grid is a list of rows, each cell either `null` (inactive or unfilled) or a connection descriptor `[N, E, S, W]`.
//! Tile identities never leave the engine; importing a grid mints fresh ones.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Grid};
use crate::builder::{BoardBuilder, BuilderInvalidReason};
use crate::puzzle::Puzzle;
use crate::tile::{Connections, TileMint};

/// One grid on the wire.
pub type WireGrid = Vec<Vec<Option<Connections>>>;

/// A puzzle on the wire.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct WirePuzzle {
    /// The scrambled board.
    pub shuffled_grid: WireGrid,
    /// The solved board.
    pub solution_grid: WireGrid,
}

/// Strip a grid down to its connection descriptors.
pub fn to_wire(grid: &Grid) -> WireGrid {
    grid.rows().into_iter()
        .map(|row| row.iter().map(|cell| cell.map(|tile| tile.connections())).collect_vec())
        .collect_vec()
}

/// The connection descriptors of a grid as an array, for comparisons that do not care about identity.
pub fn connection_grid(grid: &Grid) -> ndarray::Array2<Option<Connections>> {
    grid.map(|cell| cell.map(|tile| tile.connections()))
}

/// Import a populated grid: every present descriptor marks an active cell and becomes a freshly minted tile.
///
/// Rejects empty and jagged input.
pub fn board_from_wire(grid: &WireGrid, mint: &mut TileMint) -> Result<Board, Vec<BuilderInvalidReason>> {
    BoardBuilder::from_connection_rows(grid).build(mint).map_err(Clone::clone)
}

impl From<&Puzzle> for WirePuzzle {
    fn from(value: &Puzzle) -> Self {
        Self {
            shuffled_grid: to_wire(value.shuffled.grid()),
            solution_grid: to_wire(value.solution.grid()),
        }
    }
}
