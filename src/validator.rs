//! Predicates judging placements and whole boards.
//!
//! A board is fully solved when
//! 1. every active cell holds a tile and no inactive cell does,
//! 2. every open connector faces an open connector on a tile in an active cell, and
//! 3. the open connectors link all placed tiles into a single component.
//!
//! All functions here are total: they never panic on a board built through this crate.

use std::fmt::{Display, Formatter};

use petgraph::algo::connected_components;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;
use strum::VariantArray;

use crate::board::{Board, Grid};
use crate::location::Location;
use crate::side::Side;
use crate::tile::Tile;

/// The first reason a board is not fully solved, as found by [`first_violation`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Violation {
    /// An active cell holds no tile.
    Uncovered(Location),
    /// An inactive cell holds a tile.
    Intruding(Location),
    /// The tile at `location` has an open connector on `side` which is not met by an open connector.
    Dangling {
        /// Where the tile sits.
        location: Location,
        /// The unmet side.
        side: Side,
    },
    /// Placed tiles form more than one connected component.
    Disconnected {
        /// Number of separate networks.
        components: usize,
    },
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::Uncovered(location) => write!(f, "active cell {location} holds no tile"),
            Violation::Intruding(location) => write!(f, "inactive cell {location} holds a tile"),
            Violation::Dangling { location, side } => write!(f, "{side:?} connector at {location} is dangling"),
            Violation::Disconnected { components } => write!(f, "tiles form {components} separate networks"),
        }
    }
}

/// Whether `tile` may go at `location` given the tiles already on `grid`.
///
/// Each orthogonal neighbor which holds a tile must present the same bit on the shared side as `tile` does.
/// Empty or off-board neighbors impose nothing, so this is only a local check.
pub fn is_valid_placement(grid: &Grid, tile: &Tile, location: Location) -> bool {
    Side::VARIANTS.iter().all(|side| {
        let neighbor = side.attempt_from(location);
        match grid.get(neighbor.as_index()).and_then(Option::as_ref) {
            Some(other) => tile.connections().has(*side) == other.connections().has(side.invert()),
            None => true,
        }
    })
}

/// Whether `board` is fully solved. Equivalent to `first_violation(board).is_none()`.
pub fn is_fully_solved(board: &Board) -> bool {
    first_violation(board).is_none()
}

/// Check coverage, then connector agreement, then connectivity, reporting the first failure.
pub fn first_violation(board: &Board) -> Option<Violation> {
    let shape = board.shape();

    for (index, cell) in board.grid().indexed_iter() {
        let location = Location::from(index);
        match (shape.is_active(location), cell.is_some()) {
            (true, false) => return Some(Violation::Uncovered(location)),
            (false, true) => return Some(Violation::Intruding(location)),
            _ => {}
        }
    }

    for (location, tile) in board.tiles() {
        for side in tile.connections().sides() {
            let next = side.attempt_from(location);
            let met = shape.is_active(next)
                && board.tile_at(next).is_some_and(|other| other.connections().has(side.invert()));

            if !met {
                return Some(Violation::Dangling { location, side });
            }
        }
    }

    let graph = connection_graph(board);
    let Some(start) = graph.nodes().next() else {
        // nothing placed on a shape with nothing active
        return None;
    };

    let mut visited = 0;
    let mut bfs = Bfs::new(&graph, start);
    while bfs.next(&graph).is_some() {
        visited += 1;
    }

    if visited != graph.node_count() {
        return Some(Violation::Disconnected { components: connected_components(&graph) });
    }

    None
}

/// The network formed by placed tiles: one node per tile-bearing location and an edge wherever two neighbors both open onto their shared side.
pub fn connection_graph(board: &Board) -> UnGraphMap<Location, Side> {
    let mut graph = UnGraphMap::with_capacity(board.slots().len(), 2 * board.slots().len());

    for (location, _) in board.tiles() {
        graph.add_node(location);
    }

    for (location, tile) in board.tiles() {
        for side in Side::FORWARD_VARIANTS {
            let next = side.attempt_from(location);
            let joined = tile.connections().has(*side)
                && board.tile_at(next).is_some_and(|other| other.connections().has(side.invert()));

            if joined {
                graph.add_edge(location, next, *side);
            }
        }
    }

    graph
}
