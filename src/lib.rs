#![warn(missing_docs)]

//! # `conduit`
//!
//! Generator, validator and solver for connector tile puzzles.
//! A puzzle board is a rectangle of cells, some of them "active". Every active cell must hold exactly one square tile
//! with an open connector on some of its four sides. The puzzle is solved when touching sides agree (both open or both closed),
//! no connector points off the active region, and the connectors join every tile into a single network.
//!
//! Begin with a [`Shape`], either grown at random with [`Shape::grow`] or received from outside through a [`BoardBuilder`].
//! A [`PuzzleGenerator`] builds a solved [`Board`] over a shape and scrambles it into a [`Puzzle`].
//! Given an empty board and a pool of tiles, [`Board::solve`] searches for a solved arrangement,
//! and [`compute_swaps`] produces the cell exchanges which carry one arrangement into another.
//!
//! # Internals
//! Tiles carry an explicit [`TileId`]; equality is identity, so two tiles with the same connectors remain distinct
//! through shuffling, solving and swapping.
//!
//! Solved boards are built by a randomized constructive pass (see [`ConstraintBuilder`]) that respects connectors
//! already placed above and to the left, with every completed pass checked by the [`validator`] and retried on failure.
//! The [`validator`] judges connectivity by a breadth-first traversal of the connection graph.
//! [`BacktrackingSolver`] is a depth-first search in row-major slot order, cutting branches whose network closes early
//! or whose remaining tiles cannot supply the connectors the empty cells demand.
//!
//! Every operation is synchronous and owns its state, so independent calls may run on separate threads.
//! Randomness is always injected, so a seeded generator reproduces its puzzles exactly.

pub use board::{Board, Grid};
pub use builder::{BoardBuilder, BuilderInvalidReason};
pub use catalogue::TileCatalogue;
pub use construct::{ConstraintBuilder, ConstructionFailure};
pub use location::{Dimension, Location};
pub use puzzle::{generate_puzzle_from_shape, generate_random_puzzle, solve_puzzle, GenerationFailure, GeneratorConfig, Puzzle, PuzzleGenerator};
pub use shape::Shape;
pub use side::Side;
pub use solver::{BacktrackingSolver, SolverConfig, SolverFailure};
pub use swap::{apply_swaps, compute_swaps, Swap, SwapMismatch};
pub use tile::{Connections, ConnectionsError, Tile, TileId, TileKind, TileMint};

pub(crate) mod board;
mod tests;
pub(crate) mod builder;
pub(crate) mod catalogue;
pub(crate) mod construct;
pub(crate) mod location;
pub(crate) mod puzzle;
pub mod serial;
pub(crate) mod shape;
pub(crate) mod side;
pub(crate) mod solver;
pub(crate) mod swap;
pub(crate) mod tile;
pub mod validator;
