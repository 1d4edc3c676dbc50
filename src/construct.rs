use std::fmt::{Display, Formatter};

use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace, warn};

use crate::board::Board;
use crate::catalogue::TileCatalogue;
use crate::location::Location;
use crate::shape::Shape;
use crate::side::Side;
use crate::tile::{Connections, TileMint};
use crate::validator;

/// Reasons a [`ConstraintBuilder`] may fail.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConstructionFailure {
    /// The shape has no active cell, so there is nothing to build.
    EmptyShape,
    /// No attempt produced a fully solved board.
    AttemptsExhausted {
        /// Attempts made.
        attempts: usize,
    },
}

impl Display for ConstructionFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstructionFailure::EmptyShape => write!(f, "shape has no active cells"),
            ConstructionFailure::AttemptsExhausted { attempts } => write!(f, "no solved board found in {attempts} attempts"),
        }
    }
}

impl std::error::Error for ConstructionFailure {}

/// Builds one solved board over a fixed [`Shape`] by randomized constructive placement.
///
/// # Method
/// Each attempt walks the active cells in row-major order.
/// The cell above and the cell to the left have already been decided, so the north and west bits of the new tile are forced:
/// they must equal the south bit of the tile above and the east bit of the tile to the left, or 0 where that neighbor is inactive or off the board.
/// Among catalogue entries carrying exactly those bits, and opening south or east only onto active cells, one is chosen uniformly.
/// An attempt is abandoned as soon as some cell has no candidate.
///
/// Inheriting bits this way guarantees every connector is met, but not that the result is a single network: it may close off separate loops.
/// So every completed attempt is judged by [`validator::is_fully_solved`] and discarded unless it passes.
pub struct ConstraintBuilder<'c> {
    catalogue: &'c TileCatalogue,
    max_attempts: usize,
}

impl<'c> ConstraintBuilder<'c> {
    /// Attempts made before giving up, unless overridden.
    pub const DEFAULT_MAX_ATTEMPTS: usize = 500;

    /// A builder drawing tiles from `catalogue`.
    pub fn new(catalogue: &'c TileCatalogue) -> Self {
        Self {
            catalogue,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Give up after `max_attempts` completed or abandoned attempts.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Build a fully solved board over `shape`, minting its tiles from `mint`.
    pub fn build<R: Rng + ?Sized>(&self, shape: &Shape, mint: &mut TileMint, rng: &mut R) -> Result<Board, ConstructionFailure> {
        if shape.active_count() == 0 {
            return Err(ConstructionFailure::EmptyShape);
        }

        let mut board = Board::new(shape.clone());
        for attempt in 1..=self.max_attempts {
            board.clear();

            if let Err(stuck_at) = self.attempt(&mut board, mint, rng) {
                trace!(attempt, %stuck_at, "no candidate tile");
                continue;
            }

            match validator::first_violation(&board) {
                None => {
                    debug!(attempt, tiles = board.slots().len(), "built solved board");
                    return Ok(board);
                }
                Some(violation) => trace!(attempt, %violation, "rejected board"),
            }
        }

        warn!(attempts = self.max_attempts, "could not build a solved board for shape");
        Err(ConstructionFailure::AttemptsExhausted { attempts: self.max_attempts })
    }

    /// Fill every slot of the empty `board`, or report the slot which had no candidate.
    fn attempt<R: Rng + ?Sized>(&self, board: &mut Board, mint: &mut TileMint, rng: &mut R) -> Result<(), Location> {
        for location in board.slots().to_vec() {
            let candidates = self.candidates(board, location);
            let Some(connections) = candidates.choose(rng) else {
                return Err(location);
            };

            board.place(mint.mint(*connections), location);
        }

        Ok(())
    }

    /// The catalogue entries which may go at `location` given the tiles above and to the left of it.
    fn candidates(&self, board: &Board, location: Location) -> Vec<Connections> {
        let shape = board.shape();
        let inherited = |side: Side| {
            let next = side.attempt_from(location);
            shape.is_active(next)
                && board.tile_at(next).is_some_and(|tile| tile.connections().has(side.invert()))
        };
        let required_north = inherited(Side::North);
        let required_west = inherited(Side::West);
        let may_open = |side: Side| shape.is_active(side.attempt_from(location));

        self.catalogue.iter()
            .filter(|connections| connections.has(Side::North) == required_north && connections.has(Side::West) == required_west)
            .filter(|connections| Side::FORWARD_VARIANTS.iter().all(|side| !connections.has(*side) || may_open(*side)))
            .collect_vec()
    }
}
