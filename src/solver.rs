use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter};

use serde::Deserialize;
use strum::VariantArray;
use tracing::debug;

use crate::board::Board;
use crate::location::Location;
use crate::side::Side;
use crate::tile::{Tile, TileId};

/// Reasons a [`BacktrackingSolver`] may fail.
///
/// The board is left as it was for precondition failures ([`Self::BoardNotEmpty`], [`Self::PoolTooSmall`], [`Self::DuplicateTile`])
/// and empty otherwise.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SolverFailure {
    /// The board already held tiles; the solver only fills empty skeletons.
    BoardNotEmpty,
    /// There are fewer tiles than active cells, so no cover exists.
    PoolTooSmall {
        /// Tiles offered.
        pool: usize,
        /// Active cells to cover.
        slots: usize,
    },
    /// The same identity appears twice in the pool.
    DuplicateTile(TileId),
    /// Every arrangement of the pool was ruled out; the puzzle as stated is unsolvable.
    Exhausted,
    /// The search placed more tiles than [`SolverConfig::max_placements`] allows.
    BudgetExceeded {
        /// Placements made before stopping.
        placements: u64,
    },
}

impl Display for SolverFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverFailure::BoardNotEmpty => write!(f, "board already holds tiles"),
            SolverFailure::PoolTooSmall { pool, slots } => write!(f, "{pool} tiles cannot cover {slots} active cells"),
            SolverFailure::DuplicateTile(id) => write!(f, "tile {id} appears more than once in the pool"),
            SolverFailure::Exhausted => write!(f, "no arrangement of the pool solves the board"),
            SolverFailure::BudgetExceeded { placements } => write!(f, "gave up after {placements} placements"),
        }
    }
}

impl std::error::Error for SolverFailure {}

/// Limits on a [`BacktrackingSolver`] run.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Abort once this many tiles have been placed in total, counting placements later undone.
    /// [`None`] searches to exhaustion.
    pub max_placements: Option<u64>,
}

/// Depth-first search placing a pool of tiles onto the slots of an empty [`Board`].
/// Use [`Self::solve`] to attempt to find a solution, or go through [`Board::solve`].
///
/// # Search
/// Slots are visited in row-major order. At each slot every unused pool tile is tried in pool order,
/// skipping those rejected by [`Board::is_valid_placement`] and those with a connector facing off the board or onto an inactive cell.
/// A tile which fits is placed and the search moves to the next slot;
/// if that fails the tile is lifted again and the next candidate tried. Running out of candidates backtracks one slot.
/// Once the last slot is filled the whole board must pass [`Board::is_fully_solved`].
///
/// # Pruning
/// A placement is undone at once, without descending, when
/// - the network it joins has no connector left facing an empty cell while other cells are still empty, or
/// - the unused tiles cannot supply the connector bits the empty cells are already forced to carry,
///   by their placed neighbors or by facing an edge. Every combination of sides is counted separately.
///
/// Tiles carrying the same connections are interchangeable: once one has failed at a slot its twins are not tried there,
/// since they would lead to the same dead ends.
/// None of these cuts removes a solution, so the first solution found is the one plain search would find,
/// and it is deterministic for a given pool order.
pub struct BacktrackingSolver<'b> {
    board: &'b mut Board,
    pool: Vec<Tile>,
    used: Vec<bool>,
    /// unused tiles counted by connection nibble
    supply: [usize; 16],
    /// per slot, the bits of sides facing off the board or onto an inactive cell
    closed: Vec<u8>,
    config: SolverConfig,
    placements: u64,
}

impl<'b> BacktrackingSolver<'b> {
    /// A solver which will fill `board` from `pool`. Nothing happens until [`Self::solve`].
    pub fn new(board: &'b mut Board, pool: &[Tile], config: SolverConfig) -> Self {
        let mut supply = [0; 16];
        for tile in pool {
            supply[usize::from(tile.connections().bits())] += 1;
        }

        let shape = board.shape();
        let closed = board.slots().iter()
            .map(|location| {
                Side::VARIANTS.iter()
                    .filter(|side| !side.step_within(*location, shape.dims()).is_some_and(|next| shape.is_active(next)))
                    .fold(0, |bits, side| bits | side.bit())
            })
            .collect();

        Self {
            board,
            pool: pool.to_vec(),
            used: vec![false; pool.len()],
            supply,
            closed,
            config,
            placements: 0,
        }
    }

    /// The number of placements made so far, including those later undone.
    pub fn placements(&self) -> u64 {
        self.placements
    }

    /// Fill the board, returning [`Ok`] if it is now fully solved or [`Err`] with a [`SolverFailure`] reason.
    pub fn solve(&mut self) -> Result<(), SolverFailure> {
        if !self.board.is_empty() {
            return Err(SolverFailure::BoardNotEmpty);
        }

        let slots = self.board.slots().len();
        if self.pool.len() < slots {
            return Err(SolverFailure::PoolTooSmall { pool: self.pool.len(), slots });
        }

        let mut seen = HashSet::with_capacity(self.pool.len());
        if let Some(duplicate) = self.pool.iter().find(|tile| !seen.insert(tile.id())) {
            return Err(SolverFailure::DuplicateTile(duplicate.id()));
        }

        debug!(slots, pool = self.pool.len(), "solving");
        let outcome = if self.supply_covers(0) { self.backtrack(0) } else { Ok(false) };
        let result = match outcome {
            Ok(true) => Ok(()),
            Ok(false) => Err(SolverFailure::Exhausted),
            Err(failure) => Err(failure),
        };
        debug!(placements = self.placements, solved = result.is_ok(), "search finished");

        result
    }

    /// Try to fill slots from `slot` onwards. `Ok(false)` means this branch is dead; `Err` aborts the whole search.
    fn backtrack(&mut self, slot: usize) -> Result<bool, SolverFailure> {
        let Some(&location) = self.board.slots().get(slot) else {
            return Ok(self.board.is_fully_solved());
        };

        let closed = self.closed[slot];
        // connections already tried at this slot, indexed by their nibble
        let mut tried = [false; 16];

        for index in 0..self.pool.len() {
            if self.used[index] {
                continue;
            }

            let tile = self.pool[index];
            let bits = tile.connections().bits();
            let nibble = usize::from(bits);
            if tried[nibble] || bits & closed != 0 || !self.board.is_valid_placement(&tile, location) {
                continue;
            }
            tried[nibble] = true;

            if self.config.max_placements.is_some_and(|max| self.placements >= max) {
                return Err(SolverFailure::BudgetExceeded { placements: self.placements });
            }
            self.placements += 1;

            self.board.place(tile, location);
            self.used[index] = true;
            self.supply[nibble] -= 1;

            let outcome = if self.seals_early(slot) || !self.supply_covers(slot + 1) {
                Ok(false)
            } else {
                self.backtrack(slot + 1)
            };
            if let Ok(true) = outcome {
                return outcome;
            }

            self.board.remove(location);
            self.used[index] = false;
            self.supply[nibble] += 1;

            outcome?;
        }

        Ok(false)
    }

    /// Whether the network through the tile just placed at `slot` is closed off while later slots are still empty.
    fn seals_early(&self, slot: usize) -> bool {
        let slots = self.board.slots();
        if slot + 1 >= slots.len() {
            return false;
        }

        let mut seen = HashSet::from([slots[slot]]);
        let mut stack = vec![slots[slot]];
        while let Some(current) = stack.pop() {
            let Some(tile) = self.board.tile_at(current) else {
                continue;
            };

            for side in tile.connections().sides() {
                let next = side.attempt_from(current);
                if self.board.tile_at(next).is_none() {
                    return false;
                }
                if seen.insert(next) {
                    stack.push(next);
                }
            }
        }

        true
    }

    /// Whether the unused tiles could still fill the slots from `from` onwards,
    /// judged by the bits each of those slots is already forced to carry.
    fn supply_covers(&self, from: usize) -> bool {
        // (forced sides, their forced bits) -> slots
        let mut demand: HashMap<(u8, u8), usize> = HashMap::new();
        for (slot, location) in self.board.slots().iter().enumerate().skip(from) {
            let (forced, value) = self.forced_bits(slot, *location);
            *demand.entry((forced, value)).or_default() += 1;
        }

        (1..16u8).all(|sides| {
            (0..16u8).filter(|wanted| wanted & sides == *wanted).all(|wanted| {
                let needed: usize = demand.iter()
                    .filter(|((forced, value), _)| forced & sides == sides && value & sides == wanted)
                    .map(|(_, count)| count)
                    .sum();
                let available: usize = (0..16u8)
                    .filter(|bits| bits & sides == wanted)
                    .map(|bits| self.supply[usize::from(bits)])
                    .sum();
                needed <= available
            })
        })
    }

    /// The sides of the empty slot at `location` whose bit is already decided, and those bits.
    fn forced_bits(&self, slot: usize, location: Location) -> (u8, u8) {
        let (mut forced, mut value) = (self.closed[slot], 0);
        for side in Side::VARIANTS {
            if let Some(neighbor) = self.board.tile_at(side.attempt_from(location)) {
                forced |= side.bit();
                if neighbor.connections().has(side.invert()) {
                    value |= side.bit();
                }
            }
        }
        (forced, value)
    }
}
