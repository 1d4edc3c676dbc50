use std::fmt::{Display, Formatter};
use std::num::NonZero;

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::board::{Board, Grid};
use crate::catalogue::TileCatalogue;
use crate::construct::{ConstraintBuilder, ConstructionFailure};
use crate::location::Dimension;
use crate::shape::Shape;
use crate::swap::{compute_swaps, Swap, SwapMismatch};
use crate::tile::{Tile, TileMint};

/// Settings for [`PuzzleGenerator`], loadable from a config file. Every field has a default.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Smallest share of the board, from 0 to 1, that a random shape covers.
    pub min_fill: f64,
    /// Random shapes to try before falling back to the full rectangle.
    pub shape_attempts: usize,
    /// Construction attempts per shape; see [`ConstraintBuilder::with_max_attempts`].
    pub board_attempts: usize,
    /// Random seed for reproducible puzzles; [`None`] draws one from the operating system.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_fill: 0.6,
            shape_attempts: 10,
            board_attempts: ConstraintBuilder::DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }
}

/// Reasons a [`PuzzleGenerator`] may fail.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GenerationFailure {
    /// The shape has no active cell.
    EmptyShape,
    /// No solved board could be built over the shape(s) tried.
    Infeasible {
        /// Construction attempts made on the last shape tried.
        attempts: usize,
    },
}

impl From<ConstructionFailure> for GenerationFailure {
    fn from(value: ConstructionFailure) -> Self {
        match value {
            ConstructionFailure::EmptyShape => Self::EmptyShape,
            ConstructionFailure::AttemptsExhausted { attempts } => Self::Infeasible { attempts },
        }
    }
}

impl Display for GenerationFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationFailure::EmptyShape => write!(f, "shape must contain at least one tile"),
            GenerationFailure::Infeasible { attempts } => write!(f, "no puzzle could be generated after {attempts} construction attempts"),
        }
    }
}

impl std::error::Error for GenerationFailure {}

/// A scrambled board and the solved board it came from.
///
/// Both boards share one shape and hold the same tiles; only their placement differs.
#[derive(Clone, Debug)]
pub struct Puzzle {
    /// The solution's tiles in scrambled order.
    pub shuffled: Board,
    /// A fully solved arrangement.
    pub solution: Board,
}

impl Puzzle {
    /// Scramble `solution`: its tiles, shuffled, fill the active cells in row-major order.
    ///
    /// `solution` must hold exactly one tile per active cell, as every board out of [`ConstraintBuilder`] does.
    pub(crate) fn from_solution<R: Rng + ?Sized>(solution: Board, rng: &mut R) -> Self {
        let mut tiles = solution.pool();
        tiles.shuffle(rng);

        let mut shuffled = solution.to_skeleton();
        for (location, tile) in solution.slots().iter().zip_eq(tiles) {
            shuffled.place(tile, *location);
        }

        Self { shuffled, solution }
    }

    /// The swaps which carry the shuffled board to the solution, e.g. to animate an auto-solve.
    pub fn swaps_to_solution(&self) -> Result<Vec<Swap>, SwapMismatch> {
        compute_swaps(self.shuffled.grid(), self.solution.grid())
    }

    /// Whether `grid` wins this puzzle: every cell matches the solution by presence and connections.
    ///
    /// Tiles are compared by their connections, not their identity, so any arrangement exchanging interchangeable tiles also wins.
    pub fn is_won_by(&self, grid: &Grid) -> bool {
        grid.dim() == self.solution.grid().dim()
            && grid.iter().zip(self.solution.grid().iter())
                .all(|(current, wanted)| current.map(|tile| tile.connections()) == wanted.map(|tile| tile.connections()))
    }
}

/// Generates puzzles from its own seeded random source, minting every tile from a single [`TileMint`].
pub struct PuzzleGenerator {
    config: GeneratorConfig,
    catalogue: TileCatalogue,
    mint: TileMint,
    rng: StdRng,
}

impl PuzzleGenerator {
    /// A generator seeded from `config.seed`, or from entropy when unset.
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            catalogue: TileCatalogue::new(),
            mint: TileMint::new(),
            rng,
        }
    }

    /// The settings this generator runs with.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a puzzle on a random shape of `(width, height)`.
    ///
    /// The shape covers a uniformly chosen number of cells between [`GeneratorConfig::min_fill`] of the board and all of it.
    /// Up to [`GeneratorConfig::shape_attempts`] random shapes of that size are tried, then the fully active rectangle.
    pub fn generate_random(&mut self, dims: (Dimension, Dimension)) -> Result<Puzzle, GenerationFailure> {
        let cells = dims.0.get() * dims.1.get();
        let min_cells = ((cells as f64 * self.config.min_fill.clamp(0.0, 1.0)) as usize).min(cells);
        let target = self.rng.gen_range(min_cells..=cells);

        for attempt in 1..=self.config.shape_attempts {
            let shape = Shape::grow(dims, target, &mut self.rng);
            let builder = ConstraintBuilder::new(&self.catalogue).with_max_attempts(self.config.board_attempts);

            match builder.build(&shape, &mut self.mint, &mut self.rng) {
                Ok(solution) => {
                    info!(width = dims.0.get(), height = dims.1.get(), tiles = solution.slots().len(), "generated puzzle");
                    return Ok(Puzzle::from_solution(solution, &mut self.rng));
                }
                Err(failure) => debug!(attempt, %failure, "random shape rejected"),
            }
        }

        warn!(width = dims.0.get(), height = dims.1.get(), "falling back to full rectangle");
        self.generate_from_shape(&Shape::full(dims))
    }

    /// Generate a puzzle over a given `shape`.
    pub fn generate_from_shape(&mut self, shape: &Shape) -> Result<Puzzle, GenerationFailure> {
        let builder = ConstraintBuilder::new(&self.catalogue).with_max_attempts(self.config.board_attempts);
        let solution = builder.build(shape, &mut self.mint, &mut self.rng)?;
        Ok(Puzzle::from_solution(solution, &mut self.rng))
    }
}

/// Generate a puzzle on a random shape of `width` by `height` with default settings, drawing randomness from `rng`.
///
/// Returns [`None`] for a zero dimension or if no puzzle could be built.
pub fn generate_random_puzzle<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Option<Puzzle> {
    let dims = NonZero::new(width).zip(NonZero::new(height))?;
    let config = GeneratorConfig { seed: Some(rng.gen()), ..Default::default() };

    PuzzleGenerator::new(config).generate_random(dims).ok()
}

/// Generate a puzzle over `shape` with default settings, drawing randomness from `rng`.
///
/// Returns [`None`] if the shape is empty or no solved board exists for it within the attempt budget.
pub fn generate_puzzle_from_shape<R: Rng + ?Sized>(shape: &Shape, rng: &mut R) -> Option<Puzzle> {
    let config = GeneratorConfig { seed: Some(rng.gen()), ..Default::default() };

    PuzzleGenerator::new(config).generate_from_shape(shape).ok()
}

/// Place `pool` onto the empty `board`, returning whether it worked.
///
/// On success `board` is fully solved; on failure it is left empty. See [`Board::solve`] for the reason of a failure.
pub fn solve_puzzle(board: &mut Board, pool: &[Tile]) -> bool {
    match board.solve(pool) {
        Ok(()) => true,
        Err(failure) => {
            debug!(%failure, "puzzle not solved");
            false
        }
    }
}
