use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use itertools::Itertools;
use ndarray::Array2;
use petgraph::algo::connected_components;
use petgraph::graphmap::UnGraphMap;
use rand::Rng;
use strum::VariantArray;
use tracing::debug;

use crate::builder::{BoardBuilder, BuilderInvalidReason};
use crate::location::{Dimension, Location};
use crate::side::Side;

/// The mask of "active" cells on a rectangular board: those which must hold exactly one tile.
///
/// A [`Shape`] is fixed for the lifetime of a puzzle.
/// Generate one with [`Shape::grow`], or take one from outside via [`BoardBuilder::build_shape`] or [`FromStr`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Shape {
    // indexed (row, col)
    mask: Array2<bool>,
    dims: (Dimension, Dimension),
}

impl Shape {
    /// A shape of the given `(width, height)` with no active cell.
    pub fn empty(dims: (Dimension, Dimension)) -> Self {
        Self {
            mask: Array2::from_elem((dims.1.get(), dims.0.get()), false),
            dims,
        }
    }

    /// A shape of the given `(width, height)` with every cell active.
    pub fn full(dims: (Dimension, Dimension)) -> Self {
        Self {
            mask: Array2::from_elem((dims.1.get(), dims.0.get()), true),
            dims,
        }
    }

    pub(crate) fn from_mask(mask: Array2<bool>, dims: (Dimension, Dimension)) -> Self {
        Self { mask, dims }
    }

    /// Grow a random 4-connected shape of `target` active cells on a board of `(width, height)`.
    ///
    /// `target` is clamped to `1..=width * height`.
    /// Starting from a uniformly chosen seed cell, a uniformly chosen frontier cell is activated at each step and its inactive neighbors join the frontier.
    /// Every newly active cell touches the active region, so the result is 4-connected.
    /// Growth stops early only if the frontier runs dry, in which case the smaller region is returned.
    pub fn grow<R: Rng + ?Sized>(dims: (Dimension, Dimension), target: usize, rng: &mut R) -> Self {
        let mut shape = Self::empty(dims);
        let target = target.clamp(1, shape.mask.len());

        let seed = Location(rng.gen_range(0..dims.0.get()), rng.gen_range(0..dims.1.get()));
        shape.mask[seed.as_index()] = true;
        let mut active = 1;

        let mut frontier = shape.neighbors_of(seed).map(|(_, loc)| loc).collect_vec();
        let mut in_frontier: HashSet<Location> = frontier.iter().copied().collect();

        while active < target && !frontier.is_empty() {
            let picked = frontier.swap_remove(rng.gen_range(0..frontier.len()));
            in_frontier.remove(&picked);

            if shape.mask[picked.as_index()] {
                continue;
            }
            shape.mask[picked.as_index()] = true;
            active += 1;

            for (_, neighbor) in shape.neighbors_of(picked) {
                if !shape.mask[neighbor.as_index()] && in_frontier.insert(neighbor) {
                    frontier.push(neighbor);
                }
            }
        }

        if active < target {
            debug!(active, target, "frontier exhausted before reaching target");
        }

        shape
    }

    /// `(width, height)`
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.dims.0.get()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.dims.1.get()
    }

    /// Whether `location` is on the board and active.
    pub fn is_active(&self, location: Location) -> bool {
        location.within(self.dims) && self.mask[location.as_index()]
    }

    /// All active locations in row-major order.
    pub fn active_locations(&self) -> Vec<Location> {
        self.mask.indexed_iter()
            .filter(|(_, active)| **active)
            .map(|(index, _)| Location::from(index))
            .collect_vec()
    }

    /// Number of active cells.
    pub fn active_count(&self) -> usize {
        self.mask.iter().filter(|active| **active).count()
    }

    /// In-bounds neighbors of `location`, paired with the side they lie across, in `[N, E, S, W]` order.
    pub fn neighbors_of(&self, location: Location) -> impl Iterator<Item = (Side, Location)> + '_ {
        Side::VARIANTS.iter()
            .filter_map(move |side| side.step_within(location, self.dims).map(|next| (*side, next)))
    }

    /// The number of 4-connected components formed by the active cells.
    pub fn component_count(&self) -> usize {
        let mut graph: UnGraphMap<Location, ()> = UnGraphMap::with_capacity(self.mask.len(), 2 * self.mask.len());
        for location in self.active_locations() {
            graph.add_node(location);
            for side in Side::FORWARD_VARIANTS {
                let next = side.attempt_from(location);
                if self.is_active(next) {
                    graph.add_edge(location, next, ());
                }
            }
        }

        connected_components(&graph)
    }

    /// Whether the active cells form a single 4-connected region. A shape with no active cell is not connected.
    pub fn is_connected(&self) -> bool {
        self.component_count() == 1
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.mask.rows() {
            for active in row {
                write!(f, "{}", if *active { 'x' } else { '.' })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl FromStr for Shape {
    type Err = Vec<BuilderInvalidReason>;

    /// Parse one row per line; `x` or `#` marks an active cell, `.` or a space an inactive one.
    /// Blank lines are skipped, so write fully inactive rows with `.`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s.lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .map(|line| line.chars()
                .map(|c| match c {
                    'x' | 'X' | '#' => Ok(true),
                    '.' | ' ' => Ok(false),
                    other => Err(BuilderInvalidReason::UnknownSymbol(other)),
                })
                .collect::<Result<Vec<_>, _>>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|reason| vec![reason])?;

        BoardBuilder::from_mask_rows(&rows).build_shape().map_err(Clone::clone)
    }
}
