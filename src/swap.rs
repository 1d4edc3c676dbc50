use std::fmt::{Display, Formatter};
use std::hash::Hash;

use itertools::Itertools;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::location::Location;

/// Exchange the contents of two cells. `target` is the cell being settled, `source` where its correct content was found.
///
/// Serialized as `[[row, col], [row, col]]`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(from = "(Location, Location)", into = "(Location, Location)")]
pub struct Swap {
    /// The cell receiving its final content.
    pub target: Location,
    /// The cell currently holding that content.
    pub source: Location,
}

impl From<(Location, Location)> for Swap {
    fn from((target, source): (Location, Location)) -> Self {
        Self { target, source }
    }
}

impl From<Swap> for (Location, Location) {
    fn from(value: Swap) -> Self {
        (value.target, value.source)
    }
}

/// Reasons two grids cannot be reconciled by swaps.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SwapMismatch {
    /// The grids differ in size, given as `(rows, cols)`.
    Dimensions {
        /// `(rows, cols)` of the initial grid.
        initial: (usize, usize),
        /// `(rows, cols)` of the target grid.
        target: (usize, usize),
    },
    /// The grids do not hold the same multiset of cell contents, so neither is a rearrangement of the other.
    Contents,
}

impl Display for SwapMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SwapMismatch::Dimensions { initial, target } => write!(f, "grid of {initial:?} cannot be rearranged into {target:?}"),
            SwapMismatch::Contents => write!(f, "grids do not hold the same tiles"),
        }
    }
}

impl std::error::Error for SwapMismatch {}

/// Compute the ordered swaps turning `initial` into `target`.
///
/// Cells are settled in row-major order. A cell which already holds its target content is skipped; otherwise the
/// first cell after it (rest of its row, then following rows) holding the wanted content is swapped in, and later
/// lookups see the result. Settled cells are never touched again, so this decomposes the permutation into its
/// cycles and emits `cells - cycles` swaps, the fewest transpositions that can do the job.
///
/// Contents are compared with [`PartialEq`]: for [`Tile`](crate::Tile)s that is identity, for
/// [`Connections`](crate::Connections) it is the descriptor itself. Both grids must hold the same multiset of contents;
/// this is checked up front and reported as a [`SwapMismatch`].
pub fn compute_swaps<T>(initial: &Array2<T>, target: &Array2<T>) -> Result<Vec<Swap>, SwapMismatch>
where
    T: Clone + Eq + Hash,
{
    if initial.dim() != target.dim() {
        return Err(SwapMismatch::Dimensions { initial: initial.dim(), target: target.dim() });
    }

    if initial.iter().counts() != target.iter().counts() {
        return Err(SwapMismatch::Contents);
    }

    let mut working = initial.clone();
    let cells = target.indexed_iter()
        .map(|(index, _)| index)
        .collect_vec();

    let mut swaps = Vec::new();
    for (position, &index) in cells.iter().enumerate() {
        let wanted = &target[index];
        if working[index] == *wanted {
            continue;
        }

        let Some(&found) = cells[position + 1..].iter().find(|later| working[**later] == *wanted) else {
            // unreachable while the multisets agree, since every earlier cell is settled
            return Err(SwapMismatch::Contents);
        };

        working.swap(index, found);
        swaps.push(Swap { target: Location::from(index), source: Location::from(found) });
    }

    Ok(swaps)
}

/// Replay `swaps` against `grid` in order.
pub fn apply_swaps<T>(grid: &mut Array2<T>, swaps: &[Swap]) {
    for swap in swaps {
        grid.swap(swap.target.as_index(), swap.source.as_index());
    }
}
