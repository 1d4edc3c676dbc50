use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Ix;
use serde::{Deserialize, Serialize};

pub(crate) type Coord = usize;
/// A nonzero board dimension, width or height.
pub type Dimension = NonZero<Coord>;

/// A location `(x, y)` on a board. The top left corner is `Location(0, 0)`.
///
/// Grids are stored row-major, so a location addresses `grid[(y, x)]`; see [`Location::as_index`].
/// On the wire a location is written `[row, col]`, i.e. `[y, x]`.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Debug, Serialize, Deserialize)]
#[serde(from = "(Coord, Coord)", into = "(Coord, Coord)")]
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// The `(row, col)` index of this location into an [`ndarray::Array2`].
    pub fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }

    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// Whether this location lies on a board of the given `(width, height)`.
    pub fn within(&self, dims: (Dimension, Dimension)) -> bool {
        self.0 < dims.0.get() && self.1 < dims.1.get()
    }
}

// row-major, which is the scan order of every algorithm in this crate
impl Ord for Location {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_index().cmp(&other.as_index())
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}

impl From<Location> for (Coord, Coord) {
    fn from(value: Location) -> Self {
        value.as_index()
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
