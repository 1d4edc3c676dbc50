use strum::VariantArray;

use crate::location::{Dimension, Location};

/// One of the four sides of a square cell, and the direction of the step across it.
///
/// Variants are declared in wire order: a connection descriptor is written `[N, E, S, W]`.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Side {
    /// Up, toward row 0.
    North,
    /// Right.
    East,
    /// Down.
    South,
    /// Left, toward column 0.
    West,
}

impl Side {
    /// Directions which, stepping from one location to another, move later in row-major order.
    pub const FORWARD_VARIANTS: &'static [Self] = &[Self::East, Self::South];

    /// Attempt the step from `location` across this side and return the resultant [`Location`].
    ///
    /// Stepping off the top or left edge wraps around to a huge coordinate, which no board contains;
    /// use [`Self::step_within`] to get [`None`] instead.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::North => location.offset_by((0, -1)),
            Self::East => location.offset_by((1, 0)),
            Self::South => location.offset_by((0, 1)),
            Self::West => location.offset_by((-1, 0)),
        }
    }

    /// The neighbor of `location` across this side, if it lies on a board of size `dims`.
    pub fn step_within(&self, location: Location, dims: (Dimension, Dimension)) -> Option<Location> {
        Some(self.attempt_from(location)).filter(|next| next.within(dims))
    }

    /// The side facing this one across a shared edge.
    pub fn invert(&self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Position of this side in the `[N, E, S, W]` wire order.
    pub fn wire_position(&self) -> usize {
        *self as usize
    }

    /// Mask of this side within a packed connection nibble, north being the most significant bit.
    pub(crate) fn bit(&self) -> u8 {
        0b1000 >> self.wire_position()
    }

    /// Determine the side of `a` which `b` lies across, if the two are orthogonally adjacent.
    pub fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }
}
