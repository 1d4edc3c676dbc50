use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Array2;

use crate::board::Board;
use crate::location::{Dimension, Location};
use crate::shape::Shape;
use crate::tile::{Connections, TileMint};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A location was addressed outside the bounds specified by `dims` on a builder.
    FeatureOutOfBounds,
    /// The input had no rows, or its first row had no cells.
    EmptyInput,
    /// A row's length differs from the first row's.
    JaggedRows {
        /// Zero-based index of the row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of this row.
        found: usize,
    },
    /// A shape description contained a character which is neither an active nor an inactive marker.
    UnknownSymbol(char),
}

impl Display for BuilderInvalidReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BuilderInvalidReason::FeatureOutOfBounds => write!(f, "location out of bounds"),
            BuilderInvalidReason::EmptyInput => write!(f, "grid has no cells"),
            BuilderInvalidReason::JaggedRows { row, expected, found } => write!(f, "row {row} has {found} cells, expected {expected}"),
            BuilderInvalidReason::UnknownSymbol(c) => write!(f, "unknown shape symbol {c:?}"),
        }
    }
}

impl std::error::Error for BuilderInvalidReason {}

/// A builder for shapes and populated boards received from outside the engine, e.g. from a recognizer or a request body.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// Once a builder is invalid every further call does nothing, and [`Self::build`] reports every [`BuilderInvalidReason`] collected.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    // width, height
    dims: (Dimension, Dimension),
    mask: Array2<bool>,
    connections: Array2<Option<Connections>>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl BoardBuilder {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(x, y)` order, and no active cell.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            mask: Array2::from_elem((dims.1.get(), dims.0.get()), false),
            connections: Array2::from_elem((dims.1.get(), dims.0.get()), None),
            invalid_reasons: Default::default(),
        }
    }

    /// Start from rows of cells, checking the rows are non-empty and rectangular before `fill` sees any cell.
    fn from_rows<T>(rows: &[Vec<T>], mut fill: impl FnMut(&mut Self, Location, &T)) -> Self {
        let dims = rows.first()
            .and_then(|first| NonZero::new(first.len()))
            .zip(NonZero::new(rows.len()));

        let Some(dims) = dims else {
            let mut builder = Self::with_dims((NonZero::<usize>::MIN, NonZero::<usize>::MIN));
            builder.invalid_reasons.push(BuilderInvalidReason::EmptyInput);
            return builder;
        };

        let mut builder = Self::with_dims(dims);
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != dims.0.get() {
                builder.invalid_reasons.push(BuilderInvalidReason::JaggedRows { row, expected: dims.0.get(), found: cells.len() });
            }
        }
        if !builder.invalid_reasons.is_empty() {
            return builder;
        }

        for (y, cells) in rows.iter().enumerate() {
            for (x, cell) in cells.iter().enumerate() {
                fill(&mut builder, Location(x, y), cell);
            }
        }

        builder
    }

    /// Start from rows of activity flags.
    pub fn from_mask_rows(rows: &[Vec<bool>]) -> Self {
        Self::from_rows(rows, |builder, location, active| {
            if *active {
                builder.activate(location);
            }
        })
    }

    /// Start from rows of optional connection descriptors, as delivered over the wire.
    /// A present descriptor marks its cell active and places a tile there.
    pub fn from_connection_rows(rows: &[Vec<Option<Connections>>]) -> Self {
        Self::from_rows(rows, |builder, location, cell| {
            if let Some(connections) = cell {
                builder.place(location, *connections);
            }
        })
    }

    fn check_bounds(&mut self, location: Location) -> bool {
        if !self.invalid_reasons.is_empty() {
            return false;
        }

        if !location.within(self.dims) {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return false;
        }

        true
    }

    /// Mark `location` active.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if `location` is out of bounds.
    pub fn activate(&mut self, location: Location) -> &mut Self {
        if self.check_bounds(location) {
            self.mask[location.as_index()] = true;
        }

        self
    }

    /// Drop a location from the board, deleting any tile placed there.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if `location` is out of bounds.
    pub fn drop_location(&mut self, location: Location) -> &mut Self {
        if self.check_bounds(location) {
            self.mask[location.as_index()] = false;
            self.connections[location.as_index()] = None;
        }

        self
    }

    /// Activate `location` and put a tile carrying `connections` there, replacing any tile already placed.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if `location` is out of bounds.
    pub fn place(&mut self, location: Location, connections: Connections) -> &mut Self {
        if self.check_bounds(location) {
            self.mask[location.as_index()] = true;
            self.connections[location.as_index()] = Some(connections);
        }

        self
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        Some(&self.invalid_reasons).filter(|reasons| !reasons.is_empty())
    }

    /// Convert the activity mask of this builder into a [`Shape`], ignoring placed tiles.
    pub fn build_shape(&self) -> Result<Shape, &Vec<BuilderInvalidReason>> {
        match self.is_valid() {
            Some(reasons) => Err(reasons),
            None => Ok(Shape::from_mask(self.mask.clone(), self.dims)),
        }
    }

    /// Convert the state of this builder into a [`Board`], minting a fresh tile for every placed descriptor in row-major order.
    /// Active cells without a descriptor stay empty.
    pub fn build(&self, mint: &mut TileMint) -> Result<Board, &Vec<BuilderInvalidReason>> {
        let mut board = Board::new(self.build_shape()?);
        for (index, connections) in self.connections.indexed_iter() {
            if let Some(connections) = connections {
                board.place(mint.mint(*connections), Location::from(index));
            }
        }

        Ok(board)
    }
}
