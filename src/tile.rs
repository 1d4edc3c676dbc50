use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::VariantArray;

use crate::side::Side;

/// Which sides of a tile carry an open connector.
///
/// Packed into a nibble with north as the most significant bit, so `0b1010` is the vertical straight.
/// Serialized as the 4-element array `[N, E, S, W]` of zeros and ones.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "[u8; 4]", into = "[u8; 4]")]
pub struct Connections(u8);

/// Reasons a connection descriptor may be rejected.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConnectionsError {
    /// A packed value used bits beyond the low nibble.
    OutOfRange(u8),
    /// A descriptor entry was neither 0 nor 1.
    NotABit {
        /// The offending side.
        side: Side,
        /// The value given for it.
        value: u8,
    },
}

impl Display for ConnectionsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionsError::OutOfRange(bits) => write!(f, "connection nibble {bits:#x} is out of range"),
            ConnectionsError::NotABit { side, value } => write!(f, "{side:?} connector is {value}, expected 0 or 1"),
        }
    }
}

impl std::error::Error for ConnectionsError {}

impl Connections {
    /// No connector on any side.
    pub const NONE: Self = Self(0);

    /// Build from a packed nibble, north in bit 3 and west in bit 0.
    pub const fn from_bits(bits: u8) -> Result<Self, ConnectionsError> {
        if bits > 0b1111 {
            return Err(ConnectionsError::OutOfRange(bits));
        }
        Ok(Self(bits))
    }

    /// Build from the open sides.
    pub fn from_sides(sides: impl IntoIterator<Item = Side>) -> Self {
        Self(sides.into_iter().fold(0, |bits, side| bits | side.bit()))
    }

    /// The packed nibble.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether `side` carries an open connector.
    pub fn has(self, side: Side) -> bool {
        self.0 & side.bit() != 0
    }

    /// The connector bit (0 or 1) on `side`.
    pub fn bit(self, side: Side) -> u8 {
        u8::from(self.has(side))
    }

    /// Every side carrying an open connector, in wire order.
    pub fn sides(self) -> impl Iterator<Item = Side> {
        Side::VARIANTS.iter().copied().filter(move |side| self.has(*side))
    }

    /// The number of open connectors.
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// The catalogue family of this descriptor, or [`None`] for the blank descriptor.
    pub fn kind(self) -> Option<TileKind> {
        match self.count() {
            0 => None,
            1 => Some(TileKind::Single),
            2 if self.has(Side::North) == self.has(Side::South) => Some(TileKind::Straight),
            2 => Some(TileKind::Elbow),
            3 => Some(TileKind::Tee),
            _ => Some(TileKind::Cross),
        }
    }

    /// A box-drawing glyph for this descriptor.
    pub fn glyph(self) -> char {
        const GLYPHS: [char; 16] = [
            '·', '╴', '╷', '┐', '╶', '─', '┌', '┬',
            '╵', '┘', '│', '┤', '└', '┴', '├', '┼',
        ];
        GLYPHS[usize::from(self.0)]
    }
}

impl TryFrom<[u8; 4]> for Connections {
    type Error = ConnectionsError;

    fn try_from(value: [u8; 4]) -> Result<Self, Self::Error> {
        let mut bits = 0;
        for (side, entry) in Side::VARIANTS.iter().zip_eq(value) {
            match entry {
                0 => {}
                1 => bits |= side.bit(),
                value => return Err(ConnectionsError::NotABit { side: *side, value }),
            }
        }

        Ok(Self(bits))
    }
}

impl From<Connections> for [u8; 4] {
    fn from(value: Connections) -> Self {
        [Side::North, Side::East, Side::South, Side::West].map(|side| value.bit(side))
    }
}

impl Debug for Connections {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let [n, e, s, w] = <[u8; 4]>::from(*self);
        write!(f, "({n},{e},{s},{w})")
    }
}

impl Display for Connections {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Families of connector tiles, grouped by the number and arrangement of open sides.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, VariantArray)]
pub enum TileKind {
    /// One open side.
    Single,
    /// Two opposite open sides.
    Straight,
    /// Two adjacent open sides.
    Elbow,
    /// Three open sides.
    Tee,
    /// All four sides open.
    Cross,
}

impl Display for TileKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Single => "single",
            Self::Straight => "straight",
            Self::Elbow => "elbow",
            Self::Tee => "tee",
            Self::Cross => "cross",
        })
    }
}

/// The stable identity of a [`Tile`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TileId(pub u64);

impl Display for TileId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A connector tile.
///
/// Two tiles are equal exactly when their [`TileId`]s are; tiles carrying the same [`Connections`] are still distinct.
#[derive(Copy, Clone, Debug)]
pub struct Tile {
    id: TileId,
    connections: Connections,
}

impl Tile {
    /// A tile with an explicitly chosen identity. Prefer [`TileMint::mint`], which never repeats an identity.
    pub fn new(id: TileId, connections: Connections) -> Self {
        Self { id, connections }
    }

    /// This tile's identity.
    pub fn id(&self) -> TileId {
        self.id
    }

    /// This tile's open sides.
    pub fn connections(&self) -> Connections {
        self.connections
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl Display for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:?}", self.id, self.connections)
    }
}

/// Hands out fresh [`TileId`]s.
///
/// Identities are unique per mint; tiles from different mints should not be mixed on one board.
#[derive(Clone, Debug, Default)]
pub struct TileMint {
    next: u64,
}

impl TileMint {
    /// A mint which starts counting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a tile with a never before issued identity.
    pub fn mint(&mut self, connections: Connections) -> Tile {
        let id = TileId(self.next);
        self.next += 1;
        Tile { id, connections }
    }

    /// The number of tiles minted so far.
    pub fn minted(&self) -> u64 {
        self.next
    }
}
