use itertools::Itertools;

use crate::tile::{Connections, TileKind};

/// The table of every non-blank connection descriptor a tile may carry.
///
/// Entries are grouped by [`TileKind`] in declaration order (singles, straights, elbows, tees, the cross)
/// and sorted ascending by `(N, E, S, W)` within each group.
/// Build it once and hand it by reference to whatever needs it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TileCatalogue {
    entries: Vec<Connections>,
}

impl Default for TileCatalogue {
    fn default() -> Self {
        Self::new()
    }
}

impl TileCatalogue {
    /// Every non-empty connection descriptor, grouped by kind.
    pub fn new() -> Self {
        let entries = (1..16u8)
            .filter_map(|bits| Connections::from_bits(bits).ok())
            .sorted_by_key(|connections| (connections.kind(), *connections))
            .collect_vec();

        Self { entries }
    }

    /// The number of descriptors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalogue holds no descriptors.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All descriptors in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = Connections> + '_ {
        self.entries.iter().copied()
    }

    /// Entries belonging to a single family.
    pub fn of_kind(&self, kind: TileKind) -> impl Iterator<Item = Connections> + '_ {
        self.iter().filter(move |connections| connections.kind() == Some(kind))
    }
}
