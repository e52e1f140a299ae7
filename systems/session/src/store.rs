use elemental_defence_core::{PlacementError, TowerKind};

use crate::player::Player;

/// Catalogue entry offered by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreEntry {
    /// Tower archetype on sale.
    pub kind: TowerKind,
    /// Price of the tower.
    pub cost: u32,
}

/// Sells towers to the player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Store {
    entries: Vec<StoreEntry>,
}

impl Store {
    /// Creates a store offering every tower archetype at its catalogue price.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: TowerKind::ALL
                .into_iter()
                .map(|kind| StoreEntry {
                    kind,
                    cost: kind.cost(),
                })
                .collect(),
        }
    }

    /// Catalogue in display order.
    #[must_use]
    pub fn entries(&self) -> &[StoreEntry] {
        &self.entries
    }

    /// Price of `kind`; the catalogue lists every archetype.
    #[must_use]
    pub fn price(&self, kind: TowerKind) -> u32 {
        kind.cost()
    }

    /// Charges the player for one tower of `kind` and returns the price paid.
    pub fn purchase(&self, kind: TowerKind, player: &mut Player) -> Result<u32, PlacementError> {
        let cost = self.price(kind);
        if !player.spend(cost) {
            return Err(PlacementError::InsufficientFunds);
        }
        Ok(cost)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
