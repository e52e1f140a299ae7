#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Elemental Defence engine.
//!
//! This crate defines the vocabulary that connects the authoritative world,
//! the pure systems and the adapters. Adapters submit [`Command`] values
//! describing desired mutations, the session executes those commands through
//! its `apply` entry point, and then broadcasts [`Event`] values describing
//! what happened during the tick. Positions are tagged with the coordinate
//! frame they live in: enemies move in [`GridPoint`] units while towers are
//! anchored at [`WorldPoint`] positions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

mod archetypes;
mod errors;

pub use archetypes::{EnemyKind, EnemyStats, EnemyTargeting, TowerKind, TowerStats, TowerTargeting};
pub use errors::{ConfigError, PlacementError, RemovalError};

/// Commands that express all permissible session mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests the purchase and placement of a tower on a constructible tile.
    PlaceTower {
        /// Archetype of tower to construct.
        kind: TowerKind,
        /// Tile that should host the tower.
        cell: CellCoord,
    },
    /// Requests removal of an existing tower from the grid.
    RemoveTower {
        /// Identifier of the tower targeted for removal.
        tower: TowerId,
    },
}

/// Events broadcast by the session after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that a level's grid and waves were loaded.
    LevelStarted {
        /// Zero-based index of the level.
        level: usize,
    },
    /// Announces that the wave manager began scheduling a wave.
    WaveStarted {
        /// Zero-based index of the wave within the level.
        wave: usize,
    },
    /// Confirms that an enemy was materialised at the spawn tile.
    EnemySpawned {
        /// Handle assigned to the new enemy.
        enemy: EnemyId,
        /// Archetype of the spawned enemy.
        kind: EnemyKind,
        /// Wave that scheduled the spawn.
        wave: usize,
    },
    /// Reports a tower hitting an enemy, either as primary target or splash.
    TowerAttacked {
        /// Tower that performed the attack.
        tower: TowerId,
        /// Enemy that absorbed the damage.
        enemy: EnemyId,
        /// Damage subtracted from the enemy's health.
        damage: u32,
    },
    /// Reports an enemy hitting a tower, either as primary target or splash.
    EnemyAttacked {
        /// Enemy that performed the attack.
        enemy: EnemyId,
        /// Tower that absorbed the damage.
        tower: TowerId,
        /// Damage subtracted from the tower's health.
        damage: u32,
    },
    /// Reports an enemy that walked the whole path and hurt the player.
    EnemyReachedBase {
        /// Enemy that reached the base.
        enemy: EnemyId,
        /// Damage dealt to the player.
        damage: u32,
    },
    /// Reports an enemy whose health reached zero.
    EnemyDefeated {
        /// Enemy that was defeated.
        enemy: EnemyId,
        /// Money paid to the player.
        reward: u32,
    },
    /// Confirms that a tower was bought and placed.
    TowerPlaced {
        /// Identifier assigned to the tower.
        tower: TowerId,
        /// Archetype of the placed tower.
        kind: TowerKind,
        /// Tile hosting the tower.
        cell: CellCoord,
        /// Money charged for the purchase.
        cost: u32,
    },
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Archetype requested for placement.
        kind: TowerKind,
        /// Tile provided in the request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a tower was removed on request.
    TowerRemoved {
        /// Identifier of the removed tower.
        tower: TowerId,
        /// Tile that hosted the tower.
        cell: CellCoord,
    },
    /// Reports that a tower removal request was rejected.
    TowerRemovalRejected {
        /// Identifier provided in the request.
        tower: TowerId,
        /// Specific reason the removal failed.
        reason: RemovalError,
    },
    /// Reports a tower whose health reached zero.
    TowerDestroyed {
        /// Identifier of the destroyed tower.
        tower: TowerId,
        /// Tile that hosted the tower.
        cell: CellCoord,
    },
    /// Announces that a wave finished spawning and all its enemies are gone.
    WaveCleared {
        /// Zero-based index of the cleared wave.
        wave: usize,
    },
    /// Announces that every wave of a level was cleared.
    LevelCompleted {
        /// Zero-based index of the completed level.
        level: usize,
    },
    /// The final level was completed with the player still alive.
    GameWon,
    /// The player's health reached zero.
    GameLost,
}

/// Elemental affinity carried by every entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    /// Neutral affinity; never resisted and never exploited.
    #[default]
    None,
    /// Fire affinity.
    Fire,
    /// Earth affinity.
    Earth,
    /// Air affinity.
    Air,
    /// Water affinity.
    Water,
}

impl Element {
    /// Multiplier applied when an attacker of this element hits `defender`.
    ///
    /// The cycle Fire → Water → Air → Earth → Fire lists resisted pairings
    /// (0.5); the reversed pairings are vulnerabilities (1.5). Every other
    /// combination, including anything involving [`Element::None`], is 1.0.
    #[must_use]
    pub const fn multiplier_against(self, defender: Element) -> f64 {
        match (self, defender) {
            (Self::Fire, Self::Water)
            | (Self::Water, Self::Air)
            | (Self::Air, Self::Earth)
            | (Self::Earth, Self::Fire) => 0.5,
            (Self::Fire, Self::Earth)
            | (Self::Earth, Self::Air)
            | (Self::Air, Self::Water)
            | (Self::Water, Self::Fire) => 1.5,
            _ => 1.0,
        }
    }
}

/// Computes the whole damage dealt by an attack.
///
/// The elemental multiplier is applied to `attack_power` and the result is
/// truncated toward zero. Negative or non-finite products deal no damage.
#[must_use]
pub fn elemental_damage(attack_power: f64, attacker: Element, defender: Element) -> u32 {
    let raw = attack_power * attacker.multiplier_against(defender);
    if raw.is_nan() || raw <= 0.0 {
        return 0;
    }
    raw.trunc() as u32
}

/// Unique handle assigned to an enemy by the world arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique handle assigned to a tower by the world arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid tile expressed as column and row indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Centre of the cell expressed in grid units.
    #[must_use]
    pub fn center(self) -> GridPoint {
        GridPoint::new(f64::from(self.column) + 0.5, f64::from(self.row) + 0.5)
    }
}

/// Position measured in grid units, where one unit spans one tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    x: f64,
    y: f64,
}

impl GridPoint {
    /// Creates a new grid-space point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate in tiles.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Vertical coordinate in tiles.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another grid-space point.
    #[must_use]
    pub fn distance(self, other: GridPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Linear interpolation toward `other` by `fraction`.
    #[must_use]
    pub fn lerp(self, other: GridPoint, fraction: f64) -> GridPoint {
        GridPoint::new(
            self.x + (other.x - self.x) * fraction,
            self.y + (other.y - self.y) * fraction,
        )
    }
}

/// Position measured in world (rendered) units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    x: f64,
    y: f64,
}

impl WorldPoint {
    /// Creates a new world-space point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate in world units.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Vertical coordinate in world units.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another world-space point.
    #[must_use]
    pub fn distance(self, other: WorldPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Hit points of an entity. Never negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Health(u32);

impl Health {
    /// Wraps the provided hit point count.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the hit point count.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether no hit points remain.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.0 == 0
    }

    /// Returns the health left after absorbing `damage`, floored at zero.
    #[must_use]
    pub const fn saturating_sub(self, damage: u32) -> Self {
        Self(self.0.saturating_sub(damage))
    }
}

/// Kinds of tile that compose a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// The single tile where enemies appear.
    Spawn,
    /// The single tile enemies try to reach.
    Base,
    /// Walkable corridor tile.
    Road,
    /// Tile that may host one tower.
    Constructible,
    /// Scenery; neither walkable nor buildable.
    Decoration,
}

impl TileKind {
    /// Parses a map symbol into a tile kind.
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'S' => Some(Self::Spawn),
            'B' => Some(Self::Base),
            'R' => Some(Self::Road),
            'C' => Some(Self::Constructible),
            'X' => Some(Self::Decoration),
            _ => None,
        }
    }

    /// Map symbol that encodes the tile kind.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Spawn => 'S',
            Self::Base => 'B',
            Self::Road => 'R',
            Self::Constructible => 'C',
            Self::Decoration => 'X',
        }
    }

    /// Reports whether enemies may stand on the tile.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Spawn | Self::Base | Self::Road)
    }

    /// Reports whether a path may step onto the tile after leaving the spawn.
    #[must_use]
    pub const fn accepts_path_step(self) -> bool {
        matches!(self, Self::Road | Self::Base)
    }
}
