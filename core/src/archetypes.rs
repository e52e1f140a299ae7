use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Element;

/// Rule an enemy archetype uses to pick a tower to attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyTargeting {
    /// The enemy never attacks.
    Passive,
    /// Attacks the tower closest to the enemy.
    NearestTower,
    /// Attacks the tower with the least remaining health.
    WeakestTower,
}

/// Rule a tower archetype uses to pick an enemy to attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerTargeting {
    /// Attacks the enemy that travelled furthest along the path.
    Leading,
    /// Attacks the enemy closest to the tower.
    Nearest,
    /// Attacks the enemy with the most remaining health.
    Tankiest,
}

/// Static statistics shared by every enemy of one archetype.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    /// Starting and maximum health.
    pub health: u32,
    /// Elemental affinity.
    pub element: Element,
    /// Damage before the elemental multiplier; also the base damage dealt on arrival.
    pub attack_power: f64,
    /// Minimum simulated time between two attacks.
    pub attack_interval: Duration,
    /// Attack range in grid units.
    pub range: f64,
    /// Movement speed in grid units per second.
    pub speed: f64,
    /// Money paid to the player when the enemy is defeated.
    pub reward: u32,
    /// Target selection rule.
    pub targeting: EnemyTargeting,
    /// Radius around the attacker in which every tower is hit, if any.
    pub splash_radius: Option<f64>,
}

/// Static statistics shared by every tower of one archetype.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerStats {
    /// Starting and maximum health.
    pub health: u32,
    /// Elemental affinity.
    pub element: Element,
    /// Damage before the elemental multiplier.
    pub attack_power: f64,
    /// Minimum simulated time between two attacks.
    pub attack_interval: Duration,
    /// Attack range in grid units.
    pub range: f64,
    /// Purchase price.
    pub cost: u32,
    /// Target selection rule.
    pub targeting: TowerTargeting,
    /// Radius around the primary target in which every other enemy is hit, if any.
    pub splash_radius: Option<f64>,
}

/// Enemy archetypes that waves may schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Harmless walker.
    Minion,
    /// Fast, fragile air attacker.
    WindGrognard,
    /// Fast, fragile fire attacker with splash.
    FireGrognard,
    /// Durable water attacker with splash.
    WaterBrute,
    /// Durable earth attacker.
    EarthBrute,
    /// Slow and very durable.
    Boss,
}

impl EnemyKind {
    /// Every enemy archetype in declaration order.
    pub const ALL: [EnemyKind; 6] = [
        Self::Minion,
        Self::WindGrognard,
        Self::FireGrognard,
        Self::WaterBrute,
        Self::EarthBrute,
        Self::Boss,
    ];

    /// Display name used by wave files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Minion => "Minion",
            Self::WindGrognard => "Wind Grognard",
            Self::FireGrognard => "Fire Grognard",
            Self::WaterBrute => "Water Brute",
            Self::EarthBrute => "Earth Brute",
            Self::Boss => "Boss",
        }
    }

    /// Resolves a display name into an archetype.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Static statistics for the archetype.
    #[must_use]
    pub const fn stats(self) -> EnemyStats {
        match self {
            Self::Minion => EnemyStats {
                health: 10,
                element: Element::None,
                attack_power: 3.0,
                attack_interval: Duration::ZERO,
                range: 0.0,
                speed: 1.0,
                reward: 1,
                targeting: EnemyTargeting::Passive,
                splash_radius: None,
            },
            Self::WindGrognard => EnemyStats {
                health: 1,
                element: Element::Air,
                attack_power: 7.0,
                attack_interval: Duration::from_secs(2),
                range: 5.0,
                speed: 2.0,
                reward: 1,
                targeting: EnemyTargeting::WeakestTower,
                splash_radius: None,
            },
            Self::FireGrognard => EnemyStats {
                health: 1,
                element: Element::Fire,
                attack_power: 7.0,
                attack_interval: Duration::from_secs(2),
                range: 3.0,
                speed: 2.0,
                reward: 1,
                targeting: EnemyTargeting::NearestTower,
                splash_radius: Some(1.5),
            },
            Self::WaterBrute => EnemyStats {
                health: 30,
                element: Element::Water,
                attack_power: 5.0,
                attack_interval: Duration::from_secs(1),
                range: 3.0,
                speed: 1.0,
                reward: 3,
                targeting: EnemyTargeting::WeakestTower,
                splash_radius: Some(1.5),
            },
            Self::EarthBrute => EnemyStats {
                health: 30,
                element: Element::Earth,
                attack_power: 5.0,
                attack_interval: Duration::from_secs(1),
                range: 3.0,
                speed: 1.0,
                reward: 3,
                targeting: EnemyTargeting::NearestTower,
                splash_radius: None,
            },
            Self::Boss => EnemyStats {
                health: 150,
                element: Element::Fire,
                attack_power: 100.0,
                attack_interval: Duration::from_secs(10),
                range: 2.0,
                speed: 0.5,
                reward: 100,
                targeting: EnemyTargeting::NearestTower,
                splash_radius: None,
            },
        }
    }
}

/// Tower archetypes offered by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerKind {
    /// Cheap short-range tower.
    Archer,
    /// Long-range air tower.
    WindCaster,
    /// Water tower.
    WaterCaster,
    /// Earth tower that splashes around its target.
    EarthCaster,
    /// Fast fire tower.
    FireCaster,
}

impl TowerKind {
    /// Every tower archetype in store order.
    pub const ALL: [TowerKind; 5] = [
        Self::Archer,
        Self::WindCaster,
        Self::WaterCaster,
        Self::EarthCaster,
        Self::FireCaster,
    ];

    /// Display name shown by the store.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Archer => "Archer",
            Self::WindCaster => "Wind Caster",
            Self::WaterCaster => "Water Caster",
            Self::EarthCaster => "Earth Caster",
            Self::FireCaster => "Fire Caster",
        }
    }

    /// Resolves a display name into an archetype.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Static statistics for the archetype.
    #[must_use]
    pub const fn stats(self) -> TowerStats {
        match self {
            Self::Archer => TowerStats {
                health: 30,
                element: Element::None,
                attack_power: 5.0,
                attack_interval: Duration::from_secs(1),
                range: 2.0,
                cost: 20,
                targeting: TowerTargeting::Leading,
                splash_radius: None,
            },
            Self::WindCaster => TowerStats {
                health: 30,
                element: Element::Air,
                attack_power: 5.0,
                attack_interval: Duration::from_millis(1500),
                range: 6.0,
                cost: 50,
                targeting: TowerTargeting::Nearest,
                splash_radius: None,
            },
            Self::WaterCaster => TowerStats {
                health: 30,
                element: Element::Water,
                attack_power: 3.0,
                attack_interval: Duration::from_secs(1),
                range: 4.0,
                cost: 50,
                targeting: TowerTargeting::Leading,
                splash_radius: None,
            },
            Self::EarthCaster => TowerStats {
                health: 50,
                element: Element::Earth,
                attack_power: 7.0,
                attack_interval: Duration::from_millis(500),
                range: 2.5,
                cost: 100,
                targeting: TowerTargeting::Tankiest,
                splash_radius: Some(1.0),
            },
            Self::FireCaster => TowerStats {
                health: 30,
                element: Element::Fire,
                attack_power: 10.0,
                attack_interval: Duration::from_millis(500),
                range: 2.5,
                cost: 100,
                targeting: TowerTargeting::Nearest,
                splash_radius: None,
            },
        }
    }

    /// Purchase price of the archetype.
    #[must_use]
    pub const fn cost(self) -> u32 {
        self.stats().cost
    }
}
