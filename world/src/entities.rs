//! Enemies, towers and the combat capabilities they share.

use std::{sync::Arc, time::Duration};

use elemental_defence_core::{
    CellCoord, Element, EnemyKind, GridPoint, Health, TowerKind, WorldPoint,
};

use crate::path::Path;

/// Health and offensive statistics of a combatant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vitals {
    health: Health,
    max_health: Health,
    element: Element,
    attack_power: f64,
    range: f64,
}

impl Vitals {
    /// Creates vitals at full health.
    #[must_use]
    pub const fn new(max_health: u32, element: Element, attack_power: f64, range: f64) -> Self {
        Self {
            health: Health::new(max_health),
            max_health: Health::new(max_health),
            element,
            attack_power,
            range,
        }
    }

    /// Remaining health.
    #[must_use]
    pub const fn health(&self) -> Health {
        self.health
    }

    /// Health the combatant started with.
    #[must_use]
    pub const fn max_health(&self) -> Health {
        self.max_health
    }

    /// Elemental affinity.
    #[must_use]
    pub const fn element(&self) -> Element {
        self.element
    }

    /// Damage dealt before the elemental multiplier.
    #[must_use]
    pub const fn attack_power(&self) -> f64 {
        self.attack_power
    }

    /// Attack range in grid units.
    #[must_use]
    pub const fn range(&self) -> f64 {
        self.range
    }

    fn absorb(&mut self, damage: u32) {
        self.health = self.health.saturating_sub(damage);
    }
}

/// Observable phase of an attack cooldown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CooldownState {
    /// Less time than the attack interval has passed since the last attack.
    Idle,
    /// The combatant may attack.
    Ready,
}

/// Timer gating how often a combatant may attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cooldown {
    interval: Duration,
    elapsed: Duration,
}

impl Cooldown {
    /// Creates a cooldown that starts idle with no accumulated time.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
        }
    }

    /// Accumulates simulated time. Called every tick whatever the state.
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    /// Current phase of the timer.
    #[must_use]
    pub fn state(&self) -> CooldownState {
        if self.elapsed >= self.interval {
            CooldownState::Ready
        } else {
            CooldownState::Idle
        }
    }

    /// Reports whether the combatant may attack.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state() == CooldownState::Ready
    }

    /// Restarts the timer after a successful attack.
    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// Time accumulated since the last reset.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Minimum time between two attacks.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

/// Capabilities shared by every combatant.
pub trait Entity {
    /// Health and offensive statistics.
    fn vitals(&self) -> &Vitals;

    /// Mutable access to health and offensive statistics.
    fn vitals_mut(&mut self) -> &mut Vitals;

    /// Attack cooldown timer.
    fn cooldown(&self) -> &Cooldown;

    /// Mutable access to the attack cooldown timer.
    fn cooldown_mut(&mut self) -> &mut Cooldown;

    /// Remaining health.
    fn health(&self) -> Health {
        self.vitals().health()
    }

    /// Reports whether any health remains.
    fn is_alive(&self) -> bool {
        !self.vitals().health().is_depleted()
    }

    /// Subtracts `damage` from the health, flooring at zero.
    fn take_damage(&mut self, damage: u32) {
        self.vitals_mut().absorb(damage);
    }
}

/// Enemy walking the shared path toward the base.
#[derive(Clone, Debug)]
pub struct Enemy {
    kind: EnemyKind,
    vitals: Vitals,
    cooldown: Cooldown,
    speed: f64,
    reward: u32,
    distance_travelled: f64,
    position: GridPoint,
    path: Arc<Path>,
}

impl Enemy {
    /// Creates an enemy of `kind` standing on the first waypoint of `path`.
    #[must_use]
    pub fn new(kind: EnemyKind, path: Arc<Path>) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            vitals: Vitals::new(stats.health, stats.element, stats.attack_power, stats.range),
            cooldown: Cooldown::new(stats.attack_interval),
            speed: stats.speed,
            reward: stats.reward,
            distance_travelled: 0.0,
            position: path.position_at(0.0),
            path,
        }
    }

    /// Archetype of the enemy.
    #[must_use]
    pub const fn kind(&self) -> EnemyKind {
        self.kind
    }

    /// Movement speed in grid units per second.
    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    /// Money paid when the enemy is defeated.
    #[must_use]
    pub const fn reward(&self) -> u32 {
        self.reward
    }

    /// Distance covered along the path so far.
    #[must_use]
    pub const fn distance_travelled(&self) -> f64 {
        self.distance_travelled
    }

    /// Current position in grid units.
    #[must_use]
    pub const fn position(&self) -> GridPoint {
        self.position
    }

    /// Path the enemy follows.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Moves the enemy along its path for `dt` of simulated time.
    pub fn advance(&mut self, dt: Duration) {
        self.distance_travelled += self.speed * dt.as_secs_f64();
        self.position = self.path.position_at(self.distance_travelled);
    }

    /// Reports whether the enemy covered the whole path.
    #[must_use]
    pub fn has_reached_base(&self) -> bool {
        self.path.is_complete_at(self.distance_travelled)
    }

    /// Damage the player takes when this enemy reaches the base.
    #[must_use]
    pub fn base_damage(&self) -> u32 {
        let power = self.vitals.attack_power();
        if power.is_nan() || power <= 0.0 {
            0
        } else {
            power.trunc() as u32
        }
    }
}

impl Entity for Enemy {
    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }

    fn cooldown(&self) -> &Cooldown {
        &self.cooldown
    }

    fn cooldown_mut(&mut self) -> &mut Cooldown {
        &mut self.cooldown
    }
}

/// Stationary tower occupying one constructible tile.
#[derive(Clone, Debug)]
pub struct Tower {
    kind: TowerKind,
    vitals: Vitals,
    cooldown: Cooldown,
    cost: u32,
    cell: CellCoord,
    position: WorldPoint,
}

impl Tower {
    /// Creates a tower of `kind` on `cell`, anchored at the world `position`.
    #[must_use]
    pub fn new(kind: TowerKind, cell: CellCoord, position: WorldPoint) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            vitals: Vitals::new(stats.health, stats.element, stats.attack_power, stats.range),
            cooldown: Cooldown::new(stats.attack_interval),
            cost: stats.cost,
            cell,
            position,
        }
    }

    /// Archetype of the tower.
    #[must_use]
    pub const fn kind(&self) -> TowerKind {
        self.kind
    }

    /// Price paid for the tower.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// Tile hosting the tower.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Position in world units.
    #[must_use]
    pub const fn position(&self) -> WorldPoint {
        self.position
    }
}

impl Entity for Tower {
    fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    fn vitals_mut(&mut self) -> &mut Vitals {
        &mut self.vitals
    }

    fn cooldown(&self) -> &Cooldown {
        &self.cooldown
    }

    fn cooldown_mut(&mut self) -> &mut Cooldown {
        &mut self.cooldown
    }
}
