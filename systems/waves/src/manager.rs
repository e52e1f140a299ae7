//! Strictly sequential wave execution.

use std::time::Duration;

use elemental_defence_core::{EnemyId, Event};
use elemental_defence_world::{query, Entity, World};
use tracing::{debug, info};

use crate::schedule::Wave;

/// Runs waves one after another and tracks the enemies they spawned.
///
/// Wave `n + 1` starts only once wave `n` has spawned every entry and none of
/// its enemies remain active.
#[derive(Clone, Debug, Default)]
pub struct WaveManager {
    waves: Vec<Wave>,
    current: usize,
    active: Vec<EnemyId>,
    announced: Option<usize>,
}

impl WaveManager {
    /// Creates a manager that will run `waves` in order.
    #[must_use]
    pub fn new(waves: Vec<Wave>) -> Self {
        Self {
            waves,
            current: 0,
            active: Vec::new(),
            announced: None,
        }
    }

    /// Runs one full scheduling step: spawn, prune, then advance.
    pub fn update(&mut self, dt: Duration, world: &mut World, out: &mut Vec<Event>) {
        let _ = self.spawn(dt, world, out);
        self.prune(world);
        let _ = self.advance_if_cleared(out);
    }

    /// Ticks the current wave and materialises at most one enemy in `world`.
    pub fn spawn(
        &mut self,
        dt: Duration,
        world: &mut World,
        out: &mut Vec<Event>,
    ) -> Option<EnemyId> {
        let index = self.current;
        let wave = self.waves.get_mut(index)?;

        if self.announced != Some(index) {
            self.announced = Some(index);
            info!(wave = index, entries = wave.entries().len(), "wave started");
            out.push(Event::WaveStarted { wave: index });
        }

        let path = query::grid(world).path().clone();
        let enemy = wave.update(dt, &path)?;
        let kind = enemy.kind();
        let id = world.add_enemy(enemy);
        debug!(wave = index, enemy = id.get(), kind = kind.name(), "enemy spawned");
        self.active.push(id);
        out.push(Event::EnemySpawned {
            enemy: id,
            kind,
            wave: index,
        });
        Some(id)
    }

    /// Forgets enemies that were removed from `world` or have no health left.
    ///
    /// Pruning never pays rewards; settlement is the caller's concern.
    pub fn prune(&mut self, world: &World) {
        self.active
            .retain(|id| query::enemy(world, *id).is_some_and(Entity::is_alive));
    }

    /// Moves to the next wave when the current one is exhausted and cleared.
    ///
    /// Returns `true` when the manager advanced.
    pub fn advance_if_cleared(&mut self, out: &mut Vec<Event>) -> bool {
        let Some(wave) = self.waves.get(self.current) else {
            return false;
        };
        if !wave.is_complete() || !self.active.is_empty() {
            return false;
        }

        info!(wave = self.current, "wave cleared");
        out.push(Event::WaveCleared { wave: self.current });
        self.current += 1;
        true
    }

    /// Enemies spawned by the manager that are still in play.
    #[must_use]
    pub fn active_enemies(&self) -> &[EnemyId] {
        &self.active
    }

    /// Index of the wave currently running, if any remain.
    #[must_use]
    pub fn current_wave(&self) -> Option<usize> {
        (self.current < self.waves.len()).then_some(self.current)
    }

    /// Total number of waves.
    #[must_use]
    pub fn wave_count(&self) -> usize {
        self.waves.len()
    }

    /// Reports whether every wave ran and no spawned enemy remains.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current >= self.waves.len() && self.active.is_empty()
    }
}
