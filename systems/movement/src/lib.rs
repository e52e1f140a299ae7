#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that walks enemies along the shared path.

use std::time::Duration;

use elemental_defence_core::EnemyId;
use elemental_defence_world::World;
use tracing::debug;

/// Pure system that advances enemies and reports those reaching the base.
#[derive(Debug, Default)]
pub struct Movement {
    scratch: Vec<EnemyId>,
}

impl Movement {
    /// Creates a new movement system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances every enemy by `dt` and appends those at the base to `out`.
    ///
    /// Each enemy's travelled distance grows by `speed * dt` and its position
    /// is recomputed from the start of the path. Enemies are visited in
    /// handle order, so arrivals are reported in spawn order.
    pub fn handle(&mut self, dt: Duration, world: &mut World, out: &mut Vec<EnemyId>) {
        self.scratch.clear();

        for (id, enemy) in world.enemies_mut() {
            enemy.advance(dt);
            if enemy.has_reached_base() {
                debug!(
                    enemy = id.get(),
                    distance = enemy.distance_travelled(),
                    "enemy reached the base"
                );
                self.scratch.push(id);
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}
