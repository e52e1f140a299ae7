#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Cooldown-gated attacks between towers and enemies.
//!
//! Every combatant's cooldown grows by the tick's `dt` whether or not it
//! attacks. Once ready, a combatant selects a target with its archetype's
//! rule, deals elemental damage and resets its cooldown exactly once, however
//! many splash victims the attack hit. Tower positions live in world units
//! and are always converted to grid units before being compared with enemy
//! positions.

use std::time::Duration;

use elemental_defence_core::{elemental_damage, EnemyId, Event, TowerId};
use elemental_defence_world::{Battlefield, Entity};
use tracing::debug;

pub mod targeting;

/// Combat system resolving the tower and enemy attack phases.
#[derive(Debug, Default)]
pub struct Combat {
    splash: Vec<(EnemyId, u32)>,
    tower_hits: Vec<(TowerId, u32)>,
}

impl Combat {
    /// Creates a new combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lets every tower, in placement order, attack the enemies in its range.
    pub fn resolve_tower_attacks(
        &mut self,
        dt: Duration,
        battlefield: Battlefield<'_>,
        out: &mut Vec<Event>,
    ) {
        let Battlefield {
            enemies,
            towers,
            layout,
        } = battlefield;

        for (&tower_id, tower) in towers.iter_mut() {
            tower.cooldown_mut().advance(dt);
            if !tower.is_alive() || !tower.cooldown().is_ready() {
                continue;
            }

            let stats = tower.kind().stats();
            let origin = layout.world_to_grid(tower.position());
            let Some(target_id) =
                targeting::select_enemy(stats.targeting, origin, tower.vitals().range(), enemies)
            else {
                continue;
            };
            let Some(target) = enemies.get(&target_id) else {
                continue;
            };

            let damage = elemental_damage(
                tower.vitals().attack_power(),
                tower.vitals().element(),
                target.vitals().element(),
            );
            let impact = target.position();

            self.splash.clear();
            self.splash.push((target_id, damage));
            if let Some(radius) = stats.splash_radius {
                for (&other_id, other) in enemies.iter() {
                    if other_id != target_id
                        && other.is_alive()
                        && targeting::in_range(impact, other.position(), radius)
                    {
                        self.splash.push((other_id, damage));
                    }
                }
            }

            for &(enemy_id, amount) in &self.splash {
                if let Some(enemy) = enemies.get_mut(&enemy_id) {
                    enemy.take_damage(amount);
                    debug!(
                        tower = tower_id.get(),
                        enemy = enemy_id.get(),
                        damage = amount,
                        health = enemy.health().get(),
                        "tower hit enemy"
                    );
                    out.push(Event::TowerAttacked {
                        tower: tower_id,
                        enemy: enemy_id,
                        damage: amount,
                    });
                }
            }

            tower.cooldown_mut().reset();
        }
    }

    /// Lets every enemy, in spawn order, attack the towers in its range.
    pub fn resolve_enemy_attacks(
        &mut self,
        dt: Duration,
        battlefield: Battlefield<'_>,
        out: &mut Vec<Event>,
    ) {
        let Battlefield {
            enemies,
            towers,
            layout,
        } = battlefield;

        for (&enemy_id, enemy) in enemies.iter_mut() {
            enemy.cooldown_mut().advance(dt);
            if !enemy.is_alive() || !enemy.cooldown().is_ready() {
                continue;
            }

            let stats = enemy.kind().stats();
            let origin = enemy.position();
            let Some(target_id) = targeting::select_tower(
                stats.targeting,
                origin,
                enemy.vitals().range(),
                towers,
                layout,
            ) else {
                continue;
            };

            let attacker = enemy.vitals();
            self.tower_hits.clear();
            for (&tower_id, tower) in towers.iter() {
                let hit = tower_id == target_id
                    || stats.splash_radius.is_some_and(|radius| {
                        tower.is_alive()
                            && targeting::in_range(
                                origin,
                                layout.world_to_grid(tower.position()),
                                radius,
                            )
                    });
                if hit {
                    let damage = elemental_damage(
                        attacker.attack_power(),
                        attacker.element(),
                        tower.vitals().element(),
                    );
                    self.tower_hits.push((tower_id, damage));
                }
            }

            for &(tower_id, amount) in &self.tower_hits {
                if let Some(tower) = towers.get_mut(&tower_id) {
                    tower.take_damage(amount);
                    debug!(
                        enemy = enemy_id.get(),
                        tower = tower_id.get(),
                        damage = amount,
                        health = tower.health().get(),
                        "enemy hit tower"
                    );
                    out.push(Event::EnemyAttacked {
                        enemy: enemy_id,
                        tower: tower_id,
                        damage: amount,
                    });
                }
            }

            enemy.cooldown_mut().reset();
        }
    }
}
