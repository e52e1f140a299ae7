#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session orchestration for Elemental Defence.
//!
//! A [`Session`] owns the player, the store, the active level's world and its
//! wave manager. Adapters drive it exclusively through [`apply`], which
//! executes one [`Command`] and reports what happened as [`Event`] values.
//! Every tick runs the same phases in the same order:
//!
//! 1. the current wave spawns at most one enemy,
//! 2. every enemy moves along the path,
//! 3. towers attack,
//! 4. enemies attack,
//! 5. enemies at the base hurt the player, defeated enemies pay their reward
//!    and destroyed towers are removed,
//! 6. waves advance, and the level, the game win or the game loss is decided.

use std::time::Duration;

use elemental_defence_core::{
    CellCoord, Command, EnemyId, Event, PlacementError, RemovalError, TowerId, TowerKind,
};
use elemental_defence_system_combat::Combat;
use elemental_defence_system_movement::Movement;
use elemental_defence_system_waves::WaveManager;
use elemental_defence_world::{query as world_query, Entity, World};
use tracing::{debug, info, warn};

mod config;
mod level;
mod player;
mod store;

pub use config::SessionConfig;
pub use level::{GameDefinition, LevelDefinition};
pub use player::Player;
pub use store::{Store, StoreEntry};

/// Final result of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every level was completed.
    Won,
    /// The player's base health reached zero.
    Lost,
}

/// Authoritative state of one play-through.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    game: GameDefinition,
    level: usize,
    announced_level: Option<usize>,
    world: World,
    waves: WaveManager,
    player: Player,
    store: Store,
    movement: Movement,
    combat: Combat,
    outcome: Option<Outcome>,
    elapsed: Duration,
    arrivals: Vec<EnemyId>,
}

impl Session {
    /// Creates a session positioned at the first level of `game`.
    #[must_use]
    pub fn new(config: SessionConfig, game: GameDefinition) -> Self {
        let (world, waves) = load_level(&config, game.first_level());
        Self {
            player: Player::new(config.starting_health, config.starting_money),
            config,
            game,
            level: 0,
            announced_level: None,
            world,
            waves,
            store: Store::new(),
            movement: Movement::new(),
            combat: Combat::new(),
            outcome: None,
            elapsed: Duration::ZERO,
            arrivals: Vec::new(),
        }
    }

    fn tick(&mut self, dt: Duration, out: &mut Vec<Event>) {
        if self.outcome.is_some() {
            return;
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        out.push(Event::TimeAdvanced { dt });
        if self.announced_level != Some(self.level) {
            self.announced_level = Some(self.level);
            let levels = self.game.levels();
            let name = levels.get(self.level).map_or("", LevelDefinition::name);
            info!(level = self.level, name, "level started");
            out.push(Event::LevelStarted { level: self.level });
        }

        let _ = self.waves.spawn(dt, &mut self.world, out);

        let arrivals = &mut self.arrivals;
        arrivals.clear();
        self.movement.handle(dt, &mut self.world, arrivals);

        self.combat
            .resolve_tower_attacks(dt, self.world.battlefield(), out);
        self.combat
            .resolve_enemy_attacks(dt, self.world.battlefield(), out);

        self.settle(out);
        self.progress(out);
    }

    fn settle(&mut self, out: &mut Vec<Event>) {
        for &enemy_id in &self.arrivals {
            let alive = world_query::enemy(&self.world, enemy_id).is_some_and(Entity::is_alive);
            if !alive {
                continue;
            }
            let Some(enemy) = self.world.remove_enemy(enemy_id) else {
                continue;
            };
            let damage = enemy.base_damage();
            self.player.take_damage(damage);
            debug!(
                enemy = enemy_id.get(),
                damage,
                health = self.player.health(),
                "enemy reached the base"
            );
            out.push(Event::EnemyReachedBase {
                enemy: enemy_id,
                damage,
            });
        }

        let defeated: Vec<EnemyId> = world_query::enemies(&self.world)
            .filter(|(_, enemy)| !enemy.is_alive())
            .map(|(id, _)| id)
            .collect();
        for enemy_id in defeated {
            let Some(enemy) = self.world.remove_enemy(enemy_id) else {
                continue;
            };
            let reward = enemy.reward();
            self.player.earn(reward);
            debug!(
                enemy = enemy_id.get(),
                reward,
                money = self.player.money(),
                "enemy defeated"
            );
            out.push(Event::EnemyDefeated {
                enemy: enemy_id,
                reward,
            });
        }

        let destroyed: Vec<TowerId> = world_query::towers(&self.world)
            .filter(|(_, tower)| !tower.is_alive())
            .map(|(id, _)| id)
            .collect();
        for tower_id in destroyed {
            if let Ok(tower) = self.world.remove_tower(tower_id) {
                debug!(tower = tower_id.get(), "tower destroyed");
                out.push(Event::TowerDestroyed {
                    tower: tower_id,
                    cell: tower.cell(),
                });
            }
        }
    }

    fn progress(&mut self, out: &mut Vec<Event>) {
        self.waves.prune(&self.world);
        let _ = self.waves.advance_if_cleared(out);

        if self.player.is_defeated() {
            self.outcome = Some(Outcome::Lost);
            info!(level = self.level, elapsed = ?self.elapsed, "game lost");
            out.push(Event::GameLost);
            return;
        }

        if !self.waves.is_complete() {
            return;
        }

        info!(level = self.level, money = self.player.money(), "level completed");
        out.push(Event::LevelCompleted { level: self.level });

        let next = self.level + 1;
        if next >= self.game.levels().len() {
            self.outcome = Some(Outcome::Won);
            info!(
                health = self.player.health(),
                elapsed = ?self.elapsed,
                "game won"
            );
            out.push(Event::GameWon);
            return;
        }

        let Some(level) = self.game.levels().get(next) else {
            return;
        };
        let (world, waves) = load_level(&self.config, level);
        self.world = world;
        self.waves = waves;
        self.level = next;
    }

    fn place_tower(&mut self, kind: TowerKind, cell: CellCoord, out: &mut Vec<Event>) {
        match self.try_place_tower(kind, cell) {
            Ok((tower, cost)) => {
                debug!(tower = tower.get(), kind = kind.name(), cost, "tower placed");
                out.push(Event::TowerPlaced {
                    tower,
                    kind,
                    cell,
                    cost,
                });
            }
            Err(reason) => {
                warn!(kind = kind.name(), ?cell, ?reason, "tower placement rejected");
                out.push(Event::TowerPlacementRejected { kind, cell, reason });
            }
        }
    }

    fn try_place_tower(
        &mut self,
        kind: TowerKind,
        cell: CellCoord,
    ) -> Result<(TowerId, u32), PlacementError> {
        if self.outcome.is_some() {
            return Err(PlacementError::SessionOver);
        }
        self.world.check_placement(cell)?;
        let cost = self.store.purchase(kind, &mut self.player)?;
        match self.world.add_tower(kind, cell) {
            Ok(tower) => Ok((tower, cost)),
            Err(reason) => {
                self.player.earn(cost);
                Err(reason)
            }
        }
    }

    fn remove_tower(&mut self, tower: TowerId, out: &mut Vec<Event>) {
        let result = if self.outcome.is_some() {
            Err(RemovalError::SessionOver)
        } else {
            self.world.remove_tower(tower)
        };
        match result {
            Ok(removed) => {
                debug!(tower = tower.get(), "tower removed");
                out.push(Event::TowerRemoved {
                    tower,
                    cell: removed.cell(),
                });
            }
            Err(reason) => {
                warn!(tower = tower.get(), ?reason, "tower removal rejected");
                out.push(Event::TowerRemovalRejected { tower, reason });
            }
        }
    }
}

fn load_level(config: &SessionConfig, level: &LevelDefinition) -> (World, WaveManager) {
    let world = World::new(level.grid().clone(), config.area_extent);
    let waves = WaveManager::new(level.waves().to_vec());
    (world, waves)
}

/// Applies the provided command to the session, appending resulting events.
pub fn apply(session: &mut Session, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => session.tick(dt, out_events),
        Command::PlaceTower { kind, cell } => session.place_tower(kind, cell, out_events),
        Command::RemoveTower { tower } => session.remove_tower(tower, out_events),
    }
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use std::time::Duration;

    use elemental_defence_core::EnemyId;
    use elemental_defence_world::World;

    use super::{Outcome, Player, Session, SessionConfig, Store};

    /// Player purse and base health.
    #[must_use]
    pub fn player(session: &Session) -> &Player {
        &session.player
    }

    /// Store catalogue.
    #[must_use]
    pub fn store(session: &Session) -> &Store {
        &session.store
    }

    /// World of the level being played.
    #[must_use]
    pub fn world(session: &Session) -> &World {
        &session.world
    }

    /// Configuration the session was created with.
    #[must_use]
    pub fn config(session: &Session) -> &SessionConfig {
        &session.config
    }

    /// Zero-based index of the level being played.
    #[must_use]
    pub fn level(session: &Session) -> usize {
        session.level
    }

    /// Zero-based index of the running wave, if any remain in the level.
    #[must_use]
    pub fn current_wave(session: &Session) -> Option<usize> {
        session.waves.current_wave()
    }

    /// Enemies spawned by the running level's waves that are still in play.
    #[must_use]
    pub fn active_enemies(session: &Session) -> &[EnemyId] {
        session.waves.active_enemies()
    }

    /// Outcome of the game once decided.
    #[must_use]
    pub fn outcome(session: &Session) -> Option<Outcome> {
        session.outcome
    }

    /// Simulated time accumulated by ticks.
    #[must_use]
    pub fn elapsed(session: &Session) -> Duration {
        session.elapsed
    }
}
