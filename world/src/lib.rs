#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Elemental Defence.
//!
//! The [`World`] is an arena that owns every enemy and tower of the active
//! level. Tiles and external collections refer to entities only through
//! [`EnemyId`] and [`TowerId`] handles, so destroying an entity in one place
//! removes it everywhere.

use std::collections::BTreeMap;

use elemental_defence_core::{
    CellCoord, EnemyId, PlacementError, RemovalError, TileKind, TowerId, TowerKind,
};
use tracing::debug;

mod entities;
mod grid;
mod layout;
mod path;
mod pathfinding;

pub use entities::{Cooldown, CooldownState, Enemy, Entity, Tower, Vitals};
pub use grid::{Grid, Tile};
pub use layout::Layout;
pub use path::Path;

/// Represents the authoritative state of one level.
#[derive(Debug)]
pub struct World {
    grid: Grid,
    layout: Layout,
    enemies: BTreeMap<EnemyId, Enemy>,
    towers: BTreeMap<TowerId, Tower>,
    next_enemy_id: EnemyId,
    next_tower_id: TowerId,
}

impl World {
    /// Creates an empty world over `grid`, laid out in a square area of side `extent`.
    #[must_use]
    pub fn new(grid: Grid, extent: f64) -> Self {
        let layout = Layout::fit(extent, grid.columns(), grid.rows());
        Self {
            grid,
            layout,
            enemies: BTreeMap::new(),
            towers: BTreeMap::new(),
            next_enemy_id: EnemyId::new(0),
            next_tower_id: TowerId::new(0),
        }
    }

    /// Stores a freshly spawned enemy and returns its handle.
    pub fn add_enemy(&mut self, enemy: Enemy) -> EnemyId {
        let id = self.next_enemy_id;
        self.next_enemy_id = EnemyId::new(id.get().saturating_add(1));
        debug!(enemy = id.get(), kind = enemy.kind().name(), "enemy added");
        let _ = self.enemies.insert(id, enemy);
        id
    }

    /// Removes an enemy from the arena, returning it if it existed.
    pub fn remove_enemy(&mut self, enemy: EnemyId) -> Option<Enemy> {
        self.enemies.remove(&enemy)
    }

    /// Checks whether a tower could stand on `cell`, ignoring cost.
    pub fn check_placement(&self, cell: CellCoord) -> Result<(), PlacementError> {
        let tile = self.grid.tile(cell).ok_or(PlacementError::OutOfBounds)?;
        if tile.kind() != TileKind::Constructible {
            return Err(PlacementError::NotConstructible);
        }
        if tile.tower().is_some() {
            return Err(PlacementError::Occupied);
        }
        Ok(())
    }

    /// Builds a tower on `cell` and records it on the tile.
    ///
    /// The tower is anchored at the world position of the cell's centre.
    pub fn add_tower(
        &mut self,
        kind: TowerKind,
        cell: CellCoord,
    ) -> Result<TowerId, PlacementError> {
        self.check_placement(cell)?;
        let id = self.next_tower_id;
        self.next_tower_id = TowerId::new(id.get().saturating_add(1));
        let tower = Tower::new(kind, cell, self.layout.cell_center(cell));
        let _ = self.towers.insert(id, tower);
        self.grid.set_tower(cell, Some(id));
        Ok(id)
    }

    /// Removes a tower from both its tile and the arena.
    pub fn remove_tower(&mut self, tower: TowerId) -> Result<Tower, RemovalError> {
        let removed = self.towers.remove(&tower).ok_or(RemovalError::MissingTower)?;
        self.grid.set_tower(removed.cell(), None);
        Ok(removed)
    }

    /// Mutable access to a single enemy.
    pub fn enemy_mut(&mut self, enemy: EnemyId) -> Option<&mut Enemy> {
        self.enemies.get_mut(&enemy)
    }

    /// Mutable iterator over every enemy in handle order.
    pub fn enemies_mut(&mut self) -> impl Iterator<Item = (EnemyId, &mut Enemy)> {
        self.enemies.iter_mut().map(|(id, enemy)| (*id, enemy))
    }

    /// Splits the world into the mutable collections combat needs at once.
    pub fn battlefield(&mut self) -> Battlefield<'_> {
        Battlefield {
            enemies: &mut self.enemies,
            towers: &mut self.towers,
            layout: &self.layout,
        }
    }
}

/// Simultaneous mutable view over enemies and towers.
#[derive(Debug)]
pub struct Battlefield<'a> {
    /// Enemies keyed by handle, in spawn order.
    pub enemies: &'a mut BTreeMap<EnemyId, Enemy>,
    /// Towers keyed by handle, in placement order.
    pub towers: &'a mut BTreeMap<TowerId, Tower>,
    /// Transform between tower and enemy coordinate frames.
    pub layout: &'a Layout,
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Enemy, Grid, Layout, Path, Tower, World};
    use elemental_defence_core::{CellCoord, EnemyId, TowerId};

    /// Provides read-only access to the validated grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Provides read-only access to the grid-to-world transform.
    #[must_use]
    pub fn layout(world: &World) -> &Layout {
        &world.layout
    }

    /// Shared path that enemies follow.
    #[must_use]
    pub fn path(world: &World) -> &Path {
        world.grid.path()
    }

    /// Looks up an enemy by handle.
    #[must_use]
    pub fn enemy(world: &World, enemy: EnemyId) -> Option<&Enemy> {
        world.enemies.get(&enemy)
    }

    /// Looks up a tower by handle.
    #[must_use]
    pub fn tower(world: &World, tower: TowerId) -> Option<&Tower> {
        world.towers.get(&tower)
    }

    /// Tower standing on `cell`, if any.
    #[must_use]
    pub fn tower_at(world: &World, cell: CellCoord) -> Option<TowerId> {
        world.grid.tile(cell).and_then(|tile| tile.tower())
    }

    /// Iterates over enemies in handle order.
    pub fn enemies(world: &World) -> impl Iterator<Item = (EnemyId, &Enemy)> {
        world.enemies.iter().map(|(id, enemy)| (*id, enemy))
    }

    /// Iterates over towers in handle order.
    pub fn towers(world: &World) -> impl Iterator<Item = (TowerId, &Tower)> {
        world.towers.iter().map(|(id, tower)| (*id, tower))
    }

    /// Number of enemies currently alive in the arena.
    #[must_use]
    pub fn enemy_count(world: &World) -> usize {
        world.enemies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elemental_defence_core::{EnemyKind, WorldPoint};
    use std::sync::Arc;

    fn world() -> World {
        let grid = Grid::from_rows("test/map", &["SRB", "CCX"]).expect("valid map");
        World::new(grid, 700.0)
    }

    #[test]
    fn placement_records_tower_on_tile() {
        let mut world = world();
        let cell = CellCoord::new(1, 1);
        let tower = world.add_tower(TowerKind::Archer, cell).expect("placement");
        assert_eq!(query::tower_at(&world, cell), Some(tower));
        let placed = query::tower(&world, tower).expect("tower stored");
        let expected = WorldPoint::new(350.0, 350.0 + 700.0 / 6.0);
        assert!(placed.position().distance(expected) < 1e-9);
    }

    #[test]
    fn placement_rejections_are_specific() {
        let mut world = world();
        assert_eq!(
            world.add_tower(TowerKind::Archer, CellCoord::new(5, 0)),
            Err(PlacementError::OutOfBounds)
        );
        assert_eq!(
            world.add_tower(TowerKind::Archer, CellCoord::new(1, 0)),
            Err(PlacementError::NotConstructible)
        );
        assert_eq!(
            world.add_tower(TowerKind::Archer, CellCoord::new(2, 1)),
            Err(PlacementError::NotConstructible)
        );
        let _ = world
            .add_tower(TowerKind::Archer, CellCoord::new(0, 1))
            .expect("first placement");
        assert_eq!(
            world.add_tower(TowerKind::WindCaster, CellCoord::new(0, 1)),
            Err(PlacementError::Occupied)
        );
    }

    #[test]
    fn removal_clears_tile_and_arena() {
        let mut world = world();
        let cell = CellCoord::new(0, 1);
        let tower = world.add_tower(TowerKind::Archer, cell).expect("placement");
        let removed = world.remove_tower(tower).expect("removal");
        assert_eq!(removed.cell(), cell);
        assert_eq!(query::tower_at(&world, cell), None);
        assert!(query::tower(&world, tower).is_none());
        assert_eq!(world.remove_tower(tower).unwrap_err(), RemovalError::MissingTower);
        assert!(world.check_placement(cell).is_ok());
    }

    #[test]
    fn enemy_handles_follow_spawn_order() {
        let mut world = world();
        let path = Arc::clone(query::grid(&world).path());
        let first = world.add_enemy(Enemy::new(EnemyKind::Minion, Arc::clone(&path)));
        let second = world.add_enemy(Enemy::new(EnemyKind::Boss, path));
        assert!(first < second);
        let order: Vec<_> = query::enemies(&world).map(|(id, _)| id).collect();
        assert_eq!(order, vec![first, second]);
        assert!(world.remove_enemy(first).is_some());
        assert!(world.remove_enemy(first).is_none());
        assert_eq!(query::enemy_count(&world), 1);
    }
}
