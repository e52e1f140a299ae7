//! Target selection rules for towers and enemies.

use std::collections::BTreeMap;

use elemental_defence_core::{EnemyId, EnemyTargeting, GridPoint, TowerId, TowerTargeting};
use elemental_defence_world::{Enemy, Entity, Layout, Tower};

/// Reports whether `target` lies within `range` of `origin`, boundary inclusive.
#[must_use]
pub fn in_range(origin: GridPoint, target: GridPoint, range: f64) -> bool {
    origin.distance(target) <= range
}

/// Picks the enemy a tower standing at `origin` should attack.
///
/// Only living enemies within `range` are considered. Ties resolve to the
/// earliest handle.
#[must_use]
pub fn select_enemy(
    rule: TowerTargeting,
    origin: GridPoint,
    range: f64,
    enemies: &BTreeMap<EnemyId, Enemy>,
) -> Option<EnemyId> {
    let mut best: Option<BestCandidate<EnemyId>> = None;
    for (&id, enemy) in enemies {
        if !enemy.is_alive() || !in_range(origin, enemy.position(), range) {
            continue;
        }
        let score = match rule {
            TowerTargeting::Leading => enemy.distance_travelled(),
            TowerTargeting::Nearest => -origin.distance(enemy.position()),
            TowerTargeting::Tankiest => f64::from(enemy.health().get()),
        };
        let current = BestCandidate { id, score };
        if best.as_ref().map_or(true, |existing| current.precedes(existing)) {
            best = Some(current);
        }
    }
    best.map(|candidate| candidate.id)
}

/// Picks the tower an enemy standing at `origin` should attack.
///
/// Tower positions are converted to grid units through `layout` before any
/// distance is measured. Passive enemies never select a target.
#[must_use]
pub fn select_tower(
    rule: EnemyTargeting,
    origin: GridPoint,
    range: f64,
    towers: &BTreeMap<TowerId, Tower>,
    layout: &Layout,
) -> Option<TowerId> {
    if rule == EnemyTargeting::Passive {
        return None;
    }

    let mut best: Option<BestCandidate<TowerId>> = None;
    for (&id, tower) in towers {
        let position = layout.world_to_grid(tower.position());
        if !tower.is_alive() || !in_range(origin, position, range) {
            continue;
        }
        let score = match rule {
            EnemyTargeting::NearestTower => -origin.distance(position),
            EnemyTargeting::WeakestTower => -f64::from(tower.health().get()),
            EnemyTargeting::Passive => continue,
        };
        let current = BestCandidate { id, score };
        if best.as_ref().map_or(true, |existing| current.precedes(existing)) {
            best = Some(current);
        }
    }
    best.map(|candidate| candidate.id)
}

#[derive(Clone, Copy, Debug)]
struct BestCandidate<Id> {
    id: Id,
    score: f64,
}

impl<Id: Ord> BestCandidate<Id> {
    fn precedes(&self, other: &Self) -> bool {
        if self.score != other.score {
            return self.score > other.score;
        }

        self.id < other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elemental_defence_core::{CellCoord, EnemyKind, TowerKind};
    use elemental_defence_world::{Grid, Path};
    use std::{sync::Arc, time::Duration};

    fn path() -> Arc<Path> {
        let grid = Grid::from_rows("test/map", &["SRRRRRRB"]).expect("valid map");
        Arc::clone(grid.path())
    }

    fn enemy(kind: EnemyKind, travelled: Duration) -> Enemy {
        let mut enemy = Enemy::new(kind, path());
        enemy.advance(travelled);
        enemy
    }

    #[test]
    fn leading_picks_the_most_advanced_enemy() {
        let mut enemies = BTreeMap::new();
        let _ = enemies.insert(EnemyId::new(0), enemy(EnemyKind::Minion, Duration::from_secs(1)));
        let _ = enemies.insert(EnemyId::new(1), enemy(EnemyKind::Minion, Duration::from_secs(3)));
        let _ = enemies.insert(EnemyId::new(2), enemy(EnemyKind::Minion, Duration::from_secs(2)));

        let origin = GridPoint::new(2.5, 1.5);
        let selected = select_enemy(TowerTargeting::Leading, origin, 5.0, &enemies);
        assert_eq!(selected, Some(EnemyId::new(1)));
    }

    #[test]
    fn nearest_ignores_enemies_out_of_range() {
        let mut enemies = BTreeMap::new();
        let _ = enemies.insert(EnemyId::new(0), enemy(EnemyKind::Minion, Duration::ZERO));
        let _ = enemies.insert(EnemyId::new(1), enemy(EnemyKind::Minion, Duration::from_secs(5)));

        let origin = GridPoint::new(5.5, 0.5);
        assert_eq!(
            select_enemy(TowerTargeting::Nearest, origin, 1.0, &enemies),
            Some(EnemyId::new(1))
        );
        assert_eq!(
            select_enemy(TowerTargeting::Nearest, GridPoint::new(0.5, 3.0), 1.0, &enemies),
            None
        );
    }

    #[test]
    fn range_boundary_is_inclusive() {
        assert!(in_range(GridPoint::new(0.0, 0.0), GridPoint::new(3.0, 4.0), 5.0));
        assert!(!in_range(GridPoint::new(0.0, 0.0), GridPoint::new(3.0, 4.0), 4.999));
    }

    #[test]
    fn tankiest_prefers_health_then_earliest_handle() {
        let mut enemies = BTreeMap::new();
        let _ = enemies.insert(EnemyId::new(4), enemy(EnemyKind::EarthBrute, Duration::ZERO));
        let _ = enemies.insert(EnemyId::new(2), enemy(EnemyKind::WaterBrute, Duration::ZERO));
        let _ = enemies.insert(EnemyId::new(1), enemy(EnemyKind::Minion, Duration::ZERO));

        let origin = GridPoint::new(0.5, 0.5);
        assert_eq!(
            select_enemy(TowerTargeting::Tankiest, origin, 2.0, &enemies),
            Some(EnemyId::new(2))
        );
    }

    #[test]
    fn defeated_enemies_are_not_targeted() {
        let mut enemies = BTreeMap::new();
        let mut dead = enemy(EnemyKind::Boss, Duration::ZERO);
        dead.take_damage(1_000);
        let _ = enemies.insert(EnemyId::new(0), dead);
        let _ = enemies.insert(EnemyId::new(1), enemy(EnemyKind::Minion, Duration::ZERO));

        assert_eq!(
            select_enemy(TowerTargeting::Tankiest, GridPoint::new(0.5, 0.5), 2.0, &enemies),
            Some(EnemyId::new(1))
        );
    }

    fn towers(layout: &Layout) -> BTreeMap<TowerId, Tower> {
        let mut towers = BTreeMap::new();
        for (index, (kind, column)) in [
            (TowerKind::Archer, 1),
            (TowerKind::EarthCaster, 2),
            (TowerKind::Archer, 6),
        ]
        .into_iter()
        .enumerate()
        {
            let cell = CellCoord::new(column, 1);
            let tower = Tower::new(kind, cell, layout.cell_center(cell));
            let _ = towers.insert(TowerId::new(index as u32), tower);
        }
        towers
    }

    #[test]
    fn weakest_tower_compares_in_grid_units() {
        let layout = Layout::fit(700.0, 8, 2);
        let mut towers = towers(&layout);
        if let Some(tower) = towers.get_mut(&TowerId::new(1)) {
            tower.take_damage(45);
        }

        let origin = GridPoint::new(1.5, 0.5);
        assert_eq!(
            select_tower(EnemyTargeting::WeakestTower, origin, 3.0, &towers, &layout),
            Some(TowerId::new(1))
        );
        assert_eq!(
            select_tower(EnemyTargeting::NearestTower, origin, 3.0, &towers, &layout),
            Some(TowerId::new(0))
        );
    }

    #[test]
    fn passive_enemies_never_select() {
        let layout = Layout::fit(700.0, 8, 2);
        let towers = towers(&layout);
        assert_eq!(
            select_tower(
                EnemyTargeting::Passive,
                GridPoint::new(1.5, 0.5),
                100.0,
                &towers,
                &layout
            ),
            None
        );
    }
}
