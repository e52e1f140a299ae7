use std::{sync::Arc, time::Duration};

use elemental_defence_core::{EnemyKind, GridPoint};
use elemental_defence_system_movement::Movement;
use elemental_defence_world::{query, Enemy, Grid, World};

fn world(rows: &[&str]) -> World {
    let grid = Grid::from_rows("test/map", rows).expect("valid map");
    World::new(grid, 700.0)
}

fn spawn(world: &mut World, kind: EnemyKind) -> elemental_defence_core::EnemyId {
    let path = Arc::clone(query::grid(world).path());
    world.add_enemy(Enemy::new(kind, path))
}

#[test]
fn minion_reaches_base_after_two_seconds() {
    let mut world = world(&["SRB"]);
    let minion = spawn(&mut world, EnemyKind::Minion);
    let mut movement = Movement::new();
    let dt = Duration::from_millis(500);

    let mut arrivals = Vec::new();
    for _ in 0..3 {
        movement.handle(dt, &mut world, &mut arrivals);
        assert!(arrivals.is_empty());
    }

    movement.handle(dt, &mut world, &mut arrivals);
    assert_eq!(arrivals, vec![minion]);

    let enemy = query::enemy(&world, minion).expect("enemy stays until settled");
    assert_eq!(enemy.distance_travelled(), 2.0);
    assert_eq!(enemy.position(), GridPoint::new(2.5, 0.5));
}

#[test]
fn endpoint_is_stable_under_further_ticks() {
    let mut world = world(&["SRB"]);
    let minion = spawn(&mut world, EnemyKind::Minion);
    let mut movement = Movement::new();
    let mut arrivals = Vec::new();

    for _ in 0..10 {
        movement.handle(Duration::from_secs(1), &mut world, &mut arrivals);
    }

    let enemy = query::enemy(&world, minion).expect("enemy");
    assert!(enemy.has_reached_base());
    assert_eq!(enemy.position(), GridPoint::new(2.5, 0.5));
    assert_eq!(arrivals.len(), 9);
}

#[test]
fn distance_accumulates_speed_times_dt() {
    let mut world = world(&["SRRRRRRB"]);
    let boss = spawn(&mut world, EnemyKind::Boss);
    let grognard = spawn(&mut world, EnemyKind::WindGrognard);
    let mut movement = Movement::new();
    let mut arrivals = Vec::new();

    for _ in 0..4 {
        movement.handle(Duration::from_millis(250), &mut world, &mut arrivals);
    }

    let boss = query::enemy(&world, boss).expect("boss");
    let grognard = query::enemy(&world, grognard).expect("grognard");
    assert!((boss.distance_travelled() - 0.5).abs() < 1e-12);
    assert!((grognard.distance_travelled() - 2.0).abs() < 1e-12);
    assert!(arrivals.is_empty());
    assert!(grognard.position().distance(GridPoint::new(2.5, 0.5)) < 1e-12);
}

#[test]
fn arrivals_are_reported_in_spawn_order() {
    let mut world = world(&["SB"]);
    let first = spawn(&mut world, EnemyKind::Minion);
    let second = spawn(&mut world, EnemyKind::EarthBrute);
    let mut movement = Movement::new();
    let mut arrivals = Vec::new();

    movement.handle(Duration::from_secs(1), &mut world, &mut arrivals);

    assert_eq!(arrivals, vec![first, second]);
}
