use std::time::Duration;

use elemental_defence_core::{EnemyKind, Event};
use elemental_defence_system_waves::{parse_wave, Wave, WaveManager};
use elemental_defence_world::{query, Entity, Grid, World};

fn world() -> World {
    let grid = Grid::from_rows("test/map", &["SRRRB"]).expect("valid map");
    World::new(grid, 700.0)
}

fn wave(text: &str) -> Wave {
    Wave::new(parse_wave("test/wave", text).expect("valid wave"))
}

#[test]
fn next_wave_waits_for_previous_enemies_to_leave() {
    let mut world = world();
    let mut manager = WaveManager::new(vec![wave("0|Minion"), wave("0|Boss")]);
    let mut events = Vec::new();
    let dt = Duration::from_millis(100);

    manager.update(dt, &mut world, &mut events);
    let first = manager.active_enemies().to_vec();
    assert_eq!(first.len(), 1);

    for _ in 0..20 {
        manager.update(dt, &mut world, &mut events);
        assert_eq!(manager.active_enemies(), first.as_slice());
        assert_eq!(manager.current_wave(), Some(0));
    }
    let spawned: Vec<_> = events
        .iter()
        .filter(|event| matches!(event, Event::EnemySpawned { .. }))
        .collect();
    assert_eq!(spawned.len(), 1);

    let _ = world.remove_enemy(first[0]);
    manager.update(dt, &mut world, &mut events);
    assert!(manager.active_enemies().is_empty());
    assert_eq!(manager.current_wave(), Some(1));

    manager.update(dt, &mut world, &mut events);
    let second = manager.active_enemies().to_vec();
    assert_eq!(second.len(), 1);
    let boss = query::enemy(&world, second[0]).expect("boss spawned");
    assert_eq!(boss.kind(), EnemyKind::Boss);
}

#[test]
fn depleted_enemies_are_pruned_without_removal() {
    let mut world = world();
    let mut manager = WaveManager::new(vec![wave("0|Minion")]);
    let mut events = Vec::new();

    manager.update(Duration::ZERO, &mut world, &mut events);
    let minion = manager.active_enemies()[0];
    world.enemy_mut(minion).expect("minion").take_damage(10);

    manager.update(Duration::ZERO, &mut world, &mut events);
    assert!(manager.active_enemies().is_empty());
    assert!(manager.is_complete());
    assert!(query::enemy(&world, minion).is_some(), "pruning leaves the arena alone");
}

#[test]
fn events_announce_wave_boundaries() {
    let mut world = world();
    let mut manager = WaveManager::new(vec![wave("0|Minion"), wave("")]);
    let mut events = Vec::new();

    manager.update(Duration::ZERO, &mut world, &mut events);
    let minion = manager.active_enemies()[0];
    let _ = world.remove_enemy(minion);
    manager.update(Duration::ZERO, &mut world, &mut events);
    manager.update(Duration::ZERO, &mut world, &mut events);

    assert_eq!(
        events,
        vec![
            Event::WaveStarted { wave: 0 },
            Event::EnemySpawned {
                enemy: minion,
                kind: EnemyKind::Minion,
                wave: 0,
            },
            Event::WaveCleared { wave: 0 },
            Event::WaveStarted { wave: 1 },
            Event::WaveCleared { wave: 1 },
        ]
    );
    assert!(manager.is_complete());
    assert_eq!(manager.current_wave(), None);
    assert_eq!(manager.wave_count(), 2);
}

#[test]
fn manager_without_waves_is_complete() {
    let mut world = world();
    let mut manager = WaveManager::new(Vec::new());
    let mut events = Vec::new();

    manager.update(Duration::from_secs(1), &mut world, &mut events);

    assert!(manager.is_complete());
    assert!(events.is_empty());
}
