use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use elemental_defence_session::{GameDefinition, LevelDefinition, SessionConfig};
use tracing::debug;

const GAMES_DIR: &str = "games";
const LEVELS_DIR: &str = "levels";
const MAPS_DIR: &str = "maps";
const WAVES_DIR: &str = "waves";

/// Loads `games/<game>.g` and every level, map and wave it references.
pub(crate) fn load_game(root: &Path, game: &str) -> Result<GameDefinition> {
    let path = root.join(GAMES_DIR).join(format!("{game}.g"));
    let contents = read(&path)?;

    let mut levels = Vec::new();
    for name in names(&contents) {
        let level = load_level(root, name)
            .with_context(|| format!("failed to load level '{name}' of game '{game}'"))?;
        levels.push(level);
    }

    let definition = GameDefinition::new(game, levels)
        .with_context(|| format!("failed to load game {}", path.display()))?;
    debug!(game, levels = definition.levels().len(), "game loaded");
    Ok(definition)
}

/// Loads `levels/<name>.lvl`: a map name followed by one wave name per line.
pub(crate) fn load_level(root: &Path, name: &str) -> Result<LevelDefinition> {
    let path = root.join(LEVELS_DIR).join(format!("{name}.lvl"));
    let contents = read(&path)?;
    let mut entries = names(&contents);

    let Some(map) = entries.next() else {
        bail!("level file {} does not name a map", path.display());
    };
    let map_text = read(&root.join(MAPS_DIR).join(format!("{map}.mtp")))?;

    let mut waves = Vec::new();
    for wave in entries {
        let text = read(&root.join(WAVES_DIR).join(format!("{wave}.wve")))?;
        waves.push((format!("{name}/{wave}"), text));
    }

    let level = LevelDefinition::parse(
        name,
        &format!("{name}/{map}"),
        &map_text,
        waves
            .iter()
            .map(|(origin, text)| (origin.as_str(), text.as_str())),
    )?;
    debug!(level = name, map, waves = level.waves().len(), "level loaded");
    Ok(level)
}

/// Reads a session configuration from a TOML file.
pub(crate) fn load_config(path: &Path) -> Result<SessionConfig> {
    let contents = read(path)?;
    let config: SessionConfig = toml::from_str(&contents)
        .with_context(|| format!("failed to parse session config {}", path.display()))?;
    config.validate(&path.display().to_string())?;
    Ok(config)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn names(contents: &str) -> impl Iterator<Item = &str> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use elemental_defence_core::ConfigError;

    fn demo_root() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/resources")
    }

    #[test]
    fn demo_game_loads() {
        let game = load_game(&demo_root(), "default").expect("demo resources are valid");
        assert_eq!(game.name(), "default");
        let names: Vec<&str> = game.levels().iter().map(LevelDefinition::name).collect();
        assert_eq!(names, ["level1", "level2"]);
        assert_eq!(game.levels()[0].waves().len(), 2);
        assert_eq!(game.levels()[1].grid().columns(), 8);
    }

    #[test]
    fn missing_games_report_the_path() {
        let error = load_game(&demo_root(), "missing").unwrap_err();
        assert!(format!("{error:#}").contains("missing.g"));
    }

    #[test]
    fn configuration_errors_keep_their_origin() {
        let root = std::env::temp_dir().join(format!("elemental-defence-{}", std::process::id()));
        for dir in [GAMES_DIR, LEVELS_DIR, MAPS_DIR, WAVES_DIR] {
            fs::create_dir_all(root.join(dir)).expect("create resource dir");
        }
        fs::write(root.join(GAMES_DIR).join("broken.g"), "trial\n").expect("write game");
        fs::write(root.join(LEVELS_DIR).join("trial.lvl"), "arena\nfirst\n")
            .expect("write level");
        fs::write(root.join(MAPS_DIR).join("arena.mtp"), "SRB\n").expect("write map");
        fs::write(root.join(WAVES_DIR).join("first.wve"), "0|Minion\nsoon|Boss\n")
            .expect("write wave");

        let error = load_game(&root, "broken").unwrap_err();
        let config = error
            .chain()
            .find_map(|cause| cause.downcast_ref::<ConfigError>())
            .expect("configuration error in chain");
        assert!(matches!(
            config,
            ConfigError::InvalidSpawnTime { origin, line: 2, .. } if origin == "trial/first"
        ));

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn session_configs_with_unusable_extents_are_rejected() {
        let root = std::env::temp_dir()
            .join(format!("elemental-defence-config-{}", std::process::id()));
        fs::create_dir_all(&root).expect("create config dir");

        let valid = root.join("valid.toml");
        fs::write(&valid, "starting_money = 300\narea_extent = 350.0\n").expect("write config");
        let config = load_config(&valid).expect("valid config");
        assert_eq!(config.starting_money, 300);
        assert_eq!(config.area_extent, 350.0);

        for (name, extent) in [("zero", "0.0"), ("negative", "-700.0"), ("nan", "nan")] {
            let path = root.join(format!("{name}.toml"));
            fs::write(&path, format!("area_extent = {extent}\n")).expect("write config");
            let error = load_config(&path).unwrap_err();
            assert!(
                matches!(
                    error.downcast_ref::<ConfigError>(),
                    Some(ConfigError::InvalidSetting { setting, .. }) if setting == "area_extent"
                ),
                "{name}: {error:#}"
            );
        }

        let _ = fs::remove_dir_all(&root);
    }
}
