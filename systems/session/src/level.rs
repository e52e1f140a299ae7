use elemental_defence_core::ConfigError;
use elemental_defence_system_waves::{parse_wave, Wave};
use elemental_defence_world::Grid;

/// Validated map and waves of one level.
#[derive(Clone, Debug)]
pub struct LevelDefinition {
    name: String,
    grid: Grid,
    waves: Vec<Wave>,
}

impl LevelDefinition {
    /// Bundles an already validated grid with its waves.
    #[must_use]
    pub fn new(name: impl Into<String>, grid: Grid, waves: Vec<Wave>) -> Self {
        Self {
            name: name.into(),
            grid,
            waves,
        }
    }

    /// Parses map text and each wave text, failing on the first error.
    pub fn parse<'a, I>(
        name: impl Into<String>,
        map_origin: &str,
        map_text: &str,
        waves: I,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let grid = Grid::parse(map_origin, map_text)?;
        let waves = waves
            .into_iter()
            .map(|(origin, text)| parse_wave(origin, text).map(Wave::new))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(name, grid, waves))
    }

    /// Name of the level.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validated grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Waves in execution order.
    #[must_use]
    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }
}

/// Ordered list of levels making up one game.
#[derive(Clone, Debug)]
pub struct GameDefinition {
    name: String,
    levels: Vec<LevelDefinition>,
}

impl GameDefinition {
    /// Creates a game, rejecting an empty level list.
    pub fn new(name: impl Into<String>, levels: Vec<LevelDefinition>) -> Result<Self, ConfigError> {
        let name = name.into();
        if levels.is_empty() {
            return Err(ConfigError::EmptyGame { origin: name });
        }
        Ok(Self { name, levels })
    }

    /// Name of the game.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Level the game opens with.
    #[must_use]
    pub fn first_level(&self) -> &LevelDefinition {
        // Construction rejects empty level lists.
        &self.levels[0]
    }

    /// Levels in play order.
    #[must_use]
    pub fn levels(&self) -> &[LevelDefinition] {
        &self.levels
    }
}
