use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context, Result};
use elemental_defence_core::{CellCoord, Command, TowerKind};
use serde::Deserialize;

/// Tower purchases scheduled for a headless run.
#[derive(Debug, Default)]
pub(crate) struct TowerPlan {
    pending: Vec<PlannedTower>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanManifest {
    #[serde(default)]
    towers: Vec<PlanEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanEntry {
    kind: String,
    column: u32,
    row: u32,
    #[serde(default)]
    level: usize,
    #[serde(default)]
    at: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PlannedTower {
    kind: TowerKind,
    cell: CellCoord,
    level: usize,
    at: Duration,
}

impl TowerPlan {
    /// Reads and validates a plan from a TOML file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read tower plan {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse tower plan {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        let manifest: PlanManifest = toml::from_str(contents)?;
        let mut pending = Vec::with_capacity(manifest.towers.len());
        for (index, entry) in manifest.towers.into_iter().enumerate() {
            let Some(kind) = TowerKind::from_name(entry.kind.trim()) else {
                bail!("tower {} has unknown kind '{}'", index + 1, entry.kind);
            };
            let Ok(at) = Duration::try_from_secs_f64(entry.at) else {
                bail!("tower {} has invalid time {}", index + 1, entry.at);
            };
            pending.push(PlannedTower {
                kind,
                cell: CellCoord::new(entry.column, entry.row),
                level: entry.level,
                at,
            });
        }
        // Stable sort keeps file order among purchases due at the same moment.
        pending.sort_by_key(|tower| (tower.level, tower.at));
        Ok(Self { pending })
    }

    /// Removes and returns the placements due on `level` once `elapsed`
    /// seconds of that level have been simulated.
    pub(crate) fn due(&mut self, level: usize, elapsed: Duration) -> Vec<Command> {
        let mut due = Vec::new();
        self.pending.retain(|tower| {
            if tower.level == level && tower.at <= elapsed {
                due.push(Command::PlaceTower {
                    kind: tower.kind,
                    cell: tower.cell,
                });
                false
            } else {
                true
            }
        });
        due
    }
}
