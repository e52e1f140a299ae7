//! Tile grid parsing and validation.

use std::sync::Arc;

use elemental_defence_core::{CellCoord, ConfigError, TileKind, TowerId};
use tracing::debug;

use crate::{path::Path, pathfinding};

/// Single square of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    kind: TileKind,
    cell: CellCoord,
    tower: Option<TowerId>,
}

impl Tile {
    /// Kind of the tile.
    #[must_use]
    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    /// Location of the tile.
    #[must_use]
    pub const fn cell(&self) -> CellCoord {
        self.cell
    }

    /// Tower standing on the tile, if any.
    #[must_use]
    pub const fn tower(&self) -> Option<TowerId> {
        self.tower
    }
}

/// Validated rectangular map with a unique spawn-to-base path.
#[derive(Clone, Debug)]
pub struct Grid {
    columns: u32,
    rows: u32,
    tiles: Vec<Tile>,
    spawn: CellCoord,
    base: CellCoord,
    path: Arc<Path>,
}

impl Grid {
    /// Parses newline separated map text. See [`Grid::from_rows`].
    pub fn parse(origin: &str, text: &str) -> Result<Self, ConfigError> {
        let rows: Vec<&str> = text.lines().collect();
        Self::from_rows(origin, &rows)
    }

    /// Builds a grid from rows of tile symbols.
    ///
    /// Checks run in a fixed order and the first failure wins: empty input,
    /// ragged rows, unknown symbols, spawn and base counts, and finally the
    /// path, which must exist and be unique.
    pub fn from_rows<S: AsRef<str>>(origin: &str, rows: &[S]) -> Result<Self, ConfigError> {
        let Some(first) = rows.first() else {
            return Err(ConfigError::EmptyMap {
                origin: origin.to_owned(),
            });
        };

        let width = first.as_ref().chars().count();
        for (index, row) in rows.iter().enumerate().skip(1) {
            let found = row.as_ref().chars().count();
            if found != width {
                return Err(ConfigError::RaggedRow {
                    origin: origin.to_owned(),
                    line: index + 1,
                    expected: width,
                    found,
                });
            }
        }

        let columns = dimension(width);
        let height = dimension(rows.len());
        let mut tiles = Vec::with_capacity(width * rows.len());
        let mut spawns = Vec::new();
        let mut bases = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            for (x, symbol) in row.as_ref().chars().enumerate() {
                let Some(kind) = TileKind::from_symbol(symbol) else {
                    return Err(ConfigError::UnknownTile {
                        origin: origin.to_owned(),
                        symbol,
                        x,
                        y,
                    });
                };
                let cell = CellCoord::new(dimension(x), dimension(y));
                match kind {
                    TileKind::Spawn => spawns.push(cell),
                    TileKind::Base => bases.push(cell),
                    _ => {}
                }
                tiles.push(Tile {
                    kind,
                    cell,
                    tower: None,
                });
            }
        }

        let spawn = match spawns.as_slice() {
            [] => {
                return Err(ConfigError::MissingSpawn {
                    origin: origin.to_owned(),
                })
            }
            [single] => *single,
            many => {
                return Err(ConfigError::MultipleSpawns {
                    origin: origin.to_owned(),
                    count: many.len(),
                })
            }
        };
        let base = match bases.as_slice() {
            [] => {
                return Err(ConfigError::MissingBase {
                    origin: origin.to_owned(),
                })
            }
            [single] => *single,
            many => {
                return Err(ConfigError::MultipleBases {
                    origin: origin.to_owned(),
                    count: many.len(),
                })
            }
        };

        let search = pathfinding::enumerate_paths(columns, height, spawn, |cell| {
            tile_index(columns, height, cell)
                .and_then(|index| tiles.get(index))
                .map(Tile::kind)
        });
        let cells = match (search.count, search.first) {
            (1, Some(cells)) => cells,
            (0, _) | (_, None) => {
                return Err(ConfigError::NoPath {
                    origin: origin.to_owned(),
                })
            }
            (count, Some(_)) => {
                return Err(ConfigError::AmbiguousPath {
                    origin: origin.to_owned(),
                    count,
                })
            }
        };

        let path = Path::from_cells(cells);
        debug!(
            origin,
            columns,
            rows = height,
            waypoints = path.waypoints().len(),
            length = path.total_length(),
            "resolved map path"
        );

        Ok(Self {
            columns,
            rows: height,
            tiles,
            spawn,
            base,
            path: Arc::new(path),
        })
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Location of the spawn tile.
    #[must_use]
    pub const fn spawn(&self) -> CellCoord {
        self.spawn
    }

    /// Location of the base tile.
    #[must_use]
    pub const fn base(&self) -> CellCoord {
        self.base
    }

    /// Shared path from spawn to base.
    #[must_use]
    pub fn path(&self) -> &Arc<Path> {
        &self.path
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Tile at the provided cell, if it lies inside the grid.
    #[must_use]
    pub fn tile(&self, cell: CellCoord) -> Option<&Tile> {
        tile_index(self.columns, self.rows, cell).and_then(|index| self.tiles.get(index))
    }

    /// Iterates over all tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Records or clears the tower standing on `cell`.
    pub(crate) fn set_tower(&mut self, cell: CellCoord, tower: Option<TowerId>) {
        if let Some(tile) =
            tile_index(self.columns, self.rows, cell).and_then(|index| self.tiles.get_mut(index))
        {
            tile.tower = tower;
        }
    }
}

fn dimension(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn tile_index(columns: u32, rows: u32, cell: CellCoord) -> Option<usize> {
    if cell.column() >= columns || cell.row() >= rows {
        return None;
    }
    let width = usize::try_from(columns).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    let column = usize::try_from(cell.column()).ok()?;
    Some(row * width + column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use elemental_defence_core::GridPoint;

    const ORIGIN: &str = "level1/map1";

    #[test]
    fn straight_corridor_resolves_cell_centred_path() {
        let grid = Grid::from_rows(ORIGIN, &["SRB"]).expect("valid map");
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.rows(), 1);
        assert_eq!(
            grid.path().waypoints(),
            &[
                GridPoint::new(0.5, 0.5),
                GridPoint::new(1.5, 0.5),
                GridPoint::new(2.5, 0.5),
            ]
        );
        assert_eq!(grid.path().total_length(), 2.0);
        assert_eq!(grid.spawn(), CellCoord::new(0, 0));
        assert_eq!(grid.base(), CellCoord::new(2, 0));
    }

    #[test]
    fn winding_corridor_is_followed_in_order() {
        let grid = Grid::parse(ORIGIN, "SRRC\nXCRC\nBRRC\n").expect("valid map");
        let cells: Vec<_> = grid
            .path()
            .cells()
            .iter()
            .map(|cell| (cell.column(), cell.row()))
            .collect();
        assert_eq!(
            cells,
            vec![(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 2), (0, 2)]
        );
    }

    #[test]
    fn empty_map_is_rejected() {
        let rows: [&str; 0] = [];
        assert_eq!(
            Grid::from_rows(ORIGIN, &rows).unwrap_err(),
            ConfigError::EmptyMap {
                origin: ORIGIN.to_owned(),
            }
        );
    }

    #[test]
    fn ragged_row_is_reported_by_line() {
        let error = Grid::from_rows(ORIGIN, &["SRB", "CC", "Q"]).unwrap_err();
        assert_eq!(
            error,
            ConfigError::RaggedRow {
                origin: ORIGIN.to_owned(),
                line: 2,
                expected: 3,
                found: 2,
            }
        );
    }

    #[test]
    fn unknown_symbol_is_reported_by_position() {
        let error = Grid::from_rows(ORIGIN, &["SRB", "CQC"]).unwrap_err();
        assert_eq!(
            error,
            ConfigError::UnknownTile {
                origin: ORIGIN.to_owned(),
                symbol: 'Q',
                x: 1,
                y: 1,
            }
        );
    }

    #[test]
    fn spawn_and_base_counts_are_enforced_in_order() {
        assert!(matches!(
            Grid::from_rows(ORIGIN, &["CRB"]),
            Err(ConfigError::MissingSpawn { .. })
        ));
        assert!(matches!(
            Grid::from_rows(ORIGIN, &["SRS"]),
            Err(ConfigError::MultipleSpawns { count: 2, .. })
        ));
        assert!(matches!(
            Grid::from_rows(ORIGIN, &["SRC"]),
            Err(ConfigError::MissingBase { .. })
        ));
        assert!(matches!(
            Grid::from_rows(ORIGIN, &["BSB"]),
            Err(ConfigError::MultipleBases { count: 2, .. })
        ));
        assert!(matches!(
            Grid::from_rows(ORIGIN, &["SSBB"]),
            Err(ConfigError::MultipleSpawns { .. })
        ));
    }

    #[test]
    fn unreachable_base_is_rejected() {
        assert_eq!(
            Grid::from_rows(ORIGIN, &["SRCRB"]).unwrap_err(),
            ConfigError::NoPath {
                origin: ORIGIN.to_owned(),
            }
        );
    }

    #[test]
    fn parallel_corridors_are_rejected() {
        assert_eq!(
            Grid::from_rows(ORIGIN, &["RRR", "SXB", "RRR"]).unwrap_err(),
            ConfigError::AmbiguousPath {
                origin: ORIGIN.to_owned(),
                count: 2,
            }
        );
    }

    #[test]
    fn tiles_start_without_towers() {
        let grid = Grid::from_rows(ORIGIN, &["SRB", "CCX"]).expect("valid map");
        assert!(grid.tiles().all(|tile| tile.tower().is_none()));
        let tile = grid.tile(CellCoord::new(1, 1)).expect("in bounds");
        assert_eq!(tile.kind(), TileKind::Constructible);
        assert!(grid.tile(CellCoord::new(3, 0)).is_none());
    }
}
