//! Exhaustive enumeration of simple spawn-to-base paths.

use elemental_defence_core::{CellCoord, TileKind};

/// Neighbour offsets in search order: up, right, down, left.
const NEIGHBOURS: [(i64, i64); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Outcome of enumerating every simple path from the spawn to a base tile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct PathSearch {
    /// First complete path discovered in search order.
    pub(crate) first: Option<Vec<CellCoord>>,
    /// Number of distinct simple paths discovered.
    pub(crate) count: usize,
}

/// Partial candidate path together with the cells it already contains.
#[derive(Clone, Debug)]
struct Branch {
    cells: Vec<CellCoord>,
    visited: Vec<bool>,
}

/// Enumerates every simple path that leaves `spawn` and ends on a base tile.
///
/// The search only steps onto road and base tiles. Each branch carries its
/// own visited set, so sibling branches may reuse cells while a single branch
/// never revisits one. A branch ends as soon as it reaches a base.
pub(crate) fn enumerate_paths<F>(
    columns: u32,
    rows: u32,
    spawn: CellCoord,
    kind_at: F,
) -> PathSearch
where
    F: Fn(CellCoord) -> Option<TileKind>,
{
    let mut search = PathSearch::default();
    let Some(spawn_index) = index(columns, rows, spawn) else {
        return search;
    };
    let cell_count = usize::try_from(u64::from(columns) * u64::from(rows)).unwrap_or(0);

    let mut visited = vec![false; cell_count];
    visited[spawn_index] = true;
    let mut stack = vec![Branch {
        cells: vec![spawn],
        visited,
    }];

    while let Some(branch) = stack.pop() {
        let Some(&head) = branch.cells.last() else {
            continue;
        };

        if kind_at(head) == Some(TileKind::Base) {
            search.count += 1;
            if search.first.is_none() {
                search.first = Some(branch.cells);
            }
            continue;
        }

        // Reversed so the first neighbour in search order is explored first.
        for (dx, dy) in NEIGHBOURS.iter().rev() {
            let Some(next) = offset(head, *dx, *dy) else {
                continue;
            };
            let Some(next_index) = index(columns, rows, next) else {
                continue;
            };
            if branch.visited[next_index] {
                continue;
            }
            if !kind_at(next).is_some_and(TileKind::accepts_path_step) {
                continue;
            }

            let mut extended = branch.clone();
            extended.cells.push(next);
            extended.visited[next_index] = true;
            stack.push(extended);
        }
    }

    search
}

fn offset(cell: CellCoord, dx: i64, dy: i64) -> Option<CellCoord> {
    let column = u32::try_from(i64::from(cell.column()) + dx).ok()?;
    let row = u32::try_from(i64::from(cell.row()) + dy).ok()?;
    Some(CellCoord::new(column, row))
}

fn index(columns: u32, rows: u32, cell: CellCoord) -> Option<usize> {
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

    fn search(rows: &[&str]) -> PathSearch {
        let tiles: Vec<Vec<TileKind>> = rows
            .iter()
            .map(|row| row.chars().filter_map(TileKind::from_symbol).collect())
            .collect();
        let columns = tiles[0].len() as u32;
        let height = tiles.len() as u32;
        let spawn = tiles
            .iter()
            .enumerate()
            .find_map(|(y, row)| {
                row.iter()
                    .position(|kind| *kind == TileKind::Spawn)
                    .map(|x| CellCoord::new(x as u32, y as u32))
            })
            .expect("spawn present");
        enumerate_paths(columns, height, spawn, |cell| {
            tiles
                .get(cell.row() as usize)
                .and_then(|row| row.get(cell.column() as usize))
                .copied()
        })
    }

    #[test]
    fn straight_corridor_has_one_path() {
        let result = search(&["SRB"]);
        assert_eq!(result.count, 1);
        assert_eq!(
            result.first,
            Some(vec![
                CellCoord::new(0, 0),
                CellCoord::new(1, 0),
                CellCoord::new(2, 0),
            ])
        );
    }

    #[test]
    fn loop_around_an_island_yields_two_paths() {
        let result = search(&["RRR", "SXB", "RRR"]);
        assert_eq!(result.count, 2);
    }

    #[test]
    fn open_road_block_counts_every_simple_path() {
        // Two rows of road give four simple routes from S to B.
        let result = search(&["SRB", "RRR"]);
        assert_eq!(result.count, 4);
    }

    #[test]
    fn branches_stop_at_the_base() {
        let result = search(&["SBR"]);
        assert_eq!(result.count, 1);
        assert_eq!(result.first.map(|cells| cells.len()), Some(2));
    }

    #[test]
    fn disconnected_base_has_no_path() {
        let result = search(&["SRCB"]);
        assert_eq!(result.count, 0);
        assert!(result.first.is_none());
    }

    #[test]
    fn first_path_follows_up_right_down_left_order() {
        let result = search(&["RRB", "SXR", "RRR"]);
        assert_eq!(result.count, 2);
        let first = result.first.expect("path");
        assert_eq!(first[1], CellCoord::new(0, 0));
    }
}
