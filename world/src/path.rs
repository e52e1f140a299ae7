//! Arc-length traversal along the resolved spawn-to-base corridor.

use elemental_defence_core::{CellCoord, GridPoint};

/// Ordered, cell-centred waypoints leading from the spawn to the base.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    cells: Vec<CellCoord>,
    waypoints: Vec<GridPoint>,
    total_length: f64,
}

impl Path {
    /// Builds a path through the centres of the provided cells.
    #[must_use]
    pub fn from_cells(cells: Vec<CellCoord>) -> Self {
        let waypoints: Vec<GridPoint> = cells.iter().map(|cell| cell.center()).collect();
        let total_length = waypoints
            .windows(2)
            .map(|segment| segment[0].distance(segment[1]))
            .sum();
        Self {
            cells,
            waypoints,
            total_length,
        }
    }

    /// Cells visited by the path, spawn first and base last.
    #[must_use]
    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    /// Waypoints in grid units, spawn first and base last.
    #[must_use]
    pub fn waypoints(&self) -> &[GridPoint] {
        &self.waypoints
    }

    /// Sum of all segment lengths in grid units.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Position reached after travelling `distance` units from the spawn.
    ///
    /// The walk restarts from the first waypoint on every call. Distances at
    /// or beyond the total length pin to the final waypoint.
    #[must_use]
    pub fn position_at(&self, distance: f64) -> GridPoint {
        let Some(&first) = self.waypoints.first() else {
            return GridPoint::default();
        };

        let mut accumulated = 0.0;
        for segment in self.waypoints.windows(2) {
            let (start, end) = (segment[0], segment[1]);
            let length = start.distance(end);
            if accumulated + length >= distance {
                if length <= 0.0 {
                    return end;
                }
                let fraction = ((distance - accumulated) / length).max(0.0);
                return start.lerp(end, fraction);
            }
            accumulated += length;
        }

        self.waypoints.last().copied().unwrap_or(first)
    }

    /// Reports whether `distance` covers the whole path.
    #[must_use]
    pub fn is_complete_at(&self, distance: f64) -> bool {
        distance >= self.total_length
    }
}
