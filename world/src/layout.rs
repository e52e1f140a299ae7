//! Conversion between grid units and rendered world units.

use elemental_defence_core::{CellCoord, GridPoint, WorldPoint};

/// Affine transform that centres a grid inside a square play area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    square: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Layout {
    /// Fits a grid of `columns` by `rows` tiles into a square area of side `extent`.
    ///
    /// Tiles stay square: their side is the smaller of the per-axis fits, and
    /// the grid is centred on `(extent / 2, extent / 2)`.
    #[must_use]
    pub fn fit(extent: f64, columns: u32, rows: u32) -> Self {
        let columns = f64::from(columns.max(1));
        let rows = f64::from(rows.max(1));
        let square = (extent / columns).min(extent / rows);
        let center = extent / 2.0;
        Self {
            square,
            offset_x: center - columns * square / 2.0,
            offset_y: center - rows * square / 2.0,
        }
    }

    /// Side length of one tile in world units.
    #[must_use]
    pub const fn square(&self) -> f64 {
        self.square
    }

    /// World position of the grid's top-left corner.
    #[must_use]
    pub const fn origin(&self) -> WorldPoint {
        WorldPoint::new(self.offset_x, self.offset_y)
    }

    /// Converts a grid-space point into world units.
    #[must_use]
    pub fn grid_to_world(&self, point: GridPoint) -> WorldPoint {
        WorldPoint::new(
            self.offset_x + point.x() * self.square,
            self.offset_y + point.y() * self.square,
        )
    }

    /// Converts a world-space point into grid units.
    #[must_use]
    pub fn world_to_grid(&self, point: WorldPoint) -> GridPoint {
        if self.square <= 0.0 {
            return GridPoint::default();
        }
        GridPoint::new(
            (point.x() - self.offset_x) / self.square,
            (point.y() - self.offset_y) / self.square,
        )
    }

    /// World position of a cell's centre.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> WorldPoint {
        self.grid_to_world(cell.center())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_grid_is_centred_vertically() {
        let layout = Layout::fit(700.0, 10, 5);
        assert_eq!(layout.square(), 70.0);
        assert_eq!(layout.origin(), WorldPoint::new(0.0, 175.0));
        assert_eq!(
            layout.cell_center(CellCoord::new(0, 0)),
            WorldPoint::new(35.0, 210.0)
        );
    }

    #[test]
    fn tall_grid_is_centred_horizontally() {
        let layout = Layout::fit(700.0, 2, 7);
        assert_eq!(layout.square(), 100.0);
        assert_eq!(layout.origin(), WorldPoint::new(250.0, 0.0));
    }

    #[test]
    fn conversions_invert_each_other() {
        let layout = Layout::fit(700.0, 3, 1);
        let cell = CellCoord::new(2, 0);
        let world = layout.cell_center(cell);
        let grid = layout.world_to_grid(world);
        assert!(grid.distance(cell.center()) < 1e-9);
    }
}
