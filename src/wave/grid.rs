//! Precomputed dot positions for the halftone wave.

/// Cell budget for one viewport. Larger grids are left empty.
pub const MAX_CELLS: usize = 1 << 20;

/// How dot centers are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridLayout {
    /// One dot in the middle of every cell.
    Square,
    /// Rows offset by half a cell, with a one-cell margin on every side.
    Staggered,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub x: f32,
    pub y: f32,
    /// Offset from the viewport center.
    pub dx: f32,
    pub dy: f32,
    /// Distance from the viewport center over the half-diagonal.
    pub distance: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: f32,
    height: f32,
    cell_size: f32,
    layout: GridLayout,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: f32, height: f32, cell_size: f32, layout: GridLayout) -> Self {
        let mut grid = Self {
            width: 0.0,
            height: 0.0,
            cell_size: cell_size.max(1.0),
            layout,
            cells: Vec::new(),
        };
        grid.rebuild(width, height);
        grid
    }

    /// Recompute every cell for a new viewport size.
    pub fn rebuild(&mut self, width: f32, height: f32) {
        self.width = extent(width);
        self.height = extent(height);
        self.cells.clear();

        let size = self.cell_size;
        let mut cols = (self.width / size).ceil() as usize;
        let mut rows = (self.height / size).ceil() as usize;
        if self.layout == GridLayout::Staggered && cols > 0 && rows > 0 {
            cols = cols.saturating_add(2);
            rows = rows.saturating_add(2);
        }

        let count = match cols.checked_mul(rows) {
            Some(count) if count <= MAX_CELLS => count,
            _ => {
                tracing::warn!(cols, rows, "grid too large, leaving it empty");
                return;
            }
        };

        let (cx, cy) = (self.width / 2.0, self.height / 2.0);
        let max_distance = (cx * cx + cy * cy).sqrt();
        self.cells.reserve(count);

        for row in 0..rows {
            for col in 0..cols {
                let (x, y) = match self.layout {
                    GridLayout::Square => (
                        col as f32 * size + size / 2.0,
                        row as f32 * size + size / 2.0,
                    ),
                    GridLayout::Staggered => (
                        col as f32 * size + (row % 2) as f32 * size / 2.0 - size,
                        row as f32 * size - size,
                    ),
                };
                let (dx, dy) = (x - cx, y - cy);
                self.cells.push(Cell {
                    x,
                    y,
                    dx,
                    dy,
                    distance: normalized_distance(dx, dy, max_distance),
                });
            }
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn layout(&self) -> GridLayout {
        self.layout
    }
}

/// A viewport extent, with negative and non-finite values read as 0.
pub(crate) fn extent(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// `sqrt(dx² + dy²) / max_distance`, or 0 for an empty viewport.
pub fn normalized_distance(dx: f32, dy: f32, max_distance: f32) -> f32 {
    if max_distance <= 0.0 {
        return 0.0;
    }
    (dx * dx + dy * dy).sqrt() / max_distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_cell_has_zero_distance() {
        // 60x60 with 20px cells puts the middle cell's center on the viewport center
        let grid = Grid::new(60.0, 60.0, 20.0, GridLayout::Square);
        assert_eq!(grid.len(), 9);

        let center = grid.cells()[4];
        assert_eq!((center.x, center.y), (30.0, 30.0));
        assert_eq!(center.distance, 0.0);
    }

    #[test]
    fn distances_stay_normalised() {
        let grid = Grid::new(1920.0, 1080.0, 20.0, GridLayout::Square);
        assert_eq!(grid.len(), 96 * 54);
        assert!(grid.cells().iter().all(|c| (0.0..=1.0).contains(&c.distance)));
    }

    #[test]
    fn empty_viewport_has_no_cells() {
        let grid = Grid::new(0.0, 0.0, 20.0, GridLayout::Square);
        assert!(grid.is_empty());
        assert_eq!(normalized_distance(3.0, 4.0, 0.0), 0.0);
    }

    #[test]
    fn staggered_rows_offset_by_half_a_cell() {
        let grid = Grid::new(40.0, 40.0, 20.0, GridLayout::Staggered);
        assert_eq!(grid.len(), 4 * 4);

        let cells = grid.cells();
        assert_eq!((cells[0].x, cells[0].y), (-20.0, -20.0));
        assert_eq!((cells[4].x, cells[4].y), (-10.0, 0.0));
    }

    #[test]
    fn non_finite_viewport_has_no_cells() {
        let mut grid = Grid::new(f32::INFINITY, f32::INFINITY, 20.0, GridLayout::Square);
        assert!(grid.is_empty());
        assert_eq!(grid.size(), (0.0, 0.0));

        grid.rebuild(f32::NAN, 100.0);
        assert!(grid.is_empty());

        let grid = Grid::new(f32::INFINITY, 40.0, 20.0, GridLayout::Staggered);
        assert!(grid.is_empty());
    }

    #[test]
    fn huge_viewport_stays_within_budget() {
        let mut grid = Grid::new(1.0e12, 1.0e12, 20.0, GridLayout::Staggered);
        assert!(grid.is_empty());

        grid.rebuild(100.0, 100.0);
        assert_eq!(grid.len(), 7 * 7);
    }

    #[test]
    fn rebuild_uses_new_dimensions() {
        let mut grid = Grid::new(100.0, 100.0, 20.0, GridLayout::Square);
        grid.rebuild(200.0, 40.0);
        assert_eq!(grid.size(), (200.0, 40.0));
        assert_eq!(grid.len(), 10 * 2);
    }
}
