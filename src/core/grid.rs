//! Fixed-size rectangular boards.
//!
//! `Grid<T>` stores cells row-major in an `im::Vector`, so cloning a board is
//! O(1) and every clone is an independent value. Engines hand out clones as
//! snapshots without any risk of the snapshot changing under the renderer.
//!
//! Coordinates are signed: callers compute candidate positions freely
//! (a snake head stepping off the board, a piece cell above the top row) and
//! ask the grid whether they are in bounds.

use im::Vector;
use serde::{Deserialize, Serialize};

/// A cell coordinate: `x` is the column, `y` is the row (0 = top).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise sum, used for stepping by a velocity.
    #[must_use]
    pub const fn offset(self, delta: Pos) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
        }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Fixed-size board. Dimensions never change after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T: Clone> {
    width: usize,
    height: usize,
    cells: Vector<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a board with every cell set to `fill`.
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        assert!(width > 0 && height > 0, "Grid must have at least one cell");

        Self {
            width,
            height,
            cells: std::iter::repeat(fill).take(width * height).collect(),
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Grids always have at least one cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check whether a coordinate lies on the board.
    #[must_use]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.width + pos.x as usize)
    }

    /// Cell at `pos`, or `None` when off the board.
    #[must_use]
    pub fn get(&self, pos: Pos) -> Option<&T> {
        self.index(pos).and_then(|i| self.cells.get(i))
    }

    /// Overwrite the cell at `pos`.
    ///
    /// Returns false (and changes nothing) when `pos` is off the board.
    pub fn set(&mut self, pos: Pos, value: T) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.cells.set(i, value);
                true
            }
            None => false,
        }
    }

    /// Iterate over the cells of one row, left to right.
    pub fn row(&self, y: usize) -> impl Iterator<Item = &T> + '_ {
        self.cells.iter().skip(y * self.width).take(self.width)
    }

    /// Iterate over `(Pos, &T)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &T)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Pos::new((i % width) as i32, (i / width) as i32), cell))
    }

    /// Remove every row whose cells all satisfy `is_full`, shift the rows
    /// above down, and insert that many rows of `empty` at the top.
    ///
    /// Returns the number of rows removed. Height is unchanged.
    pub fn collapse_rows(&mut self, mut is_full: impl FnMut(&T) -> bool, empty: T) -> usize {
        let width = self.width;
        let mut kept = Vector::new();
        let mut removed = 0;

        for y in 0..self.height {
            let row = self.cells.skip(y * width).take(width);
            if row.iter().all(&mut is_full) {
                removed += 1;
            } else {
                kept.append(row);
            }
        }

        if removed > 0 {
            let mut cells: Vector<T> = std::iter::repeat(empty).take(removed * width).collect();
            cells.append(kept);
            self.cells = cells;
        }

        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let grid = Grid::new(4, 3, 0u8);

        assert!(grid.in_bounds(Pos::new(0, 0)));
        assert!(grid.in_bounds(Pos::new(3, 2)));
        assert!(!grid.in_bounds(Pos::new(4, 0)));
        assert!(!grid.in_bounds(Pos::new(0, 3)));
        assert!(!grid.in_bounds(Pos::new(-1, 0)));
        assert!(!grid.in_bounds(Pos::new(0, -1)));
        assert_eq!(grid.len(), 12);
    }

    #[test]
    fn test_get_set() {
        let mut grid = Grid::new(4, 3, 0u8);

        assert!(grid.set(Pos::new(2, 1), 7));
        assert_eq!(grid.get(Pos::new(2, 1)), Some(&7));
        assert_eq!(grid.get(Pos::new(1, 2)), Some(&0));

        assert!(!grid.set(Pos::new(5, 5), 9));
        assert_eq!(grid.get(Pos::new(5, 5)), None);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut grid = Grid::new(3, 3, false);
        let snapshot = grid.clone();

        grid.set(Pos::new(1, 1), true);

        assert_eq!(snapshot.get(Pos::new(1, 1)), Some(&false));
        assert_eq!(grid.get(Pos::new(1, 1)), Some(&true));
    }

    #[test]
    fn test_collapse_rows() {
        let mut grid = Grid::new(3, 4, 0u8);
        // Row 1 marker, rows 2 and 3 full
        grid.set(Pos::new(0, 1), 5);
        for x in 0..3 {
            grid.set(Pos::new(x, 2), 1);
            grid.set(Pos::new(x, 3), 1);
        }

        let removed = grid.collapse_rows(|&c| c != 0, 0);

        assert_eq!(removed, 2);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.get(Pos::new(0, 3)), Some(&5)); // Marker shifted down two rows
        assert!(grid.row(0).all(|&c| c == 0));
        assert!(grid.row(1).all(|&c| c == 0));
    }

    #[test]
    fn test_collapse_rows_none_full() {
        let mut grid = Grid::new(3, 2, 0u8);
        grid.set(Pos::new(1, 1), 1);
        let before = grid.clone();

        assert_eq!(grid.collapse_rows(|&c| c != 0, 0), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_iter_coordinates() {
        let grid = Grid::new(2, 2, 'a');
        let coords: Vec<_> = grid.iter().map(|(p, _)| p).collect();

        assert_eq!(
            coords,
            vec![Pos::new(0, 0), Pos::new(1, 0), Pos::new(0, 1), Pos::new(1, 1)]
        );
    }
}
