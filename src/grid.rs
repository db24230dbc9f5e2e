use crate::fixed::Fix;
use anyhow::{Context, Result};

/// One lattice site: the two reagent concentrations, each in [0, UNIT).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) a: Fix,
    pub(crate) b: Fix,
}

/// Contiguous row-major store of w*h cells.
///
/// The store does raw indexing only; toroidal wraparound belongs to the
/// sweep engine.
pub(crate) struct Grid {
    w: usize,
    h: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub(crate) fn new(w: usize, h: usize) -> Result<Self> {
        let n = w * h;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(n)
            .with_context(|| format!("cannot allocate {}x{} grid", w, h))?;
        cells.resize(n, Cell::default());
        Ok(Self { w, h, cells })
    }

    pub(crate) fn dimensions(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    #[inline]
    pub(crate) fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[y * self.w + x]
    }

    #[inline]
    pub(crate) fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[y * self.w + x] = cell;
    }

    pub(crate) fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * self.w..(y + 1) * self.w]
    }

    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_is_row_major() {
        let mut g = Grid::new(4, 3).unwrap();
        let c = Cell {
            a: Fix(7),
            b: Fix(11),
        };
        g.set(2, 1, c);
        assert_eq!(g.get(2, 1), c);
        assert_eq!(g.cells()[1 * 4 + 2], c);
        assert_eq!(g.row(1)[2], c);
        assert_eq!(g.get(0, 0), Cell::default());
    }

    #[test]
    fn dimensions_round_trip() {
        let g = Grid::new(5, 2).unwrap();
        assert_eq!(g.dimensions(), (5, 2));
        assert_eq!(g.cells().len(), 10);
        assert_eq!(g.row(1).len(), 5);
    }
}
