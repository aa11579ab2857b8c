use crate::tile_map::{CellXY, TileMap};

use super::structs::RegionId;

/// Iterative scanline flood fill over a label grid.
///
/// A cell is fillable when it is still unset in the label grid and
/// `passable` accepts its linear index. The frontier stack is kept between fills
/// so labelling a whole map only allocates once per domain.
pub struct FloodFill<P> {
    passable: P,
    stack: Vec<CellXY>,
}

impl<P> FloodFill<P> where P: Fn(usize) -> bool {
    pub fn new(passable: P) -> Self {
        Self {
            passable,
            stack: Vec::new(),
        }
    }

    #[inline]
    fn fillable(&self, labels: &TileMap<RegionId>, x: usize, y: usize) -> bool {
        let idx = y * labels.width() + x;
        labels[idx] == RegionId::UNSET && (self.passable)(idx)
    }

    /// Writes `id` into every cell 4-connected to `seed`, returning the number
    /// of cells written. Returns 0 if the seed itself is not fillable.
    ///
    /// From each popped seed a vertical span is grown, then every row of that
    /// span is grown left and right. Each horizontal run pushes one seed per
    /// fillable run it touches in the rows directly above and below.
    pub fn fill(&mut self, labels: &mut TileMap<RegionId>, seed: CellXY, id: RegionId) -> usize {
        let width = labels.width();
        let height = labels.height();
        let mut filled = 0;

        self.stack.clear();
        self.stack.push(seed);

        while let Some(CellXY { x, y }) = self.stack.pop() {
            if !self.fillable(labels, x, y) {
                continue;
            }

            let mut top = y;
            while top > 0 && self.fillable(labels, x, top - 1) {
                top -= 1;
            }
            let mut bottom = y;
            while bottom + 1 < height && self.fillable(labels, x, bottom + 1) {
                bottom += 1;
            }

            for row in top..=bottom {
                // (x, row) is still unset: this loop only writes whole rows
                let mut left = x;
                while left > 0 && self.fillable(labels, left - 1, row) {
                    left -= 1;
                }
                let mut right = x;
                while right + 1 < width && self.fillable(labels, right + 1, row) {
                    right += 1;
                }

                for cx in left..=right {
                    labels[row * width + cx] = id;
                }
                filled += right - left + 1;

                if row > 0 {
                    self.push_run_seeds(labels, left, right, row - 1);
                }
                if row + 1 < height {
                    self.push_run_seeds(labels, left, right, row + 1);
                }
            }
        }

        filled
    }

    /// Pushes the first cell of each fillable run in `row` overlapping `left..=right`.
    fn push_run_seeds(&mut self, labels: &TileMap<RegionId>, left: usize, right: usize, row: usize) {
        let mut in_run = false;
        for cx in left..=right {
            if self.fillable(labels, cx, row) {
                if !in_run {
                    self.stack.push(CellXY::new(cx, row));
                    in_run = true;
                }
            } else {
                in_run = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> TileMap<bool> {
        let width = rows[0].len();
        let cells = rows.iter().flat_map(|row| row.chars().map(|c| c == '.')).collect();
        TileMap::from_vec(width, rows.len(), cells).unwrap()
    }

    fn fill_at(open: &TileMap<bool>, seed: CellXY) -> (TileMap<RegionId>, usize) {
        let mut labels = TileMap::new(open.width(), open.height(), RegionId::UNSET);
        let mut fill = FloodFill::new(|idx: usize| open[idx]);
        let count = fill.fill(&mut labels, seed, RegionId::from(2));
        (labels, count)
    }

    #[test]
    fn fills_open_rectangle() {
        let open = grid(&["....", "....", "...."]);
        let (labels, count) = fill_at(&open, CellXY::new(1, 1));
        assert_eq!(count, 12);
        assert!(labels.as_slice().iter().all(|id| *id == RegionId::from(2)));
    }

    #[test]
    fn follows_winding_corridor() {
        let open = grid(&[
            ".#...",
            ".#.#.",
            ".#.#.",
            "...#.",
            "####.",
        ]);
        let (labels, count) = fill_at(&open, CellXY::new(0, 0));
        assert_eq!(count, 15);
        assert_eq!(labels[CellXY::new(4, 4)], RegionId::from(2));
        assert_eq!(labels[CellXY::new(1, 0)], RegionId::UNSET);
    }

    #[test]
    fn does_not_cross_diagonals() {
        let open = grid(&[".#", "#."]);
        let (labels, count) = fill_at(&open, CellXY::new(0, 0));
        assert_eq!(count, 1);
        assert_eq!(labels[CellXY::new(1, 1)], RegionId::UNSET);
    }

    #[test]
    fn blocked_seed_fills_nothing() {
        let open = grid(&["#."]);
        let (_, count) = fill_at(&open, CellXY::new(0, 0));
        assert_eq!(count, 0);
    }

    #[test]
    fn labelled_cells_are_not_refilled() {
        let open = grid(&["...", "...", "..."]);
        let mut labels = TileMap::new(3, 3, RegionId::UNSET);
        labels[CellXY::new(1, 1)] = RegionId::SENTINEL;
        let mut fill = FloodFill::new(|idx: usize| open[idx]);
        assert_eq!(fill.fill(&mut labels, CellXY::new(0, 0), RegionId::from(2)), 8);
        assert_eq!(labels[CellXY::new(1, 1)], RegionId::SENTINEL);
    }
}
