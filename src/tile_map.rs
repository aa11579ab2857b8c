use std::ops::{Index, IndexMut};

use itertools::iproduct;

use crate::error::AccessibilityError;

/// A cell coordinate on the analysis grid.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellXY {
    pub x: usize,
    pub y: usize,
}

impl CellXY {
    #[inline]
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Offsets this coordinate, returning `None` if it would go negative.
    /// Upper bounds are checked by the grid.
    #[inline]
    pub fn checked_offset(self, dx: isize, dy: isize) -> Option<CellXY> {
        Some(CellXY {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl From<(usize, usize)> for CellXY {
    fn from((x, y): (usize, usize)) -> Self {
        CellXY::new(x, y)
    }
}

/// Row-major grid of per-cell values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> TileMap<T> where T: Clone {
    #[inline]
    pub fn new(width: usize, height: usize, default: T) -> TileMap<T> {
        TileMap {
            width,
            height,
            data: vec![default; width * height],
        }
    }
}

impl<T> TileMap<T> {
    /// Wraps row-major cell data. The length must be exactly `width * height`
    /// and neither dimension may be zero.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<TileMap<T>, AccessibilityError> {
        if width == 0 || height == 0 {
            return Err(AccessibilityError::EmptyGrid);
        }
        if width.checked_mul(height) != Some(data.len()) {
            return Err(AccessibilityError::DimensionMismatch {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(TileMap { width, height, data })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells in the grid.
    #[inline]
    pub fn area(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn contains(&self, xy: CellXY) -> bool {
        xy.x < self.width && xy.y < self.height
    }

    #[inline]
    pub fn xy_to_linear_index(&self, xy: CellXY) -> usize {
        xy.y * self.width + xy.x
    }

    #[inline]
    pub fn linear_index_to_xy(&self, idx: usize) -> CellXY {
        CellXY::new(idx % self.width, idx / self.width)
    }

    #[inline]
    pub fn get(&self, xy: CellXY) -> Option<&T> {
        if self.contains(xy) {
            Some(&self.data[self.xy_to_linear_index(xy)])
        } else {
            None
        }
    }

    /// All coordinates in row-major order.
    #[inline]
    pub fn all_xy(&self) -> impl Iterator<Item = CellXY> {
        iproduct!(0..self.height, 0..self.width).map(|(y, x)| CellXY::new(x, y))
    }

    /// Raw row-major cell values.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> TileMap<U> {
        TileMap {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T> Index<usize> for TileMap<T> {
    type Output = T;
    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for TileMap<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

impl<T> Index<CellXY> for TileMap<T> {
    type Output = T;
    fn index(&self, index: CellXY) -> &T {
        debug_assert!(self.contains(index), "{index:?} is outside {}x{}", self.width, self.height);
        &self.data[self.xy_to_linear_index(index)]
    }
}

impl<T> IndexMut<CellXY> for TileMap<T> {
    fn index_mut(&mut self, index: CellXY) -> &mut T {
        debug_assert!(self.contains(index), "{index:?} is outside {}x{}", self.width, self.height);
        let idx = self.xy_to_linear_index(index);
        &mut self.data[idx]
    }
}
