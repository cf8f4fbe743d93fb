//! Generic row-major grid for per-cell field data

use serde::{Deserialize, Serialize};

/// Generic 2D grid indexed by `(column, row)`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Grid<T: Clone + Default> {
    pub width: usize,
    pub height: usize,
    data: Vec<T>,
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![T::default(); width * height],
        }
    }

    /// Grid with zero cells, used before the first field synthesis
    pub fn empty() -> Self {
        Self::new(0, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x < self.width && y < self.height {
            Some(&self.data[y * self.width + x])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x < self.width && y < self.height {
            Some(&mut self.data[y * self.width + x])
        } else {
            None
        }
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        if x < self.width && y < self.height {
            self.data[y * self.width + x] = value;
        }
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks(0) panics, so an empty grid yields no rows
        self.data.chunks(self.width.max(1)).take(self.height)
    }

    /// `(x, y, value)` for every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(i, value)| (i % width, i / width, value))
    }

    /// Fill a rectangle of cells, clipped to the grid
    pub fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, value: T) {
        for row in y..(y + height).min(self.height) {
            for col in x..(x + width).min(self.width) {
                self.data[row * self.width + col] = value.clone();
            }
        }
    }
}
