//! Toroidal grid plumbing shared by the forager simulation grids.
//!
//! Every grid in the simulation (pheromone fields, food buckets) maps a
//! continuous 2D plane onto a fixed array of cells with wrap-around edges.
//! The wrap math lives here, in one pure type, so field indexing and agent
//! movement cannot drift apart.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors emitted when constructing spatial structures.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Indicates configuration values that cannot be used (e.g., non-positive cell size).
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

/// Uniform toroidal grid over a continuous rectangle.
///
/// Cell counts are derived by flooring the world extents, so the last
/// partial cell of a non-divisible extent is simply absorbed by the wrap.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GridGeometry {
    cols: usize,
    rows: usize,
    cell_size: f32,
}

impl GridGeometry {
    /// Derive a grid from continuous world extents and a cell edge length.
    pub fn new(world_width: f32, world_height: f32, cell_size: f32) -> Result<Self, IndexError> {
        if !(cell_size > 0.0) || !cell_size.is_finite() {
            return Err(IndexError::InvalidConfig("cell_size must be positive"));
        }
        if !world_width.is_finite() || !world_height.is_finite() {
            return Err(IndexError::InvalidConfig("world extents must be finite"));
        }
        let cols = (world_width / cell_size).floor() as usize;
        let rows = (world_height / cell_size).floor() as usize;
        if cols == 0 || rows == 0 {
            return Err(IndexError::InvalidConfig(
                "world extents must hold at least one cell per axis",
            ));
        }
        Ok(Self {
            cols,
            rows,
            cell_size,
        })
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Edge length of one cell in world units.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Total number of cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.cols * self.rows
    }

    /// Returns true for a degenerate grid; construction forbids this.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wrap a signed cell coordinate into `[0, extent)`.
    #[inline]
    #[must_use]
    pub fn wrap_cell(coord: i64, extent: usize) -> usize {
        let extent = extent as i64;
        coord.rem_euclid(extent) as usize
    }

    /// Map a continuous point to its (wrapped) cell coordinates.
    #[must_use]
    pub fn cell_of(&self, x: f32, y: f32) -> (usize, usize) {
        let col = (x / self.cell_size).floor() as i64;
        let row = (y / self.cell_size).floor() as i64;
        (
            Self::wrap_cell(col, self.cols),
            Self::wrap_cell(row, self.rows),
        )
    }

    /// Row-major flat index for signed cell coordinates, wrapping both axes.
    #[inline]
    #[must_use]
    pub fn index_of(&self, col: i64, row: i64) -> usize {
        let col = Self::wrap_cell(col, self.cols);
        let row = Self::wrap_cell(row, self.rows);
        row * self.cols + col
    }

    /// World-space center of a cell, without wrapping.
    ///
    /// Callers steering toward a neighboring cell want the unwrapped
    /// position so the direction vector stays meaningful across an edge.
    #[must_use]
    pub fn cell_center(&self, col: i64, row: i64) -> (f32, f32) {
        (
            (col as f32 + 0.5) * self.cell_size,
            (row as f32 + 0.5) * self.cell_size,
        )
    }

    /// Wrap a continuous point into `[0, world_extent)` on both axes.
    #[must_use]
    pub fn wrap_point(&self, x: f32, y: f32) -> (f32, f32) {
        let width = self.cols as f32 * self.cell_size;
        let height = self.rows as f32 * self.cell_size;
        (x.rem_euclid(width), y.rem_euclid(height))
    }
}

/// Item storable in an [`ObjectGrid`].
pub trait GridItem {
    /// World position used for bucketing.
    fn position(&self) -> (f32, f32);
}

/// Uniform grid bucketing point-like items by cell.
///
/// Buckets have a hard capacity: inserting into a full bucket is rejected
/// rather than growing unbounded, which keeps the 3x3 neighborhood query
/// cost bounded under high density.
#[derive(Debug, Clone)]
pub struct ObjectGrid<T> {
    geometry: GridGeometry,
    max_per_cell: usize,
    buckets: Vec<Vec<T>>,
    len: usize,
}

impl<T: GridItem> ObjectGrid<T> {
    /// Build an empty grid over the given extents.
    pub fn new(
        world_width: f32,
        world_height: f32,
        cell_size: f32,
        max_per_cell: usize,
    ) -> Result<Self, IndexError> {
        if max_per_cell == 0 {
            return Err(IndexError::InvalidConfig("max_per_cell must be non-zero"));
        }
        let geometry = GridGeometry::new(world_width, world_height, cell_size)?;
        let buckets = (0..geometry.len()).map(|_| Vec::new()).collect();
        Ok(Self {
            geometry,
            max_per_cell,
            buckets,
            len: 0,
        })
    }

    /// Underlying geometry.
    #[must_use]
    pub const fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Number of stored items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true when no items are stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert an item, bucketing by its position.
    ///
    /// Returns `false` (and drops the item) when the target bucket is at
    /// capacity. This is a capacity signal, not a fault.
    pub fn insert(&mut self, item: T) -> bool {
        let (x, y) = item.position();
        let (col, row) = self.geometry.cell_of(x, y);
        let bucket = &mut self.buckets[row * self.geometry.cols() + col];
        if bucket.len() >= self.max_per_cell {
            return false;
        }
        bucket.push(item);
        self.len += 1;
        true
    }

    /// Visit every item in the 3x3 block of cells centered on `(x, y)`.
    ///
    /// This fixed-radius block is the only supported neighborhood query;
    /// callers needing a different reach choose `cell_size` accordingly.
    pub fn neighbors(&self, x: f32, y: f32, mut visitor: impl FnMut(&T)) {
        let (col, row) = self.geometry.cell_of(x, y);
        for row_offset in -1..=1i64 {
            for col_offset in -1..=1i64 {
                let index = self
                    .geometry
                    .index_of(col as i64 + col_offset, row as i64 + row_offset);
                for item in &self.buckets[index] {
                    visitor(item);
                }
            }
        }
    }

    /// Find the first item in the 3x3 block around `(x, y)` matching `pred`.
    pub fn find_neighbor_mut(
        &mut self,
        x: f32,
        y: f32,
        mut pred: impl FnMut(&T) -> bool,
    ) -> Option<&mut T> {
        let (col, row) = self.geometry.cell_of(x, y);
        let mut found: Option<usize> = None;
        'search: for row_offset in -1..=1i64 {
            for col_offset in -1..=1i64 {
                let index = self
                    .geometry
                    .index_of(col as i64 + col_offset, row as i64 + row_offset);
                if self.buckets[index].iter().any(&mut pred) {
                    found = Some(index);
                    break 'search;
                }
            }
        }
        let index = found?;
        self.buckets[index].iter_mut().find(|item| pred(&**item))
    }

    /// Remove and return every item matching `pred`, sweeping all buckets.
    pub fn drain_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> Vec<T> {
        let mut removed = Vec::new();
        for bucket in &mut self.buckets {
            let mut index = 0;
            while index < bucket.len() {
                if pred(&bucket[index]) {
                    removed.push(bucket.swap_remove(index));
                } else {
                    index += 1;
                }
            }
        }
        self.len -= removed.len();
        removed
    }

    /// Iterate over all stored items in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buckets.iter().flatten()
    }

    /// Remove every stored item.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }
}
