//! Supersampled coverage buffers and a pool to recycle them.

use std::ops::{Deref, DerefMut};

/// Grid of inside/outside samples at supersampled resolution.
///
/// Row 0 is the bottom row, matching the y-up coordinates of the outline.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct CoverageGrid {
    samples: Vec<bool>,
    width: u32,
    height: u32,
}

impl CoverageGrid {
    /// Creates a new grid with every sample cleared.
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_buffer(Vec::new(), width, height)
    }

    /// Reuses `buffer` for a grid of the given size. The previous contents
    /// are discarded.
    pub fn from_buffer(mut buffer: Vec<bool>, width: u32, height: u32) -> Self {
        buffer.clear();
        buffer.resize(width as usize * height as usize, false);
        Self {
            samples: buffer,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the sample at `(x, y)`, or false when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.samples[self.index(x, y)]
    }

    /// Sets the sample at `(x, y)`. Out of bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, inside: bool) {
        if x < self.width && y < self.height {
            let ix = self.index(x, y);
            self.samples[ix] = inside;
        }
    }

    /// Returns the samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y` is out of bounds.
    pub fn row(&self, y: u32) -> &[bool] {
        let start = self.index(0, y);
        &self.samples[start..start + self.width as usize]
    }

    /// Returns the samples of row `y` for writing.
    ///
    /// # Panics
    ///
    /// Panics if `y` is out of bounds.
    pub fn row_mut(&mut self, y: u32) -> &mut [bool] {
        let start = self.index(0, y);
        let width = self.width as usize;
        &mut self.samples[start..start + width]
    }

    /// Number of samples that are inside the outline.
    pub fn count_inside(&self) -> usize {
        self.samples.iter().filter(|inside| **inside).count()
    }

    /// Returns the backing buffer.
    pub fn into_buffer(self) -> Vec<bool> {
        self.samples
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Recycles coverage buffers between renders.
///
/// A grid taken with [`acquire`](Self::acquire) goes back to the pool when
/// its guard is dropped, including on early return.
#[derive(Default, Debug)]
pub struct ScratchPool {
    buffers: Vec<Vec<bool>>,
}

impl ScratchPool {
    /// Buffers kept around for reuse.
    const MAX_BUFFERS: usize = 4;

    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a cleared grid of the given size.
    pub fn acquire(&mut self, width: u32, height: u32) -> PooledGrid<'_> {
        let buffer = self.buffers.pop().unwrap_or_default();
        PooledGrid {
            grid: CoverageGrid::from_buffer(buffer, width, height),
            pool: self,
        }
    }

    /// Number of buffers waiting to be reused.
    pub fn available(&self) -> usize {
        self.buffers.len()
    }

    fn release(&mut self, buffer: Vec<bool>) {
        if self.buffers.len() < Self::MAX_BUFFERS {
            self.buffers.push(buffer);
        }
    }
}

/// Grid borrowed from a [`ScratchPool`].
pub struct PooledGrid<'a> {
    grid: CoverageGrid,
    pool: &'a mut ScratchPool,
}

impl Deref for PooledGrid<'_> {
    type Target = CoverageGrid;

    fn deref(&self) -> &Self::Target {
        &self.grid
    }
}

impl DerefMut for PooledGrid<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.grid
    }
}

impl Drop for PooledGrid<'_> {
    fn drop(&mut self) {
        let buffer = std::mem::take(&mut self.grid.samples);
        self.pool.release(buffer);
    }
}
