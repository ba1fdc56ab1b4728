//! Box filter from supersampled coverage to alpha.

use crate::{bitmap::GlyphBitmap, coverage::CoverageGrid, gamma::GammaTable};

/// Averages each `supersamples × supersamples` block of `grid` into one
/// alpha pixel and applies `gamma`.
///
/// Samples in a partial block at the right or top edge are dropped.
/// A `supersamples` of zero is treated as one.
pub fn downsample(grid: &CoverageGrid, supersamples: u32, gamma: &GammaTable) -> GlyphBitmap {
    let supersamples = supersamples.max(1);
    let width = grid.width() / supersamples;
    let height = grid.height() / supersamples;
    let contribution = 1.0 / (supersamples * supersamples) as f32;
    let mut data = vec![0u8; width as usize * height as usize];
    let mut counts = vec![0u32; width as usize];
    for (y, out_row) in data.chunks_exact_mut(width.max(1) as usize).enumerate() {
        counts.fill(0);
        let first = y as u32 * supersamples;
        for sample_y in first..first + supersamples {
            let row = grid.row(sample_y);
            for (count, block) in counts.iter_mut().zip(row.chunks_exact(supersamples as usize)) {
                *count += block.iter().filter(|inside| **inside).count() as u32;
            }
        }
        for (alpha, count) in out_row.iter_mut().zip(&counts) {
            let coverage = *count as f32 * contribution;
            *alpha = gamma.apply((coverage * 255.0).round() as u8);
        }
    }
    GlyphBitmap::from_parts(data, width, height)
}
