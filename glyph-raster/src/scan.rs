//! Scanline fill of flattened contours.
//!
//! Each row of the coverage grid is sampled once. Every contour edge that
//! crosses the row contributes a crossing, and a left to right sweep over
//! the sorted crossings decides which samples are inside.
//!
//! Fill is decided with two counters rather than a single winding number.
//! Clockwise contours add ink and counter-clockwise contours remove it: a
//! sample is inside when it is within at least one clockwise contour and
//! within no counter-clockwise one.

use raster_types::Point;

use crate::{contour::Contour, coverage::CoverageGrid};

/// Darkening applied to small sizes, in pixels.
const STEM_DARKENING_MAX: f32 = 0.10;
/// Sizes at or below this ppem receive full darkening.
const STEM_DARKENING_FULL_PPEM: f32 = 10.0;
/// Sizes at or above this ppem receive no darkening.
const STEM_DARKENING_NONE_PPEM: f32 = 36.0;

/// Returns the distance in pixels that each edge is pushed outward to
/// thicken thin stems at the given size.
pub fn stem_darkening_amount(ppem: f32) -> f32 {
    if ppem <= STEM_DARKENING_FULL_PPEM {
        STEM_DARKENING_MAX
    } else if ppem >= STEM_DARKENING_NONE_PPEM {
        0.0
    } else {
        let t = (ppem - STEM_DARKENING_FULL_PPEM)
            / (STEM_DARKENING_NONE_PPEM - STEM_DARKENING_FULL_PPEM);
        STEM_DARKENING_MAX + (0.0 - STEM_DARKENING_MAX) * t
    }
}

#[derive(Copy, Clone, Debug)]
struct Crossing {
    x: f32,
    clockwise: bool,
    going_down: bool,
}

/// Fills `grid` with the inside/outside state of every sample.
///
/// `origin` is subtracted from every contour point so that it maps to the
/// bottom left corner of the grid. The subpixel offset moves the samples
/// instead of the outline. All values are in grid units.
pub fn rasterize(
    contours: &[Contour],
    origin: Point<f32>,
    subpixel_offset: Point<f32>,
    stem_darkening: f32,
    grid: &mut CoverageGrid,
) {
    let clockwise = contours
        .iter()
        .map(Contour::is_clockwise)
        .collect::<Vec<_>>();
    let mut crossings = Vec::new();
    for y in 0..grid.height() {
        let sample_y = y as f32 - subpixel_offset.y;
        crossings.clear();
        for (contour, clockwise) in contours.iter().zip(&clockwise) {
            for (p1, p2) in contour.edges() {
                if let Some(crossing) =
                    edge_crossing(p1 - origin, p2 - origin, sample_y, *clockwise, stem_darkening)
                {
                    crossings.push(crossing);
                }
            }
        }
        crossings.sort_by(|a, b| a.x.total_cmp(&b.x));
        fill_row(&crossings, subpixel_offset.x, grid.row_mut(y));
    }
}

fn edge_crossing(
    p1: Point<f32>,
    p2: Point<f32>,
    sample_y: f32,
    clockwise: bool,
    stem_darkening: f32,
) -> Option<Crossing> {
    // Half open so that a vertex shared by two edges is counted once.
    if (p1.y < sample_y && p2.y < sample_y) || (p1.y >= sample_y && p2.y >= sample_y) {
        return None;
    }
    let height = (p2.y - p1.y).abs();
    if height == 0.0 {
        return None;
    }
    let going_down = p2.y < p1.y;
    let (lower, upper) = if going_down { (p2, p1) } else { (p1, p2) };
    let t = (sample_y - lower.y) / height;
    let x = lower.x + (upper.x - lower.x) * t;
    // Upward edges are left sides of clockwise ink and downward edges are
    // right sides, so this pushes every edge away from the filled area.
    let x = if going_down {
        x + stem_darkening
    } else {
        x - stem_darkening
    };
    Some(Crossing {
        x,
        clockwise,
        going_down,
    })
}

fn fill_row(crossings: &[Crossing], offset_x: f32, row: &mut [bool]) {
    let mut crossings = crossings.iter().peekable();
    let mut fill_count = 0i32;
    let mut no_fill_count = 0i32;
    let mut inside = false;
    for (x, sample) in row.iter_mut().enumerate() {
        let sample_x = x as f32 - offset_x;
        while let Some(crossing) = crossings.next_if(|c| c.x <= sample_x) {
            match (crossing.clockwise, crossing.going_down) {
                (true, true) => fill_count -= 1,
                (true, false) => fill_count += 1,
                (false, true) => no_fill_count += 1,
                (false, false) => no_fill_count -= 1,
            }
            inside = no_fill_count == 0 && fill_count > 0;
        }
        *sample = inside;
    }
}
