//! Helpers for testing with the shared outline fixtures.

use raster_test_data::{ComponentData, CompoundGlyph, GlyphData, SimpleGlyph, GLYPHS};
use raster_types::{BoundingBox, F2Dot14, GlyphId};

use crate::outline::{
    Component, CompoundOutline, GlyphOutline, OutlinePoint, SimpleOutline, Transform,
};

/// Returns every fixture glyph, indexed by glyph id.
pub fn glyphs() -> Vec<Option<GlyphOutline>> {
    GLYPHS.iter().map(outline).collect()
}

/// Converts a fixture to an outline. Empty glyphs have no outline.
pub fn outline(data: &GlyphData) -> Option<GlyphOutline> {
    match data {
        GlyphData::Empty => None,
        GlyphData::Simple(simple) => Some(simple_outline(simple).into()),
        GlyphData::Compound(compound) => Some(compound_outline(compound).into()),
    }
}

fn bounds([x_min, y_min, x_max, y_max]: [i16; 4]) -> BoundingBox<i16> {
    BoundingBox::new(x_min, y_min, x_max, y_max)
}

fn simple_outline(glyph: &SimpleGlyph) -> SimpleOutline {
    let points = glyph
        .points
        .iter()
        .map(|(x, y, on_curve)| OutlinePoint {
            x: *x,
            y: *y,
            on_curve: *on_curve,
        })
        .collect::<Vec<_>>();
    SimpleOutline::new(bounds(glyph.bounds), points, glyph.contour_ends)
}

fn compound_outline(glyph: &CompoundGlyph) -> CompoundOutline {
    let components = glyph
        .components
        .iter()
        .map(component)
        .collect::<Vec<_>>();
    CompoundOutline::new(bounds(glyph.bounds), components)
}

fn component(data: &ComponentData) -> Component {
    let [xx, xy, yx, yy] = data.transform.map(F2Dot14::from_f32);
    Component {
        glyph_id: GlyphId::new(data.glyph_id),
        arg1: data.arg1 as i32,
        arg2: data.arg2 as i32,
        args_are_xy_values: data.args_are_xy_values,
        transform: Transform { xx, yx, xy, yy },
    }
}
