//! End to end rendering of small synthetic outlines.

use glyph_raster::{
    render_glyph, types::GlyphId, Component, CompoundOutline, GammaTable, GlyphBitmap,
    GlyphOutline, GlyphRenderer, OutlinePoint, RenderOptions, RenderSettings, SimpleOutline,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 48x48 square wound clockwise.
fn square() -> GlyphOutline {
    SimpleOutline::from_points(
        [
            OutlinePoint::on(0, 0),
            OutlinePoint::on(0, 48),
            OutlinePoint::on(48, 48),
            OutlinePoint::on(48, 0),
        ],
        [3],
    )
    .into()
}

/// The square with a counter-clockwise 16x16 hole in the middle.
fn ring() -> GlyphOutline {
    SimpleOutline::from_points(
        [
            OutlinePoint::on(0, 0),
            OutlinePoint::on(0, 48),
            OutlinePoint::on(48, 48),
            OutlinePoint::on(48, 0),
            OutlinePoint::on(16, 16),
            OutlinePoint::on(32, 16),
            OutlinePoint::on(32, 32),
            OutlinePoint::on(16, 32),
        ],
        [3, 7],
    )
    .into()
}

fn unit_scale() -> RenderSettings {
    RenderSettings::from_scale(1.0, 48.0)
}

fn render(outline: &GlyphOutline, settings: &RenderSettings) -> GlyphBitmap {
    init_logging();
    render_glyph(outline, &(), settings).unwrap()
}

#[test]
fn square_golden() {
    let bitmap = render(&square(), &unit_scale());
    assert_eq!((bitmap.width(), bitmap.height()), (49, 49));
    for y in 1..=47 {
        for x in 0..=47 {
            assert_eq!(bitmap.get(x, y), Some(255), "pixel ({x}, {y})");
        }
        assert_eq!(bitmap.get(48, y), Some(0), "pixel (48, {y})");
    }
    // partial coverage only along the bottom and top edges: the bottom row
    // has 3 of 4 sample rows inside and the top row 1 of 4
    assert!(bitmap.row(0).unwrap()[..48].iter().all(|a| *a == 191));
    assert!(bitmap.row(48).unwrap()[..48].iter().all(|a| *a == 64));
    assert_eq!(bitmap.get(48, 0), Some(0));
    assert_eq!(bitmap.get(48, 48), Some(0));
}

#[test]
fn ring_has_a_hole() {
    let bitmap = render(&ring(), &unit_scale());
    for y in 17..=31 {
        for x in 16..=31 {
            assert_eq!(bitmap.get(x, y), Some(0), "pixel ({x}, {y})");
        }
    }
    assert_eq!(bitmap.get(8, 24), Some(255));
    assert_eq!(bitmap.get(40, 24), Some(255));
    assert_eq!(bitmap.get(24, 8), Some(255));
    assert_eq!(bitmap.get(24, 40), Some(255));
    // partial rows where the hole edges fall between samples
    assert_eq!(bitmap.get(24, 16), Some(64));
    assert_eq!(bitmap.get(24, 32), Some(191));
}

#[test]
fn compound_matches_component() {
    let shifted: GlyphOutline = CompoundOutline::new(
        glyph_raster::types::BoundingBox::new(10, -5, 58, 43),
        [Component::offset(GlyphId::new(1), 10, -5)],
    )
    .into();
    let glyphs = vec![None, Some(square())];
    init_logging();
    let bitmap = render_glyph(&shifted, &glyphs, &unit_scale()).unwrap();
    assert_eq!(bitmap, render(&square(), &unit_scale()));
}

#[test]
fn deterministic() {
    let settings = RenderSettings::from_scale(0.37, 17.76)
        .subpixel_offset(0.3, 0.6)
        .options(RenderOptions::new().stem_darkening(true).gamma_correction(true));
    let first = render(&ring(), &settings);
    let second = render(&ring(), &settings);
    assert_eq!(first.data(), second.data());
    // a renderer reused across calls produces the same output
    let mut renderer = GlyphRenderer::new();
    for _ in 0..3 {
        let bitmap = renderer.render(&ring(), &(), &settings).unwrap();
        assert_eq!(bitmap, first);
    }
}

#[test]
fn size_stays_within_bounds() {
    let outline = ring();
    for scale in [0.1, 0.33, 0.5, 1.0, 1.7] {
        for offset in [0.0, 0.25, 0.5, 0.99] {
            let settings = RenderSettings::from_scale(scale, 48.0 * scale).subpixel_offset(offset, offset);
            let bitmap = render(&outline, &settings);
            let expected = 48.0 * scale + offset;
            for size in [bitmap.width(), bitmap.height()] {
                assert!(size > 0);
                let size = size as f32;
                assert!(
                    size >= expected && size <= expected + 2.0,
                    "size {size} for scale {scale} offset {offset}"
                );
            }
        }
    }
}

#[test]
fn subpixel_offset_splits_edge_pixels() {
    let settings = unit_scale().subpixel_offset(0.5, 0.0);
    let bitmap = render(&square(), &settings);
    assert_eq!(bitmap.width(), 50);
    assert_eq!(bitmap.get(0, 24), Some(128));
    assert_eq!(bitmap.get(1, 24), Some(255));
    assert_eq!(bitmap.get(47, 24), Some(255));
    assert_eq!(bitmap.get(48, 24), Some(128));
    assert_eq!(bitmap.get(49, 24), Some(0));
}

#[test]
fn stem_darkening_adds_ink() {
    let settings = RenderSettings::from_scale(1.0, 8.0);
    let plain = render(&square(), &settings);
    let dark = render(
        &square(),
        &settings.options(RenderOptions::new().stem_darkening(true)),
    );
    // 0.1px becomes 0.4 samples: the right edge moves into the next sample
    assert_eq!(plain.get(48, 24), Some(0));
    assert_eq!(dark.get(48, 24), Some(64));
    let ink = |bitmap: &GlyphBitmap| bitmap.data().iter().map(|a| *a as u32).sum::<u32>();
    assert!(ink(&dark) > ink(&plain));
}

#[test]
fn gamma_correction_brightens_edges() {
    let settings = unit_scale().options(RenderOptions::new().gamma_correction(true));
    let bitmap = render(&square(), &settings);
    let gamma = GammaTable::new(1.2).unwrap();
    assert_eq!(bitmap.get(10, 0), Some(gamma.apply(191)));
    assert_eq!(bitmap.get(10, 10), Some(255));
}
