//! Test data shared between the rasterizer crates.
//!
//! Outlines are stored the way a TrueType parser would hand them over:
//! points in font design units with an on-curve flag, contour end point
//! indices and a bounding box. This crate intentionally has no
//! dependencies so that any crate in the workspace can use it from tests
//! without creating dependency cycles.
//!
//! The glyphs are collected in [`GLYPHS`] where the slice index is the
//! glyph id. Each fixture also has a named constant with its id.

/// Outline of a simple glyph.
#[derive(Copy, Clone, Debug)]
pub struct SimpleGlyph {
    /// x_min, y_min, x_max, y_max in design units.
    pub bounds: [i16; 4],
    /// (x, y, on_curve)
    pub points: &'static [(i16, i16, bool)],
    pub contour_ends: &'static [u16],
}

/// A single component of a compound glyph.
#[derive(Copy, Clone, Debug)]
pub struct ComponentData {
    pub glyph_id: u16,
    pub arg1: i16,
    pub arg2: i16,
    pub args_are_xy_values: bool,
    /// xx, xy, yx, yy
    pub transform: [f32; 4],
}

/// Outline of a compound glyph.
#[derive(Copy, Clone, Debug)]
pub struct CompoundGlyph {
    pub bounds: [i16; 4],
    pub components: &'static [ComponentData],
}

#[derive(Copy, Clone, Debug)]
pub enum GlyphData {
    /// Glyph without an outline, such as a space.
    Empty,
    Simple(SimpleGlyph),
    Compound(CompoundGlyph),
}

pub const UNITS_PER_EM: u16 = 1000;

pub const EMPTY_GID: u16 = 0;
pub const SQUARE_GID: u16 = 1;
pub const RING_GID: u16 = 2;
pub const ROUND_GID: u16 = 3;
pub const OFF_CURVE_RUN_GID: u16 = 4;
pub const SHIFTED_SQUARE_GID: u16 = 5;
pub const NESTED_COMPOUND_GID: u16 = 6;
pub const POINT_MATCHED_GID: u16 = 7;
pub const CYCLIC_COMPOUND_GID: u16 = 8;
pub const MISSING_COMPONENT_GID: u16 = 9;

const IDENTITY: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// A 48x48 square wound clockwise (in the y-up font coordinate system).
pub const SQUARE: SimpleGlyph = SimpleGlyph {
    bounds: [0, 0, 48, 48],
    points: &[(0, 0, true), (0, 48, true), (48, 48, true), (48, 0, true)],
    contour_ends: &[3],
};

/// The 48x48 square with a counter-clockwise 16x16 hole in the middle,
/// the same topology as the letter "O".
pub const RING: SimpleGlyph = SimpleGlyph {
    bounds: [0, 0, 48, 48],
    points: &[
        // outer, clockwise
        (0, 0, true),
        (0, 48, true),
        (48, 48, true),
        (48, 0, true),
        // inner, counter-clockwise
        (16, 16, true),
        (32, 16, true),
        (32, 32, true),
        (16, 32, true),
    ],
    contour_ends: &[3, 7],
};

/// A circle of radius 50 made of four quadratic curves. The contour
/// starts with an off-curve point.
pub const ROUND: SimpleGlyph = SimpleGlyph {
    bounds: [0, 0, 100, 100],
    points: &[
        (0, 100, false),
        (50, 100, true),
        (100, 100, false),
        (100, 50, true),
        (100, 0, false),
        (50, 0, true),
        (0, 0, false),
        (0, 50, true),
    ],
    contour_ends: &[7],
};

/// A rounded shape with two runs of consecutive off-curve points. The
/// implied on-curve points are (50, 100) and (50, 0).
pub const OFF_CURVE_RUN: SimpleGlyph = SimpleGlyph {
    bounds: [0, 0, 100, 100],
    points: &[
        (0, 50, true),
        (0, 100, false),
        (100, 100, false),
        (100, 50, true),
        (100, 0, false),
        (0, 0, false),
    ],
    contour_ends: &[5],
};

/// The square moved by (10, -5).
pub const SHIFTED_SQUARE: CompoundGlyph = CompoundGlyph {
    bounds: [10, -5, 58, 43],
    components: &[ComponentData {
        glyph_id: SQUARE_GID,
        arg1: 10,
        arg2: -5,
        args_are_xy_values: true,
        transform: IDENTITY,
    }],
};

/// The shifted square moved again by (5, 5), next to a half size ring.
pub const NESTED_COMPOUND: CompoundGlyph = CompoundGlyph {
    bounds: [15, 0, 124, 48],
    components: &[
        ComponentData {
            glyph_id: SHIFTED_SQUARE_GID,
            arg1: 5,
            arg2: 5,
            args_are_xy_values: true,
            transform: IDENTITY,
        },
        ComponentData {
            glyph_id: RING_GID,
            arg1: 100,
            arg2: 0,
            args_are_xy_values: true,
            transform: [0.5, 0.0, 0.0, 0.5],
        },
    ],
};

/// A component positioned by matching points rather than an offset.
pub const POINT_MATCHED: CompoundGlyph = CompoundGlyph {
    bounds: [0, 0, 48, 48],
    components: &[ComponentData {
        glyph_id: SQUARE_GID,
        arg1: 0,
        arg2: 3,
        args_are_xy_values: false,
        transform: IDENTITY,
    }],
};

/// A malformed compound glyph that references itself.
pub const CYCLIC_COMPOUND: CompoundGlyph = CompoundGlyph {
    bounds: [0, 0, 48, 48],
    components: &[ComponentData {
        glyph_id: CYCLIC_COMPOUND_GID,
        arg1: 1,
        arg2: 1,
        args_are_xy_values: true,
        transform: IDENTITY,
    }],
};

/// A compound glyph referencing a glyph id past the end of the table.
pub const MISSING_COMPONENT: CompoundGlyph = CompoundGlyph {
    bounds: [0, 0, 48, 48],
    components: &[ComponentData {
        glyph_id: 99,
        arg1: 0,
        arg2: 0,
        args_are_xy_values: true,
        transform: IDENTITY,
    }],
};

/// All fixtures, indexed by glyph id.
pub static GLYPHS: &[GlyphData] = &[
    GlyphData::Empty,
    GlyphData::Simple(SQUARE),
    GlyphData::Simple(RING),
    GlyphData::Simple(ROUND),
    GlyphData::Simple(OFF_CURVE_RUN),
    GlyphData::Compound(SHIFTED_SQUARE),
    GlyphData::Compound(NESTED_COMPOUND),
    GlyphData::Compound(POINT_MATCHED),
    GlyphData::Compound(CYCLIC_COMPOUND),
    GlyphData::Compound(MISSING_COMPONENT),
];
