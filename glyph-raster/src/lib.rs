//! Rasterizer for TrueType glyph outlines.
//!
//! This crate turns quadratic outlines, as decoded from a `glyf` table,
//! into anti-aliased alpha bitmaps. The pipeline is:
//!
//! 1. [contour generation](contour::generate_contours): contours of on and
//!    off-curve points (and compound glyphs built from other glyphs) become
//!    closed polylines, with curves [flattened](flatten) to a tolerance.
//! 2. [scanline fill](scan::rasterize): each row of a supersampled
//!    [coverage grid](CoverageGrid) is filled using the contour
//!    orientation, with optional stem darkening and subpixel offset.
//! 3. [downsampling](downsample()): each block of samples is
//!    averaged to one alpha value and passed through a
//!    [gamma table](GammaTable).
//!
//! The [`render_glyph`] function runs the whole pipeline.
//!
//! # Example
//!
//! ```
//! use glyph_raster::{
//!     render_glyph, GlyphOutline, OutlinePoint, PointSize, RenderSettings, SimpleOutline,
//! };
//!
//! // a 500 unit square in a 1000 unit em
//! let square: GlyphOutline = SimpleOutline::from_points(
//!     [
//!         OutlinePoint::on(0, 0),
//!         OutlinePoint::on(0, 500),
//!         OutlinePoint::on(500, 500),
//!         OutlinePoint::on(500, 0),
//!     ],
//!     [3],
//! )
//! .into();
//! // 12pt is 16 pixels per em, so the square covers 8x8 pixels
//! let settings = RenderSettings::new(PointSize::new(12.0), 1000);
//! let bitmap = render_glyph(&square, &(), &settings).unwrap();
//! assert_eq!((bitmap.width(), bitmap.height()), (9, 9));
//! assert_eq!(bitmap.get(4, 4), Some(255));
//! ```

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod contour;
pub mod flatten;
pub mod pen;
pub mod scan;

mod bitmap;
mod coverage;
mod decycler;
mod downsample;
mod error;
mod gamma;
mod outline;
mod render;
mod size;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Public re-export of the raster-types crate.
pub extern crate raster_types as types;

pub use bitmap::GlyphBitmap;
pub use contour::{generate_contours, Contour};
pub use coverage::{CoverageGrid, PooledGrid, ScratchPool};
pub use downsample::downsample;
pub use error::RasterError;
pub use flatten::{flatten_quad, flatten_quad_into};
pub use gamma::GammaTable;
pub use outline::{
    Component, CompoundOutline, GlyphOutline, OutlinePoint, OutlineSource, SimpleOutline,
    Transform,
};
pub use render::{render_glyph, GlyphRenderer, RenderOptions, RenderSettings};
pub use scan::{rasterize, stem_darkening_amount};
pub use size::PointSize;
