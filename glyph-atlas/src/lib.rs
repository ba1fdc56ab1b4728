//! Texture atlas packing and a shared cache of rendered glyphs.
//!
//! A [`GlyphCache`] owns the outlines of one font. It renders a glyph with
//! [`glyph_raster`] the first time it is requested at a given subpixel
//! position and packs the resulting bitmap into single channel
//! [atlas pages](AtlasPage). Later requests return the same
//! [`CachedGlyph`] location.
//!
//! ```
//! use glyph_atlas::{GlyphCache, GlyphCacheConfig};
//! use glyph_raster::{GlyphOutline, OutlinePoint, PointSize, SimpleOutline};
//! use raster_types::GlyphId;
//!
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
//! let bounds = square.bounds();
//! // glyph 0 has no outline
//! let glyphs = vec![None, Some(square)];
//! let cache = GlyphCache::new(glyphs, GlyphCacheConfig::new(PointSize::new(12.0), 1000));
//!
//! let placement = cache.placement(0, 0, &bounds);
//! let cached = cache
//!     .get_or_render(GlyphId::new(1), placement.subpixel)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!((cached.region.width, cached.region.height), (9, 9));
//! assert_eq!(cache.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod allocator;
mod cache;
mod config;
mod error;
mod page;
mod subpixel;

pub use allocator::AtlasAllocator;
pub use cache::{CachedGlyph, GlyphCache};
pub use config::GlyphCacheConfig;
pub use error::AtlasError;
pub use page::AtlasPage;
pub use subpixel::{GlyphPlacement, SubpixelBuckets, SubpixelKey};
