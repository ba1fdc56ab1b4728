//! Error types for the glyph cache.

use glyph_raster::RasterError;

/// Errors that may occur when caching a glyph.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum AtlasError {
    /// The glyph could not be rendered.
    #[error(transparent)]
    Raster(#[from] RasterError),
    /// The rendered glyph is larger than the biggest allowed atlas page.
    #[error("Glyph bitmap of {width}x{height} pixels does not fit in an atlas page of {max}x{max}")]
    GlyphTooLarge { width: u32, height: u32, max: u32 },
    /// Every page is full and no more may be created.
    #[error("All {0} atlas pages are full")]
    OutOfPages(usize),
    /// A thread panicked while holding the cache lock.
    #[error("Glyph cache lock was poisoned")]
    Poisoned,
}
