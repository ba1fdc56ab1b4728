//! Common geometry and [scalar data types][data types] used when turning
//! glyph outlines into bitmaps.
//!
//! [data types]: https://docs.microsoft.com/en-us/typography/opentype/spec/otff#data-types

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod bbox;
mod fixed;
mod glyph_id;
mod point;
mod rect;


pub use bbox::BoundingBox;
pub use fixed::F2Dot14;
pub use glyph_id::GlyphId;
pub use point::Point;
pub use rect::Rect;
