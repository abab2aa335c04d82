//! Raster primitives used by the card renderer.

mod canvas;
mod glyphs;
mod typeface;

pub use canvas::Canvas;
pub use typeface::Typeface;
