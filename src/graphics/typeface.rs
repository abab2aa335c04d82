use std::fmt;
use std::fs;
use std::path::Path;

use ab_glyph::{Font, FontVec, GlyphId, PxScale, ScaleFont, point};
use image::{Rgba, RgbaImage};

use crate::error::{CardError, FontLoadError, Result};
use crate::graphics::glyphs;

/// Face used for index labels and glyph icons.
pub enum Typeface {
    /// Built-in 5×7 bitmap face.
    Bitmap,
    /// A TrueType/OpenType outline font.
    Outline(FontVec),
}

impl Typeface {
    /// Load the font at `path`, or fall back to the bitmap face when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Typeface::Bitmap);
        };
        let font_error = |source: FontLoadError| CardError::Font {
            path: path.to_path_buf(),
            source,
        };
        let data = fs::read(path).map_err(|err| font_error(err.into()))?;
        let font = FontVec::try_from_vec(data).map_err(|err| font_error(err.into()))?;
        Ok(Typeface::Outline(font))
    }

    /// Rasterise `text` at `size` pixels per em onto a transparent stamp.
    ///
    /// Outline stamps span the full ascent-to-descent box so labels of
    /// different heights share a baseline when centred. Text the outline font
    /// cannot cover falls back to the bitmap face.
    pub fn render(&self, text: &str, size: f32, color: Rgba<u8>) -> RgbaImage {
        match self {
            Typeface::Outline(font) if covers(font, text) => {
                render_outline(font, text, size, color)
            }
            Typeface::Outline(_) | Typeface::Bitmap => glyphs::render_bitmap(text, size, color),
        }
    }
}

impl fmt::Debug for Typeface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Typeface::Bitmap => f.write_str("Bitmap"),
            Typeface::Outline(_) => f.write_str("Outline(..)"),
        }
    }
}

fn covers(font: &FontVec, text: &str) -> bool {
    text.chars()
        .all(|ch| ch.is_whitespace() || font.glyph_id(ch) != GlyphId(0))
}

fn render_outline(font: &FontVec, text: &str, size: f32, color: Rgba<u8>) -> RgbaImage {
    let scale = PxScale::from(size);
    let scaled = font.as_scaled(scale);
    let ascent = scaled.ascent();

    let mut caret = 0.0f32;
    let mut previous: Option<GlyphId> = None;
    let mut placed = Vec::new();
    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }
        placed.push(id.with_scale_and_position(scale, point(caret, ascent)));
        caret += scaled.h_advance(id);
        previous = Some(id);
    }

    let width = caret.ceil().max(1.0) as u32;
    let height = (ascent - scaled.descent()).ceil().max(1.0) as u32;
    let mut stamp = RgbaImage::new(width, height);
    for glyph in placed {
        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            let x = bounds.min.x as i32 + gx as i32;
            let y = bounds.min.y as i32 + gy as i32;
            if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                return;
            }
            let alpha = (coverage.clamp(0.0, 1.0) * color[3] as f32).round() as u8;
            let pixel = stamp.get_pixel_mut(x as u32, y as u32);
            if alpha > pixel[3] {
                *pixel = Rgba([color[0], color[1], color[2], alpha]);
            }
        });
    }
    stamp
}
