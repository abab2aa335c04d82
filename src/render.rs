//! Card face rendering: background, mirrored corner indices, then pips.

use std::io::Cursor;
use std::path::PathBuf;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use log::debug;

use crate::color::Color;
use crate::config::{DeckConfig, IconSource, Pip, PipKind, PipPosition, Suit};
use crate::error::{CardError, Result};
use crate::graphics::{Canvas, Typeface};
use crate::grid::{LayoutGrid, Point};
use crate::rank::Rank;

/// A suit or pip icon rasterised once and reused for every draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    image: RgbaImage,
    /// Glyph stamps keep their aspect ratio; raster assets are stretched.
    keep_aspect: bool,
}

impl Icon {
    /// Stretch a raster asset into whatever box it is drawn in.
    pub fn raster(image: RgbaImage) -> Self {
        Self {
            image,
            keep_aspect: false,
        }
    }

    /// A glyph stamp, letterboxed into its box.
    pub fn glyph(image: RgbaImage) -> Self {
        Self {
            image,
            keep_aspect: true,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    fn draw(&self, canvas: &mut Canvas, x: f32, y: f32, width: f32, height: f32) {
        if !self.keep_aspect {
            canvas.draw_image(&self.image, x, y, width, height);
            return;
        }
        let (src_w, src_h) = self.image.dimensions();
        if src_w == 0 || src_h == 0 {
            return;
        }
        let fit = (width / src_w as f32).min(height / src_h as f32);
        let (fit_w, fit_h) = (src_w as f32 * fit, src_h as f32 * fit);
        canvas.draw_image(
            &self.image,
            x + (width - fit_w) / 2.0,
            y + (height - fit_h) / 2.0,
            fit_w,
            fit_h,
        );
    }
}

/// Renders card faces for one deck configuration.
///
/// Holds the resolved grid and typeface; the config itself is only borrowed.
#[derive(Debug)]
pub struct CardRenderer<'a> {
    config: &'a DeckConfig,
    grid: LayoutGrid,
    typeface: Typeface,
}

impl<'a> CardRenderer<'a> {
    /// Resolve the grid and load the configured font.
    pub fn new(config: &'a DeckConfig) -> Result<Self> {
        let font = config.font.as_deref().map(|path| config.resolve(path));
        let typeface = Typeface::load(font.as_deref())?;
        Ok(Self::with_typeface(config, typeface))
    }

    pub fn with_typeface(config: &'a DeckConfig, typeface: Typeface) -> Self {
        Self {
            config,
            grid: config.layout_grid(),
            typeface,
        }
    }

    pub fn grid(&self) -> &LayoutGrid {
        &self.grid
    }

    fn cell(&self) -> f32 {
        self.grid.cell()
    }

    /// Load or rasterise an icon in `color`.
    pub fn load_icon(&self, source: &IconSource, color: Color) -> Result<Icon> {
        match source {
            IconSource::Glyph(text) => Ok(Icon::glyph(self.typeface.render(
                text,
                self.cell(),
                color.rgba(),
            ))),
            IconSource::Image(path) => {
                load_raster(self.config.resolve(path)).map(Icon::raster)
            }
        }
    }

    /// Icon for every pip and index of `suit`.
    pub fn load_suit_icon(&self, suit: &Suit) -> Result<Icon> {
        self.load_icon(&suit.icon, suit.color)
    }

    /// Draw one face. `pips` is `None` when the rank has no layout entry.
    pub fn render_face(
        &self,
        rank: Rank,
        suit: &Suit,
        icon: &Icon,
        pips: Option<&[Pip]>,
    ) -> Result<RgbaImage> {
        let geometry = self.grid.geometry();
        let mut canvas = Canvas::new(
            geometry.width(),
            geometry.height(),
            self.config.background.rgba(),
        );

        if self.config.debug_grid {
            canvas.stroke_cells(geometry.cell, suit.color.rgba());
        }

        self.draw_indices(&mut canvas, rank, suit, icon);

        match pips {
            Some(pips) => {
                for (idx, pip) in pips.iter().enumerate() {
                    self.draw_pip(&mut canvas, rank, suit, icon, idx, pip)?;
                }
            }
            None => debug!("no pip layout for rank {}, indices only", rank.value()),
        }

        Ok(canvas.into_image())
    }

    /// Render and PNG-encode one card.
    pub fn render_card(
        &self,
        rank: Rank,
        suit: &Suit,
        icon: &Icon,
        pips: Option<&[Pip]>,
    ) -> Result<Vec<u8>> {
        let face = self.render_face(rank, suit, icon, pips)?;
        encode_png(&face)
    }

    fn draw_indices(&self, canvas: &mut Canvas, rank: Rank, suit: &Suit, icon: &Icon) {
        let label = self
            .typeface
            .render(rank.label(), self.cell(), suit.color.rgba());
        let index = &self.config.index;
        for (anchor, flip) in [(&index.top, false), (&index.bottom, true)] {
            match self.grid.position(anchor) {
                Some(point) => self.draw_index(canvas, &label, icon, point, flip),
                None => debug!("index anchor {anchor} is not on the grid, skipping"),
            }
        }
    }

    fn draw_index(
        &self,
        canvas: &mut Canvas,
        label: &RgbaImage,
        icon: &Icon,
        point: Point,
        flip: bool,
    ) {
        let cell = self.cell();
        canvas.save();
        canvas.translate(point.x, point.y);
        if flip {
            canvas.rotate_degrees(180.0);
        }
        let (label_w, label_h) = (label.width() as f32, label.height() as f32);
        let width = label_w.min(cell);
        canvas.draw_image(label, -width / 2.0, -label_h / 2.0, width, label_h);
        icon.draw(canvas, -cell / 4.0, cell / 1.5, cell / 2.0, cell / 2.0);
        canvas.restore();
    }

    fn draw_pip(
        &self,
        canvas: &mut Canvas,
        rank: Rank,
        suit: &Suit,
        icon: &Icon,
        idx: usize,
        pip: &Pip,
    ) -> Result<()> {
        match pip.kind {
            PipKind::Image => self.draw_pip_image(canvas, rank, suit, idx, pip),
            PipKind::Suit => self.draw_pip_suit(canvas, rank, suit, icon, idx, pip),
        }
    }

    fn draw_pip_suit(
        &self,
        canvas: &mut Canvas,
        rank: Rank,
        suit: &Suit,
        icon: &Icon,
        idx: usize,
        pip: &Pip,
    ) -> Result<()> {
        let point = match &pip.position {
            Some(PipPosition::Named(name)) => self.grid.position(name),
            Some(PipPosition::Literal(point)) => Some(*point),
            None => None,
        };
        let Some(point) = point else {
            debug!(
                "rank {} pip {idx}: unresolved position {:?}, skipping",
                rank.value(),
                pip.position
            );
            return Ok(());
        };

        let override_icon = match &pip.icon {
            Some(source) => Some(self.load_icon(source, suit.color)?),
            None => None,
        };
        let icon = override_icon.as_ref().unwrap_or(icon);

        let cell = self.cell();
        canvas.save();
        canvas.translate(point.x, point.y);
        canvas.rotate_degrees(pip.rotation());
        if let Some(scale) = pip.scale {
            canvas.scale(scale);
        }
        icon.draw(canvas, -cell / 2.0, -cell / 2.0, cell, cell);
        canvas.restore();
        Ok(())
    }

    fn draw_pip_image(
        &self,
        canvas: &mut Canvas,
        rank: Rank,
        suit: &Suit,
        idx: usize,
        pip: &Pip,
    ) -> Result<()> {
        let resolved = pip.bounds.as_ref().and_then(|bounds| {
            Some((
                self.grid.x(bounds.left.as_deref()?)?,
                self.grid.y(bounds.top.as_deref()?)?,
                self.grid.x(bounds.right.as_deref()?)?,
                self.grid.y(bounds.bottom.as_deref()?)?,
            ))
        });
        let Some((left, top, right, bottom)) = resolved else {
            debug!(
                "rank {} pip {idx}: unresolved bounds {:?}, skipping",
                rank.value(),
                pip.bounds
            );
            return Ok(());
        };

        let asset = pip
            .image
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.png", suit.color.hex())));
        let image = load_raster(self.config.resolve(&asset))?;
        canvas.draw_image(&image, left, top, right - left, bottom - top);
        Ok(())
    }
}

fn load_raster(path: PathBuf) -> Result<RgbaImage> {
    match image::open(&path) {
        Ok(image) => Ok(image.to_rgba8()),
        Err(source) => Err(CardError::Asset { path, source }),
    }
}

/// Encode with no row filtering and fast compression so output is reproducible.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    let encoder =
        PngEncoder::new_with_quality(&mut bytes, CompressionType::Fast, FilterType::NoFilter);
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(CardError::Encode)?;
    Ok(bytes.into_inner())
}

/// Count pixels that differ from `background`.
pub fn inked_pixels(image: &RgbaImage, background: Rgba<u8>) -> usize {
    image.pixels().filter(|pixel| **pixel != background).count()
}
