use image::{Pixel, Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::geometric_transformations::Projection;
use imageproc::rect::Rect;

/// RGBA raster with a current affine transform, in the manner of a 2D context.
///
/// Drawing goes through the inverse transform with nearest-neighbour sampling
/// and source-over blending, so output depends only on inputs.
pub struct Canvas {
    image: RgbaImage,
    transform: Projection,
    saved: Vec<Projection>,
}

impl Canvas {
    /// A canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background),
            transform: identity(),
            saved: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn save(&mut self) {
        self.saved.push(self.transform);
    }

    pub fn restore(&mut self) {
        if let Some(transform) = self.saved.pop() {
            self.transform = transform;
        }
    }

    pub fn translate(&mut self, x: f32, y: f32) {
        self.transform = self.transform * Projection::translate(x, y);
    }

    /// Rotate clockwise (y axis points down) by `degrees`.
    pub fn rotate_degrees(&mut self, degrees: f32) {
        if degrees.rem_euclid(360.0) == 0.0 {
            return;
        }
        let (sin, cos) = sin_cos_degrees(degrees);
        if let Some(rotation) = Projection::from_matrix([cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0])
        {
            self.transform = self.transform * rotation;
        }
    }

    pub fn scale(&mut self, factor: f32) {
        self.transform = self.transform * Projection::scale(factor, factor);
    }

    /// Draw `source` stretched into the local rectangle `(x, y, width, height)`.
    pub fn draw_image(&mut self, source: &RgbaImage, x: f32, y: f32, width: f32, height: f32) {
        let (src_w, src_h) = source.dimensions();
        if src_w == 0 || src_h == 0 || width <= 0.0 || height <= 0.0 {
            return;
        }
        if !width.is_finite() || !height.is_finite() {
            return;
        }
        let corners = [
            self.transform * (x, y),
            self.transform * (x + width, y),
            self.transform * (x, y + height),
            self.transform * (x + width, y + height),
        ];
        let min_x = corners.iter().map(|c| c.0).fold(f32::INFINITY, f32::min);
        let max_x = corners.iter().map(|c| c.0).fold(f32::NEG_INFINITY, f32::max);
        let min_y = corners.iter().map(|c| c.1).fold(f32::INFINITY, f32::min);
        let max_y = corners.iter().map(|c| c.1).fold(f32::NEG_INFINITY, f32::max);

        let x0 = min_x.floor().max(0.0) as u32;
        let y0 = min_y.floor().max(0.0) as u32;
        let x1 = (max_x.ceil().max(0.0) as u32).min(self.width());
        let y1 = (max_y.ceil().max(0.0) as u32).min(self.height());

        let inverse = self.transform.invert();
        let step_x = src_w as f32 / width;
        let step_y = src_h as f32 / height;
        for py in y0..y1 {
            for px in x0..x1 {
                let (lx, ly) = inverse * (px as f32 + 0.5, py as f32 + 0.5);
                let u = (lx - x) * step_x;
                let v = (ly - y) * step_y;
                if u < 0.0 || v < 0.0 {
                    continue;
                }
                let (u, v) = (u.floor() as u32, v.floor() as u32);
                if u >= src_w || v >= src_h {
                    continue;
                }
                let sample = source.get_pixel(u, v);
                if sample[3] == 0 {
                    continue;
                }
                self.image.get_pixel_mut(px, py).blend(sample);
            }
        }
    }

    /// Outline every `cell`-sized square of the canvas, ignoring the transform.
    pub fn stroke_cells(&mut self, cell: u32, color: Rgba<u8>) {
        if cell == 0 {
            return;
        }
        for column in 0..self.width().div_ceil(cell) {
            for row in 0..self.height().div_ceil(cell) {
                let rect = Rect::at((column * cell) as i32, (row * cell) as i32).of_size(cell, cell);
                draw_hollow_rect_mut(&mut self.image, rect, color);
            }
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

fn identity() -> Projection {
    Projection::translate(0.0, 0.0)
}

/// Sine and cosine with exact values on quarter turns.
fn sin_cos_degrees(degrees: f32) -> (f32, f32) {
    let normalized = degrees.rem_euclid(360.0);
    if normalized == 0.0 {
        (0.0, 1.0)
    } else if normalized == 90.0 {
        (1.0, 0.0)
    } else if normalized == 180.0 {
        (0.0, -1.0)
    } else if normalized == 270.0 {
        (-1.0, 0.0)
    } else {
        normalized.to_radians().sin_cos()
    }
}
