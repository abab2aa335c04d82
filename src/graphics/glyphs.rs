use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
/// Vertical units per em: seven glyph rows plus one row of leading.
const EM_UNITS: u32 = GLYPH_HEIGHT + 1;

/// Rasterise `text` with the built-in 5×7 face at roughly `size` pixels per em.
///
/// The result is tightly sized: `n` glyphs are `n * 5 + (n - 1)` units wide and
/// seven units tall. Unknown characters render as blanks.
pub fn render_bitmap(text: &str, size: f32, color: Rgba<u8>) -> RgbaImage {
    let scale = ((size / EM_UNITS as f32).floor() as u32).max(1);
    let count = text.chars().count().max(1) as u32;
    let width = (count * GLYPH_WIDTH + (count - 1)) * scale;
    let height = GLYPH_HEIGHT * scale;
    let mut stamp = RgbaImage::new(width, height);
    for (idx, ch) in text.chars().enumerate() {
        let x = idx as u32 * (GLYPH_WIDTH + 1) * scale;
        draw_glyph(&mut stamp, x as i32, 0, ch, color, scale);
    }
    stamp
}

fn draw_glyph(image: &mut RgbaImage, x: i32, y: i32, ch: char, color: Rgba<u8>, scale: u32) {
    let Some(pattern) = glyph_rows(ch) else {
        return;
    };
    for (row, bits) in pattern.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                let px = x + (col * scale) as i32;
                let py = y + (row as u32 * scale) as i32;
                draw_filled_rect_mut(image, Rect::at(px, py).of_size(scale, scale), color);
            }
        }
    }
}

#[rustfmt::skip]
fn glyph_rows(ch: char) -> Option<[u8; GLYPH_HEIGHT as usize]> {
    let rows = match ch.to_ascii_uppercase() {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01110],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b10010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b01010, 0b01010, 0b00100, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '♠' | '♤' => [0b00100, 0b01110, 0b11111, 0b11111, 0b10101, 0b00100, 0b01110],
        '♥' | '♡' => [0b00000, 0b01010, 0b11111, 0b11111, 0b01110, 0b00100, 0b00000],
        '♦' | '♢' => [0b00100, 0b01110, 0b01110, 0b11111, 0b01110, 0b01110, 0b00100],
        '♣' | '♧' => [0b01110, 0b01110, 0b10101, 0b11111, 0b10101, 0b00100, 0b01110],
        '*' => [0b00100, 0b10101, 0b01110, 0b10101, 0b00100, 0b00000, 0b00000],
        '+' => [0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '?' => [0b01110, 0b10001, 0b00010, 0b00100, 0b00100, 0b00000, 0b00100],
        _ => return None,
    };
    Some(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn inked(stamp: &RgbaImage) -> usize {
        stamp.pixels().filter(|p| p[3] != 0).count()
    }

    #[test]
    fn stamp_size_tracks_length_and_em() {
        let one = render_bitmap("K", 64.0, INK);
        assert_eq!(one.dimensions(), (40, 56));
        let two = render_bitmap("10", 64.0, INK);
        assert_eq!(two.dimensions(), (88, 56));
        let tiny = render_bitmap("A", 3.0, INK);
        assert_eq!(tiny.dimensions(), (5, 7));
    }

    #[test]
    fn suit_symbols_are_covered() {
        for ch in ['♠', '♥', '♦', '♣'] {
            assert!(glyph_rows(ch).is_some());
            assert!(inked(&render_bitmap(&ch.to_string(), 8.0, INK)) > 0);
        }
    }

    #[test]
    fn unknown_characters_are_blank() {
        assert!(glyph_rows('λ').is_none());
        let stamp = render_bitmap("λ", 8.0, INK);
        assert_eq!(inked(&stamp), 0);
    }

    #[test]
    fn lowercase_uses_uppercase_shapes() {
        assert_eq!(render_bitmap("q", 16.0, INK), render_bitmap("Q", 16.0, INK));
    }
}
