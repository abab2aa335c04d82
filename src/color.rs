use std::fmt;
use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::error::CardError;

/// An RGBA color parsed from `#rgb`, `#rrggbb`, `#rrggbbaa` or a basic name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub Rgba<u8>);

impl Color {
    pub const BLACK: Color = Color(Rgba([0, 0, 0, 0xff]));
    pub const WHITE: Color = Color(Rgba([0xff, 0xff, 0xff, 0xff]));

    pub fn rgba(self) -> Rgba<u8> {
        self.0
    }

    /// Lowercase hex without the leading `#`; the alpha byte is omitted when opaque.
    pub fn hex(self) -> String {
        let [r, g, b, a] = self.0.0;
        if a == 0xff {
            format!("{r:02x}{g:02x}{b:02x}")
        } else {
            format!("{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl FromStr for Color {
    type Err = CardError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let raw = input.trim();
        let invalid = || CardError::InvalidColor(input.to_string());
        if let Some(hex) = raw.strip_prefix('#') {
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let nibble = |i: usize| {
                u8::from_str_radix(&hex[i..i + 1], 16)
                    .map(|v| v * 17)
                    .map_err(|_| invalid())
            };
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            let rgba = match hex.len() {
                3 => [nibble(0)?, nibble(1)?, nibble(2)?, 0xff],
                4 => [nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?],
                6 => [byte(0)?, byte(2)?, byte(4)?, 0xff],
                8 => [byte(0)?, byte(2)?, byte(4)?, byte(6)?],
                _ => return Err(invalid()),
            };
            return Ok(Color(Rgba(rgba)));
        }
        let rgba = match raw.to_ascii_lowercase().as_str() {
            "black" => [0x00, 0x00, 0x00, 0xff],
            "white" => [0xff, 0xff, 0xff, 0xff],
            "red" => [0xff, 0x00, 0x00, 0xff],
            "green" => [0x00, 0x80, 0x00, 0xff],
            "blue" => [0x00, 0x00, 0xff, 0xff],
            "gray" | "grey" => [0x80, 0x80, 0x80, 0xff],
            "transparent" => [0x00, 0x00, 0x00, 0x00],
            _ => return Err(invalid()),
        };
        Ok(Color(Rgba(rgba)))
    }
}

impl TryFrom<String> for Color {
    type Error = CardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> String {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex())
    }
}
