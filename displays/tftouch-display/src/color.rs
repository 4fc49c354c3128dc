//! RGB-565 pixel colours
//!
//! Red occupies bits 15..11, green bits 10..5 and blue bits 4..0.

/// A 16-bit RGB-565 pixel value
pub type Color = u16;

/// Pack 8-bit channels into RGB-565 by truncating the low bits
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | ((b as u16 & 0xF8) >> 3)
}

pub const BLACK: Color = rgb(0, 0, 0);
pub const WHITE: Color = rgb(255, 255, 255);
pub const RED: Color = rgb(255, 0, 0);
pub const GREEN: Color = rgb(0, 255, 0);
pub const BLUE: Color = rgb(0, 0, 255);
pub const MAGENTA: Color = rgb(255, 0, 255);
