//! Colour palettes, indexed in ANSI order (black, red, green, yellow,
//! blue, magenta, cyan, white, then the bright variants).

use crate::options::Mode;
use image::Rgba;

pub type Palette = [[u8; 3]; 16];

pub const VGA: Palette = [
    [0x00, 0x00, 0x00],
    [0xAA, 0x00, 0x00],
    [0x00, 0xAA, 0x00],
    [0xAA, 0x55, 0x00],
    [0x00, 0x00, 0xAA],
    [0xAA, 0x00, 0xAA],
    [0x00, 0xAA, 0xAA],
    [0xAA, 0xAA, 0xAA],
    [0x55, 0x55, 0x55],
    [0xFF, 0x55, 0x55],
    [0x55, 0xFF, 0x55],
    [0xFF, 0xFF, 0x55],
    [0x55, 0x55, 0xFF],
    [0xFF, 0x55, 0xFF],
    [0x55, 0xFF, 0xFF],
    [0xFF, 0xFF, 0xFF],
];

/// Amiga Workbench 1.x colours; bright entries repeat the base eight.
pub const WORKBENCH: Palette = [
    [0xAA, 0xAA, 0xAA],
    [0x00, 0x00, 0x00],
    [0xFF, 0xFF, 0xFF],
    [0x66, 0x88, 0xBB],
    [0x00, 0x00, 0xFF],
    [0xFF, 0x00, 0xFF],
    [0x33, 0x99, 0x99],
    [0xFF, 0xFF, 0xFF],
    [0xAA, 0xAA, 0xAA],
    [0x00, 0x00, 0x00],
    [0xFF, 0xFF, 0xFF],
    [0x66, 0x88, 0xBB],
    [0x00, 0x00, 0xFF],
    [0xFF, 0x00, 0xFF],
    [0x33, 0x99, 0x99],
    [0xFF, 0xFF, 0xFF],
];

pub const CED_BACKGROUND: [u8; 3] = [0xAA, 0xAA, 0xAA];
pub const CED_FOREGROUND: [u8; 3] = [0x00, 0x00, 0x00];

/// A cell colour: a palette index or a 24-bit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Index(u8),
    Rgb([u8; 3]),
}

impl Color {
    pub fn resolve(self, palette: &Palette) -> [u8; 3] {
        match self {
            Color::Index(index) => palette[usize::from(index & 0x0F)],
            Color::Rgb(rgb) => rgb,
        }
    }
}

pub fn for_mode(mode: Mode) -> &'static Palette {
    match mode {
        Mode::Workbench => &WORKBENCH,
        _ => &VGA,
    }
}

pub fn opaque([r, g, b]: [u8; 3]) -> Rgba<u8> {
    Rgba([r, g, b, 0xFF])
}
