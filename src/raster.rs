//! Cell grid to RGBA bitmap.

use crate::canvas::{Canvas, Cell};
use crate::font::{Font, GlyphSet};
use crate::options::Mode;
use crate::palette::{self, Color, Palette};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

/// Largest bitmap, in bytes, that rendering will allocate.
pub const MAX_IMAGE_BYTES: u64 = 1 << 30;

/// Everything the rasterizer needs besides the canvas.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub font: Font,
    pub cell_width: u32,
    pub mode: Mode,
    pub scale_factor: u32,
}

impl Layout {
    pub fn cell_height(&self) -> u32 {
        self.font.cell_height()
    }
}

/// Final bitmap size after scaling, or `None` when it overflows `u32` or
/// goes over [`MAX_IMAGE_BYTES`].
pub fn image_size(columns: usize, rows: usize, layout: &Layout) -> Option<(u32, u32)> {
    let scale = layout.scale_factor.max(1);
    let width = u32::try_from(columns)
        .ok()?
        .checked_mul(layout.cell_width)?
        .checked_mul(scale)?;
    let height = u32::try_from(rows)
        .ok()?
        .checked_mul(layout.cell_height())?
        .checked_mul(scale)?;
    let bytes = u64::from(width) * u64::from(height) * 4;
    (bytes <= MAX_IMAGE_BYTES).then_some((width, height))
}

/// Callers check [`image_size`] first.
#[allow(clippy::cast_possible_truncation)]
pub fn rasterize(canvas: &Canvas, layout: &Layout) -> RgbaImage {
    let glyphs = GlyphSet::for_font(layout.font);
    let palette = palette::for_mode(layout.mode);
    let (cell_w, cell_h) = (layout.cell_width, layout.cell_height());

    let width = canvas.columns() as u32 * cell_w;
    let height = canvas.rows() as u32 * cell_h;
    let mut image = RgbaImage::new(width, height);

    for row in 0..canvas.rows() {
        for column in 0..canvas.columns() {
            let cell = canvas.cell(row, column);
            let (fg, bg) = cell_colors(&cell, layout.mode, palette);
            draw_cell(
                &mut image,
                glyphs.glyph(cell.byte),
                cell.byte,
                column as u32 * cell_w,
                row as u32 * cell_h,
                (cell_w, cell_h),
                fg,
                bg,
            );
        }
    }

    if layout.scale_factor > 1 {
        image = imageops::resize(
            &image,
            width * layout.scale_factor,
            height * layout.scale_factor,
            FilterType::Nearest,
        );
    }

    image
}

fn cell_colors(cell: &Cell, mode: Mode, palette: &Palette) -> (Rgba<u8>, Rgba<u8>) {
    match mode {
        Mode::Ced => (
            palette::opaque(palette::CED_FOREGROUND),
            palette::opaque(palette::CED_BACKGROUND),
        ),
        Mode::Transparent if cell.bg == Color::Index(0) => {
            (palette::opaque(cell.fg.resolve(palette)), Rgba([0, 0, 0, 0]))
        }
        _ => (
            palette::opaque(cell.fg.resolve(palette)),
            palette::opaque(cell.bg.resolve(palette)),
        ),
    }
}

/// Line-drawing glyphs extend into the ninth column of 9-pixel cells.
fn extends_ninth_column(byte: u8) -> bool {
    (0xC0..=0xDF).contains(&byte)
}

#[allow(clippy::too_many_arguments)]
fn draw_cell(
    image: &mut RgbaImage,
    glyph: &[u8; 8],
    byte: u8,
    x0: u32,
    y0: u32,
    (cell_w, cell_h): (u32, u32),
    fg: Rgba<u8>,
    bg: Rgba<u8>,
) {
    for y in 0..cell_h {
        let bits = glyph[(y * 8 / cell_h) as usize];
        for x in 0..cell_w {
            let lit = match x {
                0..=7 => bits & (1 << x) != 0,
                _ => extends_ninth_column(byte) && bits & 0x80 != 0,
            };
            image.put_pixel(x0 + x, y0 + y, if lit { fg } else { bg });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::interpret;

    fn layout(font: Font, cell_width: u32, mode: Mode, scale_factor: u32) -> Layout {
        Layout { font, cell_width, mode, scale_factor }
    }

    #[test]
    fn image_size_follows_cells() {
        let canvas = interpret(b"ab\r\ncd", 10, false).unwrap();
        let image = rasterize(&canvas, &layout(Font::Cp437, 8, Mode::Normal, 1));
        assert_eq!(image.dimensions(), (80, 32));

        let image = rasterize(&canvas, &layout(Font::Cp437x50, 9, Mode::Normal, 1));
        assert_eq!(image.dimensions(), (90, 16));
    }

    #[test]
    fn scaling_multiplies_dimensions() {
        let canvas = interpret(b"x", 4, false).unwrap();
        let image = rasterize(&canvas, &layout(Font::Cp437, 8, Mode::Normal, 3));
        assert_eq!(image.dimensions(), (96, 48));
    }

    #[test]
    fn image_size_rejects_huge_bitmaps() {
        let plain = layout(Font::Cp437, 8, Mode::Normal, 1);
        assert_eq!(image_size(80, 10_000, &plain), Some((640, 160_000)));
        assert_eq!(image_size(2, 1, &layout(Font::Cp437, 9, Mode::Normal, 0)), Some((18, 16)));

        let wide = layout(Font::Cp437, 9, Mode::Normal, 8);
        assert_eq!(image_size(4096, 1, &wide), Some((294_912, 128)));
        assert_eq!(image_size(4096, 8, &wide), None);
        assert_eq!(image_size(usize::MAX, 1, &plain), None);
        assert_eq!(image_size(1, 1 << 29, &wide), None);
    }

    #[test]
    fn full_block_uses_foreground() {
        let canvas = interpret(b"\x1b[31;42m\xdb ", 2, false).unwrap();
        let image = rasterize(&canvas, &layout(Font::Cp437, 8, Mode::Normal, 1));
        assert_eq!(image.get_pixel(3, 5), &Rgba([0xAA, 0, 0, 0xFF]));
        assert_eq!(image.get_pixel(11, 5), &Rgba([0, 0xAA, 0, 0xFF]));
    }

    #[test]
    fn ninth_column_repeats_line_drawing_only() {
        let canvas = interpret(b"\xdb\xc4", 2, false).unwrap();
        let image = rasterize(&canvas, &layout(Font::Cp437, 9, Mode::Normal, 1));
        let white = Rgba([0xAA, 0xAA, 0xAA, 0xFF]);
        // 0xDB is outside the line-drawing range: its ninth column is background.
        assert!((0..16).all(|y| image.get_pixel(8, y) != &white));
        // 0xC4 is a horizontal line: some row reaches the ninth column.
        assert!((0..16).any(|y| image.get_pixel(17, y) == &white));
    }

    #[test]
    fn transparent_mode_clears_black_background() {
        let canvas = interpret(b" \x1b[44m ", 2, false).unwrap();
        let image = rasterize(&canvas, &layout(Font::Cp437, 8, Mode::Transparent, 1));
        assert_eq!(image.get_pixel(0, 0)[3], 0);
        assert_eq!(image.get_pixel(8, 0), &Rgba([0, 0, 0xAA, 0xFF]));
    }

    #[test]
    fn ced_mode_ignores_colors() {
        let canvas = interpret(b"\x1b[44m ", 1, false).unwrap();
        let image = rasterize(&canvas, &layout(Font::Cp437, 8, Mode::Ced, 1));
        assert_eq!(image.get_pixel(0, 0), &Rgba([0xAA, 0xAA, 0xAA, 0xFF]));
    }

    #[test]
    fn workbench_mode_uses_amiga_palette() {
        let canvas = interpret(b" ", 1, false).unwrap();
        let image = rasterize(&canvas, &layout(Font::Topaz, 8, Mode::Workbench, 1));
        assert_eq!(image.get_pixel(0, 0), &Rgba([0xAA, 0xAA, 0xAA, 0xFF]));
    }
}
