//! ANSI interpreter: turns an art file's bytes into a grid of cells.
//!
//! Input is treated as raw code-page bytes. Every byte that is not a
//! control or part of an escape sequence becomes a glyph index.

use crate::palette::Color;
use crate::{AnsiloveError, Result};

pub const DEFAULT_COLUMNS: usize = 80;
pub const MAX_ROWS: usize = 10_000;
/// Upper bound on `rows * columns`.
pub const MAX_CELLS: usize = 1 << 22;
const MAX_PARAMS: usize = 16;
const TAB_WIDTH: usize = 8;

const ESC: u8 = 0x1B;
const SUB: u8 = 0x1A;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub byte: u8,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self { byte: b' ', fg: Color::Index(7), bg: Color::Index(0) }
    }
}

/// Fixed-width grid that grows downwards as glyphs are drawn.
#[derive(Debug)]
pub struct Canvas {
    columns: usize,
    rows: Vec<Vec<Cell>>,
}

impl Canvas {
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows, never less than one.
    pub fn rows(&self) -> usize {
        self.rows.len().max(1)
    }

    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .copied()
            .unwrap_or_default()
    }
}

/// Current SGR state.
#[derive(Debug, Clone, Copy)]
struct Attributes {
    fg: u8,
    bg: u8,
    fg_rgb: Option<[u8; 3]>,
    bg_rgb: Option<[u8; 3]>,
    bold: bool,
    blink: bool,
    invert: bool,
}

impl Default for Attributes {
    fn default() -> Self {
        Self { fg: 7, bg: 0, fg_rgb: None, bg_rgb: None, bold: false, blink: false, invert: false }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum State {
    Ground,
    Escape,
    Csi,
}

struct Interpreter {
    canvas: Canvas,
    row: usize,
    column: usize,
    saved: (usize, usize),
    attrs: Attributes,
    icecolors: bool,
    state: State,
    params: Vec<u16>,
    current: Option<u16>,
    private: bool,
}

/// Interpret `data` on a canvas `columns` wide. With `icecolors`, blink
/// selects bright backgrounds.
pub fn interpret(data: &[u8], columns: usize, icecolors: bool) -> Result<Canvas> {
    let mut interpreter = Interpreter {
        canvas: Canvas { columns: columns.max(1), rows: Vec::new() },
        row: 0,
        column: 0,
        saved: (0, 0),
        attrs: Attributes::default(),
        icecolors,
        state: State::Ground,
        params: Vec::new(),
        current: None,
        private: false,
    };

    for &byte in data {
        if interpreter.state != State::Csi && byte == SUB {
            break;
        }
        interpreter.advance(byte)?;
    }

    Ok(interpreter.canvas)
}

impl Interpreter {
    fn advance(&mut self, byte: u8) -> Result<()> {
        match self.state {
            State::Ground => match byte {
                ESC => self.state = State::Escape,
                b'\n' => {
                    self.row += 1;
                    self.column = 0;
                }
                b'\r' => self.column = 0,
                b'\t' => {
                    self.column = (self.column / TAB_WIDTH + 1) * TAB_WIDTH;
                    if self.column >= self.canvas.columns {
                        self.column = 0;
                        self.row += 1;
                    }
                }
                _ => self.put(byte)?,
            },
            State::Escape => {
                if byte == b'[' {
                    self.params.clear();
                    self.current = None;
                    self.private = false;
                    self.state = State::Csi;
                } else {
                    // Only the ESC is dropped.
                    self.state = State::Ground;
                    return self.advance(byte);
                }
            }
            State::Csi => match byte {
                b'0'..=b'9' => {
                    let digit = u16::from(byte - b'0');
                    let value = self.current.unwrap_or(0);
                    self.current = Some(value.saturating_mul(10).saturating_add(digit));
                }
                b';' => self.push_param(),
                b'<'..=b'?' => self.private = true,
                0x40..=0x7E => {
                    self.push_param();
                    self.state = State::Ground;
                    if !self.private {
                        self.dispatch(byte);
                    }
                }
                _ => {}
            },
        }
        Ok(())
    }

    fn push_param(&mut self) {
        let value = self.current.take().unwrap_or(0);
        if self.params.len() < MAX_PARAMS {
            self.params.push(value);
        }
    }

    fn param(&self, index: usize, default: u16) -> u16 {
        match self.params.get(index) {
            Some(&0) | None => default,
            Some(&value) => value,
        }
    }

    fn dispatch(&mut self, action: u8) {
        let last_column = self.canvas.columns - 1;
        match action {
            b'H' | b'f' => {
                self.row = usize::from(self.param(0, 1)) - 1;
                self.column = (usize::from(self.param(1, 1)) - 1).min(last_column);
            }
            b'A' => self.row = self.row.saturating_sub(usize::from(self.param(0, 1))),
            b'B' => self.row += usize::from(self.param(0, 1)),
            b'C' => self.column = (self.column + usize::from(self.param(0, 1))).min(last_column),
            b'D' => self.column = self.column.saturating_sub(usize::from(self.param(0, 1))),
            b's' => self.saved = (self.row, self.column),
            b'u' => (self.row, self.column) = self.saved,
            b'J' => {
                if self.params.first() == Some(&2) {
                    self.canvas.rows.clear();
                    self.row = 0;
                    self.column = 0;
                }
            }
            b'K' => {
                if let Some(cells) = self.canvas.rows.get_mut(self.row) {
                    for cell in cells.iter_mut().skip(self.column) {
                        *cell = Cell::default();
                    }
                }
            }
            b'm' => self.select_graphic_rendition(),
            b't' => self.pablodraw_color(),
            _ => {}
        }
    }

    fn select_graphic_rendition(&mut self) {
        for index in 0..self.params.len() {
            match self.params[index] {
                0 => self.attrs = Attributes::default(),
                1 => self.attrs.bold = true,
                2 | 22 => self.attrs.bold = false,
                5 => self.attrs.blink = true,
                25 => self.attrs.blink = false,
                7 => self.attrs.invert = true,
                27 => self.attrs.invert = false,
                code @ 30..=37 => {
                    self.attrs.fg = (code - 30) as u8;
                    self.attrs.fg_rgb = None;
                }
                39 => {
                    self.attrs.fg = 7;
                    self.attrs.fg_rgb = None;
                }
                code @ 40..=47 => {
                    self.attrs.bg = (code - 40) as u8;
                    self.attrs.bg_rgb = None;
                }
                49 => {
                    self.attrs.bg = 0;
                    self.attrs.bg_rgb = None;
                }
                code @ 90..=97 => {
                    self.attrs.fg = (code - 90) as u8 + 8;
                    self.attrs.fg_rgb = None;
                }
                code @ 100..=107 => {
                    self.attrs.bg = (code - 100) as u8 + 8;
                    self.attrs.bg_rgb = None;
                }
                _ => {}
            }
        }
    }

    /// PabloDraw 24-bit colour: `ESC[0;R;G;Bt` background, `ESC[1;R;G;Bt`
    /// foreground.
    #[allow(clippy::cast_possible_truncation)]
    fn pablodraw_color(&mut self) {
        let [target, r, g, b] = self.params[..] else {
            return;
        };
        let rgb = [r.min(255) as u8, g.min(255) as u8, b.min(255) as u8];
        match target {
            0 => self.attrs.bg_rgb = Some(rgb),
            1 => self.attrs.fg_rgb = Some(rgb),
            _ => {}
        }
    }

    fn current_cell(&self, byte: u8) -> Cell {
        let attrs = &self.attrs;
        let fg = attrs.fg_rgb.map_or_else(
            || Color::Index(if attrs.bold { attrs.fg | 8 } else { attrs.fg }),
            Color::Rgb,
        );
        let bg = attrs.bg_rgb.map_or_else(
            || Color::Index(if attrs.blink && self.icecolors { attrs.bg | 8 } else { attrs.bg }),
            Color::Rgb,
        );
        if attrs.invert {
            Cell { byte, fg: bg, bg: fg }
        } else {
            Cell { byte, fg, bg }
        }
    }

    fn put(&mut self, byte: u8) -> Result<()> {
        if self.row >= MAX_ROWS {
            return Err(AnsiloveError::Memory(format!("canvas exceeds {MAX_ROWS} rows")));
        }

        let columns = self.canvas.columns;
        if (self.row + 1).saturating_mul(columns) > MAX_CELLS {
            return Err(AnsiloveError::Memory(format!(
                "canvas of {} rows by {columns} columns exceeds {MAX_CELLS} cells",
                self.row + 1
            )));
        }

        let cell = self.current_cell(byte);
        if self.canvas.rows.len() <= self.row {
            self.canvas.rows.resize_with(self.row + 1, || vec![Cell::default(); columns]);
        }
        self.canvas.rows[self.row][self.column] = cell;

        self.column += 1;
        if self.column >= columns {
            self.column = 0;
            self.row += 1;
        }
        Ok(())
    }
}
