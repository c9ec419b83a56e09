//! The rendering context and the lifecycle contract the CLI drives.

use crate::canvas::{self, DEFAULT_COLUMNS};
use crate::options::{Mode, RenderOptions};
use crate::raster::{self, Layout};
use crate::sauce::Sauce;
use crate::{AnsiloveError, Result};
use image::{ImageError, ImageFormat, RgbaImage};
use std::path::Path;
use tracing::debug;

pub const MAX_SCALE_FACTOR: u8 = 8;
pub const MAX_COLUMNS: i16 = 4096;
const CED_COLUMNS: usize = 78;

/// Lifecycle of a render: load, render, save, release. Failing calls
/// record their message for [`Renderer::error_message`].
pub trait Renderer {
    fn load_file(&mut self, path: &Path) -> Result<()>;
    fn render_ansi(&mut self, options: &RenderOptions) -> Result<()>;
    fn save_file(&mut self, path: &Path) -> Result<()>;
    fn error_message(&self) -> String;
    fn release(&mut self);
}

/// Built-in renderer state.
#[derive(Debug, Default)]
pub struct Ansilove {
    input: Option<Vec<u8>>,
    sauce: Option<Sauce>,
    output: Option<RgbaImage>,
    error: Option<String>,
}

impl Ansilove {
    /// A fresh context and the default options.
    pub fn init() -> Result<(Self, RenderOptions)> {
        Ok((Self::default(), RenderOptions::default()))
    }

    pub fn sauce(&self) -> Option<&Sauce> {
        self.sauce.as_ref()
    }

    pub fn output(&self) -> Option<&RgbaImage> {
        self.output.as_ref()
    }

    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            self.error = Some(err.to_string());
        }
        result
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        let data = std::fs::read(path).map_err(AnsiloveError::Read)?;
        if data.is_empty() {
            return Err(AnsiloveError::Format(format!("{} is empty", path.display())));
        }

        let (content, sauce) = Sauce::split(&data);
        if let Some(sauce) = &sauce {
            debug!(title = %sauce.title, author = %sauce.author, "found SAUCE record");
        }
        let content = content.to_vec();
        debug!(bytes = content.len(), path = %path.display(), "loaded input");

        self.input = Some(content);
        self.sauce = sauce;
        self.output = None;
        Ok(())
    }

    fn columns(&self, options: &RenderOptions) -> Result<usize> {
        if !(0..=MAX_COLUMNS).contains(&options.columns) {
            return Err(AnsiloveError::Range(format!(
                "columns must be between 0 and {MAX_COLUMNS}, got {}",
                options.columns
            )));
        }
        if options.mode == Mode::Ced {
            return Ok(CED_COLUMNS);
        }
        if let Ok(columns @ 1..) = usize::try_from(options.columns) {
            return Ok(columns);
        }
        Ok(self
            .sauce
            .as_ref()
            .and_then(Sauce::columns)
            .map_or(DEFAULT_COLUMNS, usize::from))
    }

    fn render(&mut self, options: &RenderOptions) -> Result<()> {
        if options.scale_factor > MAX_SCALE_FACTOR {
            return Err(AnsiloveError::Range(format!(
                "scale factor must be at most {MAX_SCALE_FACTOR}, got {}",
                options.scale_factor
            )));
        }
        let columns = self.columns(options)?;
        let icecolors = options.icecolors || self.sauce.as_ref().is_some_and(Sauce::ice_colors);
        let input = self
            .input
            .as_deref()
            .ok_or(AnsiloveError::InvalidParam("no input loaded"))?;

        let canvas = canvas::interpret(input, columns, icecolors)?;
        let layout = Layout {
            font: options.font,
            cell_width: if options.bits == 9 && !options.font.is_amiga() { 9 } else { 8 },
            mode: options.mode,
            scale_factor: u32::from(options.scale_factor),
        };
        let (width, height) = raster::image_size(canvas.columns(), canvas.rows(), &layout)
            .ok_or_else(|| {
                AnsiloveError::Memory(format!(
                    "{} by {} cell image exceeds {} bytes",
                    canvas.columns(),
                    canvas.rows(),
                    raster::MAX_IMAGE_BYTES
                ))
            })?;
        debug!(
            columns = canvas.columns(),
            rows = canvas.rows(),
            width,
            height,
            font = options.font.name(),
            ?layout,
            "rendering canvas"
        );

        self.output = Some(raster::rasterize(&canvas, &layout));
        Ok(())
    }

    fn save(&self, path: &Path) -> Result<()> {
        let image = self
            .output
            .as_ref()
            .ok_or(AnsiloveError::InvalidParam("nothing rendered"))?;
        image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|err| match err {
                ImageError::IoError(io) => AnsiloveError::Write(io),
                other => AnsiloveError::Encode(other),
            })?;
        debug!(path = %path.display(), "saved image");
        Ok(())
    }
}

impl Renderer for Ansilove {
    fn load_file(&mut self, path: &Path) -> Result<()> {
        let result = self.load(path);
        self.record(result)
    }

    fn render_ansi(&mut self, options: &RenderOptions) -> Result<()> {
        let result = self.render(options);
        self.record(result)
    }

    fn save_file(&mut self, path: &Path) -> Result<()> {
        let result = self.save(path);
        self.record(result)
    }

    fn error_message(&self) -> String {
        self.error.clone().unwrap_or_else(|| "no error".to_string())
    }

    fn release(&mut self) {
        self.input = None;
        self.sauce = None;
        self.output = None;
    }
}
