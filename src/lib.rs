//! ANSI art to PNG converter.

pub mod canvas;
pub mod cli;
pub mod context;
pub mod convert;
pub mod font;
pub mod options;
pub mod palette;
pub mod raster;
pub mod sauce;

pub use cli::{process_env, run};
pub use context::{Ansilove, Renderer};
pub use convert::{convert, convert_with, ConvertError, Session};
pub use font::Font;
pub use options::{Mode, OptionWarning, RenderOptions};
pub use sauce::Sauce;

use thiserror::Error;

/// Failures reported by the rendering context.
#[derive(Error, Debug)]
pub enum AnsiloveError {
    #[error("invalid parameter: {0}")]
    InvalidParam(&'static str),
    #[error("format error: {0}")]
    Format(String),
    #[error("range error: {0}")]
    Range(String),
    #[error("memory allocation error: {0}")]
    Memory(String),
    #[error("file read error: {0}")]
    Read(#[source] std::io::Error),
    #[error("file write error: {0}")]
    Write(#[source] std::io::Error),
    #[error("image encoding error: {0}")]
    Encode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, AnsiloveError>;
