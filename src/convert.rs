//! The convert pipeline: init, configure, load, render, save, release.

use crate::context::{Ansilove, Renderer};
use crate::options::RenderOptions;
use crate::AnsiloveError;
use std::fmt;
use std::io::Write;
use std::ops::{Deref, DerefMut};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub const PROGRAM: &str = "ansi2png";

/// Which stage stopped the run. `Display` is the diagnostic line without
/// the program prefix.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("usage: ansi2png INPUT OUTPUT.png")]
    Usage,
    #[error("init failed")]
    Init(#[source] AnsiloveError),
    #[error("load failed: {0}")]
    Load(String),
    #[error("render failed: {0}")]
    Render(String),
    #[error("save failed: {0}")]
    Save(String),
}

/// Write one diagnostic line. Diagnostics are best effort: a failed write
/// never changes the outcome of the run.
pub(crate) fn report(diagnostics: &mut impl Write, line: fmt::Arguments<'_>) {
    let _ = writeln!(diagnostics, "{line}");
}

/// Owns a renderer and releases it exactly once, when dropped.
#[derive(Debug)]
pub struct Session<R: Renderer> {
    renderer: R,
}

impl<R: Renderer> Session<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }
}

impl<R: Renderer> Deref for Session<R> {
    type Target = R;

    fn deref(&self) -> &R {
        &self.renderer
    }
}

impl<R: Renderer> DerefMut for Session<R> {
    fn deref_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

impl<R: Renderer> Drop for Session<R> {
    fn drop(&mut self) {
        debug!("releasing render context");
        self.renderer.release();
    }
}

/// Convert `input` to a PNG at `output` with the built-in renderer.
pub fn convert(
    input: &Path,
    output: &Path,
    env: impl Fn(&str) -> Option<String>,
    diagnostics: &mut impl Write,
) -> Result<(), ConvertError> {
    convert_with(Ansilove::init, input, output, env, diagnostics)
}

/// Run the pipeline against any renderer. Warnings about the environment
/// are written to `diagnostics`; the first failing stage ends the run.
pub fn convert_with<R: Renderer>(
    init: impl FnOnce() -> crate::Result<(R, RenderOptions)>,
    input: &Path,
    output: &Path,
    env: impl Fn(&str) -> Option<String>,
    diagnostics: &mut impl Write,
) -> Result<(), ConvertError> {
    let (renderer, mut options) = init().map_err(ConvertError::Init)?;
    let mut session = Session::new(renderer);

    for warning in options.apply_env(env) {
        report(diagnostics, format_args!("{PROGRAM}: {warning}"));
    }
    debug!(?options, "resolved render options");

    session
        .load_file(input)
        .map_err(|_| ConvertError::Load(session.error_message()))?;
    session
        .render_ansi(&options)
        .map_err(|_| ConvertError::Render(session.error_message()))?;
    session
        .save_file(output)
        .map_err(|_| ConvertError::Save(session.error_message()))?;

    Ok(())
}
