//! ansi2png CLI - Render ANSI art to PNG

use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("ANSI2PNG_LOG"))
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let code = ansi2png::run(std::env::args_os(), ansi2png::process_env, &mut std::io::stderr());
    ExitCode::from(code)
}
