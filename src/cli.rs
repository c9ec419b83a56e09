//! Command-line front end.

use crate::convert::{convert, report, ConvertError, PROGRAM};
use clap::Parser;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ansi2png",
    about = "Render ANSI art to PNG",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Args {
    /// Input ANSI art file
    pub input: PathBuf,
    /// Output PNG file
    pub output: PathBuf,
}

impl Args {
    /// Exactly two operands, taken literally: no flags, no `--`.
    pub fn from_operands<I, T>(args: I) -> Result<Args, ConvertError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args = args.into_iter().map(Into::into);
        let program = args.next().unwrap_or_else(|| OsString::from(PROGRAM));
        let operands: Vec<OsString> = args.collect();
        if operands.len() != 2 {
            return Err(ConvertError::Usage);
        }

        // The inserted separator stops clap from reading operands as flags.
        let argv = [program, OsString::from("--")].into_iter().chain(operands);
        Args::try_parse_from(argv).map_err(|_| ConvertError::Usage)
    }
}

/// Parse `args`, convert, and report to `diagnostics`. Returns the process
/// exit code: 0 on success, 1 on any failure.
pub fn run<I, T>(
    args: I,
    env: impl Fn(&str) -> Option<String>,
    diagnostics: &mut impl Write,
) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args = match Args::from_operands(args) {
        Ok(args) => args,
        Err(usage) => {
            report(diagnostics, format_args!("{usage}"));
            return 1;
        }
    };

    match convert(&args.input, &args.output, env, diagnostics) {
        Ok(()) => 0,
        Err(err) => {
            report(diagnostics, format_args!("{PROGRAM}: {err}"));
            1
        }
    }
}

/// Environment lookup backed by the process environment.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> (u8, String) {
        let mut diagnostics = Vec::new();
        let code = run(args.iter().copied(), |_| None, &mut diagnostics);
        (code, String::from_utf8(diagnostics).unwrap())
    }

    #[test]
    fn wrong_argument_counts_print_usage() {
        for args in [
            &["ansi2png"][..],
            &["ansi2png", "in.ans"][..],
            &["ansi2png", "in.ans", "out.png", "extra"][..],
        ] {
            let (code, diagnostics) = run_args(args);
            assert_eq!(code, 1, "{args:?}");
            assert_eq!(diagnostics, "usage: ansi2png INPUT OUTPUT.png\n");
        }
    }

    #[test]
    fn flags_count_as_arguments() {
        for args in [
            &["ansi2png", "--help"][..],
            &["ansi2png", "--version"][..],
            &["ansi2png", "--", "in.ans", "out.png"][..],
        ] {
            let (code, diagnostics) = run_args(args);
            assert_eq!(code, 1, "{args:?}");
            assert_eq!(diagnostics, "usage: ansi2png INPUT OUTPUT.png\n");
        }
    }

    #[test]
    fn operands_are_taken_literally() {
        let args = Args::from_operands(["ansi2png", "-x.ans", "--help"]).unwrap();
        assert_eq!(args.input, PathBuf::from("-x.ans"));
        assert_eq!(args.output, PathBuf::from("--help"));

        let args = Args::from_operands(["ansi2png", "--", "b.png"]).unwrap();
        assert_eq!(args.input, PathBuf::from("--"));
    }

    #[test]
    fn dash_prefixed_input_reaches_the_loader() {
        let (code, diagnostics) = run_args(&["ansi2png", "-missing.ans", "out.png"]);
        assert_eq!(code, 1);
        assert!(diagnostics.starts_with("ansi2png: load failed: "), "{diagnostics}");
    }

    #[test]
    fn closed_diagnostics_keep_the_exit_code() {
        use crate::convert::tests::Closed;

        assert_eq!(run(["ansi2png"], |_| None, &mut Closed), 1);
        assert_eq!(run(["ansi2png", "-missing.ans", "out.png"], |_| None, &mut Closed), 1);
    }

    #[test]
    fn parses_two_paths() {
        let args = Args::from_operands(["ansi2png", "a.ans", "b.png"]).unwrap();
        assert_eq!(args.input, PathBuf::from("a.ans"));
        assert_eq!(args.output, PathBuf::from("b.png"));
    }
}
