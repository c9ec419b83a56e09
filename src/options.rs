//! Render options and their environment overrides.

use crate::font::Font;
use thiserror::Error;

pub const ENV_FONT: &str = "ANSILOVE_FONT";
pub const ENV_SCALE: &str = "ANSILOVE_SCALE";
pub const ENV_BITS: &str = "ANSILOVE_BITS";
pub const ENV_COLUMNS: &str = "ANSILOVE_COLUMNS";
pub const ENV_MODE: &str = "ANSILOVE_MODE";
pub const ENV_ICECOLORS: &str = "ANSILOVE_ICECOLORS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Ced,
    Transparent,
    Workbench,
}

impl Mode {
    /// Matches `ced`, `transparent` and `workbench` in any letter case.
    pub fn from_token(token: &str) -> Option<Mode> {
        [
            ("ced", Mode::Ced),
            ("transparent", Mode::Transparent),
            ("workbench", Mode::Workbench),
        ]
        .into_iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(token))
        .map(|(_, mode)| mode)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub font: Font,
    /// 0 and 1 both mean no scaling.
    pub scale_factor: u8,
    pub bits: u8,
    /// 0 lets the renderer pick.
    pub columns: i16,
    pub mode: Mode,
    pub icecolors: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            font: Font::default(),
            scale_factor: 0,
            bits: 8,
            columns: 0,
            mode: Mode::Normal,
            icecolors: false,
        }
    }
}

/// Non-fatal problems found while reading overrides.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionWarning {
    #[error("unknown font '{0}', using {fallback}", fallback = Font::default().name())]
    UnknownFont(String),
}

impl RenderOptions {
    /// Merge environment overrides into the options. `lookup` returns the
    /// value of a variable, or `None` when it is unset.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Vec<OptionWarning> {
        let mut warnings = Vec::new();

        if let Some(name) = lookup(ENV_FONT) {
            self.font = Font::from_name(&name).unwrap_or_else(|| {
                warnings.push(OptionWarning::UnknownFont(name.clone()));
                Font::default()
            });
        }
        if let Some(value) = lookup(ENV_SCALE) {
            self.scale_factor = atoi(&value) as u8;
        }
        if let Some(value) = lookup(ENV_BITS) {
            self.bits = atoi(&value) as u8;
        }
        if let Some(value) = lookup(ENV_COLUMNS) {
            self.columns = atoi(&value) as i16;
        }
        if let Some(mode) = lookup(ENV_MODE).as_deref().and_then(Mode::from_token) {
            self.mode = mode;
        }
        if lookup(ENV_ICECOLORS).as_deref() == Some("1") {
            self.icecolors = true;
        }

        warnings
    }
}

/// C `atoi`: skips leading whitespace, takes an optional sign and the
/// leading digits. Anything unparsable yields 0; overflow wraps.
pub fn atoi(text: &str) -> i32 {
    let text = text.trim_start_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r'));
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i32, |acc, digit| {
            acc.wrapping_mul(10).wrapping_add(i32::from(digit - b'0'))
        });

    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn resolve(vars: &[(&str, &str)]) -> (RenderOptions, Vec<OptionWarning>) {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut options = RenderOptions::default();
        let warnings = options.apply_env(|key| env.get(key).cloned());
        (options, warnings)
    }

    #[test]
    fn atoi_is_permissive() {
        assert_eq!(atoi("42"), 42);
        assert_eq!(atoi("  -7"), -7);
        assert_eq!(atoi("+3x"), 3);
        assert_eq!(atoi("12abc"), 12);
        assert_eq!(atoi("abc"), 0);
        assert_eq!(atoi(""), 0);
        assert_eq!(atoi("- 5"), 0);
        assert_eq!(atoi("\t9"), 9);
    }

    #[test]
    fn empty_environment_keeps_defaults() {
        let (options, warnings) = resolve(&[]);
        assert_eq!(options, RenderOptions::default());
        assert_eq!(options.bits, 8);
        assert!(warnings.is_empty());
    }

    #[test]
    fn font_names_match_in_any_case() {
        for name in ["cp437", "CP437", "Cp437"] {
            let (options, warnings) = resolve(&[(ENV_FONT, name)]);
            assert_eq!(options.font, Font::Cp437);
            assert!(warnings.is_empty());
        }
        let (options, _) = resolve(&[(ENV_FONT, "topaz")]);
        assert_eq!(options.font, Font::Topaz);
    }

    #[test]
    fn unknown_font_warns_once_and_falls_back() {
        let (options, warnings) = resolve(&[(ENV_FONT, "Wingdings")]);
        assert_eq!(options.font, Font::Cp437);
        assert_eq!(warnings, vec![OptionWarning::UnknownFont("Wingdings".into())]);
        assert_eq!(warnings[0].to_string(), "unknown font 'Wingdings', using CP437");
    }

    #[test]
    fn numeric_overrides_truncate_like_c() {
        let (options, _) = resolve(&[
            (ENV_SCALE, "2"),
            (ENV_BITS, "9"),
            (ENV_COLUMNS, "160"),
        ]);
        assert_eq!(options.scale_factor, 2);
        assert_eq!(options.bits, 9);
        assert_eq!(options.columns, 160);

        let (options, _) = resolve(&[
            (ENV_SCALE, "258"),
            (ENV_BITS, "nine"),
            (ENV_COLUMNS, "-1"),
        ]);
        assert_eq!(options.scale_factor, 2);
        assert_eq!(options.bits, 0);
        assert_eq!(options.columns, -1);
    }

    #[test]
    fn mode_tokens() {
        let (options, _) = resolve(&[(ENV_MODE, "CED")]);
        assert_eq!(options.mode, Mode::Ced);
        let (options, _) = resolve(&[(ENV_MODE, "Transparent")]);
        assert_eq!(options.mode, Mode::Transparent);
        let (options, _) = resolve(&[(ENV_MODE, "workbench")]);
        assert_eq!(options.mode, Mode::Workbench);
    }

    #[test]
    fn unknown_mode_is_silently_ignored() {
        let (options, warnings) = resolve(&[(ENV_MODE, "amiga")]);
        assert_eq!(options.mode, Mode::Normal);
        assert!(warnings.is_empty());
    }

    #[test]
    fn icecolors_requires_exactly_one() {
        assert!(resolve(&[(ENV_ICECOLORS, "1")]).0.icecolors);
        for value in ["0", "true", "", " 1", "yes"] {
            assert!(!resolve(&[(ENV_ICECOLORS, value)]).0.icecolors, "{value}");
        }
        assert!(!resolve(&[]).0.icecolors);
    }
}
