//! Bitmap font identifiers and the code pages they decode.

use font8x8::{
    UnicodeFonts, BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, GREEK_FONTS, LATIN_FONTS, MISC_FONTS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    #[default]
    Cp437,
    Cp437x50,
    Cp737,
    Cp775,
    Cp850,
    Cp852,
    Cp855,
    Cp857,
    Cp860,
    Cp861,
    Cp862,
    Cp863,
    Cp865,
    Cp866,
    Cp869,
    Terminus,
    Spleen,
    MicroKnight,
    MicroKnightPlus,
    Mosoul,
    PotNoodle,
    Topaz,
    TopazPlus,
    Topaz500,
    Topaz500Plus,
}

/// Names accepted for `ANSILOVE_FONT`, in lookup order.
pub const FONTS: &[(&str, Font)] = &[
    ("CP437", Font::Cp437),
    ("CP437_80x50", Font::Cp437x50),
    ("CP737", Font::Cp737),
    ("CP775", Font::Cp775),
    ("CP850", Font::Cp850),
    ("CP852", Font::Cp852),
    ("CP855", Font::Cp855),
    ("CP857", Font::Cp857),
    ("CP860", Font::Cp860),
    ("CP861", Font::Cp861),
    ("CP862", Font::Cp862),
    ("CP863", Font::Cp863),
    ("CP865", Font::Cp865),
    ("CP866", Font::Cp866),
    ("CP869", Font::Cp869),
    ("TERMINUS", Font::Terminus),
    ("SPLEEN", Font::Spleen),
    ("MICROKNIGHT", Font::MicroKnight),
    ("MICROKNIGHT_PLUS", Font::MicroKnightPlus),
    ("MOSOUL", Font::Mosoul),
    ("POT_NOODLE", Font::PotNoodle),
    ("TOPAZ", Font::Topaz),
    ("TOPAZ_PLUS", Font::TopazPlus),
    ("TOPAZ500", Font::Topaz500),
    ("TOPAZ500_PLUS", Font::Topaz500Plus),
];

/// How input bytes map to glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Cp437,
    Latin1,
}

impl Font {
    /// Case-insensitive lookup in [`FONTS`].
    pub fn from_name(name: &str) -> Option<Font> {
        FONTS
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|&(_, font)| font)
    }

    pub fn name(self) -> &'static str {
        FONTS
            .iter()
            .find(|&&(_, font)| font == self)
            .map_or("CP437", |&(name, _)| name)
    }

    /// Amiga fonts are ISO-8859-1 and always 8 pixels wide.
    pub fn is_amiga(self) -> bool {
        matches!(
            self,
            Font::MicroKnight
                | Font::MicroKnightPlus
                | Font::Mosoul
                | Font::PotNoodle
                | Font::Topaz
                | Font::TopazPlus
                | Font::Topaz500
                | Font::Topaz500Plus
        )
    }

    pub fn charset(self) -> Charset {
        if self.is_amiga() {
            Charset::Latin1
        } else {
            Charset::Cp437
        }
    }

    pub fn cell_height(self) -> u32 {
        match self {
            Font::Cp437x50 => 8,
            _ => 16,
        }
    }
}

#[rustfmt::skip]
const CP437_LOW: [char; 32] = [
    '\0', '☺', '☻', '♥', '♦', '♣', '♠', '•', '◘', '○', '◙', '♂', '♀', '♪', '♫', '☼',
    '►', '◄', '↕', '‼', '¶', '§', '▬', '↨', '↑', '↓', '→', '←', '∟', '↔', '▲', '▼',
];

#[rustfmt::skip]
const CP437_HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{a0}',
];

impl Charset {
    pub fn decode(self, byte: u8) -> char {
        match (self, byte) {
            (Charset::Cp437, 0x00..=0x1F) => CP437_LOW[usize::from(byte)],
            (Charset::Cp437, 0x7F) => '⌂',
            (Charset::Cp437, 0x80..=0xFF) => CP437_HIGH[usize::from(byte - 0x80)],
            _ => char::from(byte),
        }
    }
}

/// Decode CP437 text, as stored in SAUCE fields.
pub fn decode_cp437(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| Charset::Cp437.decode(b)).collect()
}

/// One 8×8 bitmap per byte value. Bit 0 of each row is the leftmost pixel.
pub struct GlyphSet {
    glyphs: Vec<[u8; 8]>,
}

impl GlyphSet {
    pub fn for_font(font: Font) -> Self {
        let charset = font.charset();
        let glyphs = (0..=u8::MAX)
            .map(|byte| lookup_glyph(charset.decode(byte)))
            .collect();
        Self { glyphs }
    }

    pub fn glyph(&self, byte: u8) -> &[u8; 8] {
        &self.glyphs[usize::from(byte)]
    }
}

fn lookup_glyph(ch: char) -> [u8; 8] {
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BOX_FONTS.get(ch))
        .or_else(|| BLOCK_FONTS.get(ch))
        .or_else(|| GREEK_FONTS.get(ch))
        .or_else(|| MISC_FONTS.get(ch))
        .unwrap_or([0; 8])
}
