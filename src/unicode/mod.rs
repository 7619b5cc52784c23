//! Unicode support tables: accent folding, precomposed-character expansion,
//! and the script ranges the renderer downstream can actually display.

mod unicode_accents;
mod unicode_symbols;

pub use unicode_accents::{AccentMapping, UNICODE_ACCENTS};
pub use unicode_symbols::UNICODE_SYMBOLS;

use phf::phf_set;

/// Text-mode Latin-1 letters the symbol table admits in math mode only with
/// a non-strict diagnostic.
pub const EXTRA_LATIN: phf::Set<&'static str> = phf_set! {
    "\u{c7}", // Ç
    "\u{d0}", // Ð
    "\u{de}", // Þ
    "\u{e7}", // ç
    "\u{fe}", // þ
};

/// The LaTeX equivalents of a combining mark, if it is one we know.
#[must_use]
pub fn get_accent_mapping(ch: char) -> Option<&'static AccentMapping> {
    UNICODE_ACCENTS.get(&ch)
}

/// Unicode blocks, beyond the symbol tables, whose characters render as text.
/// Codepoints outside these blocks draw the `unknownSymbol` diagnostic.
const SUPPORTED_SCRIPT_RANGES: &[(u32, u32)] = &[
    // Latin Extended plus combining marks
    (0x0100, 0x024f),
    (0x0300, 0x036f),
    // Cyrillic
    (0x0400, 0x04ff),
    // Armenian
    (0x0530, 0x058f),
    // Brahmic scripts
    (0x0900, 0x109f),
    // Georgian
    (0x10a0, 0x10ff),
    // CJK symbols, kana, unified ideographs, fullwidth forms
    (0x3000, 0x30ff),
    (0x4e00, 0x9faf),
    (0xff00, 0xff60),
    // Hangul
    (0xac00, 0xd7af),
];

/// Whether a codepoint belongs to a script with rendering support.
#[must_use]
pub fn supported_codepoint(codepoint: u32) -> bool {
    codepoint < 0x80
        || SUPPORTED_SCRIPT_RANGES
            .iter()
            .any(|&(lo, hi)| (lo..=hi).contains(&codepoint))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_scripts() {
        assert!(supported_codepoint('x' as u32));
        assert!(supported_codepoint('\u{0416}' as u32)); // Ж
        assert!(supported_codepoint('\u{4e2d}' as u32)); // 中
        assert!(!supported_codepoint('\u{1f600}' as u32)); // emoji
    }
}
