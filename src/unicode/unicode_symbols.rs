//! Precomposed accented characters and their decompositions.
//!
//! The parser rewrites a precomposed character that has no symbol table entry
//! into its base letter followed by combining marks, so `é` parses exactly
//! like `e\u{0301}` and gets folded into an accent node downstream.

use phf::phf_map;

/// NFC-composed character → base character plus combining marks.
pub const UNICODE_SYMBOLS: phf::Map<char, &'static str> = phf_map! {
    '\u{e0}' => "a\u{300}",
    '\u{e1}' => "a\u{301}",
    '\u{e2}' => "a\u{302}",
    '\u{e3}' => "a\u{303}",
    '\u{e4}' => "a\u{308}",
    '\u{e5}' => "a\u{30a}",
    '\u{101}' => "a\u{304}",
    '\u{103}' => "a\u{306}",
    '\u{e8}' => "e\u{300}",
    '\u{e9}' => "e\u{301}",
    '\u{ea}' => "e\u{302}",
    '\u{eb}' => "e\u{308}",
    '\u{113}' => "e\u{304}",
    '\u{11b}' => "e\u{30c}",
    '\u{ec}' => "i\u{300}",
    '\u{ed}' => "i\u{301}",
    '\u{ee}' => "i\u{302}",
    '\u{ef}' => "i\u{308}",
    '\u{12b}' => "i\u{304}",
    '\u{f2}' => "o\u{300}",
    '\u{f3}' => "o\u{301}",
    '\u{f4}' => "o\u{302}",
    '\u{f5}' => "o\u{303}",
    '\u{f6}' => "o\u{308}",
    '\u{14d}' => "o\u{304}",
    '\u{151}' => "o\u{30b}",
    '\u{f9}' => "u\u{300}",
    '\u{fa}' => "u\u{301}",
    '\u{fb}' => "u\u{302}",
    '\u{fc}' => "u\u{308}",
    '\u{16b}' => "u\u{304}",
    '\u{16d}' => "u\u{306}",
    '\u{171}' => "u\u{30b}",
    '\u{fd}' => "y\u{301}",
    '\u{ff}' => "y\u{308}",
    '\u{f1}' => "n\u{303}",
    '\u{144}' => "n\u{301}",
    '\u{148}' => "n\u{30c}",
    '\u{107}' => "c\u{301}",
    '\u{10d}' => "c\u{30c}",
    '\u{15b}' => "s\u{301}",
    '\u{161}' => "s\u{30c}",
    '\u{17a}' => "z\u{301}",
    '\u{17c}' => "z\u{307}",
    '\u{17e}' => "z\u{30c}",
    '\u{159}' => "r\u{30c}",
    '\u{c0}' => "A\u{300}",
    '\u{c1}' => "A\u{301}",
    '\u{c2}' => "A\u{302}",
    '\u{c3}' => "A\u{303}",
    '\u{c4}' => "A\u{308}",
    '\u{c5}' => "A\u{30a}",
    '\u{c8}' => "E\u{300}",
    '\u{c9}' => "E\u{301}",
    '\u{ca}' => "E\u{302}",
    '\u{cb}' => "E\u{308}",
    '\u{cc}' => "I\u{300}",
    '\u{cd}' => "I\u{301}",
    '\u{ce}' => "I\u{302}",
    '\u{cf}' => "I\u{308}",
    '\u{d1}' => "N\u{303}",
    '\u{d2}' => "O\u{300}",
    '\u{d3}' => "O\u{301}",
    '\u{d4}' => "O\u{302}",
    '\u{d5}' => "O\u{303}",
    '\u{d6}' => "O\u{308}",
    '\u{d9}' => "U\u{300}",
    '\u{da}' => "U\u{301}",
    '\u{db}' => "U\u{302}",
    '\u{dc}' => "U\u{308}",
    '\u{dd}' => "Y\u{301}",
    '\u{10c}' => "C\u{30c}",
    '\u{160}' => "S\u{30c}",
    '\u{17d}' => "Z\u{30c}",
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unicode::UNICODE_ACCENTS;

    #[test]
    fn test_decompositions_are_base_plus_marks() {
        for (composed, expansion) in &UNICODE_SYMBOLS {
            let mut chars = expansion.chars();
            let base = chars.next().unwrap();
            assert!(base.is_ascii_alphabetic(), "bad base for {composed:?}");
            for mark in chars {
                assert!(
                    UNICODE_ACCENTS.contains_key(&mark),
                    "mark {mark:?} of {composed:?} has no accent mapping"
                );
            }
        }
    }
}
