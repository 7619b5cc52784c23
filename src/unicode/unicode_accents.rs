use phf::phf_map;

/// Control sequences equivalent to a combining accent character, per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccentMapping {
    /// Text-mode command.
    pub text: &'static str,
    /// Math-mode command; `None` when the accent has no math form.
    pub math: Option<&'static str>,
}

/// Combining diacritical marks the parser can fold into accent nodes.
pub const UNICODE_ACCENTS: phf::Map<char, AccentMapping> = phf_map! {
    // acute
    '\u{0301}' => AccentMapping { text: "\\'", math: Some("\\acute") },
    // grave
    '\u{0300}' => AccentMapping { text: "\\`", math: Some("\\grave") },
    // diaeresis
    '\u{0308}' => AccentMapping { text: "\\\"", math: Some("\\ddot") },
    // tilde
    '\u{0303}' => AccentMapping { text: "\\~", math: Some("\\tilde") },
    // macron
    '\u{0304}' => AccentMapping { text: "\\=", math: Some("\\bar") },
    // breve
    '\u{0306}' => AccentMapping { text: "\\u", math: Some("\\breve") },
    // caron
    '\u{030c}' => AccentMapping { text: "\\v", math: Some("\\check") },
    // circumflex
    '\u{0302}' => AccentMapping { text: "\\^", math: Some("\\hat") },
    // dot above
    '\u{0307}' => AccentMapping { text: "\\.", math: Some("\\dot") },
    // ring above
    '\u{030a}' => AccentMapping { text: "\\r", math: Some("\\mathring") },
    // double acute
    '\u{030b}' => AccentMapping { text: "\\H", math: None },
    // cedilla
    '\u{0327}' => AccentMapping { text: "\\c", math: None },
};
