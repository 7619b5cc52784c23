use strum_macros::{AsRefStr, Display};

/// Parsing mode: mathematical notation or embedded text.
///
/// The mode decides which symbol table and which registered functions apply,
/// whether spaces are significant, and a handful of normalizations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Math,
    Text,
}

/// Font family a symbol is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    /// The primary symbol font.
    Main,
    /// The AMS extension font.
    Ams,
}

/// Spacing family of a math atom, per the TeXbook's classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Atom {
    /// Binary operator, e.g. `+`.
    Bin,
    /// Closing delimiter, e.g. `)`.
    Close,
    /// Inner construct, e.g. `\cdots`.
    Inner,
    /// Opening delimiter, e.g. `(`.
    Open,
    /// Punctuation, e.g. `,`.
    Punct,
    /// Relation, e.g. `=`.
    Rel,
}

/// Symbol classes outside the atom spacing families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonAtom {
    /// Standalone accent character.
    AccentToken,
    /// Ordinary math symbol.
    MathOrd,
    /// Operator-like symbol.
    OpToken,
    /// Explicit spacing command.
    Spacing,
    /// Ordinary text symbol.
    TextOrd,
}

/// Classification of a symbol table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Atom(Atom),
    NonAtom(NonAtom),
}

/// One symbol table entry.
#[derive(Debug, Clone)]
pub struct CharInfo {
    /// Font the glyph comes from.
    pub font: Font,
    /// Spacing/classification group.
    pub group: Group,
    /// Unicode character the name renders as, when it differs from the name.
    pub replace: Option<char>,
}
