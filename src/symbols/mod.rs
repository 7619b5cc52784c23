//! Symbol tables mapping characters and control-sequence names to typed
//! leaves.
//!
//! Two tables, one per [`Mode`]; each entry classifies the symbol as an atom
//! family or a non-atom leaf kind and optionally names the Unicode character
//! it renders as. Entries registered with `accept_unicode_char` are keyed by
//! that character as well, which is how `α` resolves next to `\alpha`.

mod types;
use crate::namespace::KeyMap;
pub use types::{Atom, CharInfo, Font, Group, Mode, NonAtom};

/// Per-mode symbol tables. Read-only once built.
pub struct Symbols {
    math: KeyMap<String, CharInfo>,
    text: KeyMap<String, CharInfo>,
}

impl Default for Symbols {
    fn default() -> Self {
        Self::new()
    }
}

impl Symbols {
    #[must_use]
    pub fn new() -> Self {
        Self {
            math: KeyMap::default(),
            text: KeyMap::default(),
        }
    }

    /// Registers `name` in `mode`. When `accept_unicode_char` is set and a
    /// replacement character is given, the character itself becomes a key
    /// with the same entry.
    pub fn define_symbol(
        &mut self,
        mode: Mode,
        font: Font,
        group: Group,
        replace: Option<char>,
        name: &str,
        accept_unicode_char: bool,
    ) {
        let char_info = CharInfo {
            font,
            group,
            replace,
        };

        let table = match mode {
            Mode::Math => &mut self.math,
            Mode::Text => &mut self.text,
        };

        table.insert(name.to_owned(), char_info.clone());

        if accept_unicode_char && let Some(c) = replace {
            table.insert(c.to_string(), char_info);
        }
    }

    #[must_use]
    pub fn get(&self, mode: Mode, name: &str) -> Option<&CharInfo> {
        match mode {
            Mode::Math => self.math.get(name),
            Mode::Text => self.text.get(name),
        }
    }

    #[must_use]
    pub fn contains(&self, mode: Mode, name: &str) -> bool {
        self.get(mode, name).is_some()
    }
}

/// Builds the default symbol tables.
///
/// The listing follows the classification of the original tables: atom
/// families first, then ordinary symbols, spacing, accents and the per-mode
/// character loops. It is intentionally a subset — rare symbols can be added
/// entry by entry as needed.
#[must_use]
pub fn create_symbols() -> Symbols {
    use Atom::{Bin, Close, Inner, Open, Punct, Rel};
    use Font::{Ams, Main};
    use Mode::{Math, Text};
    use NonAtom::{AccentToken, MathOrd, OpToken, Spacing, TextOrd};

    let mut s = Symbols::new();

    let mut def = |mode: Mode, font: Font, group: Group, replace: Option<char>, name: &str, accept: bool| {
        s.define_symbol(mode, font, group, replace, name, accept);
    };

    // Relations
    def(Math, Main, Group::Atom(Rel), Some('='), "=", false);
    def(Math, Main, Group::Atom(Rel), Some('<'), "<", false);
    def(Math, Main, Group::Atom(Rel), Some('>'), ">", false);
    def(Math, Main, Group::Atom(Rel), Some(':'), ":", false);
    def(Math, Main, Group::Atom(Rel), Some('<'), "\\lt", false);
    def(Math, Main, Group::Atom(Rel), Some('>'), "\\gt", false);
    def(Math, Main, Group::Atom(Rel), Some('\u{2264}'), "\\leq", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{2265}'), "\\geq", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{2264}'), "\\le", false);
    def(Math, Main, Group::Atom(Rel), Some('\u{2265}'), "\\ge", false);
    def(Math, Main, Group::Atom(Rel), Some('\u{2260}'), "\\neq", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{2260}'), "\\ne", false);
    def(Math, Main, Group::Atom(Rel), Some('\u{2208}'), "\\in", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{220b}'), "\\ni", true);
    def(Math, Ams, Group::Atom(Rel), Some('\u{2209}'), "\\notin", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{2282}'), "\\subset", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{2283}'), "\\supset", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{2286}'), "\\subseteq", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{2287}'), "\\supseteq", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{2261}'), "\\equiv", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{2248}'), "\\approx", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{2245}'), "\\cong", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{223c}'), "\\sim", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{2243}'), "\\simeq", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{221d}'), "\\propto", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{2223}'), "\\mid", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{2225}'), "\\parallel", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{22a5}'), "\\perp", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{22a2}'), "\\vdash", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{22a3}'), "\\dashv", true);
    def(Math, Ams, Group::Atom(Rel), Some('\u{2270}'), "\\nleq", true);
    def(Math, Ams, Group::Atom(Rel), Some('\u{2271}'), "\\ngeq", true);

    // Arrows
    def(Math, Main, Group::Atom(Rel), Some('\u{2190}'), "\\leftarrow", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{2190}'), "\\gets", false);
    def(Math, Main, Group::Atom(Rel), Some('\u{2192}'), "\\rightarrow", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{2192}'), "\\to", false);
    def(Math, Main, Group::Atom(Rel), Some('\u{21d0}'), "\\Leftarrow", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{21d2}'), "\\Rightarrow", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{2194}'), "\\leftrightarrow", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{21d4}'), "\\Leftrightarrow", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{21a6}'), "\\mapsto", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{27f5}'), "\\longleftarrow", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{27f6}'), "\\longrightarrow", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{27f7}'), "\\longleftrightarrow", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{27f8}'), "\\Longleftarrow", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{27f9}'), "\\Longrightarrow", true);
    def(Math, Main, Group::Atom(Rel), Some('\u{27fa}'), "\\Longleftrightarrow", true);

    // Binary operators
    def(Math, Main, Group::Atom(Bin), Some('+'), "+", false);
    def(Math, Main, Group::Atom(Bin), Some('\u{2212}'), "-", false);
    def(Math, Main, Group::Atom(Bin), Some('\u{2217}'), "*", false);
    def(Math, Main, Group::Atom(Bin), Some('\u{00b1}'), "\\pm", true);
    def(Math, Main, Group::Atom(Bin), Some('\u{2213}'), "\\mp", true);
    def(Math, Main, Group::Atom(Bin), Some('\u{22c5}'), "\\cdot", true);
    def(Math, Main, Group::Atom(Bin), Some('\u{00d7}'), "\\times", true);
    def(Math, Main, Group::Atom(Bin), Some('\u{00f7}'), "\\div", true);
    def(Math, Main, Group::Atom(Bin), Some('\u{2217}'), "\\ast", false);
    def(Math, Main, Group::Atom(Bin), Some('\u{222a}'), "\\cup", true);
    def(Math, Main, Group::Atom(Bin), Some('\u{2229}'), "\\cap", true);
    def(Math, Main, Group::Atom(Bin), Some('\u{2216}'), "\\setminus", true);
    def(Math, Main, Group::Atom(Bin), Some('\u{2227}'), "\\wedge", true);
    def(Math, Main, Group::Atom(Bin), Some('\u{2228}'), "\\vee", true);
    def(Math, Main, Group::Atom(Bin), Some('\u{2227}'), "\\land", false);
    def(Math, Main, Group::Atom(Bin), Some('\u{2228}'), "\\lor", false);
    def(Math, Main, Group::Atom(Bin), Some('\u{2295}'), "\\oplus", true);
    def(Math, Main, Group::Atom(Bin), Some('\u{2297}'), "\\otimes", true);
    def(Math, Main, Group::Atom(Bin), Some('\u{2296}'), "\\ominus", true);
    def(Math, Main, Group::Atom(Bin), Some('\u{2218}'), "\\circ", true);
    def(Math, Main, Group::Atom(Bin), Some('\u{2219}'), "\\bullet", true);

    // Delimiters
    def(Math, Main, Group::Atom(Open), Some('('), "(", false);
    def(Math, Main, Group::Atom(Open), Some('['), "[", false);
    def(Math, Main, Group::Atom(Open), Some('['), "\\lbrack", true);
    def(Math, Main, Group::Atom(Open), Some('{'), "\\{", false);
    def(Math, Main, Group::Atom(Open), Some('{'), "\\lbrace", false);
    def(Math, Main, Group::Atom(Open), Some('\u{27e8}'), "\\langle", true);
    def(Math, Main, Group::Atom(Open), Some('\u{230a}'), "\\lfloor", true);
    def(Math, Main, Group::Atom(Open), Some('\u{2308}'), "\\lceil", true);
    def(Math, Main, Group::Atom(Close), Some(')'), ")", false);
    def(Math, Main, Group::Atom(Close), Some(']'), "]", false);
    def(Math, Main, Group::Atom(Close), Some(']'), "\\rbrack", true);
    def(Math, Main, Group::Atom(Close), Some('}'), "\\}", false);
    def(Math, Main, Group::Atom(Close), Some('}'), "\\rbrace", false);
    def(Math, Main, Group::Atom(Close), Some('\u{27e9}'), "\\rangle", true);
    def(Math, Main, Group::Atom(Close), Some('\u{230b}'), "\\rfloor", true);
    def(Math, Main, Group::Atom(Close), Some('\u{2309}'), "\\rceil", true);
    def(Math, Main, Group::Atom(Close), Some('?'), "?", false);
    def(Math, Main, Group::Atom(Close), Some('!'), "!", false);
    def(Math, Main, Group::NonAtom(TextOrd), Some('|'), "|", false);
    def(Math, Main, Group::NonAtom(TextOrd), Some('\u{2223}'), "\\vert", false);
    def(Math, Main, Group::NonAtom(TextOrd), Some('\u{2225}'), "\\|", false);
    def(Math, Main, Group::NonAtom(TextOrd), Some('\u{2225}'), "\\Vert", false);

    // Punctuation
    def(Math, Main, Group::Atom(Punct), Some(','), ",", false);
    def(Math, Main, Group::Atom(Punct), Some(';'), ";", false);

    // Inner dots
    def(Math, Main, Group::Atom(Inner), Some('\u{22ef}'), "\\cdots", true);
    def(Math, Main, Group::Atom(Inner), Some('\u{2026}'), "\\ldots", true);
    def(Math, Main, Group::Atom(Inner), Some('\u{22f1}'), "\\ddots", true);
    def(Math, Main, Group::NonAtom(MathOrd), Some('\u{22ee}'), "\\vdots", true);

    // Greek letters
    let greek: &[(&str, char)] = &[
        ("\\alpha", '\u{3b1}'),
        ("\\beta", '\u{3b2}'),
        ("\\gamma", '\u{3b3}'),
        ("\\delta", '\u{3b4}'),
        ("\\epsilon", '\u{3f5}'),
        ("\\varepsilon", '\u{3b5}'),
        ("\\zeta", '\u{3b6}'),
        ("\\eta", '\u{3b7}'),
        ("\\theta", '\u{3b8}'),
        ("\\vartheta", '\u{3d1}'),
        ("\\iota", '\u{3b9}'),
        ("\\kappa", '\u{3ba}'),
        ("\\lambda", '\u{3bb}'),
        ("\\mu", '\u{3bc}'),
        ("\\nu", '\u{3bd}'),
        ("\\xi", '\u{3be}'),
        ("\\omicron", 'o'),
        ("\\pi", '\u{3c0}'),
        ("\\varpi", '\u{3d6}'),
        ("\\rho", '\u{3c1}'),
        ("\\varrho", '\u{3f1}'),
        ("\\sigma", '\u{3c3}'),
        ("\\varsigma", '\u{3c2}'),
        ("\\tau", '\u{3c4}'),
        ("\\upsilon", '\u{3c5}'),
        ("\\phi", '\u{3d5}'),
        ("\\varphi", '\u{3c6}'),
        ("\\chi", '\u{3c7}'),
        ("\\psi", '\u{3c8}'),
        ("\\omega", '\u{3c9}'),
        ("\\Gamma", '\u{393}'),
        ("\\Delta", '\u{394}'),
        ("\\Theta", '\u{398}'),
        ("\\Lambda", '\u{39b}'),
        ("\\Xi", '\u{39e}'),
        ("\\Pi", '\u{3a0}'),
        ("\\Sigma", '\u{3a3}'),
        ("\\Upsilon", '\u{3a5}'),
        ("\\Phi", '\u{3a6}'),
        ("\\Psi", '\u{3a8}'),
        ("\\Omega", '\u{3a9}'),
    ];
    for &(name, ch) in greek {
        def(Math, Main, Group::NonAtom(MathOrd), Some(ch), name, true);
    }

    // Other ordinary math symbols
    def(Math, Main, Group::NonAtom(MathOrd), Some('\u{221e}'), "\\infty", true);
    def(Math, Main, Group::NonAtom(MathOrd), Some('\u{2032}'), "\\prime", false);
    def(Math, Main, Group::NonAtom(MathOrd), Some('\u{2202}'), "\\partial", true);
    def(Math, Main, Group::NonAtom(MathOrd), Some('\u{2207}'), "\\nabla", true);
    def(Math, Main, Group::NonAtom(MathOrd), Some('\u{210f}'), "\\hbar", true);
    def(Math, Main, Group::NonAtom(MathOrd), Some('\u{2205}'), "\\emptyset", true);
    def(Math, Ams, Group::NonAtom(MathOrd), Some('\u{2205}'), "\\varnothing", false);
    def(Math, Main, Group::NonAtom(MathOrd), Some('\u{2200}'), "\\forall", true);
    def(Math, Main, Group::NonAtom(MathOrd), Some('\u{2203}'), "\\exists", true);
    def(Math, Main, Group::NonAtom(MathOrd), Some('\u{00ac}'), "\\neg", true);
    def(Math, Main, Group::NonAtom(MathOrd), Some('\u{00ac}'), "\\lnot", false);
    def(Math, Main, Group::NonAtom(MathOrd), Some('\u{22a4}'), "\\top", true);
    def(Math, Main, Group::NonAtom(MathOrd), Some('\u{22a5}'), "\\bot", true);
    def(Math, Main, Group::NonAtom(MathOrd), Some('\u{2220}'), "\\angle", true);
    def(Math, Main, Group::NonAtom(MathOrd), Some('\u{25b3}'), "\\triangle", true);

    // Big operator symbols. The function registry owns these names during
    // parsing; the table entries classify the glyphs themselves.
    let big_ops: &[(&str, char)] = &[
        ("\\sum", '\u{2211}'),
        ("\\prod", '\u{220f}'),
        ("\\coprod", '\u{2210}'),
        ("\\int", '\u{222b}'),
        ("\\oint", '\u{222e}'),
        ("\\bigvee", '\u{22c1}'),
        ("\\bigwedge", '\u{22c0}'),
        ("\\bigcap", '\u{22c2}'),
        ("\\bigcup", '\u{22c3}'),
        ("\\smallint", '\u{222b}'),
    ];
    for &(name, ch) in big_ops {
        def(Math, Main, Group::NonAtom(OpToken), Some(ch), name, false);
    }

    // Math-mode accent characters
    let accents: &[(&str, char)] = &[
        ("\\acute", '\u{02ca}'),
        ("\\grave", '\u{02cb}'),
        ("\\ddot", '\u{00a8}'),
        ("\\tilde", '~'),
        ("\\bar", '\u{02c9}'),
        ("\\breve", '\u{02d8}'),
        ("\\check", '\u{02c7}'),
        ("\\hat", '^'),
        ("\\vec", '\u{20d7}'),
        ("\\dot", '\u{02d9}'),
        ("\\mathring", '\u{02da}'),
    ];
    for &(name, ch) in accents {
        def(Math, Main, Group::NonAtom(AccentToken), Some(ch), name, false);
    }

    // Escaped specials, both modes
    for (name, ch) in [("\\$", '$'), ("\\%", '%'), ("\\#", '#'), ("\\&", '&'), ("\\_", '_')] {
        def(Math, Main, Group::NonAtom(TextOrd), Some(ch), name, false);
        def(Text, Main, Group::NonAtom(TextOrd), Some(ch), name, false);
    }

    // Spacing. In text mode the bare space is significant and resolves here.
    def(Text, Main, Group::NonAtom(Spacing), Some('\u{a0}'), " ", false);
    for name in ["\\ ", "~", "\\space", "\\nobreakspace"] {
        def(Math, Main, Group::NonAtom(Spacing), Some('\u{a0}'), name, false);
        def(Text, Main, Group::NonAtom(Spacing), Some('\u{a0}'), name, false);
    }
    for name in ["\\,", "\\;", "\\:", "\\!", "\\enspace", "\\quad", "\\qquad"] {
        def(Math, Main, Group::NonAtom(Spacing), None, name, false);
        def(Text, Main, Group::NonAtom(Spacing), None, name, false);
    }

    // Letters and digits
    for ch in '0'..='9' {
        let name = ch.to_string();
        def(Math, Main, Group::NonAtom(TextOrd), Some(ch), &name, false);
        def(Text, Main, Group::NonAtom(TextOrd), Some(ch), &name, false);
    }
    for ch in ('a'..='z').chain('A'..='Z') {
        let name = ch.to_string();
        def(Math, Main, Group::NonAtom(MathOrd), Some(ch), &name, false);
        def(Text, Main, Group::NonAtom(TextOrd), Some(ch), &name, false);
    }

    // Dotless i and j, targets of the accented-letter normalization
    for ch in ['\u{131}', '\u{237}'] {
        let name = ch.to_string();
        def(Math, Main, Group::NonAtom(MathOrd), Some(ch), &name, false);
        def(Text, Main, Group::NonAtom(TextOrd), Some(ch), &name, false);
    }
    def(Text, Main, Group::NonAtom(TextOrd), Some('\u{131}'), "\\i", true);
    def(Text, Main, Group::NonAtom(TextOrd), Some('\u{237}'), "\\j", true);

    // Latin-1 letters that render in math mode only under protest
    for ch in ['\u{c7}', '\u{d0}', '\u{de}', '\u{e7}', '\u{fe}'] {
        let name = ch.to_string();
        def(Math, Main, Group::NonAtom(MathOrd), Some(ch), &name, false);
        def(Text, Main, Group::NonAtom(TextOrd), Some(ch), &name, false);
    }

    // Remaining ASCII, per mode
    for ch in "/@.\"".chars() {
        let name = ch.to_string();
        def(Math, Main, Group::NonAtom(TextOrd), Some(ch), &name, false);
    }
    def(Math, Main, Group::NonAtom(TextOrd), Some('\u{2018}'), "`", false);
    for ch in "#&'\u{2019}*()-\u{2013}\u{2014}[]<>\u{2018}!\"/:;=?.,@|`+\u{201c}\u{201d}".chars() {
        let name = ch.to_string();
        def(Text, Main, Group::NonAtom(TextOrd), Some(ch), &name, false);
    }

    // Text-mode ligature targets carry their full spelling as the key
    def(Text, Main, Group::NonAtom(TextOrd), Some('\u{2013}'), "--", false);
    def(Text, Main, Group::NonAtom(TextOrd), Some('\u{2014}'), "---", false);
    def(Text, Main, Group::NonAtom(TextOrd), Some('\u{2018}'), "`", false);
    def(Text, Main, Group::NonAtom(TextOrd), Some('\u{201c}'), "``", false);
    def(Text, Main, Group::NonAtom(TextOrd), Some('\u{201d}'), "''", false);

    s
}
