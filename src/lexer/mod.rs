//! The lexer: turns the raw input string into [`Token`]s on demand.
//!
//! Tokens borrow slices of the input wherever possible. A normal character
//! and any combining diacritical marks that follow it form a single token, so
//! the parser sees `e\u{0301}` as one nucleus. `\verb` constructs are matched
//! here in full, delimiters included, because their body must escape macro
//! expansion entirely.

use crate::namespace::KeyMap;
use crate::types::{ParseError, ParseErrorKind, Settings, SourceLocation, Token, TokenText};
use alloc::sync::Arc;

/// Byte index of the start of the trailing combining-mark run in `s`, or
/// `None` when `s` does not end in combining marks.
#[must_use]
pub fn last_non_combining_mark_index(s: &str) -> Option<usize> {
    let mut cut = s.len();
    for (idx, ch) in s.char_indices().rev() {
        if is_combining_mark(ch) {
            cut = idx;
        } else {
            break;
        }
    }
    (cut < s.len()).then_some(cut)
}

const fn is_combining_mark(ch: char) -> bool {
    (ch as u32) >= 0x0300 && (ch as u32) <= 0x036f
}

const fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\r' | '\n' | '\t')
}

/// What the scanner recognized at the current position.
enum Scan {
    /// Run of whitespace, collapsed to a single `" "` token.
    Space(usize),
    /// `\` followed by whitespace; collapses to the control space `"\ "`.
    ControlSpace(usize),
    /// A normal character plus trailing combining marks.
    Symbol(usize),
    /// A whole `\verb⟨delim⟩…⟨delim⟩` or `\verb*⟨delim⟩…⟨delim⟩` construct.
    Verb(usize),
    /// `\name`; the second length is trailing whitespace to swallow.
    ControlWord(usize, usize),
    /// `\` plus one non-letter character.
    ControlSymbol(usize),
    /// Anything else: one character the grammar has no place for.
    Unexpected(usize),
}

fn scan_space(s: &str) -> Option<usize> {
    let len: usize = s.chars().take_while(|&c| is_blank(c)).map(char::len_utf8).sum();
    (len > 0).then_some(len)
}

fn scan_control_space(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('\\')?;
    let mut chars = rest.chars().peekable();
    let mut len = 1;
    match chars.peek().copied()? {
        '\n' => {
            chars.next();
            len += 1;
        }
        ' ' | '\r' | '\t' => {
            while matches!(chars.peek(), Some(' ' | '\r' | '\t')) {
                len += chars.next().map_or(0, char::len_utf8);
            }
            if chars.peek() == Some(&'\n') {
                chars.next();
                len += 1;
            }
        }
        _ => return None,
    }
    while matches!(chars.peek(), Some(' ' | '\r' | '\t')) {
        len += chars.next().map_or(0, char::len_utf8);
    }
    Some(len)
}

fn scan_symbol_cluster(s: &str) -> Option<usize> {
    let mut chars = s.chars();
    let first = chars.next()?;
    let u = first as u32;
    let normal = matches!(u,
        0x0021..=0x005b | 0x005d..=0x2027 | 0x202a..=0xd7ff | 0xf900..=0xffff
    ) || u > 0xffff;
    if !normal {
        return None;
    }
    let mut len = first.len_utf8();
    for c in chars {
        if is_combining_mark(c) {
            len += c.len_utf8();
        } else {
            break;
        }
    }
    Some(len)
}

fn scan_verb(s: &str, star: bool) -> Option<usize> {
    let prefix = if star { "\\verb*" } else { "\\verb" };
    let rest = s.strip_prefix(prefix)?;

    let mut chars = rest.char_indices();
    let (_, delim) = chars.next()?;
    if !star && delim.is_ascii_alphabetic() {
        return None;
    }
    for (i, c) in chars {
        if matches!(c, '\n' | '\r') {
            return None;
        }
        if c == delim {
            return Some(prefix.len() + i + c.len_utf8());
        }
    }
    None
}

fn scan_control_word(s: &str) -> Option<(usize, usize)> {
    let rest = s.strip_prefix('\\')?;
    let word: usize = rest
        .chars()
        .take_while(|&c| c.is_ascii_alphabetic() || c == '@')
        .count();
    if word == 0 {
        return None;
    }
    let trailing: usize = rest[word..]
        .chars()
        .take_while(|&c| is_blank(c))
        .map(char::len_utf8)
        .sum();
    Some((1 + word, trailing))
}

fn scan_control_symbol(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('\\')?;
    let c = rest.chars().next()?;
    Some(1 + c.len_utf8())
}

fn scan(s: &str) -> Scan {
    if let Some(l) = scan_space(s) {
        Scan::Space(l)
    } else if let Some(l) = scan_control_space(s) {
        Scan::ControlSpace(l)
    } else if let Some(l) = scan_symbol_cluster(s) {
        Scan::Symbol(l)
    } else if let Some(l) = scan_verb(s, true).or_else(|| scan_verb(s, false)) {
        Scan::Verb(l)
    } else if let Some((l, trailing)) = scan_control_word(s) {
        Scan::ControlWord(l, trailing)
    } else if let Some(l) = scan_control_symbol(s) {
        Scan::ControlSymbol(l)
    } else {
        let len = s.chars().next().map_or(0, char::len_utf8);
        Scan::Unexpected(len)
    }
}

/// Tokenizer over one input string with per-character catcode overrides.
pub struct Lexer<'a> {
    input: Arc<str>,
    pos: usize,
    settings: &'a Settings,
    catcodes: KeyMap<char, u8>,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(input: Arc<str>, settings: &'a Settings) -> Self {
        let mut catcodes = KeyMap::default();
        catcodes.insert('%', 14); // comment character
        catcodes.insert('~', 13); // active character

        Self {
            input,
            pos: 0,
            settings,
            catcodes,
        }
    }

    /// Overrides the category code of `ch`. The URL grammar uses this to make
    /// `%` an ordinary character for the duration of the argument.
    pub fn set_catcode(&mut self, ch: char, code: u8) {
        self.catcodes.insert(ch, code);
    }

    #[must_use]
    pub fn get_catcode(&self, ch: char) -> Option<u8> {
        self.catcodes.get(&ch).copied()
    }

    fn loc(&self, start: usize, end: usize) -> Option<SourceLocation> {
        Some(SourceLocation::new(Arc::clone(&self.input), start, end))
    }

    /// Produces the next token, or the `"EOF"` sentinel at end of input.
    pub fn lex(&mut self) -> Result<Token, ParseError> {
        if self.pos >= self.input.len() {
            return Ok(Token {
                text: TokenText::Static("EOF"),
                loc: self.loc(self.pos, self.pos),
            });
        }

        let start = self.pos;
        let slice = &self.input[start..];
        let text = match scan(slice) {
            Scan::Unexpected(len) => {
                self.pos += len;
                let ch = &slice[..len];
                let token = Token::new(ch.to_owned(), self.loc(start, self.pos));
                return Err(ParseError::with_token(
                    ParseErrorKind::UnexpectedCharacter {
                        character: ch.to_owned(),
                    },
                    &token,
                ));
            }
            Scan::Space(len) => {
                self.pos += len;
                TokenText::Static(" ")
            }
            Scan::ControlSpace(len) => {
                self.pos += len;
                TokenText::Static(r"\ ")
            }
            Scan::Symbol(len) | Scan::Verb(len) | Scan::ControlSymbol(len) => {
                self.pos += len;
                TokenText::slice(Arc::clone(&self.input), start, self.pos)
            }
            Scan::ControlWord(len, trailing) => {
                self.pos += len + trailing;
                TokenText::slice(Arc::clone(&self.input), start, start + len)
            }
        };

        if text.len() == 1
            && let Some(first) = text.as_str().chars().next()
            && self.get_catcode(first) == Some(14)
        {
            // Comment: skip to end of line and lex again.
            if let Some(rel) = slice.find('\n') {
                self.pos = start + rel;
            } else {
                self.pos = self.input.len();
                self.settings.report_nonstrict(
                    "commentAtEnd",
                    "% comment has no terminating newline; LaTeX would fail because of commenting the end of math mode",
                    None,
                )?;
            }
            return self.lex();
        }

        Ok(Token::new(text, self.loc(start, self.pos)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(input: &str) -> Vec<String> {
        let settings = Settings::default();
        let mut lexer = Lexer::new(Arc::from(input), &settings);
        let mut out = Vec::new();
        loop {
            let tok = lexer.lex().unwrap();
            if tok.text == "EOF" {
                break;
            }
            out.push(tok.text.to_owned_string());
        }
        out
    }

    #[test]
    fn test_control_words_swallow_trailing_space() {
        assert_eq!(lex_all("\\frac 12"), vec!["\\frac", "1", "2"]);
    }

    #[test]
    fn test_space_runs_collapse() {
        assert_eq!(lex_all("a   b"), vec!["a", " ", "b"]);
    }

    #[test]
    fn test_control_symbols() {
        assert_eq!(lex_all("\\%\\{"), vec!["\\%", "\\{"]);
    }

    #[test]
    fn test_verb_is_one_token() {
        assert_eq!(lex_all("\\verb|x y|z"), vec!["\\verb|x y|", "z"]);
        assert_eq!(lex_all("\\verb*|x|"), vec!["\\verb*|x|"]);
    }

    #[test]
    fn test_combining_marks_stay_attached() {
        assert_eq!(lex_all("e\u{301}x"), vec!["e\u{301}", "x"]);
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(lex_all("a% comment\nb"), vec!["a", " ", "b"]);
    }

    #[test]
    fn test_catcode_override_disables_comment() {
        let settings = Settings::default();
        let mut lexer = Lexer::new(Arc::from("%x"), &settings);
        lexer.set_catcode('%', 13);
        assert_eq!(lexer.lex().unwrap().text, "%");
    }

    #[test]
    fn test_last_non_combining_mark_index() {
        assert_eq!(last_non_combining_mark_index("abc"), None);
        assert_eq!(last_non_combining_mark_index("e\u{301}"), Some(1));
        assert_eq!(last_non_combining_mark_index("e\u{301}\u{302}"), Some(1));
    }
}
