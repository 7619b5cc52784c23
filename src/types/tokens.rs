use core::fmt;
use core::ops::Range;

use alloc::sync::Arc;

use crate::types::{ErrorLocationProvider, SourceLocation};

/// Textual payload of a [`Token`].
///
/// Most tokens borrow a slice of the input string; tokens produced by macro
/// expansion or synthesized by the parser own their text instead. Keeping the
/// distinction lets the lexer stay zero-copy on the hot path.
#[derive(Clone, Debug)]
pub enum TokenText {
    /// Borrowed slice of an input string.
    Slice {
        /// Shared reference to the input being lexed.
        source: Arc<str>,
        /// Byte range of the slice within `source`.
        range: Range<usize>,
    },
    /// Heap allocated text.
    Owned(Arc<str>),
    /// Static string literal.
    Static(&'static str),
}

impl TokenText {
    #[must_use]
    pub const fn slice(source: Arc<str>, start: usize, end: usize) -> Self {
        Self::Slice {
            source,
            range: start..end,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Slice { source, range } => &source[range.clone()],
            Self::Owned(text) => text,
            Self::Static(text) => text,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.as_str().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn to_owned_string(&self) -> String {
        self.as_str().to_owned()
    }
}

impl PartialEq for TokenText {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for TokenText {}

impl From<String> for TokenText {
    fn from(value: String) -> Self {
        Self::Owned(Arc::from(value))
    }
}

impl From<&str> for TokenText {
    fn from(value: &str) -> Self {
        Self::Owned(Arc::from(value))
    }
}

impl fmt::Display for TokenText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<TokenText> for String {
    fn from(value: TokenText) -> Self {
        match value {
            TokenText::Slice { source, range } => source[range].to_owned(),
            TokenText::Owned(text) => text.as_ref().to_owned(),
            TokenText::Static(text) => text.to_owned(),
        }
    }
}

impl PartialEq<&str> for TokenText {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<TokenText> for &str {
    fn eq(&self, other: &TokenText) -> bool {
        *self == other.as_str()
    }
}

impl PartialEq<String> for TokenText {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == other
    }
}

/// One token of the logical input stream.
///
/// The text is the raw spelling: a single character, a control-sequence name
/// including its backslash, or the `"EOF"` sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Raw text content.
    pub text: TokenText,
    /// Where in the input this token came from, when known.
    pub loc: Option<SourceLocation>,
}

impl Token {
    #[must_use]
    pub fn new<T>(text: T, loc: Option<SourceLocation>) -> Self
    where
        T: Into<TokenText>,
    {
        Self {
            text: text.into(),
            loc,
        }
    }

    /// Token borrowing `input[start..end]` as its text.
    #[must_use]
    pub const fn from_slice(
        input: Arc<str>,
        start: usize,
        end: usize,
        loc: Option<SourceLocation>,
    ) -> Self {
        Self {
            text: TokenText::slice(input, start, end),
            loc,
        }
    }

    pub fn set_text<T>(&mut self, text: T)
    where
        T: Into<TokenText>,
    {
        self.text = text.into();
    }

    /// A composite token spanning from this token to `end_token`, carrying
    /// `text` as its payload. The location is absent when the two spans do
    /// not combine (e.g. one token came from a macro body).
    #[must_use]
    pub fn range<T: Into<TokenText>>(self, end_token: Self, text: T) -> Self {
        Self {
            text: text.into(),
            loc: SourceLocation::range(self.loc, end_token.loc),
        }
    }
}

impl ErrorLocationProvider for Token {
    fn loc(&self) -> Option<&SourceLocation> {
        self.loc.as_ref()
    }
}

impl ErrorLocationProvider for Option<Token> {
    fn loc(&self) -> Option<&SourceLocation> {
        let t = self.as_ref()?;
        t.loc.as_ref()
    }
}
