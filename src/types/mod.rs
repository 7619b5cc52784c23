//! Shared type definitions: tokens, source spans, errors, settings, and the
//! small enums the grammar dispatches on.

mod source_location;
pub use source_location::{SourceLocation, SourceRangeRef};

mod parse_error;
pub use parse_error::{ErrorLocationProvider, ParseError, ParseErrorKind};

mod tokens;
pub use crate::symbols::Mode;
pub use tokens::{Token, TokenText};

mod settings;
pub use settings::{
    Settings, StrictFunction, StrictMode, StrictReturn, StrictSetting, TrustContext,
    TrustFunction, TrustSetting, protocol_from_url,
};

use strum::{AsRefStr, EnumString};

/// Declared type of one function argument position.
///
/// Drives [`crate::parser::Parser`]'s typed argument grammars: colors, sizes
/// and URLs get their own token-level parsers, `Mode` switches the parser into
/// the given mode for the argument, and `Original` parses in whatever mode is
/// current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    /// A color name or hex spec, e.g. `{#fa8}` or `{blue}`.
    Color,
    /// A dimension with unit, e.g. `{1.5em}`.
    Size,
    /// A URL with hyperref-style escapes.
    Url,
    /// Uninterpreted text, delivered as a single string.
    Raw,
    /// An ordinary group parsed in the current mode.
    Original,
    /// A text-mode group wrapped in text styling.
    Hbox,
    /// A group parsed in the given mode.
    Mode(Mode),
}

/// The four TeX layout styles, as carried by styling and fraction nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum StyleVariant {
    /// Inline math, `\textstyle`.
    Text,
    /// Displayed math, `\displaystyle`.
    Display,
    /// First-level scripts, `\scriptstyle`.
    Script,
    /// Nested scripts, `\scriptscriptstyle`.
    ScriptScript,
}

/// Token texts an expression may be asked to stop at.
///
/// These are the caller-supplied terminators threaded through
/// `parse_expression`; the fixed end-of-expression set is separate.
#[derive(Debug, Clone, PartialEq, Eq, EnumString, AsRefStr)]
pub enum BreakToken {
    #[strum(serialize = "]")]
    RightBracket,
    #[strum(serialize = "}")]
    RightBrace,
    #[strum(serialize = "\\endgroup")]
    EndGroup,
    #[strum(serialize = "\\right")]
    Right,
    #[strum(serialize = "EOF")]
    Eof,
}
