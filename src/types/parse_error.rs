//! The single fault type surfaced by the parser.
//!
//! Every failure — lexing, macro expansion, grammar violations, handler
//! errors — is a [`ParseError`] carrying a categorized [`ParseErrorKind`] and,
//! when a token was at hand, the byte range of the offending input so callers
//! can render caret-in-source diagnostics.

use core::fmt;

use crate::parser::parse_node::NodeType;
use crate::symbols::Mode;
use crate::types::SourceLocation;
use alloc::boxed::Box;
use alloc::string::String;
use thiserror::Error;

/// Error raised when the input expression cannot be parsed.
///
/// Distinguishes problems in the user's expression from internal invariant
/// violations only through the message; both unwind to the top-level caller
/// unchanged.
#[derive(Debug, Error)]
#[error("parse error: {kind}{context}")]
pub struct ParseError {
    /// Categorized reason for the failure.
    #[source]
    pub kind: Box<ParseErrorKind>,
    /// Start byte offset of the offending text, when attributed.
    pub position: Option<usize>,
    /// Byte length of the offending text, when attributed.
    pub length: Option<usize>,
    /// Source excerpt rendered after the message.
    context: ErrorContext,
}

impl ParseError {
    pub fn new<T: Into<ParseErrorKind>>(kind: T) -> Self {
        Self {
            kind: Box::new(kind.into()),
            position: None,
            length: None,
            context: ErrorContext::None,
        }
    }

    /// Error attributed to the location of `token`.
    pub fn with_token<T: Into<ParseErrorKind>>(kind: T, token: &dyn ErrorLocationProvider) -> Self {
        let mut position = None;
        let mut length = None;
        let context = token
            .loc()
            .filter(|loc| loc.start <= loc.end)
            .map_or(ErrorContext::None, |loc| {
                position = Some(loc.start);
                length = Some(loc.end - loc.start);
                ErrorContext::Location(loc.clone())
            });

        Self {
            kind: Box::new(kind.into()),
            position,
            length,
            context,
        }
    }
}

/// Specific reason for a [`ParseError`].
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    // Token mismatch
    #[error("Expected '{expected}', got '{found}'")]
    ExpectedToken { expected: String, found: String },
    #[error("Unexpected character: '{character}'")]
    UnexpectedCharacter { character: String },

    // Structural violations
    #[error("Double superscript")]
    DoubleSuperscript,
    #[error("Double subscript")]
    DoubleSubscript,
    #[error("only one infix operator per group")]
    MultipleInfixOperators,
    #[error("Limits must follow a math operator")]
    LimitsMustFollowBase,
    #[error("Expected {node} node")]
    ExpectedNode { node: NodeType },

    // Argument grammar violations
    #[error("Invalid {context}: '{value}'")]
    InvalidValue { context: &'static str, value: String },
    #[error("Invalid color: '{color}'")]
    InvalidColor { color: String },
    #[error("Invalid size: '{size}'")]
    InvalidSize { size: String },
    #[error("Invalid unit: '{unit}'")]
    InvalidUnit { unit: String },
    #[error("Unexpected end of input in {context}")]
    UnexpectedEndOfInput { context: &'static str },
    #[error("Expected group after '{name}'")]
    ExpectedGroupAfter { name: String },
    #[error("Unknown accent '{accent}'")]
    UnknownAccent { accent: String },
    #[error("Accent {accent} unsupported in {mode} mode")]
    UnsupportedAccentInMode { accent: String, mode: Mode },
    #[error("\\verb assertion failed -- please report what input caused this bug")]
    VerbAssertionFailed,
    #[error("\\verb ended by end of line instead of matching delimiter")]
    VerbMissingDelimiter,

    // Mode and context violations
    #[error("Can't use function '{func}' in {mode} mode")]
    FunctionDisallowedInMode { func: String, mode: Mode },
    #[error("Got function '{func}' with no arguments as {context}")]
    FunctionMissingArguments { func: String, context: String },
    #[error("No function handler for {name}")]
    NoFunctionHandler { name: String },

    // Unknown commands
    #[error("Undefined control sequence: {name}")]
    UndefinedControlSequence { name: String },

    // Strict-mode rejections
    #[error("LaTeX-incompatible input and strict mode is set to 'error': {message} [{code}]")]
    StrictModeError { message: String, code: String },

    // Delimiters
    #[error("Invalid delimiter: '{delimiter}' after '{function}'")]
    InvalidDelimiterAfter { delimiter: String, function: String },
    #[error("Invalid delimiter type after '{function}'")]
    InvalidDelimiterTypeAfter { function: String },
    #[error("\\middle without preceding \\left")]
    MiddleWithoutPrecedingLeft,

    // Handler-level argument checks
    #[error("Expected color-token as argument to '{func}'")]
    ExpectedColorToken { func: String },
    #[error("\\genfrac has no known fraction command {command}")]
    UnrecognizedGenfracCommand { command: String },
    #[error("Unrecognized infix genfrac command: {command}")]
    UnrecognizedInfixGenfracCommand { command: String },
    #[error(r"Invalid style level for \genfrac: {level}")]
    InvalidGenfracStyle { level: String },
    #[error("First argument must be raw string")]
    ExpectedRawStringFirstArgument,
    #[error("Error parsing key-value for \\htmlData")]
    HtmlDataKeyValueParseError,

    // Macro machinery
    #[error("Too many expansions: infinite loop or need to increase maxExpand setting")]
    TooManyExpansions,
    #[error("Unexpected end of input in a macro argument, expected '{expected}'")]
    UnexpectedEndOfMacroArgument { expected: String },
    #[error("Extra }}")]
    ExtraCloseBrace,
    #[error("The length of delimiters doesn't match the number of args!")]
    MacroDelimiterLengthMismatch,
    #[error("Use of the macro doesn't match its definition")]
    MacroDefinitionMismatch,
    #[error("Incomplete placeholder at end of macro body")]
    IncompletePlaceholder,
    #[error("Not a valid argument number")]
    InvalidArgumentNumber,
    #[error("Expected a control sequence")]
    ExpectedControlSequence,
    #[error("Expected a macro definition")]
    ExpectedMacroDefinition,
    #[error("Invalid argument number: {value}")]
    InvalidMacroArgumentNumber { value: String },
    #[error("Argument numbers must be in order: expected #{expected} but found #{found}")]
    ExpectedMacroParameter { expected: usize, found: usize },
    #[error("Invalid token after macro prefix: {token}")]
    InvalidTokenAfterMacroPrefix { token: String },
    #[error("Expected function after prefix")]
    ExpectedFunctionAfterPrefix,
    #[error(r"\newcommand{{{name}}} attempting to redefine {name}; use \renewcommand")]
    NewcommandRedefinition { name: String },
    #[error(r"\renewcommand{{{name}}} when {name} does not yet exist; use \newcommand")]
    RenewcommandNonexistent { name: String },
    #[error(
        "Unbalanced namespace destruction: attempt to pop global namespace; please report this as a bug"
    )]
    UnbalancedNamespaceDestruction,

    // Internal invariants
    #[error("Internal error: stack unexpectedly empty during token expansion")]
    EmptyExpansionStack,
    #[error("Null argument, please report this as a bug")]
    NullArgument,

    /// Ad-hoc message used by a handful of handler-level failures.
    #[error("{0}")]
    Message(String),
}

impl From<&str> for ParseErrorKind {
    fn from(message: &str) -> Self {
        Self::Message(message.to_owned())
    }
}

impl From<String> for ParseErrorKind {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

/// Source excerpt shown after the error message, with the offending range
/// underlined using combining low lines.
#[derive(Debug)]
enum ErrorContext {
    None,
    Location(SourceLocation),
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Location(SourceLocation { input, start, end }) => {
                let input_len = input.len();
                if *start == input_len {
                    write!(f, " at end of input: ")?;
                } else {
                    write!(f, " at position {}: ", start + 1)?;
                }

                let mut prefix_start = start.saturating_sub(15);
                prefix_start = adjust_char_boundary(input, prefix_start, false);
                if prefix_start > 0 {
                    write!(f, "\u{2026}")?;
                }
                write!(f, "{}", &input[prefix_start..*start])?;
                for c in input[*start..*end].chars() {
                    write!(f, "{c}\u{0332}")?;
                }
                let mut suffix_end = (*end + 15).min(input_len);
                suffix_end = adjust_char_boundary(input, suffix_end, true);
                write!(f, "{}", &input[*end..suffix_end])?;
                if suffix_end < input_len {
                    write!(f, "\u{2026}")?;
                }
                Ok(())
            }
        }
    }
}

const fn adjust_char_boundary(input: &str, mut index: usize, forward: bool) -> usize {
    if forward {
        while index < input.len() && !input.is_char_boundary(index) {
            index += 1;
        }
    } else {
        while index > 0 && !input.is_char_boundary(index) {
            index -= 1;
        }
    }
    index
}

/// Anything that can attribute an error to a span of the input.
pub trait ErrorLocationProvider {
    /// The source location, if one is known.
    fn loc(&self) -> Option<&SourceLocation>;
}

impl ErrorLocationProvider for SourceLocation {
    fn loc(&self) -> Option<&SourceLocation> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Token;
    use alloc::sync::Arc;

    #[test]
    fn test_plain_error_has_no_position() {
        let error = ParseError::new(ParseErrorKind::TooManyExpansions);
        assert!(error.to_string().contains("Too many expansions"));
        assert_eq!(error.position, None);
        assert_eq!(error.length, None);
    }

    #[test]
    fn test_error_with_token_reports_range() {
        let input: Arc<str> = Arc::from("a very long expression with a bad token inside");
        let loc = SourceLocation::new(Arc::clone(&input), 30, 33);
        let token = Token::new("bad", Some(loc));

        let error = ParseError::with_token(ParseErrorKind::DoubleSubscript, &token);
        let rendered = error.to_string();
        assert!(rendered.contains("Double subscript"));
        assert!(rendered.contains("at position 31"));
        assert_eq!(error.position, Some(30));
        assert_eq!(error.length, Some(3));
    }
}
