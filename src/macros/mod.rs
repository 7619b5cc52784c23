//! Macro definitions and the context interface their expansion code runs
//! against.

use alloc::sync::Arc;
use core::fmt::{self, Debug};

use crate::{
    ParseError,
    namespace::Namespace,
    types::{Mode, Token},
};

pub mod builtins;

/// One consumed macro argument: its tokens (in reverse order, ready to push
/// back on the expansion stack) plus the boundary tokens for attribution.
#[derive(Debug, Clone)]
pub struct MacroArg {
    /// Argument tokens, reversed.
    pub tokens: Vec<Token>,
    /// First token of the argument as written.
    pub start: Token,
    /// Last token consumed, including a closing delimiter.
    pub end: Token,
}

/// The replacement a macro expands to.
///
/// Tokens are stored in reverse order so they can be pushed onto the
/// expansion stack directly.
#[derive(Debug, Clone, Default)]
pub struct MacroExpansion {
    /// Replacement tokens, reversed.
    pub tokens: Vec<Token>,
    /// Number of `#n` parameters the macro takes.
    pub num_args: usize,
    /// Per-argument delimiter token lists for `\def`-style delimited
    /// parameters; index 0 precedes the first argument.
    pub delimiters: Option<Vec<Vec<String>>>,
}

/// Function type for macros whose expansion needs the expansion context.
pub type MacroFunction = Arc<
    dyn Fn(&mut dyn MacroContextInterface) -> Result<MacroExpansionResult, ParseError>
        + Send
        + Sync,
>;

/// Plain-function variant of [`MacroFunction`], usable in static tables.
pub type StaticMacroFunction =
    fn(&mut dyn MacroContextInterface) -> Result<MacroExpansionResult, ParseError>;

/// How a macro is defined: a replacement string (lexed on demand), a
/// pre-tokenized expansion, or a function computing the expansion.
#[derive(Clone)]
pub enum MacroDefinition {
    String(String),
    StaticStr(&'static str),
    Expansion(MacroExpansion),
    Function(MacroFunction),
    StaticFunction(StaticMacroFunction),
}

impl MacroDefinition {
    /// The replacement string, when the definition is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::StaticStr(s) => Some(s),
            _ => None,
        }
    }
}

impl Debug for MacroDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.debug_tuple("String").field(s).finish(),
            Self::StaticStr(s) => f.debug_tuple("StaticStr").field(s).finish(),
            Self::Expansion(e) => f.debug_tuple("Expansion").field(e).finish(),
            Self::Function(_) => f.debug_struct("Function").finish(),
            Self::StaticFunction(_) => f.debug_struct("StaticFunction").finish(),
        }
    }
}

/// What a function-backed macro produced.
pub enum MacroExpansionResult {
    /// Replacement string to lex and expand.
    String(String),
    /// Pre-built expansion.
    Expansion(MacroExpansion),
    /// Nothing; the macro had only side effects (e.g. `\newcommand`).
    Empty,
}

/// The face the macro expander shows to macro code: enough to read tokens,
/// consume arguments, and manipulate the macro namespace, without exposing
/// the whole expander.
pub trait MacroContextInterface<'a> {
    /// Current parsing mode.
    fn mode(&self) -> Mode;

    /// The macro namespace.
    fn macros<'s>(&'s self) -> &'s Namespace<'a, MacroDefinition>;

    /// The macro namespace, mutably.
    fn macros_mut<'s>(&'s mut self) -> &'s mut Namespace<'a, MacroDefinition>;

    /// The next token, without consuming it.
    fn future_mut(&mut self) -> Result<Token, ParseError>;

    /// Consumes and returns the next token.
    fn pop_token(&mut self) -> Result<Token, ParseError>;

    /// Discards consecutive space tokens.
    fn consume_spaces(&mut self) -> Result<(), ParseError>;

    /// Expands the next token once if it is expandable. Returns the number of
    /// tokens pushed, or `None` when the token was left in place.
    fn expand_once(&mut self, expandable_only: bool) -> Result<Option<usize>, ParseError>;

    /// Fully expands the next token and returns the first unexpandable one.
    fn expand_next_token(&mut self) -> Result<Token, ParseError>;

    /// Fully expands a token list, returning forward-order tokens.
    fn expand_tokens(&mut self, tokens: Vec<Token>) -> Result<Vec<Token>, ParseError>;

    /// Consumes one argument: a balanced group or single token, or text up to
    /// the given delimiters.
    fn consume_arg(&mut self, delims: Option<&[String]>) -> Result<MacroArg, ParseError>;

    /// Consumes `num_args` undelimited arguments.
    fn consume_args(&mut self, num_args: usize) -> Result<Vec<Vec<Token>>, ParseError>;

    /// Whether `name` has any definition: macro, function, symbol, or
    /// implicit command.
    fn is_defined(&self, name: &str) -> bool;

    /// Opens a macro scope.
    fn begin_group(&mut self);

    /// Closes the innermost macro scope.
    fn end_group(&mut self) -> Result<(), ParseError>;
}
