//! Registration types for the function table.
//!
//! A function entry describes how many arguments a command takes, what types
//! they are, where the command may appear, and the handler that turns the
//! parsed arguments into an AST node.

use crate::parser::Parser;
use crate::parser::parse_node::ParseNode;
use crate::types::{ArgType, BreakToken, ErrorLocationProvider as _, SourceLocation};
use crate::types::{ParseError, Token};

/// Everything a handler gets to see while building its node.
pub struct FunctionContext<'a, 'b> {
    /// The command name that was dispatched, e.g. `\frac`.
    pub func_name: String,
    /// The parser, for handlers that keep consuming input (`\color`,
    /// `\left`, the styling commands).
    pub parser: &'a mut Parser<'b>,
    /// The command token, for location attribution.
    pub token: Option<&'a Token>,
    /// Terminator inherited from the surrounding expression.
    pub break_on_token_text: Option<&'a BreakToken>,
}

impl FunctionContext<'_, '_> {
    /// Location of the command token, if known.
    #[must_use]
    pub fn loc(&self) -> Option<SourceLocation> {
        let t = self.token?;
        t.loc().cloned()
    }
}

/// Handler invoked once a function's arguments have been parsed.
pub type FunctionHandler = fn(
    context: FunctionContext,
    args: Vec<ParseNode>,
    opt_args: Vec<Option<ParseNode>>,
) -> Result<ParseNode, ParseError>;

/// Parsing behavior of a function, separate from its names.
#[derive(Debug, Clone)]
pub struct FunctionPropSpec {
    /// Number of mandatory arguments.
    pub num_args: usize,
    /// Number of leading optional `[...]` arguments.
    pub num_optional_args: usize,
    /// Per-position argument types; positions past the end parse as
    /// `original`.
    pub arg_types: Option<Vec<ArgType>>,
    /// Priority deciding whether this function may itself be consumed as a
    /// bare argument: it may when its greediness exceeds the consumer's.
    pub greediness: i32,
    /// Whether the function may appear in text mode.
    pub allowed_in_text: bool,
    /// Whether the function may appear in math mode.
    pub allowed_in_math: bool,
    /// Whether the function is an infix operator like `\over`.
    pub infix: bool,
}

impl Default for FunctionPropSpec {
    fn default() -> Self {
        Self {
            num_args: 0,
            num_optional_args: 0,
            arg_types: None,
            greediness: 1,
            allowed_in_text: false,
            allowed_in_math: true,
            infix: false,
        }
    }
}

/// One registration: a set of names sharing props and a handler.
pub struct FunctionDefSpec<'b> {
    /// Command names to register, including the backslash.
    pub names: &'b [&'b str],
    /// Parsing behavior.
    pub props: FunctionPropSpec,
    /// Node-building handler.
    pub handler: FunctionHandler,
}

/// Resolved registry entry, as stored in the function table.
#[derive(Debug, Clone)]
pub struct FunctionSpec {
    pub num_args: usize,
    pub num_optional_args: usize,
    pub arg_types: Option<Vec<ArgType>>,
    pub greediness: i32,
    pub allowed_in_text: bool,
    pub allowed_in_math: bool,
    pub infix: bool,
    pub handler: FunctionHandler,
}

/// Unwraps a single-element ordgroup argument.
#[must_use]
pub fn normalize_argument(arg: &ParseNode) -> &ParseNode {
    if let ParseNode::OrdGroup(ord) = arg
        && ord.body.len() == 1
    {
        return &ord.body[0];
    }
    arg
}

/// Flattens an argument into a node list for handlers that take a body.
#[must_use]
pub fn ord_argument(arg: &ParseNode) -> Vec<ParseNode> {
    if let ParseNode::OrdGroup(ord) = arg {
        return ord.body.clone();
    }
    vec![arg.clone()]
}
