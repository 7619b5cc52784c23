//! mathtex — a parser for TeX/LaTeX mathematical notation.
//!
//! The crate turns an expression string into a typed AST of
//! [`parser::parse_node::ParseNode`]s: tokens come from the [`lexer`], pass
//! through the macro-expanding gullet ([`macro_expander`]), and are consumed
//! by the recursive-descent [`parser`], which dispatches commands through the
//! function and symbol registry in [`MathContext`].
//!
//! ```rust
//! use mathtex::{MathContext, Settings, parse};
//!
//! let ctx = MathContext::default();
//! let settings = Settings::default();
//! let nodes = parse(&ctx, r"x^2 + \frac{1}{2}", &settings).unwrap();
//! assert!(!nodes.is_empty());
//! ```
#![warn(clippy::pedantic)]
#![warn(clippy::str_to_string)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::panic)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::if_then_some_else_none)]
#![warn(clippy::unused_trait_names)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::string_slice)]
#![allow(clippy::float_cmp)]
#![allow(clippy::default_numeric_fallback)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::missing_panics_doc)]

extern crate alloc;

pub mod context;
pub mod define_function;
pub mod functions;
pub mod lexer;
pub mod macro_expander;
pub mod macros;
pub mod namespace;
pub mod parser;
pub mod symbols;
pub mod types;
pub mod unicode;
pub mod units;

pub use crate::context::MathContext;
pub use crate::parser::Parser;
pub use crate::types::{ParseError, Settings, StrictSetting, TrustSetting};

use crate::parser::parse_node::ParseNode;

/// Parses `expression` into its AST.
///
/// This is the top-level entry point: it builds a [`Parser`] over the input,
/// runs it to completion, and returns the root node sequence. All failures
/// surface as a single [`ParseError`] carrying the offending source range
/// when one is known.
pub fn parse(
    ctx: &MathContext,
    expression: &str,
    settings: &Settings,
) -> Result<Vec<ParseNode>, ParseError> {
    let mut parser = Parser::new(expression, settings, ctx);
    parser.parse()
}

/// Current crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
