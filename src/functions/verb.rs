//! The `\verb` function entry.
//!
//! Well-formed `\verb` constructs never get here: the lexer matches them as
//! single tokens and the symbol parser builds the node. Reaching this handler
//! means the delimiters never closed on the line.

use crate::context::MathContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec};
use crate::types::{ParseError, ParseErrorKind};

pub fn define_verb(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        names: &["\\verb"],
        props: FunctionPropSpec {
            allowed_in_text: true,
            ..Default::default()
        },
        handler: |_context: FunctionContext, _args, _opt_args| {
            Err(ParseError::new(ParseErrorKind::VerbMissingDelimiter))
        },
    });
}
