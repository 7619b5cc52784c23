//! `\sqrt`, with its optional index argument.

use crate::context::MathContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec};
use crate::parser::parse_node::{ParseNode, ParseNodeSqrt};
use crate::types::{ParseError, ParseErrorKind};

pub fn define_sqrt(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        names: &["\\sqrt"],
        props: FunctionPropSpec {
            num_args: 1,
            num_optional_args: 1,
            ..Default::default()
        },
        handler: |context: FunctionContext, mut args, mut opt_args| {
            let body = args
                .pop()
                .ok_or_else(|| ParseError::new(ParseErrorKind::NullArgument))?;
            let index = opt_args.pop().flatten();
            Ok(ParseNode::Sqrt(Box::new(ParseNodeSqrt {
                mode: context.parser.mode,
                loc: context.loc(),
                body,
                index,
            })))
        },
    });
}
