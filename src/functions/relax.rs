//! `\relax`: does nothing, visibly.

use crate::context::MathContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec};
use crate::parser::parse_node::{ParseNode, ParseNodeInternal};

pub fn define_relax(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        names: &["\\relax"],
        props: FunctionPropSpec {
            allowed_in_text: true,
            ..Default::default()
        },
        handler: |context: FunctionContext, _args, _opt_args| {
            Ok(ParseNode::Internal(ParseNodeInternal {
                mode: context.parser.mode,
                loc: context.loc(),
            }))
        },
    });
}
