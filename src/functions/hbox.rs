//! `\hbox`: text-mode content in a box, transparent to line breaking.

use crate::context::MathContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec, ord_argument};
use crate::parser::parse_node::{ParseNode, ParseNodeHbox};
use crate::types::ArgType;

pub fn define_hbox(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        names: &["\\hbox"],
        props: FunctionPropSpec {
            num_args: 1,
            arg_types: Some(vec![ArgType::Hbox]),
            allowed_in_text: true,
            ..Default::default()
        },
        handler: |context: FunctionContext, args, _opt_args| {
            Ok(ParseNode::Hbox(ParseNodeHbox {
                mode: context.parser.mode,
                loc: context.loc(),
                body: ord_argument(&args[0]),
            }))
        },
    });
}
