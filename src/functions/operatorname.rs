//! `\operatorname`. The user-facing command is a builtin macro that resolves
//! the optional star and expands to one of the two entries here.

use crate::context::MathContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec, ord_argument};
use crate::parser::parse_node::{ParseNode, ParseNodeOperatorName};

pub fn define_operatorname(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        names: &["\\operatorname@", "\\operatornamewithlimits"],
        props: FunctionPropSpec {
            num_args: 1,
            ..Default::default()
        },
        handler: |context: FunctionContext, args, _opt_args| {
            // The withlimits form owns adjacent scripts and accepts \limits.
            let starred = context.func_name == "\\operatornamewithlimits";
            Ok(ParseNode::OperatorName(ParseNodeOperatorName {
                mode: context.parser.mode,
                loc: context.loc(),
                body: ord_argument(&args[0]),
                always_handle_sup_sub: starred,
                limits: false,
            }))
        },
    });
}
