//! Forced math classes: `\mathord`, `\mathbin`, `\mathrel`, ...

use crate::context::MathContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec, ord_argument};
use crate::parser::parse_node::{ParseNode, ParseNodeMclass};

pub fn define_mclass(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        names: &[
            "\\mathord",
            "\\mathbin",
            "\\mathrel",
            "\\mathopen",
            "\\mathclose",
            "\\mathpunct",
            "\\mathinner",
        ],
        props: FunctionPropSpec {
            num_args: 1,
            ..Default::default()
        },
        handler: |context: FunctionContext, args, _opt_args| {
            // \mathbin -> "mbin" etc.
            let mclass = format!("m{}", &context.func_name[5..]);
            Ok(ParseNode::Mclass(ParseNodeMclass {
                mode: context.parser.mode,
                loc: context.loc(),
                mclass,
                body: ord_argument(&args[0]),
                is_character_box: args[0].is_character_box(),
            }))
        },
    });
}
