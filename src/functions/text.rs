//! The `\text` family: text-mode content inside math, with font variants.

use crate::context::MathContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec, ord_argument};
use crate::parser::parse_node::{ParseNode, ParseNodeText};
use crate::types::{ArgType, Mode};

pub fn define_text(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        names: &[
            // Font families
            "\\text",
            "\\textrm",
            "\\textsf",
            "\\texttt",
            "\\textnormal",
            // Font weights
            "\\textbf",
            "\\textmd",
            // Font shapes
            "\\textit",
            "\\textup",
        ],
        props: FunctionPropSpec {
            num_args: 1,
            arg_types: Some(vec![ArgType::Mode(Mode::Text)]),
            greediness: 2,
            allowed_in_text: true,
            ..Default::default()
        },
        handler: |context: FunctionContext, args, _opt_args| {
            let font = if context.func_name == "\\text" {
                None
            } else {
                Some(context.func_name.clone())
            };
            Ok(ParseNode::Text(ParseNodeText {
                mode: context.parser.mode,
                loc: context.loc(),
                body: ord_argument(&args[0]),
                font,
            }))
        },
    });
}
