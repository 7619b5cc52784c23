//! Style-switching commands. They apply to everything up to the end of the
//! enclosing group, so the handler keeps parsing the sibling expression.

use crate::context::MathContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec};
use crate::parser::parse_node::{ParseNode, ParseNodeStyling};
use crate::types::StyleVariant;

pub fn define_styling(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        names: &[
            "\\displaystyle",
            "\\textstyle",
            "\\scriptstyle",
            "\\scriptscriptstyle",
        ],
        props: FunctionPropSpec {
            allowed_in_text: true,
            ..Default::default()
        },
        handler: |context: FunctionContext, _args, _opt_args| {
            let style = match context.func_name.as_str() {
                "\\displaystyle" => StyleVariant::Display,
                "\\textstyle" => StyleVariant::Text,
                "\\scriptstyle" => StyleVariant::Script,
                _ => StyleVariant::ScriptScript,
            };

            context.parser.consume_spaces()?;
            // Break on infix so the styled tail ends where an \over splits
            // the group.
            let body = context
                .parser
                .parse_expression(true, context.break_on_token_text)?;

            Ok(ParseNode::Styling(ParseNodeStyling {
                mode: context.parser.mode,
                loc: context.loc(),
                style,
                body,
            }))
        },
    });
}
