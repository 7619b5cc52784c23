//! `\textcolor` and `\color`.

use crate::context::MathContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec, ord_argument};
use crate::macros::{MacroContextInterface as _, MacroDefinition};
use crate::parser::parse_node::{ParseNode, ParseNodeColor};
use crate::types::{ArgType, ParseError, ParseErrorKind};

pub fn define_color(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        names: &["\\textcolor"],
        props: FunctionPropSpec {
            num_args: 2,
            greediness: 3,
            allowed_in_text: true,
            arg_types: Some(vec![ArgType::Color, ArgType::Original]),
            ..Default::default()
        },
        handler: |context: FunctionContext, args, _opt_args| {
            let ParseNode::ColorToken(token) = &args[0] else {
                return Err(ParseError::new(ParseErrorKind::ExpectedColorToken {
                    func: context.func_name.clone(),
                }));
            };
            let color = token.color.clone();
            let body = ord_argument(&args[1]);

            Ok(ParseNode::Color(ParseNodeColor {
                mode: context.parser.mode,
                loc: context.loc(),
                color,
                body,
            }))
        },
    });

    // \color wraps everything up to the end of the enclosing group.
    ctx.define_function(FunctionDefSpec {
        names: &["\\color"],
        props: FunctionPropSpec {
            num_args: 1,
            greediness: 3,
            allowed_in_text: true,
            arg_types: Some(vec![ArgType::Color]),
            ..Default::default()
        },
        handler: |context: FunctionContext, args, _opt_args| {
            let ParseNode::ColorToken(token) = &args[0] else {
                return Err(ParseError::new(ParseErrorKind::ExpectedColorToken {
                    func: context.func_name.clone(),
                }));
            };
            let color = token.color.clone();

            // Mirror color.sty: record the current color for \right to pick
            // up.
            context.parser.gullet.macros_mut().set(
                "\\current@color",
                Some(MacroDefinition::String(color.clone())),
                false,
            );

            let body = context
                .parser
                .parse_expression(true, context.break_on_token_text)?;

            Ok(ParseNode::Color(ParseNodeColor {
                mode: context.parser.mode,
                loc: context.loc(),
                color,
                body,
            }))
        },
    });
}
