//! `\rule`: a filled box with optional raise.

use crate::context::MathContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec};
use crate::parser::parse_node::{ParseNode, ParseNodeRule};
use crate::types::{ArgType, ParseError};
use crate::units::Measurement;

fn size_value(arg: &ParseNode) -> Result<Measurement, ParseError> {
    if let ParseNode::Size(size) = arg {
        Ok(size.value.clone())
    } else {
        Err(ParseError::new("Expected size argument to \\rule"))
    }
}

pub fn define_rule(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        names: &["\\rule"],
        props: FunctionPropSpec {
            num_args: 2,
            num_optional_args: 1,
            arg_types: Some(vec![ArgType::Size, ArgType::Size, ArgType::Size]),
            allowed_in_text: true,
            ..Default::default()
        },
        handler: |context: FunctionContext, args, opt_args| {
            let shift = match opt_args.first().and_then(Option::as_ref) {
                Some(node) => Some(size_value(node)?),
                None => None,
            };
            let width = size_value(&args[0])?;
            let height = size_value(&args[1])?;

            Ok(ParseNode::Rule(ParseNodeRule {
                mode: context.parser.mode,
                loc: context.loc(),
                shift,
                width,
                height,
            }))
        },
    });
}
