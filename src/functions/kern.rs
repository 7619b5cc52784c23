//! Horizontal kerns: `\kern`, `\mkern`, `\hskip`, `\mskip`.

use crate::context::MathContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec};
use crate::parser::parse_node::{ParseNode, ParseNodeKern};
use crate::types::{ArgType, Mode, ParseError};

pub fn define_kern(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        names: &["\\kern", "\\mkern", "\\hskip", "\\mskip"],
        props: FunctionPropSpec {
            num_args: 1,
            arg_types: Some(vec![ArgType::Size]),
            allowed_in_text: true,
            ..Default::default()
        },
        handler: |context: FunctionContext, args, _opt_args| {
            let ParseNode::Size(size) = &args[0] else {
                return Err(ParseError::new("Expected size argument to kern"));
            };

            // TeX only permits mu in the math-unit commands and vice versa.
            let math_function = context.func_name.as_bytes().get(1) == Some(&b'm');
            let mu_unit = size.value.unit == "mu";
            let loc = context.token.map(|t| t as &dyn crate::types::ErrorLocationProvider);
            if math_function {
                if !mu_unit {
                    context.parser.settings.report_nonstrict(
                        "mathVsTextUnits",
                        &format!(
                            "LaTeX's {} supports only mu units, not {} units",
                            context.func_name, size.value.unit
                        ),
                        loc,
                    )?;
                }
                if context.parser.mode != Mode::Math {
                    context.parser.settings.report_nonstrict(
                        "mathVsTextUnits",
                        &format!("LaTeX's {} works only in math mode", context.func_name),
                        loc,
                    )?;
                }
            } else if mu_unit {
                context.parser.settings.report_nonstrict(
                    "mathVsTextUnits",
                    &format!("LaTeX's {} doesn't support mu units", context.func_name),
                    loc,
                )?;
            }

            Ok(ParseNode::Kern(ParseNodeKern {
                mode: context.parser.mode,
                loc: context.loc(),
                dimension: size.value.clone(),
            }))
        },
    });
}
