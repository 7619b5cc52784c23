//! `\left`/`\right` delimiter pairs and `\middle`.
//!
//! `\left` owns the whole delimited expression: it parses the inner body,
//! tracks the nesting depth the parser exposes for `\middle` checks, and
//! consumes the matching `\right`.

use crate::context::MathContext;
use crate::define_function::{
    FunctionContext, FunctionDefSpec, FunctionPropSpec, normalize_argument,
};
use crate::macros::MacroContextInterface as _;
use crate::parser::parse_node::{
    NodeType, ParseNode, ParseNodeLeftRight, ParseNodeLeftRightRight, ParseNodeMiddle,
};
use crate::types::{ParseError, ParseErrorKind};
use phf::phf_set;

/// Delimiters `\left` and friends accept. `.` is the empty delimiter.
const DELIMITERS: phf::Set<&'static str> = phf_set! {
    "(", ")",
    "[", "\\lbrack",
    "]", "\\rbrack",
    "\\{", "\\lbrace",
    "\\}", "\\rbrace",
    "\\lfloor", "\\rfloor", "\u{230a}", "\u{230b}",
    "\\lceil", "\\rceil", "\u{2308}", "\u{2309}",
    "<", ">", "\\langle", "\u{27e8}", "\\rangle", "\u{27e9}",
    "\\lt", "\\gt",
    "/", "\\backslash",
    "|", "\\vert",
    "\\|", "\\Vert",
    "\\uparrow", "\\downarrow", "\\updownarrow",
    "\\Uparrow", "\\Downarrow", "\\Updownarrow",
    ".",
};

fn check_delimiter(node: &ParseNode, context: &FunctionContext) -> Result<String, ParseError> {
    let symbol = normalize_argument(node);
    if let Some(text) = symbol.text() {
        if DELIMITERS.contains(text) {
            Ok(text.to_owned())
        } else {
            let kind = ParseErrorKind::InvalidDelimiterAfter {
                delimiter: text.to_owned(),
                function: context.func_name.clone(),
            };
            Err(match context.token {
                Some(token) => ParseError::with_token(kind, token),
                None => ParseError::new(kind),
            })
        }
    } else {
        Err(ParseError::new(ParseErrorKind::InvalidDelimiterTypeAfter {
            function: context.func_name.clone(),
        }))
    }
}

pub fn define_leftright(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        names: &["\\left"],
        props: FunctionPropSpec {
            num_args: 1,
            ..Default::default()
        },
        handler: |context: FunctionContext, args, _opt_args| {
            let delim = check_delimiter(&args[0], &context)?;

            context.parser.leftright_depth += 1;
            // Parse out the implicit body that is delimited. The expression
            // loop stops at \right without consuming it.
            let body = context.parser.parse_expression(false, None)?;
            context.parser.leftright_depth -= 1;

            context.parser.expect("\\right", false)?;
            let right = context
                .parser
                .parse_function(None, None, None)?
                .ok_or_else(|| {
                    ParseError::new(ParseErrorKind::ExpectedNode {
                        node: NodeType::LeftRightRight,
                    })
                })?;
            let ParseNode::LeftRightRight(right) = right else {
                return Err(ParseError::new(ParseErrorKind::ExpectedNode {
                    node: NodeType::LeftRightRight,
                }));
            };

            Ok(ParseNode::LeftRight(ParseNodeLeftRight {
                mode: context.parser.mode,
                loc: context.loc(),
                body,
                left: delim,
                right: right.delim,
                right_color: right.color,
            }))
        },
    });

    ctx.define_function(FunctionDefSpec {
        names: &["\\right"],
        props: FunctionPropSpec {
            num_args: 1,
            ..Default::default()
        },
        handler: |context: FunctionContext, args, _opt_args| {
            let delim = check_delimiter(&args[0], &context)?;
            let color = context
                .parser
                .gullet
                .macros()
                .get("\\current@color")
                .and_then(|definition| definition.as_str().map(str::to_owned));

            Ok(ParseNode::LeftRightRight(ParseNodeLeftRightRight {
                mode: context.parser.mode,
                loc: context.loc(),
                delim,
                color,
            }))
        },
    });

    ctx.define_function(FunctionDefSpec {
        names: &["\\middle"],
        props: FunctionPropSpec {
            num_args: 1,
            ..Default::default()
        },
        handler: |context: FunctionContext, args, _opt_args| {
            let delim = check_delimiter(&args[0], &context)?;
            if context.parser.leftright_depth == 0 {
                let kind = ParseErrorKind::MiddleWithoutPrecedingLeft;
                return Err(match context.token {
                    Some(token) => ParseError::with_token(kind, token),
                    None => ParseError::new(kind),
                });
            }
            Ok(ParseNode::Middle(ParseNodeMiddle {
                mode: context.parser.mode,
                loc: context.loc(),
                delim,
            }))
        },
    });
}
