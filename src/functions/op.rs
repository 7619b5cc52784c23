//! Operators: big operators with limits, named functions like `\sin`, the
//! `\lim` family, and `\mathop`.

use crate::context::MathContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec, ord_argument};
use crate::parser::parse_node::{ParseNode, ParseNodeOp};

pub fn define_op(ctx: &mut MathContext) {
    // Big operators. Symbol operators take limits in display style.
    ctx.define_function(FunctionDefSpec {
        names: &[
            "\\coprod",
            "\\bigvee",
            "\\bigwedge",
            "\\biguplus",
            "\\bigcap",
            "\\bigcup",
            "\\prod",
            "\\sum",
            "\\bigotimes",
            "\\bigoplus",
            "\\bigodot",
            "\\bigsqcup",
            "\\smallint",
            "\u{220f}",
            "\u{2210}",
            "\u{2211}",
            "\u{22c0}",
            "\u{22c1}",
            "\u{22c2}",
            "\u{22c3}",
        ],
        props: FunctionPropSpec::default(),
        handler: |context: FunctionContext, _args, _opt_args| {
            // Map bare Unicode operators to the command spelling.
            let name = match context.func_name.as_str() {
                "\u{220f}" => "\\prod",
                "\u{2210}" => "\\coprod",
                "\u{2211}" => "\\sum",
                "\u{22c0}" => "\\bigwedge",
                "\u{22c1}" => "\\bigvee",
                "\u{22c2}" => "\\bigcap",
                "\u{22c3}" => "\\bigcup",
                other => other,
            }
            .to_owned();

            Ok(ParseNode::Op(ParseNodeOp::Symbol {
                mode: context.parser.mode,
                loc: context.loc(),
                limits: true,
                always_handle_sup_sub: None,
                name,
                symbol: true,
            }))
        },
    });

    // Integrals never take limits by default.
    ctx.define_function(FunctionDefSpec {
        names: &[
            "\\int",
            "\\iint",
            "\\iiint",
            "\\oint",
            "\\oiint",
            "\\oiiint",
            "\u{222b}",
            "\u{222c}",
            "\u{222d}",
            "\u{222e}",
        ],
        props: FunctionPropSpec::default(),
        handler: |context: FunctionContext, _args, _opt_args| {
            let name = match context.func_name.as_str() {
                "\u{222b}" => "\\int",
                "\u{222c}" => "\\iint",
                "\u{222d}" => "\\iiint",
                "\u{222e}" => "\\oint",
                other => other,
            }
            .to_owned();

            Ok(ParseNode::Op(ParseNodeOp::Symbol {
                mode: context.parser.mode,
                loc: context.loc(),
                limits: false,
                always_handle_sup_sub: None,
                name,
                symbol: true,
            }))
        },
    });

    // Spelled-out function names; scripts attach to the side.
    ctx.define_function(FunctionDefSpec {
        names: &[
            "\\arcsin", "\\arccos", "\\arctan", "\\arg", "\\cos", "\\cosh", "\\cot", "\\coth",
            "\\csc", "\\deg", "\\dim", "\\exp", "\\hom", "\\ker", "\\lg", "\\ln", "\\log",
            "\\sec", "\\sin", "\\sinh", "\\tan", "\\tanh",
        ],
        props: FunctionPropSpec::default(),
        handler: |context: FunctionContext, _args, _opt_args| {
            Ok(ParseNode::Op(ParseNodeOp::Symbol {
                mode: context.parser.mode,
                loc: context.loc(),
                limits: false,
                always_handle_sup_sub: None,
                name: context.func_name,
                symbol: false,
            }))
        },
    });

    // Limit-style operators; scripts typeset above and below.
    ctx.define_function(FunctionDefSpec {
        names: &[
            "\\det", "\\gcd", "\\inf", "\\lim", "\\max", "\\min", "\\Pr", "\\sup",
        ],
        props: FunctionPropSpec::default(),
        handler: |context: FunctionContext, _args, _opt_args| {
            Ok(ParseNode::Op(ParseNodeOp::Symbol {
                mode: context.parser.mode,
                loc: context.loc(),
                limits: true,
                always_handle_sup_sub: None,
                name: context.func_name,
                symbol: false,
            }))
        },
    });

    // \mathop builds an operator out of arbitrary content.
    ctx.define_function(FunctionDefSpec {
        names: &["\\mathop"],
        props: FunctionPropSpec {
            num_args: 1,
            ..Default::default()
        },
        handler: |context: FunctionContext, args, _opt_args| {
            Ok(ParseNode::Op(ParseNodeOp::Body {
                mode: context.parser.mode,
                loc: context.loc(),
                limits: false,
                always_handle_sup_sub: None,
                body: ord_argument(&args[0]),
            }))
        },
    });
}
