//! Accent commands, math and text.

use crate::context::MathContext;
use crate::define_function::{
    FunctionContext, FunctionDefSpec, FunctionPropSpec, normalize_argument,
};
use crate::parser::parse_node::{ParseNode, ParseNodeAccent};
use crate::types::{ErrorLocationProvider, Mode};

pub fn define_accent(ctx: &mut MathContext) {
    // Fixed-size math accents.
    ctx.define_function(FunctionDefSpec {
        names: &[
            "\\acute",
            "\\grave",
            "\\ddot",
            "\\tilde",
            "\\bar",
            "\\breve",
            "\\check",
            "\\hat",
            "\\vec",
            "\\dot",
            "\\mathring",
        ],
        props: FunctionPropSpec {
            num_args: 1,
            ..Default::default()
        },
        handler: |context: FunctionContext, args, _opt_args| {
            let base = normalize_argument(&args[0]).clone();
            Ok(ParseNode::Accent(Box::new(ParseNodeAccent {
                mode: context.parser.mode,
                loc: context.loc(),
                label: context.func_name,
                is_stretchy: Some(false),
                is_shifty: Some(true),
                base,
            })))
        },
    });

    // Stretchy math accents.
    ctx.define_function(FunctionDefSpec {
        names: &["\\widehat", "\\widetilde", "\\widecheck"],
        props: FunctionPropSpec {
            num_args: 1,
            ..Default::default()
        },
        handler: |context: FunctionContext, args, _opt_args| {
            let base = normalize_argument(&args[0]).clone();
            Ok(ParseNode::Accent(Box::new(ParseNodeAccent {
                mode: context.parser.mode,
                loc: context.loc(),
                label: context.func_name,
                is_stretchy: Some(true),
                is_shifty: Some(true),
                base,
            })))
        },
    });

    ctx.define_function(FunctionDefSpec {
        names: &["\\overrightarrow", "\\overleftarrow", "\\overleftrightarrow"],
        props: FunctionPropSpec {
            num_args: 1,
            ..Default::default()
        },
        handler: |context: FunctionContext, args, _opt_args| {
            let base = normalize_argument(&args[0]).clone();
            Ok(ParseNode::Accent(Box::new(ParseNodeAccent {
                mode: context.parser.mode,
                loc: context.loc(),
                label: context.func_name,
                is_stretchy: Some(true),
                is_shifty: Some(false),
                base,
            })))
        },
    });

    // Text-mode accents, also the fold targets for combining marks.
    ctx.define_function(FunctionDefSpec {
        names: &[
            "\\'", "\\`", "\\^", "\\~", "\\=", "\\u", "\\.", "\\\"", "\\r", "\\H", "\\v",
        ],
        props: FunctionPropSpec {
            num_args: 1,
            allowed_in_text: true,
            allowed_in_math: true,
            ..Default::default()
        },
        handler: |context: FunctionContext, args, _opt_args| {
            let base = args[0].clone();
            let mut mode = context.parser.mode;
            if mode == Mode::Math {
                context.parser.settings.report_nonstrict(
                    "mathVsTextAccents",
                    &format!("LaTeX's accent {} works only in text mode", context.func_name),
                    context.token.map(|t| t as &dyn ErrorLocationProvider),
                )?;
                mode = Mode::Text;
            }
            Ok(ParseNode::Accent(Box::new(ParseNodeAccent {
                mode,
                loc: context.loc(),
                label: context.func_name,
                is_stretchy: Some(false),
                is_shifty: Some(true),
                base,
            })))
        },
    });
}
