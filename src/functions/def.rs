//! Macro definition commands: `\def`, `\gdef`, `\edef`, `\xdef`, and the
//! `\global`/`\long` prefixes. These read raw tokens from the gullet and
//! mutate the macro namespace; they leave only an internal node behind.

use phf::phf_map;

use crate::context::MathContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec};
use crate::parser::parse_node::{ParseNode, ParseNodeInternal};

use crate::macros::{MacroContextInterface as _, MacroDefinition, MacroExpansion};
use crate::types::{ParseError, ParseErrorKind};

const GLOBAL_MAP: phf::Map<&'static str, &'static str> = phf_map! {
    "\\global" => "\\global",
    "\\long" => r"\\globallong",
    r"\\globallong" => r"\\globallong",
    "\\def" => "\\gdef",
    "\\gdef" => "\\gdef",
    "\\edef" => "\\xdef",
    "\\xdef" => "\\xdef",
};

pub fn define_def(ctx: &mut MathContext) {
    define_prefix(ctx);
    define_def_family(ctx);
}

/// `\global` and `\long` prefix the following definition command; `\long` is
/// accepted and ignored beyond its rewriting effect.
fn define_prefix(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        names: &["\\global", "\\long", r"\\globallong"],
        props: FunctionPropSpec {
            allowed_in_text: true,
            ..Default::default()
        },
        handler: |context: FunctionContext, _args, _opt_args| {
            context.parser.consume_spaces()?;
            let mut token = context.parser.fetch()?.clone();
            let Some(&replacement) = GLOBAL_MAP.get(token.text.as_str()) else {
                return Err(ParseError::with_token(
                    ParseErrorKind::InvalidTokenAfterMacroPrefix {
                        token: token.text.to_owned_string(),
                    },
                    &token,
                ));
            };
            context.parser.consume();

            if (context.func_name == "\\global" || context.func_name == r"\\globallong")
                && replacement != token.text.as_str()
            {
                token.set_text(replacement);
            }
            context.parser.gullet.push_token(token);

            context
                .parser
                .parse_function(context.break_on_token_text, None, None)?
                .ok_or_else(|| ParseError::new(ParseErrorKind::ExpectedFunctionAfterPrefix))
        },
    });
}

fn define_def_family(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        names: &["\\def", "\\gdef", "\\edef", "\\xdef"],
        props: FunctionPropSpec {
            allowed_in_text: true,
            ..Default::default()
        },
        handler: |context: FunctionContext, _args, _opt_args| {
            let name_token = context.parser.gullet.pop_token()?;
            let name = name_token.text.to_owned_string();
            if matches!(
                name.as_str(),
                "\\" | "{" | "}" | "$" | "&" | "#" | "^" | "_" | "EOF"
            ) {
                return Err(ParseError::with_token(
                    ParseErrorKind::ExpectedControlSequence,
                    &name_token,
                ));
            }

            // Scan the parameter text: delimiter tokens interleaved with #1
            // ... #9, up to the opening brace of the body.
            let mut num_args = 0usize;
            let mut delimiters: Vec<Vec<String>> = vec![Vec::new()];
            let mut insert: Option<crate::types::Token> = None;

            loop {
                let next = context.parser.gullet.future_mut()?;
                if next.text == "{" {
                    break;
                }
                let tok = context.parser.gullet.pop_token()?;
                if tok.text == "#" {
                    // A # right before the body copies the { as a delimiter
                    // and into the replacement (TeXbook exercise 20.10).
                    if context.parser.gullet.future_mut()?.text == "{" {
                        insert = Some(context.parser.gullet.future_mut()?);
                        delimiters[num_args].push("{".to_owned());
                        break;
                    }

                    let arg_token = context.parser.gullet.pop_token()?;
                    let digit = arg_token.text.as_str();
                    if digit.len() != 1 || !digit.chars().next().is_some_and(|c| c.is_ascii_digit() && c != '0') {
                        return Err(ParseError::with_token(
                            ParseErrorKind::InvalidMacroArgumentNumber {
                                value: digit.to_owned(),
                            },
                            &arg_token,
                        ));
                    }
                    let arg_num: usize = digit
                        .parse()
                        .map_err(|_| ParseError::new(ParseErrorKind::InvalidArgumentNumber))?;
                    if arg_num != num_args + 1 {
                        return Err(ParseError::with_token(
                            ParseErrorKind::ExpectedMacroParameter {
                                expected: num_args + 1,
                                found: arg_num,
                            },
                            &arg_token,
                        ));
                    }
                    num_args += 1;
                    delimiters.push(Vec::new());
                } else if tok.text == "EOF" {
                    return Err(ParseError::with_token(
                        ParseErrorKind::ExpectedMacroDefinition,
                        &tok,
                    ));
                } else {
                    delimiters[num_args].push(tok.text.to_owned_string());
                }
            }

            let arg = context.parser.gullet.consume_arg(None)?;
            let mut tokens = arg.tokens;
            if let Some(insert_token) = insert {
                tokens.insert(0, insert_token);
            }

            let global = matches!(context.func_name.as_str(), "\\gdef" | "\\xdef");
            if matches!(context.func_name.as_str(), "\\edef" | "\\xdef") {
                // Expand the replacement text now.
                tokens = context.parser.gullet.expand_tokens(tokens)?;
                tokens.reverse();
            }

            context.parser.gullet.macros_mut().set(
                &name,
                Some(MacroDefinition::Expansion(MacroExpansion {
                    tokens,
                    num_args,
                    delimiters: Some(delimiters),
                })),
                global,
            );

            Ok(ParseNode::Internal(ParseNodeInternal {
                mode: context.parser.mode,
                loc: context.loc(),
            }))
        },
    });
}
