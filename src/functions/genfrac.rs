//! Fractions and binomials, including the infix spellings (`\over`,
//! `\choose`, `\above`) that get rewritten into prefix form.

use crate::context::MathContext;
use crate::define_function::{
    FunctionContext, FunctionDefSpec, FunctionPropSpec, normalize_argument,
};
use crate::parser::parse_node::{
    ParseNode, ParseNodeGenfrac, ParseNodeInfix,
};
use crate::symbols::Atom;
use crate::types::{ArgType, ParseError, ParseErrorKind, StyleVariant};
use phf::phf_map;

const INFIX_REPLACE_MAP: phf::Map<&'static str, &'static str> = phf_map! {
    "\\over" => "\\frac",
    "\\choose" => "\\binom",
    "\\atop" => r"\\atopfrac",
    "\\brace" => r"\\bracefrac",
    "\\brack" => r"\\brackfrac",
};

fn delim_from_value(delim: &str) -> Option<String> {
    if delim.is_empty() || delim == "." {
        None
    } else {
        Some(delim.to_owned())
    }
}

fn style_from_digit(digit: &str) -> Option<StyleVariant> {
    match digit {
        "0" => Some(StyleVariant::Display),
        "1" => Some(StyleVariant::Text),
        "2" => Some(StyleVariant::Script),
        "3" => Some(StyleVariant::ScriptScript),
        _ => None,
    }
}

pub fn define_genfrac(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        names: &[
            "\\dfrac",
            "\\frac",
            "\\tfrac",
            "\\dbinom",
            "\\binom",
            "\\tbinom",
            r"\\atopfrac", // can't be entered directly
            r"\\bracefrac",
            r"\\brackfrac", // ditto
        ],
        props: FunctionPropSpec {
            num_args: 2,
            greediness: 2,
            ..Default::default()
        },
        handler: |context: FunctionContext, mut args, _opt_args| {
            let denom = args.pop().ok_or_else(|| ParseError::new(ParseErrorKind::NullArgument))?;
            let numer = args.pop().ok_or_else(|| ParseError::new(ParseErrorKind::NullArgument))?;

            let (left_delim, right_delim, has_bar_line) = match context.func_name.as_str() {
                "\\dfrac" | "\\frac" | "\\tfrac" => (None, None, true),
                "\\dbinom" | "\\binom" | "\\tbinom" => {
                    (Some("(".to_owned()), Some(")".to_owned()), false)
                }
                "\\\\atopfrac" => (None, None, false),
                "\\\\bracefrac" => (Some("\\{".to_owned()), Some("\\}".to_owned()), false),
                "\\\\brackfrac" => (Some("[".to_owned()), Some("]".to_owned()), false),
                _ => {
                    return Err(ParseError::new(ParseErrorKind::UnrecognizedGenfracCommand {
                        command: context.func_name.clone(),
                    }));
                }
            };

            let size = match context.func_name.as_str() {
                "\\dfrac" | "\\dbinom" => Some(StyleVariant::Display),
                "\\tfrac" | "\\tbinom" => Some(StyleVariant::Text),
                _ => None,
            };

            Ok(ParseNode::Genfrac(Box::new(ParseNodeGenfrac {
                mode: context.parser.mode,
                loc: context.loc(),
                continued: false,
                numer,
                denom,
                has_bar_line,
                left_delim,
                right_delim,
                size,
                bar_size: None,
            })))
        },
    });

    ctx.define_function(FunctionDefSpec {
        names: &["\\cfrac"],
        props: FunctionPropSpec {
            num_args: 2,
            greediness: 2,
            ..Default::default()
        },
        handler: |context: FunctionContext, mut args, _opt_args| {
            let denom = args.pop().ok_or_else(|| ParseError::new(ParseErrorKind::NullArgument))?;
            let numer = args.pop().ok_or_else(|| ParseError::new(ParseErrorKind::NullArgument))?;

            Ok(ParseNode::Genfrac(Box::new(ParseNodeGenfrac {
                mode: context.parser.mode,
                loc: context.loc(),
                continued: true,
                numer,
                denom,
                has_bar_line: true,
                left_delim: None,
                right_delim: None,
                size: Some(StyleVariant::Display),
                bar_size: None,
            })))
        },
    });

    // Infix fraction spellings: parsed as placeholders, rewritten by the
    // expression parser.
    ctx.define_function(FunctionDefSpec {
        names: &["\\over", "\\choose", "\\atop", "\\brace", "\\brack"],
        props: FunctionPropSpec {
            infix: true,
            ..Default::default()
        },
        handler: |context: FunctionContext, _args, _opt_args| {
            let Some(&replace_with) = INFIX_REPLACE_MAP.get(context.func_name.as_str()) else {
                let kind = ParseErrorKind::UnrecognizedInfixGenfracCommand {
                    command: context.func_name.clone(),
                };
                return Err(match context.token {
                    Some(token) => ParseError::with_token(kind, token),
                    None => ParseError::new(kind),
                });
            };
            Ok(ParseNode::Infix(ParseNodeInfix {
                mode: context.parser.mode,
                loc: context.loc(),
                replace_with: replace_with.to_owned(),
                size: None,
                token: context.token.cloned(),
            }))
        },
    });

    // \above takes the bar thickness inline.
    ctx.define_function(FunctionDefSpec {
        names: &["\\above"],
        props: FunctionPropSpec {
            num_args: 1,
            arg_types: Some(vec![ArgType::Size]),
            infix: true,
            ..Default::default()
        },
        handler: |context: FunctionContext, args, _opt_args| {
            let ParseNode::Size(size) = &args[0] else {
                return Err(ParseError::new("\\above argument must be a size"));
            };
            Ok(ParseNode::Infix(ParseNodeInfix {
                mode: context.parser.mode,
                loc: context.loc(),
                replace_with: "\\\\abovefrac".to_owned(),
                size: Some(size.value.clone()),
                token: context.token.cloned(),
            }))
        },
    });

    ctx.define_function(FunctionDefSpec {
        names: &["\\\\abovefrac"],
        props: FunctionPropSpec {
            num_args: 3,
            ..Default::default()
        },
        handler: |context: FunctionContext, mut args, _opt_args| {
            let denom = args.pop().ok_or_else(|| ParseError::new(ParseErrorKind::NullArgument))?;
            let infix_node = args.pop().ok_or_else(|| ParseError::new(ParseErrorKind::NullArgument))?;
            let numer = args.pop().ok_or_else(|| ParseError::new(ParseErrorKind::NullArgument))?;

            let ParseNode::Infix(infix) = infix_node else {
                return Err(ParseError::new(
                    "\\\\abovefrac second argument must be an infix node",
                ));
            };
            let bar_size = infix.size;
            let has_bar_line = bar_size.as_ref().is_some_and(|size| size.number > 0.0);

            Ok(ParseNode::Genfrac(Box::new(ParseNodeGenfrac {
                mode: context.parser.mode,
                loc: context.loc(),
                continued: false,
                numer,
                denom,
                has_bar_line,
                left_delim: None,
                right_delim: None,
                size: None,
                bar_size,
            })))
        },
    });

    // \genfrac spells every piece out: delimiters, bar thickness, style,
    // numerator, denominator.
    ctx.define_function(FunctionDefSpec {
        names: &["\\genfrac"],
        props: FunctionPropSpec {
            num_args: 6,
            greediness: 6,
            arg_types: Some(vec![
                ArgType::Mode(crate::types::Mode::Math),
                ArgType::Mode(crate::types::Mode::Math),
                ArgType::Size,
                ArgType::Mode(crate::types::Mode::Text),
                ArgType::Original,
                ArgType::Original,
            ]),
            ..Default::default()
        },
        handler: |context: FunctionContext, mut args, _opt_args| {
            let denom = args.pop().ok_or_else(|| ParseError::new(ParseErrorKind::NullArgument))?;
            let numer = args.pop().ok_or_else(|| ParseError::new(ParseErrorKind::NullArgument))?;

            let left_delim = match normalize_argument(&args[0]) {
                ParseNode::Atom(atom) if atom.family == Atom::Open => delim_from_value(&atom.text),
                _ => None,
            };
            let right_delim = match normalize_argument(&args[1]) {
                ParseNode::Atom(atom) if atom.family == Atom::Close => delim_from_value(&atom.text),
                _ => None,
            };

            let ParseNode::Size(bar_node) = &args[2] else {
                return Err(ParseError::new("\\genfrac bar size must be a size"));
            };
            let (has_bar_line, bar_size) = if bar_node.is_blank {
                // \genfrac{}{}{}{}... with an empty thickness draws the
                // default bar.
                (true, None)
            } else {
                (bar_node.value.number > 0.0, Some(bar_node.value.clone()))
            };

            let size = match &args[3] {
                ParseNode::OrdGroup(group) => match group.body.first() {
                    Some(ParseNode::TextOrd(ord)) => {
                        Some(style_from_digit(&ord.text).ok_or_else(|| {
                            ParseError::new(ParseErrorKind::InvalidGenfracStyle {
                                level: ord.text.clone(),
                            })
                        })?)
                    }
                    Some(_) => {
                        return Err(ParseError::new(ParseErrorKind::InvalidGenfracStyle {
                            level: "non-digit".to_owned(),
                        }));
                    }
                    None => None,
                },
                ParseNode::TextOrd(ord) => Some(style_from_digit(&ord.text).ok_or_else(|| {
                    ParseError::new(ParseErrorKind::InvalidGenfracStyle {
                        level: ord.text.clone(),
                    })
                })?),
                _ => {
                    return Err(ParseError::new(ParseErrorKind::InvalidGenfracStyle {
                        level: "non-digit".to_owned(),
                    }));
                }
            };

            Ok(ParseNode::Genfrac(Box::new(ParseNodeGenfrac {
                mode: context.parser.mode,
                loc: context.loc(),
                continued: false,
                numer,
                denom,
                has_bar_line,
                left_delim,
                right_delim,
                size,
                bar_size,
            })))
        },
    });
}
