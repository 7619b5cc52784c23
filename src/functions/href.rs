//! Hyperlinks: `\href` and `\url`. Both are gated on the trust policy; an
//! untrusted command degrades to error-colored text instead of failing.

use crate::context::MathContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec, ord_argument};
use crate::parser::parse_node::{
    ParseNode, ParseNodeHref, ParseNodeText, ParseNodeTextOrd,
};
use crate::types::{ArgType, Mode, ParseError, TrustContext};

pub fn define_href(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        names: &["\\href"],
        props: FunctionPropSpec {
            num_args: 2,
            arg_types: Some(vec![ArgType::Url, ArgType::Original]),
            allowed_in_text: true,
            ..Default::default()
        },
        handler: |context: FunctionContext, args, _opt_args| {
            let ParseNode::Url(url) = &args[0] else {
                return Err(ParseError::new("First argument to \\href must be a URL"));
            };
            let href = url.url.clone();

            let mut trust_context = TrustContext {
                command: "\\href".to_owned(),
                url: Some(href.clone()),
                ..Default::default()
            };
            if !context.parser.settings.is_trusted(&mut trust_context) {
                return Ok(ParseNode::Color(
                    context.parser.format_unsupported_cmd("\\href"),
                ));
            }

            Ok(ParseNode::Href(ParseNodeHref {
                mode: context.parser.mode,
                loc: context.loc(),
                href,
                body: ord_argument(&args[1]),
            }))
        },
    });

    ctx.define_function(FunctionDefSpec {
        names: &["\\url"],
        props: FunctionPropSpec {
            num_args: 1,
            arg_types: Some(vec![ArgType::Url]),
            allowed_in_text: true,
            ..Default::default()
        },
        handler: |context: FunctionContext, args, _opt_args| {
            let ParseNode::Url(url) = &args[0] else {
                return Err(ParseError::new("Argument to \\url must be a URL"));
            };
            let href = url.url.clone();

            let mut trust_context = TrustContext {
                command: "\\url".to_owned(),
                url: Some(href.clone()),
                ..Default::default()
            };
            if !context.parser.settings.is_trusted(&mut trust_context) {
                return Ok(ParseNode::Color(
                    context.parser.format_unsupported_cmd("\\url"),
                ));
            }

            // The link text is the URL itself, set in typewriter with ~
            // spelled out.
            let chars = href
                .chars()
                .map(|ch| {
                    let text = if ch == '~' {
                        "\\textasciitilde".to_owned()
                    } else {
                        ch.to_string()
                    };
                    ParseNode::TextOrd(ParseNodeTextOrd {
                        mode: Mode::Text,
                        loc: None,
                        text,
                    })
                })
                .collect();
            let body = ParseNode::Text(ParseNodeText {
                mode: context.parser.mode,
                loc: None,
                body: chars,
                font: Some("\\texttt".to_owned()),
            });

            Ok(ParseNode::Href(ParseNodeHref {
                mode: context.parser.mode,
                loc: context.loc(),
                href,
                body: vec![body],
            }))
        },
    });
}
