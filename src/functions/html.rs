//! The `\html*` extension commands, which attach HTML attributes to a group.
//! Disabled under strict mode and gated on the trust policy.

use crate::context::MathContext;
use crate::define_function::{FunctionContext, FunctionDefSpec, FunctionPropSpec, ord_argument};
use crate::namespace::KeyMap;
use crate::parser::parse_node::{ParseNode, ParseNodeHtml};
use crate::types::{ArgType, ErrorLocationProvider, ParseError, ParseErrorKind, TrustContext};

pub fn define_html(ctx: &mut MathContext) {
    ctx.define_function(FunctionDefSpec {
        names: &["\\htmlClass", "\\htmlId", "\\htmlStyle", "\\htmlData"],
        props: FunctionPropSpec {
            num_args: 2,
            arg_types: Some(vec![ArgType::Raw, ArgType::Original]),
            allowed_in_text: true,
            ..Default::default()
        },
        handler: |context: FunctionContext, args, _opt_args| {
            let ParseNode::Raw(raw) = &args[0] else {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedRawStringFirstArgument,
                ));
            };
            let value = raw.string.clone();

            context.parser.settings.report_nonstrict(
                "htmlExtension",
                "HTML extension is disabled on strict mode",
                context.token.map(|t| t as &dyn ErrorLocationProvider),
            )?;

            let mut attributes: KeyMap<String, String> = KeyMap::default();
            let mut trust_context = match context.func_name.as_str() {
                "\\htmlClass" => {
                    attributes.insert("class".to_owned(), value.clone());
                    TrustContext {
                        command: "\\htmlClass".to_owned(),
                        class: Some(value),
                        ..Default::default()
                    }
                }
                "\\htmlId" => {
                    attributes.insert("id".to_owned(), value.clone());
                    TrustContext {
                        command: "\\htmlId".to_owned(),
                        id: Some(value),
                        ..Default::default()
                    }
                }
                "\\htmlStyle" => {
                    attributes.insert("style".to_owned(), value.clone());
                    TrustContext {
                        command: "\\htmlStyle".to_owned(),
                        style: Some(value),
                        ..Default::default()
                    }
                }
                _ => {
                    // \htmlData takes comma-separated key=value pairs.
                    for part in value.split(',') {
                        let Some((key, val)) = part.split_once('=') else {
                            return Err(ParseError::new(
                                ParseErrorKind::HtmlDataKeyValueParseError,
                            ));
                        };
                        attributes.insert(format!("data-{}", key.trim()), val.trim().to_owned());
                    }
                    TrustContext {
                        command: "\\htmlData".to_owned(),
                        attributes: Some(attributes.clone()),
                        ..Default::default()
                    }
                }
            };

            if !context.parser.settings.is_trusted(&mut trust_context) {
                let name = context.func_name.clone();
                return Ok(ParseNode::Color(
                    context.parser.format_unsupported_cmd(&name),
                ));
            }

            Ok(ParseNode::Html(ParseNodeHtml {
                mode: context.parser.mode,
                loc: context.loc(),
                attributes,
                body: ord_argument(&args[1]),
            }))
        },
    });
}
