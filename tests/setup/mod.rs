use std::{
    panic::{UnwindSafe, catch_unwind},
    sync::OnceLock,
};

use mathtex::{
    MathContext, ParseError, Settings, StrictSetting, TrustSetting, parse,
    parser::parse_node::{ParseNode, ParseNodeOp},
};

static DEFAULT_CONTEXT: OnceLock<MathContext> = OnceLock::new();
pub fn default_ctx() -> &'static MathContext {
    DEFAULT_CONTEXT.get_or_init(MathContext::default)
}

pub struct TestExpr<'a> {
    pub expr: String,
    pub ctx: &'a MathContext,
}

/// Set all `loc` fields to `None` for structural comparison.
pub fn strip_positions(nodes: &mut [ParseNode]) {
    for node in nodes.iter_mut() {
        match node {
            ParseNode::OrdGroup(n) => {
                n.loc = None;
                strip_positions(&mut n.body);
            }
            ParseNode::SupSub(n) => {
                n.loc = None;
                if let Some(base) = &mut n.base {
                    strip_positions_single(base);
                }
                if let Some(sup) = &mut n.sup {
                    strip_positions_single(sup);
                }
                if let Some(sub) = &mut n.sub {
                    strip_positions_single(sub);
                }
            }
            ParseNode::Genfrac(n) => {
                n.loc = None;
                strip_positions_single(&mut n.numer);
                strip_positions_single(&mut n.denom);
            }
            ParseNode::Sqrt(n) => {
                n.loc = None;
                strip_positions_single(&mut n.body);
                if let Some(index) = &mut n.index {
                    strip_positions_single(index);
                }
            }
            ParseNode::LeftRight(n) => {
                n.loc = None;
                strip_positions(&mut n.body);
            }
            ParseNode::LeftRightRight(n) => n.loc = None,
            ParseNode::Middle(n) => n.loc = None,
            ParseNode::Atom(n) => n.loc = None,
            ParseNode::MathOrd(n) => n.loc = None,
            ParseNode::TextOrd(n) => n.loc = None,
            ParseNode::Spacing(n) => n.loc = None,
            ParseNode::AccentToken(n) => n.loc = None,
            ParseNode::OpToken(n) => n.loc = None,
            ParseNode::Op(op) => match op {
                ParseNodeOp::Symbol { loc, .. } => *loc = None,
                ParseNodeOp::Body { loc, body, .. } => {
                    *loc = None;
                    strip_positions(body);
                }
            },
            ParseNode::OperatorName(n) => {
                n.loc = None;
                strip_positions(&mut n.body);
            }
            ParseNode::Text(n) => {
                n.loc = None;
                strip_positions(&mut n.body);
            }
            ParseNode::Styling(n) => {
                n.loc = None;
                strip_positions(&mut n.body);
            }
            ParseNode::Color(n) => {
                n.loc = None;
                strip_positions(&mut n.body);
            }
            ParseNode::ColorToken(n) => n.loc = None,
            ParseNode::Accent(n) => {
                n.loc = None;
                strip_positions_single(&mut n.base);
            }
            ParseNode::Infix(n) => n.loc = None,
            ParseNode::Kern(n) => n.loc = None,
            ParseNode::Rule(n) => n.loc = None,
            ParseNode::Size(n) => n.loc = None,
            ParseNode::Url(n) => n.loc = None,
            ParseNode::Raw(n) => n.loc = None,
            ParseNode::Verb(n) => n.loc = None,
            ParseNode::Href(n) => {
                n.loc = None;
                strip_positions(&mut n.body);
            }
            ParseNode::Html(n) => {
                n.loc = None;
                strip_positions(&mut n.body);
            }
            ParseNode::Hbox(n) => {
                n.loc = None;
                strip_positions(&mut n.body);
            }
            ParseNode::Mclass(n) => {
                n.loc = None;
                strip_positions(&mut n.body);
            }
            ParseNode::Internal(n) => n.loc = None,
        }
    }
}

fn strip_positions_single(node: &mut ParseNode) {
    strip_positions(core::slice::from_mut(node));
}

impl TestExpr<'_> {
    pub fn to_parse(self, settings: &Settings) -> Result<(), ParseError> {
        parse(self.ctx, &self.expr, settings).map(|_| ())
    }

    pub fn not_to_parse(self, settings: &Settings) -> Result<(), ParseError> {
        match parse(self.ctx, &self.expr, settings) {
            Ok(_) => Err(ParseError::new(format!(
                "Expected parsing to fail for '{}'",
                self.expr
            ))),
            Err(_) => Ok(()),
        }
    }

    pub fn to_parse_like(self, other: &str, settings: &Settings) -> Result<(), ParseError> {
        let mut tree1 = parse(self.ctx, &self.expr, settings)?;
        let mut tree2 = parse(self.ctx, other, settings)?;

        strip_positions(&mut tree1);
        strip_positions(&mut tree2);

        assert_eq!(
            tree1, tree2,
            "Parse trees do not match between '{}' and '{}'",
            self.expr, other
        );
        Ok(())
    }
}

pub fn expect_impl(expr: &str) -> TestExpr<'static> {
    TestExpr {
        expr: expr.to_string(),
        ctx: default_ctx(),
    }
}

#[macro_export]
macro_rules! expect {
    ($e:expr) => {
        $crate::expect_impl($e)
    };
}

// Every test function is a "describe" block; `it` runs one scenario and
// reports which one failed.
pub fn it<F>(desc: &str, test_fn: F)
where
    F: FnOnce() -> Result<(), ParseError> + UnwindSafe,
{
    match catch_unwind(test_fn) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => panic!("Test '{desc}' failed with Result::Err: {e}"),
        Err(payload) => {
            let msg = if let Some(s) = payload.downcast_ref::<&str>() {
                (*s).to_string()
            } else if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "<non-string panic payload>".to_string()
            };
            panic!("Test '{desc}' panicked: {msg}");
        }
    }
}

/// Settings helpers
pub fn strict_settings() -> Settings {
    Settings::builder()
        .throw_on_error(true)
        .strict(StrictSetting::Bool(true))
        .build()
}

pub fn nonstrict_settings() -> Settings {
    Settings::builder()
        .throw_on_error(false)
        .strict(StrictSetting::Bool(false))
        .build()
}

pub fn trust_settings() -> Settings {
    Settings::builder().trust(TrustSetting::Bool(true)).build()
}

pub fn get_parsed(expr: &str, settings: &Settings) -> Result<Vec<ParseNode>, ParseError> {
    parse(default_ctx(), expr, settings)
}

pub fn get_parsed_strict(expr: &str) -> Result<Vec<ParseNode>, ParseError> {
    let settings = strict_settings();
    parse(default_ctx(), expr, &settings)
}

pub fn get_parsed_trust(expr: &str) -> Result<Vec<ParseNode>, ParseError> {
    let settings = trust_settings();
    parse(default_ctx(), expr, &settings)
}

#[macro_export]
macro_rules! assert_let {
    ($pat:pat = $expr:expr, $($arg:tt)+) => {
        let $pat = $expr else {
            panic!($($arg)+);
        };
    };
    ($pat:pat = $expr:expr) => {
        let $pat = $expr else {
            panic!(
                "assert_let failed: pattern `{}` did not match {} at {}:{}\n{:#?}",
                stringify!($pat), stringify!($expr),
                file!(), line!(),
                $expr
            );
        };
    };
}
