//! The AST: a closed sum of typed nodes produced by the parser.
//!
//! Every node carries its parsing [`Mode`] and an optional source location.
//! [`NodeType`] is the derived discriminant enum, serialized the way node
//! kinds are spelled in error messages (`color-token`, `op-token`, ...).

use crate::namespace::KeyMap;
use crate::symbols::Atom;
use crate::types::{ErrorLocationProvider, Mode, SourceLocation, StyleVariant, Token};
use crate::units::Measurement;

use strum::{AsRefStr, Display, EnumDiscriminants};

/// Alias used throughout the crate.
pub type ParseNode = AnyParseNode;

/// Every node kind the parser can produce.
#[derive(Debug, Clone, PartialEq, EnumDiscriminants)]
#[strum_discriminants(vis(pub))]
#[strum_discriminants(doc = "Discriminant tags for [`AnyParseNode`] variants")]
#[strum_discriminants(derive(Display, Hash, AsRefStr), strum(serialize_all = "lowercase"))]
#[strum_discriminants(name(NodeType))]
pub enum AnyParseNode {
    /// Brace-delimited group of nodes.
    OrdGroup(ParseNodeOrdGroup),
    /// Base with superscript and/or subscript.
    SupSub(ParseNodeSupSub),
    /// Generalized fraction.
    Genfrac(Box<ParseNodeGenfrac>),
    /// Square or nth root.
    Sqrt(Box<ParseNodeSqrt>),
    /// `\left ... \right` delimited expression.
    LeftRight(ParseNodeLeftRight),
    #[strum_discriminants(strum(serialize = "leftright-right"))]
    /// The `\right` half, produced while parsing its `\left`.
    LeftRightRight(ParseNodeLeftRightRight),
    /// `\middle` delimiter.
    Middle(ParseNodeMiddle),

    /// Symbol with an atom spacing family.
    Atom(ParseNodeAtom),
    /// Ordinary math symbol.
    MathOrd(ParseNodeMathOrd),
    /// Ordinary text symbol.
    TextOrd(ParseNodeTextOrd),
    /// Explicit spacing command.
    Spacing(ParseNodeSpacing),
    #[strum_discriminants(strum(serialize = "accent-token"))]
    /// Standalone accent character.
    AccentToken(ParseNodeAccentToken),
    #[strum_discriminants(strum(serialize = "op-token"))]
    /// Operator-like symbol.
    OpToken(ParseNodeOpToken),
    /// Big operator or named function.
    Op(ParseNodeOp),
    /// `\operatorname` operator.
    OperatorName(ParseNodeOperatorName),

    /// Text run inside math.
    Text(ParseNodeText),
    /// Style switch (`\displaystyle` etc.) applied to trailing siblings.
    Styling(ParseNodeStyling),
    /// Colored subexpression.
    Color(ParseNodeColor),
    #[strum_discriminants(strum(serialize = "color-token"))]
    /// A parsed color argument.
    ColorToken(ParseNodeColorToken),

    /// Accent over a base.
    Accent(Box<ParseNodeAccent>),
    /// Infix operator placeholder, rewritten before expressions are returned.
    Infix(ParseNodeInfix),
    /// Fixed-width kern.
    Kern(ParseNodeKern),
    /// Filled rule.
    Rule(ParseNodeRule),
    /// A parsed size argument.
    Size(ParseNodeSize),
    /// A parsed URL argument.
    Url(ParseNodeUrl),
    /// A raw string argument.
    Raw(ParseNodeRaw),
    /// Verbatim text.
    Verb(ParseNodeVerb),
    /// Hyperlink.
    Href(ParseNodeHref),
    /// HTML span with custom attributes.
    Html(ParseNodeHtml),
    /// Horizontal box.
    Hbox(ParseNodeHbox),
    /// Forced math class (`\mathbin` etc.).
    Mclass(ParseNodeMclass),
    /// Side-effect-only command; dropped from expression bodies.
    Internal(ParseNodeInternal),
}

impl AnyParseNode {
    /// The node's parsing mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        match self {
            Self::OrdGroup(n) => n.mode,
            Self::SupSub(n) => n.mode,
            Self::Genfrac(n) => n.mode,
            Self::Sqrt(n) => n.mode,
            Self::LeftRight(n) => n.mode,
            Self::LeftRightRight(n) => n.mode,
            Self::Middle(n) => n.mode,
            Self::Atom(n) => n.mode,
            Self::MathOrd(n) => n.mode,
            Self::TextOrd(n) => n.mode,
            Self::Spacing(n) => n.mode,
            Self::AccentToken(n) => n.mode,
            Self::OpToken(n) => n.mode,
            Self::Op(op) => match op {
                ParseNodeOp::Symbol { mode, .. } | ParseNodeOp::Body { mode, .. } => *mode,
            },
            Self::OperatorName(n) => n.mode,
            Self::Text(n) => n.mode,
            Self::Styling(n) => n.mode,
            Self::Color(n) => n.mode,
            Self::ColorToken(n) => n.mode,
            Self::Accent(n) => n.mode,
            Self::Infix(n) => n.mode,
            Self::Kern(n) => n.mode,
            Self::Rule(n) => n.mode,
            Self::Size(n) => n.mode,
            Self::Url(n) => n.mode,
            Self::Raw(n) => n.mode,
            Self::Verb(n) => n.mode,
            Self::Href(n) => n.mode,
            Self::Html(n) => n.mode,
            Self::Hbox(n) => n.mode,
            Self::Mclass(n) => n.mode,
            Self::Internal(n) => n.mode,
        }
    }

    /// The symbol text, for the leaf kinds that carry one.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Atom(n) => Some(&n.text),
            Self::MathOrd(n) => Some(&n.text),
            Self::TextOrd(n) => Some(&n.text),
            Self::Spacing(n) => Some(&n.text),
            Self::AccentToken(n) => Some(&n.text),
            Self::OpToken(n) => Some(&n.text),
            _ => None,
        }
    }

    /// The innermost element of single-element groups and color wrappers.
    #[must_use]
    pub fn to_base_elem(&self) -> &Self {
        match self {
            Self::OrdGroup(ord) if ord.body.len() == 1 => ord.body[0].to_base_elem(),
            Self::Color(color) if color.body.len() == 1 => color.body[0].to_base_elem(),
            _ => self,
        }
    }

    /// Whether this is a "character box" in the TeXbook sense: its innermost
    /// group is a single character.
    #[must_use]
    pub fn is_character_box(&self) -> bool {
        matches!(
            self.to_base_elem(),
            Self::MathOrd(_) | Self::TextOrd(_) | Self::Atom(_)
        )
    }
}

impl ErrorLocationProvider for AnyParseNode {
    fn loc(&self) -> Option<&SourceLocation> {
        match self {
            Self::OrdGroup(n) => n.loc.as_ref(),
            Self::SupSub(n) => n.loc.as_ref(),
            Self::Genfrac(n) => n.loc.as_ref(),
            Self::Sqrt(n) => n.loc.as_ref(),
            Self::LeftRight(n) => n.loc.as_ref(),
            Self::LeftRightRight(n) => n.loc.as_ref(),
            Self::Middle(n) => n.loc.as_ref(),
            Self::Atom(n) => n.loc.as_ref(),
            Self::MathOrd(n) => n.loc.as_ref(),
            Self::TextOrd(n) => n.loc.as_ref(),
            Self::Spacing(n) => n.loc.as_ref(),
            Self::AccentToken(n) => n.loc.as_ref(),
            Self::OpToken(n) => n.loc.as_ref(),
            Self::Op(op) => match op {
                ParseNodeOp::Symbol { loc, .. } | ParseNodeOp::Body { loc, .. } => loc.as_ref(),
            },
            Self::OperatorName(n) => n.loc.as_ref(),
            Self::Text(n) => n.loc.as_ref(),
            Self::Styling(n) => n.loc.as_ref(),
            Self::Color(n) => n.loc.as_ref(),
            Self::ColorToken(n) => n.loc.as_ref(),
            Self::Accent(n) => n.loc.as_ref(),
            Self::Infix(n) => n.loc.as_ref(),
            Self::Kern(n) => n.loc.as_ref(),
            Self::Rule(n) => n.loc.as_ref(),
            Self::Size(n) => n.loc.as_ref(),
            Self::Url(n) => n.loc.as_ref(),
            Self::Raw(n) => n.loc.as_ref(),
            Self::Verb(n) => n.loc.as_ref(),
            Self::Href(n) => n.loc.as_ref(),
            Self::Html(n) => n.loc.as_ref(),
            Self::Hbox(n) => n.loc.as_ref(),
            Self::Mclass(n) => n.loc.as_ref(),
            Self::Internal(n) => n.loc.as_ref(),
        }
    }
}

/// Brace-delimited group; `semisimple` marks `\begingroup...\endgroup`
/// groups, which are transparent to math spacing.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeOrdGroup {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub body: Vec<AnyParseNode>,
    pub semisimple: Option<bool>,
}

/// Base with scripts. At least one of `sup`/`sub` is always present.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeSupSub {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub base: Option<Box<AnyParseNode>>,
    pub sup: Option<Box<AnyParseNode>>,
    pub sub: Option<Box<AnyParseNode>>,
}

/// Generalized fraction: numerator over denominator with optional delimiters,
/// bar, and forced style.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeGenfrac {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    /// `\cfrac` sets this; continued fractions keep display sizing.
    pub continued: bool,
    pub numer: AnyParseNode,
    pub denom: AnyParseNode,
    pub has_bar_line: bool,
    pub left_delim: Option<String>,
    pub right_delim: Option<String>,
    pub size: Option<StyleVariant>,
    pub bar_size: Option<Measurement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeSqrt {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub body: AnyParseNode,
    pub index: Option<AnyParseNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeLeftRight {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub body: Vec<AnyParseNode>,
    pub left: String,
    pub right: String,
    /// Color of the right delimiter, from `\current@color`.
    pub right_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeLeftRightRight {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub delim: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeMiddle {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub delim: String,
}

/// Symbol carrying one of the atom spacing families.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeAtom {
    pub family: Atom,
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeMathOrd {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeTextOrd {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeSpacing {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeAccentToken {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeOpToken {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub text: String,
}

/// Operator node. `limits` decides whether scripts typeset above/below;
/// `always_handle_sup_sub` forces the operator to own adjacent scripts.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseNodeOp {
    /// A named operator symbol, e.g. `\sum` or `\sin`.
    Symbol {
        mode: Mode,
        loc: Option<SourceLocation>,
        limits: bool,
        always_handle_sup_sub: Option<bool>,
        name: String,
        /// Whether the name denotes a single glyph (`\sum`) rather than a
        /// spelled-out function name (`\sin`).
        symbol: bool,
    },
    /// An operator built from arbitrary content, e.g. `\mathop{...}`.
    Body {
        mode: Mode,
        loc: Option<SourceLocation>,
        limits: bool,
        always_handle_sup_sub: Option<bool>,
        body: Vec<AnyParseNode>,
    },
}

impl ParseNodeOp {
    #[must_use]
    pub const fn limits(&self) -> bool {
        match self {
            Self::Symbol { limits, .. } | Self::Body { limits, .. } => *limits,
        }
    }

    #[must_use]
    pub const fn limits_mut(&mut self) -> &mut bool {
        match self {
            Self::Symbol { limits, .. } | Self::Body { limits, .. } => limits,
        }
    }

    #[must_use]
    pub const fn always_handle_sup_sub_mut(&mut self) -> &mut Option<bool> {
        match self {
            Self::Symbol {
                always_handle_sup_sub,
                ..
            }
            | Self::Body {
                always_handle_sup_sub,
                ..
            } => always_handle_sup_sub,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeOperatorName {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub body: Vec<AnyParseNode>,
    pub always_handle_sup_sub: bool,
    pub limits: bool,
}

/// Text run; `font` is the text command that produced it, when any.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeText {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub body: Vec<AnyParseNode>,
    pub font: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeStyling {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub style: StyleVariant,
    pub body: Vec<AnyParseNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeColor {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub color: String,
    pub body: Vec<AnyParseNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeColorToken {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeAccent {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    /// The accent command, e.g. `\hat`.
    pub label: String,
    pub is_stretchy: Option<bool>,
    pub is_shifty: Option<bool>,
    pub base: AnyParseNode,
}

/// Placeholder for `\over`-style operators. Never survives into a returned
/// tree; the expression parser rewrites it into the `replace_with` function.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeInfix {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub replace_with: String,
    /// Bar thickness, for `\above`.
    pub size: Option<Measurement>,
    pub token: Option<Token>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeKern {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub dimension: Measurement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeRule {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub shift: Option<Measurement>,
    pub width: Measurement,
    pub height: Measurement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeSize {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub value: Measurement,
    /// Set when a mandatory size argument was empty and `0pt` was assumed.
    pub is_blank: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeUrl {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeRaw {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub string: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeVerb {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub body: String,
    pub star: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeHref {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub href: String,
    pub body: Vec<AnyParseNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeHtml {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub attributes: KeyMap<String, String>,
    pub body: Vec<AnyParseNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeHbox {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    pub body: Vec<AnyParseNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseNodeMclass {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
    /// Forced class name, e.g. `mbin`.
    pub mclass: String,
    pub body: Vec<AnyParseNode>,
    pub is_character_box: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNodeInternal {
    pub mode: Mode,
    pub loc: Option<SourceLocation>,
}
