//! The recursive-descent parser at the heart of the crate.
//!
//! The parser pulls already-expanded tokens from the [`MacroExpander`] one at
//! a time, keeping a single cached lookahead. Expressions are sequences of
//! atoms; an atom is a base group plus any super/subscripts, primes and
//! `\limits` modifiers. Functions dispatch through the registry in
//! [`MathContext`], which declares each command's arity, argument types,
//! greediness and modes. Infix operators such as `\over` are collected as
//! placeholder nodes and rewritten into prefix form before an expression is
//! returned, so no `infix` node ever survives into a finished tree.

use crate::types::SourceRangeRef as _;
use crate::{
    MathContext, ParseError, Settings,
    define_function::FunctionContext,
    define_function::FunctionSpec,
    lexer::last_non_combining_mark_index,
    macro_expander::{IMPLICIT_COMMANDS, MacroExpander},
    macros::{MacroContextInterface as _, MacroDefinition},
    symbols::{Group, NonAtom},
    types::{ArgType, BreakToken, ErrorLocationProvider, Mode, ParseErrorKind, StyleVariant, Token},
    unicode::{EXTRA_LATIN, UNICODE_SYMBOLS, get_accent_mapping, supported_codepoint},
    units::{Measurement, valid_unit},
};
use phf::phf_set;

pub mod parse_node;
use parse_node::{ParseNode, ParseNodeColor, ParseNodeSize};

/// Token texts that unconditionally end an expression.
const END_OF_EXPRESSION: phf::Set<&'static str> = phf_set! {
    "}",
    "\\endgroup",
    "\\end",
    "\\right",
    "&",
};

/// Greediness budget of `^` and `_` arguments. A function can only be a bare
/// script argument when its own greediness exceeds this.
const SUPSUB_GREEDINESS: i32 = 1;

/// Reuses a lone ordgroup instead of wrapping it in another one.
fn wrap_ordgroup(mut nodes: Vec<ParseNode>, mode: Mode) -> ParseNode {
    if nodes.len() == 1
        && let ParseNode::OrdGroup(_) = nodes[0]
    {
        return nodes.remove(0);
    }
    ParseNode::OrdGroup(parse_node::ParseNodeOrdGroup {
        mode,
        loc: None,
        body: nodes,
        semisimple: None,
    })
}

/// Whether `s` is a prefix of a size specification: optional sign, optional
/// number, up to two lowercase unit letters, spaces in between.
fn size_prefix_valid(s: &str) -> bool {
    let rest = s.strip_prefix(['+', '-']).unwrap_or(s);
    let rest = rest.trim_start_matches(' ');
    if rest.is_empty() {
        return true;
    }
    let digit_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let mut tail = &rest[digit_len..];
    if let Some(after_dot) = tail.strip_prefix('.') {
        tail = after_dot.trim_start_matches(|c: char| c.is_ascii_digit());
    } else if digit_len == 0 {
        return false;
    }
    let tail = tail.trim_start_matches(' ');
    let letter_len = tail
        .find(|c: char| !c.is_ascii_lowercase())
        .unwrap_or(tail.len());
    if letter_len > 2 {
        return false;
    }
    tail[letter_len..].chars().all(|c| c == ' ')
}

/// Splits a size specification into signed magnitude and two-letter unit.
fn parse_size_with_unit(s: &str) -> Option<(f64, String)> {
    let mut chars = s.chars().peekable();

    while chars.peek() == Some(&' ') {
        chars.next();
    }
    let mut sign = 1.0;
    match chars.peek() {
        Some('+') => {
            chars.next();
        }
        Some('-') => {
            sign = -1.0;
            chars.next();
        }
        _ => {}
    }
    while chars.peek() == Some(&' ') {
        chars.next();
    }

    let mut number = String::new();
    while chars.peek().is_some_and(char::is_ascii_digit) {
        number.push(chars.next()?);
    }
    let saw_int = !number.is_empty();
    if chars.peek() == Some(&'.') {
        chars.next();
        number.push('.');
        let mut saw_frac = false;
        while chars.peek().is_some_and(char::is_ascii_digit) {
            saw_frac = true;
            number.push(chars.next()?);
        }
        if !saw_int && !saw_frac {
            return None;
        }
    } else if !saw_int {
        return None;
    }

    while chars.peek() == Some(&' ') {
        chars.next();
    }
    let mut unit = String::new();
    for _ in 0..2 {
        let c = chars.next()?;
        if !c.is_ascii_lowercase() {
            return None;
        }
        unit.push(c);
    }

    let value: f64 = number.parse().ok()?;
    Some((sign * value, unit))
}

/// Recursive-descent parser with one cached lookahead token.
///
/// Owns the current [`Mode`], the `\left`/`\right` nesting depth (maintained
/// by the delimiter handlers), and the gullet the tokens come from. Not
/// shareable across threads; errors unwind to the caller of [`Parser::parse`].
pub struct Parser<'a> {
    /// Current parsing mode.
    pub mode: Mode,
    /// Token source: the macro expander, with the lexer behind it.
    pub gullet: MacroExpander<'a>,
    /// Configuration in effect for this parse.
    pub settings: &'a Settings,
    /// Nesting depth of `\left`/`\right` pairs, for `\middle` validation.
    pub leftright_depth: usize,
    /// The single cached lookahead token.
    next_token: Option<Token>,
    /// Function and symbol registry.
    pub ctx: &'a MathContext,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(input: &'a str, settings: &'a Settings, ctx: &'a MathContext) -> Self {
        let mode = Mode::Math;
        let gullet = MacroExpander::new(input, settings, mode, ctx);

        Self {
            mode,
            gullet,
            settings,
            leftright_depth: 0,
            next_token: None,
            ctx,
        }
    }

    /// Fails unless the lookahead text is `text`; consumes it when asked.
    pub fn expect(&mut self, text: &str, consume: bool) -> Result<(), ParseError> {
        let token = self.fetch()?;
        if token.text != text {
            return Err(ParseError::with_token(
                ParseErrorKind::ExpectedToken {
                    expected: text.to_owned(),
                    found: token.text.to_owned_string(),
                },
                token,
            ));
        }
        if consume {
            self.consume();
        }
        Ok(())
    }

    /// Discards the cached lookahead; the next [`Parser::fetch`] pulls a
    /// fresh token.
    pub fn consume(&mut self) {
        self.next_token = None;
    }

    /// The current lookahead token, pulling one from the gullet if the slot
    /// is empty.
    pub fn fetch(&mut self) -> Result<&Token, ParseError> {
        match &mut self.next_token {
            Some(token) => Ok(token),
            slot => {
                let token = self.gullet.expand_next_token()?;
                Ok(slot.get_or_insert(token))
            }
        }
    }

    /// Switches parsing mode, notifying the gullet.
    pub const fn switch_mode(&mut self, new_mode: Mode) {
        self.mode = new_mode;
        self.gullet.switch_mode(new_mode);
    }

    /// Skips consecutive space tokens.
    pub fn consume_spaces(&mut self) -> Result<(), ParseError> {
        while self.fetch()?.text == " " {
            self.consume();
        }
        Ok(())
    }

    /// Parses the whole input into a node sequence.
    ///
    /// Opens an implicit group around the expression unless
    /// [`Settings::global_group`] is set, installs the `\color` →
    /// `\textcolor` alias when requested, and requires the input to be fully
    /// consumed. Open macro scopes are unwound on every path.
    pub fn parse(&mut self) -> Result<Vec<ParseNode>, ParseError> {
        if !self.settings.global_group {
            // LaTeX opens a group for every math list, so macro definitions
            // stay local to the expression.
            self.gullet.begin_group();
        }

        if self.settings.color_is_text_color {
            self.gullet.macros_mut().set(
                "\\color",
                Some(MacroDefinition::StaticStr("\\textcolor")),
                false,
            );
        }

        let result = (|| {
            let body = self.parse_expression(false, None)?;
            self.expect("EOF", true)?;
            if !self.settings.global_group {
                self.gullet.end_group()?;
            }
            Ok(body)
        })();

        // Close anything the failed path left open.
        self.gullet.end_groups();

        result
    }

    /// Parses a sequence of atoms until a terminator.
    ///
    /// Terminators are the fixed end-of-expression set, the caller's
    /// `break_on_token_text`, any infix function when `break_on_infix` is
    /// set, and an atom parse that yields nothing. In text mode, ligatures
    /// are formed over the collected body; finally any infix placeholder is
    /// rewritten into its prefix function.
    pub fn parse_expression(
        &mut self,
        break_on_infix: bool,
        break_on_token_text: Option<&BreakToken>,
    ) -> Result<Vec<ParseNode>, ParseError> {
        let mut body: Vec<ParseNode> = Vec::new();

        loop {
            if self.mode == Mode::Math {
                self.consume_spaces()?;
            }

            let lex_text = self.fetch()?.text.to_owned_string();

            if END_OF_EXPRESSION.contains(lex_text.as_str()) {
                break;
            }
            if let Some(break_token) = break_on_token_text
                && lex_text == break_token.as_ref()
            {
                break;
            }
            if break_on_infix
                && let Some(func) = self.ctx.functions.get(&lex_text)
                && func.infix
            {
                break;
            }

            let Some(atom) = self.parse_atom(break_on_token_text)? else {
                break;
            };
            if let ParseNode::Internal(_) = atom {
                // Side-effect-only commands leave nothing behind.
                continue;
            }
            body.push(atom);
        }

        if self.mode == Mode::Text {
            self.form_ligatures(&mut body);
        }

        self.handle_infix_nodes(body)
    }

    /// Rewrites at most one infix operator in `body` into its prefix form.
    ///
    /// The siblings split into numerator and denominator around the infix
    /// node; either side that is already a lone ordgroup is reused as-is. The
    /// replacement function named by the node is then invoked, with the infix
    /// node itself threaded through as the middle argument for `\\abovefrac`.
    fn handle_infix_nodes(&mut self, mut body: Vec<ParseNode>) -> Result<Vec<ParseNode>, ParseError> {
        let mut over_index: Option<usize> = None;
        let mut func_name: Option<String> = None;
        for (i, node) in body.iter().enumerate() {
            if let ParseNode::Infix(infix) = node {
                if over_index.is_some() {
                    return Err(ParseError::with_token(
                        ParseErrorKind::MultipleInfixOperators,
                        &infix.token,
                    ));
                }
                over_index = Some(i);
                func_name = Some(infix.replace_with.clone());
            }
        }

        let (Some(over_index), Some(func_name)) = (over_index, func_name) else {
            return Ok(body);
        };

        let denom_body = body.split_off(over_index + 1);
        let mut numer_body = body;
        let infix_node = numer_body
            .pop()
            .ok_or_else(|| ParseError::new(ParseErrorKind::NullArgument))?;

        let numer = wrap_ordgroup(numer_body, self.mode);
        let denom = wrap_ordgroup(denom_body, self.mode);

        let node = if func_name == "\\\\abovefrac" {
            self.call_function(&func_name, vec![numer, infix_node, denom], vec![], None, None)?
        } else {
            self.call_function(&func_name, vec![numer, denom], vec![], None, None)?
        };
        Ok(vec![node])
    }

    /// Collapses text-mode ASCII runs into their ligature spellings, in
    /// place: `---`, `--`, `''` and ` `` `.
    #[expect(clippy::unused_self)]
    fn form_ligatures(&self, group: &mut Vec<ParseNode>) {
        let mut i = 0;
        while i + 1 < group.len() {
            let v = group[i].text().map(str::to_owned);
            if v.as_deref() == Some("-") && group[i + 1].text() == Some("-") {
                if i + 2 < group.len() && group[i + 2].text() == Some("-") {
                    let loc = group[i].loc().range_ref(group[i + 2].loc());
                    group.splice(
                        i..i + 3,
                        [ParseNode::TextOrd(parse_node::ParseNodeTextOrd {
                            mode: Mode::Text,
                            loc,
                            text: "---".to_owned(),
                        })],
                    );
                } else {
                    let loc = group[i].loc().range_ref(group[i + 1].loc());
                    group.splice(
                        i..i + 2,
                        [ParseNode::TextOrd(parse_node::ParseNodeTextOrd {
                            mode: Mode::Text,
                            loc,
                            text: "--".to_owned(),
                        })],
                    );
                }
            }
            if let Some(ch) = group[i].text()
                && (ch == "'" || ch == "`")
                && i + 1 < group.len()
                && group[i + 1].text() == Some(ch)
            {
                let ch = ch.to_owned();
                let loc = group[i].loc().range_ref(group[i + 1].loc());
                group.splice(
                    i..i + 2,
                    [ParseNode::TextOrd(parse_node::ParseNodeTextOrd {
                        mode: Mode::Text,
                        loc,
                        text: format!("{ch}{ch}"),
                    })],
                );
            }
            i += 1;
        }
    }

    /// Parses one atom: a base nucleus plus superscripts, subscripts, primes
    /// and `\limits` modifiers. Returns `None` when no atom starts here.
    fn parse_atom(
        &mut self,
        break_on_token_text: Option<&BreakToken>,
    ) -> Result<Option<ParseNode>, ParseError> {
        let mut base = self.parse_group("atom", false, None, break_on_token_text, None, false)?;

        if matches!(base, Some(ParseNode::Internal(_))) {
            // Internal nodes take no scripts; a following script gets an
            // empty base on the next round.
            return Ok(base);
        }

        if self.mode == Mode::Text {
            return Ok(base);
        }

        let mut superscript: Option<ParseNode> = None;
        let mut subscript: Option<ParseNode> = None;

        loop {
            self.consume_spaces()?;
            let lex = self.fetch()?.clone();
            match lex.text.as_str() {
                "\\limits" | "\\nolimits" => {
                    let limits = lex.text == "\\limits";
                    match &mut base {
                        Some(ParseNode::Op(op)) => {
                            *op.limits_mut() = limits;
                            *op.always_handle_sup_sub_mut() = Some(true);
                        }
                        Some(ParseNode::OperatorName(op)) if op.always_handle_sup_sub => {
                            op.limits = limits;
                        }
                        _ => {
                            return Err(ParseError::with_token(
                                ParseErrorKind::LimitsMustFollowBase,
                                &lex,
                            ));
                        }
                    }
                    self.consume();
                }
                "^" => {
                    if superscript.is_some() {
                        return Err(ParseError::with_token(
                            ParseErrorKind::DoubleSuperscript,
                            &lex,
                        ));
                    }
                    superscript = Some(self.handle_sup_subscript("superscript")?);
                }
                "_" => {
                    if subscript.is_some() {
                        return Err(ParseError::with_token(ParseErrorKind::DoubleSubscript, &lex));
                    }
                    subscript = Some(self.handle_sup_subscript("subscript")?);
                }
                "'" => {
                    if superscript.is_some() {
                        return Err(ParseError::with_token(
                            ParseErrorKind::DoubleSuperscript,
                            &lex,
                        ));
                    }
                    // A run of primes becomes an ordgroup of \prime textords;
                    // a ^ right after the run contributes its group as the
                    // final element.
                    let prime = ParseNode::TextOrd(parse_node::ParseNodeTextOrd {
                        mode: self.mode,
                        loc: None,
                        text: "\\prime".to_owned(),
                    });
                    let mut primes = vec![prime.clone()];
                    self.consume();
                    while self.fetch()?.text == "'" {
                        primes.push(prime.clone());
                        self.consume();
                    }
                    if self.fetch()?.text == "^" {
                        primes.push(self.handle_sup_subscript("superscript")?);
                    }
                    superscript = Some(ParseNode::OrdGroup(parse_node::ParseNodeOrdGroup {
                        mode: self.mode,
                        loc: None,
                        body: primes,
                        semisimple: None,
                    }));
                }
                _ => break,
            }
        }

        if superscript.is_some() || subscript.is_some() {
            Ok(Some(ParseNode::SupSub(parse_node::ParseNodeSupSub {
                mode: self.mode,
                loc: None,
                base: base.map(Box::new),
                sup: superscript.map(Box::new),
                sub: subscript.map(Box::new),
            })))
        } else {
            Ok(base)
        }
    }

    /// Parses the group following a `^` or `_`, with nice errors.
    fn handle_sup_subscript(&mut self, name: &str) -> Result<ParseNode, ParseError> {
        let symbol_token = self.fetch()?.clone();
        let symbol = symbol_token.text.to_owned_string();
        self.consume();

        let group = self.parse_group(name, false, Some(SUPSUB_GREEDINESS), None, None, true)?;
        group.ok_or_else(|| {
            ParseError::with_token(
                ParseErrorKind::ExpectedGroupAfter { name: symbol },
                &symbol_token,
            )
        })
    }

    /// Parses a group: a delimited subexpression, a function call, or a
    /// single symbol.
    ///
    /// With `optional` set, only a `[...]` group matches and its absence
    /// yields `None`. When `mode` is given, the whole call runs in that mode
    /// and the previous mode is restored on every exit path. `consume_spaces`
    /// skips leading spaces after any mode switch, so whitespace is consumed
    /// under the target mode's rules.
    fn parse_group(
        &mut self,
        name: &str,
        optional: bool,
        greediness: Option<i32>,
        break_on_token_text: Option<&BreakToken>,
        mode: Option<Mode>,
        consume_spaces: bool,
    ) -> Result<Option<ParseNode>, ParseError> {
        let outer_mode = self.mode;
        if let Some(inner_mode) = mode {
            self.switch_mode(inner_mode);
        }

        let result =
            self.parse_group_in_mode(name, optional, greediness, break_on_token_text, consume_spaces);

        if mode.is_some() {
            self.switch_mode(outer_mode);
        }
        result
    }

    fn parse_group_in_mode(
        &mut self,
        name: &str,
        optional: bool,
        greediness: Option<i32>,
        break_on_token_text: Option<&BreakToken>,
        consume_spaces: bool,
    ) -> Result<Option<ParseNode>, ParseError> {
        if consume_spaces {
            self.consume_spaces()?;
        }

        let first_token = self.fetch()?.clone();
        let text = first_token.text.to_owned_string();

        let delimited = if optional {
            text == "["
        } else {
            text == "{" || text == "\\begingroup"
        };

        if delimited {
            let group_end = match text.as_str() {
                "[" => BreakToken::RightBracket,
                "{" => BreakToken::RightBrace,
                _ => BreakToken::EndGroup,
            };

            self.consume();
            self.gullet.begin_group();
            let expression = self.parse_expression(false, Some(&group_end))?;
            let last_token = self.fetch()?.clone();
            self.expect(group_end.as_ref(), true)?;
            self.gullet.end_group()?;

            Ok(Some(ParseNode::OrdGroup(parse_node::ParseNodeOrdGroup {
                mode: self.mode,
                loc: first_token.loc().range_ref(last_token.loc()),
                body: expression,
                // \begingroup...\endgroup is a semi-simple group, transparent
                // to math spacing.
                semisimple: (text == "\\begingroup").then_some(true),
            })))
        } else if optional {
            Ok(None)
        } else {
            let mut result = self.parse_function(break_on_token_text, Some(name), greediness)?;
            if result.is_none() {
                result = self.parse_symbol()?;
            }

            if result.is_none()
                && text.starts_with('\\')
                && !IMPLICIT_COMMANDS.contains(text.as_str())
            {
                if self.settings.throw_on_error {
                    return Err(ParseError::with_token(
                        ParseErrorKind::UndefinedControlSequence { name: text },
                        &first_token,
                    ));
                }
                result = Some(ParseNode::Color(self.format_unsupported_cmd(&text)));
                self.consume();
            }

            Ok(result)
        }
    }

    /// Renders an unknown command as error-colored text, one character per
    /// node, for the non-throwing error path.
    #[must_use]
    pub fn format_unsupported_cmd(&self, text: &str) -> ParseNodeColor {
        let textord_list = text
            .chars()
            .map(|ch| {
                ParseNode::TextOrd(parse_node::ParseNodeTextOrd {
                    mode: Mode::Text,
                    loc: None,
                    text: ch.to_string(),
                })
            })
            .collect();
        let text_node = ParseNode::Text(parse_node::ParseNodeText {
            mode: self.mode,
            loc: None,
            body: textord_list,
            font: None,
        });
        ParseNodeColor {
            mode: self.mode,
            loc: None,
            color: self.settings.error_color.clone(),
            body: vec![text_node],
        }
    }

    /// Dispatches a function if the lookahead names one.
    ///
    /// `name` and `greediness` describe the consuming context when the
    /// function appears as a bare argument: a function whose greediness does
    /// not exceed the budget is rejected there.
    pub fn parse_function(
        &mut self,
        break_on_token_text: Option<&BreakToken>,
        name: Option<&str>,
        greediness: Option<i32>,
    ) -> Result<Option<ParseNode>, ParseError> {
        let token = self.fetch()?.clone();
        let func = token.text.to_owned_string();
        let ctx = self.ctx;
        let Some(func_data) = ctx.functions.get(&func) else {
            return Ok(None);
        };
        self.consume();

        if let Some(budget) = greediness
            && func_data.greediness <= budget
        {
            return Err(ParseError::with_token(
                ParseErrorKind::FunctionMissingArguments {
                    func: func.clone(),
                    context: name.unwrap_or("argument").to_owned(),
                },
                &token,
            ));
        }
        if self.mode == Mode::Text && !func_data.allowed_in_text {
            return Err(ParseError::with_token(
                ParseErrorKind::FunctionDisallowedInMode {
                    func: func.clone(),
                    mode: Mode::Text,
                },
                &token,
            ));
        }
        if self.mode == Mode::Math && !func_data.allowed_in_math {
            return Err(ParseError::with_token(
                ParseErrorKind::FunctionDisallowedInMode {
                    func: func.clone(),
                    mode: Mode::Math,
                },
                &token,
            ));
        }

        let (args, opt_args) = self.parse_arguments(&func, func_data)?;
        let node = self.call_function(&func, args, opt_args, Some(&token), break_on_token_text)?;
        Ok(Some(node))
    }

    /// Invokes the registered handler for `name`.
    pub fn call_function(
        &mut self,
        name: &str,
        args: Vec<ParseNode>,
        opt_args: Vec<Option<ParseNode>>,
        token: Option<&Token>,
        break_on_token_text: Option<&BreakToken>,
    ) -> Result<ParseNode, ParseError> {
        let ctx = self.ctx;
        let Some(func) = ctx.functions.get(name) else {
            return Err(ParseError::new(ParseErrorKind::NoFunctionHandler {
                name: name.to_owned(),
            }));
        };
        let handler = func.handler;
        let context = FunctionContext {
            func_name: name.to_owned(),
            parser: self,
            token,
            break_on_token_text,
        };
        handler(context, args, opt_args)
    }

    /// Parses a function's declared arguments.
    ///
    /// Spaces are consumed before an argument exactly when it is mandatory
    /// and either not the first, or the first in math mode; nothing is
    /// pre-consumed ahead of a leading optional argument.
    pub fn parse_arguments(
        &mut self,
        func: &str,
        func_data: &FunctionSpec,
    ) -> Result<(Vec<ParseNode>, Vec<Option<ParseNode>>), ParseError> {
        let total_args = func_data.num_args + func_data.num_optional_args;
        if total_args == 0 {
            return Ok((Vec::new(), Vec::new()));
        }

        let mut args = Vec::new();
        let mut opt_args = Vec::new();

        for i in 0..total_args {
            let arg_type = func_data.arg_types.as_ref().and_then(|v| v.get(i)).copied();
            let is_optional = i < func_data.num_optional_args;
            let consume_spaces = (i > 0 && !is_optional)
                || (i == 0 && !is_optional && self.mode == Mode::Math);

            let arg = self.parse_group_of_type(
                &format!("argument to '{func}'"),
                arg_type,
                is_optional,
                Some(func_data.greediness),
                consume_spaces,
            )?;

            if is_optional {
                opt_args.push(arg);
            } else if let Some(arg) = arg {
                args.push(arg);
            } else {
                return Err(ParseError::new(ParseErrorKind::ExpectedGroupAfter {
                    name: func.to_owned(),
                }));
            }
        }

        Ok((args, opt_args))
    }

    /// Parses one argument according to its declared [`ArgType`].
    fn parse_group_of_type(
        &mut self,
        name: &str,
        arg_type: Option<ArgType>,
        optional: bool,
        greediness: Option<i32>,
        consume_spaces: bool,
    ) -> Result<Option<ParseNode>, ParseError> {
        match arg_type {
            Some(ArgType::Color) => {
                if consume_spaces {
                    self.consume_spaces()?;
                }
                self.parse_color_group(optional)
            }
            Some(ArgType::Size) => {
                if consume_spaces {
                    self.consume_spaces()?;
                }
                Ok(self.parse_size_group(optional)?.map(ParseNode::Size))
            }
            Some(ArgType::Url) => self.parse_url_group(optional, consume_spaces),
            Some(ArgType::Mode(mode)) => {
                self.parse_group(name, optional, greediness, None, Some(mode), consume_spaces)
            }
            Some(ArgType::Hbox) => {
                // Parse as text, then wrap in text styling so the content
                // lays out at text size.
                let group = self.parse_group(
                    name,
                    optional,
                    greediness,
                    None,
                    Some(Mode::Text),
                    consume_spaces,
                )?;
                Ok(group.map(|group| {
                    ParseNode::Styling(parse_node::ParseNodeStyling {
                        mode: group.mode(),
                        loc: None,
                        style: StyleVariant::Text,
                        body: vec![group],
                    })
                }))
            }
            Some(ArgType::Raw) => {
                if consume_spaces {
                    self.consume_spaces()?;
                }
                if optional && self.fetch()?.text == "{" {
                    return Ok(None);
                }
                let token = self.parse_string_group("raw", optional, true)?;
                match token {
                    Some(token) => Ok(Some(ParseNode::Raw(parse_node::ParseNodeRaw {
                        mode: Mode::Text,
                        loc: None,
                        string: token.text.to_owned_string(),
                    }))),
                    None => {
                        let token = self.fetch()?;
                        Err(ParseError::with_token("Expected raw group", token))
                    }
                }
            }
            Some(ArgType::Original) | None => {
                self.parse_group(name, optional, greediness, None, None, consume_spaces)
            }
        }
    }

    /// Accumulates the raw token text of a `{...}` (or optional `[...]`)
    /// group without interpreting it, in text mode.
    ///
    /// In `raw` form, matched nested braces are permitted inside, and a
    /// single non-delimiter token counts as the whole group when no opener is
    /// present.
    fn parse_string_group(
        &mut self,
        mode_name: &'static str,
        optional: bool,
        raw: bool,
    ) -> Result<Option<Token>, ParseError> {
        let group_begin = if optional { "[" } else { "{" };
        let group_end = if optional { "]" } else { "}" };

        let begin_token = self.fetch()?.clone();
        if begin_token.text != group_begin {
            if optional {
                return Ok(None);
            }
            if raw
                && begin_token.text != "EOF"
                && begin_token
                    .text
                    .as_str()
                    .chars()
                    .any(|c| !matches!(c, '{' | '}' | '[' | ']'))
            {
                self.consume();
                return Ok(Some(begin_token));
            }
        }

        let outer_mode = self.mode;
        self.switch_mode(Mode::Text);
        let result = self.parse_string_group_body(mode_name, group_begin, group_end, raw);
        self.switch_mode(outer_mode);
        result.map(Some)
    }

    fn parse_string_group_body(
        &mut self,
        mode_name: &'static str,
        group_begin: &str,
        group_end: &str,
        raw: bool,
    ) -> Result<Token, ParseError> {
        self.expect(group_begin, true)?;

        let mut text = String::new();
        let first_token = self.fetch()?.clone();
        let mut last_token = first_token.clone();
        let mut nested = 0i32;

        loop {
            let next = self.fetch()?.clone();
            if next.text == group_end && !(raw && nested > 0) {
                break;
            }
            if next.text == "EOF" {
                let span = first_token.clone().range(last_token, text);
                return Err(ParseError::with_token(
                    ParseErrorKind::UnexpectedEndOfInput { context: mode_name },
                    &span,
                ));
            } else if next.text == group_begin {
                nested += 1;
            } else if next.text == group_end {
                nested -= 1;
            }
            last_token = next.clone();
            text.push_str(next.text.as_str());
            self.consume();
        }

        self.expect(group_end, true)?;
        Ok(first_token.range(last_token, text))
    }

    /// Consumes tokens greedily while the accumulated text still satisfies
    /// `validator` (maximal munch), returning one composite token.
    fn parse_regex_group<F>(
        &mut self,
        mode_name: &'static str,
        mut validator: F,
    ) -> Result<Token, ParseError>
    where
        F: FnMut(&str) -> bool,
    {
        let first_token = self.fetch()?.clone();
        let mut last_token = first_token.clone();
        let mut text = String::new();

        loop {
            let next = self.fetch()?.clone();
            if next.text == "EOF" {
                break;
            }
            let candidate = format!("{text}{}", next.text);
            if !validator(&candidate) {
                break;
            }
            last_token = next;
            text = candidate;
            self.consume();
        }

        if text.is_empty() {
            return Err(ParseError::with_token(
                ParseErrorKind::InvalidValue {
                    context: mode_name,
                    value: first_token.text.to_owned_string(),
                },
                &first_token,
            ));
        }

        Ok(first_token.range(last_token, text))
    }

    /// Parses a color argument: `#rgb`, `#rrggbb`, bare `rrggbb` (the `#` is
    /// supplied), or a color name.
    fn parse_color_group(&mut self, optional: bool) -> Result<Option<ParseNode>, ParseError> {
        let Some(token) = self.parse_string_group("color", optional, false)? else {
            return Ok(None);
        };
        let text = token.text.to_owned_string();

        let is_letters = !text.is_empty() && text.chars().all(|c| c.is_ascii_alphabetic());
        let is_hash3 = text.len() == 4
            && text.starts_with('#')
            && text[1..].chars().all(|c| c.is_ascii_hexdigit());
        let is_hash6 = text.len() == 7
            && text.starts_with('#')
            && text[1..].chars().all(|c| c.is_ascii_hexdigit());
        let is_bare6 = text.len() == 6 && text.chars().all(|c| c.is_ascii_hexdigit());

        if !(is_letters || is_hash3 || is_hash6 || is_bare6) {
            return Err(ParseError::with_token(
                ParseErrorKind::InvalidColor { color: text },
                &token,
            ));
        }

        let color = if is_bare6 { format!("#{text}") } else { text };
        Ok(Some(ParseNode::ColorToken(parse_node::ParseNodeColorToken {
            mode: self.mode,
            loc: None,
            color,
        })))
    }

    /// Parses a size argument. A mandatory argument given without braces is
    /// scanned by maximal munch; an empty mandatory argument means `0pt` with
    /// the blank flag set (`\above{}`, `\genfrac` rely on this).
    pub fn parse_size_group(&mut self, optional: bool) -> Result<Option<ParseNodeSize>, ParseError> {
        let res = if !optional && self.fetch()?.text != "{" {
            Some(self.parse_regex_group("size", size_prefix_valid)?)
        } else {
            self.parse_string_group("size", optional, false)?
        };
        let Some(mut res) = res else {
            return Ok(None);
        };

        let mut is_blank = false;
        if !optional && res.text.is_empty() {
            res.set_text("0pt");
            is_blank = true;
        }

        let Some((number, unit)) = parse_size_with_unit(res.text.as_str()) else {
            return Err(ParseError::with_token(
                ParseErrorKind::InvalidSize {
                    size: res.text.to_owned_string(),
                },
                &res,
            ));
        };

        let value = Measurement { number, unit };
        if !valid_unit(&value) {
            return Err(ParseError::with_token(
                ParseErrorKind::InvalidUnit { unit: value.unit },
                &res,
            ));
        }

        Ok(Some(ParseNodeSize {
            mode: self.mode,
            loc: None,
            value,
            is_blank,
        }))
    }

    /// Parses a URL argument. `%` is made an ordinary character for the
    /// duration so URLs can contain it; the catcode is restored on every
    /// path. Hyperref-style `\%`-escapes are unescaped.
    fn parse_url_group(
        &mut self,
        optional: bool,
        _consume_spaces: bool,
    ) -> Result<Option<ParseNode>, ParseError> {
        self.gullet.set_catcode('%', 13);
        let res = self.parse_string_group("url", optional, true);
        self.gullet.set_catcode('%', 14);

        let Some(token) = res? else {
            return Ok(None);
        };

        let mut url = String::new();
        let mut chars = token.text.as_str().chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\\'
                && let Some(&next) = chars.peek()
                && matches!(next, '#' | '$' | '%' | '&' | '~' | '_' | '^' | '{' | '}')
            {
                url.push(next);
                chars.next();
                continue;
            }
            url.push(c);
        }

        Ok(Some(ParseNode::Url(parse_node::ParseNodeUrl {
            mode: self.mode,
            loc: None,
            url,
        })))
    }

    /// Parses a single symbol nucleus, or `None` for tokens the symbol
    /// grammar has no claim on (EOF, `^`, `_`, braces, ...).
    fn parse_symbol(&mut self) -> Result<Option<ParseNode>, ParseError> {
        let nucleus = self.fetch()?.clone();
        let mut text = nucleus.text.to_owned_string();

        if let Some(arg) = text.strip_prefix("\\verb")
            && arg.chars().next().is_some_and(|c| !c.is_ascii_alphabetic())
        {
            self.consume();
            let star = arg.starts_with('*');
            let body = if star { &arg[1..] } else { arg };

            // The lexer only emits \verb tokens with matching delimiters.
            if body.chars().count() < 2 || body.chars().next() != body.chars().last() {
                return Err(ParseError::with_token(
                    ParseErrorKind::VerbAssertionFailed,
                    &nucleus,
                ));
            }
            let open = body.chars().next().map_or(0, char::len_utf8);
            let close = body.chars().last().map_or(0, char::len_utf8);
            let inner_body = &body[open..body.len() - close];

            return Ok(Some(ParseNode::Verb(parse_node::ParseNodeVerb {
                mode: Mode::Text,
                loc: nucleus.loc.clone(),
                body: inner_body.to_owned(),
                star,
            })));
        }

        // Decompose a precomposed accented character the symbol table does
        // not know directly.
        if let Some(first_char) = text.chars().next()
            && let Some(&expansion) = UNICODE_SYMBOLS.get(&first_char)
            && self
                .ctx
                .symbols
                .get(self.mode, &first_char.to_string())
                .is_none()
        {
            if self.mode == Mode::Math {
                self.settings.report_nonstrict(
                    "unicodeTextInMathMode",
                    &format!("Accented Unicode text character \"{first_char}\" used in math mode"),
                    nucleus
                        .loc
                        .as_ref()
                        .map(|loc| loc as &dyn ErrorLocationProvider),
                )?;
            }
            let rest: String = text.chars().skip(1).collect();
            text = format!("{expansion}{rest}");
        }

        // Strip trailing combining marks; they fold back over the base below.
        let accent_marks = match last_non_combining_mark_index(&text) {
            Some(idx) => {
                let marks = text.split_off(idx);
                if text == "i" {
                    "\u{131}".clone_into(&mut text);
                } else if text == "j" {
                    "\u{237}".clone_into(&mut text);
                }
                Some(marks)
            }
            None => None,
        };

        let mut symbol = if let Some(info) = self.ctx.symbols.get(self.mode, &text) {
            if self.mode == Mode::Math && EXTRA_LATIN.contains(text.as_str()) {
                self.settings.report_nonstrict(
                    "unicodeTextInMathMode",
                    &format!("Latin-1/Unicode text character \"{text}\" used in math mode"),
                    nucleus
                        .loc
                        .as_ref()
                        .map(|loc| loc as &dyn ErrorLocationProvider),
                )?;
            }
            match info.group {
                Group::Atom(family) => ParseNode::Atom(parse_node::ParseNodeAtom {
                    family,
                    mode: self.mode,
                    loc: nucleus.loc.clone(),
                    text: text.clone(),
                }),
                Group::NonAtom(non_atom) => {
                    let leaf = parse_node::ParseNodeTextOrd {
                        mode: self.mode,
                        loc: nucleus.loc.clone(),
                        text: text.clone(),
                    };
                    match non_atom {
                        NonAtom::MathOrd => ParseNode::MathOrd(parse_node::ParseNodeMathOrd {
                            mode: leaf.mode,
                            loc: leaf.loc,
                            text: leaf.text,
                        }),
                        NonAtom::TextOrd => ParseNode::TextOrd(leaf),
                        NonAtom::Spacing => ParseNode::Spacing(parse_node::ParseNodeSpacing {
                            mode: leaf.mode,
                            loc: leaf.loc,
                            text: leaf.text,
                        }),
                        NonAtom::AccentToken => {
                            ParseNode::AccentToken(parse_node::ParseNodeAccentToken {
                                mode: leaf.mode,
                                loc: leaf.loc,
                                text: leaf.text,
                            })
                        }
                        NonAtom::OpToken => ParseNode::OpToken(parse_node::ParseNodeOpToken {
                            mode: leaf.mode,
                            loc: leaf.loc,
                            text: leaf.text,
                        }),
                    }
                }
            }
        } else if let Some(first_char) = text.chars().next()
            && first_char as u32 >= 0x80
        {
            // Non-ASCII without a table entry renders as text.
            if supported_codepoint(first_char as u32) {
                if self.mode == Mode::Math {
                    self.settings.report_nonstrict(
                        "unicodeTextInMathMode",
                        &format!("Unicode text character \"{text}\" used in math mode"),
                        nucleus
                            .loc
                            .as_ref()
                            .map(|loc| loc as &dyn ErrorLocationProvider),
                    )?;
                }
            } else {
                self.settings.report_nonstrict(
                    "unknownSymbol",
                    &format!(
                        "Unrecognized Unicode character \"{first_char}\" ({:#x})",
                        first_char as u32
                    ),
                    nucleus
                        .loc
                        .as_ref()
                        .map(|loc| loc as &dyn ErrorLocationProvider),
                )?;
            }
            ParseNode::TextOrd(parse_node::ParseNodeTextOrd {
                mode: Mode::Text,
                loc: nucleus.loc.clone(),
                text: text.clone(),
            })
        } else {
            return Ok(None);
        };

        self.consume();

        if let Some(marks) = accent_marks {
            for mark in marks.chars() {
                let Some(mapping) = get_accent_mapping(mark) else {
                    return Err(ParseError::with_token(
                        ParseErrorKind::UnknownAccent {
                            accent: mark.to_string(),
                        },
                        &nucleus,
                    ));
                };
                let command = match self.mode {
                    Mode::Math => mapping.math,
                    Mode::Text => Some(mapping.text),
                };
                let Some(command) = command else {
                    return Err(ParseError::with_token(
                        ParseErrorKind::UnsupportedAccentInMode {
                            accent: mark.to_string(),
                            mode: self.mode,
                        },
                        &nucleus,
                    ));
                };
                symbol = ParseNode::Accent(Box::new(parse_node::ParseNodeAccent {
                    mode: self.mode,
                    loc: nucleus.loc.clone(),
                    label: command.to_owned(),
                    is_stretchy: Some(false),
                    is_shifty: Some(true),
                    base: symbol,
                }));
            }
        }

        Ok(Some(symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_prefix_accepts_growing_spec() {
        for prefix in ["", "1", "1.", "1.5", "1.5e", "1.5em", "-", "- ", "-1.5em", "+.5em", "1.5em "] {
            assert!(size_prefix_valid(prefix), "{prefix:?} should be a valid prefix");
        }
    }

    #[test]
    fn test_size_prefix_rejects_garbage() {
        for prefix in ["em", "1.5emx", "1.5 em x", "x", "1.5EM"] {
            assert!(!size_prefix_valid(prefix), "{prefix:?} should be invalid");
        }
    }

    #[test]
    fn test_size_with_unit() {
        assert_eq!(parse_size_with_unit("1.5em"), Some((1.5, "em".to_owned())));
        assert_eq!(parse_size_with_unit("-2pt"), Some((-2.0, "pt".to_owned())));
        assert_eq!(parse_size_with_unit("+ .5 mu"), Some((0.5, "mu".to_owned())));
        assert_eq!(parse_size_with_unit("em"), None);
        assert_eq!(parse_size_with_unit(".em"), None);
    }
}
