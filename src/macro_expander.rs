//! The macro expander, TeX's "gullet": sits between the lexer and the parser
//! and expands macros until only unexpandable tokens remain.
//!
//! Tokens are kept on a stack in reverse order so pushing an expansion is
//! cheap. The parser drives it one token at a time through
//! [`MacroContextInterface::expand_next_token`].

use alloc::sync::Arc;

use phf::phf_set;

use crate::context::MathContext;
use crate::lexer::Lexer;
use crate::macros::builtins::BUILTIN_MACROS;
use crate::namespace::{KeyMap, Namespace};
use crate::types::{Mode, ParseError, ParseErrorKind, Settings, Token};

use crate::macros::{
    MacroArg, MacroContextInterface, MacroDefinition, MacroExpansion, MacroExpansionResult,
};

/// Map of macro definitions, as stored in [`Settings::macros`].
pub type MacroMap = KeyMap<String, MacroDefinition>;

/// Commands that may legitimately produce no AST node and therefore are not
/// "undefined" even though no macro, function, or symbol defines them.
pub const IMPLICIT_COMMANDS: phf::Set<&'static str> = phf_set! {
    "^",
    "_",
    "\\limits",
    "\\nolimits",
};

/// Expands macros over the lexer's token stream.
pub struct MacroExpander<'a> {
    settings: &'a Settings,
    expansion_count: usize,
    lexer: Lexer<'a>,
    macros: Namespace<'a, MacroDefinition>,
    /// Pending tokens, in reverse order.
    stack: Vec<Token>,
    mode: Mode,
    ctx: &'a MathContext,
}

impl<'a> MacroExpander<'a> {
    #[must_use]
    pub fn new(input: &str, settings: &'a Settings, mode: Mode, ctx: &'a MathContext) -> Self {
        let globals = settings.macros.borrow_mut();
        let macros = Namespace::new(&BUILTIN_MACROS, globals);

        Self {
            lexer: Lexer::new(Arc::from(input), settings),
            settings,
            expansion_count: 0,
            macros,
            mode,
            stack: Vec::new(),
            ctx,
        }
    }

    /// Switches between text and math modes.
    pub const fn switch_mode(&mut self, new_mode: Mode) {
        self.mode = new_mode;
    }

    /// Ends all currently open macro scopes.
    pub fn end_groups(&mut self) {
        self.macros.end_groups();
    }

    /// Sets the category code of a character on the lexer.
    pub fn set_catcode(&mut self, ch: char, code: u8) {
        self.lexer.set_catcode(ch, code);
    }

    /// Pushes a token back onto the stack; it becomes the next one read.
    pub fn push_token(&mut self, token: Token) {
        self.stack.push(token);
    }

    /// Pushes reverse-ordered tokens onto the stack.
    pub fn push_tokens(&mut self, tokens: Vec<Token>) {
        self.stack.extend(tokens);
    }

    fn consume_args_with_delims(
        &mut self,
        num_args: usize,
        delimiters: Option<&Vec<Vec<String>>>,
    ) -> Result<Vec<Vec<Token>>, ParseError> {
        if let Some(delims) = delimiters {
            if delims.len() != num_args + 1 {
                return Err(ParseError::new(
                    ParseErrorKind::MacroDelimiterLengthMismatch,
                ));
            }
            for expected in &delims[0] {
                let tok = self.pop_token()?;
                if expected != tok.text.as_str() {
                    return Err(ParseError::with_token(
                        ParseErrorKind::MacroDefinitionMismatch,
                        &tok,
                    ));
                }
            }
        }

        let mut args = Vec::with_capacity(num_args);
        for i in 0..num_args {
            let delims_for_arg = delimiters.map(|d| d[i + 1].as_slice());
            let arg = self.consume_arg(delims_for_arg)?;
            args.push(arg.tokens);
        }
        Ok(args)
    }

    fn count_expansion(&mut self, amount: usize) -> Result<(), ParseError> {
        self.expansion_count += amount;
        if self.expansion_count > self.settings.max_expand {
            return Err(ParseError::new(ParseErrorKind::TooManyExpansions));
        }
        Ok(())
    }

    /// Expands the top token once. Returns the number of tokens pushed, or
    /// `None` when the token is unexpandable and was left on the stack.
    fn expand_once_internal(
        &mut self,
        expandable_only: bool,
    ) -> Result<Option<usize>, ParseError> {
        let top_token = self.pop_token()?;
        let name = top_token.text.to_owned_string();
        let expansion = self.get_expansion(&name)?;

        let Some(expansion) = expansion else {
            if expandable_only && name.starts_with('\\') && !self.is_defined(&name) {
                return Err(ParseError::with_token(
                    ParseErrorKind::UndefinedControlSequence { name },
                    &top_token,
                ));
            }
            self.push_token(top_token);
            return Ok(None);
        };

        self.count_expansion(1)?;
        let mut tokens = expansion.tokens;
        let args = self.consume_args_with_delims(expansion.num_args, expansion.delimiters.as_ref())?;
        if expansion.num_args > 0 {
            // Substitute #n placeholders, scanning from the end so splices do
            // not disturb unvisited positions.
            let mut i = tokens.len() as isize - 1;
            while i >= 0 {
                if tokens[i as usize].text == "#" {
                    if i == 0 {
                        return Err(ParseError::with_token(
                            ParseErrorKind::IncompletePlaceholder,
                            &tokens[i as usize],
                        ));
                    }
                    let tok = tokens[(i - 1) as usize].clone();
                    if tok.text == "#" {
                        // ## -> #
                        tokens.remove(i as usize);
                        i -= 2;
                        continue;
                    }
                    if tok.text.len() == 1
                        && let Ok(parsed) = tok.text.as_str().parse::<usize>()
                        && parsed >= 1
                        && parsed <= args.len()
                    {
                        tokens.splice((i as usize - 1)..=(i as usize), args[parsed - 1].clone());
                        i -= 2;
                        continue;
                    }
                    return Err(ParseError::with_token(
                        ParseErrorKind::InvalidArgumentNumber,
                        &tok,
                    ));
                }
                i -= 1;
            }
        }
        let pushed = tokens.len();
        self.push_tokens(tokens);
        Ok(Some(pushed))
    }

    fn expand_tokens_internal(&mut self, tokens: Vec<Token>) -> Result<Vec<Token>, ParseError> {
        let mut output = Vec::new();
        let old_len = self.stack.len();
        self.push_tokens(tokens);
        while self.stack.len() > old_len {
            if self.expand_once_internal(true)?.is_none() {
                let token = self
                    .stack
                    .pop()
                    .ok_or_else(|| ParseError::new(ParseErrorKind::EmptyExpansionStack))?;
                output.push(token);
            }
        }
        self.count_expansion(output.len())?;
        Ok(output)
    }

    /// Resolves the expansion of `name`, running function macros.
    fn get_expansion(&mut self, name: &str) -> Result<Option<MacroExpansion>, ParseError> {
        // A single character only expands when it is active (catcode 13).
        if name.chars().count() == 1
            && let Some(ch) = name.chars().next()
            && let Some(catcode) = self.lexer.get_catcode(ch)
            && catcode != 13
        {
            return Ok(None);
        }

        let Some(definition) = self.macros.get(name).cloned() else {
            return Ok(None);
        };

        let expansion = match definition {
            MacroDefinition::Function(f) => match f(self as &mut dyn MacroContextInterface)? {
                MacroExpansionResult::String(s) => self.string_to_expansion(&s),
                MacroExpansionResult::Expansion(e) => e,
                MacroExpansionResult::Empty => MacroExpansion::default(),
            },
            MacroDefinition::StaticFunction(f) => {
                match f(self as &mut dyn MacroContextInterface)? {
                    MacroExpansionResult::String(s) => self.string_to_expansion(&s),
                    MacroExpansionResult::Expansion(e) => e,
                    MacroExpansionResult::Empty => MacroExpansion::default(),
                }
            }
            MacroDefinition::StaticStr(s) => self.string_to_expansion(s),
            MacroDefinition::String(s) => self.string_to_expansion(&s),
            MacroDefinition::Expansion(e) => e,
        };
        Ok(Some(expansion))
    }

    /// Lexes a replacement string into an expansion, counting `#n`
    /// placeholders to infer the arity.
    fn string_to_expansion(&self, expansion: &str) -> MacroExpansion {
        let mut num_args = 0;
        if expansion.contains('#') {
            let stripped = expansion.replace("##", "");
            while stripped.contains(&format!("#{}", num_args + 1)) {
                num_args += 1;
            }
        }

        let mut body_lexer = Lexer::new(Arc::from(expansion), self.settings);
        let mut tokens = Vec::new();
        while let Ok(tok) = body_lexer.lex() {
            if tok.text == "EOF" {
                break;
            }
            tokens.push(tok);
        }
        tokens.reverse();
        MacroExpansion {
            tokens,
            num_args,
            delimiters: None,
        }
    }
}

impl<'a> MacroContextInterface<'a> for MacroExpander<'a> {
    fn mode(&self) -> Mode {
        self.mode
    }

    fn macros<'s>(&'s self) -> &'s Namespace<'a, MacroDefinition> {
        &self.macros
    }

    fn macros_mut<'s>(&'s mut self) -> &'s mut Namespace<'a, MacroDefinition> {
        &mut self.macros
    }

    fn future_mut(&mut self) -> Result<Token, ParseError> {
        if self.stack.is_empty() {
            let tok = self.lexer.lex()?;
            self.push_token(tok);
        }
        self.stack
            .last()
            .cloned()
            .ok_or_else(|| ParseError::new(ParseErrorKind::EmptyExpansionStack))
    }

    fn pop_token(&mut self) -> Result<Token, ParseError> {
        self.future_mut()?;
        self.stack
            .pop()
            .ok_or_else(|| ParseError::new(ParseErrorKind::EmptyExpansionStack))
    }

    fn consume_spaces(&mut self) -> Result<(), ParseError> {
        loop {
            let token = self.future_mut()?;
            if token.text == " " {
                self.stack.pop();
            } else {
                break;
            }
        }
        Ok(())
    }

    fn expand_once(&mut self, expandable_only: bool) -> Result<Option<usize>, ParseError> {
        self.expand_once_internal(expandable_only)
    }

    fn expand_next_token(&mut self) -> Result<Token, ParseError> {
        loop {
            if self.expand_once_internal(false)?.is_none() {
                return self
                    .stack
                    .pop()
                    .ok_or_else(|| ParseError::new(ParseErrorKind::EmptyExpansionStack));
            }
        }
    }

    fn expand_tokens(&mut self, tokens: Vec<Token>) -> Result<Vec<Token>, ParseError> {
        self.expand_tokens_internal(tokens)
    }

    fn consume_arg(&mut self, delims: Option<&[String]>) -> Result<MacroArg, ParseError> {
        let mut tokens: Vec<Token> = Vec::new();
        let is_delimited = delims.is_some_and(|d| !d.is_empty());
        if !is_delimited {
            // Undelimited arguments skip leading spaces.
            self.consume_spaces()?;
        }
        let start = self.future_mut()?;
        let mut tok;
        let mut depth: isize = 0;
        let mut match_idx: usize = 0;
        loop {
            tok = self.pop_token()?;
            tokens.push(tok.clone());
            if tok.text == "{" {
                depth += 1;
            } else if tok.text == "}" {
                depth -= 1;
                if depth == -1 {
                    return Err(ParseError::with_token(ParseErrorKind::ExtraCloseBrace, &tok));
                }
            } else if tok.text == "EOF" {
                let expected = delims
                    .filter(|_| is_delimited)
                    .and_then(|d| d.get(match_idx))
                    .map_or("}", String::as_str);
                return Err(ParseError::with_token(
                    ParseErrorKind::UnexpectedEndOfMacroArgument {
                        expected: expected.to_owned(),
                    },
                    &tok,
                ));
            }
            if let Some(d) = delims
                && is_delimited
            {
                if (depth == 0 || (depth == 1 && d[match_idx] == "{"))
                    && tok.text == d[match_idx]
                {
                    match_idx += 1;
                    if match_idx == d.len() {
                        // Delimiters are not part of the argument.
                        let keep = tokens.len() - match_idx;
                        tokens.truncate(keep);
                        break;
                    }
                } else {
                    match_idx = 0;
                }
            }
            if depth == 0 && !is_delimited {
                // Undelimited: one token, or one balanced {...} group.
                if start.text != "{" || tok.text == "}" {
                    break;
                }
            }
        }

        // Strip the outer braces of a braced argument.
        if start.text == "{" && tokens.last().map(|t| t.text.as_str()) == Some("}") {
            tokens.pop();
            if !tokens.is_empty() {
                tokens.remove(0);
            }
        }
        tokens.reverse();
        Ok(MacroArg {
            tokens,
            start,
            end: tok,
        })
    }

    fn consume_args(&mut self, num_args: usize) -> Result<Vec<Vec<Token>>, ParseError> {
        self.consume_args_with_delims(num_args, None)
    }

    fn is_defined(&self, name: &str) -> bool {
        self.macros.has(name)
            || self.ctx.functions.contains_key(name)
            || IMPLICIT_COMMANDS.contains(name)
            || self.ctx.symbols.contains(Mode::Math, name)
            || self.ctx.symbols.contains(Mode::Text, name)
    }

    fn begin_group(&mut self) {
        self.macros.begin_group();
    }

    fn end_group(&mut self) -> Result<(), ParseError> {
        self.macros.end_group()
    }
}
