//! Built-in macros, consulted below user definitions in the macro namespace.

use phf::phf_map;

use crate::{
    ParseError,
    macros::{MacroContextInterface, MacroDefinition, MacroExpansion, MacroExpansionResult},
    types::ParseErrorKind,
};

/// The default macro table.
pub static BUILTIN_MACROS: phf::Map<&'static str, MacroDefinition> = phf_map! {
    "\\dots" => MacroDefinition::StaticStr("\\ldots"),
    "\\implies" => MacroDefinition::StaticStr("\\;\\Longrightarrow\\;"),
    "\\impliedby" => MacroDefinition::StaticStr("\\;\\Longleftarrow\\;"),
    "\\iff" => MacroDefinition::StaticStr("\\;\\Longleftrightarrow\\;"),
    "\\newcommand" => MacroDefinition::StaticFunction(newcommand),
    "\\renewcommand" => MacroDefinition::StaticFunction(renewcommand),
    "\\providecommand" => MacroDefinition::StaticFunction(providecommand),
    "\\operatorname" => MacroDefinition::StaticFunction(operatorname),
};

/// `\operatorname` and `\operatorname*`. The star is a separate token, so a
/// macro peels it off and selects the right underlying function.
fn operatorname(
    context: &mut dyn MacroContextInterface,
) -> Result<MacroExpansionResult, ParseError> {
    let next = context.future_mut()?;
    if next.text == "*" {
        context.pop_token()?;
        Ok(MacroExpansionResult::String(
            "\\operatornamewithlimits".to_owned(),
        ))
    } else {
        Ok(MacroExpansionResult::String("\\operatorname@".to_owned()))
    }
}

/// Shared implementation of the `\newcommand` family.
///
/// `exists_ok` permits redefining an existing name; `nonexists_ok` permits
/// defining a fresh one. `\providecommand` passes both and so always
/// (re)defines.
fn define_command(
    context: &mut dyn MacroContextInterface,
    exists_ok: bool,
    nonexists_ok: bool,
) -> Result<MacroExpansionResult, ParseError> {
    let arg = context.consume_arg(None)?.tokens;
    if arg.len() != 1 {
        return Err(ParseError::new(
            "\\newcommand's first argument must be a macro name",
        ));
    }
    let name = arg[0].text.to_owned_string();

    let exists = context.is_defined(&name);
    if exists && !exists_ok {
        return Err(ParseError::new(ParseErrorKind::NewcommandRedefinition {
            name,
        }));
    }
    if !exists && !nonexists_ok {
        return Err(ParseError::new(ParseErrorKind::RenewcommandNonexistent {
            name,
        }));
    }

    let mut num_args = 0;
    let mut body = context.consume_arg(None)?.tokens;
    if body.len() == 1 && body[0].text == "[" {
        // Optional [n] declaring the number of arguments.
        let mut arg_text = String::new();
        let mut token = context.expand_next_token()?;
        while token.text != "]" && token.text != "EOF" {
            arg_text.push_str(token.text.as_str());
            token = context.expand_next_token()?;
        }
        num_args = arg_text
            .trim()
            .parse::<usize>()
            .map_err(|_| ParseError::new(format!("Invalid number of arguments: {arg_text}")))?;
        body = context.consume_arg(None)?.tokens;
    }

    context.macros_mut().set(
        &name,
        Some(MacroDefinition::Expansion(MacroExpansion {
            tokens: body,
            num_args,
            delimiters: None,
        })),
        false,
    );

    Ok(MacroExpansionResult::Empty)
}

fn newcommand(
    context: &mut dyn MacroContextInterface,
) -> Result<MacroExpansionResult, ParseError> {
    define_command(context, false, true)
}

fn renewcommand(
    context: &mut dyn MacroContextInterface,
) -> Result<MacroExpansionResult, ParseError> {
    define_command(context, true, false)
}

fn providecommand(
    context: &mut dyn MacroContextInterface,
) -> Result<MacroExpansionResult, ParseError> {
    define_command(context, true, true)
}
