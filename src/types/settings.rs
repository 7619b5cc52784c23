use core::cell::RefCell;
use core::fmt;

use alloc::sync::Arc;
use bon::bon;

use crate::macro_expander::MacroMap;
use crate::namespace::KeyMap;
use crate::types::{ErrorLocationProvider, ParseError, ParseErrorKind};

/// How strictly to enforce LaTeX compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrictMode {
    /// Accept non-standard input silently.
    Ignore,
    /// Accept non-standard input but log a warning.
    Warn,
    /// Reject non-standard input with a [`ParseError`].
    Error,
}

/// Resolved parser configuration.
///
/// All fields carry concrete values; use [`Settings::builder`] to construct
/// one from optional inputs with the documented defaults.
#[derive(Debug)]
pub struct Settings {
    /// Whether parse failures propagate as errors. When `false`, undefined
    /// control sequences degrade to color-wrapped text instead.
    pub throw_on_error: bool,
    /// Color used when rendering unsupported commands.
    pub error_color: String,
    /// Caller-supplied macro definitions, shared with the expander.
    pub macros: RefCell<MacroMap>,
    /// Treat `\color` like LaTeX's `\textcolor` (two arguments).
    pub color_is_text_color: bool,
    /// Strictness policy for suspicious but parseable input.
    pub strict: StrictSetting,
    /// Trust policy for commands that can smuggle active content.
    pub trust: TrustSetting,
    /// Macro expansion budget, guarding against infinite loops.
    pub max_expand: usize,
    /// Skip the implicit group around the whole expression, letting macro
    /// definitions escape to the caller's macro map.
    pub global_group: bool,
}

#[bon]
impl Settings {
    /// Builds a [`Settings`] with defaults for everything not supplied:
    /// `throw_on_error = true`, `error_color = "#cc0000"`, empty macros,
    /// non-strict, untrusted, `max_expand = 1000`, `global_group = false`.
    #[must_use]
    #[builder]
    pub fn new(
        throw_on_error: Option<bool>,
        error_color: Option<String>,
        macros: Option<MacroMap>,
        color_is_text_color: Option<bool>,
        strict: Option<StrictSetting>,
        trust: Option<TrustSetting>,
        max_expand: Option<usize>,
        global_group: Option<bool>,
    ) -> Self {
        Self {
            throw_on_error: throw_on_error.unwrap_or(true),
            error_color: error_color.unwrap_or_else(|| "#cc0000".to_owned()),
            macros: RefCell::from(macros.unwrap_or_default()),
            color_is_text_color: color_is_text_color.unwrap_or(false),
            strict: strict.unwrap_or_default(),
            trust: trust.unwrap_or_default(),
            max_expand: max_expand.unwrap_or(1000),
            global_group: global_group.unwrap_or(false),
        }
    }

    /// Reports suspicious but parseable input according to the strict policy.
    ///
    /// Returns `Err` only when the policy resolves to [`StrictMode::Error`];
    /// warn mode logs to stderr and accepts.
    #[expect(clippy::print_stderr)]
    pub fn report_nonstrict(
        &self,
        error_code: &str,
        error_msg: &str,
        token: Option<&dyn ErrorLocationProvider>,
    ) -> Result<(), ParseError> {
        match self.resolve_strict(error_code, error_msg, token) {
            StrictMode::Ignore => Ok(()),
            StrictMode::Error => {
                let kind = ParseErrorKind::StrictModeError {
                    message: error_msg.to_owned(),
                    code: error_code.to_owned(),
                };
                if let Some(t) = token {
                    Err(ParseError::with_token(kind, t))
                } else {
                    Err(ParseError::new(kind))
                }
            }
            StrictMode::Warn => {
                eprintln!(
                    "LaTeX-incompatible input and strict mode is set to 'warn': {error_msg} [{error_code}]"
                );
                Ok(())
            }
        }
    }

    /// Whether potentially dangerous content should be rendered.
    ///
    /// Infers the URL protocol into the context first; a malformed protocol
    /// is never trusted.
    pub fn is_trusted(&self, context: &mut TrustContext) -> bool {
        if context.protocol.is_none()
            && let Some(url) = &context.url
        {
            if let Some(protocol) = protocol_from_url(url) {
                context.protocol = Some(protocol);
            } else {
                return false;
            }
        }

        match &self.trust {
            TrustSetting::Bool(b) => *b,
            TrustSetting::Function(f) => f(context).unwrap_or(false),
        }
    }

    fn resolve_strict(
        &self,
        error_code: &str,
        error_msg: &str,
        token: Option<&dyn ErrorLocationProvider>,
    ) -> StrictMode {
        match &self.strict {
            StrictSetting::Mode(m) => *m,
            StrictSetting::Bool(b) => {
                if *b {
                    StrictMode::Error
                } else {
                    StrictMode::Ignore
                }
            }
            StrictSetting::Function(f) => match f(error_code, error_msg, token) {
                Some(StrictReturn::Mode(m)) => m,
                Some(StrictReturn::Bool(true)) => StrictMode::Error,
                Some(StrictReturn::Bool(false)) | None => StrictMode::Ignore,
            },
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Return value of a [`StrictFunction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrictReturn {
    /// `true` maps to [`StrictMode::Error`], `false` to [`StrictMode::Ignore`].
    Bool(bool),
    /// An explicit mode.
    Mode(StrictMode),
}

/// Callback deciding strictness per diagnostic: receives the error code, the
/// message, and the offending location.
pub type StrictFunction =
    dyn Fn(&str, &str, Option<&dyn ErrorLocationProvider>) -> Option<StrictReturn> + Send + Sync;

/// Strictness policy: a fixed mode, a boolean shorthand, or a callback.
#[derive(Clone)]
pub enum StrictSetting {
    Mode(StrictMode),
    Bool(bool),
    Function(Arc<StrictFunction>),
}

impl fmt::Debug for StrictSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mode(m) => write!(f, "StrictSetting::Mode({m:?})"),
            Self::Bool(b) => write!(f, "StrictSetting::Bool({b})"),
            Self::Function(_) => write!(f, "StrictSetting::Function(<fn>)"),
        }
    }
}

impl Default for StrictSetting {
    fn default() -> Self {
        Self::Mode(StrictMode::Ignore)
    }
}

/// What a trust decision is about: the command plus whichever of url, class,
/// id or attribute map applies to it.
#[derive(Debug, Clone, Default)]
pub struct TrustContext {
    /// Command that triggered the check, e.g. `\href`.
    pub command: String,
    /// URL for link commands.
    pub url: Option<String>,
    /// Protocol inferred from `url` (`"_relative"` for relative URLs).
    pub protocol: Option<String>,
    /// CSS class for `\htmlClass`.
    pub class: Option<String>,
    /// Element id for `\htmlId`.
    pub id: Option<String>,
    /// Inline style for `\htmlStyle`.
    pub style: Option<String>,
    /// Data attributes for `\htmlData`.
    pub attributes: Option<KeyMap<String, String>>,
}

/// Callback deciding trust per command.
pub type TrustFunction = dyn Fn(&mut TrustContext) -> Option<bool> + Send + Sync;

/// Trust policy: a blanket boolean or a callback.
#[derive(Clone)]
pub enum TrustSetting {
    Bool(bool),
    Function(Arc<TrustFunction>),
}

impl fmt::Debug for TrustSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "TrustSetting::Bool({b})"),
            Self::Function(_) => write!(f, "TrustSetting::Function(<fn>)"),
        }
    }
}

impl Default for TrustSetting {
    fn default() -> Self {
        Self::Bool(false)
    }
}

/// Extracts the protocol of a URL, `"_relative"` for relative URLs, or `None`
/// for a malformed scheme that must never be trusted.
#[must_use]
pub fn protocol_from_url(url: &str) -> Option<String> {
    let trimmed = url.trim_start_matches(|c: char| c <= '\u{20}');
    let scheme_end = trimmed.find(|c: char| matches!(c, ':' | '/' | '#' | '?' | '\\'));
    match scheme_end {
        Some(end) if trimmed[end..].starts_with(':') => {
            let scheme = &trimmed[..end];
            let mut chars = scheme.chars();
            let valid = chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
            if valid {
                Some(scheme.to_ascii_lowercase())
            } else {
                None
            }
        }
        _ => Some("_relative".to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_extraction() {
        assert_eq!(protocol_from_url("https://example.com"), Some("https".to_owned()));
        assert_eq!(protocol_from_url("MAILTO:me@example.com"), Some("mailto".to_owned()));
        assert_eq!(protocol_from_url("/relative/path"), Some("_relative".to_owned()));
        assert_eq!(protocol_from_url("foo bar:baz"), None);
    }

    #[test]
    fn test_trust_defaults_closed() {
        let settings = Settings::default();
        let mut ctx = TrustContext {
            command: "\\url".to_owned(),
            url: Some("https://example.com".to_owned()),
            ..Default::default()
        };
        assert!(!settings.is_trusted(&mut ctx));
        assert_eq!(ctx.protocol.as_deref(), Some("https"));
    }
}
