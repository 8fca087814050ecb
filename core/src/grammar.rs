//! Recognizer for the flag declaration mini-language.
//!
//! Options are declared as a prefix (`-a`, `--all`, `-a, --all`) followed by an
//! optional value part (`<type>`, `[type]`, `<type...>`, `[type...]`).
//! Positional arguments are a lone value part. The recognizer turns either
//! form into a structured declaration or rejects it with a
//! [`DeclarationError`] naming the offending text.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::error::DeclarationError;

/// Literal token that ends option processing.
pub const OPTION_TERMINATOR: &str = "--";

const ARRAY_MARKER: &str = "...";
const REVERSE_PREFIX: &str = "--no-";

static PATTERNS: LazyLock<DeclarationPatterns> = LazyLock::new(DeclarationPatterns::new);

struct DeclarationPatterns {
    // -a, --all <type>  /  --all [type...]  /  -a
    option: Regex,
    // Splits an accepted prefix into its short and long halves.
    prefix: Regex,
    // <name>  /  [name...]
    argument: Regex,
}

impl DeclarationPatterns {
    fn new() -> Self {
        // Word characters are ASCII only.
        Self {
            option: Regex::new(
                r"^(?P<prefix>-[A-Za-z0-9_][, |]*--[A-Za-z0-9_][A-Za-z0-9_-]*|-[A-Za-z0-9_]|--[A-Za-z0-9_][A-Za-z0-9_-]*)(?: (?:\[(?P<optional>[A-Za-z0-9_]+?(?:\.\.\.)?)\]|<(?P<required>[A-Za-z0-9_]+?(?:\.\.\.)?)>))?$",
            )
            .expect("static regex must compile"),
            prefix: Regex::new(
                r"^(?:(?P<short>-[A-Za-z0-9_])[, |]*)?(?P<long>--[A-Za-z0-9_][A-Za-z0-9_-]*)?$",
            )
            .expect("static regex must compile"),
            argument: Regex::new(
                r"^(?:<(?P<required>[A-Za-z0-9_]+?(?:\.\.\.)?)>|\[(?P<optional>[A-Za-z0-9_]+?(?:\.\.\.)?)\])$",
            )
            .expect("static regex must compile"),
        }
    }
}

/// How many values an option consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Arity {
    /// Presence flag, no value.
    Boolean,
    /// Exactly one value.
    #[serde(rename = "string")]
    Single,
    /// One or more values, collected in order.
    #[serde(rename = "string-array")]
    Multiple,
}

/// How many values a positional slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArgumentArity {
    #[serde(rename = "string")]
    Single,
    #[serde(rename = "string-array")]
    Multiple,
}

/// Structured form of an option flag declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagDeclaration {
    /// Short form (e.g. `-a`).
    pub short: Option<String>,
    /// Long form (e.g. `--all-of-it`).
    pub long: Option<String>,
    /// Number of values the option takes.
    pub arity: Arity,
    /// Whether the value may be omitted (`[type]` rather than `<type>`).
    pub value_optional: bool,
    /// Placeholder text between the brackets, including any `...` marker.
    pub value_display: Option<String>,
    /// camelCase key the parsed value is stored under.
    pub name: String,
    /// Long form was declared with a `--no-` prefix.
    pub reverse: bool,
}

/// Structured form of one positional argument token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentDeclaration {
    pub required: bool,
    /// camelCase key the parsed value is stored under.
    pub name: String,
    /// Text between the brackets, including any `...` marker.
    pub display: String,
    pub arity: ArgumentArity,
}

/// Recognizes an option declaration such as `-a, --all <type>`.
///
/// Short and long forms may be joined by any run of `,`, `|` and spaces.
/// The canonical name comes from the long form (minus `--` or `--no-`),
/// falling back to the short form.
///
/// # Examples
///
/// ```
/// use flagspec_core::{Arity, parse_option_flag};
///
/// let decl = parse_option_flag("-a, --all-of-it <type...>").unwrap();
/// assert_eq!(decl.short.as_deref(), Some("-a"));
/// assert_eq!(decl.long.as_deref(), Some("--all-of-it"));
/// assert_eq!(decl.name, "allOfIt");
/// assert_eq!(decl.arity, Arity::Multiple);
/// assert_eq!(decl.value_display.as_deref(), Some("type..."));
///
/// assert!(parse_option_flag("-aa").is_err());
/// ```
pub fn parse_option_flag(text: &str) -> Result<FlagDeclaration, DeclarationError> {
    let invalid = || DeclarationError::InvalidFlagDeclaration(text.to_string());

    let caps = PATTERNS.option.captures(text).ok_or_else(invalid)?;
    let prefix = caps.name("prefix").map(|m| m.as_str()).ok_or_else(invalid)?;
    let prefix_caps = PATTERNS.prefix.captures(prefix).ok_or_else(invalid)?;

    let short = prefix_caps.name("short").map(|m| m.as_str().to_string());
    let long = prefix_caps.name("long").map(|m| m.as_str().to_string());

    let (raw_name, reverse) = match (&long, &short) {
        (Some(long), _) => match long.strip_prefix(REVERSE_PREFIX) {
            Some(rest) => (rest, true),
            None => (&long[2..], false),
        },
        (None, Some(short)) => (&short[1..], false),
        (None, None) => return Err(invalid()),
    };
    let name = to_camel_case(raw_name);
    if name.is_empty() {
        return Err(invalid());
    }

    let (arity, value_optional, value_display) = match value_part(&caps) {
        Some((display, optional)) => {
            let arity = if display.ends_with(ARRAY_MARKER) {
                Arity::Multiple
            } else {
                Arity::Single
            };
            (arity, optional, Some(display.to_string()))
        }
        None => (Arity::Boolean, false, None),
    };

    Ok(FlagDeclaration {
        short,
        long,
        arity,
        value_optional,
        value_display,
        name,
        reverse,
    })
}

/// Recognizes a single positional token such as `<source>` or `[files...]`.
///
/// # Examples
///
/// ```
/// use flagspec_core::{ArgumentArity, parse_argument_token};
///
/// let decl = parse_argument_token("[files...]").unwrap();
/// assert!(!decl.required);
/// assert_eq!(decl.name, "files");
/// assert_eq!(decl.display, "files...");
/// assert_eq!(decl.arity, ArgumentArity::Multiple);
/// ```
pub fn parse_argument_token(token: &str) -> Result<ArgumentDeclaration, DeclarationError> {
    let invalid = || DeclarationError::InvalidArgumentDeclaration(token.to_string());

    let caps = PATTERNS.argument.captures(token).ok_or_else(invalid)?;
    let (display, required) = match (caps.name("required"), caps.name("optional")) {
        (Some(m), _) => (m.as_str(), true),
        (None, Some(m)) => (m.as_str(), false),
        (None, None) => return Err(invalid()),
    };

    let (base, arity) = match display.strip_suffix(ARRAY_MARKER) {
        Some(base) => (base, ArgumentArity::Multiple),
        None => (display, ArgumentArity::Single),
    };
    let name = to_camel_case(base);
    if name.is_empty() {
        return Err(invalid());
    }

    Ok(ArgumentDeclaration {
        required,
        name,
        display: display.to_string(),
        arity,
    })
}

fn value_part<'t>(caps: &Captures<'t>) -> Option<(&'t str, bool)> {
    if let Some(m) = caps.name("required") {
        return Some((m.as_str(), false));
    }
    caps.name("optional").map(|m| (m.as_str(), true))
}

/// Converts kebab-case or snake_case text to camelCase.
///
/// Leading separators are dropped, a separator run followed by an ASCII
/// letter becomes that letter in upper case, and any other separator is
/// deleted.
///
/// # Examples
///
/// ```
/// use flagspec_core::to_camel_case;
///
/// assert_eq!(to_camel_case("test-camel-case"), "testCamelCase");
/// assert_eq!(to_camel_case("not_______sssssnake"), "notSssssnake");
/// assert_eq!(to_camel_case("isCamelCase"), "isCamelCase");
/// assert_eq!(to_camel_case("--------"), "");
/// ```
pub fn to_camel_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.trim_start_matches(is_separator).chars().peekable();

    while let Some(ch) = chars.next() {
        if !is_separator(ch) {
            out.push(ch);
            continue;
        }
        while chars.next_if(|&c| is_separator(c)).is_some() {}
        if let Some(next) = chars.next_if(char::is_ascii_alphabetic) {
            out.push(next.to_ascii_uppercase());
        }
    }

    out
}

fn is_separator(ch: char) -> bool {
    ch == '-' || ch == '_'
}

/// Returns `true` if `token` lexically looks like an option flag.
///
/// Any token starting with a dash counts, except the bare terminator `--`.
/// The token does not need to match a registered option.
pub fn looks_like_flag(token: &str) -> bool {
    token.starts_with('-') && token != OPTION_TERMINATOR
}

/// Returns `true` if `token` cannot serve as an option value: it is absent,
/// flag-like, or the terminator.
pub fn is_not_value(token: Option<&str>) -> bool {
    token.is_none_or(|t| looks_like_flag(t) || t == OPTION_TERMINATOR)
}
