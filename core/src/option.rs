//! Named option descriptors.

use serde::{Deserialize, Serialize};

use crate::error::DeclarationError;
use crate::grammar::{Arity, parse_option_flag};
use crate::value::Value;

/// A registered option such as `-a, --all <type>`.
///
/// Built from a flag declaration via [`OptionSpec::new`] or
/// [`OptionSpec::required`], then refined with builder methods.
///
/// # Examples
///
/// ```
/// use flagspec_core::{Arity, OptionSpec};
///
/// let opt = OptionSpec::required("-a, --all-of-it <type...>")
///     .unwrap()
///     .with_description("things to include");
/// assert_eq!(opt.name, "allOfIt");
/// assert_eq!(opt.arity, Arity::Multiple);
/// assert!(opt.required);
/// assert_eq!(opt.display_name(), "-a, --all-of-it <type...>");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Short form (e.g. `-a`).
    pub short: Option<String>,
    /// Long form (e.g. `--all`).
    pub long: Option<String>,
    /// camelCase result key.
    pub name: String,
    /// Placeholder text for the value, including any `...` marker.
    pub value_display: Option<String>,
    /// Value may be omitted on the command line.
    pub value_optional: bool,
    pub arity: Arity,
    /// Declared with a `--no-` long form. Recorded, not acted on by the parser.
    pub reverse: bool,
    /// The option itself must appear on the command line.
    pub required: bool,
    pub description: Option<String>,
    /// Recorded when an optional value is omitted.
    pub default_value: Option<Value>,
    pub default_description: Option<String>,
}

impl OptionSpec {
    /// Parses `flags` into an optional option.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::InvalidFlagDeclaration`] when `flags` does
    /// not follow the declaration grammar.
    pub fn new(flags: &str) -> Result<Self, DeclarationError> {
        let decl = parse_option_flag(flags)?;
        Ok(Self {
            short: decl.short,
            long: decl.long,
            name: decl.name,
            value_display: decl.value_display,
            value_optional: decl.value_optional,
            arity: decl.arity,
            reverse: decl.reverse,
            required: false,
            description: None,
            default_value: None,
            default_description: None,
        })
    }

    /// Parses `flags` into an option that must appear on the command line.
    pub fn required(flags: &str) -> Result<Self, DeclarationError> {
        let mut spec = Self::new(flags)?;
        spec.required = true;
        Ok(spec)
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Sets the value recorded when an optional value is omitted.
    pub fn with_default(mut self, value: impl Into<Value>, desc: Option<&str>) -> Self {
        self.default_value = Some(value.into());
        self.default_description = desc.map(String::from);
        self
    }

    /// Returns `true` if `token` is exactly this option's short or long form.
    pub fn matches(&self, token: &str) -> bool {
        self.short.as_deref() == Some(token) || self.long.as_deref() == Some(token)
    }

    /// Flag forms joined the way help output shows them (`-a, --all`).
    pub fn flags(&self) -> String {
        join_flags(self.short.as_deref(), self.long.as_deref())
    }

    /// Full display form used in help and error messages.
    ///
    /// The value placeholder is normalized to `<type>` or `[type]`, so
    /// `-a |, --all <type>` displays as `-a, --all <type>`.
    pub fn display_name(&self) -> String {
        let mut out = self.flags();
        if let Some(ref display) = self.value_display {
            if self.value_optional {
                out.push_str(&format!(" [{display}]"));
            } else {
                out.push_str(&format!(" <{display}>"));
            }
        }
        out
    }

    /// Description column for help output, with the default appended.
    pub fn help_description(&self) -> String {
        let default = self
            .default_description
            .clone()
            .or_else(|| self.default_value.as_ref().map(|v| v.to_string()));
        match (&self.description, default) {
            (Some(desc), Some(default)) => format!("{desc} (default: {default})"),
            (Some(desc), None) => desc.clone(),
            (None, Some(default)) => format!("(default: {default})"),
            (None, None) => String::new(),
        }
    }
}

/// Joins short and long flag forms with `", "`.
pub(crate) fn join_flags(short: Option<&str>, long: Option<&str>) -> String {
    match (short, long) {
        (Some(short), Some(long)) => format!("{short}, {long}"),
        (Some(flag), None) | (None, Some(flag)) => flag.to_string(),
        (None, None) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_creation() {
        let option = OptionSpec::required("-a, --all-of-it <type...>").unwrap();
        assert_eq!(option.short.as_deref(), Some("-a"));
        assert_eq!(option.long.as_deref(), Some("--all-of-it"));
        assert!(option.required);
        assert_eq!(option.name, "allOfIt");
        assert_eq!(option.arity, Arity::Multiple);
        assert_eq!(option.value_display.as_deref(), Some("type..."));
        assert!(!option.value_optional);

        let boolean = OptionSpec::new("-a, --all").unwrap();
        assert_eq!(boolean.arity, Arity::Boolean);
        assert!(!boolean.required);
    }

    #[test]
    fn test_option_creation_failures() {
        for flags in ["-aa", "-a, ------", "", "<type>"] {
            assert!(OptionSpec::new(flags).is_err(), "{flags:?}");
        }
    }

    #[test]
    fn test_display_name_normalizes_separators() {
        let option = OptionSpec::new("-a |, |, --all <type>").unwrap();
        assert_eq!(option.display_name(), "-a, --all <type>");

        let optional = OptionSpec::new("-b [file]").unwrap();
        assert_eq!(optional.display_name(), "-b [file]");

        let long_only = OptionSpec::new("--verbose").unwrap();
        assert_eq!(long_only.display_name(), "--verbose");
    }

    #[test]
    fn test_matches() {
        let option = OptionSpec::new("-v, --verbose").unwrap();
        assert!(option.matches("-v"));
        assert!(option.matches("--verbose"));
        assert!(!option.matches("-x"));
        assert!(!option.matches("verbose"));
    }

    #[test]
    fn test_help_description_with_default() {
        let plain = OptionSpec::new("-o [dir]").unwrap().with_description("output dir");
        assert_eq!(plain.help_description(), "output dir");

        let with_value = plain.clone().with_default("out", None);
        assert_eq!(with_value.help_description(), "output dir (default: out)");

        let described = plain.with_default("out", Some("./out"));
        assert_eq!(described.help_description(), "output dir (default: ./out)");

        let bare = OptionSpec::new("-q [level]").unwrap().with_default(true, None);
        assert_eq!(bare.help_description(), "(default: true)");
    }
}
