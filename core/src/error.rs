//! Error types for declaration, parsing, and configuration failures.
//!
//! Declaration errors are programmer errors raised while a [`Command`] is
//! being built. Parse errors describe bad user input and carry the exact
//! message text a command-line tool prints before exiting with status 1.
//!
//! [`Command`]: crate::Command

use thiserror::Error;

/// Exit status used for every parse failure.
pub const PARSE_ERROR_EXIT_CODE: i32 = 1;

/// Errors raised while registering options and arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// The option flag text does not follow the declaration grammar.
    #[error("'{0}' is not valid option flag.")]
    InvalidFlagDeclaration(String),

    /// The argument declaration is not `<name>`, `[name]` or an array form.
    #[error("'{0}' is not valid argument flag.")]
    InvalidArgumentDeclaration(String),
}

/// Errors raised while parsing a raw argument list.
///
/// The `Display` output matches what a configured command prints to standard
/// error, so callers that exit on failure can print it verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A flag-like token matched no registered option.
    #[error("error: option '{0}' is not valid option.")]
    UnknownOption(String),

    /// A value-taking option appeared without its value.
    #[error("error: option '{0}' needs a value.")]
    MissingOptionValue(String),

    /// A required option never appeared before `--` or the end of input.
    #[error("error: required option '{0}' not found.")]
    MissingRequiredOption(String),

    /// A required positional slot was never filled.
    #[error("error: argument '{0}' is required.")]
    MissingRequiredArgument(String),
}

impl ParseError {
    /// Returns the display text of the offending option, argument or token.
    pub fn subject(&self) -> &str {
        match self {
            Self::UnknownOption(s)
            | Self::MissingOptionValue(s)
            | Self::MissingRequiredOption(s)
            | Self::MissingRequiredArgument(s) => s,
        }
    }

    /// Process exit status a command-line wrapper should use.
    pub fn exit_code(&self) -> i32 {
        PARSE_ERROR_EXIT_CODE
    }
}

/// Errors that can occur while loading declaration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A declaration in the file was rejected by the recognizer.
    #[error("invalid declaration: {0}")]
    Declaration(#[from] DeclarationError),
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_messages() {
        assert_eq!(
            ParseError::UnknownOption("-a".into()).to_string(),
            "error: option '-a' is not valid option."
        );
        assert_eq!(
            ParseError::MissingOptionValue("-t, --test <input>".into()).to_string(),
            "error: option '-t, --test <input>' needs a value."
        );
        assert_eq!(
            ParseError::MissingRequiredOption("-r, --required <param>".into()).to_string(),
            "error: required option '-r, --required <param>' not found."
        );
        assert_eq!(
            ParseError::MissingRequiredArgument("input".into()).to_string(),
            "error: argument 'input' is required."
        );
    }

    #[test]
    fn test_parse_error_subject_and_exit_code() {
        let err = ParseError::UnknownOption("--nope".into());
        assert_eq!(err.subject(), "--nope");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_declaration_error_messages() {
        assert_eq!(
            DeclarationError::InvalidFlagDeclaration("-aa".into()).to_string(),
            "'-aa' is not valid option flag."
        );
        assert_eq!(
            DeclarationError::InvalidArgumentDeclaration("".into()).to_string(),
            "'' is not valid argument flag."
        );
    }
}
