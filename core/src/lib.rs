//! Declarative command-line option and argument parsing.
//!
//! Options and positional arguments are declared with a small flag grammar
//! and parsed in a single left-to-right pass:
//!
//! - [`parse_option_flag`] / [`parse_argument_token`]: the recognizer that
//!   turns `-a, --all <type>` or `[files...]` into structured declarations.
//! - [`OptionSpec`] and [`ArgumentSpec`]: descriptors registered on a command.
//! - [`Command`]: owns the descriptors and runs [`Command::parse`], producing
//!   an option map and an argument map of [`Value`]s.
//! - [`render_help`]: help text, returned as [`ParseOutcome::Help`] when a
//!   help trigger is present.
//! - [`CommandConfig`]: the same declarations loaded from YAML or JSON.
//! - [`validate_command`]: lints for declarations that can never parse as
//!   intended.
//!
//! Parse failures come back as [`ParseError`]; only
//! [`Command::parse_or_exit`] terminates the process.
//!
//! # Example
//!
//! ```
//! use flagspec_core::*;
//!
//! let mut cmd = Command::new()
//!     .with_name("copy")
//!     .with_version("0.1.0")
//!     .with_required_option("-d, --dest <dir>", Some("destination"))?
//!     .with_option("-e, --exclude <glob...>", None)?
//!     .with_argument("<source> [files...]", None)?;
//!
//! cmd.parse(["-d", "out", "src", "a.txt", "b.txt"])?;
//! assert_eq!(cmd.option_results()["dest"], Value::from("out"));
//! assert_eq!(cmd.argument_results()["source"], Value::from("src"));
//!
//! let err = cmd.parse(["src"]).unwrap_err();
//! assert_eq!(err.to_string(), "error: required option '-d, --dest <dir>' not found.");
//!
//! assert_eq!(cmd.parse(["-V"])?, ParseOutcome::Version("0.1.0".into()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod argument;
mod command;
mod config;
mod error;
mod grammar;
mod help;
mod option;
mod validate;
mod value;

pub use argument::ArgumentSpec;
pub use command::{Command, ParseOutcome, Trigger};
pub use config::{ArgumentConfig, CommandConfig, OptionConfig, TriggerConfig};
pub use error::{ConfigError, DeclarationError, PARSE_ERROR_EXIT_CODE, ParseError, Result};
pub use grammar::{
    ArgumentArity, ArgumentDeclaration, Arity, FlagDeclaration, OPTION_TERMINATOR, is_not_value,
    looks_like_flag, parse_argument_token, parse_option_flag, to_camel_case,
};
pub use help::{compare_flags, render_help};
pub use option::OptionSpec;
pub use validate::{ValidationError, validate_command};
pub use value::{Value, ValueMap};
