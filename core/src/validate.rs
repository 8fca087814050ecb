//! Lints for command declarations.
//!
//! Registration accepts anything the grammar accepts, including layouts
//! that can never parse the way the author intended (a flag declared twice,
//! an array slot followed by more slots). [`validate_command`] reports those
//! without rejecting the command.
//!
//! # Examples
//!
//! ```
//! use flagspec_core::*;
//!
//! let cmd = Command::new().with_option("-v, --verbose", None)?;
//! assert!(validate_command(&cmd).is_empty());
//!
//! let cmd = cmd.with_option("-v, --version-check", None)?;
//! assert_eq!(
//!     validate_command(&cmd),
//!     vec![ValidationError::DuplicateFlag("-v".into())]
//! );
//! # Ok::<(), DeclarationError>(())
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::Command;

/// Problems found in a command's declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Two options share a short or long form; only the first is reachable.
    #[error("duplicate flag: {0}")]
    DuplicateFlag(String),
    /// An option flag is shadowed by the help or version trigger.
    #[error("flag shadowed by help/version trigger: {0}")]
    TriggerConflict(String),
    /// Two options store their values under the same key.
    #[error("duplicate option name: {0}")]
    DuplicateOptionName(String),
    /// Two argument slots store their values under the same key.
    #[error("duplicate argument name: {0}")]
    DuplicateArgumentName(String),
    /// An array slot is followed by more slots, which never receive values.
    #[error("array argument must be last: {0}")]
    ArrayArgumentNotLast(String),
    /// A required slot follows an optional one.
    #[error("required argument after optional argument: {0}")]
    RequiredAfterOptional(String),
}

/// Collects every declaration problem in `command`, in declaration order.
pub fn validate_command(command: &Command) -> Vec<ValidationError> {
    let mut errors = validate_options(command);
    errors.extend(validate_arguments(command));
    errors
}

fn validate_options(command: &Command) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen_flags = HashSet::new();
    let mut seen_names = HashSet::new();

    let mut triggers = vec![command.help_trigger()];
    triggers.extend(command.version_trigger());

    for option in command.option_specs() {
        for flag in option.short.iter().chain(option.long.iter()) {
            if triggers.iter().any(|t| t.matches(flag)) {
                errors.push(ValidationError::TriggerConflict(flag.clone()));
            } else if !seen_flags.insert(flag.as_str()) {
                errors.push(ValidationError::DuplicateFlag(flag.clone()));
            }
        }
        if !seen_names.insert(option.name.as_str()) {
            errors.push(ValidationError::DuplicateOptionName(option.name.clone()));
        }
    }

    errors
}

fn validate_arguments(command: &Command) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen_names = HashSet::new();
    let mut saw_optional = false;
    let arguments = command.argument_specs();

    for (index, argument) in arguments.iter().enumerate() {
        let display = argument.display_name();
        if !seen_names.insert(argument.value_name.as_str()) {
            errors.push(ValidationError::DuplicateArgumentName(
                argument.value_name.clone(),
            ));
        }
        if argument.is_multiple() && index + 1 < arguments.len() {
            errors.push(ValidationError::ArrayArgumentNotLast(display.clone()));
        }
        if argument.required && saw_optional {
            errors.push(ValidationError::RequiredAfterOptional(display));
        }
        saw_optional |= !argument.required;
    }

    errors
}
