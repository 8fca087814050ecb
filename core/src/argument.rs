//! Positional argument descriptors.

use serde::{Deserialize, Serialize};

use crate::error::DeclarationError;
use crate::grammar::{ArgumentArity, parse_argument_token};

/// One positional slot such as `<source>` or `[files...]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentSpec {
    pub required: bool,
    /// camelCase result key.
    pub value_name: String,
    /// Text between the brackets, including any `...` marker.
    pub value_name_display: String,
    pub arity: ArgumentArity,
    pub description: Option<String>,
}

impl ArgumentSpec {
    /// Parses a single argument token.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::InvalidArgumentDeclaration`] for anything
    /// other than `<name>`, `<name...>`, `[name]` or `[name...]`.
    pub fn new(token: &str) -> Result<Self, DeclarationError> {
        let decl = parse_argument_token(token)?;
        Ok(Self {
            required: decl.required,
            value_name: decl.name,
            value_name_display: decl.display,
            arity: decl.arity,
            description: None,
        })
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Bracketed form as declared (`<source>`, `[files...]`).
    pub fn display_name(&self) -> String {
        if self.required {
            format!("<{}>", self.value_name_display)
        } else {
            format!("[{}]", self.value_name_display)
        }
    }

    pub fn is_multiple(&self) -> bool {
        self.arity == ArgumentArity::Multiple
    }
}
