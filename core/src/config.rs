//! Declaration files describing a command.
//!
//! A [`CommandConfig`] holds the same declarations the builder API takes,
//! in a form that can live in YAML or JSON next to a script or tool.
//!
//! # Example YAML
//!
//! ```yaml
//! name: copy
//! usage: "[options] <source> [files...]"
//! description: Copy files around.
//! version: 1.2.3
//! options:
//!   - flags: "-d, --dest <dir>"
//!     description: destination directory
//!     required: true
//!   - flags: "-m, --mode [mode]"
//!     default: "644"
//! arguments:
//!   - declaration: "<source>"
//!     description: what to copy
//!   - declaration: "[files...]"
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::option::OptionSpec;
use crate::validate::validate_command;
use crate::value::Value;
use crate::{Command, ConfigError};

/// One option entry in a declaration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionConfig {
    /// Flag declaration, e.g. `-a, --all <type>`.
    pub flags: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Recorded when an optional value is omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_description: Option<String>,
}

/// One argument entry in a declaration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentConfig {
    /// One or more whitespace-separated argument tokens.
    pub declaration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Custom trigger flags for help or version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerConfig {
    pub flags: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A full command declaration.
///
/// # Examples
///
/// ```
/// use flagspec_core::{CommandConfig, Value};
///
/// let config = CommandConfig::from_yaml_str(r#"
/// options:
///   - flags: "-v, --verbose"
/// arguments:
///   - declaration: "<input>"
/// "#).unwrap();
///
/// let mut cmd = config.into_command().unwrap();
/// cmd.parse(["-v", "file.txt"]).unwrap();
/// assert_eq!(cmd.argument_results()["input"], Value::from("file.txt"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Replaces `-V, --version` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_flag: Option<TriggerConfig>,
    /// Replaces `-h, --help` when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_flag: Option<TriggerConfig>,
    #[serde(default)]
    pub options: Vec<OptionConfig>,
    #[serde(default)]
    pub arguments: Vec<ArgumentConfig>,
}

impl CommandConfig {
    /// Loads a declaration file. Files ending in `.json` are read as JSON,
    /// anything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ConfigError::IoError) if the file cannot be read,
    /// or [`JsonError`](ConfigError::JsonError) /
    /// [`YamlError`](ConfigError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(std::fs::File::open(path)?);
        let config = if is_json(path) {
            serde_json::from_reader(reader)?
        } else {
            serde_yaml::from_reader(reader)?
        };
        debug!(path = %path.display(), "Loaded command declaration");
        Ok(config)
    }

    /// Saves the declaration, picking the format from the extension the same
    /// way [`load`](Self::load) does.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let writer = BufWriter::new(std::fs::File::create(path)?);
        if is_json(path) {
            serde_json::to_writer_pretty(writer, self)?;
        } else {
            serde_yaml::to_writer(writer, self)?;
        }
        Ok(())
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Builds a [`Command`] from the declarations.
    ///
    /// Lint findings from [`validate_command`] are logged as warnings and do
    /// not fail the build.
    ///
    /// # Errors
    ///
    /// Returns [`Declaration`](ConfigError::Declaration) for the first
    /// declaration the recognizer rejects.
    pub fn into_command(self) -> Result<Command> {
        let mut cmd = Command::new();
        if let Some(ref name) = self.name {
            cmd = cmd.with_name(name);
        }
        if let Some(ref usage) = self.usage {
            cmd = cmd.with_usage(usage);
        }
        if let Some(ref desc) = self.description {
            cmd = cmd.with_description(desc);
        }
        match (&self.version, &self.version_flag) {
            (Some(version), Some(trigger)) => {
                cmd = cmd.with_version_flag(
                    version,
                    &trigger.flags,
                    trigger.description.as_deref(),
                )?;
            }
            (Some(version), None) => cmd = cmd.with_version(version),
            (None, _) => {}
        }
        if let Some(ref trigger) = self.help_flag {
            cmd = cmd.with_help_flag(&trigger.flags, trigger.description.as_deref())?;
        }

        for option in self.options {
            let mut spec = if option.required {
                OptionSpec::required(&option.flags)?
            } else {
                OptionSpec::new(&option.flags)?
            };
            spec.description = option.description;
            spec.default_value = option.default;
            spec.default_description = option.default_description;
            cmd.register_option(spec);
        }
        for argument in self.arguments {
            cmd = cmd.with_argument(&argument.declaration, argument.description.as_deref())?;
        }

        for finding in validate_command(&cmd) {
            warn!(command = ?cmd.name(), %finding, "Declaration lint");
        }

        Ok(cmd)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

impl TryFrom<CommandConfig> for Command {
    type Error = ConfigError;

    fn try_from(config: CommandConfig) -> Result<Self> {
        config.into_command()
    }
}
