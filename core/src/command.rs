//! The command engine: registered declarations plus the parse loop.
//!
//! A [`Command`] owns its option and argument descriptors in registration
//! order. [`Command::parse`] walks a raw argument list once, left to right,
//! and on success replaces the stored result maps.

use std::collections::HashSet;

use tracing::debug;

use crate::argument::ArgumentSpec;
use crate::error::{DeclarationError, ParseError};
use crate::grammar::{
    ArgumentArity, Arity, OPTION_TERMINATOR, is_not_value, looks_like_flag, parse_option_flag,
};
use crate::help::render_help;
use crate::option::{OptionSpec, join_flags};
use crate::value::{Value, ValueMap};

const DEFAULT_HELP_FLAGS: (&str, &str) = ("-h", "--help");
const DEFAULT_HELP_DESCRIPTION: &str = "display this help message";
const DEFAULT_VERSION_FLAGS: (&str, &str) = ("-V", "--version");
const DEFAULT_VERSION_DESCRIPTION: &str = "display version";

/// Flags that short-circuit parsing (help and version).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub short: Option<String>,
    pub long: Option<String>,
    pub description: String,
}

impl Trigger {
    fn new(short: &str, long: &str, description: &str) -> Self {
        Self {
            short: Some(short.to_string()),
            long: Some(long.to_string()),
            description: description.to_string(),
        }
    }

    /// Builds a trigger from a flag declaration such as `-v, --version`.
    ///
    /// Only the short and long forms are kept; a value part is ignored.
    pub fn from_flags(flags: &str, description: &str) -> Result<Self, DeclarationError> {
        let decl = parse_option_flag(flags)?;
        Ok(Self {
            short: decl.short,
            long: decl.long,
            description: description.to_string(),
        })
    }

    pub fn matches(&self, token: &str) -> bool {
        self.short.as_deref() == Some(token) || self.long.as_deref() == Some(token)
    }

    /// Flag forms joined the way help output shows them.
    pub fn flags(&self) -> String {
        join_flags(self.short.as_deref(), self.long.as_deref())
    }
}

/// What a successful call to [`Command::parse`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Arguments were parsed; read them with [`Command::option_results`] and
    /// [`Command::argument_results`].
    Parsed,
    /// A help trigger was present. Carries the rendered help text.
    Help(String),
    /// A version trigger was present. Carries the version string.
    Version(String),
}

/// A configured command-line parser.
///
/// # Examples
///
/// ```
/// use flagspec_core::{Command, ParseOutcome, Value};
///
/// let mut cmd = Command::new()
///     .with_option("-a, --all <type>", None)?
///     .with_option("-v, --verbose", Some("print more"))?
///     .with_argument("<source> [files...]", None)?;
///
/// let outcome = cmd.parse(["--verbose", "-a", "x", "src", "f1", "f2"])?;
/// assert_eq!(outcome, ParseOutcome::Parsed);
/// assert_eq!(cmd.option_results()["all"], Value::from("x"));
/// assert_eq!(cmd.option_results()["verbose"], Value::Bool(true));
/// assert_eq!(cmd.argument_results()["source"], Value::from("src"));
/// assert_eq!(
///     cmd.argument_results()["files"],
///     Value::List(vec!["f1".into(), "f2".into()])
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Command {
    options: Vec<OptionSpec>,
    arguments: Vec<ArgumentSpec>,

    name: Option<String>,
    usage: Option<String>,
    description: Option<String>,

    version: Option<String>,
    version_trigger: Trigger,
    help_trigger: Trigger,

    option_results: ValueMap,
    argument_results: ValueMap,
}

impl Default for Command {
    fn default() -> Self {
        Self::new()
    }
}

impl Command {
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
            arguments: Vec::new(),
            name: None,
            usage: None,
            description: None,
            version: None,
            version_trigger: Trigger::new(
                DEFAULT_VERSION_FLAGS.0,
                DEFAULT_VERSION_FLAGS.1,
                DEFAULT_VERSION_DESCRIPTION,
            ),
            help_trigger: Trigger::new(
                DEFAULT_HELP_FLAGS.0,
                DEFAULT_HELP_FLAGS.1,
                DEFAULT_HELP_DESCRIPTION,
            ),
            option_results: ValueMap::new(),
            argument_results: ValueMap::new(),
        }
    }

    /// Sets the program name shown in the usage line.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Sets the usage text shown after the program name.
    pub fn with_usage(mut self, usage: &str) -> Self {
        self.usage = Some(usage.to_string());
        self
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Sets the version string, triggered by `-V` / `--version`.
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Sets the version string together with custom trigger flags.
    ///
    /// `flags` replaces both default forms, so `-v` alone leaves no long
    /// trigger.
    pub fn with_version_flag(
        mut self,
        version: &str,
        flags: &str,
        description: Option<&str>,
    ) -> Result<Self, DeclarationError> {
        let description = description.unwrap_or(&self.version_trigger.description);
        self.version_trigger = Trigger::from_flags(flags, description)?;
        self.version = Some(version.to_string());
        Ok(self)
    }

    /// Replaces the help trigger flags (default `-h, --help`).
    pub fn with_help_flag(
        mut self,
        flags: &str,
        description: Option<&str>,
    ) -> Result<Self, DeclarationError> {
        let description = description.unwrap_or(&self.help_trigger.description);
        self.help_trigger = Trigger::from_flags(flags, description)?;
        Ok(self)
    }

    /// Declares an option that may be omitted.
    pub fn with_option(
        mut self,
        flags: &str,
        description: Option<&str>,
    ) -> Result<Self, DeclarationError> {
        let mut spec = OptionSpec::new(flags)?;
        spec.description = description.map(String::from);
        self.register_option(spec);
        Ok(self)
    }

    /// Declares an option that must appear on the command line.
    pub fn with_required_option(
        mut self,
        flags: &str,
        description: Option<&str>,
    ) -> Result<Self, DeclarationError> {
        let mut spec = OptionSpec::required(flags)?;
        spec.description = description.map(String::from);
        self.register_option(spec);
        Ok(self)
    }

    /// Adds a pre-built option descriptor.
    pub fn with_option_spec(mut self, spec: OptionSpec) -> Self {
        self.register_option(spec);
        self
    }

    /// Declares one or more whitespace-separated positional arguments.
    ///
    /// The description is attached only when `declaration` holds a single
    /// token.
    pub fn with_argument(
        mut self,
        declaration: &str,
        description: Option<&str>,
    ) -> Result<Self, DeclarationError> {
        let first = self.arguments.len();
        self.register_argument(declaration)?;
        if let (Some(desc), 1) = (description, self.arguments.len() - first) {
            self.arguments[first].description = Some(desc.to_string());
        }
        Ok(self)
    }

    /// Appends an option. Duplicates are not rejected; lookup is first match.
    pub fn register_option(&mut self, spec: OptionSpec) {
        debug!(flags = %spec.flags(), name = %spec.name, arity = ?spec.arity, "Registered option");
        self.options.push(spec);
    }

    /// Splits `declaration` on whitespace and appends each argument slot.
    ///
    /// Nothing is appended if any token is invalid.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::InvalidArgumentDeclaration`] naming the
    /// first bad token, or the whole text when it is blank.
    pub fn register_argument(&mut self, declaration: &str) -> Result<(), DeclarationError> {
        let specs = declaration
            .split_whitespace()
            .map(ArgumentSpec::new)
            .collect::<Result<Vec<_>, _>>()?;
        if specs.is_empty() {
            return Err(DeclarationError::InvalidArgumentDeclaration(
                declaration.to_string(),
            ));
        }
        for spec in &specs {
            debug!(argument = %spec.display_name(), "Registered argument");
        }
        self.arguments.extend(specs);
        Ok(())
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn usage(&self) -> Option<&str> {
        self.usage.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Registered options in declaration order.
    pub fn option_specs(&self) -> &[OptionSpec] {
        &self.options
    }

    /// Registered argument slots in declaration order.
    pub fn argument_specs(&self) -> &[ArgumentSpec] {
        &self.arguments
    }

    pub fn help_trigger(&self) -> &Trigger {
        &self.help_trigger
    }

    /// The version trigger, present only once a version string is set.
    pub fn version_trigger(&self) -> Option<&Trigger> {
        self.version.as_ref().map(|_| &self.version_trigger)
    }

    /// Options from the last successful parse (empty before any parse).
    pub fn option_results(&self) -> &ValueMap {
        &self.option_results
    }

    /// Arguments from the last successful parse (empty before any parse).
    pub fn argument_results(&self) -> &ValueMap {
        &self.argument_results
    }

    /// Renders the help text for this command.
    pub fn help(&self) -> String {
        render_help(self)
    }

    /// Parses `args` (without the program name).
    ///
    /// Help and version triggers anywhere in `args` win over everything
    /// else. On [`ParseOutcome::Parsed`] both result maps are replaced; on
    /// error they keep the previous parse's contents.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] whose `Display` text is the exact message a
    /// command-line tool prints before exiting with status 1.
    pub fn parse<I, S>(&mut self, args: I) -> Result<ParseOutcome, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();

        if args.iter().any(|a| self.help_trigger.matches(a)) {
            debug!("Help trigger present, skipping parse");
            return Ok(ParseOutcome::Help(self.help()));
        }
        if let Some(ref version) = self.version {
            if args.iter().any(|a| self.version_trigger.matches(a)) {
                debug!("Version trigger present, skipping parse");
                return Ok(ParseOutcome::Version(version.clone()));
            }
        }

        let mut pass = ParsePass::new(&self.options, &self.arguments);
        pass.scan(&args)?;
        let (option_results, argument_results) = pass.finish()?;

        self.option_results = option_results;
        self.argument_results = argument_results;
        Ok(ParseOutcome::Parsed)
    }

    /// Parses `args` and handles every non-success outcome the way a
    /// command-line tool does: help and version are printed to stdout with
    /// exit status 0, errors go to stderr with exit status 1.
    pub fn parse_or_exit<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self.parse(args) {
            Ok(ParseOutcome::Parsed) => {}
            Ok(ParseOutcome::Help(text)) => {
                println!("{text}");
                std::process::exit(0);
            }
            Ok(ParseOutcome::Version(version)) => {
                println!("{version}");
                std::process::exit(0);
            }
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(err.exit_code());
            }
        }
    }

    /// [`parse_or_exit`](Self::parse_or_exit) over the process arguments,
    /// skipping the program name.
    pub fn parse_env_or_exit(&mut self) {
        self.parse_or_exit(std::env::args().skip(1));
    }
}

/// State for one call to [`Command::parse`].
///
/// The set of seen options lives here rather than on the descriptors, so a
/// `Command` can be parsed any number of times without carrying state over.
struct ParsePass<'c> {
    options: &'c [OptionSpec],
    arguments: &'c [ArgumentSpec],
    seen: HashSet<usize>,
    slot: usize,
    option_values: ValueMap,
    argument_values: ValueMap,
}

impl<'c> ParsePass<'c> {
    fn new(options: &'c [OptionSpec], arguments: &'c [ArgumentSpec]) -> Self {
        Self {
            options,
            arguments,
            seen: HashSet::new(),
            slot: 0,
            option_values: ValueMap::new(),
            argument_values: ValueMap::new(),
        }
    }

    fn scan(&mut self, args: &[String]) -> Result<(), ParseError> {
        let mut cursor = 0;
        let mut options_finished = false;

        while cursor < args.len() {
            let token = args[cursor].as_str();

            if options_finished {
                if !self.push_positional(token) {
                    break;
                }
                cursor += 1;
            } else if token == OPTION_TERMINATOR {
                debug!(position = cursor, "Option terminator");
                options_finished = true;
                self.check_required_options()?;
                cursor += 1;
            } else if looks_like_flag(token) {
                cursor = self.consume_option(args, cursor)?;
            } else {
                if !self.push_positional(token) {
                    debug!(position = cursor, "Argument slots exhausted, ignoring the rest");
                    break;
                }
                cursor += 1;
            }
        }

        Ok(())
    }

    /// Handles the option at `args[cursor]` and returns the index of the
    /// next unconsumed token.
    fn consume_option(&mut self, args: &[String], cursor: usize) -> Result<usize, ParseError> {
        let token = args[cursor].as_str();
        let options = self.options;
        let Some(index) = options.iter().position(|o| o.matches(token)) else {
            debug!(token, "Unknown option");
            return Err(ParseError::UnknownOption(token.to_string()));
        };
        self.seen.insert(index);

        let option = &options[index];
        let next = args.get(cursor + 1).map(String::as_str);

        match option.arity {
            Arity::Boolean => {
                self.option_values.insert(option.name.clone(), Value::Bool(true));
                Ok(cursor + 1)
            }
            Arity::Single => {
                if let (false, Some(value)) = (is_not_value(next), next) {
                    self.option_values
                        .insert(option.name.clone(), Value::String(value.to_string()));
                    return Ok(cursor + 2);
                }
                if !option.value_optional {
                    return Err(ParseError::MissingOptionValue(option.display_name()));
                }
                let value = option.default_value.clone().unwrap_or(Value::Bool(true));
                self.option_values.insert(option.name.clone(), value);
                Ok(cursor + 1)
            }
            Arity::Multiple => {
                if is_not_value(next) {
                    return Err(ParseError::MissingOptionValue(option.display_name()));
                }
                let entry = self
                    .option_values
                    .entry(option.name.clone())
                    .or_insert_with(|| Value::List(Vec::new()));
                let mut end = cursor + 1;
                while let Some(value) = args.get(end).filter(|v| !is_not_value(Some(v.as_str()))) {
                    entry.push(value.clone());
                    end += 1;
                }
                Ok(end)
            }
        }
    }

    /// Assigns `token` to the current argument slot. Returns `false` when
    /// every slot is already filled.
    fn push_positional(&mut self, token: &str) -> bool {
        let Some(slot) = self.arguments.get(self.slot) else {
            return false;
        };

        match slot.arity {
            ArgumentArity::Single => {
                self.argument_values
                    .insert(slot.value_name.clone(), Value::String(token.to_string()));
                self.slot += 1;
            }
            // Array slots take every remaining positional.
            ArgumentArity::Multiple => {
                self.argument_values
                    .entry(slot.value_name.clone())
                    .or_insert_with(|| Value::List(Vec::new()))
                    .push(token.to_string());
            }
        }
        true
    }

    fn check_required_options(&self) -> Result<(), ParseError> {
        let missing = self
            .options
            .iter()
            .enumerate()
            .find(|(index, option)| option.required && !self.seen.contains(index));
        match missing {
            Some((_, option)) => Err(ParseError::MissingRequiredOption(option.display_name())),
            None => Ok(()),
        }
    }

    fn finish(self) -> Result<(ValueMap, ValueMap), ParseError> {
        self.check_required_options()?;

        if let Some(slot) = self.arguments.get(self.slot) {
            let filled = self.argument_values.contains_key(&slot.value_name);
            if slot.required && !filled {
                return Err(ParseError::MissingRequiredArgument(
                    slot.value_name_display.clone(),
                ));
            }
        }

        Ok((self.option_values, self.argument_values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Value {
        Value::List(items.iter().map(|s| s.to_string()).collect())
    }

    fn opts(cmd: &Command) -> Vec<(&str, &Value)> {
        cmd.option_results().iter().map(|(k, v)| (k.as_str(), v)).collect()
    }

    #[test]
    fn test_string_option() {
        let mut cmd = Command::new()
            .with_option("-t, --test-camel-case <input>", None)
            .unwrap();

        cmd.parse(["-t", "thisisinput"]).unwrap();
        assert_eq!(opts(&cmd), vec![("testCamelCase", &Value::from("thisisinput"))]);

        cmd.parse(Vec::<String>::new()).unwrap();
        assert!(cmd.option_results().is_empty());

        assert_eq!(
            cmd.parse(["-t"]),
            Err(ParseError::MissingOptionValue(
                "-t, --test-camel-case <input>".into()
            ))
        );
        assert_eq!(
            cmd.parse(["-a"]),
            Err(ParseError::UnknownOption("-a".into()))
        );
    }

    #[test]
    fn test_unregistered_flag_is_not_a_value() {
        let mut cmd = Command::new().with_option("-o, --out <dir>", None).unwrap();
        assert_eq!(
            cmd.parse(["-o", "-x"]),
            Err(ParseError::MissingOptionValue("-o, --out <dir>".into()))
        );
        assert_eq!(
            cmd.parse(["-o", "--"]),
            Err(ParseError::MissingOptionValue("-o, --out <dir>".into()))
        );
    }

    #[test]
    fn test_string_array_option() {
        let mut cmd = Command::new().with_option("-t <input...>", None).unwrap();

        cmd.parse(["-t", "input1", "input2", "this is input 3"]).unwrap();
        assert_eq!(
            cmd.option_results()["t"],
            list(&["input1", "input2", "this is input 3"])
        );

        cmd.parse(["-t", "input1", "-t", "input2", "this is not input3"])
            .unwrap();
        assert_eq!(
            cmd.option_results()["t"],
            list(&["input1", "input2", "this is not input3"])
        );

        cmd.parse(["-t", "input"]).unwrap();
        assert_eq!(cmd.option_results()["t"], list(&["input"]));

        assert_eq!(
            cmd.parse(["-t", "--", "x"]),
            Err(ParseError::MissingOptionValue("-t <input...>".into()))
        );
    }

    #[test]
    fn test_boolean_option_ignores_following_token() {
        let mut cmd = Command::new().with_option("-b, --boolean", None).unwrap();

        cmd.parse(["-b"]).unwrap();
        assert_eq!(opts(&cmd), vec![("boolean", &Value::Bool(true))]);

        cmd.parse(["-b", "do not resolve this"]).unwrap();
        assert_eq!(opts(&cmd), vec![("boolean", &Value::Bool(true))]);
        assert!(cmd.argument_results().is_empty());
    }

    #[test]
    fn test_optional_value_option() {
        let mut cmd = Command::new()
            .with_option("--optional-option [option]", None)
            .unwrap();

        cmd.parse(["--optional-option"]).unwrap();
        assert_eq!(cmd.option_results()["optionalOption"], Value::Bool(true));

        cmd.parse(["--optional-option", "this is option"]).unwrap();
        assert_eq!(
            cmd.option_results()["optionalOption"],
            Value::from("this is option")
        );
    }

    #[test]
    fn test_optional_value_uses_declared_default() {
        let spec = OptionSpec::new("-l, --level [n]")
            .unwrap()
            .with_default("3", None);
        let mut cmd = Command::new().with_option_spec(spec);

        cmd.parse(["--level"]).unwrap();
        assert_eq!(cmd.option_results()["level"], Value::from("3"));

        // Defaults apply only to an omitted value, not an omitted option.
        cmd.parse(Vec::<&str>::new()).unwrap();
        assert!(cmd.option_results().is_empty());
    }

    #[test]
    fn test_required_option() {
        let mut cmd = Command::new()
            .with_required_option("-r, --required <param>", None)
            .unwrap();

        assert_eq!(
            cmd.parse(Vec::<&str>::new()),
            Err(ParseError::MissingRequiredOption(
                "-r, --required <param>".into()
            ))
        );

        cmd.parse(["-r", "a"]).unwrap();
        assert_eq!(opts(&cmd), vec![("required", &Value::from("a"))]);
    }

    #[test]
    fn test_required_option_state_does_not_leak_between_parses() {
        let mut cmd = Command::new()
            .with_required_option("-r, --required <param>", None)
            .unwrap();

        cmd.parse(["-r", "a"]).unwrap();
        assert_eq!(
            cmd.parse(Vec::<&str>::new()),
            Err(ParseError::MissingRequiredOption(
                "-r, --required <param>".into()
            ))
        );
        // Failed parse keeps the previous results.
        assert_eq!(cmd.option_results()["required"], Value::from("a"));
    }

    #[test]
    fn test_required_option_checked_at_terminator() {
        let mut cmd = Command::new()
            .with_required_option("-r <param>", None)
            .unwrap()
            .with_argument("[rest...]", None)
            .unwrap();

        assert_eq!(
            cmd.parse(["--", "-r", "x"]),
            Err(ParseError::MissingRequiredOption("-r <param>".into()))
        );
    }

    #[test]
    fn test_multiple_options() {
        let mut cmd = Command::new()
            .with_option("-a, --all <type>", None)
            .unwrap()
            .with_option("-v, --verbose", None)
            .unwrap();

        cmd.parse(Vec::<&str>::new()).unwrap();
        assert!(cmd.option_results().is_empty());

        cmd.parse(["--verbose", "-a", "this is type"]).unwrap();
        assert_eq!(
            opts(&cmd),
            vec![
                ("all", &Value::from("this is type")),
                ("verbose", &Value::Bool(true)),
            ]
        );
    }

    #[test]
    fn test_duplicate_flags_first_match_wins() {
        let mut cmd = Command::new()
            .with_option("-x, --first", None)
            .unwrap()
            .with_option("-x, --second <v>", None)
            .unwrap();

        cmd.parse(["-x", "value"]).unwrap();
        assert_eq!(opts(&cmd), vec![("first", &Value::Bool(true))]);
    }

    #[test]
    fn test_required_argument() {
        let mut cmd = Command::new().with_argument("<input>", None).unwrap();

        assert_eq!(
            cmd.parse(Vec::<&str>::new()),
            Err(ParseError::MissingRequiredArgument("input".into()))
        );

        cmd.parse(["input"]).unwrap();
        assert_eq!(cmd.argument_results()["input"], Value::from("input"));

        cmd.parse(["--", "-d input"]).unwrap();
        assert_eq!(cmd.argument_results()["input"], Value::from("-d input"));
    }

    #[test]
    fn test_optional_argument() {
        let mut cmd = Command::new().with_argument("[input]", None).unwrap();

        cmd.parse(Vec::<&str>::new()).unwrap();
        assert!(cmd.argument_results().is_empty());

        cmd.parse(["input"]).unwrap();
        assert_eq!(cmd.argument_results()["input"], Value::from("input"));
    }

    #[test]
    fn test_array_argument_across_calls() {
        let mut cmd = Command::new()
            .with_argument("<source>", None)
            .unwrap()
            .with_argument("[files...]", None)
            .unwrap();

        cmd.parse(["file1"]).unwrap();
        assert_eq!(cmd.argument_results().len(), 1);
        assert_eq!(cmd.argument_results()["source"], Value::from("file1"));

        cmd.parse(["file1", "file2", "file3", "file4"]).unwrap();
        assert_eq!(cmd.argument_results()["source"], Value::from("file1"));
        assert_eq!(
            cmd.argument_results()["files"],
            list(&["file2", "file3", "file4"])
        );
    }

    #[test]
    fn test_required_array_argument_filled() {
        let mut cmd = Command::new().with_argument("<files...>", None).unwrap();

        cmd.parse(["a", "b"]).unwrap();
        assert_eq!(cmd.argument_results()["files"], list(&["a", "b"]));

        assert_eq!(
            cmd.parse(Vec::<&str>::new()),
            Err(ParseError::MissingRequiredArgument("files...".into()))
        );
    }

    #[test]
    fn test_extra_positionals_stop_the_scan() {
        let mut cmd = Command::new()
            .with_option("-v", None)
            .unwrap()
            .with_argument("<one>", None)
            .unwrap();

        cmd.parse(["a", "b", "-v"]).unwrap();
        assert_eq!(cmd.argument_results()["one"], Value::from("a"));
        assert!(cmd.option_results().is_empty());
    }

    #[test]
    fn test_options_and_arguments() {
        let mut cmd = Command::new()
            .with_option("-a, --all <type>", None)
            .unwrap()
            .with_option("-b [file]", None)
            .unwrap()
            .with_required_option("-v, --verbose", None)
            .unwrap()
            .with_argument("<source> [files...]", None)
            .unwrap();

        cmd.parse([
            "-a", "type", "-b", "123", "456", "-v", "789", "--", "-b", "file1",
        ])
        .unwrap();

        assert_eq!(cmd.argument_results()["source"], Value::from("456"));
        assert_eq!(
            cmd.argument_results()["files"],
            list(&["789", "-b", "file1"])
        );
        assert_eq!(
            opts(&cmd),
            vec![
                ("all", &Value::from("type")),
                ("b", &Value::from("123")),
                ("verbose", &Value::Bool(true)),
            ]
        );
    }

    #[test]
    fn test_version_trigger() {
        let mut cmd = Command::new().with_version("0.1.0");
        assert_eq!(
            cmd.parse(["-V"]),
            Ok(ParseOutcome::Version("0.1.0".into()))
        );
        assert_eq!(
            cmd.parse(["x", "--version"]),
            Ok(ParseOutcome::Version("0.1.0".into()))
        );

        let mut custom = Command::new().with_version_flag("0.2.0", "-v", None).unwrap();
        assert_eq!(
            custom.parse(["-v"]),
            Ok(ParseOutcome::Version("0.2.0".into()))
        );
        assert_eq!(
            custom.parse(["-V"]),
            Err(ParseError::UnknownOption("-V".into()))
        );
    }

    #[test]
    fn test_version_flags_inert_without_version() {
        let mut cmd = Command::new();
        assert_eq!(cmd.parse(["-V"]), Err(ParseError::UnknownOption("-V".into())));
        assert!(cmd.version_trigger().is_none());
    }

    #[test]
    fn test_help_trigger_wins_over_errors() {
        let mut cmd = Command::new()
            .with_required_option("-r <x>", None)
            .unwrap()
            .with_version("1.0.0");

        match cmd.parse(["--bogus", "-V", "--help"]) {
            Ok(ParseOutcome::Help(text)) => assert!(text.contains("Options:")),
            other => panic!("expected help, got {other:?}"),
        }

        let mut custom = Command::new().with_help_flag("-u, --usage", None).unwrap();
        assert!(matches!(custom.parse(["--usage"]), Ok(ParseOutcome::Help(_))));
        assert_eq!(
            custom.parse(["-h"]),
            Err(ParseError::UnknownOption("-h".into()))
        );
    }

    #[test]
    fn test_invalid_declarations() {
        assert_eq!(
            Command::new().with_option("-aa", None).unwrap_err(),
            DeclarationError::InvalidFlagDeclaration("-aa".into())
        );
        assert_eq!(
            Command::new().with_argument("  ", None).unwrap_err(),
            DeclarationError::InvalidArgumentDeclaration("  ".into())
        );
        assert_eq!(
            Command::new().with_argument("<a> b", None).unwrap_err(),
            DeclarationError::InvalidArgumentDeclaration("b".into())
        );
    }

    #[test]
    fn test_argument_description_single_token_only() {
        let cmd = Command::new()
            .with_argument("<source>", Some("where to copy from"))
            .unwrap()
            .with_argument("[a] [b]", Some("ignored"))
            .unwrap();

        let specs = cmd.argument_specs();
        assert_eq!(specs[0].description.as_deref(), Some("where to copy from"));
        assert_eq!(specs[1].description, None);
        assert_eq!(specs[2].description, None);
    }

    #[test]
    fn test_reverse_flag_is_plain_boolean() {
        let mut cmd = Command::new().with_option("--no-color", None).unwrap();
        assert!(cmd.option_specs()[0].reverse);

        cmd.parse(["--no-color"]).unwrap();
        assert_eq!(cmd.option_results()["color"], Value::Bool(true));
    }
}
