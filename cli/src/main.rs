use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use flagspec_core::{CommandConfig, ParseOutcome, ValueMap, validate_command};
use serde::Serialize;

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "flagspec")]
#[command(version, about = "Parse argument lists against flag declaration files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse the arguments after `--` against a declaration file.
    Parse(ParseArgs),
    /// Print the help text a declaration file produces.
    ShowHelp(ShowHelpArgs),
    /// Check a declaration file for invalid or conflicting declarations.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Declaration file (YAML, or JSON when the extension is .json).
    #[arg(long)]
    config: PathBuf,
    /// Output format for the parsed options and arguments.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Raw arguments to parse.
    #[arg(last = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct ShowHelpArgs {
    /// Declaration file (YAML, or JSON when the extension is .json).
    #[arg(long)]
    config: PathBuf,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Declaration file (YAML, or JSON when the extension is .json).
    #[arg(long)]
    config: PathBuf,
}

/// Parsed results as printed by `flagspec parse`.
#[derive(Debug, Serialize)]
struct ParseOutput<'a> {
    options: &'a ValueMap,
    arguments: &'a ValueMap,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::ShowHelp(args) => run_show_help(args),
        Command::Check(args) => run_check(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn load_command(path: &Path) -> Result<flagspec_core::Command, String> {
    let config = CommandConfig::load(path)
        .map_err(|err| format!("Failed to load '{}': {err}", path.display()))?;
    config
        .into_command()
        .map_err(|err| format!("Failed to build command from '{}': {err}", path.display()))
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let mut cmd = load_command(&args.config)?;

    match cmd.parse(&args.args) {
        Ok(ParseOutcome::Parsed) => {}
        Ok(ParseOutcome::Help(text)) => {
            println!("{text}");
            return Ok(());
        }
        Ok(ParseOutcome::Version(version)) => {
            println!("{version}");
            return Ok(());
        }
        // Parse errors already carry their `error:` prefix.
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(err.exit_code());
        }
    }

    let output = ParseOutput {
        options: cmd.option_results(),
        arguments: cmd.argument_results(),
    };
    let raw = match args.format {
        CliOutputFormat::Json => serde_json::to_string_pretty(&output)
            .map_err(|e| format!("JSON serialization failed: {e}"))?,
        CliOutputFormat::Yaml => {
            serde_yaml::to_string(&output).map_err(|e| format!("YAML serialization failed: {e}"))?
        }
    };
    println!("{}", raw.trim_end());
    Ok(())
}

fn run_show_help(args: ShowHelpArgs) -> Result<(), String> {
    let cmd = load_command(&args.config)?;
    println!("{}", cmd.help());
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let cmd = load_command(&args.config)?;
    let findings = validate_command(&cmd);

    if findings.is_empty() {
        println!(
            "Checked {} option(s) and {} argument(s): no problems found.",
            cmd.option_specs().len(),
            cmd.argument_specs().len()
        );
        return Ok(());
    }

    for finding in &findings {
        eprintln!("{finding}");
    }
    Err(format!(
        "{} declaration problem(s) in '{}'",
        findings.len(),
        args.config.display()
    ))
}
