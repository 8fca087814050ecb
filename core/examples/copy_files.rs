//! A small `copy`-style command built with the builder API.
//!
//! Demonstrates declaring options and arguments, then handing process
//! arguments to `parse_or_exit()`, which prints help/version or errors and
//! exits the way a command-line tool is expected to.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p flagspec-core --example copy_files -- -d out src a.txt b.txt
//! cargo run -p flagspec-core --example copy_files -- --help
//! ```

use flagspec_core::{Command, DeclarationError, OptionSpec};

fn build() -> Result<Command, DeclarationError> {
    Ok(Command::new()
        .with_name("copy_files")
        .with_usage("[options] <source> [files...]")
        .with_description("Pretend to copy files from a source into a destination.")
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_required_option("-d, --dest <dir>", Some("destination directory"))?
        .with_option("-e, --exclude <glob...>", Some("patterns to skip"))?
        .with_option("-n, --dry-run", Some("print actions only"))?
        .with_option_spec(
            OptionSpec::new("-m, --mode [mode]")?
                .with_description("file mode for copies")
                .with_default("644", Some("rw-r--r--")),
        )
        .with_argument("<source>", Some("source directory"))?
        .with_argument("[files...]", Some("files to copy (default: everything)"))?)
}

fn main() {
    let mut cmd = match build() {
        Ok(cmd) => cmd,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    cmd.parse_env_or_exit();

    let opts = cmd.option_results();
    let args = cmd.argument_results();

    println!("Options:");
    for (name, value) in opts {
        println!("  {name} = {value}");
    }
    println!("Arguments:");
    for (name, value) in args {
        println!("  {name} = {value}");
    }
}
