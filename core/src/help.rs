//! Help text rendering.

use std::cmp::Ordering;

use crate::command::Command;

/// Renders the help text for `command`.
///
/// Layout: an optional `Usage:` line (needs both name and usage), an
/// optional description, the `Options:` block (registered options plus the
/// version and help triggers), then an `Arguments:` block when positional
/// slots are declared. Rows are indented by two spaces and descriptions are
/// aligned to the widest flag column in their block.
///
/// # Examples
///
/// ```
/// use flagspec_core::Command;
///
/// let cmd = Command::new()
///     .with_name("cp")
///     .with_usage("[options] <source>")
///     .with_option("-r, --recursive", Some("copy directories"))?;
///
/// let help = cmd.help();
/// assert!(help.starts_with("Usage: cp [options] <source>\n"));
/// assert!(help.contains("  -r, --recursive  copy directories"));
/// # Ok::<(), flagspec_core::DeclarationError>(())
/// ```
pub fn render_help(command: &Command) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let (Some(name), Some(usage)) = (command.name(), command.usage()) {
        lines.push(format!("Usage: {name} {usage}"));
        lines.push(String::new());
    }

    if let Some(desc) = command.description() {
        lines.push(desc.to_string());
        lines.push(String::new());
    }

    let mut options: Vec<(String, String)> = command
        .option_specs()
        .iter()
        .map(|option| (option.display_name(), option.help_description()))
        .collect();
    if let Some(trigger) = command.version_trigger() {
        options.push((trigger.flags(), trigger.description.clone()));
    }
    let help = command.help_trigger();
    options.push((help.flags(), help.description.clone()));

    options.sort_by(|(a, _), (b, _)| compare_flags(a, b));
    lines.push("Options:".to_string());
    lines.extend(format_rows(&options));

    let arguments: Vec<(String, String)> = command
        .argument_specs()
        .iter()
        .map(|arg| (arg.display_name(), arg.description.clone().unwrap_or_default()))
        .collect();
    if !arguments.is_empty() {
        lines.push(String::new());
        lines.push("Arguments:".to_string());
        lines.extend(format_rows(&arguments));
    }

    lines.join("\n")
}

/// Orders help rows: entries led by a short flag come before long-only
/// entries, then lexicographic on the text with leading dashes removed.
pub fn compare_flags(a: &str, b: &str) -> Ordering {
    let long_only = |s: &str| s.starts_with("--");
    long_only(a)
        .cmp(&long_only(b))
        .then_with(|| a.trim_start_matches('-').cmp(b.trim_start_matches('-')))
}

fn format_rows(rows: &[(String, String)]) -> Vec<String> {
    let width = rows.iter().map(|(flag, _)| flag.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(flag, desc)| {
            format!("  {flag:<width$}  {desc}")
                .trim_end()
                .to_string()
        })
        .collect()
}
