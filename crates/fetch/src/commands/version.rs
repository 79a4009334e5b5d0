//! `fetch version` command implementation.

use console::Term;

use crate::error::CliError;

/// Commit the binary was built from, when the build recorded one.
const GIT_COMMIT: Option<&str> = option_env!("FETCH_GIT_COMMIT");

/// Version report, one entry per line.
fn version_lines(version: &str, commit: Option<&str>) -> [String; 3] {
    [
        "fetch:".to_owned(),
        format!(" Version:\t{version}"),
        format!(" Git commit:\t{}", commit.unwrap_or("unknown")),
    ]
}

/// Print version information to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub(crate) fn execute(version: &str) -> Result<(), CliError> {
    let term = Term::stdout();
    for line in version_lines(version, GIT_COMMIT) {
        term.write_line(&line)?;
    }
    Ok(())
}
